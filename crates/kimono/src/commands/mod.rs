pub mod motif;
pub mod run;
