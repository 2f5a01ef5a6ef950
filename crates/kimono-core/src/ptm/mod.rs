//! Post-translational modification sites.

use crate::error::{KimonoError, Result};
use crate::node_id::node_label;
use crate::residue::{aa1to3, aa3to1};
use strum::{Display, EnumIter, EnumString};

/// The only chain identifier sites may carry at the moment.
pub const SUPPORTED_CHAIN: &str = "A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ModificationType {
    Phosphorylation,
    Ubiquitination,
    Acetylation,
    Methylation,
}

impl ModificationType {
    /// Short symbol used in site labels, e.g. `p` for phosphorylation.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Phosphorylation => "p",
            Self::Ubiquitination => "u",
            Self::Acetylation => "ac",
            Self::Methylation => "me",
        }
    }
}

/// A site of a post-translational modification on a protein.
///
/// The residue is stored as an upper-case one-letter code whatever form it
/// was given in. The modification type is kept as the raw dataset string;
/// it is only interpreted when a label is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PtmSite {
    entry_name: String,
    acc_id: String,
    residue: char,
    residue_name: &'static str,
    position: u32,
    ptm_type: String,
    chain_id: String,
}

impl PtmSite {
    pub fn new(
        entry_name: impl Into<String>,
        acc_id: impl Into<String>,
        residue: &str,
        position: u32,
        ptm_type: impl Into<String>,
        chain_id: Option<&str>,
    ) -> Result<Self> {
        let chain_id = chain_id.unwrap_or(SUPPORTED_CHAIN);
        if chain_id != SUPPORTED_CHAIN {
            return Err(KimonoError::UnsupportedChain(chain_id.to_string()));
        }

        let (residue, residue_name) = normalize_residue(residue)?;
        Ok(PtmSite {
            entry_name: entry_name.into(),
            acc_id: acc_id.into(),
            residue,
            residue_name,
            position,
            ptm_type: ptm_type.into(),
            chain_id: chain_id.to_string(),
        })
    }

    pub fn entry_name(&self) -> &str {
        &self.entry_name
    }
    pub fn acc_id(&self) -> &str {
        &self.acc_id
    }
    pub fn residue(&self) -> char {
        self.residue
    }
    /// Three-letter residue name, e.g. `SER`.
    pub fn residue_name(&self) -> &'static str {
        self.residue_name
    }
    pub fn position(&self) -> u32 {
        self.position
    }
    pub fn ptm_type(&self) -> &str {
        &self.ptm_type
    }
    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// Canonical node id, derived on every call.
    pub fn node_id(&self) -> String {
        node_label(
            &self.chain_id,
            self.residue_name,
            i64::from(self.position),
            None,
        )
    }

    pub fn modification(&self) -> Result<ModificationType> {
        self.ptm_type
            .parse()
            .map_err(|_| KimonoError::UnknownModification(self.ptm_type.clone()))
    }

    /// `PTMSite(P12345, A:SER:4-p)`. Fails for modification types without a symbol.
    pub fn display_label(&self) -> Result<String> {
        let symbol = self.modification()?.symbol();
        Ok(format!("PTMSite({}, {}-{})", self.acc_id, self.node_id(), symbol))
    }
}

fn normalize_residue(residue: &str) -> Result<(char, &'static str)> {
    let one_letter = match residue.chars().count() {
        3 => aa3to1(residue),
        1 => residue.chars().next().map(|aa| aa.to_ascii_uppercase()),
        _ => None,
    };
    one_letter
        .and_then(|aa| aa1to3(aa).map(|code3| (aa, code3)))
        .ok_or_else(|| KimonoError::InvalidResidue(residue.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn site(residue: &str, ptm_type: &str) -> Result<PtmSite> {
        PtmSite::new("SERA_HUMAN", "P12345", residue, 4, ptm_type, None)
    }

    #[test]
    fn test_residue_normalization() {
        assert_eq!(site("S", "phosphorylation").unwrap().residue(), 'S');
        assert_eq!(site("s", "phosphorylation").unwrap().residue(), 'S');
        assert_eq!(site("SER", "phosphorylation").unwrap().residue(), 'S');
        assert_eq!(site("ser", "phosphorylation").unwrap().residue(), 'S');
        assert_eq!(
            site("S", "Phosphorylation").unwrap().node_id(),
            site("SER", "Phosphorylation").unwrap().node_id()
        );
    }

    #[test]
    fn test_invalid_residue() {
        for bad in ["", "SE", "SERI", "X", "XAA"] {
            assert!(
                matches!(site(bad, "acetylation"), Err(KimonoError::InvalidResidue(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_unsupported_chain() {
        for chain in ["B", "a", "AA", ""] {
            let result = PtmSite::new("SERA_HUMAN", "P12345", "S", 4, "acetylation", Some(chain));
            assert!(matches!(result, Err(KimonoError::UnsupportedChain(_))));
        }
        // chain is checked before the residue
        let result = PtmSite::new("SERA_HUMAN", "P12345", "??", 4, "acetylation", Some("B"));
        assert!(matches!(result, Err(KimonoError::UnsupportedChain(_))));
    }

    #[test]
    fn test_node_id_and_label() {
        let site = site("S", "Phosphorylation").unwrap();
        assert_eq!(site.node_id(), "A:SER:4");
        assert_eq!(site.display_label().unwrap(), "PTMSite(P12345, A:SER:4-p)");
    }

    #[test]
    fn test_unknown_modification_label() {
        let site = site("K", "Sumoylation").unwrap();
        assert!(matches!(
            site.display_label(),
            Err(KimonoError::UnknownModification(_))
        ));
    }

    #[test]
    fn test_modification_symbols() {
        let symbols: Vec<&str> = ModificationType::iter().map(|m| m.symbol()).collect();
        assert_eq!(symbols, ["p", "u", "ac", "me"]);
        assert_eq!(
            "METHYLATION".parse::<ModificationType>().unwrap(),
            ModificationType::Methylation
        );
    }
}
