//! Amino acid code tables.
//!
//! Only the 20 standard amino acids are recognized.

#[rustfmt::skip]
pub fn aa1to3(aa: char) -> Option<&'static str> {
    match aa.to_ascii_uppercase() {
        'A' => Some("ALA"), 'C' => Some("CYS"), 'D' => Some("ASP"),
        'E' => Some("GLU"), 'F' => Some("PHE"), 'G' => Some("GLY"),
        'H' => Some("HIS"), 'I' => Some("ILE"), 'K' => Some("LYS"),
        'L' => Some("LEU"), 'M' => Some("MET"), 'N' => Some("ASN"),
        'P' => Some("PRO"), 'Q' => Some("GLN"), 'R' => Some("ARG"),
        'S' => Some("SER"), 'T' => Some("THR"), 'V' => Some("VAL"),
        'W' => Some("TRP"), 'Y' => Some("TYR"), _   => None,
    }
}

#[rustfmt::skip]
pub fn aa3to1(aa: &str) -> Option<char> {
    match aa.to_ascii_uppercase().as_str() {
        "ALA" => Some('A'), "CYS" => Some('C'), "ASP" => Some('D'),
        "GLU" => Some('E'), "PHE" => Some('F'), "GLY" => Some('G'),
        "HIS" => Some('H'), "ILE" => Some('I'), "LYS" => Some('K'),
        "LEU" => Some('L'), "MET" => Some('M'), "ASN" => Some('N'),
        "PRO" => Some('P'), "GLN" => Some('Q'), "ARG" => Some('R'),
        "SER" => Some('S'), "THR" => Some('T'), "VAL" => Some('V'),
        "TRP" => Some('W'), "TYR" => Some('Y'), _     => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_agree() {
        for aa in "ACDEFGHIKLMNPQRSTVWY".chars() {
            let code3 = aa1to3(aa).unwrap();
            assert_eq!(aa3to1(code3), Some(aa));
        }
    }

    #[test]
    fn test_case_and_unknowns() {
        assert_eq!(aa1to3('s'), Some("SER"));
        assert_eq!(aa3to1("Ser"), Some('S'));
        assert_eq!(aa1to3('X'), None);
        assert_eq!(aa1to3('B'), None);
        assert_eq!(aa3to1("HOH"), None);
    }
}
