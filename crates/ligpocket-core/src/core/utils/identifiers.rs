use phf::{Set, phf_set};

static WATER_RESIDUE_NAMES: Set<&'static str> = phf_set! {
    "HOH", "WAT", "H2O", "DOD", "D2O", "TIP", "TIP3", "SOL",
};

pub fn is_water_residue(residue_name: &str) -> bool {
    WATER_RESIDUE_NAMES.contains(residue_name.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_common_water_names() {
        assert!(is_water_residue("HOH"));
        assert!(is_water_residue("WAT"));
        assert!(is_water_residue(" DOD "));
    }

    #[test]
    fn ligand_and_amino_acid_names_are_not_water() {
        assert!(!is_water_residue("EST"));
        assert!(!is_water_residue("ALA"));
        assert!(!is_water_residue("hoh"));
        assert!(!is_water_residue(""));
    }
}
