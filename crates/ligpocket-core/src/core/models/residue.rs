use super::ids::{AtomId, ChainId};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub sequence_number: isize,       // Residue sequence number from source file
    pub insertion_code: Option<char>, // Insertion code, if any
    pub name: String,                 // Selected residue name (e.g., "ALA", "EST")
    pub chain_id: ChainId,            // ID of the parent chain
    pub(crate) atoms: Vec<AtomId>,    // Atoms in file order, alternate locations included
    atom_name_map: HashMap<String, Vec<AtomId>>, // Map from atom name to its IDs
    variants: Vec<String>,            // Names read at this position, in file order
    atom_variants: HashMap<AtomId, usize>, // Index into `variants` for each atom
}

impl Residue {
    pub(crate) fn new(
        sequence_number: isize,
        insertion_code: Option<char>,
        name: &str,
        chain_id: ChainId,
    ) -> Self {
        Self {
            sequence_number,
            insertion_code,
            name: name.to_string(),
            chain_id,
            atoms: Vec::new(),
            atom_name_map: HashMap::new(),
            variants: vec![name.to_string()],
            atom_variants: HashMap::new(),
        }
    }

    /// Makes `name` the selected variant; atoms added afterwards belong to it.
    ///
    /// A polymer position carrying a point mutation (e.g. ALA in altloc A, SER in
    /// altloc B) is one residue with two variants. The variant read last is selected.
    pub(crate) fn select_variant(&mut self, name: &str) {
        if self.name == name {
            return;
        }
        if !self.variants.iter().any(|variant| variant == name) {
            self.variants.push(name.to_string());
        }
        self.name = name.to_string();
    }

    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        let variant = self
            .variants
            .iter()
            .position(|variant| *variant == self.name)
            .unwrap_or(0);
        self.atoms.push(atom_id);
        self.atom_variants.insert(atom_id, variant);
        self.atom_name_map
            .entry(atom_name.to_string())
            .or_default()
            .push(atom_id);
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn get_atom_ids_by_name(&self, name: &str) -> Option<&[AtomId]> {
        self.atom_name_map.get(name).map(|ids| ids.as_slice())
    }

    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    /// Residue name of the variant `atom_id` was read under.
    pub fn variant_of(&self, atom_id: AtomId) -> Option<&str> {
        self.atom_variants
            .get(&atom_id)
            .and_then(|&index| self.variants.get(index))
            .map(String::as_str)
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.insertion_code {
            Some(icode) => write!(f, "{}{}{}", self.name, self.sequence_number, icode),
            None => write!(f, "{}{}", self.name, self.sequence_number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::{AtomId, ChainId};
    use slotmap::KeyData;

    fn dummy_atom_id(n: u64) -> AtomId {
        AtomId::from(KeyData::from_ffi(n))
    }

    fn dummy_chain_id(n: u64) -> ChainId {
        ChainId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn new_residue_initializes_fields_correctly() {
        let chain_id = dummy_chain_id(1);
        let residue = Residue::new(10, None, "GLY", chain_id);
        assert_eq!(residue.sequence_number, 10);
        assert_eq!(residue.insertion_code, None);
        assert_eq!(residue.name, "GLY");
        assert_eq!(residue.chain_id, chain_id);
        assert_eq!(residue.variants(), &["GLY".to_string()]);
        assert!(residue.atoms().is_empty());
        assert!(residue.get_atom_ids_by_name("CA").is_none());
    }

    #[test]
    fn alternate_locations_share_a_name_entry() {
        let mut residue = Residue::new(7, None, "SER", dummy_chain_id(3));
        let alt_a = dummy_atom_id(1);
        let alt_b = dummy_atom_id(2);
        residue.add_atom("OG", alt_a);
        residue.add_atom("OG", alt_b);
        assert_eq!(residue.atoms(), &[alt_a, alt_b]);
        assert_eq!(
            residue.get_atom_ids_by_name("OG"),
            Some(&[alt_a, alt_b][..])
        );
    }

    #[test]
    fn atoms_are_tagged_with_the_variant_selected_when_added() {
        let mut residue = Residue::new(10, None, "ALA", dummy_chain_id(2));
        let ala_ca = dummy_atom_id(1);
        let ser_ca = dummy_atom_id(2);
        let ser_og = dummy_atom_id(3);
        residue.add_atom("CA", ala_ca);
        residue.select_variant("SER");
        residue.add_atom("CA", ser_ca);
        residue.add_atom("OG", ser_og);

        assert_eq!(residue.name, "SER");
        assert_eq!(residue.variants(), &["ALA".to_string(), "SER".to_string()]);
        assert_eq!(residue.variant_of(ala_ca), Some("ALA"));
        assert_eq!(residue.variant_of(ser_og), Some("SER"));
        assert_eq!(residue.variant_of(dummy_atom_id(99)), None);

        residue.select_variant("ALA");
        assert_eq!(residue.name, "ALA");
        assert_eq!(residue.variants().len(), 2);
    }

    #[test]
    fn display_includes_insertion_code_when_present() {
        let chain_id = dummy_chain_id(4);
        assert_eq!(
            Residue::new(600, None, "EST", chain_id).to_string(),
            "EST600"
        );
        assert_eq!(
            Residue::new(52, Some('A'), "LEU", chain_id).to_string(),
            "LEU52A"
        );
    }
}
