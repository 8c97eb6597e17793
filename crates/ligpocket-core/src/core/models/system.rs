use super::atom::{Atom, RecordKind};
use super::chain::{Chain, Model};
use super::ids::{AtomId, ChainId, ModelId, ResidueId};
use super::residue::Residue;
use slotmap::SlotMap;
use std::collections::HashMap;

/// Lookup key for residues: parent chain, sequence number, insertion code, and the
/// residue name for hetero groups.
///
/// Polymer residues are identified by position alone, so alternate residue names at
/// one position (point mutations) share a residue. Hetero groups also carry their
/// name, since ligands and waters may reuse a sequence number of the same chain.
type ResidueKey = (ChainId, isize, Option<char>, Option<String>);

/// Represents a complete macromolecular structure with models, chains, residues, and atoms.
///
/// This struct serves as the central data structure of the crate. All entities live
/// in slot map arenas and refer to each other through typed IDs: ownership is
/// top-down (a model lists its chains, a chain its residues, a residue its atoms)
/// while the upward links (`Atom::residue_id`, `Residue::chain_id`, `Chain::model_id`)
/// are plain, non-owning lookups.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    /// Primary storage for models.
    models: SlotMap<ModelId, Model>,
    /// Primary storage for chains.
    chains: SlotMap<ChainId, Chain>,
    /// Primary storage for residues.
    residues: SlotMap<ResidueId, Residue>,
    /// Primary storage for atoms.
    atoms: SlotMap<AtomId, Atom>,
    /// Models in file order.
    model_order: Vec<ModelId>,
    /// Lookup map for finding models by their serial number.
    model_serial_map: HashMap<usize, ModelId>,
    /// Lookup map for finding chains by model and single-character identifier.
    chain_id_map: HashMap<(ModelId, char), ChainId>,
    /// Lookup map for finding residues within a chain.
    residue_id_map: HashMap<ResidueKey, ResidueId>,
}

/// A borrowed view of a residue together with its parent chain.
///
/// This is what residue selection predicates receive: enough context to decide
/// on a residue without reaching back into the structure.
#[derive(Debug, Clone, Copy)]
pub struct ResidueView<'a> {
    pub id: ResidueId,
    pub residue: &'a Residue,
    pub chain: &'a Chain,
}

impl Structure {
    /// Creates a new, empty structure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves an immutable reference to an atom by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The atom ID to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&Atom)` if the atom exists, otherwise `None`.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Returns an iterator over all atoms in the structure.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    /// Retrieves an immutable reference to a residue by its ID.
    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    /// Returns an iterator over all residues in the structure.
    pub fn residues_iter(&self) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.residues.iter()
    }

    /// Retrieves an immutable reference to a chain by its ID.
    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    /// Retrieves an immutable reference to a model by its ID.
    pub fn model(&self, id: ModelId) -> Option<&Model> {
        self.models.get(id)
    }

    /// Returns an iterator over the models in file order.
    ///
    /// # Return
    ///
    /// An iterator yielding `(ModelId, &Model)` pairs.
    pub fn models(&self) -> impl Iterator<Item = (ModelId, &Model)> {
        self.model_order
            .iter()
            .filter_map(|&id| self.models.get(id).map(|model| (id, model)))
    }

    /// Number of models in the structure.
    pub fn model_count(&self) -> usize {
        self.model_order.len()
    }

    /// Finds a model ID by its serial number.
    pub fn find_model_by_serial(&self, serial: usize) -> Option<ModelId> {
        self.model_serial_map.get(&serial).copied()
    }

    /// Finds a chain ID by its parent model and single-character identifier.
    ///
    /// # Arguments
    ///
    /// * `model_id` - The model containing the chain.
    /// * `id` - The character identifier of the chain.
    ///
    /// # Return
    ///
    /// Returns `Some(ChainId)` if the chain exists, otherwise `None`.
    pub fn find_chain_by_id(&self, model_id: ModelId, id: char) -> Option<ChainId> {
        self.chain_id_map.get(&(model_id, id)).copied()
    }

    /// Finds the residue at a position of a chain that was read under `name`.
    ///
    /// Hetero groups are matched by name; a polymer residue matches when `name` is
    /// one of its variants.
    pub fn find_residue(
        &self,
        chain_id: ChainId,
        sequence_number: isize,
        insertion_code: Option<char>,
        name: &str,
    ) -> Option<ResidueId> {
        let hetero_key = (
            chain_id,
            sequence_number,
            insertion_code,
            Some(name.to_string()),
        );
        let polymer_key = (chain_id, sequence_number, insertion_code, None);
        self.residue_id_map.get(&hetero_key).copied().or_else(|| {
            self.residue_id_map
                .get(&polymer_key)
                .copied()
                .filter(|&id| {
                    self.residues
                        .get(id)
                        .is_some_and(|residue| residue.variants().iter().any(|v| v == name))
                })
        })
    }

    /// Adds a new model to the structure or returns the existing one.
    ///
    /// This method is idempotent on the model serial number.
    pub fn add_model(&mut self, serial: usize) -> ModelId {
        if let Some(&model_id) = self.model_serial_map.get(&serial) {
            return model_id;
        }
        let model_id = self.models.insert(Model::new(serial));
        self.model_serial_map.insert(serial, model_id);
        self.model_order.push(model_id);
        model_id
    }

    /// Adds a new chain to a model or returns the existing one.
    ///
    /// This method is idempotent; a chain identifier that reappears later in the same
    /// model (e.g., hetero groups listed after other chains) resolves to the chain
    /// created first.
    ///
    /// # Arguments
    ///
    /// * `model_id` - The model to add the chain to.
    /// * `id` - The single-character identifier for the chain.
    ///
    /// # Return
    ///
    /// Returns `Some(ChainId)` if successful, otherwise `None` (if the model doesn't exist).
    pub fn add_chain(&mut self, model_id: ModelId, id: char) -> Option<ChainId> {
        let model = self.models.get_mut(model_id)?;
        let chains = &mut self.chains;
        let chain_id = *self
            .chain_id_map
            .entry((model_id, id))
            .or_insert_with(|| chains.insert(Chain::new(id, model_id)));

        if !model.chains.contains(&chain_id) {
            model.chains.push(chain_id);
        }
        Some(chain_id)
    }

    /// Adds a new residue to a chain or returns the existing one.
    ///
    /// `record` decides the identity: `ATOM` residues are keyed by position only,
    /// `HETATM` residues by position and name. When an existing polymer residue is
    /// returned under a different name, that name becomes its selected variant.
    ///
    /// # Return
    ///
    /// Returns `Some(ResidueId)` if successful, otherwise `None` (if the chain doesn't exist).
    pub fn add_residue(
        &mut self,
        chain_id: ChainId,
        sequence_number: isize,
        insertion_code: Option<char>,
        name: &str,
        record: RecordKind,
    ) -> Option<ResidueId> {
        let chain = self.chains.get_mut(chain_id)?;
        let hetero_name = match record {
            RecordKind::Atom => None,
            RecordKind::Hetatm => Some(name.to_string()),
        };
        let key = (chain_id, sequence_number, insertion_code, hetero_name);
        let residues = &mut self.residues;

        let residue_id = *self.residue_id_map.entry(key).or_insert_with(|| {
            residues.insert(Residue::new(
                sequence_number,
                insertion_code,
                name,
                chain_id,
            ))
        });

        if let Some(residue) = self.residues.get_mut(residue_id) {
            residue.select_variant(name);
        }
        if !chain.residues.contains(&residue_id) {
            chain.residues.push(residue_id);
        }

        Some(residue_id)
    }

    /// Adds an atom to a specific residue.
    ///
    /// The atom's `residue_id` is overwritten with `residue_id` so the back-reference
    /// always agrees with the owning residue.
    ///
    /// # Return
    ///
    /// Returns `Some(AtomId)` if successful, otherwise `None` (if the residue doesn't exist).
    pub fn add_atom_to_residue(&mut self, residue_id: ResidueId, mut atom: Atom) -> Option<AtomId> {
        let residue = self.residues.get_mut(residue_id)?;
        atom.residue_id = residue_id;
        let name = atom.name.clone();
        let atom_id = self.atoms.insert(atom);
        residue.add_atom(&name, atom_id);
        Some(atom_id)
    }

    /// Builds a [`ResidueView`] for the given residue.
    pub fn residue_view(&self, id: ResidueId) -> Option<ResidueView<'_>> {
        let residue = self.residues.get(id)?;
        let chain = self.chains.get(residue.chain_id)?;
        Some(ResidueView { id, residue, chain })
    }

    /// Returns the single-character identifier of the chain a residue belongs to.
    pub fn chain_char_of(&self, residue_id: ResidueId) -> Option<char> {
        self.residues
            .get(residue_id)
            .and_then(|residue| self.chains.get(residue.chain_id))
            .map(|chain| chain.id)
    }

    /// Returns the atoms of a residue with alternate locations collapsed to one conformer.
    ///
    /// Only atoms of the selected variant are considered. Atoms without an alternate
    /// location indicator are always kept. Among atoms that share a name and carry an
    /// indicator, only the one with the highest occupancy is kept; on ties the first in
    /// file order wins. The result preserves file order.
    pub fn conformer_atoms(&self, residue_id: ResidueId) -> Vec<AtomId> {
        let Some(residue) = self.residues.get(residue_id) else {
            return Vec::new();
        };
        let selected = residue.name.as_str();

        residue
            .atoms()
            .iter()
            .copied()
            .filter(|&atom_id| residue.variant_of(atom_id) == Some(selected))
            .filter(|&atom_id| match self.atoms.get(atom_id) {
                Some(atom) if atom.alt_loc.is_some() => {
                    self.preferred_alternate(residue, &atom.name, selected) == Some(atom_id)
                }
                Some(_) => true,
                None => false,
            })
            .collect()
    }

    fn preferred_alternate(
        &self,
        residue: &Residue,
        atom_name: &str,
        variant: &str,
    ) -> Option<AtomId> {
        let mut best: Option<(AtomId, f64)> = None;
        for &candidate in residue.get_atom_ids_by_name(atom_name).unwrap_or_default() {
            if residue.variant_of(candidate) != Some(variant) {
                continue;
            }
            let Some(atom) = self.atoms.get(candidate) else {
                continue;
            };
            if atom.alt_loc.is_none() {
                continue;
            }
            if best.is_none_or(|(_, occupancy)| atom.occupancy > occupancy) {
                best = Some((candidate, atom.occupancy));
            }
        }
        best.map(|(atom_id, _)| atom_id)
    }
}
