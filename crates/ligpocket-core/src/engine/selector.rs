use crate::core::models::ids::ResidueId;
use crate::core::models::system::ResidueView;
use std::collections::HashSet;

/// Decides which residues make it into the extracted pocket.
///
/// A residue is accepted when it lies in the target chain and is either the
/// ligand itself or one of the precomputed neighbors. The chain is checked for
/// both cases, so a neighbor handle can never admit a residue from another chain.
#[derive(Debug, Clone)]
pub struct InteractionSelector {
    target_chain_id: char,
    ligand_resname: String,
    neighbor_residues: HashSet<ResidueId>,
}

impl InteractionSelector {
    pub fn new(
        target_chain_id: char,
        ligand_resname: impl Into<String>,
        neighbor_residues: HashSet<ResidueId>,
    ) -> Self {
        Self {
            target_chain_id,
            ligand_resname: ligand_resname.into(),
            neighbor_residues,
        }
    }

    pub fn target_chain_id(&self) -> char {
        self.target_chain_id
    }

    pub fn ligand_resname(&self) -> &str {
        &self.ligand_resname
    }

    pub fn neighbor_residues(&self) -> &HashSet<ResidueId> {
        &self.neighbor_residues
    }

    pub fn accept_residue(&self, view: &ResidueView<'_>) -> bool {
        let in_target_chain = view.chain.id == self.target_chain_id;
        let is_ligand = in_target_chain && view.residue.name == self.ligand_resname;
        let is_neighbor = in_target_chain && self.neighbor_residues.contains(&view.id);
        is_ligand || is_neighbor
    }
}
