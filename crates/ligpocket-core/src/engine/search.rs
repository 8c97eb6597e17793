use crate::core::models::atom::{Atom, RecordKind};
use crate::core::models::ids::{AtomId, ResidueId};
use crate::core::models::system::Structure;
use crate::core::utils::identifiers::is_water_residue;
use std::collections::HashSet;
use tracing::debug;

/// A hetero residue found in a structure, as reported by [`list_hetero_residues`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeteroGroup {
    pub model_serial: usize,
    pub chain_id: char,
    pub name: String,
    pub sequence_number: isize,
    pub insertion_code: Option<char>,
    pub atom_count: usize,
}

/// Residues of every chain named `target_chain`, model by model, in file order.
fn residues_in_chain(
    structure: &Structure,
    target_chain: char,
) -> impl Iterator<Item = ResidueId> + '_ {
    structure
        .models()
        .filter_map(move |(model_id, _)| {
            structure.find_chain_by_id(model_id, target_chain)
        })
        .filter_map(move |chain_id| structure.chain(chain_id))
        .flat_map(|chain| chain.residues().iter().copied())
}

/// Collects the atoms of the ligand `ligand_resname` in chain `target_chain`.
///
/// Every model is scanned, so a ligand present in several models contributes the
/// atoms of each copy. Alternate locations are collapsed to one conformer per
/// atom name. An absent ligand yields an empty list.
pub fn find_ligand_atoms(
    structure: &Structure,
    target_chain: char,
    ligand_resname: &str,
) -> Vec<AtomId> {
    let ligand_atoms: Vec<AtomId> = residues_in_chain(structure, target_chain)
        .filter(|&residue_id| {
            structure
                .residue(residue_id)
                .is_some_and(|residue| residue.name == ligand_resname)
        })
        .flat_map(|residue_id| structure.conformer_atoms(residue_id))
        .collect();

    debug!(
        "Found {} atoms of ligand '{}' in chain '{}'.",
        ligand_atoms.len(),
        ligand_resname,
        target_chain
    );
    ligand_atoms
}

/// Finds the residues of `target_chain` with at least one atom within
/// `distance_cutoff` Angstroms (inclusive) of any ligand atom.
///
/// Residues named `ligand_resname` are never reported, including other copies of
/// the same ligand.
pub fn find_neighbor_residues(
    structure: &Structure,
    ligand_atoms: &[AtomId],
    target_chain: char,
    ligand_resname: &str,
    distance_cutoff: f64,
) -> HashSet<ResidueId> {
    let mut neighbors = HashSet::new();

    let ligand: Vec<&Atom> = ligand_atoms
        .iter()
        .filter_map(|&atom_id| structure.atom(atom_id))
        .collect();
    if ligand.is_empty() {
        return neighbors;
    }

    for residue_id in residues_in_chain(structure, target_chain) {
        let Some(residue) = structure.residue(residue_id) else {
            continue;
        };
        if residue.name == ligand_resname {
            continue;
        }

        'residue: for atom_id in structure.conformer_atoms(residue_id) {
            let Some(atom) = structure.atom(atom_id) else {
                continue;
            };
            for ligand_atom in &ligand {
                if atom.distance_to(ligand_atom) <= distance_cutoff {
                    neighbors.insert(residue_id);
                    break 'residue;
                }
            }
        }
    }

    debug!(
        "Found {} residues within {:.2} A of ligand '{}' in chain '{}'.",
        neighbors.len(),
        distance_cutoff,
        ligand_resname,
        target_chain
    );
    neighbors
}

/// Lists the non-water residues read from `HETATM` records, in file order.
pub fn list_hetero_residues(structure: &Structure) -> Vec<HeteroGroup> {
    let mut groups = Vec::new();
    for (_, model) in structure.models() {
        for &chain_id in model.chains() {
            let Some(chain) = structure.chain(chain_id) else {
                continue;
            };
            for &residue_id in chain.residues() {
                let Some(residue) = structure.residue(residue_id) else {
                    continue;
                };
                if is_water_residue(&residue.name) {
                    continue;
                }
                let is_hetero = residue.atoms().iter().any(|&atom_id| {
                    structure
                        .atom(atom_id)
                        .is_some_and(|atom| atom.record == RecordKind::Hetatm)
                });
                if !is_hetero {
                    continue;
                }
                groups.push(HeteroGroup {
                    model_serial: model.serial,
                    chain_id: chain.id,
                    name: residue.name.clone(),
                    sequence_number: residue.sequence_number,
                    insertion_code: residue.insertion_code,
                    atom_count: structure.conformer_atoms(residue_id).len(),
                });
            }
        }
    }
    groups
}
