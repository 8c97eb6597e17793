//! # ligpocket
//!
//! Extraction of ligand binding pockets from macromolecular structures.
//!
//! Given a structure file, a chain identifier, and a ligand residue name, the
//! library finds every residue of that chain with an atom within a distance cutoff
//! of the ligand and writes the ligand together with those residues to a new file.
//!
//! The crate is organized in three layers:
//!
//! - **[`core`]**: the structure model (`Structure` and its typed IDs), PDB reading
//!   and writing, and residue-name tables.
//! - **[`engine`]**: ligand lookup, the neighbor search, the residue selector, and the
//!   configuration, error, and progress types shared by the workflows.
//! - **[`workflows`]**: complete procedures, such as
//!   [`workflows::extract::get_protein_ligand_interaction_pdb`].

pub mod core;
pub mod engine;
pub mod workflows;
