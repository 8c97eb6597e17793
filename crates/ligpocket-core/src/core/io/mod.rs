//! Provides input/output functionality for molecular file formats.
//!
//! Readers and writers implement the [`traits::MolecularFile`] trait. Besides
//! plain reading and writing, the trait exposes a residue-selection hook used to
//! write filtered structures: the caller passes a predicate over residues and only
//! accepted residues reach the output.

pub mod pdb;
pub mod traits;
