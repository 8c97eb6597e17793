//! Ligand pocket extraction engine.
//!
//! The engine locates a ligand by chain and residue name, collects the residues of
//! the same chain within a distance cutoff of it, and provides the selection used to
//! write the resulting pocket. Configuration, error, and progress types used by the
//! workflows also live here.

pub mod config;
pub mod error;
pub mod progress;
pub mod search;
pub mod selector;
