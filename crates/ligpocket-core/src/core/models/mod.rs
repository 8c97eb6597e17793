//! # Core Models Module
//!
//! This module contains the data structures used to represent macromolecular
//! structures in ligpocket.
//!
//! ## Overview
//!
//! A [`system::Structure`] owns every model, chain, residue, and atom in slot map
//! arenas. Entities refer to each other through the typed handles in [`ids`], which
//! are `Copy`, hashable, and stable for the lifetime of the structure. This makes
//! residue handles suitable as set members regardless of how the hierarchy is
//! traversed.
//!
//! ## Key Components
//!
//! - [`atom`] - Individual atom records with coordinates and a distance operation
//! - [`residue`] - Residues identified by sequence number, insertion code, and name
//! - [`chain`] - Chains and the models that contain them
//! - [`system`] - The `Structure` arena and its lookup maps
//! - [`ids`] - Unique identifier types for atoms, residues, chains, and models
//!
//! ## Usage
//!
//! ```
//! use ligpocket::core::models::{
//!     atom::{Atom, RecordKind},
//!     system::Structure,
//! };
//! use nalgebra::Point3;
//!
//! let mut structure = Structure::new();
//! let model_id = structure.add_model(1);
//! let chain_id = structure.add_chain(model_id, 'A').unwrap();
//! let residue_id = structure
//!     .add_residue(chain_id, 600, None, "EST", RecordKind::Hetatm)
//!     .unwrap();
//!
//! let atom = Atom::new("C1", residue_id, Point3::new(0.0, 0.0, 0.0));
//! structure.add_atom_to_residue(residue_id, atom).unwrap();
//! ```

pub mod atom;
pub mod chain;
pub mod ids;
pub mod residue;
pub mod system;
