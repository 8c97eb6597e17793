//! # Core Module
//!
//! This module provides the foundation of ligpocket: the in-memory structure
//! model and the file formats it is read from and written to.
//!
//! ## Architecture
//!
//! - **Structure Representation** ([`models`]) - Models, chains, residues, and atoms
//!   stored in slot map arenas and addressed through typed handles
//! - **File I/O** ([`io`]) - Reading and writing structure files, including filtered
//!   output driven by a residue selection predicate
//! - **Utilities** ([`utils`]) - Residue name classification

pub mod io;
pub mod models;
pub mod utils;
