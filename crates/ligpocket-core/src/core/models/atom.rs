use super::ids::ResidueId;
use nalgebra::Point3;
use std::fmt;
use std::str::FromStr;

/// The kind of coordinate record an atom was read from.
///
/// Structure files distinguish atoms of standard polymer residues (`ATOM`) from
/// atoms of hetero groups such as ligands, ions, and waters (`HETATM`). The kind
/// is carried through so that filtered output reproduces the original records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum RecordKind {
    /// A standard polymer atom (`ATOM`).
    #[default]
    Atom,
    /// A hetero group atom (`HETATM`).
    Hetatm,
}

impl RecordKind {
    /// Returns the six-character record name used in the PDB format.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Atom => "ATOM",
            RecordKind::Hetatm => "HETATM",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = ();

    /// Parses a record name into a `RecordKind`.
    ///
    /// Surrounding whitespace is ignored and the comparison is case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns `()` if the input is neither `ATOM` nor `HETATM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ATOM" => Ok(RecordKind::Atom),
            "HETATM" => Ok(RecordKind::Hetatm),
            _ => Err(()),
        }
    }
}

/// Represents an atom in a molecular structure.
///
/// An atom carries the per-record data of a coordinate line together with a
/// non-owning back-reference to its parent residue. Ownership of atoms lies with
/// the [`Structure`](super::system::Structure) arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The name of the atom (e.g., "CA", "N", "O1").
    pub name: String,
    /// The serial number read from the source file.
    pub serial: usize,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    /// The record kind the atom was read from.
    pub record: RecordKind,
    /// Alternate location indicator, if any.
    pub alt_loc: Option<char>,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Fractional occupancy.
    pub occupancy: f64,
    /// Isotropic temperature factor.
    pub temp_factor: f64,
    /// Element symbol, right-justified in the source (e.g., "C", "FE").
    pub element: String,
    /// Formal charge as written in the source (e.g., "2+"), empty if absent.
    pub formal_charge: String,
}

impl Atom {
    /// Creates a new `Atom` with default values for most fields.
    ///
    /// This constructor initializes an atom with the provided name, residue ID,
    /// and position. Other fields are set to their default values and can be
    /// modified afterward as needed.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `residue_id` - The ID of the residue this atom belongs to.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, residue_id: ResidueId, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            serial: 0,
            residue_id,
            record: RecordKind::default(),
            alt_loc: None,
            position,
            occupancy: 1.0,
            temp_factor: 0.0,
            element: String::new(),
            formal_charge: String::new(),
        }
    }

    /// Euclidean distance to another atom, in Angstroms.
    pub fn distance_to(&self, other: &Atom) -> f64 {
        nalgebra::distance(&self.position, &other.position)
    }
}
