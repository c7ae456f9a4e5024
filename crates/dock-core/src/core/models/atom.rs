use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Residue name assigned when a record leaves the residue columns blank.
pub const UNKNOWN_RESIDUE: &str = "UNK";
/// Chain identifier assigned when a record leaves the chain column blank.
pub const DEFAULT_CHAIN_ID: char = 'A';
/// Residue sequence number assigned when the residue columns cannot be parsed.
pub const DEFAULT_RESIDUE_INDEX: i32 = 1;
/// Element symbol assigned when neither the element columns nor the atom name provide one.
pub const DEFAULT_ELEMENT: &str = "C";

/// Represents one parsed coordinate record of a molecular structure.
///
/// An `Atom` is only ever constructed from a record whose three coordinates are
/// finite. Atoms are never mutated in place by the docking engine: rigid-body
/// transformations produce new atoms with every non-positional field copied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Atom {
    /// The trimmed atom label (e.g., "CA", "N", "O1").
    pub name: String,
    /// The three-letter residue code (e.g., "ALA"), or [`UNKNOWN_RESIDUE`].
    pub residue_name: String,
    /// The single-character chain identifier.
    pub chain_id: char,
    /// The residue sequence number.
    pub residue_index: i32,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// The uppercase element symbol (e.g., "C", "CL").
    pub element: String,
}

impl Atom {
    /// Creates a new `Atom` with default residue information.
    ///
    /// The element is inferred from the first character of `name`, falling back
    /// to carbon for an empty name.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            residue_name: UNKNOWN_RESIDUE.to_string(),
            chain_id: DEFAULT_CHAIN_ID,
            residue_index: DEFAULT_RESIDUE_INDEX,
            position,
            element: infer_element(None, name),
        }
    }

    /// Sets the residue name, chain and sequence number of this atom.
    pub fn with_residue(mut self, residue_name: &str, chain_id: char, residue_index: i32) -> Self {
        self.residue_name = residue_name.to_string();
        self.chain_id = chain_id;
        self.residue_index = residue_index;
        self
    }

    /// Overrides the inferred element symbol.
    pub fn with_element(mut self, element: &str) -> Self {
        self.element = element.trim().to_ascii_uppercase();
        self
    }

    /// Returns a copy of this atom moved to `position`.
    #[inline]
    pub fn moved_to(&self, position: Point3<f64>) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }

    #[inline]
    pub fn is_hydrogen(&self) -> bool {
        self.element == "H"
    }
}

/// Derives an uppercase element symbol for a record.
///
/// An explicit, non-blank element field wins; otherwise the first character of
/// the atom name is used; otherwise the symbol defaults to [`DEFAULT_ELEMENT`].
pub fn infer_element(explicit: Option<&str>, name: &str) -> String {
    if let Some(symbol) = explicit.map(str::trim).filter(|s| !s.is_empty()) {
        return symbol.to_ascii_uppercase();
    }
    name.trim()
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase().to_string())
        .unwrap_or_else(|| DEFAULT_ELEMENT.to_string())
}
