//! Qubit and classical bit types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a qubit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// Unique identifier for a classical bit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClbitId(pub u32);

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl From<u32> for ClbitId {
    fn from(id: u32) -> Self {
        ClbitId(id)
    }
}

/// Default register name for qubits created without an explicit label.
pub const DEFAULT_QUBIT_REGISTER: &str = "q";

/// Default register name for classical bits created without an explicit label.
pub const DEFAULT_CLBIT_REGISTER: &str = "c";

/// A declared qubit: an id plus its register label.
///
/// The label is a register name and a (possibly multi-dimensional) index,
/// e.g. `q[3]` or `node[1,2]`. The first index component is the qubit's
/// intrinsic numeric label, which device-aligned translations use as the
/// physical qubit number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Qubit {
    /// The unique identifier.
    pub id: QubitId,
    /// The name of the register this qubit belongs to.
    pub register: String,
    /// The index within the register.
    pub index: Vec<u32>,
}

impl Qubit {
    /// Create a qubit labelled `q[id]`.
    pub fn new(id: QubitId) -> Self {
        Self {
            id,
            register: DEFAULT_QUBIT_REGISTER.to_string(),
            index: vec![id.0],
        }
    }

    /// Create a qubit with an explicit register label.
    pub fn with_register(
        id: QubitId,
        register: impl Into<String>,
        index: impl Into<Vec<u32>>,
    ) -> Self {
        Self {
            id,
            register: register.into(),
            index: index.into(),
        }
    }

    /// First component of the register index, if any.
    pub fn label_index(&self) -> Option<u32> {
        self.index.first().copied()
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_label(f, &self.register, &self.index)
    }
}

/// A declared classical bit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clbit {
    /// The unique identifier.
    pub id: ClbitId,
    /// The name of the register this bit belongs to.
    pub register: String,
    /// The index within the register.
    pub index: Vec<u32>,
}

impl Clbit {
    /// Create a classical bit labelled `c[id]`.
    pub fn new(id: ClbitId) -> Self {
        Self {
            id,
            register: DEFAULT_CLBIT_REGISTER.to_string(),
            index: vec![id.0],
        }
    }

    /// Create a classical bit with an explicit register label.
    pub fn with_register(
        id: ClbitId,
        register: impl Into<String>,
        index: impl Into<Vec<u32>>,
    ) -> Self {
        Self {
            id,
            register: register.into(),
            index: index.into(),
        }
    }
}

impl fmt::Display for Clbit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_label(f, &self.register, &self.index)
    }
}

fn write_label(f: &mut fmt::Formatter<'_>, register: &str, index: &[u32]) -> fmt::Result {
    if index.is_empty() {
        return write!(f, "{register}");
    }
    write!(f, "{register}[")?;
    for (i, component) in index.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{component}")?;
    }
    write!(f, "]")
}
