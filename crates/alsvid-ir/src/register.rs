//! Wire identifiers and register handles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a quantum wire within a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
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

impl From<usize> for QubitId {
    fn from(id: usize) -> Self {
        QubitId(u32::try_from(id).expect("QubitId overflow: exceeds u32::MAX"))
    }
}

/// Unique identifier for a classical bit within a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
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

impl From<usize> for ClbitId {
    fn from(id: usize) -> Self {
        ClbitId(u32::try_from(id).expect("ClbitId overflow: exceeds u32::MAX"))
    }
}

/// The role of a quantum register.
///
/// Ancilla registers carry no logical information; the distinction matters
/// to allocation and layout, not to instruction semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QregKind {
    /// Register holding encoded data qubits.
    Data,
    /// Auxiliary register used transiently for checking and measurement.
    Ancilla,
}

/// Handle to a named block of quantum wires allocated together.
///
/// Handles are cheap to clone and carry the ordered wire ids they were
/// allocated with; the owning program keeps the authoritative register list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantumRegister {
    name: String,
    kind: QregKind,
    wires: Vec<QubitId>,
}

impl QuantumRegister {
    /// Create a register handle. Programs call this when adding registers.
    pub fn new(name: impl Into<String>, kind: QregKind, wires: Vec<QubitId>) -> Self {
        Self {
            name: name.into(),
            kind,
            wires,
        }
    }

    /// An unnamed handle with no wires, standing in for a width-zero
    /// allocation.
    pub fn placeholder(kind: QregKind) -> Self {
        Self {
            name: String::new(),
            kind,
            wires: vec![],
        }
    }

    /// The register name. Empty for placeholders.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The register role.
    pub fn kind(&self) -> QregKind {
        self.kind
    }

    /// The ordered wire ids of this register.
    pub fn wires(&self) -> &[QubitId] {
        &self.wires
    }

    /// Number of wires.
    pub fn size(&self) -> usize {
        self.wires.len()
    }

    /// Whether this handle holds no wires.
    pub fn is_empty(&self) -> bool {
        self.wires.is_empty()
    }
}

/// Handle to a named block of classical bits allocated together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicalRegister {
    name: String,
    bits: Vec<ClbitId>,
}

impl ClassicalRegister {
    /// Create a register handle. Programs call this when adding registers.
    pub fn new(name: impl Into<String>, bits: Vec<ClbitId>) -> Self {
        Self {
            name: name.into(),
            bits,
        }
    }

    /// An unnamed handle with no bits, standing in for a width-zero
    /// allocation.
    pub fn placeholder() -> Self {
        Self {
            name: String::new(),
            bits: vec![],
        }
    }

    /// The register name. Empty for placeholders.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordered bit ids of this register.
    pub fn bits(&self) -> &[ClbitId] {
        &self.bits
    }

    /// Number of bits.
    pub fn size(&self) -> usize {
        self.bits.len()
    }

    /// Whether this handle holds no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_display() {
        assert_eq!(format!("{}", QubitId(3)), "q3");
        assert_eq!(format!("{}", ClbitId(0)), "c0");
    }

    #[test]
    fn test_register_handle() {
        let reg = QuantumRegister::new("q0", QregKind::Data, vec![QubitId(0), QubitId(1)]);
        assert_eq!(reg.name(), "q0");
        assert_eq!(reg.size(), 2);
        assert_eq!(reg.wires()[1], QubitId(1));
    }

    #[test]
    fn test_placeholder_is_empty() {
        assert!(QuantumRegister::placeholder(QregKind::Ancilla).is_empty());
        assert!(ClassicalRegister::placeholder().is_empty());
    }
}
