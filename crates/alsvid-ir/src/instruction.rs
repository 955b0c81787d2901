//! Program instructions combining operations with operands.

use serde::{Deserialize, Serialize};

use crate::gate::StandardGate;
use crate::register::{ClbitId, QubitId};

/// The kind of instruction in a program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A quantum gate operation.
    Gate(StandardGate),
    /// Measurement operation.
    Measure,
    /// Reset qubit to |0⟩.
    Reset,
}

/// Classical guard attached to an instruction.
///
/// The instruction takes effect only in executions where the listed bits,
/// read little-endian (`clbits[0]` is the least significant), equal `value`.
/// This is metadata emitted into the produced program; the builder itself
/// never branches on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// The classical bits whose joint value is compared.
    pub clbits: Vec<ClbitId>,
    /// The value to compare against.
    pub value: u64,
}

impl Condition {
    /// Create a new classical condition.
    pub fn new(clbits: impl IntoIterator<Item = ClbitId>, value: u64) -> Self {
        Self {
            clbits: clbits.into_iter().collect(),
            value,
        }
    }
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
    /// Classical bits this instruction writes (for measure).
    pub clbits: Vec<ClbitId>,
    /// Optional classical guard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate),
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
            condition: None,
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a measurement instruction.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
            clbits: vec![clbit],
            condition: None,
        }
    }

    /// Create a reset instruction.
    pub fn reset(qubit: QubitId) -> Self {
        Self {
            kind: InstructionKind::Reset,
            qubits: vec![qubit],
            clbits: vec![],
            condition: None,
        }
    }

    /// Attach a classical guard to the instruction.
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    /// Check if this is a reset.
    pub fn is_reset(&self) -> bool {
        matches!(self.kind, InstructionKind::Reset)
    }

    /// Whether this instruction touches the given quantum wire.
    pub fn uses_qubit(&self, qubit: QubitId) -> bool {
        self.qubits.contains(&qubit)
    }

    /// Whether this instruction reads or writes the given classical bit,
    /// either as an operand or through its guard.
    pub fn uses_clbit(&self, clbit: ClbitId) -> bool {
        self.clbits.contains(&clbit)
            || self
                .condition
                .as_ref()
                .is_some_and(|c| c.clbits.contains(&clbit))
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Reset => "reset",
        }
    }
}
