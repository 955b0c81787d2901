//! Immutable fixed-width program fragments.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::InstructionKind;

/// A template operation over fragment-local wire indices.
///
/// Quantum indices address the fragment's combined wire space: data wires
/// first (`0..num_data`), then ancilla wires. Classical indices address the
/// fragment's own classical wires. `cond` guards the operation on the
/// fragment's classical wires holding that value once spliced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateOp {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Local quantum wire indices.
    pub qubits: Vec<u32>,
    /// Local classical wire indices.
    pub clbits: Vec<u32>,
    /// Optional guard value over the fragment's classical wires.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cond: Option<u64>,
}

/// An immutable, fixed-width program fragment.
///
/// A sub-program is a reusable building block (a state-preparation
/// routine, a stabilizer measurement, a correction table) with declared
/// wire widths. It is constructed once through [`SubProgramBuilder`],
/// never mutated afterwards, and shared by reference across all splice
/// calls. The composition engine only reads the declared widths and the
/// template operations; it never inspects gate semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubProgram {
    name: String,
    num_data: u32,
    num_ancillas: u32,
    num_clbits: u32,
    ops: Vec<TemplateOp>,
}

impl SubProgram {
    /// Start building a fragment with the given declared widths.
    pub fn builder(
        name: impl Into<String>,
        num_data: u32,
        num_ancillas: u32,
        num_clbits: u32,
    ) -> SubProgramBuilder {
        SubProgramBuilder {
            inner: SubProgram {
                name: name.into(),
                num_data,
                num_ancillas,
                num_clbits,
                ops: vec![],
            },
        }
    }

    /// The fragment name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared number of data wires.
    pub fn num_data(&self) -> u32 {
        self.num_data
    }

    /// Declared number of ancilla wires.
    pub fn num_ancillas(&self) -> u32 {
        self.num_ancillas
    }

    /// Total quantum width (data followed by ancillas).
    pub fn num_qubits(&self) -> u32 {
        self.num_data + self.num_ancillas
    }

    /// Declared number of classical wires.
    pub fn num_clbits(&self) -> u32 {
        self.num_clbits
    }

    /// The template operations in order.
    pub fn ops(&self) -> &[TemplateOp] {
        &self.ops
    }

    /// Number of template operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the fragment holds no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Builder for [`SubProgram`] fragments.
///
/// Wire indices are validated against the declared widths on every call.
#[derive(Debug)]
pub struct SubProgramBuilder {
    inner: SubProgram,
}

impl SubProgramBuilder {
    fn check_wire(&self, index: u32) -> IrResult<()> {
        let width = self.inner.num_qubits();
        if index >= width {
            return Err(IrError::WireOutOfRange { index, width });
        }
        Ok(())
    }

    fn check_bit(&self, index: u32) -> IrResult<()> {
        let width = self.inner.num_clbits;
        if index >= width {
            return Err(IrError::BitOutOfRange { index, width });
        }
        Ok(())
    }

    fn push(
        &mut self,
        kind: InstructionKind,
        qubits: Vec<u32>,
        clbits: Vec<u32>,
        cond: Option<u64>,
    ) -> IrResult<&mut Self> {
        for &w in &qubits {
            self.check_wire(w)?;
        }
        for &b in &clbits {
            self.check_bit(b)?;
        }
        self.inner.ops.push(TemplateOp {
            kind,
            qubits,
            clbits,
            cond,
        });
        Ok(self)
    }

    /// Apply a gate to the given local wires.
    pub fn gate(
        &mut self,
        gate: StandardGate,
        wires: impl IntoIterator<Item = u32>,
    ) -> IrResult<&mut Self> {
        self.push(InstructionKind::Gate(gate), wires.into_iter().collect(), vec![], None)
    }

    /// Apply a gate guarded on the fragment's classical wires equalling
    /// `value`.
    pub fn gate_if(
        &mut self,
        gate: StandardGate,
        wires: impl IntoIterator<Item = u32>,
        value: u64,
    ) -> IrResult<&mut Self> {
        self.push(
            InstructionKind::Gate(gate),
            wires.into_iter().collect(),
            vec![],
            Some(value),
        )
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, wire: u32) -> IrResult<&mut Self> {
        self.gate(StandardGate::H, [wire])
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, wire: u32) -> IrResult<&mut Self> {
        self.gate(StandardGate::X, [wire])
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, wire: u32) -> IrResult<&mut Self> {
        self.gate(StandardGate::Z, [wire])
    }

    /// Apply S gate.
    pub fn s(&mut self, wire: u32) -> IrResult<&mut Self> {
        self.gate(StandardGate::S, [wire])
    }

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: u32, target: u32) -> IrResult<&mut Self> {
        self.gate(StandardGate::CX, [control, target])
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: u32, target: u32) -> IrResult<&mut Self> {
        self.gate(StandardGate::CZ, [control, target])
    }

    /// Measure a local wire into a local classical wire.
    pub fn measure(&mut self, wire: u32, clbit: u32) -> IrResult<&mut Self> {
        self.push(InstructionKind::Measure, vec![wire], vec![clbit], None)
    }

    /// Reset a local wire to |0⟩.
    pub fn reset(&mut self, wire: u32) -> IrResult<&mut Self> {
        self.push(InstructionKind::Reset, vec![wire], vec![], None)
    }

    /// Freeze the fragment.
    pub fn finish(self) -> SubProgram {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_widths() {
        let mut b = SubProgram::builder("frag", 2, 1, 1);
        b.h(0).unwrap().cx(0, 2).unwrap().measure(2, 0).unwrap();
        let sub = b.finish();

        assert_eq!(sub.num_data(), 2);
        assert_eq!(sub.num_qubits(), 3);
        assert_eq!(sub.num_clbits(), 1);
        assert_eq!(sub.len(), 3);
    }

    #[test]
    fn test_builder_rejects_out_of_range_wire() {
        let mut b = SubProgram::builder("frag", 2, 0, 0);
        let err = b.h(2).unwrap_err();
        assert!(matches!(err, IrError::WireOutOfRange { index: 2, width: 2 }));
    }

    #[test]
    fn test_builder_rejects_out_of_range_bit() {
        let mut b = SubProgram::builder("frag", 1, 0, 1);
        let err = b.measure(0, 3).unwrap_err();
        assert!(matches!(err, IrError::BitOutOfRange { index: 3, width: 1 }));
    }

    #[test]
    fn test_conditioned_template_op() {
        let mut b = SubProgram::builder("frag", 1, 0, 2);
        b.gate_if(StandardGate::X, [0], 3).unwrap();
        let sub = b.finish();
        assert_eq!(sub.ops()[0].cond, Some(3));
    }
}
