//! The mutation surface shared by both program representations.

use crate::error::{IrError, IrResult};
use crate::instruction::{Condition, Instruction};
use crate::register::{ClassicalRegister, ClbitId, QregKind, QuantumRegister, QubitId};

/// A quantum program under construction.
///
/// Both representations, the ordered [`SeqProgram`](crate::SeqProgram) and
/// the dependency-graph [`DagProgram`](crate::DagProgram), expose this one
/// small mutation surface, and the composition engine is written once
/// against it. Identical call sequences applied to either representation
/// from the same initial registers must yield observably equivalent
/// programs: the same instruction multiset, the same per-wire order, the
/// same guards.
pub trait Program {
    /// Add a quantum register of `size` fresh wires under `name`.
    ///
    /// Fails with [`IrError::DuplicateRegister`] if the name is taken.
    fn add_qreg(&mut self, kind: QregKind, name: &str, size: u32) -> IrResult<QuantumRegister>;

    /// Add a classical register of `size` fresh bits under `name`.
    ///
    /// Fails with [`IrError::DuplicateRegister`] if the name is taken.
    fn add_creg(&mut self, name: &str, size: u32) -> IrResult<ClassicalRegister>;

    /// Whether any register, quantum or classical, already uses `name`.
    fn has_register(&self, name: &str) -> bool;

    /// Append an instruction at the back of the program.
    fn append(&mut self, instruction: Instruction) -> IrResult<()>;

    /// Total number of quantum wires.
    fn num_qubits(&self) -> usize;

    /// Total number of classical bits.
    fn num_clbits(&self) -> usize;

    /// Instructions in program order (topological order for the graph
    /// form).
    fn instructions(&self) -> Vec<Instruction>;

    /// Append an instruction guarded by a classical condition.
    fn append_conditioned(
        &mut self,
        instruction: Instruction,
        condition: Condition,
    ) -> IrResult<()> {
        self.append(instruction.with_condition(condition))
    }

    /// Reset each of the given wires to |0⟩, in order.
    fn reset_wires(&mut self, wires: &[QubitId]) -> IrResult<()> {
        for &wire in wires {
            self.append(Instruction::reset(wire))?;
        }
        Ok(())
    }

    /// Measure `wires[i]` into `clbits[i]`, in order.
    fn measure_wires(&mut self, wires: &[QubitId], clbits: &[ClbitId]) -> IrResult<()> {
        if wires.len() != clbits.len() {
            return Err(IrError::BitCountMismatch {
                qubits: wires.len(),
                clbits: clbits.len(),
            });
        }
        for (&wire, &clbit) in wires.iter().zip(clbits) {
            self.append(Instruction::measure(wire, clbit))?;
        }
        Ok(())
    }

    /// Instructions touching the given quantum wire, in program order.
    fn wire_instructions(&self, wire: QubitId) -> Vec<Instruction> {
        self.instructions()
            .into_iter()
            .filter(|inst| inst.uses_qubit(wire))
            .collect()
    }

    /// Instructions reading or writing the given classical bit, in program
    /// order. Guards count as reads.
    fn clbit_instructions(&self, clbit: ClbitId) -> Vec<Instruction> {
        self.instructions()
            .into_iter()
            .filter(|inst| inst.uses_clbit(clbit))
            .collect()
    }
}
