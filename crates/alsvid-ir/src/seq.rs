//! Ordered-sequence program representation.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::instruction::Instruction;
use crate::program::Program;
use crate::register::{ClassicalRegister, ClbitId, QregKind, QuantumRegister, QubitId};

/// A program as a flat, ordered instruction sequence over named registers.
///
/// Instructions execute in list order; wire dependencies are implicit in
/// that order. This is the representation of choice when the program will
/// be emitted or replayed front to back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeqProgram {
    name: String,
    qregs: Vec<QuantumRegister>,
    cregs: Vec<ClassicalRegister>,
    instructions: Vec<Instruction>,
    next_qubit: u32,
    next_clbit: u32,
}

impl SeqProgram {
    /// Create a new empty program.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qregs: vec![],
            cregs: vec![],
            instructions: vec![],
            next_qubit: 0,
            next_clbit: 0,
        }
    }

    /// Get the program name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The quantum registers in insertion order.
    pub fn qregs(&self) -> &[QuantumRegister] {
        &self.qregs
    }

    /// The classical registers in insertion order.
    pub fn cregs(&self) -> &[ClassicalRegister] {
        &self.cregs
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the program holds no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        for &qubit in &instruction.qubits {
            if qubit.0 >= self.next_qubit {
                return Err(IrError::QubitNotFound {
                    qubit,
                    instruction: instruction.name().to_string(),
                });
            }
        }
        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    instruction: instruction.name().to_string(),
                });
            }
        }
        let guard_bits = instruction
            .condition
            .iter()
            .flat_map(|c| c.clbits.iter().copied());
        for clbit in instruction.clbits.iter().copied().chain(guard_bits) {
            if clbit.0 >= self.next_clbit {
                return Err(IrError::ClbitNotFound {
                    clbit,
                    instruction: instruction.name().to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Program for SeqProgram {
    fn add_qreg(&mut self, kind: QregKind, name: &str, size: u32) -> IrResult<QuantumRegister> {
        if self.has_register(name) {
            return Err(IrError::DuplicateRegister(name.to_string()));
        }
        let wires = (0..size)
            .map(|_| {
                let id = QubitId(self.next_qubit);
                self.next_qubit += 1;
                id
            })
            .collect();
        let reg = QuantumRegister::new(name, kind, wires);
        self.qregs.push(reg.clone());
        Ok(reg)
    }

    fn add_creg(&mut self, name: &str, size: u32) -> IrResult<ClassicalRegister> {
        if self.has_register(name) {
            return Err(IrError::DuplicateRegister(name.to_string()));
        }
        let bits = (0..size)
            .map(|_| {
                let id = ClbitId(self.next_clbit);
                self.next_clbit += 1;
                id
            })
            .collect();
        let reg = ClassicalRegister::new(name, bits);
        self.cregs.push(reg.clone());
        Ok(reg)
    }

    fn has_register(&self, name: &str) -> bool {
        self.qregs.iter().any(|r| r.name() == name) || self.cregs.iter().any(|r| r.name() == name)
    }

    fn append(&mut self, instruction: Instruction) -> IrResult<()> {
        self.validate(&instruction)?;
        self.instructions.push(instruction);
        Ok(())
    }

    fn num_qubits(&self) -> usize {
        self.next_qubit as usize
    }

    fn num_clbits(&self) -> usize {
        self.next_clbit as usize
    }

    fn instructions(&self) -> Vec<Instruction> {
        self.instructions.clone()
    }
}

impl Default for SeqProgram {
    fn default() -> Self {
        Self::new("program")
    }
}
