//! Logical |0⟩ state encoding.

use std::sync::Arc;

use alsvid_ir::{ClassicalRegister, Program, QuantumRegister, SubProgram};
use tracing::debug;

use crate::alloc::{ANCILLA_PREFIX, DATA_PREFIX, MEASURE_PREFIX, alloc_ancillas, alloc_cregs, alloc_qregs};
use crate::compose::splice;
use crate::error::{QecError, QecResult};
use crate::layout::{WireLayout, combine};

/// Replicates a single-logical-qubit preparation fragment across logical
/// qubits.
///
/// The fragment prepares one encoded |0⟩ block; the encoder splices it
/// once per logical-qubit group, each copy onto its own wire-disjoint
/// registers.
#[derive(Debug, Clone)]
pub struct Encoder {
    block: Option<Arc<SubProgram>>,
}

impl Encoder {
    /// Create an encoder from its preparation fragment.
    pub fn new(block: SubProgram) -> Self {
        Self {
            block: Some(Arc::new(block)),
        }
    }

    /// An encoder with no fragment. Every operation fails with
    /// [`QecError::MissingBlock`].
    pub fn disabled() -> Self {
        Self { block: None }
    }

    pub(crate) fn require(&self) -> QecResult<&SubProgram> {
        self.block.as_deref().ok_or(QecError::MissingBlock("encoder"))
    }

    /// The preparation fragment, if present.
    pub fn block(&self) -> Option<&SubProgram> {
        self.block.as_deref()
    }

    /// Build a fresh program encoding `num_qubits` logical qubits.
    ///
    /// Each logical qubit gets newly allocated data, ancilla, and
    /// classical groups; the copies share no wires.
    pub fn build_standalone<P: Program + Default>(&self, num_qubits: usize) -> QecResult<P> {
        let block = self.require()?;
        let mut prog = P::default();

        let qregs = alloc_qregs(&mut prog, num_qubits, block.num_data(), DATA_PREFIX)?;
        let ancillas = alloc_ancillas(&mut prog, num_qubits, block.num_ancillas(), ANCILLA_PREFIX)?;
        let cregs = alloc_cregs(&mut prog, num_qubits, block.num_clbits(), MEASURE_PREFIX)?;
        let wires = combine(&[&qregs], &ancillas, WireLayout::Block)?;

        debug!(copies = num_qubits, fragment = block.name(), "building standalone encoding");
        for (instance, creg) in wires.iter().zip(&cregs) {
            splice(&mut prog, block, instance, creg.bits())?;
        }
        Ok(prog)
    }

    /// Encode the supplied data groups in place.
    ///
    /// Omitted ancilla and classical groups are allocated automatically,
    /// one per data group.
    pub fn apply_to<P: Program + ?Sized>(
        &self,
        prog: &mut P,
        qregs: &[QuantumRegister],
        cregs: Option<&[ClassicalRegister]>,
        ancillas: Option<&[QuantumRegister]>,
    ) -> QecResult<()> {
        let block = self.require()?;

        let ancillas = match ancillas {
            Some(groups) => groups.to_vec(),
            None => alloc_ancillas(prog, qregs.len(), block.num_ancillas(), ANCILLA_PREFIX)?,
        };
        let cregs = match cregs {
            Some(groups) => groups.to_vec(),
            None => alloc_cregs(prog, qregs.len(), block.num_clbits(), MEASURE_PREFIX)?,
        };
        if cregs.len() != qregs.len() {
            return Err(QecError::GroupCountMismatch {
                qregs: qregs.len(),
                cregs: cregs.len(),
            });
        }

        let wires = combine(&[qregs], &ancillas, WireLayout::Block)?;
        for (instance, creg) in wires.iter().zip(&cregs) {
            splice(prog, block, instance, creg.bits())?;
        }
        Ok(())
    }
}
