//! Fault-tolerant gate library.

use std::sync::Arc;

use alsvid_ir::{ClassicalRegister, Program, QuantumRegister, SubProgram};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::alloc::{ANCILLA_PREFIX, CLASSICAL_PREFIX, alloc_ancillas, alloc_cregs};
use crate::compose::splice;
use crate::error::{QecError, QecResult};
use crate::layout::{WireLayout, combine};

/// Registry of fault-tolerant gate implementations.
///
/// Maps an operation id (the plain gate's name) to the fragment realizing
/// it on encoded blocks. A fragment spans one encoded block per operand
/// position plus the shared per-instance ancillas its declared widths
/// announce.
#[derive(Debug, Clone, Default)]
pub struct FaultTolerantGates {
    registry: FxHashMap<String, Arc<SubProgram>>,
}

impl FaultTolerantGates {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fault-tolerant implementation under `op`.
    ///
    /// A later registration under the same id replaces the earlier one.
    pub fn register(&mut self, op: impl Into<String>, block: SubProgram) -> &mut Self {
        self.registry.insert(op.into(), Arc::new(block));
        self
    }

    /// Whether `op` has a registered implementation.
    pub fn contains(&self, op: &str) -> bool {
        self.registry.contains_key(op)
    }

    /// The fragment registered under `op`.
    pub fn get(&self, op: &str) -> Option<&SubProgram> {
        self.registry.get(op).map(Arc::as_ref)
    }

    /// The registered operation ids, sorted. This is the gate basis the
    /// orchestration pass unrolls input programs into.
    pub fn gates(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self.registry.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Apply the fault-tolerant implementation of `op` across encoded
    /// operands.
    ///
    /// `qregs[p][j]` is the encoded block standing in for operand position
    /// `p` of instance `j`; all positions must supply the same number of
    /// instances. Omitted classical and ancilla groups are allocated
    /// automatically, one per instance; ancillas are laid out interleaved
    /// ahead of the operand blocks. Classical wires are passed to the
    /// fragment only when it declares any.
    pub fn apply<P: Program + ?Sized>(
        &self,
        prog: &mut P,
        op: &str,
        qregs: &[Vec<QuantumRegister>],
        cregs: Option<&[ClassicalRegister]>,
        ancillas: Option<&[QuantumRegister]>,
    ) -> QecResult<()> {
        let block = self
            .registry
            .get(op)
            .ok_or_else(|| QecError::UnknownOperation(op.to_string()))?;

        let instances = qregs.first().map_or(0, |p| p.len());
        for (position, groups) in qregs.iter().enumerate() {
            if groups.len() != instances {
                return Err(QecError::ArityMismatch {
                    position,
                    expected: instances,
                    got: groups.len(),
                });
            }
        }

        let ancillas = match ancillas {
            Some(groups) => groups.to_vec(),
            None => alloc_ancillas(prog, instances, block.num_ancillas(), ANCILLA_PREFIX)?,
        };
        let cregs = match cregs {
            Some(groups) => groups.to_vec(),
            None => alloc_cregs(prog, instances, block.num_clbits(), CLASSICAL_PREFIX)?,
        };
        if block.num_clbits() > 0 && cregs.len() != instances {
            return Err(QecError::GroupCountMismatch {
                qregs: instances,
                cregs: cregs.len(),
            });
        }

        let positions: Vec<&[QuantumRegister]> = qregs.iter().map(Vec::as_slice).collect();
        let wires = combine(&positions, &ancillas, WireLayout::Interleaved)?;

        debug!(op, instances, "applying fault-tolerant gate");
        for (j, instance) in wires.iter().enumerate() {
            if block.num_clbits() > 0 {
                splice(prog, block, instance, cregs[j].bits())?;
            } else {
                splice(prog, block, instance, &[])?;
            }
        }
        Ok(())
    }
}
