//! Syndrome detection.

use std::sync::Arc;

use alsvid_ir::{ClassicalRegister, Program, QuantumRegister, SubProgram};

use crate::alloc::{ANCILLA_PREFIX, MEASURE_PREFIX, alloc_ancillas, alloc_cregs};
use crate::compose::splice;
use crate::error::{QecError, QecResult};
use crate::layout::{WireLayout, combine};

/// Splices a fixed syndrome-measurement fragment per logical qubit and
/// resets the ancillas afterwards.
///
/// Postcondition: each logical qubit's classical group holds its measured
/// syndrome, and every ancilla group used is back in |0⟩.
#[derive(Debug, Clone)]
pub struct SyndromeDetector {
    block: Option<Arc<SubProgram>>,
}

impl SyndromeDetector {
    /// Create a detector from its syndrome-measurement fragment.
    pub fn new(block: SubProgram) -> Self {
        Self {
            block: Some(Arc::new(block)),
        }
    }

    /// A detector with no fragment. Every operation fails with
    /// [`QecError::MissingBlock`].
    pub fn disabled() -> Self {
        Self { block: None }
    }

    pub(crate) fn require(&self) -> QecResult<&SubProgram> {
        self.block
            .as_deref()
            .ok_or(QecError::MissingBlock("syndrome detector"))
    }

    /// The syndrome fragment, if present.
    pub fn block(&self) -> Option<&SubProgram> {
        self.block.as_deref()
    }

    /// Measure the syndrome of each supplied data group.
    ///
    /// Omitted classical and ancilla groups are allocated automatically,
    /// one per data group.
    pub fn detect<P: Program + ?Sized>(
        &self,
        prog: &mut P,
        qregs: &[QuantumRegister],
        cregs: Option<&[ClassicalRegister]>,
        ancillas: Option<&[QuantumRegister]>,
    ) -> QecResult<()> {
        let block = self.require()?;

        let cregs = match cregs {
            Some(groups) => groups.to_vec(),
            None => alloc_cregs(prog, qregs.len(), block.num_clbits(), MEASURE_PREFIX)?,
        };
        let ancillas = match ancillas {
            Some(groups) => groups.to_vec(),
            None => alloc_ancillas(prog, qregs.len(), block.num_ancillas(), ANCILLA_PREFIX)?,
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

        // Ancillas go back to |0⟩ so the next detection round can reuse them.
        for ancilla in &ancillas {
            prog.reset_wires(ancilla.wires())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::{QregKind, SeqProgram};
    use crate::alloc::{DATA_PREFIX, alloc_qregs};

    fn detector() -> SyndromeDetector {
        let mut b = SubProgram::builder("syndrome", 2, 1, 1);
        b.h(2).unwrap().cz(2, 0).unwrap().cz(2, 1).unwrap().h(2).unwrap();
        b.measure(2, 0).unwrap();
        SyndromeDetector::new(b.finish())
    }

    #[test]
    fn test_detect_measures_then_resets_ancillas() {
        let det = detector();
        let mut prog = SeqProgram::new("test");
        let qregs = alloc_qregs(&mut prog, 2, 2, DATA_PREFIX).unwrap();

        det.detect(&mut prog, &qregs, None, None).unwrap();

        let insts = prog.instructions();
        // 5 template ops per group, then one reset per ancilla wire.
        assert_eq!(insts.len(), 12);
        assert!(insts[..10].iter().filter(|i| i.is_measure()).count() == 2);
        assert!(insts[10..].iter().all(|i| i.is_reset()));

        // Resets target exactly the auto-allocated ancilla wires.
        let ancilla_wires: Vec<_> = prog
            .qregs()
            .iter()
            .filter(|r| r.kind() == QregKind::Ancilla)
            .flat_map(|r| r.wires().to_vec())
            .collect();
        let reset_wires: Vec<_> = insts[10..].iter().map(|i| i.qubits[0]).collect();
        assert_eq!(reset_wires, ancilla_wires);
    }

    #[test]
    fn test_syndrome_lands_in_per_qubit_cregs() {
        let det = detector();
        let mut prog = SeqProgram::new("test");
        let qregs = alloc_qregs(&mut prog, 2, 2, DATA_PREFIX).unwrap();
        det.detect(&mut prog, &qregs, None, None).unwrap();

        let measures: Vec<_> = prog
            .instructions()
            .into_iter()
            .filter(|i| i.is_measure())
            .collect();
        assert_eq!(measures.len(), 2);
        assert_ne!(measures[0].clbits, measures[1].clbits);
    }

    #[test]
    fn test_group_count_mismatch() {
        let det = detector();
        let mut prog = SeqProgram::new("test");
        let qregs = alloc_qregs(&mut prog, 2, 2, DATA_PREFIX).unwrap();
        let cregs = alloc_cregs(&mut prog, 1, 1, MEASURE_PREFIX).unwrap();

        let err = det.detect(&mut prog, &qregs, Some(&cregs), None).unwrap_err();
        assert!(matches!(err, QecError::GroupCountMismatch { qregs: 2, cregs: 1 }));
    }

    #[test]
    fn test_missing_block() {
        let det = SyndromeDetector::disabled();
        let mut prog = SeqProgram::new("test");
        assert!(matches!(
            det.detect(&mut prog, &[], None, None),
            Err(QecError::MissingBlock("syndrome detector"))
        ));
    }
}
