//! Combined syndrome detection and correction.

use alsvid_ir::{ClassicalRegister, Program, QuantumRegister};
use tracing::debug;

use crate::alloc::{ANCILLA_PREFIX, MEASURE_PREFIX, alloc_ancillas, alloc_cregs};
use crate::corrector::SyndromeCorrector;
use crate::detector::SyndromeDetector;
use crate::error::QecResult;

/// One full error-correction round: detect syndromes, then apply the
/// correction table on the same classical groups.
#[derive(Debug, Clone)]
pub struct ErrorCorrector {
    detector: SyndromeDetector,
    corrector: SyndromeCorrector,
}

impl ErrorCorrector {
    /// Create an error corrector from its two sub-components.
    pub fn new(detector: SyndromeDetector, corrector: SyndromeCorrector) -> Self {
        Self {
            detector,
            corrector,
        }
    }

    /// The detection sub-component.
    pub fn detector(&self) -> &SyndromeDetector {
        &self.detector
    }

    /// The correction sub-component.
    pub fn corrector(&self) -> &SyndromeCorrector {
        &self.corrector
    }

    /// Detect and correct errors on each supplied data group.
    ///
    /// The classical groups are shared between detection and correction:
    /// the syndrome measured into `cregs[i]` drives the correction clauses
    /// for `qregs[i]`. Omitted groups are allocated automatically. Fails
    /// fast, before touching the program, if either sub-component's
    /// fragment is absent.
    pub fn correct_errors<P: Program + ?Sized>(
        &self,
        prog: &mut P,
        qregs: &[QuantumRegister],
        cregs: Option<&[ClassicalRegister]>,
        ancillas: Option<&[QuantumRegister]>,
    ) -> QecResult<()> {
        let detector_block = self.detector.require()?;
        self.corrector.require()?;

        let cregs = match cregs {
            Some(groups) => groups.to_vec(),
            None => alloc_cregs(prog, qregs.len(), detector_block.num_clbits(), MEASURE_PREFIX)?,
        };
        let ancillas = match ancillas {
            Some(groups) => groups.to_vec(),
            None => {
                alloc_ancillas(prog, qregs.len(), detector_block.num_ancillas(), ANCILLA_PREFIX)?
            }
        };

        debug!(groups = qregs.len(), "error-correction round");
        self.detector.detect(prog, qregs, Some(&cregs), Some(&ancillas))?;
        self.corrector.correct(prog, qregs, &cregs)
    }
}
