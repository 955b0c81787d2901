//! Fault-tolerant state preparation via bounded repeat-until-accepted.

use std::sync::Arc;

use alsvid_ir::{
    ClassicalRegister, Condition, Instruction, Program, QuantumRegister, SubProgram,
};
use tracing::debug;

use crate::alloc::{ANCILLA_PREFIX, DATA_PREFIX, MEASURE_PREFIX, alloc_ancillas, alloc_cregs, alloc_qregs};
use crate::compose::{splice, splice_conditioned};
use crate::encoder::Encoder;
use crate::error::{QecError, QecResult};
use crate::layout::{WireLayout, combine};

/// Bounds for the repeat-until-accepted protocol.
///
/// `num_repeats` attempts total: `num_repeats − 1` conditional retry
/// rounds followed by one unconditional verification. `accept` is the
/// checker outcome meaning the preparation succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of preparation attempts.
    pub num_repeats: u32,
    /// Checker outcome accepted as a correct preparation.
    pub accept: u64,
}

impl RetryPolicy {
    /// Create a new retry policy.
    pub fn new(num_repeats: u32, accept: u64) -> Self {
        Self { num_repeats, accept }
    }
}

/// Upper bound on the checker's classical width.
///
/// Every retry round emits a clause per rejected checker outcome, so the
/// produced program grows as `O(R · 2^bits)`. All branches are emitted
/// statically ahead of execution; widths beyond this bound are refused
/// rather than silently expanded.
pub const MAX_CHECKER_BITS: u32 = 16;

/// Fault-tolerant encoder: preparation, verification, bounded retry.
///
/// Per logical qubit, in program order: encode; for each of the
/// `num_repeats − 1` retry rounds run the checker and, for every rejected
/// outcome, reset the block and re-encode under that outcome's guard; then
/// run the checker once more unconditionally. The final checker outcome in
/// the second classical group is the caller-visible accept indicator.
#[derive(Debug, Clone)]
pub struct FaultTolerantEncoder {
    encoder: Encoder,
    checker: Arc<SubProgram>,
    policy: RetryPolicy,
}

impl FaultTolerantEncoder {
    /// Create a fault-tolerant encoder from its parts.
    pub fn new(encoder: Encoder, checker: SubProgram, policy: RetryPolicy) -> Self {
        Self {
            encoder,
            checker: Arc::new(checker),
            policy,
        }
    }

    /// The verification fragment.
    pub fn checker(&self) -> &SubProgram {
        &self.checker
    }

    /// The retry policy.
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Build a fresh program fault-tolerantly encoding `num_qubits`
    /// logical qubits.
    pub fn build_standalone<P: Program + Default>(&self, num_qubits: usize) -> QecResult<P> {
        let enc = self.encoder.require()?;
        let mut prog = P::default();

        let qregs = alloc_qregs(&mut prog, num_qubits, enc.num_data(), DATA_PREFIX)?;
        let enc_ancillas = alloc_ancillas(&mut prog, num_qubits, enc.num_ancillas(), ANCILLA_PREFIX)?;
        let enc_cregs = alloc_cregs(&mut prog, num_qubits, enc.num_clbits(), MEASURE_PREFIX)?;
        let chk_ancillas =
            alloc_ancillas(&mut prog, num_qubits, self.checker.num_ancillas(), ANCILLA_PREFIX)?;
        let chk_cregs =
            alloc_cregs(&mut prog, num_qubits, self.checker.num_clbits(), MEASURE_PREFIX)?;

        self.apply_groups(&mut prog, &qregs, &enc_cregs, &enc_ancillas, &chk_cregs, &chk_ancillas)?;
        Ok(prog)
    }

    /// Fault-tolerantly encode the supplied data groups in place.
    ///
    /// The first classical/ancilla pair serves the encoder, the second the
    /// checker; omitted groups are allocated automatically, one per data
    /// group.
    #[allow(clippy::too_many_arguments)]
    pub fn apply_to<P: Program + ?Sized>(
        &self,
        prog: &mut P,
        qregs: &[QuantumRegister],
        enc_cregs: Option<&[ClassicalRegister]>,
        enc_ancillas: Option<&[QuantumRegister]>,
        chk_cregs: Option<&[ClassicalRegister]>,
        chk_ancillas: Option<&[QuantumRegister]>,
    ) -> QecResult<()> {
        let enc = self.encoder.require()?;

        let enc_ancillas = match enc_ancillas {
            Some(groups) => groups.to_vec(),
            None => alloc_ancillas(prog, qregs.len(), enc.num_ancillas(), ANCILLA_PREFIX)?,
        };
        let enc_cregs = match enc_cregs {
            Some(groups) => groups.to_vec(),
            None => alloc_cregs(prog, qregs.len(), enc.num_clbits(), MEASURE_PREFIX)?,
        };
        let chk_ancillas = match chk_ancillas {
            Some(groups) => groups.to_vec(),
            None => alloc_ancillas(prog, qregs.len(), self.checker.num_ancillas(), ANCILLA_PREFIX)?,
        };
        let chk_cregs = match chk_cregs {
            Some(groups) => groups.to_vec(),
            None => alloc_cregs(prog, qregs.len(), self.checker.num_clbits(), MEASURE_PREFIX)?,
        };

        self.apply_groups(prog, qregs, &enc_cregs, &enc_ancillas, &chk_cregs, &chk_ancillas)
    }

    fn apply_groups<P: Program + ?Sized>(
        &self,
        prog: &mut P,
        qregs: &[QuantumRegister],
        enc_cregs: &[ClassicalRegister],
        enc_ancillas: &[QuantumRegister],
        chk_cregs: &[ClassicalRegister],
        chk_ancillas: &[QuantumRegister],
    ) -> QecResult<()> {
        let enc = self.encoder.require()?;
        let checker = &self.checker;

        let bits = checker.num_clbits();
        if bits > MAX_CHECKER_BITS {
            return Err(QecError::RetryTableTooLarge {
                bits,
                max: MAX_CHECKER_BITS,
            });
        }
        let outcomes = 1u64 << bits;
        debug!(
            rounds = self.policy.num_repeats,
            clauses_per_round = outcomes - 1,
            qubits = qregs.len(),
            "emitting bounded retry protocol"
        );

        let enc_wires = combine(&[qregs], enc_ancillas, WireLayout::Block)?;
        let chk_wires = combine(&[qregs], chk_ancillas, WireLayout::Block)?;

        self.encoder.apply_to(prog, qregs, Some(enc_cregs), Some(enc_ancillas))?;

        for _round in 1..self.policy.num_repeats {
            for j in 0..qregs.len() {
                splice(prog, checker, &chk_wires[j], chk_cregs[j].bits())?;
                for outcome in 0..outcomes {
                    if outcome == self.policy.accept {
                        continue;
                    }
                    let guard = Condition::new(chk_cregs[j].bits().iter().copied(), outcome);
                    for &wire in &enc_wires[j] {
                        prog.append_conditioned(Instruction::reset(wire), guard.clone())?;
                    }
                    splice_conditioned(prog, enc, &enc_wires[j], enc_cregs[j].bits(), &guard)?;
                }
            }
        }

        for j in 0..qregs.len() {
            splice(prog, checker, &chk_wires[j], chk_cregs[j].bits())?;
        }
        Ok(())
    }
}
