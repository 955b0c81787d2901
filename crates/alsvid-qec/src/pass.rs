//! Top-level fault-tolerance orchestration (contract only).
//!
//! The pass that rewrites an arbitrary program into its fault-tolerant
//! equivalent is specified here but not implemented. Its contract:
//!
//! 1. Unroll the input into the gate library's basis ([`FaultTolerantGates::gates`]).
//! 2. Encode every logical qubit ([`Encoder`]).
//! 3. For each input instruction, splice the fault-tolerant gadget for its
//!    operation, then an error-correction round on the touched groups
//!    ([`ErrorCorrector`]).
//! 4. Replace terminal measurements with fault-tolerant measurement.
//!
//! Construction validates that every component is present; running either
//! pass reports [`QecError::Unimplemented`].

use alsvid_ir::Program;

use crate::encoder::Encoder;
use crate::error::{QecError, QecResult};
use crate::error_corrector::ErrorCorrector;
use crate::gates::FaultTolerantGates;

/// Fault-tolerant measurement of encoded blocks. Contract only.
#[derive(Debug, Clone, Default)]
pub struct FaultTolerantMeasurement;

impl FaultTolerantMeasurement {
    /// Create the measurement placeholder.
    pub fn new() -> Self {
        Self
    }

    /// Measure encoded blocks fault-tolerantly.
    pub fn measure<P: Program + ?Sized>(&self, _prog: &mut P) -> QecResult<()> {
        Err(QecError::Unimplemented("fault-tolerant measurement"))
    }
}

/// The orchestration pass rewriting plain programs into fault-tolerant
/// ones. Contract only; see the module documentation.
#[derive(Debug, Clone)]
pub struct FaultTolerancePass {
    encoder: Encoder,
    error_corrector: ErrorCorrector,
    gates: FaultTolerantGates,
    measurement: FaultTolerantMeasurement,
}

impl FaultTolerancePass {
    /// Assemble the pass from its components.
    pub fn new(
        encoder: Encoder,
        error_corrector: ErrorCorrector,
        gates: FaultTolerantGates,
        measurement: FaultTolerantMeasurement,
    ) -> Self {
        Self {
            encoder,
            error_corrector,
            gates,
            measurement,
        }
    }

    /// The gate basis the pass would unroll input programs into.
    pub fn basis(&self) -> Vec<&str> {
        self.gates.gates()
    }

    /// The measurement component.
    pub fn measurement(&self) -> &FaultTolerantMeasurement {
        &self.measurement
    }

    /// Rewrite `input` into a fault-tolerant program.
    ///
    /// Validates that every component carries its fragment, then reports
    /// [`QecError::Unimplemented`]: the rewrite itself is future work.
    pub fn run<P: Program, Q: Program + Default>(&self, _input: &P) -> QecResult<Q> {
        self.encoder.require()?;
        self.error_corrector.detector().require()?;
        self.error_corrector.corrector().require()?;
        if self.gates.gates().is_empty() {
            return Err(QecError::MissingBlock("fault-tolerant gate library"));
        }
        Err(QecError::Unimplemented("fault-tolerance orchestration pass"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steane;
    use alsvid_ir::SeqProgram;

    fn pass() -> FaultTolerancePass {
        FaultTolerancePass::new(
            steane::encoder().unwrap(),
            steane::error_corrector().unwrap(),
            steane::gate_library().unwrap(),
            FaultTolerantMeasurement::new(),
        )
    }

    #[test]
    fn test_basis_comes_from_library() {
        assert_eq!(pass().basis(), ["cx", "h", "s", "x"]);
    }

    #[test]
    fn test_run_reports_unimplemented() {
        let input = SeqProgram::new("input");
        let err = pass().run::<_, SeqProgram>(&input).unwrap_err();
        assert!(matches!(err, QecError::Unimplemented(_)));
    }

    #[test]
    fn test_run_validates_components_first() {
        let pass = FaultTolerancePass::new(
            Encoder::disabled(),
            steane::error_corrector().unwrap(),
            steane::gate_library().unwrap(),
            FaultTolerantMeasurement::new(),
        );
        let input = SeqProgram::new("input");
        assert!(matches!(
            pass.run::<_, SeqProgram>(&input),
            Err(QecError::MissingBlock("encoder"))
        ));
    }

    #[test]
    fn test_measurement_stub() {
        let mut prog = SeqProgram::new("test");
        assert!(matches!(
            FaultTolerantMeasurement::new().measure(&mut prog),
            Err(QecError::Unimplemented(_))
        ));
    }
}
