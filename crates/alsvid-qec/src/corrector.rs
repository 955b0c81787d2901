//! Syndrome correction.

use std::sync::Arc;

use alsvid_ir::{ClassicalRegister, IrResult, Program, QuantumRegister, SubProgram};

use crate::compose::splice;
use crate::error::{QecError, QecResult};
use crate::table::CorrectionTable;

/// Splices a correction-table fragment per logical qubit, conditioned on
/// that qubit's measured syndrome.
#[derive(Debug, Clone)]
pub struct SyndromeCorrector {
    block: Option<Arc<SubProgram>>,
}

impl SyndromeCorrector {
    /// Create a corrector from a pre-built correction fragment.
    pub fn new(block: SubProgram) -> Self {
        Self {
            block: Some(Arc::new(block)),
        }
    }

    /// Create a corrector from a correction table.
    pub fn from_table(table: &CorrectionTable) -> IrResult<Self> {
        Ok(Self::new(table.to_block("correction_table")?))
    }

    /// A corrector with no fragment. Every operation fails with
    /// [`QecError::MissingBlock`].
    pub fn disabled() -> Self {
        Self { block: None }
    }

    pub(crate) fn require(&self) -> QecResult<&SubProgram> {
        self.block
            .as_deref()
            .ok_or(QecError::MissingBlock("syndrome corrector"))
    }

    /// The correction fragment, if present.
    pub fn block(&self) -> Option<&SubProgram> {
        self.block.as_deref()
    }

    /// Apply the correction table to each data group, driven by its
    /// classical group.
    ///
    /// Requires one classical group per data group; corrections act on the
    /// data wires only.
    pub fn correct<P: Program + ?Sized>(
        &self,
        prog: &mut P,
        qregs: &[QuantumRegister],
        cregs: &[ClassicalRegister],
    ) -> QecResult<()> {
        let block = self.require()?;
        if cregs.len() != qregs.len() {
            return Err(QecError::GroupCountMismatch {
                qregs: qregs.len(),
                cregs: cregs.len(),
            });
        }
        for (qreg, creg) in qregs.iter().zip(cregs) {
            splice(prog, block, qreg.wires(), creg.bits())?;
        }
        Ok(())
    }
}
