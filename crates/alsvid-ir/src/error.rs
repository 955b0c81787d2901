//! Error types for the IR crate.

use crate::register::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit not found in program.
    #[error("qubit {qubit} not found in program (instruction: {instruction})")]
    QubitNotFound {
        /// The qubit that was not found.
        qubit: QubitId,
        /// Name of the offending instruction.
        instruction: String,
    },

    /// Classical bit not found in program.
    #[error("classical bit {clbit} not found in program (instruction: {instruction})")]
    ClbitNotFound {
        /// The classical bit that was not found.
        clbit: ClbitId,
        /// Name of the offending instruction.
        instruction: String,
    },

    /// Duplicate qubit in one instruction's operand list.
    #[error("duplicate qubit {qubit} in operands of '{instruction}'")]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Name of the offending instruction.
        instruction: String,
    },

    /// A register with this name already exists in the program.
    #[error("register name '{0}' already in use")]
    DuplicateRegister(String),

    /// Measurement with unequal qubit and classical bit counts.
    #[error("measurement maps {qubits} qubits onto {clbits} classical bits")]
    BitCountMismatch {
        /// Number of qubits being measured.
        qubits: usize,
        /// Number of classical bits receiving outcomes.
        clbits: usize,
    },

    /// Template wire index outside the sub-program's declared width.
    #[error("wire index {index} outside sub-program width {width}")]
    WireOutOfRange {
        /// The offending local wire index.
        index: u32,
        /// The declared width.
        width: u32,
    },

    /// Template classical index outside the sub-program's declared width.
    #[error("classical index {index} outside sub-program width {width}")]
    BitOutOfRange {
        /// The offending local classical index.
        index: u32,
        /// The declared classical width.
        width: u32,
    },

    /// Invalid DAG structure.
    #[error("invalid DAG structure: {0}")]
    InvalidDag(String),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
