//! Error types for the composition engine.

use alsvid_ir::IrError;
use thiserror::Error;

/// Errors that can occur while composing fault-tolerant programs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QecError {
    /// A required building-block fragment was never supplied.
    #[error("missing building block: {0}")]
    MissingBlock(&'static str),

    /// Supplied wire list disagrees with a fragment's declared width.
    #[error("sub-program '{name}' declares {expected} {kind} wires, got {got}")]
    WidthMismatch {
        /// Name of the fragment being spliced.
        name: String,
        /// Which wire space disagrees ("quantum" or "classical").
        kind: &'static str,
        /// The declared width.
        expected: u32,
        /// The supplied wire count.
        got: usize,
    },

    /// Gate id not present in the fault-tolerant gate library.
    #[error("unknown operation '{0}' in fault-tolerant gate library")]
    UnknownOperation(String),

    /// Operand-position group lists of unequal length.
    #[error("operand position {position} supplies {got} groups, expected {expected}")]
    ArityMismatch {
        /// The offending operand position.
        position: usize,
        /// Expected group count (from position 0).
        expected: usize,
        /// Supplied group count.
        got: usize,
    },

    /// Classical group count disagrees with the data group count.
    #[error("got {cregs} classical groups for {qregs} data groups")]
    GroupCountMismatch {
        /// Number of data groups.
        qregs: usize,
        /// Number of classical groups.
        cregs: usize,
    },

    /// Ancilla group count disagrees with the data group count.
    #[error("got {ancillas} ancilla groups for {qregs} data groups")]
    AncillaCountMismatch {
        /// Number of data groups.
        qregs: usize,
        /// Number of ancilla groups.
        ancillas: usize,
    },

    /// A conditioned template operation cannot be guarded again.
    #[error("sub-program '{0}' carries its own guards and cannot be spliced under a condition")]
    NestedCondition(String),

    /// The retry protocol would emit an unreasonably large branch table.
    #[error("checker declares {bits} classical bits; retry table bounded at {max} bits")]
    RetryTableTooLarge {
        /// The checker's classical width.
        bits: u32,
        /// The supported maximum width.
        max: u32,
    },

    /// Contract-only component invoked.
    #[error("{0} is not implemented")]
    Unimplemented(&'static str),

    /// Error from the program representation layer.
    #[error(transparent)]
    Ir(#[from] IrError),
}

/// Result type for composition operations.
pub type QecResult<T> = Result<T, QecError>;
