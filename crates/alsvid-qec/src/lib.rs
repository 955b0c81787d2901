//! Alsvid Fault-Tolerant Program Generation
//!
//! This crate composes small fixed building blocks (state encoders,
//! syndrome detectors, syndrome correctors, logical-gate gadgets) into
//! fault-tolerant quantum programs, replicated across many logical
//! qubits. The engine is generic twice over: over the QEC code, whose
//! building blocks arrive as pre-built [`SubProgram`](alsvid_ir::SubProgram)
//! fragments, and over the program representation, through the
//! [`Program`](alsvid_ir::Program) trait of `alsvid-ir`.
//!
//! # Components
//!
//! - **Allocation**: [`alloc`] for collision-free named register blocks
//! - **Layout**: [`layout`] for block/interleaved wire arrangement
//! - **Composition**: [`compose`] for generic and classically guarded splicing
//! - **Encoding**: [`Encoder`] replicated |0⟩ preparation,
//!   [`FaultTolerantEncoder`] preparation with bounded verify-and-retry
//! - **Correction**: [`SyndromeDetector`], [`SyndromeCorrector`], and the
//!   combined [`ErrorCorrector`]
//! - **Gates**: [`FaultTolerantGates`] registry of logical-gate gadgets
//! - **Steane code**: [`steane`] building blocks, as data
//! - **Orchestration**: [`pass`] contract only, not yet implemented
//!
//! The engine only builds programs; executing or simulating them is out
//! of scope.
//!
//! # Example
//!
//! ```rust
//! use alsvid_ir::SeqProgram;
//! use alsvid_qec::{alloc::alloc_qregs, steane};
//!
//! // Encode two logical qubits, then run one error-correction round.
//! let mut prog = SeqProgram::new("demo");
//! let qregs = alloc_qregs(&mut prog, 2, 7, "q").unwrap();
//! steane::encoder()
//!     .unwrap()
//!     .apply_to(&mut prog, &qregs, None, None)
//!     .unwrap();
//! steane::error_corrector()
//!     .unwrap()
//!     .correct_errors(&mut prog, &qregs, None, None)
//!     .unwrap();
//! ```

pub mod alloc;
pub mod compose;
pub mod corrector;
pub mod detector;
pub mod encoder;
pub mod error;
pub mod error_corrector;
pub mod ft_encoder;
pub mod gates;
pub mod layout;
pub mod pass;
pub mod steane;
pub mod table;

pub use corrector::SyndromeCorrector;
pub use detector::SyndromeDetector;
pub use encoder::Encoder;
pub use error::{QecError, QecResult};
pub use error_corrector::ErrorCorrector;
pub use ft_encoder::{FaultTolerantEncoder, MAX_CHECKER_BITS, RetryPolicy};
pub use gates::FaultTolerantGates;
pub use layout::WireLayout;
pub use pass::{FaultTolerancePass, FaultTolerantMeasurement};
pub use table::{CorrectionTable, Pauli};
