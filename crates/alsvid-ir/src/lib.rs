//! Alsvid Program Intermediate Representation
//!
//! This crate provides the data structures for representing quantum
//! programs during fault-tolerant program generation. It is the
//! foundation the composition engine in `alsvid-qec` builds on.
//!
//! # Overview
//!
//! The same program can be carried in two interchangeable forms: a flat
//! ordered instruction sequence ([`SeqProgram`]) and a wire-dependency
//! graph ([`DagProgram`]). Both implement the [`Program`] trait, a small
//! mutation surface of register addition, instruction append, measurement,
//! reset, and classically guarded append, so everything built on top is
//! written once and works on either form.
//!
//! # Core Components
//!
//! - **Wires and registers**: [`QubitId`], [`ClbitId`] wire addressing;
//!   [`QuantumRegister`], [`ClassicalRegister`] named register handles
//! - **Instructions**: [`Instruction`] combining a [`StandardGate`],
//!   measurement, or reset with its operands and an optional [`Condition`]
//! - **Fragments**: [`SubProgram`] immutable fixed-width building blocks
//!   over local wire indices, assembled with [`SubProgramBuilder`]
//! - **Representations**: [`SeqProgram`] and [`DagProgram`] behind the
//!   [`Program`] trait
//!
//! # Example: the same program in both forms
//!
//! ```rust
//! use alsvid_ir::{DagProgram, Instruction, Program, QregKind, SeqProgram, StandardGate};
//!
//! fn bell<P: Program + Default>() -> P {
//!     let mut prog = P::default();
//!     let q = prog.add_qreg(QregKind::Data, "q0", 2).unwrap();
//!     let c = prog.add_creg("measure0", 2).unwrap();
//!     prog.append(Instruction::single_qubit_gate(StandardGate::H, q.wires()[0]))
//!         .unwrap();
//!     prog.append(Instruction::two_qubit_gate(
//!         StandardGate::CX,
//!         q.wires()[0],
//!         q.wires()[1],
//!     ))
//!     .unwrap();
//!     prog.measure_wires(q.wires(), c.bits()).unwrap();
//!     prog
//! }
//!
//! let seq: SeqProgram = bell();
//! let dag: DagProgram = bell();
//! assert_eq!(seq.instructions().len(), dag.instructions().len());
//! ```

pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod program;
pub mod register;
pub mod seq;
pub mod subprogram;

pub use dag::{DagEdge, DagNode, DagProgram, NodeIndex, WireId};
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Condition, Instruction, InstructionKind};
pub use program::Program;
pub use register::{ClassicalRegister, ClbitId, QregKind, QuantumRegister, QubitId};
pub use seq::SeqProgram;
pub use subprogram::{SubProgram, SubProgramBuilder, TemplateOp};
