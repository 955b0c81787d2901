//! Steane 7-qubit code building blocks.
//!
//! The Steane code protects one logical qubit in seven physical qubits.
//! Syndrome detection measures six stabilizers,
//!
//! ```text
//! M_a = X0 X4 X5 X6    N_a = Z0 Z4 Z5 Z6
//! M_b = X1 X3 X5 X6    N_b = Z1 Z3 Z5 Z6
//! M_c = X2 X3 X4 X6    N_c = Z2 Z3 Z4 Z6
//! ```
//!
//! whose outcomes form a 6-bit syndrome: the upper three bits locate a
//! bit-flip, the lower three a phase-flip. These fragments are plain data
//! driving the generic composition engine; nothing below is specific to
//! how programs are represented or spliced.

use alsvid_ir::{IrResult, StandardGate, SubProgram};

use crate::corrector::SyndromeCorrector;
use crate::detector::SyndromeDetector;
use crate::encoder::Encoder;
use crate::error_corrector::ErrorCorrector;
use crate::ft_encoder::{FaultTolerantEncoder, RetryPolicy};
use crate::gates::FaultTolerantGates;
use crate::table::{CorrectionTable, Pauli};

/// Physical qubits per logical qubit.
pub const CODE_QUBITS: u32 = 7;
/// Syndrome width in classical bits.
pub const SYNDROME_BITS: u32 = 6;
/// Checker outcome accepted as a correct |0⟩ preparation.
pub const ACCEPT_VALUE: u64 = 0;

/// Non-fault-tolerant preparation of the encoded |0⟩ state.
///
/// Hadamards on the first three qubits followed by a CX ladder project
/// onto the simultaneous +1 eigenspace of the X stabilizers.
pub fn encoder() -> IrResult<Encoder> {
    let mut b = SubProgram::builder("steane_encoder", CODE_QUBITS, 0, 0);
    b.h(0)?.h(1)?.h(2)?;
    b.cx(2, 3)?.cx(2, 4)?.cx(2, 6)?;
    b.cx(1, 3)?.cx(1, 5)?.cx(1, 6)?;
    b.cx(0, 4)?.cx(0, 5)?.cx(0, 6)?;
    Ok(Encoder::new(b.finish()))
}

/// Verification fragment for the fault-tolerant encoder.
///
/// Parity of data qubits 3, 4, 5 accumulated onto one ancilla (local wire
/// 7) and measured; a correctly prepared |0⟩ block yields outcome 0.
fn checker() -> IrResult<SubProgram> {
    let mut b = SubProgram::builder("steane_checker", CODE_QUBITS, 1, 1);
    b.cx(3, 7)?.cx(4, 7)?.cx(5, 7)?;
    b.measure(7, 0)?;
    Ok(b.finish())
}

/// Fault-tolerant |0⟩ preparation with `num_repeats` bounded attempts.
pub fn fault_tolerant_encoder(num_repeats: u32) -> IrResult<FaultTolerantEncoder> {
    Ok(FaultTolerantEncoder::new(
        encoder()?,
        checker()?,
        RetryPolicy::new(num_repeats, ACCEPT_VALUE),
    ))
}

/// Syndrome detection for all six stabilizers.
///
/// Ancilla `i` occupies local wire `7 + i` and is measured into classical
/// wire `i`. Ancillas 3–5 pick up the Z stabilizers through CZ chains,
/// ancillas 0–2 the X stabilizers through CX chains, each conjugated by
/// Hadamards.
pub fn syndrome_detector() -> IrResult<SyndromeDetector> {
    let mut b = SubProgram::builder("steane_syndrome", CODE_QUBITS, SYNDROME_BITS, SYNDROME_BITS);

    for a in 0..SYNDROME_BITS {
        b.h(7 + a)?;
    }

    b.cz(12, 0)?.cz(12, 4)?.cz(12, 5)?.cz(12, 6)?;
    b.cz(11, 1)?.cz(11, 3)?.cz(11, 5)?.cz(11, 6)?;
    b.cz(10, 2)?.cz(10, 3)?.cz(10, 4)?.cz(10, 6)?;

    b.cx(9, 0)?.cx(9, 4)?.cx(9, 5)?.cx(9, 6)?;
    b.cx(8, 1)?.cx(8, 3)?.cx(8, 5)?.cx(8, 6)?;
    b.cx(7, 2)?.cx(7, 3)?.cx(7, 4)?.cx(7, 6)?;

    for a in 0..SYNDROME_BITS {
        b.h(7 + a)?;
    }
    for a in 0..SYNDROME_BITS {
        b.measure(7 + a, a)?;
    }
    Ok(SyndromeDetector::new(b.finish()))
}

/// Map a 3-bit stabilizer pattern to the data qubit it locates.
///
/// The same map serves both syndrome halves: bit `i` of the pattern flags
/// membership in stabilizer `a+i` of that half.
fn locate(part: u64) -> u32 {
    match part {
        1 => 2,
        2 => 1,
        3 => 3,
        4 => 0,
        5 => 4,
        6 => 5,
        7 => 6,
        _ => unreachable!("stabilizer pattern out of range"),
    }
}

/// The total Steane correction table.
///
/// Each non-zero syndrome splits into an X half (bits 3–5) and a Z half
/// (bits 0–2), decoded independently; a syndrome flagging both applies the
/// combined correction. All 63 non-zero syndromes get exactly one clause.
pub fn correction_table() -> CorrectionTable {
    let mut table = CorrectionTable::new(SYNDROME_BITS, CODE_QUBITS);
    for syndrome in 1..(1u64 << SYNDROME_BITS) {
        let x_part = syndrome >> 3;
        let z_part = syndrome & 0b111;
        match (x_part, z_part) {
            (x, 0) => {
                table.set(syndrome, locate(x), Pauli::X);
            }
            (0, z) => {
                table.set(syndrome, locate(z), Pauli::Z);
            }
            (x, z) if x == z => {
                table.set(syndrome, locate(x), Pauli::XZ);
            }
            (x, z) => {
                table.set(syndrome, locate(z), Pauli::Z);
                table.set(syndrome, locate(x), Pauli::X);
            }
        }
    }
    table
}

/// Syndrome correction driven by [`correction_table`].
pub fn syndrome_corrector() -> IrResult<SyndromeCorrector> {
    SyndromeCorrector::from_table(&correction_table())
}

/// One full Steane error-correction round.
pub fn error_corrector() -> IrResult<ErrorCorrector> {
    Ok(ErrorCorrector::new(syndrome_detector()?, syndrome_corrector()?))
}

/// The transversal Steane gate set: X, H, S, and CNOT, all bitwise.
///
/// The logical S is S followed by Z on every wire; the logical CNOT spans
/// two encoded blocks (14 wires) with pairwise CX.
pub fn gate_library() -> IrResult<FaultTolerantGates> {
    let mut lib = FaultTolerantGates::new();

    let mut cx = SubProgram::builder("steane_cx", 2 * CODE_QUBITS, 0, 0);
    for w in 0..CODE_QUBITS {
        cx.cx(w, CODE_QUBITS + w)?;
    }
    lib.register(StandardGate::CX.name(), cx.finish());

    let mut h = SubProgram::builder("steane_h", CODE_QUBITS, 0, 0);
    for w in 0..CODE_QUBITS {
        h.h(w)?;
    }
    lib.register(StandardGate::H.name(), h.finish());

    let mut x = SubProgram::builder("steane_x", CODE_QUBITS, 0, 0);
    for w in 0..CODE_QUBITS {
        x.x(w)?;
    }
    lib.register(StandardGate::X.name(), x.finish());

    let mut s = SubProgram::builder("steane_s", CODE_QUBITS, 0, 0);
    for w in 0..CODE_QUBITS {
        s.s(w)?;
    }
    for w in 0..CODE_QUBITS {
        s.z(w)?;
    }
    lib.register(StandardGate::S.name(), s.finish());

    Ok(lib)
}
