//! End-to-end Steane error-correction round, replayed on a statevector.

mod common;

use alsvid_ir::{Instruction, Program, QubitId, SeqProgram, StandardGate};
use alsvid_qec::alloc::{alloc_ancillas, alloc_cregs, alloc_qregs};
use alsvid_qec::steane;
use common::Executor;

/// Encode one logical qubit, optionally corrupt it, then run one
/// error-correction round. The data block is wires 0–6, the detector
/// ancillas wires 7–12, the syndrome bits 0–5.
fn corrected_program(errors: &[StandardGate]) -> SeqProgram {
    let mut prog = SeqProgram::new("roundtrip");
    let qregs = alloc_qregs(&mut prog, 1, 7, "q").unwrap();
    steane::encoder()
        .unwrap()
        .apply_to(&mut prog, &qregs, None, None)
        .unwrap();
    for &error in errors {
        prog.append(Instruction::single_qubit_gate(error, qregs[0].wires()[0]))
            .unwrap();
    }
    steane::error_corrector()
        .unwrap()
        .correct_errors(&mut prog, &qregs, None, None)
        .unwrap();
    prog
}

/// The encoded |0⟩ reference over the same wire space: encoder only, with
/// the detector's ancilla and syndrome registers allocated but untouched.
fn reference_program() -> SeqProgram {
    let mut prog = SeqProgram::new("reference");
    let qregs = alloc_qregs(&mut prog, 1, 7, "q").unwrap();
    steane::encoder()
        .unwrap()
        .apply_to(&mut prog, &qregs, None, None)
        .unwrap();
    alloc_ancillas(&mut prog, 1, 6, "ancilla").unwrap();
    alloc_cregs(&mut prog, 1, 6, "measure").unwrap();
    prog
}

fn syndrome_of(prog: &SeqProgram, exec: &Executor) -> u64 {
    let creg = prog
        .cregs()
        .iter()
        .find(|r| r.name() == "measure0")
        .expect("syndrome register");
    exec.value_of(creg.bits())
}

#[test]
fn test_clean_state_reads_syndrome_zero() {
    let prog = corrected_program(&[]);
    let exec = Executor::run(&prog);

    assert_eq!(syndrome_of(&prog, &exec), 0);

    // No clause fired: the data block is exactly the encoded |0⟩.
    let reference = Executor::run(&reference_program());
    assert!(exec.fidelity(&reference) > 1.0 - 1e-6);
}

#[test]
fn test_bit_flip_on_qubit_zero_reads_syndrome_32() {
    let prog = corrected_program(&[StandardGate::X]);
    let exec = Executor::run(&prog);

    assert_eq!(syndrome_of(&prog, &exec), 32);
}

#[test]
fn test_corrector_emits_exactly_one_x_for_syndrome_32() {
    let prog = corrected_program(&[StandardGate::X]);

    let clauses: Vec<_> = prog
        .instructions()
        .into_iter()
        .filter(|inst| inst.condition.as_ref().is_some_and(|c| c.value == 32))
        .collect();
    assert_eq!(clauses.len(), 1);
    assert_eq!(clauses[0].name(), "x");
    assert_eq!(clauses[0].qubits, [QubitId(0)]);
}

#[test]
fn test_bit_flip_is_corrected() {
    let prog = corrected_program(&[StandardGate::X]);
    let exec = Executor::run(&prog);

    let reference = Executor::run(&reference_program());
    assert!(
        exec.fidelity(&reference) > 1.0 - 1e-6,
        "correction must restore the encoded state"
    );
    // Ancillas were reset after detection.
    for wire in 7..13u32 {
        assert!(exec.prob_one(QubitId(wire)) < 1e-6);
    }
}

#[test]
fn test_phase_flip_reads_syndrome_4_and_is_corrected() {
    let prog = corrected_program(&[StandardGate::Z]);
    let exec = Executor::run(&prog);

    assert_eq!(syndrome_of(&prog, &exec), 4);
    let reference = Executor::run(&reference_program());
    assert!(exec.fidelity(&reference) > 1.0 - 1e-6);
}

#[test]
fn test_combined_flip_reads_syndrome_36_and_is_corrected() {
    let prog = corrected_program(&[StandardGate::X, StandardGate::Z]);
    let exec = Executor::run(&prog);

    assert_eq!(syndrome_of(&prog, &exec), 36);
    let reference = Executor::run(&reference_program());
    assert!(exec.fidelity(&reference) > 1.0 - 1e-6);
}
