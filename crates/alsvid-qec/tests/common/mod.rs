//! Statevector execution of generated programs, for tests only.
//!
//! The engine never executes programs; this replays one front to back so
//! end-to-end tests can observe syndromes and final states. Qubit `q` is
//! bit `q` of the amplitude index. Measurements must be deterministic
//! (stabilizer syndromes of valid code states are) and panic otherwise
//! rather than sampling.

use alsvid_ir::{ClbitId, Instruction, InstructionKind, Program, QubitId, StandardGate};
use num_complex::Complex64;

const EPS: f64 = 1e-6;

pub struct Executor {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
    clbits: Vec<bool>,
}

impl Executor {
    /// Replay `prog` from |0…0⟩ with all classical bits clear.
    pub fn run<P: Program>(prog: &P) -> Self {
        let mut exec = Self::new(prog.num_qubits(), prog.num_clbits());
        for inst in prog.instructions() {
            exec.execute(&inst);
        }
        exec
    }

    fn new(num_qubits: usize, num_clbits: usize) -> Self {
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
            clbits: vec![false; num_clbits],
        }
    }

    fn execute(&mut self, inst: &Instruction) {
        if let Some(cond) = &inst.condition {
            if self.value_of(&cond.clbits) != cond.value {
                return;
            }
        }
        match &inst.kind {
            InstructionKind::Gate(gate) => {
                let q: Vec<usize> = inst.qubits.iter().map(|q| q.0 as usize).collect();
                self.apply_gate(*gate, &q);
            }
            InstructionKind::Measure => {
                for (&qubit, &clbit) in inst.qubits.iter().zip(&inst.clbits) {
                    let outcome = self.measure(qubit.0 as usize);
                    self.clbits[clbit.0 as usize] = outcome;
                }
            }
            InstructionKind::Reset => {
                for &qubit in &inst.qubits {
                    if self.measure(qubit.0 as usize) {
                        self.apply_x(qubit.0 as usize);
                    }
                }
            }
        }
    }

    fn apply_gate(&mut self, gate: StandardGate, qubits: &[usize]) {
        match gate {
            StandardGate::I => {}
            StandardGate::X => self.apply_x(qubits[0]),
            StandardGate::Y => self.apply_y(qubits[0]),
            StandardGate::Z => self.apply_z(qubits[0]),
            StandardGate::H => self.apply_h(qubits[0]),
            StandardGate::S => self.apply_phase(qubits[0], Complex64::new(0.0, 1.0)),
            StandardGate::Sdg => self.apply_phase(qubits[0], Complex64::new(0.0, -1.0)),
            StandardGate::CX => self.apply_cx(qubits[0], qubits[1]),
            StandardGate::CZ => self.apply_cz(qubits[0], qubits[1]),
        }
    }

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    fn apply_y(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_z(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask != 0 {
                self.amplitudes[i] = -self.amplitudes[i];
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_phase(&mut self, qubit: usize, phase: Complex64) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask != 0 {
                self.amplitudes[i] *= phase;
            }
        }
    }

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    fn apply_cz(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask != 0) {
                self.amplitudes[i] = -self.amplitudes[i];
            }
        }
    }

    /// Deterministically measure `qubit`, projecting the state.
    ///
    /// Panics on a genuinely random outcome: the programs under test only
    /// measure stabilizers with definite values.
    fn measure(&mut self, qubit: usize) -> bool {
        let mask = 1 << qubit;
        let p1: f64 = self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, amp)| amp.norm_sqr())
            .sum();

        let outcome = if p1 > 1.0 - EPS {
            true
        } else if p1 < EPS {
            false
        } else {
            panic!("nondeterministic measurement of qubit {qubit} (p1 = {p1})");
        };

        // Project and renormalize.
        let keep_set = if outcome { mask } else { 0 };
        let mut norm_sq = 0.0;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != keep_set {
                *amp = Complex64::new(0.0, 0.0);
            }
            norm_sq += amp.norm_sqr();
        }
        let norm = norm_sq.sqrt();
        for amp in &mut self.amplitudes {
            *amp /= norm;
        }
        outcome
    }

    /// Joint value of the given classical bits, little-endian.
    pub fn value_of(&self, clbits: &[ClbitId]) -> u64 {
        clbits
            .iter()
            .enumerate()
            .map(|(i, c)| u64::from(self.clbits[c.0 as usize]) << i)
            .sum()
    }

    /// |⟨self|other⟩|² of the final states.
    pub fn fidelity(&self, other: &Executor) -> f64 {
        assert_eq!(self.num_qubits, other.num_qubits);
        let overlap: Complex64 = self
            .amplitudes
            .iter()
            .zip(&other.amplitudes)
            .map(|(a, b)| a.conj() * b)
            .sum();
        overlap.norm_sqr()
    }

    /// Probability that `qubit` reads 1.
    pub fn prob_one(&self, qubit: QubitId) -> f64 {
        let mask = 1usize << qubit.0;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, amp)| amp.norm_sqr())
            .sum()
    }
}
