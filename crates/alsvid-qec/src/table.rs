//! Syndrome-to-correction lookup tables.

use alsvid_ir::{IrResult, StandardGate, SubProgram};

/// A single-qubit Pauli correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pauli {
    /// No correction.
    I,
    /// Bit-flip correction.
    X,
    /// Phase-flip correction.
    Z,
    /// Combined correction, applied as Z then X.
    XZ,
}

/// Total function from syndrome values to per-qubit Pauli corrections.
///
/// Every syndrome in `0..2^syndrome_bits` is classified: syndrome 0 maps
/// to identity, and each non-identity syndrome carries the corrections to
/// apply. Rendered as a fragment, the table becomes one classically
/// guarded clause per non-identity syndrome.
#[derive(Debug, Clone)]
pub struct CorrectionTable {
    syndrome_bits: u32,
    num_qubits: u32,
    corrections: Vec<Vec<(u32, Pauli)>>,
}

impl CorrectionTable {
    /// Create a table classifying every syndrome as identity.
    ///
    /// # Panics
    ///
    /// Panics if `syndrome_bits` exceeds 16; a wider table would emit
    /// billions of clauses.
    pub fn new(syndrome_bits: u32, num_qubits: u32) -> Self {
        assert!(
            syndrome_bits <= 16,
            "correction table bounded at 16 syndrome bits, got {syndrome_bits}"
        );
        Self {
            syndrome_bits,
            num_qubits,
            corrections: vec![vec![]; 1 << syndrome_bits],
        }
    }

    /// Number of syndrome bits.
    pub fn syndrome_bits(&self) -> u32 {
        self.syndrome_bits
    }

    /// Number of data qubits corrections act on.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Total number of classified syndrome values.
    pub fn num_classified(&self) -> usize {
        self.corrections.len()
    }

    /// Record a correction for `syndrome` on `qubit`.
    ///
    /// Identity entries are ignored; others accumulate in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if `syndrome` or `qubit` is out of range.
    pub fn set(&mut self, syndrome: u64, qubit: u32, pauli: Pauli) -> &mut Self {
        assert!(
            (syndrome as usize) < self.corrections.len(),
            "syndrome {syndrome} outside {} bits",
            self.syndrome_bits
        );
        assert!(qubit < self.num_qubits, "qubit {qubit} outside data block");
        if pauli != Pauli::I {
            self.corrections[syndrome as usize].push((qubit, pauli));
        }
        self
    }

    /// The corrections recorded for `syndrome`. Empty for identity.
    pub fn correction(&self, syndrome: u64) -> &[(u32, Pauli)] {
        &self.corrections[syndrome as usize]
    }

    /// Number of non-identity syndromes (one clause each).
    pub fn num_clauses(&self) -> usize {
        self.corrections.iter().filter(|c| !c.is_empty()).count()
    }

    /// Render the table as a fragment of classically guarded clauses.
    ///
    /// The fragment spans the data block and the syndrome's classical
    /// wires; it uses no ancillas. Clauses are emitted in ascending
    /// syndrome order; a combined [`Pauli::XZ`] correction emits Z then X.
    pub fn to_block(&self, name: impl Into<String>) -> IrResult<SubProgram> {
        let mut builder = SubProgram::builder(name, self.num_qubits, 0, self.syndrome_bits);
        for (syndrome, corrections) in self.corrections.iter().enumerate() {
            let value = syndrome as u64;
            for &(qubit, pauli) in corrections {
                match pauli {
                    Pauli::I => {}
                    Pauli::X => {
                        builder.gate_if(StandardGate::X, [qubit], value)?;
                    }
                    Pauli::Z => {
                        builder.gate_if(StandardGate::Z, [qubit], value)?;
                    }
                    Pauli::XZ => {
                        builder.gate_if(StandardGate::Z, [qubit], value)?;
                        builder.gate_if(StandardGate::X, [qubit], value)?;
                    }
                }
            }
        }
        Ok(builder.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_emits_no_clause() {
        let mut table = CorrectionTable::new(2, 1);
        table.set(0, 0, Pauli::I);
        table.set(1, 0, Pauli::X);
        assert_eq!(table.num_clauses(), 1);
        assert!(table.correction(0).is_empty());

        let block = table.to_block("corr").unwrap();
        assert_eq!(block.len(), 1);
        assert_eq!(block.ops()[0].cond, Some(1));
    }

    #[test]
    fn test_combined_correction_emits_z_then_x() {
        let mut table = CorrectionTable::new(2, 1);
        table.set(3, 0, Pauli::XZ);
        let block = table.to_block("corr").unwrap();
        assert_eq!(block.len(), 2);
        let names: Vec<_> = block.ops().iter().map(|op| match &op.kind {
            alsvid_ir::InstructionKind::Gate(g) => g.name(),
            _ => "other",
        }).collect();
        assert_eq!(names, ["z", "x"]);
    }

    #[test]
    fn test_total_classification() {
        let table = CorrectionTable::new(3, 7);
        assert_eq!(table.num_classified(), 8);
        assert_eq!(table.num_clauses(), 0);
    }
}
