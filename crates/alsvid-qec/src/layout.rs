//! Wire-layout combination for logical-qubit groups.
//!
//! Building blocks act on one flat wire list per instance. The combiner
//! turns per-logical-qubit register groups into those lists, preserving
//! the relative order within each register. The layout mode is a property
//! of the consuming component, chosen once: single-target components use
//! [`WireLayout::Block`], the gate library uses [`WireLayout::Interleaved`].

use alsvid_ir::{QuantumRegister, QubitId};

use crate::error::{QecError, QecResult};

/// How ancilla wires are arranged relative to data wires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireLayout {
    /// Each instance's data wires (all operand positions in order) come
    /// first, followed by that instance's own ancillas.
    Block,
    /// Each instance's ancillas come first, followed by the data wires of
    /// every operand position in order. Used for multi-operand gates whose
    /// fragments expect shared ancillas ahead of the operand blocks.
    Interleaved,
}

/// Combine per-instance register groups into one wire list per instance.
///
/// `positions[p][j]` is the register of operand position `p` for instance
/// `j`; `ancillas[j]` is instance `j`'s ancilla register (possibly a
/// placeholder). All positions must supply the same number of instances,
/// and the ancilla list must match it.
pub fn combine(
    positions: &[&[QuantumRegister]],
    ancillas: &[QuantumRegister],
    mode: WireLayout,
) -> QecResult<Vec<Vec<QubitId>>> {
    let instances = positions.first().map_or(0, |p| p.len());
    for (i, position) in positions.iter().enumerate() {
        if position.len() != instances {
            return Err(QecError::ArityMismatch {
                position: i,
                expected: instances,
                got: position.len(),
            });
        }
    }
    if ancillas.len() != instances {
        return Err(QecError::AncillaCountMismatch {
            qregs: instances,
            ancillas: ancillas.len(),
        });
    }

    let mut combined = Vec::with_capacity(instances);
    for j in 0..instances {
        let mut wires = vec![];
        if mode == WireLayout::Interleaved {
            wires.extend_from_slice(ancillas[j].wires());
        }
        for position in positions {
            wires.extend_from_slice(position[j].wires());
        }
        if mode == WireLayout::Block {
            wires.extend_from_slice(ancillas[j].wires());
        }
        combined.push(wires);
    }
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::QregKind;

    fn qreg(name: &str, ids: &[u32]) -> QuantumRegister {
        QuantumRegister::new(name, QregKind::Data, ids.iter().map(|&i| QubitId(i)).collect())
    }

    fn areg(name: &str, ids: &[u32]) -> QuantumRegister {
        QuantumRegister::new(
            name,
            QregKind::Ancilla,
            ids.iter().map(|&i| QubitId(i)).collect(),
        )
    }

    #[test]
    fn test_block_puts_own_ancillas_after_data() {
        let data = [qreg("q0", &[0, 1]), qreg("q1", &[2, 3])];
        let ancillas = [areg("ancilla0", &[4]), areg("ancilla1", &[5])];
        let wires = combine(&[&data], &ancillas, WireLayout::Block).unwrap();
        assert_eq!(wires.len(), 2);
        assert_eq!(wires[0], [QubitId(0), QubitId(1), QubitId(4)]);
        assert_eq!(wires[1], [QubitId(2), QubitId(3), QubitId(5)]);
    }

    #[test]
    fn test_interleaved_puts_ancillas_before_positions() {
        let control = [qreg("q0", &[0, 1])];
        let target = [qreg("q1", &[2, 3])];
        let ancillas = [areg("ancilla0", &[4])];
        let wires = combine(&[&control, &target], &ancillas, WireLayout::Interleaved).unwrap();
        assert_eq!(wires.len(), 1);
        assert_eq!(
            wires[0],
            [QubitId(4), QubitId(0), QubitId(1), QubitId(2), QubitId(3)]
        );
    }

    #[test]
    fn test_placeholder_ancillas_contribute_no_wires() {
        let data = [qreg("q0", &[0, 1])];
        let ancillas = [QuantumRegister::placeholder(QregKind::Ancilla)];
        let wires = combine(&[&data], &ancillas, WireLayout::Interleaved).unwrap();
        assert_eq!(wires[0], [QubitId(0), QubitId(1)]);
    }

    #[test]
    fn test_unequal_positions_rejected() {
        let control = [qreg("q0", &[0]), qreg("q1", &[1])];
        let target = [qreg("q2", &[2])];
        let ancillas = [
            areg("ancilla0", &[3]),
            QuantumRegister::placeholder(QregKind::Ancilla),
        ];
        let err = combine(&[&control, &target], &ancillas, WireLayout::Interleaved).unwrap_err();
        assert!(matches!(
            err,
            QecError::ArityMismatch {
                position: 1,
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn test_ancilla_count_mismatch_rejected() {
        let data = [qreg("q0", &[0]), qreg("q1", &[1])];
        let ancillas = [areg("ancilla0", &[2])];
        let err = combine(&[&data], &ancillas, WireLayout::Block).unwrap_err();
        assert!(matches!(err, QecError::AncillaCountMismatch { qregs: 2, ancillas: 1 }));
    }
}
