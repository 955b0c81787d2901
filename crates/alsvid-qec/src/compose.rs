//! Generic sub-program splicing.
//!
//! One splice implementation serves both program representations: the
//! fragment's template operations are instantiated onto the supplied wire
//! positions and appended through the [`Program`] trait, preserving the
//! fragment's internal order. The dependency-graph form recovers the same
//! per-wire structure from the append sequence.

use alsvid_ir::{ClbitId, Condition, Instruction, Program, QubitId, SubProgram, TemplateOp};
use tracing::trace;

use crate::error::{QecError, QecResult};

fn check_widths(sub: &SubProgram, data: &[QubitId], classical: &[ClbitId]) -> QecResult<()> {
    if data.len() != sub.num_qubits() as usize {
        return Err(QecError::WidthMismatch {
            name: sub.name().to_string(),
            kind: "quantum",
            expected: sub.num_qubits(),
            got: data.len(),
        });
    }
    if classical.len() != sub.num_clbits() as usize {
        return Err(QecError::WidthMismatch {
            name: sub.name().to_string(),
            kind: "classical",
            expected: sub.num_clbits(),
            got: classical.len(),
        });
    }
    Ok(())
}

/// Map a template operation onto concrete wires.
///
/// A template guard becomes a condition over the full supplied classical
/// wire list, holding the template's value.
fn instantiate(op: &TemplateOp, data: &[QubitId], classical: &[ClbitId]) -> Instruction {
    Instruction {
        kind: op.kind.clone(),
        qubits: op.qubits.iter().map(|&w| data[w as usize]).collect(),
        clbits: op.clbits.iter().map(|&b| classical[b as usize]).collect(),
        condition: op
            .cond
            .map(|value| Condition::new(classical.iter().copied(), value)),
    }
}

/// Insert one instance of `sub` onto the given wire positions.
///
/// `data` supplies the fragment's combined quantum wires (data wires
/// first, then ancillas) and must match the declared quantum width;
/// `classical` must match the declared classical width. Fails with
/// [`QecError::WidthMismatch`] otherwise, leaving the program untouched.
pub fn splice<P: Program + ?Sized>(
    prog: &mut P,
    sub: &SubProgram,
    data: &[QubitId],
    classical: &[ClbitId],
) -> QecResult<()> {
    check_widths(sub, data, classical)?;
    trace!(fragment = sub.name(), ops = sub.len(), "splicing sub-program");
    for op in sub.ops() {
        prog.append(instantiate(op, data, classical))?;
    }
    Ok(())
}

/// Insert one instance of `sub`, guarding every inserted instruction
/// individually on `guard`.
///
/// Each instruction fires only in executions where the guard register
/// holds the guard value; the fragment is not wrapped as one atomic
/// block. Fragments that carry their own template guards cannot be
/// re-guarded ([`QecError::NestedCondition`]).
pub fn splice_conditioned<P: Program + ?Sized>(
    prog: &mut P,
    sub: &SubProgram,
    data: &[QubitId],
    classical: &[ClbitId],
    guard: &Condition,
) -> QecResult<()> {
    check_widths(sub, data, classical)?;
    if sub.ops().iter().any(|op| op.cond.is_some()) {
        return Err(QecError::NestedCondition(sub.name().to_string()));
    }
    trace!(
        fragment = sub.name(),
        ops = sub.len(),
        value = guard.value,
        "splicing guarded sub-program"
    );
    for op in sub.ops() {
        let inst = instantiate(op, data, classical).with_condition(guard.clone());
        prog.append(inst)?;
    }
    Ok(())
}
