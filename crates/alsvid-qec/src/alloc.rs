//! Collision-free register-block allocation.
//!
//! Every component allocates its per-logical-qubit resources through the
//! functions here. Names are formed from a prefix and a numeric suffix;
//! the suffix is advanced past any name already taken in the program, so
//! repeated allocations with overlapping prefixes never collide. Suffix
//! space is `usize`-wide; exhaustion is unreachable in practice and has
//! no error path.

use alsvid_ir::{ClassicalRegister, Program, QregKind, QuantumRegister};

use crate::error::QecResult;

/// Default prefix for data register blocks.
pub const DATA_PREFIX: &str = "q";
/// Default prefix for ancilla register blocks.
pub const ANCILLA_PREFIX: &str = "ancilla";
/// Default prefix for syndrome/measurement classical blocks.
pub const MEASURE_PREFIX: &str = "measure";
/// Default prefix for gate-library classical blocks.
pub const CLASSICAL_PREFIX: &str = "classical";

/// Find the first free `prefix{n}` name at or after `index + *skipped`,
/// advancing `skipped` past taken names.
fn free_name<P: Program + ?Sized>(prog: &P, prefix: &str, index: usize, skipped: &mut usize) -> String {
    loop {
        let name = format!("{prefix}{}", index + *skipped);
        if !prog.has_register(&name) {
            return name;
        }
        *skipped += 1;
    }
}

/// Allocate `count` data registers of `width` wires each.
///
/// Returned handles are ordered by allocation index. A `width` of zero
/// yields empty placeholder handles and leaves the program untouched.
pub fn alloc_qregs<P: Program + ?Sized>(
    prog: &mut P,
    count: usize,
    width: u32,
    prefix: &str,
) -> QecResult<Vec<QuantumRegister>> {
    if width < 1 {
        return Ok(vec![QuantumRegister::placeholder(QregKind::Data); count]);
    }
    let mut regs = Vec::with_capacity(count);
    let mut skipped = 0;
    for i in 0..count {
        let name = free_name(prog, prefix, i, &mut skipped);
        regs.push(prog.add_qreg(QregKind::Data, &name, width)?);
    }
    Ok(regs)
}

/// Allocate `count` ancilla registers of `width` wires each.
///
/// A `width` of zero yields empty placeholder handles and leaves the
/// program untouched.
pub fn alloc_ancillas<P: Program + ?Sized>(
    prog: &mut P,
    count: usize,
    width: u32,
    prefix: &str,
) -> QecResult<Vec<QuantumRegister>> {
    if width < 1 {
        return Ok(vec![QuantumRegister::placeholder(QregKind::Ancilla); count]);
    }
    let mut regs = Vec::with_capacity(count);
    let mut skipped = 0;
    for i in 0..count {
        let name = free_name(prog, prefix, i, &mut skipped);
        regs.push(prog.add_qreg(QregKind::Ancilla, &name, width)?);
    }
    Ok(regs)
}

/// Allocate `count` classical registers of `width` bits each.
///
/// A `width` of zero yields empty placeholder handles and leaves the
/// program untouched.
pub fn alloc_cregs<P: Program + ?Sized>(
    prog: &mut P,
    count: usize,
    width: u32,
    prefix: &str,
) -> QecResult<Vec<ClassicalRegister>> {
    if width < 1 {
        return Ok(vec![ClassicalRegister::placeholder(); count]);
    }
    let mut regs = Vec::with_capacity(count);
    let mut skipped = 0;
    for i in 0..count {
        let name = free_name(prog, prefix, i, &mut skipped);
        regs.push(prog.add_creg(&name, width)?);
    }
    Ok(regs)
}
