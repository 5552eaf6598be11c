//! Axiom checking for multiplication tables.
//!
//! A table `M` (1-based, row-major, `M[i][j] = i·j`) is an L-algebra when,
//! with `u = M[1][1]`:
//!
//! ```text
//! u·x = x        x·u = u        x·x = u             (logical unit)
//! x·y = y·x = u  ⟹  x = y                            (antisymmetry)
//! (x·y)·(x·z) = (y·x)·(y·z)                          (L-algebra identity)
//! ```
//!
//! The checks run in that order and stop at the first failure, which is
//! reported as an [`AxiomViolation`] naming the witnesses.

use std::fmt;

use crate::core::Table;
use crate::id::{to_label, Elid};

/// The first axiom a table was found to violate. Labels are 1-based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AxiomViolation {
    /// Zero rows
    Empty,
    /// Row `row` has `len` entries instead of `expected`
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    /// Entry at (`row`, `col`) is not a label in `1..=n`
    EntryOutOfRange { row: usize, col: usize, entry: usize },
    /// `u·x ≠ x`
    UnitNotLeftNeutral { x: usize },
    /// `x·u ≠ u`
    UnitNotAbsorbing { x: usize },
    /// `x·x ≠ u`
    NotReflexive { x: usize },
    /// `x·y = y·x = u` with `x ≠ y`
    NotAntisymmetric { x: usize, y: usize },
    /// `(x·y)·(x·z) ≠ (y·x)·(y·z)`
    LIdentity { x: usize, y: usize, z: usize },
}

impl fmt::Display for AxiomViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxiomViolation::Empty => write!(f, "empty table"),
            AxiomViolation::NotSquare { row, len, expected } => {
                write!(f, "row {} has {} entries, expected {}", row, len, expected)
            }
            AxiomViolation::EntryOutOfRange { row, col, entry } => {
                write!(f, "entry {} at ({}, {}) is out of range", entry, row, col)
            }
            AxiomViolation::UnitNotLeftNeutral { x } => write!(f, "u·{} ≠ {}", x, x),
            AxiomViolation::UnitNotAbsorbing { x } => write!(f, "{}·u ≠ u", x),
            AxiomViolation::NotReflexive { x } => write!(f, "{}·{} ≠ u", x, x),
            AxiomViolation::NotAntisymmetric { x, y } => {
                write!(f, "{}·{} = {}·{} = u but {} ≠ {}", x, y, y, x, x, y)
            }
            AxiomViolation::LIdentity { x, y, z } => write!(
                f,
                "({x}·{y})·({x}·{z}) ≠ ({y}·{x})·({y}·{z})",
                x = x,
                y = y,
                z = z
            ),
        }
    }
}

/// Result of checking a table
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckResult {
    /// Every axiom holds
    Satisfied,
    /// The first violated axiom
    Violated(AxiomViolation),
}

impl CheckResult {
    pub fn is_satisfied(&self) -> bool {
        matches!(self, CheckResult::Satisfied)
    }

    pub fn violation(&self) -> Option<&AxiomViolation> {
        match self {
            CheckResult::Satisfied => None,
            CheckResult::Violated(v) => Some(v),
        }
    }
}

/// Shape pass: square, non-empty, entries in `1..=n`.
pub(crate) fn shape_violation(rows: &[Vec<usize>]) -> Option<AxiomViolation> {
    let n = rows.len();
    if n == 0 {
        return Some(AxiomViolation::Empty);
    }
    for (i, row) in rows.iter().enumerate() {
        if row.len() != n {
            return Some(AxiomViolation::NotSquare {
                row: i + 1,
                len: row.len(),
                expected: n,
            });
        }
        for (j, &entry) in row.iter().enumerate() {
            if entry == 0 || entry > n {
                return Some(AxiomViolation::EntryOutOfRange {
                    row: i + 1,
                    col: j + 1,
                    entry,
                });
            }
        }
    }
    None
}

/// Check raw 1-based rows against every axiom.
pub fn validate_rows(rows: &[Vec<usize>]) -> CheckResult {
    if let Some(v) = shape_violation(rows) {
        return CheckResult::Violated(v);
    }
    match Table::from_rows(rows) {
        Ok(table) => validate_table(&table),
        // Unreachable after the shape pass, but never panic on input
        Err(_) => CheckResult::Violated(AxiomViolation::Empty),
    }
}

/// Check an already well-shaped table against the algebraic axioms.
pub fn validate_table(table: &Table) -> CheckResult {
    match first_violation(table) {
        None => CheckResult::Satisfied,
        Some(v) => CheckResult::Violated(v),
    }
}

/// Boolean view of [`validate_rows`].
pub fn check_algebra(rows: &[Vec<usize>]) -> bool {
    validate_rows(rows).is_satisfied()
}

fn first_violation(table: &Table) -> Option<AxiomViolation> {
    let n = table.size();
    if n == 0 {
        return Some(AxiomViolation::Empty);
    }
    let u = table.get(0, 0);
    let m = |x: Elid, y: Elid| table.get(x, y);

    for x in 0..n {
        if m(u, x) != x {
            return Some(AxiomViolation::UnitNotLeftNeutral { x: to_label(x) });
        }
        if m(x, u) != u {
            return Some(AxiomViolation::UnitNotAbsorbing { x: to_label(x) });
        }
        if m(x, x) != u {
            return Some(AxiomViolation::NotReflexive { x: to_label(x) });
        }
    }

    for x in 0..n {
        for y in (x + 1)..n {
            if m(x, y) == u && m(y, x) == u {
                return Some(AxiomViolation::NotAntisymmetric {
                    x: to_label(x),
                    y: to_label(y),
                });
            }
        }
    }

    // The identity is symmetric in (x, y), so y > x suffices
    for x in 0..n {
        for y in (x + 1)..n {
            let xy = m(x, y);
            let yx = m(y, x);
            for z in 0..n {
                if m(xy, m(x, z)) != m(yx, m(y, z)) {
                    return Some(AxiomViolation::LIdentity {
                        x: to_label(x),
                        y: to_label(y),
                        z: to_label(z),
                    });
                }
            }
        }
    }

    None
}
