//! Core representation: tables, algebras and elements.
//!
//! An [`Algebra`] is an immutable, cheaply clonable handle around a square
//! multiplication [`Table`]. Cloning the handle keeps the instance identity;
//! building a new algebra (even from an identical table) mints a new one.
//! An [`Element`] is a carrier index tagged with its owning algebra, and every
//! binary element operation refuses operands from different instances.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rand::Rng;

use crate::error::{LAlgebraError, Result};
use crate::id::{fresh_algebra_id, from_label, to_label, AlgebraId, Elid};
use crate::validate::{shape_violation, validate_rows, validate_table, CheckResult};

// ============ Tables ============

/// A square multiplication table, stored row-major with 0-based entries.
///
/// `get(x, y)` is the carrier index of `x·y`. The 1-based view used by
/// callers is available through [`Table::from_rows`] and [`Table::rows`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Table {
    size: usize,
    entries: Vec<Elid>,
}

impl Table {
    /// Build from 1-based rows. Rejects anything that cannot be indexed
    /// (empty, ragged, or entries outside `1..=n`); does NOT check axioms.
    pub fn from_rows(rows: &[Vec<usize>]) -> Result<Self> {
        if let Some(v) = shape_violation(rows) {
            return Err(LAlgebraError::MalformedTable(v.to_string()));
        }
        let size = rows.len();
        let entries = rows.iter().flatten().map(|&e| e - 1).collect();
        Ok(Self { size, entries })
    }

    /// Build from a 0-based function on carrier indices.
    pub(crate) fn from_fn(size: usize, f: impl Fn(Elid, Elid) -> Elid) -> Self {
        let mut entries = Vec::with_capacity(size * size);
        for x in 0..size {
            for y in 0..size {
                let e = f(x, y);
                debug_assert!(e < size, "table entry out of range");
                entries.push(e);
            }
        }
        Self { size, entries }
    }

    /// Build from flat 0-based entries (catalog storage format).
    pub(crate) fn from_flat(size: usize, entries: Vec<Elid>) -> Result<Self> {
        if size == 0 || entries.len() != size * size {
            return Err(LAlgebraError::MalformedTable(format!(
                "{} entries cannot form a {}x{} table",
                entries.len(),
                size,
                size
            )));
        }
        if let Some(&bad) = entries.iter().find(|&&e| e >= size) {
            return Err(LAlgebraError::MalformedTable(format!(
                "entry {} out of range for size {}",
                bad + 1,
                size
            )));
        }
        Ok(Self { size, entries })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// `x·y` on carrier indices
    #[inline]
    pub fn get(&self, x: Elid, y: Elid) -> Elid {
        self.entries[x * self.size + y]
    }

    /// The 1-based rows
    pub fn rows(&self) -> Vec<Vec<usize>> {
        self.entries
            .chunks(self.size)
            .map(|row| row.iter().map(|&e| to_label(e)).collect())
            .collect()
    }

    pub(crate) fn flat(&self) -> &[Elid] {
        &self.entries
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rows()).finish()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.size.to_string().len();
        for (i, row) in self.rows().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, e) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>width$}", e, width = width)?;
            }
        }
        Ok(())
    }
}

// ============ Algebras ============

struct AlgebraInner {
    id: AlgebraId,
    table: Table,
}

/// A finite L-algebra.
///
/// Equality and hashing are by table value. Instance identity, which element
/// operations require, is [`Algebra::id`].
#[derive(Clone)]
pub struct Algebra {
    inner: Arc<AlgebraInner>,
}

impl Algebra {
    /// Construct from 1-based rows. With `check`, the table must pass
    /// [`validate_rows`](crate::validate::validate_rows); without it only the
    /// shape is checked and the axioms are the caller's responsibility.
    pub fn new(rows: &[Vec<usize>], check: bool) -> Result<Self> {
        if check {
            if let CheckResult::Violated(violation) = validate_rows(rows) {
                return Err(LAlgebraError::InvalidAlgebra {
                    table: rows.to_vec(),
                    violation,
                });
            }
        }
        Ok(Self::from_table_unchecked(Table::from_rows(rows)?))
    }

    /// Construct from an existing table, optionally checking the axioms.
    pub fn from_table(table: Table, check: bool) -> Result<Self> {
        if check {
            if let CheckResult::Violated(violation) = validate_table(&table) {
                return Err(LAlgebraError::InvalidAlgebra {
                    table: table.rows(),
                    violation,
                });
            }
        }
        Ok(Self::from_table_unchecked(table))
    }

    pub(crate) fn from_table_unchecked(table: Table) -> Self {
        Self {
            inner: Arc::new(AlgebraInner {
                id: fresh_algebra_id(),
                table,
            }),
        }
    }

    /// The one-element algebra
    pub fn trivial() -> Self {
        Self::from_table_unchecked(Table::from_fn(1, |_, _| 0))
    }

    /// The unique two-element algebra, `[[2, 2], [1, 2]]`
    pub fn boolean2() -> Self {
        Self::from_table_unchecked(Table::from_fn(2, |x, y| if x <= y { 1 } else { y }))
    }

    /// The Gödel chain `1 < 2 < … < n`: `x·y = n` if `x ≤ y`, else `y`.
    pub fn chain(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(LAlgebraError::MalformedTable("empty chain".to_string()));
        }
        let top = n - 1;
        Ok(Self::from_table_unchecked(Table::from_fn(n, |x, y| {
            if x <= y {
                top
            } else {
                y
            }
        })))
    }

    /// The Łukasiewicz chain on `n` elements: `x·y = min(n, n - x + y)`.
    pub fn lukasiewicz(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(LAlgebraError::MalformedTable("empty chain".to_string()));
        }
        let top = n - 1;
        Ok(Self::from_table_unchecked(Table::from_fn(n, |x, y| {
            (top + y).saturating_sub(x).min(top)
        })))
    }

    /// Instance identity
    pub fn id(&self) -> AlgebraId {
        self.inner.id
    }

    /// Whether `other` is this very instance (not merely an equal table)
    pub fn same_instance(&self, other: &Algebra) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn table(&self) -> &Table {
        &self.inner.table
    }

    pub fn size(&self) -> usize {
        self.inner.table.size()
    }

    /// All elements in ascending label order
    pub fn elements(&self) -> Vec<Element> {
        (0..self.size()).map(|e| self.element_at(e)).collect()
    }

    /// Element by 1-based label
    pub fn element(&self, label: usize) -> Result<Element> {
        match from_label(label) {
            Some(e) if e < self.size() => Ok(self.element_at(e)),
            _ => Err(LAlgebraError::ElementOutOfRange {
                label,
                size: self.size(),
            }),
        }
    }

    pub fn logical_unit(&self) -> Element {
        self.element_at(self.unit())
    }

    /// Uniformly sampled element
    pub fn random_element<R: Rng + ?Sized>(&self, rng: &mut R) -> Element {
        self.element_at(rng.random_range(0..self.size()))
    }

    /// Relabel: position `k` of the result holds old element `perm[k]`.
    /// `perm` must be a permutation of `0..n`.
    pub(crate) fn permuted(&self, perm: &[Elid]) -> Algebra {
        let n = self.size();
        let mut inverse = vec![0; n];
        for (new, &old) in perm.iter().enumerate() {
            inverse[old] = new;
        }
        Algebra::from_table_unchecked(Table::from_fn(n, |x, y| {
            inverse[self.op(perm[x], perm[y])]
        }))
    }

    /// Relabel by a 1-based permutation: position `k` of the result holds
    /// old element `perm[k-1]`.
    pub fn relabeled(&self, perm: &[usize]) -> Result<Algebra> {
        let n = self.size();
        let mut seen = vec![false; n];
        let mut elids = Vec::with_capacity(n);
        for &label in perm {
            match from_label(label) {
                Some(e) if e < n && !seen[e] => {
                    seen[e] = true;
                    elids.push(e);
                }
                _ => {
                    return Err(LAlgebraError::InvalidMorphism(format!(
                        "{:?} is not a permutation of 1..={}",
                        perm, n
                    )))
                }
            }
        }
        if elids.len() != n {
            return Err(LAlgebraError::InvalidMorphism(format!(
                "{:?} is not a permutation of 1..={}",
                perm, n
            )));
        }
        Ok(self.permuted(&elids))
    }

    // ---- carrier-index fast paths used by the oracle and engines ----

    pub(crate) fn element_at(&self, elid: Elid) -> Element {
        Element {
            algebra: self.clone(),
            elid,
        }
    }

    #[inline]
    pub(crate) fn unit(&self) -> Elid {
        self.inner.table.get(0, 0)
    }

    #[inline]
    pub(crate) fn op(&self, x: Elid, y: Elid) -> Elid {
        self.inner.table.get(x, y)
    }

    #[inline]
    pub(crate) fn leq(&self, x: Elid, y: Elid) -> bool {
        self.op(x, y) == self.unit()
    }

    pub(crate) fn ensure_same(&self, other: &Algebra) -> Result<()> {
        if self.same_instance(other) {
            Ok(())
        } else {
            Err(LAlgebraError::CrossAlgebraMismatch {
                left: self.id(),
                right: other.id(),
            })
        }
    }
}

impl PartialEq for Algebra {
    fn eq(&self, other: &Self) -> bool {
        self.same_instance(other) || self.table() == other.table()
    }
}

impl Eq for Algebra {}

impl Hash for Algebra {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.table().hash(state);
    }
}

impl fmt::Debug for Algebra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Algebra")
            .field("size", &self.size())
            .field("table", self.table())
            .finish()
    }
}

impl fmt::Display for Algebra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table())
    }
}

// ============ Elements ============

/// An element of a specific algebra instance.
///
/// `==` compares the (instance, value) pair and is what collections use.
/// The algebra-level comparisons ([`Element::equals`], [`Element::le`], …)
/// instead fail with `CrossAlgebraMismatch` on foreign operands.
#[derive(Clone)]
pub struct Element {
    algebra: Algebra,
    elid: Elid,
}

impl Element {
    pub fn algebra(&self) -> &Algebra {
        &self.algebra
    }

    /// 1-based label
    pub fn value(&self) -> usize {
        to_label(self.elid)
    }

    pub(crate) fn elid(&self) -> Elid {
        self.elid
    }

    pub fn is_unit(&self) -> bool {
        self.elid == self.algebra.unit()
    }

    /// `self·other`
    pub fn multiply(&self, other: &Element) -> Result<Element> {
        self.algebra.ensure_same(&other.algebra)?;
        Ok(self.algebra.element_at(self.algebra.op(self.elid, other.elid)))
    }

    pub fn equals(&self, other: &Element) -> Result<bool> {
        self.algebra.ensure_same(&other.algebra)?;
        Ok(self.elid == other.elid)
    }

    pub fn not_equals(&self, other: &Element) -> Result<bool> {
        self.equals(other).map(|eq| !eq)
    }

    /// `self ≤ other`, i.e. `self·other` is the logical unit
    pub fn le(&self, other: &Element) -> Result<bool> {
        Ok(self.multiply(other)?.is_unit())
    }

    pub fn lt(&self, other: &Element) -> Result<bool> {
        Ok(self.le(other)? && self.not_equals(other)?)
    }

    pub fn ge(&self, other: &Element) -> Result<bool> {
        other.le(self)
    }

    pub fn gt(&self, other: &Element) -> Result<bool> {
        other.lt(self)
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.algebra.same_instance(&other.algebra) && self.elid == other.elid
    }
}

impl Eq for Element {}

impl Hash for Element {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.algebra.id().hash(state);
        self.elid.hash(state);
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Element({})", self.value())
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
