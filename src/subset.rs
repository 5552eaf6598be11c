//! Sets of elements of one algebra, and set-lifted multiplication.
//!
//! An [`ElementSet`] is bound to one algebra instance and stores its members
//! as a bitmap over carrier indices, so iteration is always in ascending
//! label order. Subalgebras, invariant sets and ideals are all `ElementSet`s.

use std::fmt;

use roaring::RoaringBitmap;

use crate::core::{Algebra, Element};
use crate::error::{LAlgebraError, Result};
use crate::id::{from_label, to_label, Elid};

#[derive(Clone)]
pub struct ElementSet {
    algebra: Algebra,
    bits: RoaringBitmap,
}

impl ElementSet {
    pub fn empty(algebra: &Algebra) -> Self {
        Self {
            algebra: algebra.clone(),
            bits: RoaringBitmap::new(),
        }
    }

    /// The whole carrier
    pub fn full(algebra: &Algebra) -> Self {
        Self::from_elids(algebra, 0..algebra.size())
    }

    /// Just the logical unit
    pub fn unit(algebra: &Algebra) -> Self {
        Self::from_elids(algebra, [algebra.unit()])
    }

    /// Collect elements of `algebra`; any element of another instance is
    /// reported as `NotASubset`.
    pub fn from_elements<'a>(
        algebra: &Algebra,
        elements: impl IntoIterator<Item = &'a Element>,
    ) -> Result<Self> {
        let mut set = Self::empty(algebra);
        for x in elements {
            if !x.algebra().same_instance(algebra) {
                return Err(LAlgebraError::NotASubset {
                    algebra: algebra.id(),
                    element: x.value(),
                });
            }
            set.bits.insert(x.elid() as u32);
        }
        Ok(set)
    }

    /// Collect a non-empty sequence of elements sharing one algebra.
    pub fn of(elements: &[Element]) -> Result<Self> {
        let first = elements
            .first()
            .ok_or_else(|| LAlgebraError::EmptySet("cannot infer the algebra".to_string()))?;
        let mut set = Self::empty(first.algebra());
        for x in elements {
            first.algebra().ensure_same(x.algebra())?;
            set.bits.insert(x.elid() as u32);
        }
        Ok(set)
    }

    /// From 1-based labels
    pub fn from_values(algebra: &Algebra, labels: &[usize]) -> Result<Self> {
        let mut set = Self::empty(algebra);
        for &label in labels {
            match from_label(label) {
                Some(e) if e < algebra.size() => {
                    set.bits.insert(e as u32);
                }
                _ => {
                    return Err(LAlgebraError::ElementOutOfRange {
                        label,
                        size: algebra.size(),
                    })
                }
            }
        }
        Ok(set)
    }

    pub(crate) fn from_elids(algebra: &Algebra, elids: impl IntoIterator<Item = Elid>) -> Self {
        Self {
            algebra: algebra.clone(),
            bits: elids.into_iter().map(|e| e as u32).collect(),
        }
    }

    pub fn algebra(&self) -> &Algebra {
        &self.algebra
    }

    pub fn len(&self) -> usize {
        self.bits.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Whether this set covers the whole carrier
    pub fn is_full(&self) -> bool {
        self.len() == self.algebra.size()
    }

    pub fn contains(&self, x: &Element) -> Result<bool> {
        self.algebra.ensure_same(x.algebra())?;
        Ok(self.contains_elid(x.elid()))
    }

    pub fn contains_value(&self, label: usize) -> bool {
        from_label(label).is_some_and(|e| self.contains_elid(e))
    }

    pub fn insert(&mut self, x: &Element) -> Result<bool> {
        self.algebra.ensure_same(x.algebra())?;
        Ok(self.bits.insert(x.elid() as u32))
    }

    pub fn union(&self, other: &ElementSet) -> Result<ElementSet> {
        self.algebra.ensure_same(&other.algebra)?;
        Ok(self.with_bits(&self.bits | &other.bits))
    }

    pub fn intersection(&self, other: &ElementSet) -> Result<ElementSet> {
        self.algebra.ensure_same(&other.algebra)?;
        Ok(self.with_bits(&self.bits & &other.bits))
    }

    pub fn difference(&self, other: &ElementSet) -> Result<ElementSet> {
        self.algebra.ensure_same(&other.algebra)?;
        Ok(self.with_bits(&self.bits - &other.bits))
    }

    pub fn is_subset(&self, other: &ElementSet) -> Result<bool> {
        self.algebra.ensure_same(&other.algebra)?;
        Ok(self.bits.is_subset(&other.bits))
    }

    /// Members in ascending label order
    pub fn iter(&self) -> impl Iterator<Item = Element> + '_ {
        self.elids().map(|e| self.algebra.element_at(e))
    }

    /// Member labels in ascending order
    pub fn values(&self) -> Vec<usize> {
        self.elids().map(to_label).collect()
    }

    // ---- carrier-index helpers for the substructure engine ----

    pub(crate) fn elids(&self) -> impl Iterator<Item = Elid> + '_ {
        self.bits.iter().map(|e| e as Elid)
    }

    #[inline]
    pub(crate) fn contains_elid(&self, e: Elid) -> bool {
        self.bits.contains(e as u32)
    }

    pub(crate) fn bits(&self) -> &RoaringBitmap {
        &self.bits
    }

    pub(crate) fn with_bits(&self, bits: RoaringBitmap) -> ElementSet {
        ElementSet {
            algebra: self.algebra.clone(),
            bits,
        }
    }
}

impl PartialEq for ElementSet {
    fn eq(&self, other: &Self) -> bool {
        self.algebra.same_instance(&other.algebra) && self.bits == other.bits
    }
}

impl Eq for ElementSet {}

impl fmt::Debug for ElementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.values()).finish()
    }
}

impl fmt::Display for ElementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, v) in self.values().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "}}")
    }
}

// ============ Set-lifted multiplication ============

/// `S·T = { s·t : s ∈ S, t ∈ T }`
pub fn product_of_sets(s: &ElementSet, t: &ElementSet) -> Result<ElementSet> {
    s.algebra.ensure_same(&t.algebra)?;
    let a = &s.algebra;
    let bits = s
        .elids()
        .flat_map(|x| t.elids().map(move |y| a.op(x, y) as u32))
        .collect();
    Ok(s.with_bits(bits))
}

/// `S·x = { s·x : s ∈ S }`
pub fn right_multiply_set(s: &ElementSet, x: &Element) -> Result<ElementSet> {
    s.algebra.ensure_same(x.algebra())?;
    let bits = s.elids().map(|e| s.algebra.op(e, x.elid()) as u32).collect();
    Ok(s.with_bits(bits))
}

/// `x·S = { x·s : s ∈ S }`
pub fn left_multiply_set(x: &Element, s: &ElementSet) -> Result<ElementSet> {
    s.algebra.ensure_same(x.algebra())?;
    let bits = s.elids().map(|e| s.algebra.op(x.elid(), e) as u32).collect();
    Ok(s.with_bits(bits))
}

/// Carrier-index versions, for callers that already hold one algebra.
pub(crate) fn product_bits(a: &Algebra, s: &RoaringBitmap, t: &RoaringBitmap) -> RoaringBitmap {
    s.iter()
        .flat_map(|x| t.iter().map(move |y| a.op(x as Elid, y as Elid) as u32))
        .collect()
}

pub(crate) fn right_multiply_bits(a: &Algebra, s: &RoaringBitmap, y: Elid) -> RoaringBitmap {
    s.iter().map(|x| a.op(x as Elid, y) as u32).collect()
}

pub(crate) fn left_multiply_bits(a: &Algebra, y: Elid, s: &RoaringBitmap) -> RoaringBitmap {
    s.iter().map(|x| a.op(y, x as Elid) as u32).collect()
}
