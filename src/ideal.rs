//! Substructures: subalgebras, invariant sets, ideals and prime ideals.
//!
//! Membership predicates check a candidate [`ElementSet`] against the
//! closure rules of its family. The generation algorithms compute the
//! smallest member of a family containing a seed by iterating to a fixpoint:
//!
//! ```text
//! T := {1}
//! while S ≠ ∅:
//!     T := T ∪ S
//!     S := step(T, S) \ T
//! ```
//!
//! `T` only grows and is bounded by the carrier, so the loop terminates.
//! `ideals` and `spec` enumerate the power set of the carrier and are only
//! meant for small algebras.

use itertools::Itertools;
use roaring::RoaringBitmap;
use tracing::{debug, warn};

use crate::config::EnumerationLimits;
use crate::core::Algebra;
use crate::error::{LAlgebraError, Result};
use crate::id::Elid;
use crate::subset::{left_multiply_bits, product_bits, right_multiply_bits, ElementSet};

/// Which reading of the third ideal clause to apply.
///
/// For `x ∈ I` and any `y`:
/// - `Strict`: `y·x ∈ I` **and** `y·(x·y) ∈ I` (Rump's definition)
/// - `Relaxed`: `y·x ∈ I` **or** `y·(x·y) ∈ I`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum IdealRule {
    #[default]
    Strict,
    Relaxed,
}

/// `NotASubset` unless `s` lives in `a`.
fn ensure_subset(s: &ElementSet, a: &Algebra) -> Result<()> {
    if s.algebra().same_instance(a) {
        return Ok(());
    }
    match s.iter().next() {
        Some(x) => Err(LAlgebraError::NotASubset {
            algebra: a.id(),
            element: x.value(),
        }),
        None => Ok(()),
    }
}

// ============ Membership ============

/// Contains the unit and is closed under `·`.
pub fn is_subalgebra(s: &ElementSet, a: &Algebra) -> Result<bool> {
    ensure_subset(s, a)?;
    if !s.contains_elid(a.unit()) {
        return Ok(false);
    }
    Ok(s
        .elids()
        .cartesian_product(s.elids().collect::<Vec<_>>())
        .all(|(x, y)| s.contains_elid(a.op(x, y))))
}

/// `x·y ∈ S` for every `x` in the algebra and `y ∈ S`.
pub fn is_invariant(s: &ElementSet, a: &Algebra) -> Result<bool> {
    ensure_subset(s, a)?;
    Ok((0..a.size()).all(|x| s.elids().all(|y| s.contains_elid(a.op(x, y)))))
}

/// [`is_ideal_with`] under [`IdealRule::Strict`].
pub fn is_ideal(s: &ElementSet, a: &Algebra) -> Result<bool> {
    is_ideal_with(s, a, IdealRule::Strict)
}

/// `1 ∈ I`, and for `x ∈ I` and every `y`:
/// (i) `x·y ∈ I ⟹ y ∈ I`, (ii) `(x·y)·y ∈ I`, (iii) per `rule`.
pub fn is_ideal_with(s: &ElementSet, a: &Algebra, rule: IdealRule) -> Result<bool> {
    ensure_subset(s, a)?;
    Ok(ideal_in(a, s, rule))
}

fn ideal_in(a: &Algebra, s: &ElementSet, rule: IdealRule) -> bool {
    if !s.contains_elid(a.unit()) {
        return false;
    }
    let inside = |e: Elid| s.contains_elid(e);
    s.elids().all(|x| {
        (0..a.size()).all(|y| {
            let xy = a.op(x, y);
            if inside(xy) && !inside(y) {
                return false;
            }
            if !inside(a.op(xy, y)) {
                return false;
            }
            let left = inside(a.op(y, x));
            let twisted = inside(a.op(y, xy));
            match rule {
                IdealRule::Strict => left && twisted,
                IdealRule::Relaxed => left || twisted,
            }
        })
    })
}

/// A proper ideal `p` such that `I·p ⊆ p` for every ideal `I ⊄ p`.
pub fn is_prime_ideal(p: &ElementSet, a: &Algebra) -> Result<bool> {
    if !is_ideal(p, a)? || p.is_full() {
        return Ok(false);
    }
    for ideal in ideals(a) {
        if ideal.bits().is_subset(p.bits()) {
            continue;
        }
        let product = ideal_product(&ideal, p)?;
        if !product.bits().is_subset(p.bits()) {
            return Ok(false);
        }
    }
    Ok(true)
}

// ============ Generation ============

/// `I·J = { x : ⟨x⟩ ∩ I ⊆ J }`, where `⟨x⟩` is the ideal generated by `x`.
pub fn ideal_product(i: &ElementSet, j: &ElementSet) -> Result<ElementSet> {
    if i.is_empty() || j.is_empty() {
        return Err(LAlgebraError::EmptySet(
            "both factors of an ideal product must be non-empty".to_string(),
        ));
    }
    i.algebra().ensure_same(j.algebra())?;
    let a = i.algebra();
    if !ideal_in(a, i, IdealRule::Strict) {
        return Err(LAlgebraError::NotAnIdeal(format!("left factor {}", i)));
    }
    if !ideal_in(a, j, IdealRule::Strict) {
        return Err(LAlgebraError::NotAnIdeal(format!("right factor {}", j)));
    }

    let bits = (0..a.size())
        .filter(|&x| {
            let generated = generate_ideal(a, single(x));
            (&generated & i.bits()).is_subset(j.bits())
        })
        .map(|x| x as u32)
        .collect();
    Ok(i.with_bits(bits))
}

/// Smallest subalgebra containing `s`.
pub fn subalgebra_generated_by(s: &ElementSet, a: &Algebra) -> Result<ElementSet> {
    ensure_subset(s, a)?;
    let mut closed = single(a.unit());
    let mut frontier = s.bits().clone();
    let mut rounds = 0usize;

    while !frontier.is_empty() {
        closed |= &frontier;
        let next = &product_bits(a, &closed, &frontier) | &product_bits(a, &frontier, &closed);
        frontier = next - &closed;
        rounds += 1;
    }

    debug!(rounds, size = closed.len(), "subalgebra closure reached fixpoint");
    Ok(ElementSet::from_elids(a, closed.iter().map(|e| e as Elid)))
}

/// Smallest ideal containing `s`.
pub fn ideal_generated_by(s: &ElementSet, a: &Algebra) -> Result<ElementSet> {
    ensure_subset(s, a)?;
    let closed = generate_ideal(a, s.bits().clone());
    Ok(ElementSet::from_elids(a, closed.iter().map(|e| e as Elid)))
}

/// One round composes all three ideal clauses on the frontier at once:
/// `(S·y)·y` and `y·(y·S)` for every `y`, then `A·S`, then every `y` with
/// some `x·y` already in the round's set.
fn generate_ideal(a: &Algebra, seed: RoaringBitmap) -> RoaringBitmap {
    let n = a.size();
    let carrier: RoaringBitmap = (0..n as u32).collect();
    let mut closed = single(a.unit());
    let mut frontier = seed;
    let mut rounds = 0usize;

    while !frontier.is_empty() {
        closed |= &frontier;

        let mut step = RoaringBitmap::new();
        for y in 0..n {
            step |= right_multiply_bits(a, &right_multiply_bits(a, &frontier, y), y);
            step |= left_multiply_bits(a, y, &left_multiply_bits(a, y, &frontier));
        }
        step |= product_bits(a, &carrier, &frontier);

        let outside = &carrier - &step;
        let pulled: RoaringBitmap = outside
            .iter()
            .filter(|&y| step.iter().any(|x| step.contains(a.op(x as Elid, y as Elid) as u32)))
            .collect();
        step |= pulled;

        frontier = step - &closed;
        rounds += 1;
    }

    debug!(rounds, size = closed.len(), "ideal closure reached fixpoint");
    closed
}

fn single(e: Elid) -> RoaringBitmap {
    let mut bits = RoaringBitmap::new();
    bits.insert(e as u32);
    bits
}

// ============ Enumeration ============

/// All ideals, in power-set order (by size, then lexicographically).
pub fn ideals(a: &Algebra) -> Vec<ElementSet> {
    ideals_with(a, IdealRule::Strict)
}

pub fn ideals_with(a: &Algebra, rule: IdealRule) -> Vec<ElementSet> {
    let n = a.size();
    if n > EnumerationLimits::default().max_subset_size {
        warn!(size = n, "enumerating all 2^{} subsets for ideals", n);
    }
    let found: Vec<ElementSet> = (0..n)
        .powerset()
        .map(|subset| ElementSet::from_elids(a, subset))
        .filter(|candidate| ideal_in(a, candidate, rule))
        .collect();
    debug!(size = n, ideals = found.len(), "ideal enumeration finished");
    found
}

/// [`ideals`] refusing carriers above `limits.max_subset_size`.
pub fn ideals_within(a: &Algebra, limits: &EnumerationLimits) -> Result<Vec<ElementSet>> {
    if a.size() > limits.max_subset_size {
        return Err(LAlgebraError::EnumerationTooLarge {
            what: "subset",
            size: a.size(),
            limit: limits.max_subset_size,
        });
    }
    Ok(ideals(a))
}

/// The prime spectrum: all prime ideals.
pub fn spec(a: &Algebra) -> Vec<ElementSet> {
    let all = ideals(a);
    let mut primes = Vec::new();
    for p in &all {
        if p.is_full() {
            continue;
        }
        let prime = all
            .iter()
            .filter(|i| !i.bits().is_subset(p.bits()))
            .all(|i| match ideal_product(i, p) {
                Ok(product) => product.bits().is_subset(p.bits()),
                Err(_) => false,
            });
        if prime {
            primes.push(p.clone());
        }
    }
    debug!(
        size = a.size(),
        primes = ?primes.iter().map(|p| p.values()).collect::<Vec<_>>(),
        "spectrum computed"
    );
    primes
}
