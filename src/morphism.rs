//! Morphisms between L-algebras.
//!
//! A map `f: A → B` is given as a vector of 1-based images, `f[i-1]` being
//! the image of element `i`. It is a morphism when `f(x·y) = f(x)·f(y)` for
//! all `x, y`. Every morphism sends the unit to the unit (`f(1) = f(x·x) =
//! f(x)·f(x) = 1`), which the searches below use to fix one image up front.

use itertools::Itertools;
use tracing::{debug, warn};

use crate::config::EnumerationLimits;
use crate::core::Algebra;
use crate::domain::tuples;
use crate::error::{LAlgebraError, Result};
use crate::id::{from_label, to_labels, Elid};

/// Whether the 1-based map `f` is a morphism `a → b`.
///
/// A map of the wrong length is an error; images outside `b` just mean
/// "not a morphism".
pub fn is_morphism(f: &[usize], a: &Algebra, b: &Algebra) -> Result<bool> {
    if f.len() != a.size() {
        return Err(LAlgebraError::InvalidMorphism(format!(
            "map has {} images, domain has {} elements",
            f.len(),
            a.size()
        )));
    }
    let mut images = Vec::with_capacity(f.len());
    for &label in f {
        match from_label(label) {
            Some(e) if e < b.size() => images.push(e),
            _ => return Ok(false),
        }
    }
    Ok(is_morphism_elids(&images, a, b))
}

pub(crate) fn is_morphism_elids(f: &[Elid], a: &Algebra, b: &Algebra) -> bool {
    let n = a.size();
    (0..n).all(|x| (0..n).all(|y| f[a.op(x, y)] == b.op(f[x], f[y])))
}

/// All endomorphisms of `a`, in lexicographic order of their images.
///
/// The candidates fix the logical unit, wherever it sits in the table, and
/// let the other `n-1` images range over the whole carrier: `n^(n-1)` maps.
/// For tables with the unit last (catalog and normal-form tables) this is
/// the same as fixing `f(n) = n`.
pub fn endomorphisms(a: &Algebra) -> Vec<Vec<usize>> {
    let n = a.size();
    if n > EnumerationLimits::default().max_function_size {
        warn!(size = n, "enumerating {}^{} candidate endomorphisms", n, n - 1);
    }
    let u = a.unit();
    let mut found = Vec::new();
    for free in tuples(n, n - 1) {
        let mut f = Vec::with_capacity(n);
        let mut rest = free.into_iter();
        for x in 0..n {
            if x == u {
                f.push(u);
            } else if let Some(image) = rest.next() {
                f.push(image);
            }
        }
        if is_morphism_elids(&f, a, a) {
            found.push(to_labels(&f));
        }
    }
    debug!(size = n, endomorphisms = found.len(), "endomorphism search finished");
    found
}

/// [`endomorphisms`] refusing carriers above `limits.max_function_size`.
pub fn endomorphisms_within(a: &Algebra, limits: &EnumerationLimits) -> Result<Vec<Vec<usize>>> {
    if a.size() > limits.max_function_size {
        return Err(LAlgebraError::EnumerationTooLarge {
            what: "function",
            size: a.size(),
            limit: limits.max_function_size,
        });
    }
    Ok(endomorphisms(a))
}

/// Bijective endomorphisms
pub fn automorphisms(a: &Algebra) -> Vec<Vec<usize>> {
    find_isomorphisms(a, a)
}

/// Some isomorphism `a → b`, if the two are isomorphic.
pub fn find_isomorphism(a: &Algebra, b: &Algebra) -> Option<Vec<usize>> {
    isomorphisms(a, b).next()
}

pub fn is_isomorphic(a: &Algebra, b: &Algebra) -> bool {
    find_isomorphism(a, b).is_some()
}

fn find_isomorphisms(a: &Algebra, b: &Algebra) -> Vec<Vec<usize>> {
    isomorphisms(a, b).collect()
}

/// Bijections `a → b` respecting `·`, unit to unit, in lexicographic order.
fn isomorphisms<'a>(a: &'a Algebra, b: &'a Algebra) -> impl Iterator<Item = Vec<usize>> + 'a {
    let n = a.size();
    let same_size = n == b.size();
    let (ua, ub) = (a.unit(), b.unit());
    (0..n)
        .permutations(n)
        .take_while(move |_| same_size)
        .filter(move |f| f[ua] == ub && is_morphism_elids(f, a, b))
        .map(|f| to_labels(&f))
}
