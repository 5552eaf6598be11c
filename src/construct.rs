//! Building new algebras from old ones.
//!
//! # Pair encoding
//!
//! Products over `a` (size `m`) and `b` (size `n`) place the pair
//! `(a_i, b_j)` at label `n*(i-1) + j`: the first factor's coordinate is
//! the major one and the second varies fastest. For equal sizes this is
//! `m*(i-1) + j`. Direct and semidirect products share this layout, so the
//! semidirect product with the trivial action *is* the direct product.
//!
//! # Semidirect product
//!
//! Given an action `ρ` of `b` on `a` (see [`is_action`]), the product on
//! pairs is
//!
//! ```text
//! (x, s)·(y, t) = (ρ_s(x·y), s·t)
//! ```
//!
//! The L-algebra identity and the unit laws follow from `ρ` being a family of
//! morphisms with `ρ_1 = id` and `ρ_{s·t}∘ρ_s = ρ_{t·s}∘ρ_t`. Antisymmetry
//! additionally needs each `ρ_s` to be injective, so the result is validated
//! before it is returned.
//!
//! # Normal form
//!
//! [`normal_form`] sorts elements by how many times the unit appears in their
//! column. It is a cheap canonical presentation, not an isomorphism-complete
//! one: isomorphic algebras whose unit counts tie may still normalize to
//! different tables.

use tracing::debug;

use crate::core::{Algebra, Table};
use crate::error::{ActionViolation, LAlgebraError, Result};
use crate::id::{from_label, to_label, Elid};
use crate::morphism::is_morphism_elids;
use crate::validate::{validate_table, CheckResult};

// ============ Direct products ============

/// `a × b`, with the second factor's coordinate varying fastest.
///
/// A one-element factor is a multiplicative unit for `×`: the other factor
/// is returned as is (same instance).
pub fn direct_product(a: &Algebra, b: &Algebra) -> Algebra {
    if a.size() == 1 {
        return b.clone();
    }
    if b.size() == 1 {
        return a.clone();
    }
    let n = b.size();
    let table = Table::from_fn(a.size() * n, |p, q| {
        let (x, s) = (p / n, p % n);
        let (y, t) = (q / n, q % n);
        n * a.op(x, y) + b.op(s, t)
    });
    Algebra::from_table_unchecked(table)
}

/// Left fold of [`direct_product`] starting from the trivial algebra.
pub fn direct_product_all(algebras: &[Algebra]) -> Algebra {
    algebras
        .iter()
        .fold(Algebra::trivial(), |acc, next| direct_product(&acc, next))
}

/// Split a product label into its factor labels `(i, j)`, given the size
/// of the second factor.
pub fn product_coordinates(label: usize, second_size: usize) -> Option<(usize, usize)> {
    if second_size == 0 {
        return None;
    }
    let p = from_label(label)?;
    Some((to_label(p / second_size), to_label(p % second_size)))
}

// ============ Actions ============

/// Check that `rho` is an action of `a` on `b`.
///
/// `rho[s-1]` is a 1-based map `b → b` for each element `s` of `a`. An action
/// needs one slot per element of `a`, every slot a morphism of `b`, the unit's
/// slot the identity, and for all `u, v` in `a` and `i` in `b`:
///
/// ```text
/// ρ_{u·v}(ρ_u(i)) = ρ_{v·u}(ρ_v(i))
/// ```
///
/// Returns the first violation, naming its witnesses.
pub fn is_action(a: &Algebra, b: &Algebra, rho: &[Vec<usize>]) -> Result<()> {
    action_slots(a, b, rho).map(|_| ())
}

/// Validate and convert `rho` to carrier indices.
fn action_slots(a: &Algebra, b: &Algebra, rho: &[Vec<usize>]) -> Result<Vec<Vec<Elid>>> {
    if rho.len() != a.size() {
        return Err(ActionViolation::WrongLength {
            expected: a.size(),
            got: rho.len(),
        }
        .into());
    }

    let mut slots = Vec::with_capacity(rho.len());
    for (s, map) in rho.iter().enumerate() {
        if map.len() != b.size() {
            return Err(ActionViolation::SlotLength {
                slot: to_label(s),
                expected: b.size(),
                got: map.len(),
            }
            .into());
        }
        let images: Option<Vec<Elid>> = map
            .iter()
            .map(|&label| from_label(label).filter(|&e| e < b.size()))
            .collect();
        match images {
            Some(images) if is_morphism_elids(&images, b, b) => slots.push(images),
            _ => return Err(ActionViolation::NotAMorphism { slot: to_label(s) }.into()),
        }
    }

    if let Some(at) = (0..b.size()).find(|&i| slots[a.unit()][i] != i) {
        return Err(ActionViolation::UnitNotIdentity { at: to_label(at) }.into());
    }

    for u in 0..a.size() {
        for v in 0..a.size() {
            let (uv, vu) = (a.op(u, v), a.op(v, u));
            for i in 0..b.size() {
                if slots[uv][slots[u][i]] != slots[vu][slots[v][i]] {
                    return Err(ActionViolation::Incoherent {
                        u: to_label(u),
                        v: to_label(v),
                        i: to_label(i),
                    }
                    .into());
                }
            }
        }
    }

    Ok(slots)
}

/// The semidirect product of `a` by an action `rho` of `b` on `a`.
///
/// Fails with `InvalidAction` unless `is_action(b, a, rho)` holds, and with
/// `InvalidAlgebra` if the resulting table is not an L-algebra (which
/// happens when some `ρ_s` is not injective).
pub fn semidirect_product(a: &Algebra, b: &Algebra, rho: &[Vec<usize>]) -> Result<Algebra> {
    let slots = action_slots(b, a, rho)?;
    let n = b.size();
    let table = Table::from_fn(a.size() * n, |p, q| {
        let (x, s) = (p / n, p % n);
        let (y, t) = (q / n, q % n);
        n * slots[s][a.op(x, y)] + b.op(s, t)
    });

    if let CheckResult::Violated(violation) = validate_table(&table) {
        return Err(LAlgebraError::InvalidAlgebra {
            table: table.rows(),
            violation,
        });
    }
    Ok(Algebra::from_table_unchecked(table))
}

// ============ Normal form ============

/// The reordering used by [`normal_form`], as 1-based labels: position `k`
/// of the normal form holds element `perm[k-1]` of `a`.
pub fn normal_form_permutation(a: &Algebra) -> Vec<usize> {
    normal_order(a).into_iter().map(to_label).collect()
}

fn normal_order(a: &Algebra) -> Vec<Elid> {
    let n = a.size();
    let u = a.unit();
    let unit_counts: Vec<usize> = (0..n)
        .map(|col| (0..n).filter(|&row| a.op(row, col) == u).count())
        .collect();
    let mut order: Vec<Elid> = (0..n).collect();
    // Stable, so ties keep their current relative order
    order.sort_by_key(|&e| unit_counts[e]);
    order
}

/// Rows, columns and entries permuted by [`normal_form_permutation`].
///
/// The unit's column is all units, so the unit always ends up last.
pub fn normal_form(a: &Algebra) -> Algebra {
    let order = normal_order(a);
    debug!(order = ?order, "normal form permutation");
    a.permuted(&order)
}
