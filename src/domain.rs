//! Brute-force quantification over `0..n`.
//!
//! Every quantifier and function search in the crate walks `(0..n)^k` in
//! lexicographic order, last coordinate fastest, so the first failing tuple
//! is also the smallest one.

use itertools::{repeat_n, Either, Itertools};

/// All `arity`-tuples over `0..n`. Arity 0 has exactly one (empty) tuple.
pub(crate) fn tuples(n: usize, arity: usize) -> impl Iterator<Item = Vec<usize>> {
    if arity == 0 {
        Either::Left(std::iter::once(Vec::new()))
    } else {
        Either::Right(repeat_n(0..n, arity).multi_cartesian_product())
    }
}

/// First tuple of `arity` carrier indices in `0..n` on which `holds` fails.
pub(crate) fn first_counterexample(
    n: usize,
    arity: usize,
    holds: impl Fn(&[usize]) -> bool,
) -> Option<Vec<usize>> {
    tuples(n, arity).find(|tuple| !holds(tuple))
}
