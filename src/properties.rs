//! Structural properties of L-algebras.
//!
//! Each property is a closed first-order condition checked by brute force
//! over the carrier: `O(n^k)` for a `k`-variable condition, `n^4` at worst
//! (abelian). That is fine for the sizes the catalog covers.
//!
//! | Property    | Condition (∀ variables)                     |
//! |-------------|---------------------------------------------|
//! | sharp       | x·y = x·(x·y)                               |
//! | symmetric   | x·y = y ⟹ y·x = x                          |
//! | abelian     | (x·y)·(z·t) = (x·z)·(y·t)                   |
//! | linear      | x ≤ y ∨ y ≤ x                               |
//! | discrete    | x < y ⟹ y = 1                              |
//! | semiregular | ((x·y)·z)·((y·x)·z) = ((x·y)·z)·z           |
//! | regular     | semiregular ∧ (x ≤ y ⟹ ∃z. z·x = y)        |
//! | hilbert     | x·(y·z) = (x·y)·(x·z)                       |
//! | dual BCK    | x·(y·z) = (y·x)·z                           |
//! | KL          | x ≤ y·x                                     |
//! | CL          | (x·(y·z))·(y·(x·z)) = 1                     |
//! | prime       | every p ≠ 1 has x ≤ p ∨ x·p = p for all x   |

use std::fmt;

use crate::core::{Algebra, Element};
use crate::domain::first_counterexample;
use crate::id::{to_labels, Elid};

/// The named properties
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    Sharp,
    Symmetric,
    Abelian,
    Linear,
    Discrete,
    Semiregular,
    Regular,
    Hilbert,
    DualBck,
    Kl,
    Cl,
    Prime,
}

impl Property {
    pub const ALL: [Property; 12] = [
        Property::Sharp,
        Property::Symmetric,
        Property::Abelian,
        Property::Linear,
        Property::Discrete,
        Property::Semiregular,
        Property::Regular,
        Property::Hilbert,
        Property::DualBck,
        Property::Kl,
        Property::Cl,
        Property::Prime,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Property::Sharp => "sharp",
            Property::Symmetric => "symmetric",
            Property::Abelian => "abelian",
            Property::Linear => "linear",
            Property::Discrete => "discrete",
            Property::Semiregular => "semiregular",
            Property::Regular => "regular",
            Property::Hilbert => "hilbert",
            Property::DualBck => "dualBCK",
            Property::Kl => "KL",
            Property::Cl => "CL",
            Property::Prime => "prime",
        }
    }

    pub fn holds(&self, a: &Algebra) -> bool {
        self.counterexample(a).is_none()
    }

    /// First violating assignment in carrier indices, if any.
    fn counterexample(&self, a: &Algebra) -> Option<Vec<Elid>> {
        let n = a.size();
        let u = a.unit();
        let m = |x: Elid, y: Elid| a.op(x, y);
        match self {
            Property::Sharp => first_counterexample(n, 2, |v| {
                let (x, y) = (v[0], v[1]);
                m(x, y) == m(x, m(x, y))
            }),
            Property::Symmetric => first_counterexample(n, 2, |v| {
                let (x, y) = (v[0], v[1]);
                m(x, y) != y || m(y, x) == x
            }),
            Property::Abelian => first_counterexample(n, 4, |v| {
                let (x, y, z, t) = (v[0], v[1], v[2], v[3]);
                m(m(x, y), m(z, t)) == m(m(x, z), m(y, t))
            }),
            Property::Linear => first_counterexample(n, 2, |v| {
                a.leq(v[0], v[1]) || a.leq(v[1], v[0])
            }),
            Property::Discrete => first_counterexample(n, 2, |v| {
                let (x, y) = (v[0], v[1]);
                !(a.leq(x, y) && x != y) || y == u
            }),
            Property::Semiregular => semiregular_counterexample(a),
            Property::Regular => semiregular_counterexample(a).or_else(|| {
                first_counterexample(n, 2, |v| {
                    let (x, y) = (v[0], v[1]);
                    !a.leq(x, y) || (0..n).any(|z| m(z, x) == y)
                })
            }),
            Property::Hilbert => first_counterexample(n, 3, |v| {
                let (x, y, z) = (v[0], v[1], v[2]);
                m(x, m(y, z)) == m(m(x, y), m(x, z))
            }),
            Property::DualBck => first_counterexample(n, 3, |v| {
                let (x, y, z) = (v[0], v[1], v[2]);
                m(x, m(y, z)) == m(m(y, x), z)
            }),
            Property::Kl => first_counterexample(n, 2, |v| {
                let (x, y) = (v[0], v[1]);
                a.leq(x, m(y, x))
            }),
            Property::Cl => first_counterexample(n, 3, |v| {
                let (x, y, z) = (v[0], v[1], v[2]);
                m(m(x, m(y, z)), m(y, m(x, z))) == u
            }),
            Property::Prime => (0..n)
                .filter(|&p| p != u)
                .find_map(|p| prime_witness(a, p).map(|x| vec![p, x])),
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn semiregular_counterexample(a: &Algebra) -> Option<Vec<Elid>> {
    let m = |x: Elid, y: Elid| a.op(x, y);
    first_counterexample(a.size(), 3, |v| {
        let (x, y, z) = (v[0], v[1], v[2]);
        let xyz = m(m(x, y), z);
        m(xyz, m(m(y, x), z)) == m(xyz, z)
    })
}

/// An `x` with neither `x ≤ p` nor `x·p = p`, if there is one.
fn prime_witness(a: &Algebra, p: Elid) -> Option<Elid> {
    (0..a.size()).find(|&x| !(a.leq(x, p) || a.op(x, p) == p))
}

/// First violating assignment for `property`, as 1-based labels in the
/// order the variables appear in the condition (`[p, x]` for prime).
pub fn find_counterexample(a: &Algebra, property: Property) -> Option<Vec<usize>> {
    property.counterexample(a).map(|v| to_labels(&v))
}

pub fn is_sharp(a: &Algebra) -> bool {
    Property::Sharp.holds(a)
}

pub fn is_symmetric(a: &Algebra) -> bool {
    Property::Symmetric.holds(a)
}

pub fn is_abelian(a: &Algebra) -> bool {
    Property::Abelian.holds(a)
}

pub fn is_linear(a: &Algebra) -> bool {
    Property::Linear.holds(a)
}

pub fn is_discrete(a: &Algebra) -> bool {
    Property::Discrete.holds(a)
}

pub fn is_semiregular(a: &Algebra) -> bool {
    Property::Semiregular.holds(a)
}

pub fn is_regular(a: &Algebra) -> bool {
    Property::Regular.holds(a)
}

pub fn is_hilbert(a: &Algebra) -> bool {
    Property::Hilbert.holds(a)
}

pub fn is_dual_bck(a: &Algebra) -> bool {
    Property::DualBck.holds(a)
}

pub fn is_kl(a: &Algebra) -> bool {
    Property::Kl.holds(a)
}

pub fn is_cl(a: &Algebra) -> bool {
    Property::Cl.holds(a)
}

/// `p ≠ 1` and every `x` has `x ≤ p` or `x·p = p`
pub fn is_prime_element(p: &Element) -> bool {
    !p.is_unit() && prime_witness(p.algebra(), p.elid()).is_none()
}

pub fn is_prime(a: &Algebra) -> bool {
    Property::Prime.holds(a)
}

/// Every property evaluated once
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Properties {
    pub sharp: bool,
    pub symmetric: bool,
    pub abelian: bool,
    pub linear: bool,
    pub discrete: bool,
    pub semiregular: bool,
    pub regular: bool,
    pub hilbert: bool,
    pub dual_bck: bool,
    pub kl: bool,
    pub cl: bool,
    pub prime: bool,
}

impl Properties {
    pub fn of(a: &Algebra) -> Self {
        let semiregular = is_semiregular(a);
        Self {
            sharp: is_sharp(a),
            symmetric: is_symmetric(a),
            abelian: is_abelian(a),
            linear: is_linear(a),
            discrete: is_discrete(a),
            semiregular,
            regular: semiregular && is_regular(a),
            hilbert: is_hilbert(a),
            dual_bck: is_dual_bck(a),
            kl: is_kl(a),
            cl: is_cl(a),
            prime: is_prime(a),
        }
    }

    pub fn get(&self, property: Property) -> bool {
        match property {
            Property::Sharp => self.sharp,
            Property::Symmetric => self.symmetric,
            Property::Abelian => self.abelian,
            Property::Linear => self.linear,
            Property::Discrete => self.discrete,
            Property::Semiregular => self.semiregular,
            Property::Regular => self.regular,
            Property::Hilbert => self.hilbert,
            Property::DualBck => self.dual_bck,
            Property::Kl => self.kl,
            Property::Cl => self.cl,
            Property::Prime => self.prime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goedel_chain() {
        let p = Properties::of(&Algebra::chain(3).unwrap());
        assert!(p.linear && p.sharp && p.hilbert && p.kl && p.cl && p.prime);
        assert!(!p.symmetric && !p.discrete && !p.dual_bck);
    }

    #[test]
    fn lukasiewicz_chain_is_not_hilbert() {
        let a = Algebra::lukasiewicz(3).unwrap();
        assert!(is_linear(&a) && is_symmetric(&a) && is_regular(&a));
        assert!(!is_sharp(&a));
        assert_eq!(find_counterexample(&a, Property::Hilbert), Some(vec![2, 2, 1]));
        assert_eq!(find_counterexample(&a, Property::Sharp), Some(vec![2, 1]));
    }

    #[test]
    fn prime_witness_names_element_and_blocker() {
        let a = Algebra::new(&[vec![3, 1, 3], vec![3, 3, 3], vec![1, 2, 3]], true).unwrap();
        assert!(!is_prime(&a));
        assert_eq!(find_counterexample(&a, Property::Prime), Some(vec![2, 1]));
        assert!(is_prime_element(&a.element(1).unwrap()));
        assert!(!is_prime_element(&a.element(2).unwrap()));
        assert!(!is_prime_element(&a.logical_unit()));
    }

    #[test]
    fn properties_agree_with_individual_checks() {
        let a = Algebra::boolean2();
        let p = Properties::of(&a);
        for property in Property::ALL {
            assert_eq!(p.get(property), property.holds(&a), "{}", property);
        }
        assert!(p.discrete);
    }
}
