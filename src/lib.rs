//! lalgebras: finite L-algebras
//!
//! An L-algebra is a set with a binary operation `·` and a logical unit `1`
//! such that `1·x = x`, `x·1 = 1`, `x·x = 1`, `x·y = y·x = 1` implies
//! `x = y`, and
//!
//! ```text
//! (x·y)·(x·z) = (y·x)·(y·z)
//! ```
//!
//! Finite algebras are given by 1-based multiplication tables. The crate
//! validates tables, evaluates structural properties, computes subalgebras,
//! ideals and prime spectra, builds products, and looks algebras up in a
//! persistent catalog.

pub mod catalog;
pub mod config;
pub mod construct;
pub mod core;
mod domain;
pub mod error;
pub mod id;
pub mod ideal;
pub mod morphism;
pub mod properties;
pub mod subset;
pub mod validate;

pub use catalog::{AlgebraCatalog, Catalog};
pub use config::{Config, EnumerationLimits};
pub use construct::{
    direct_product, direct_product_all, is_action, normal_form, normal_form_permutation,
    product_coordinates, semidirect_product,
};
pub use crate::core::{Algebra, Element, Table};
pub use error::{ActionViolation, LAlgebraError, Result};
pub use ideal::{
    ideal_generated_by, ideal_product, ideals, ideals_with, ideals_within, is_ideal,
    is_ideal_with, is_invariant, is_prime_ideal, is_subalgebra, spec, subalgebra_generated_by,
    IdealRule,
};
pub use morphism::{
    automorphisms, endomorphisms, endomorphisms_within, find_isomorphism, is_isomorphic,
    is_morphism,
};
pub use properties::{
    find_counterexample, is_abelian, is_cl, is_discrete, is_dual_bck, is_hilbert, is_kl,
    is_linear, is_prime, is_prime_element, is_regular, is_semiregular, is_sharp, is_symmetric,
    Properties, Property,
};
pub use subset::{left_multiply_set, product_of_sets, right_multiply_set, ElementSet};
pub use validate::{check_algebra, validate_rows, validate_table, AxiomViolation, CheckResult};
