//! Error types for lalgebras.
//!
//! Every error here is a caller-side contract violation on in-memory data
//! (or an I/O failure in the catalog). Nothing is retried and nothing is
//! turned into a boolean `false` on the way out.

use thiserror::Error;

use crate::id::AlgebraId;
use crate::validate::AxiomViolation;

/// Why a proposed action `rho` was rejected.
///
/// Element labels are 1-based, as everywhere else at the public boundary.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionViolation {
    #[error("action has {got} slots, acting algebra has {expected} elements")]
    WrongLength { expected: usize, got: usize },

    #[error("slot {slot} has length {got}, acted-upon algebra has {expected} elements")]
    SlotLength {
        slot: usize,
        expected: usize,
        got: usize,
    },

    #[error("slot {slot} is not a morphism of the acted-upon algebra")]
    NotAMorphism { slot: usize },

    #[error("slot of the logical unit is not the identity (moves element {at})")]
    UnitNotIdentity { at: usize },

    #[error("coherence fails for u={u}, v={v} at element {i}")]
    Incoherent { u: usize, v: usize, i: usize },
}

#[derive(Clone, Debug, Error)]
pub enum LAlgebraError {
    #[error("invalid L-algebra ({violation}): {table:?}")]
    InvalidAlgebra {
        table: Vec<Vec<usize>>,
        violation: AxiomViolation,
    },

    #[error("malformed table: {0}")]
    MalformedTable(String),

    #[error("elements belong to different algebras ({left} vs {right})")]
    CrossAlgebraMismatch { left: AlgebraId, right: AlgebraId },

    #[error("element {element} does not belong to algebra {algebra}")]
    NotASubset { algebra: AlgebraId, element: usize },

    #[error("element {label} out of range for an algebra of size {size}")]
    ElementOutOfRange { label: usize, size: usize },

    #[error("not an ideal: {0}")]
    NotAnIdeal(String),

    #[error("empty set: {0}")]
    EmptySet(String),

    #[error("invalid action: {0}")]
    InvalidAction(#[from] ActionViolation),

    #[error("invalid morphism: {0}")]
    InvalidMorphism(String),

    #[error("{what} enumeration over {size} elements exceeds the limit of {limit}")]
    EnumerationTooLarge {
        what: &'static str,
        size: usize,
        limit: usize,
    },

    #[error("catalog lookup failed: {0}")]
    CatalogLookupFailure(String),

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LAlgebraError>;

impl From<std::io::Error> for LAlgebraError {
    fn from(err: std::io::Error) -> Self {
        LAlgebraError::Catalog(err.to_string())
    }
}

impl From<serde_json::Error> for LAlgebraError {
    fn from(err: serde_json::Error) -> Self {
        LAlgebraError::Config(err.to_string())
    }
}
