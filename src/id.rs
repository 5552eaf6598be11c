//! ID types for lalgebras
//!
//! Two granularities are used:
//! - `AlgebraId` (a UUID) names one constructed algebra instance. Elements
//!   carry it so that mixing elements of different instances is detected.
//! - `Elid` (element-local ID) indexes an element inside its algebra's
//!   carrier, `0..n`. Public APIs speak 1-based labels instead; the
//!   conversion happens only at the boundary.

pub use uuid::Uuid;

/// Identity of one algebra instance (cloning an `Algebra` keeps it)
pub type AlgebraId = Uuid;

/// Element-local ID: 0-based position in the carrier
pub type Elid = usize;

/// Mint a fresh instance identity.
#[inline]
pub fn fresh_algebra_id() -> AlgebraId {
    Uuid::now_v7()
}

/// 1-based label to carrier index, `None` for label 0
#[inline]
pub fn from_label(label: usize) -> Option<Elid> {
    label.checked_sub(1)
}

/// Carrier index to 1-based label
#[inline]
pub fn to_label(elid: Elid) -> usize {
    elid + 1
}

/// Convert a slice of carrier indices to labels
pub fn to_labels(elids: &[Elid]) -> Vec<usize> {
    elids.iter().map(|&e| to_label(e)).collect()
}
