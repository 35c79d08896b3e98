//! Identity diff between the written order and the canonical order.

use crate::models::{Declaration, Span};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationKind {
    /// Declarations are not in canonical order.
    Reorder,
    /// Order is canonical but a blank line between groups is missing.
    Spacing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub span: Span,
}

/// True when position `i` holds a different declaration than canonical.
fn misplaced(canonical: &[usize], i: usize) -> bool {
    canonical[i] != i
}

/// Positions whose declaration differs from the canonical one.
pub fn mismatches(canonical: &[usize]) -> impl Iterator<Item = usize> + '_ {
    (0..canonical.len()).filter(move |&i| misplaced(canonical, i))
}

/// Detect a reorder violation.
///
/// `canonical[i]` is the original index that belongs at position `i`, so
/// the original sequence is the identity permutation. The reported span runs
/// from the first to the last misplaced declaration only; correctly placed
/// declarations before and after are not flagged.
pub fn detect(decls: &[Declaration], canonical: &[usize]) -> Option<Violation> {
    debug_assert_eq!(decls.len(), canonical.len());
    if decls.len() <= 1 || !(0..canonical.len()).any(|i| misplaced(canonical, i)) {
        return None;
    }
    let first = mismatches(canonical).next()?;
    let last = (0..canonical.len()).rev().find(|&i| misplaced(canonical, i))?;
    Some(Violation {
        kind: ViolationKind::Reorder,
        span: Span::new(decls[first].span.start, decls[last].span.end),
    })
}
