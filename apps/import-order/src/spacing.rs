//! Blank-line separation between adjacent groups.

use crate::group::Group;
use crate::models::Declaration;

/// A boundary needs a blank line, i.e. at least two line breaks.
fn has_blank_line(between: &str) -> bool {
    between.matches('\n').count() >= 2
}

/// Returns true when some boundary between adjacent groups lacks a blank line.
///
/// Boundaries are inferred from group sizes applied left to right over the
/// written positions, which only matches the real layout once the
/// declarations are in canonical order. Callers check order first.
pub fn missing_blank_line(source: &str, decls: &[Declaration], groups: &[Group]) -> bool {
    if groups.len() < 2 {
        return false;
    }
    let mut cursor = 0usize;
    for group in &groups[..groups.len() - 1] {
        cursor += group.len();
        let (Some(prev), Some(next)) = (decls.get(cursor - 1), decls.get(cursor)) else {
            return false;
        };
        if !has_blank_line(&source[prev.span.end..next.span.start]) {
            return true;
        }
    }
    false
}
