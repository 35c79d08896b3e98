//! Fix synthesis and edit application.
//!
//! Two rendering modes:
//! - Compact: one replacement per misplaced declaration, in place. Edits
//!   never overlap and declarations already in position are untouched.
//! - Spaced: a single replacement over the whole block, members joined by a
//!   line break and groups separated by one blank line.

use crate::diff::mismatches;
use crate::group::Group;
use crate::models::{Declaration, Span};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Replace the text in `span` with `text`.
pub struct TextEdit {
    pub span: Span,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixMode {
    Compact,
    Spaced,
}

impl FixMode {
    pub fn from_spacing(space_between_groups: bool) -> Self {
        if space_between_groups {
            FixMode::Spaced
        } else {
            FixMode::Compact
        }
    }
}

/// Edits for compact mode: each misplaced slot receives the canonical text.
pub fn compact_edits(source: &str, decls: &[Declaration], canonical: &[usize]) -> Vec<TextEdit> {
    mismatches(canonical)
        .map(|i| TextEdit {
            span: decls[i].span,
            text: decls[canonical[i]].text(source).to_string(),
        })
        .collect()
}

/// Edit for spaced mode: rewrite the full block from the first to the last
/// declaration.
pub fn spaced_edit(source: &str, decls: &[Declaration], groups: &[Group]) -> Option<TextEdit> {
    let first = decls.first()?;
    let last = decls.last()?;
    let text = groups
        .iter()
        .map(|g| {
            g.members
                .iter()
                .map(|&i| decls[i].text(source))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    Some(TextEdit {
        span: Span::new(first.span.start, last.span.end),
        text,
    })
}

/// True when only whitespace separates consecutive declarations, so a block
/// rewrite loses nothing but line breaks.
pub fn gaps_are_blank(source: &str, decls: &[Declaration]) -> bool {
    decls
        .windows(2)
        .all(|w| source[w[0].span.end..w[1].span.start].trim().is_empty())
}

/// Render the fix for one evaluated declaration list.
pub fn synthesize(
    source: &str,
    decls: &[Declaration],
    groups: &[Group],
    canonical: &[usize],
    mode: FixMode,
) -> Vec<TextEdit> {
    match mode {
        FixMode::Compact => compact_edits(source, decls, canonical),
        FixMode::Spaced => spaced_edit(source, decls, groups).into_iter().collect(),
    }
}

/// Apply non-overlapping edits, highest offset first so earlier offsets stay
/// valid.
pub fn apply_edits(source: &str, edits: &[TextEdit]) -> String {
    let mut ordered: Vec<&TextEdit> = edits.iter().collect();
    ordered.sort_by(|a, b| b.span.start.cmp(&a.span.start));
    let mut out = source.to_string();
    for edit in ordered {
        out.replace_range(edit.span.start..edit.span.end, &edit.text);
    }
    out
}
