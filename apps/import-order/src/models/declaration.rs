//! Declaration model handed to the rule by the host.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
/// Half-open byte range `[start, end)` into the source text.
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn cover(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
/// Which statement family a declaration belongs to.
pub enum DeclarationKind {
    Import,
    Export,
}

impl DeclarationKind {
    /// Plural, capitalized noun used in messages ("Imports"/"Exports").
    pub fn plural(&self) -> &'static str {
        match self {
            DeclarationKind::Import => "Imports",
            DeclarationKind::Export => "Exports",
        }
    }

    /// Singular, capitalized noun used in messages ("Import"/"Export").
    pub fn singular(&self) -> &'static str {
        match self {
            DeclarationKind::Import => "Import",
            DeclarationKind::Export => "Export",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One import or re-exporting export statement.
///
/// `source` is `None` only for an export without a `from` clause. Two
/// declarations are never considered equal by content inside the rule;
/// identity is their position in the per-pass list.
pub struct Declaration {
    pub kind: DeclarationKind,
    pub source: Option<String>,
    pub span: Span,
}

impl Declaration {
    pub fn import(source: &str, span: Span) -> Self {
        Self {
            kind: DeclarationKind::Import,
            source: Some(source.to_string()),
            span,
        }
    }

    pub fn export(source: Option<&str>, span: Span) -> Self {
        Self {
            kind: DeclarationKind::Export,
            source: source.map(str::to_string),
            span,
        }
    }

    /// Specifier used for sorting; a missing one sorts as the empty string.
    pub fn sort_key(&self) -> &str {
        self.source.as_deref().unwrap_or("")
    }

    /// Slice of `source_text` covered by this declaration.
    pub fn text<'a>(&self, source_text: &'a str) -> &'a str {
        &source_text[self.span.start..self.span.end]
    }
}
