//! The import-order rule: collect declarations during a pass, evaluate once
//! at the end.
//!
//! Imports and exports are evaluated independently (imports first). For
//! each enabled kind with more than one declaration:
//! 1. group and flatten into canonical order;
//! 2. report a reorder violation over the minimal misplaced range;
//! 3. otherwise, when `space_between_groups` is set and several groups
//!    exist, report a spacing violation over the whole block.
//!
//! Fixes are not rendered during evaluation. A `Diagnostic` carries a
//! `FixPlan`, and edits are produced only when the host calls `fix`.

use crate::diff::{detect, Violation, ViolationKind};
use crate::fix::{gaps_are_blank, synthesize, FixMode, TextEdit};
use crate::group::{build_groups, flatten, Group};
use crate::models::{Declaration, DeclarationKind, Span};
use crate::spacing::missing_blank_line;
use log::debug;

pub const RULE_ID: &str = "import-order/import-order";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Rule toggles; all independent.
pub struct RuleOptions {
    pub sort_imports: bool,
    pub sort_exports: bool,
    pub space_between_groups: bool,
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            sort_imports: true,
            sort_exports: true,
            space_between_groups: false,
        }
    }
}

impl RuleOptions {
    fn enabled(&self, kind: DeclarationKind) -> bool {
        match kind {
            DeclarationKind::Import => self.sort_imports,
            DeclarationKind::Export => self.sort_exports,
        }
    }
}

#[derive(Debug, Clone)]
/// Everything needed to render a fix later, without the rendered text.
pub struct FixPlan {
    decls: Vec<Declaration>,
    groups: Vec<Group>,
    canonical: Vec<usize>,
    mode: FixMode,
}

impl FixPlan {
    /// Render the edits against the same source the pass evaluated.
    pub fn edits(&self, source: &str) -> Vec<TextEdit> {
        synthesize(source, &self.decls, &self.groups, &self.canonical, self.mode)
    }

    /// Whether rendering would delete something other than whitespace
    /// between declarations.
    pub fn drops_text(&self, source: &str) -> bool {
        self.mode == FixMode::Spaced && !gaps_are_blank(source, &self.decls)
    }

    /// Like `edits`, but falls back to in-place reordering when the block
    /// rewrite would delete text. Blank lines are then left as they are.
    pub fn preserving_edits(&self, source: &str) -> Vec<TextEdit> {
        let mode = if self.drops_text(source) {
            FixMode::Compact
        } else {
            self.mode
        };
        synthesize(source, &self.decls, &self.groups, &self.canonical, mode)
    }
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub rule: &'static str,
    pub kind: DeclarationKind,
    pub violation: ViolationKind,
    pub message: String,
    pub hint: String,
    pub range: Span,
    plan: FixPlan,
}

impl Diagnostic {
    /// Materialize the fix as ordered, non-overlapping edits.
    pub fn fix(&self, source: &str) -> Vec<TextEdit> {
        self.plan.edits(source)
    }

    /// The fix, minus any block rewrite that would delete statements or
    /// comments sitting between the declarations.
    pub fn safe_fix(&self, source: &str) -> Vec<TextEdit> {
        self.plan.preserving_edits(source)
    }

    pub fn fix_drops_text(&self, source: &str) -> bool {
        self.plan.drops_text(source)
    }
}

fn message(kind: DeclarationKind, violation: ViolationKind) -> String {
    match violation {
        ViolationKind::Reorder => format!("{} are not properly ordered", kind.plural()),
        ViolationKind::Spacing => format!(
            "{} groups are not separated by a blank line",
            kind.singular()
        ),
    }
}

fn hint(kind: DeclarationKind, spaced: bool) -> String {
    let mut h = format!(
        "{} should be ordered by type (built-in, http, external, local) and alphabetically",
        kind.plural()
    );
    if spaced {
        h.push_str(", with a blank line between groups");
    }
    h
}

/// Per-file accumulator. Create one per pass; it is consumed by `finish`.
#[derive(Debug, Default)]
pub struct RulePass {
    options: RuleOptions,
    imports: Vec<Declaration>,
    exports: Vec<Declaration>,
}

impl RulePass {
    pub fn new(options: RuleOptions) -> Self {
        Self {
            options,
            imports: Vec::new(),
            exports: Vec::new(),
        }
    }

    /// Receive one declaration in document order.
    pub fn visit(&mut self, decl: Declaration) {
        match decl.kind {
            DeclarationKind::Import => self.imports.push(decl),
            DeclarationKind::Export => self.exports.push(decl),
        }
    }

    /// End of pass: evaluate and return at most one diagnostic per kind.
    pub fn finish(self, source: &str) -> Vec<Diagnostic> {
        let options = self.options;
        [
            (DeclarationKind::Import, self.imports),
            (DeclarationKind::Export, self.exports),
        ]
        .into_iter()
        .filter(|(kind, _)| options.enabled(*kind))
        .filter_map(|(kind, decls)| evaluate(source, kind, decls, options))
        .collect()
    }
}

fn evaluate(
    source: &str,
    kind: DeclarationKind,
    decls: Vec<Declaration>,
    options: RuleOptions,
) -> Option<Diagnostic> {
    if decls.len() <= 1 {
        return None;
    }
    let groups = build_groups(&decls);
    let canonical = flatten(&groups);
    let violation = detect(&decls, &canonical).or_else(|| {
        if !options.space_between_groups || groups.len() < 2 {
            return None;
        }
        if !missing_blank_line(source, &decls, &groups) {
            return None;
        }
        let first = decls.first()?.span;
        let last = decls.last()?.span;
        Some(Violation {
            kind: ViolationKind::Spacing,
            span: first.cover(last),
        })
    })?;
    debug!(
        "{:?} violation for {} {:?} declarations at {}..{}",
        violation.kind,
        decls.len(),
        kind,
        violation.span.start,
        violation.span.end
    );
    Some(Diagnostic {
        rule: RULE_ID,
        kind,
        violation: violation.kind,
        message: message(kind, violation.kind),
        hint: hint(kind, options.space_between_groups),
        range: violation.span,
        plan: FixPlan {
            decls,
            groups,
            canonical,
            mode: FixMode::from_spacing(options.space_between_groups),
        },
    })
}

/// Run the rule over declarations already discovered by the host.
pub fn run_rule<I>(source: &str, decls: I, options: RuleOptions) -> Vec<Diagnostic>
where
    I: IntoIterator<Item = Declaration>,
{
    let mut pass = RulePass::new(options);
    for decl in decls {
        pass.visit(decl);
    }
    pass.finish(source)
}
