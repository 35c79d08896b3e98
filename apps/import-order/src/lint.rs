//! Lint runner: evaluate the rule across files matched by patterns.
//!
//! Produces a `LintResult` with issues and a summary. Files are scanned and
//! evaluated in parallel; each file gets its own rule pass.

use crate::error::{Error, Result};
use crate::models::{Issue, LintResult, Summary};
use crate::rule::{run_rule, Diagnostic, RuleOptions};
use crate::scan::scan;
use glob::{glob, Pattern};
use log::{debug, warn};
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Expand `patterns` relative to `root`, dropping paths matched by `exclude`.
///
/// Results are de-duplicated and sorted for deterministic output.
pub fn collect_targets(root: &Path, patterns: &[String], exclude: &[String]) -> Result<Vec<PathBuf>> {
    let excludes = exclude
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|source| Error::Pattern {
                pattern: p.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let mut targets: BTreeSet<PathBuf> = BTreeSet::new();
    for pat in patterns {
        let abs_glob = root.join(pat);
        let pattern = abs_glob.to_string_lossy().to_string();
        let entries = glob(&pattern).map_err(|source| Error::Pattern {
            pattern: pat.clone(),
            source,
        })?;
        for path in entries.flatten() {
            if !path.is_file() {
                continue;
            }
            let rel = display_path(root, &path);
            if excludes.iter().any(|ex| ex.matches(&rel)) {
                continue;
            }
            targets.insert(path);
        }
    }
    Ok(targets.into_iter().collect())
}

/// Path relative to `root` when possible, for display and exclude matching.
pub fn display_path(root: &Path, path: &Path) -> String {
    pathdiff::diff_paths(path, root)
        .unwrap_or_else(|| path.to_path_buf())
        .to_string_lossy()
        .replace('\\', "/")
}

/// 1-based line and column of byte `offset` in `source`.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset.min(source.len())];
    let line = before.matches('\n').count() + 1;
    let col = before
        .rfind('\n')
        .map(|nl| before[nl + 1..].chars().count())
        .unwrap_or_else(|| before.chars().count())
        + 1;
    (line, col)
}

/// Evaluate the rule on one in-memory source.
pub fn lint_source(source: &str, options: RuleOptions) -> Vec<Diagnostic> {
    run_rule(source, scan(source), options)
}

fn to_issue(file: &str, source: &str, d: &Diagnostic, level: &str) -> Issue {
    let (line, column) = line_col(source, d.range.start);
    Issue {
        file: file.to_string(),
        rule: d.rule.to_string(),
        severity: level.to_string(),
        kind: d.kind,
        line,
        column,
        start: d.range.start,
        end: d.range.end,
        message: d.message.clone(),
        hint: d.hint.clone(),
        fixable: true,
    }
}

/// Run lint across files matched by `patterns` under `root`.
///
/// Unreadable files are returned as errors and do not count toward the
/// summary's `files`. `level` (info|warn|error) is the severity of every
/// reported issue.
pub fn run_lint(
    root: &Path,
    patterns: &[String],
    exclude: &[String],
    options: RuleOptions,
    level: &str,
) -> (LintResult, Vec<Error>) {
    let targets = match collect_targets(root, patterns, exclude) {
        Ok(t) => t,
        Err(e) => return (LintResult::default(), vec![e]),
    };
    debug!("linting {} files under {}", targets.len(), root.display());

    let per_file: Vec<Result<Vec<Issue>>> = targets
        .par_iter()
        .map(|path| -> Result<Vec<Issue>> {
            let data = fs::read_to_string(path).map_err(|source| Error::Read {
                path: path.clone(),
                source,
            })?;
            let file = display_path(root, path);
            Ok(lint_source(&data, options)
                .iter()
                .map(|d| to_issue(&file, &data, d, level))
                .collect())
        })
        .collect();

    let mut issues: Vec<Issue> = Vec::new();
    let mut errors: Vec<Error> = Vec::new();
    let mut files = 0usize;
    for r in per_file {
        match r {
            Ok(found) => {
                files += 1;
                issues.extend(found);
            }
            Err(e) => {
                warn!("{}", e);
                errors.push(e);
            }
        }
    }
    // Deterministic ordering of issues by file then offset
    issues.sort_by(|a, b| a.file.cmp(&b.file).then(a.start.cmp(&b.start)));

    let mut summary = Summary {
        files,
        ..Summary::default()
    };
    for is in &issues {
        match is.severity.as_str() {
            "error" => summary.errors += 1,
            "warning" | "warn" => summary.warnings += 1,
            _ => summary.infos += 1,
        }
    }
    (LintResult { issues, summary }, errors)
}
