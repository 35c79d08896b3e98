//! Fix runner: materialize rule fixes and apply them to files.
//!
//! Each round re-evaluates the rule on the current text and applies every
//! diagnostic's edits that do not overlap edits already accepted in that
//! round. A spaced block rewrite is only used when nothing but whitespace
//! sits between the declarations; otherwise the declarations are reordered
//! in place and any blank line still missing stays reported.

use crate::error::{Error, Result};
use crate::fix::{apply_edits, TextEdit};
use crate::lint::{collect_targets, display_path, lint_source};
use crate::rule::RuleOptions;
use log::{debug, warn};
use rayon::prelude::*;
use std::fs;
use std::path::Path;

/// Upper bound on fix rounds per file.
pub const MAX_ROUNDS: usize = 10;

#[derive(Debug)]
pub struct FormatResult {
    pub file: String,
    pub changed: bool,
    pub preview: Option<String>,
    pub original: Option<String>,
}

/// Apply fixes to `source` until the rule is satisfied or no fix applies.
///
/// Returns the fixed text and the number of rounds that changed it.
pub fn fix_source(source: &str, options: RuleOptions) -> (String, usize) {
    let mut current = source.to_string();
    let mut rounds = 0usize;
    while rounds < MAX_ROUNDS {
        let diags = lint_source(&current, options);
        if diags.is_empty() {
            break;
        }
        let mut accepted: Vec<TextEdit> = Vec::new();
        for d in &diags {
            if d.fix_drops_text(&current) {
                warn!(
                    "{} block at {}..{} has code between declarations; reordering in place",
                    d.kind.singular(),
                    d.range.start,
                    d.range.end
                );
            }
            let edits = d.safe_fix(&current);
            let clashes = edits
                .iter()
                .any(|e| accepted.iter().any(|a| a.span.overlaps(&e.span)));
            if clashes {
                debug!("deferring {:?} fix to next round", d.kind);
                continue;
            }
            accepted.extend(edits);
        }
        let next = apply_edits(&current, &accepted);
        if next == current {
            break;
        }
        current = next;
        rounds += 1;
    }
    if rounds == MAX_ROUNDS && !lint_source(&current, options).is_empty() {
        warn!("fixes did not converge after {} rounds", MAX_ROUNDS);
    }
    (current, rounds)
}

fn format_file(
    root: &Path,
    path: &Path,
    options: RuleOptions,
    write: bool,
    capture_old: bool,
) -> Result<FormatResult> {
    let data = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file = display_path(root, path);
    let (fixed, rounds) = fix_source(&data, options);
    let changed = fixed != data;
    debug!("{}: {} fix rounds, changed={}", file, rounds, changed);
    if changed && write {
        fs::write(path, &fixed).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(FormatResult {
        file,
        changed,
        preview: if changed && !write { Some(fixed) } else { None },
        original: if capture_old { Some(data) } else { None },
    })
}

/// Fix files matched by `patterns` under `root`.
///
/// When `write` is false and `capture_old` is true, changed results include
/// the fixed preview and the original text for diffing.
pub fn run_format(
    root: &Path,
    patterns: &[String],
    exclude: &[String],
    options: RuleOptions,
    write: bool,
    capture_old: bool,
) -> (Vec<FormatResult>, Vec<Error>) {
    let targets = match collect_targets(root, patterns, exclude) {
        Ok(t) => t,
        Err(e) => return (Vec::new(), vec![e]),
    };
    let outcomes: Vec<Result<FormatResult>> = targets
        .par_iter()
        .map(|path| format_file(root, path, options, write, capture_old))
        .collect();

    let mut results = Vec::new();
    let mut errors = Vec::new();
    for o in outcomes {
        match o {
            Ok(r) => results.push(r),
            Err(e) => {
                warn!("{}", e);
                errors.push(e);
            }
        }
    }
    results.sort_by(|a, b| a.file.cmp(&b.file));
    (results, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn spaced() -> RuleOptions {
        RuleOptions {
            space_between_groups: true,
            ..RuleOptions::default()
        }
    }

    #[test]
    fn test_fix_source_imports_and_exports() {
        let src = "import { helper } from \"./helper.ts\";\nimport { FetchaBuilder } from \"jsr:@kiritaniayaka/fetcha\";\n\nexport { config } from \"./config.ts\";\nexport { z } from \"npm:zod\";\n";
        let (out, rounds) = fix_source(src, RuleOptions::default());
        assert_eq!(rounds, 1);
        assert_eq!(
            out,
            "import { FetchaBuilder } from \"jsr:@kiritaniayaka/fetcha\";\nimport { helper } from \"./helper.ts\";\n\nexport { z } from \"npm:zod\";\nexport { config } from \"./config.ts\";\n"
        );
    }

    #[test]
    fn test_fix_source_clean_input_untouched() {
        let src = "import { Buffer } from \"node:buffer\";\n\nimport { x } from \"./x.ts\";\n";
        let (out, rounds) = fix_source(src, spaced());
        assert_eq!(rounds, 0);
        assert_eq!(out, src);
    }

    #[test]
    fn test_fix_source_interleaved_spaced_keeps_other_kind() {
        let src = "import b from \"./b.ts\";\nexport { y } from \"./y.ts\";\nimport a from \"npm:a\";\nexport { x } from \"npm:x\";\n";
        let (out, rounds) = fix_source(src, spaced());
        assert_eq!(rounds, 1);
        assert_eq!(
            out,
            "import a from \"npm:a\";\nexport { x } from \"npm:x\";\nimport b from \"./b.ts\";\nexport { y } from \"./y.ts\";\n"
        );
        assert!(lint_source(&out, spaced()).is_empty(), "not clean: {out}");
    }

    #[test]
    fn test_fix_source_spaced_keeps_statement_between_imports() {
        let src = "import b from \"./b.ts\";\nconst keep = 1;\nimport a from \"npm:a\";\n";
        let (out, _) = fix_source(src, spaced());
        assert_eq!(
            out,
            "import a from \"npm:a\";\nconst keep = 1;\nimport b from \"./b.ts\";\n"
        );
    }

    #[test]
    fn test_fix_source_leaves_spacing_when_comment_would_be_lost() {
        let src = "import a from \"npm:a\"; // a\nimport b from \"./b.ts\";\n";
        assert_eq!(lint_source(src, spaced()).len(), 1);
        let (out, rounds) = fix_source(src, spaced());
        assert_eq!(rounds, 0);
        assert_eq!(out, src);
    }

    #[test]
    fn test_fix_source_keeps_import_attributes() {
        let src = "import b from \"./b.json\" with { type: \"json\" };\nimport a from \"npm:a\";\n";
        let (out, rounds) = fix_source(src, RuleOptions::default());
        assert_eq!(rounds, 1);
        assert_eq!(
            out,
            "import a from \"npm:a\";\nimport b from \"./b.json\" with { type: \"json\" };\n"
        );
    }

    #[test]
    fn test_run_format_preview_and_write() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let unsorted = "import plugin from \"./import-order.ts\";\nimport { FetchaBuilder } from \"jsr:@kiritaniayaka/fetcha\";\n";
        let sorted = "import { FetchaBuilder } from \"jsr:@kiritaniayaka/fetcha\";\nimport plugin from \"./import-order.ts\";\n";
        fs::write(root.join("a.ts"), unsorted).unwrap();
        fs::write(root.join("b.ts"), sorted).unwrap();
        let pats = vec!["*.ts".to_string()];

        let (results, errors) = run_format(root, &pats, &[], RuleOptions::default(), false, true);
        assert!(errors.is_empty());
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].file, "a.ts");
        assert!(results[0].changed);
        assert_eq!(results[0].preview.as_deref(), Some(sorted));
        assert_eq!(results[0].original.as_deref(), Some(unsorted));
        assert!(!results[1].changed);
        // preview mode leaves the file alone
        assert_eq!(fs::read_to_string(root.join("a.ts")).unwrap(), unsorted);

        let (results, _) = run_format(root, &pats, &[], RuleOptions::default(), true, false);
        assert!(results[0].changed);
        assert!(results[0].preview.is_none());
        assert_eq!(fs::read_to_string(root.join("a.ts")).unwrap(), sorted);
    }
}
