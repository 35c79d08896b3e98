//! Output rendering for lint and format commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-item fields and a top-level summary.

use crate::error::Error;
use crate::format::FormatResult;
use crate::models::LintResult;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if use_colors("human") {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn note_prefix() -> String {
    if use_colors("human") {
        "note:".cyan().bold().to_string()
    } else {
        "note:".to_string()
    }
}

/// Print host errors (unreadable files, bad patterns) to stderr.
pub fn print_errors(errors: &[Error]) {
    for e in errors {
        eprintln!("{} {}", error_prefix(), e);
    }
}

/// Print lint results in the requested format.
pub fn print_lint(res: &LintResult, output: &str, errors: &[Error]) {
    print_errors(errors);
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_lint_json(res)).unwrap_or_default()
        ),
        _ => {
            let color = use_colors(output);
            for is in &res.issues {
                let sev = match is.severity.as_str() {
                    "error" => {
                        if color {
                            "⟦error⟧".red().bold().to_string()
                        } else {
                            "⟦error⟧".to_string()
                        }
                    }
                    "warning" | "warn" => {
                        if color {
                            "⟦warn⟧".yellow().bold().to_string()
                        } else {
                            "⟦warn⟧".to_string()
                        }
                    }
                    _ => {
                        if color {
                            "⟦info⟧".blue().bold().to_string()
                        } else {
                            "⟦info⟧".to_string()
                        }
                    }
                };
                let icon = match is.severity.as_str() {
                    "error" => "✖".red().to_string(),
                    "warning" | "warn" => "▲".yellow().to_string(),
                    _ => "◆".blue().to_string(),
                };
                let loc = format!("{}:{}:{}", is.file, is.line, is.column);
                let loc = if color { loc.bold().to_string() } else { loc };
                println!("{} {} {} ❲{}❳ — {}", icon, sev, loc, is.rule, is.message);
                if color {
                    println!("    {} {}", "hint:".bright_black(), is.hint);
                } else {
                    println!("    hint: {}", is.hint);
                }
            }
            let summary = format!(
                "— Summary — errors={} warnings={} infos={} files={}",
                res.summary.errors, res.summary.warnings, res.summary.infos, res.summary.files
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Print formatting results. When `write` is false, previews and diffs
/// can be emitted; otherwise only file statuses are shown.
pub fn print_format(
    results: &[FormatResult],
    output: &str,
    write: bool,
    diff: bool,
    errors: &[Error],
) {
    print_errors(errors);
    match output {
        "json" => {
            let out = compose_format_json(results, write, diff);
            println!("{}", serde_json::to_string_pretty(&out).unwrap_or_default());
        }
        _ => {
            let color = use_colors(output);
            for r in results {
                if !r.changed {
                    if color {
                        println!("{} {}", "no changes:".bright_black(), r.file);
                    } else {
                        println!("no changes: {}", r.file);
                    }
                } else if write {
                    if color {
                        println!("{} {}", "fixed:".green().bold(), r.file.bold());
                    } else {
                        println!("fixed: {}", r.file);
                    }
                } else {
                    let body = if diff {
                        build_naive_diff(r.original.as_deref(), r.preview.as_deref())
                            .or_else(|| r.preview.clone())
                    } else {
                        r.preview.clone()
                    };
                    if let Some(body) = body {
                        if color {
                            println!("{} {}\n{}", "---".cyan().bold(), r.file.bold(), body);
                        } else {
                            println!("--- {}\n{}", r.file, body);
                        }
                    }
                }
            }
        }
    }
}

fn build_naive_diff(old: Option<&str>, new: Option<&str>) -> Option<String> {
    let old = old?;
    let new = new?;
    let mut out = String::new();
    let old_lines: Vec<&str> = old.lines().collect();
    let new_lines: Vec<&str> = new.lines().collect();
    // Trim the common prefix/suffix; show the differing middle as -/+ lines
    let prefix = old_lines
        .iter()
        .zip(&new_lines)
        .take_while(|(a, b)| a == b)
        .count();
    let suffix = old_lines[prefix..]
        .iter()
        .rev()
        .zip(new_lines[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();
    out.push_str(&format!("@@ line {} @@\n", prefix + 1));
    for l in &old_lines[prefix..old_lines.len() - suffix] {
        out.push_str(&format!("-{}\n", l));
    }
    for l in &new_lines[prefix..new_lines.len() - suffix] {
        out.push_str(&format!("+{}\n", l));
    }
    Some(out)
}

/// Compose lint JSON object (pure) for testing/snapshot purposes.
pub fn compose_lint_json(res: &LintResult) -> JsonVal {
    serde_json::to_value(res).unwrap_or(JsonVal::Null)
}

/// Compose format JSON object (pure) for testing/snapshot purposes.
pub fn compose_format_json(results: &[FormatResult], write: bool, diff: bool) -> JsonVal {
    let items: Vec<_> = results
        .iter()
        .map(|r| {
            json!({
                "file": r.file,
                "changed": r.changed,
                "wrote": write && r.changed,
                "preview": if !write { r.preview.as_ref() } else { None },
                "diff": if diff && !write { build_naive_diff(r.original.as_deref(), r.preview.as_deref()) } else { None },
            })
        })
        .collect();
    let summary = json!({
        "changed": results.iter().filter(|r| r.changed).count(),
        "total": results.len(),
        "wrote": if write { results.iter().filter(|r| r.changed).count() } else { 0 },
    });
    json!({"results": items, "summary": summary})
}
