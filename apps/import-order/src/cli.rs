//! CLI argument parsing via `clap`.

use crate::config::RuleOverrides;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "import-order",
    version,
    about = "Check and fix the order of import/export declarations",
    long_about = "import-order — groups import and re-export declarations by type (built-in, http, external, local), sorts them alphabetically, and rewrites files into that order.\n\nConfiguration precedence: CLI > import-order.toml > defaults.",
    after_help = "Examples:\n  import-order lint\n  import-order lint 'src/**/*.ts' --output json\n  import-order format --diff\n  import-order format --write --space-between-groups",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Args, Clone)]
/// Rule toggles shared by `lint` and `format`.
pub struct RuleArgs {
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Require a blank line between groups")]
    pub space_between_groups: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Do not check import declarations")]
    pub no_sort_imports: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Do not check re-exporting export declarations")]
    pub no_sort_exports: bool,
}

impl RuleArgs {
    /// Flags only override config when set.
    pub fn overrides(&self) -> RuleOverrides {
        RuleOverrides {
            sort_imports: self.no_sort_imports.then_some(false),
            sort_exports: self.no_sort_exports.then_some(false),
            space_between_groups: self.space_between_groups.then_some(true),
        }
    }
}

#[derive(Subcommand)]
/// Supported subcommands for linting and fixing.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current import-order version.")]
    Version,
    /// Report declarations that are out of order
    #[command(
        about = "Run lint checks",
        long_about = "Report files whose import/export declarations are not grouped and sorted. Issues at level 'error' make the command exit non-zero.",
        after_help = "Examples:\n  import-order lint\n  import-order lint 'src/**/*.ts' --output json"
    )]
    Lint {
        #[arg(help = "Glob patterns relative to the repository root (default: config patterns)")]
        paths: Vec<String>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[command(flatten)]
        rule: RuleArgs,
    },
    /// Rewrite declarations into canonical order
    #[command(
        about = "Apply fixes",
        long_about = "Reorder declarations and adjust blank lines between groups. When --diff or --check is set, write is disabled.",
        after_help = "Examples:\n  import-order format --diff\n  import-order format --write"
    )]
    Format {
        #[arg(help = "Glob patterns relative to the repository root (default: config patterns)")]
        paths: Vec<String>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Write changes to files")]
        write: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Show diffs for changed files (implies write=false)")]
        diff: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Exit non-zero if changes would occur (implies write=false)")]
        check: bool,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[command(flatten)]
        rule: RuleArgs,
    },
}
