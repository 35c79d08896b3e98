//! import-order CLI binary entry point.
//! Delegates to the library for lint/format and prints results.

use clap::Parser;
use import_order::cli::{Cli, Commands};
use import_order::config::{self, Effective};
use import_order::{format, lint, output};

/// Resolve configuration or exit with code 2.
fn effective_or_exit(result: import_order::error::Result<Effective>) -> Effective {
    match result {
        Ok(eff) => {
            // Friendly note if no config file was found
            if eff.config_path.is_none() && eff.output != "json" {
                eprintln!(
                    "{} No import-order.toml found; using defaults.",
                    output::note_prefix()
                );
            }
            eff
        }
        Err(e) => {
            eprintln!("{} {}", output::error_prefix(), e);
            std::process::exit(e.exit_code());
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Lint {
            paths,
            repo_root,
            output: out,
            rule,
        } => {
            let eff = effective_or_exit(config::resolve_effective(
                repo_root.as_deref(),
                out.as_deref(),
                &paths,
                rule.overrides(),
                None,
                None,
                None,
            ));
            let (result, errors) = lint::run_lint(
                &eff.repo_root,
                &eff.patterns,
                &eff.exclude,
                eff.options,
                &eff.level,
            );
            output::print_lint(&result, &eff.output, &errors);
            if !errors.is_empty() {
                std::process::exit(2);
            }
            if result.summary.errors > 0 {
                std::process::exit(1);
            }
        }
        Commands::Format {
            paths,
            repo_root,
            write,
            diff,
            check,
            output: out,
            rule,
        } => {
            let eff = effective_or_exit(config::resolve_effective(
                repo_root.as_deref(),
                out.as_deref(),
                &paths,
                rule.overrides(),
                if write { Some(true) } else { None },
                if diff { Some(true) } else { None },
                if check { Some(true) } else { None },
            ));
            // CLI/config precedence at runtime:
            // - If diff or check is enabled, force write=false for this run.
            // - Otherwise respect write.
            let eff_write = if eff.diff || eff.check { false } else { eff.write };
            let (results, errors) = format::run_format(
                &eff.repo_root,
                &eff.patterns,
                &eff.exclude,
                eff.options,
                eff_write,
                eff.diff || eff.check,
            );
            output::print_format(&results, &eff.output, eff_write, eff.diff, &errors);
            if !errors.is_empty() {
                std::process::exit(2);
            }
            if eff.check && results.iter().any(|r| r.changed) {
                std::process::exit(1);
            }
        }
    }
}
