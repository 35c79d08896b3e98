//! Configuration discovery and effective settings resolution.
//!
//! Reads `import-order.toml|yaml|yml` from the repository root (or closest
//! ancestor) and merges it with CLI flags to produce an `Effective` config.
//! Defaults:
//! - `output`: `human`
//! - `patterns`: JS/TS sources anywhere under the root
//! - `exclude`: `node_modules/**`, `.git/**`
//! - `rule.sortImports|sortExports`: true, `rule.spaceBetweenGroups`: false
//! - `rule.level`: `error`
//! - `format.write|diff|check`: false
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{Error, Result};
use crate::rule::RuleOptions;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILES: [&str; 3] = ["import-order.toml", "import-order.yaml", "import-order.yml"];

pub const DEFAULT_PATTERNS: [&str; 8] = [
    "**/*.ts", "**/*.tsx", "**/*.mts", "**/*.cts", "**/*.js", "**/*.jsx", "**/*.mjs", "**/*.cjs",
];

pub const DEFAULT_EXCLUDES: [&str; 2] = ["node_modules/**", ".git/**"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Rule section under `[rule]`.
pub struct RuleCfg {
    #[serde(rename = "sortImports")]
    pub sort_imports: Option<bool>,
    #[serde(rename = "sortExports")]
    pub sort_exports: Option<bool>,
    #[serde(rename = "spaceBetweenGroups")]
    pub space_between_groups: Option<bool>,
    /// info|warn|error
    pub level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Formatting-related configuration section under `[format]`.
pub struct FormatCfg {
    pub write: Option<bool>,
    pub diff: Option<bool>,
    pub check: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `import-order.toml|yaml`.
pub struct ImportOrderConfig {
    pub output: Option<String>,
    pub patterns: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub rule: Option<RuleCfg>,
    pub format: Option<FormatCfg>,
}

#[derive(Debug, Default, Clone, Copy)]
/// Rule toggles passed on the command line; `None` defers to the file.
pub struct RuleOverrides {
    pub sort_imports: Option<bool>,
    pub sort_exports: Option<bool>,
    pub space_between_groups: Option<bool>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_path: Option<PathBuf>,
    pub output: String,
    pub patterns: Vec<String>,
    pub exclude: Vec<String>,
    pub options: RuleOptions,
    pub level: String,
    pub write: bool,
    pub diff: bool,
    pub check: bool,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when an `import-order.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Path of the config file in `root`, if any.
pub fn find_config(root: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|f| root.join(f))
        .find(|p| p.is_file())
}

/// Load `ImportOrderConfig` from `root`. Returns `Ok(None)` when no config
/// file exists.
pub fn load_config(root: &Path) -> Result<Option<ImportOrderConfig>> {
    let Some(path) = find_config(root) else {
        return Ok(None);
    };
    let s = fs::read_to_string(&path).map_err(|source| Error::Read {
        path: path.clone(),
        source,
    })?;
    let is_toml = path.extension().is_some_and(|e| e == "toml");
    let cfg = if is_toml {
        toml::from_str::<ImportOrderConfig>(&s).map_err(|e| Error::Config {
            path: path.clone(),
            message: e.to_string(),
        })?
    } else {
        serde_yaml::from_str::<ImportOrderConfig>(&s).map_err(|e| Error::Config {
            path: path.clone(),
            message: e.to_string(),
        })?
    };
    debug!("loaded config from {}", path.display());
    Ok(Some(cfg))
}

fn validate_output(path: &Path, output: &str) -> Result<()> {
    match output {
        "human" | "json" => Ok(()),
        other => Err(Error::Config {
            path: path.to_path_buf(),
            message: format!("unknown output mode '{}' (expected human|json)", other),
        }),
    }
}

fn validate_level(path: &Path, level: &str) -> Result<()> {
    match level {
        "error" | "warn" | "warning" | "info" => Ok(()),
        other => Err(Error::Config {
            path: path.to_path_buf(),
            message: format!("unknown level '{}' (expected info|warn|error)", other),
        }),
    }
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
///
/// CLI `paths` replace the configured patterns when non-empty.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_output: Option<&str>,
    cli_paths: &[String],
    cli_rule: RuleOverrides,
    cli_write: Option<bool>,
    cli_diff: Option<bool>,
    cli_check: Option<bool>,
) -> Result<Effective> {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let config_path = find_config(&repo_root);
    let cfg = load_config(&repo_root)?.unwrap_or_default();
    let origin = config_path
        .clone()
        .unwrap_or_else(|| repo_root.join(CONFIG_FILES[0]));

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    validate_output(&origin, &output)?;

    let patterns = if cli_paths.is_empty() {
        cfg.patterns
            .unwrap_or_else(|| DEFAULT_PATTERNS.iter().map(|s| s.to_string()).collect())
    } else {
        cli_paths.to_vec()
    };
    let exclude = cfg
        .exclude
        .unwrap_or_else(|| DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect());

    let rule_cfg = cfg.rule.unwrap_or_default();
    let defaults = RuleOptions::default();
    let options = RuleOptions {
        sort_imports: cli_rule
            .sort_imports
            .or(rule_cfg.sort_imports)
            .unwrap_or(defaults.sort_imports),
        sort_exports: cli_rule
            .sort_exports
            .or(rule_cfg.sort_exports)
            .unwrap_or(defaults.sort_exports),
        space_between_groups: cli_rule
            .space_between_groups
            .or(rule_cfg.space_between_groups)
            .unwrap_or(defaults.space_between_groups),
    };
    let level = rule_cfg.level.unwrap_or_else(|| "error".to_string());
    validate_level(&origin, &level)?;

    let write = cli_write
        .or_else(|| cfg.format.as_ref().and_then(|f| f.write))
        .unwrap_or(false);
    let diff = cli_diff
        .or_else(|| cfg.format.as_ref().and_then(|f| f.diff))
        .unwrap_or(false);
    let check = cli_check
        .or_else(|| cfg.format.as_ref().and_then(|f| f.check))
        .unwrap_or(false);

    Ok(Effective {
        repo_root,
        config_path,
        output,
        patterns,
        exclude,
        options,
        level,
        write,
        diff,
        check,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn resolve(root: &Path) -> Result<Effective> {
        resolve_effective(
            root.to_str(),
            None,
            &[],
            RuleOverrides::default(),
            None,
            None,
            None,
        )
    }

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("import-order.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output = "json"
patterns = ["src/**/*.ts"]
[rule]
spaceBetweenGroups = true
level = "warn"
[format]
write = true
    "#
        )
        .unwrap();

        // Resolve using explicit repo_root to avoid global CWD races
        let eff = resolve(root).unwrap();
        assert_eq!(eff.output, "json");
        assert_eq!(eff.patterns, vec!["src/**/*.ts"]);
        assert!(eff.options.space_between_groups);
        assert!(eff.options.sort_imports);
        assert_eq!(eff.level, "warn");
        assert!(eff.write);
        assert_eq!(eff.config_path, Some(root.join("import-order.toml")));
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("import-order.yaml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output: human
rule:
  sortExports: false
format:
  diff: true
            "#
        )
        .unwrap();

        let eff = resolve(root).unwrap();
        assert_eq!(eff.output, "human");
        assert!(!eff.options.sort_exports);
        assert!(!eff.options.space_between_groups);
        assert!(eff.diff);
        assert_eq!(eff.level, "error");
        assert_eq!(eff.patterns.len(), DEFAULT_PATTERNS.len());
        assert_eq!(eff.exclude, vec!["node_modules/**", ".git/**"]);
    }

    #[test]
    fn test_cli_takes_precedence() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("import-order.toml"),
            "output = \"json\"\n[rule]\nsortImports = false\n[format]\nwrite = true\n",
        )
        .unwrap();
        let eff = resolve_effective(
            root.to_str(),
            Some("human"),
            &["lib/*.ts".to_string()],
            RuleOverrides {
                sort_imports: Some(true),
                ..RuleOverrides::default()
            },
            Some(false),
            None,
            None,
        )
        .unwrap();
        assert_eq!(eff.output, "human");
        assert_eq!(eff.patterns, vec!["lib/*.ts"]);
        assert!(eff.options.sort_imports);
        assert!(!eff.write);
    }

    #[test]
    fn test_no_config_uses_defaults() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let eff = resolve(dir.path()).unwrap();
        assert!(eff.config_path.is_none());
        assert_eq!(eff.options, RuleOptions::default());
        assert_eq!(eff.output, "human");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("import-order.toml"), "output = [").unwrap();
        let err = resolve(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_unknown_output_and_level_rejected() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("import-order.toml"), "output = \"xml\"\n").unwrap();
        assert!(resolve(dir.path()).is_err());
        fs::write(dir.path().join("import-order.toml"), "[rule]\nlevel = \"fatal\"\n").unwrap();
        assert!(resolve(dir.path()).is_err());
    }

    #[test]
    fn test_detect_repo_root_walks_up() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("import-order.yml"), "output: json\n").unwrap();
        let nested = root.join("a/b");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(detect_repo_root(&nested), root.to_path_buf());
    }
}
