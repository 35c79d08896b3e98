//! import-order core library.
//!
//! Classifies import and re-exporting export declarations into groups
//! (built-in, http, external, local), detects when a file's declarations
//! are out of order or missing blank lines between groups, and synthesizes
//! minimal text edits to fix them.
//!
//! High-level modules:
//! - `classify`: Category policy for module specifiers.
//! - `collate`: Locale-aware specifier comparison.
//! - `group`: Grouping, stable sorting, and flattening to canonical order.
//! - `diff`: Identity diff and minimal violation span.
//! - `spacing`: Blank-line checks between adjacent groups.
//! - `fix`: Compact and spaced fix rendering, edit application.
//! - `rule`: Per-file rule pass producing diagnostics with lazy fixes.
//! - `scan`: Lightweight declaration scanner for JS/TS sources.
//! - `lint` / `format`: File runners used by the binary.
//! - `cli`, `config`, `output`, `models`, `error`: Host plumbing.
pub mod classify;
pub mod cli;
pub mod collate;
pub mod config;
pub mod diff;
pub mod error;
pub mod fix;
pub mod format;
pub mod group;
pub mod lint;
pub mod models;
pub mod output;
pub mod rule;
pub mod scan;
pub mod spacing;
