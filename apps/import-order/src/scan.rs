//! Lightweight declaration scanner for JavaScript/TypeScript sources.
//!
//! Recognizes, at the start of a line:
//! - `import ... from "x"` (clause may span lines)
//! - `import "x"` (side-effect import)
//! - `export ... from "x"` (`export *`, `export { .. }`, `export type`)
//!
//! Exports without a `from` clause are not reported. The span of a statement
//! runs from its keyword through the closing quote, any `with { .. }` or
//! `assert { .. }` attributes, and an optional `;`.
//! This is a token-level heuristic, not a parser: clauses may not contain
//! quotes, semicolons, parentheses or `=`.

use crate::models::{Declaration, DeclarationKind, Span};
use regex::Regex;
use std::sync::OnceLock;

fn statement_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?m)^[ \t]*(?P<stmt>(?P<kw>import|export)\b(?P<clause>[^;"'`()=]*?)\bfrom\s*["'](?P<src>[^"'\r\n]*)["']|import\s*["'](?P<bare>[^"'\r\n]*)["'])(?:\s*\b(?:with|assert)\s*\{[^}]*\})?(?:[ \t]*;)?"#,
        )
        .expect("statement pattern is valid")
    })
}

fn nested_keyword_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n[ \t]*(?:import|export)\b").expect("keyword pattern is valid"))
}

/// Scan `source` for import and re-exporting export declarations in
/// document order.
pub fn scan(source: &str) -> Vec<Declaration> {
    let re = statement_re();
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some(caps) = re.captures_at(source, pos) {
        let (Some(whole), Some(stmt)) = (caps.get(0), caps.name("stmt")) else {
            break;
        };
        // A clause swallowing the next statement means this keyword started
        // something else (e.g. `export default class`); resume at the inner one.
        if let Some(clause) = caps.name("clause") {
            if let Some(inner) = nested_keyword_re().find(clause.as_str()) {
                pos = clause.start() + inner.start() + 1;
                continue;
            }
        }
        let span = Span::new(stmt.start(), whole.end());
        let decl = match (caps.name("kw"), caps.name("src"), caps.name("bare")) {
            (Some(kw), Some(src), _) if kw.as_str() == "export" => Declaration {
                kind: DeclarationKind::Export,
                source: Some(src.as_str().to_string()),
                span,
            },
            (_, Some(src), _) | (_, None, Some(src)) => Declaration::import(src.as_str(), span),
            _ => {
                pos = whole.end();
                continue;
            }
        };
        out.push(decl);
        pos = whole.end().max(pos + 1);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources(src: &str) -> Vec<(DeclarationKind, String)> {
        scan(src)
            .into_iter()
            .map(|d| (d.kind, d.source.unwrap_or_default()))
            .collect()
    }

    #[test]
    fn test_scan_imports_and_exports() {
        let src = r#"import plugin from "./import-order.ts";
import { FetchaBuilder } from 'jsr:@kiritaniayaka/fetcha';
import "./polyfill.ts";
export * from "npm:zod";
export { helper } from "./helper.ts";
"#;
        assert_eq!(
            sources(src),
            vec![
                (DeclarationKind::Import, "./import-order.ts".to_string()),
                (DeclarationKind::Import, "jsr:@kiritaniayaka/fetcha".to_string()),
                (DeclarationKind::Import, "./polyfill.ts".to_string()),
                (DeclarationKind::Export, "npm:zod".to_string()),
                (DeclarationKind::Export, "./helper.ts".to_string()),
            ]
        );
    }

    #[test]
    fn test_span_includes_semicolon_and_excludes_indent() {
        let src = "  import a from \"npm:a\" ;\nimport b from \"npm:b\"\n";
        let decls = scan(src);
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].text(src), "import a from \"npm:a\" ;");
        assert_eq!(decls[1].text(src), "import b from \"npm:b\"");
    }

    #[test]
    fn test_multiline_clause() {
        let src = "import {\n  a,\n  b,\n} from \"npm:ab\";\nimport c from \"./c.ts\";";
        let decls = scan(src);
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].span.start, 0);
        assert!(decls[0].text(src).ends_with("from \"npm:ab\";"));
    }

    #[test]
    fn test_plain_exports_and_dynamic_imports_are_ignored() {
        let src = r#"export const name = "x";
export { local };
export default function main() {}
const m = await import("./lazy.ts");
"#;
        assert!(scan(src).is_empty());
    }

    #[test]
    fn test_clause_does_not_swallow_next_statement() {
        let src = "export default class A {\n  x: number\n}\nimport y from \"npm:y\";";
        let decls = scan(src);
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].kind, DeclarationKind::Import);
        assert_eq!(decls[0].text(src), "import y from \"npm:y\";");
    }

    #[test]
    fn test_span_includes_import_attributes() {
        let src = "import data from \"./data.json\" with { type: \"json\" };\nimport cfg from './cfg.json' assert {type: 'json'}\nexport { default } from \"./x.json\" with {\n  type: \"json\"\n};\nimport \"./side.css\" with { type: \"css\" };\n";
        let decls = scan(src);
        assert_eq!(decls.len(), 4);
        assert_eq!(
            decls[0].text(src),
            "import data from \"./data.json\" with { type: \"json\" };"
        );
        assert_eq!(
            decls[1].text(src),
            "import cfg from './cfg.json' assert {type: 'json'}"
        );
        assert_eq!(
            decls[2].text(src),
            "export { default } from \"./x.json\" with {\n  type: \"json\"\n};"
        );
        assert_eq!(decls[2].kind, DeclarationKind::Export);
        assert_eq!(
            decls[3].text(src),
            "import \"./side.css\" with { type: \"css\" };"
        );
    }

    #[test]
    fn test_type_only_forms() {
        let src = "import type { T } from \"./types.ts\";\nexport type { U } from \"./u.ts\";";
        assert_eq!(
            sources(src),
            vec![
                (DeclarationKind::Import, "./types.ts".to_string()),
                (DeclarationKind::Export, "./u.ts".to_string()),
            ]
        );
    }
}
