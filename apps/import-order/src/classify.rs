//! Category classification for module specifiers.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Top-level grouping key. Declaration order is the required group order.
pub enum Category {
    /// `node:` specifiers.
    BuiltIn,
    /// `http:` / `https:` URLs.
    Http,
    /// Registry (`jsr:`, `npm:`) and bare package specifiers.
    External,
    /// Relative or absolute paths, and exports without a source.
    Local,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::BuiltIn,
        Category::Http,
        Category::External,
        Category::Local,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Scheme-like prefix before the first `:`, if any.
fn scheme(specifier: &str) -> Option<&str> {
    specifier.split_once(':').map(|(prefix, _)| prefix)
}

/// Map a declaration's specifier to its category.
///
/// Path-like specifiers (`.`/`/`) are checked before the `http` rule and the
/// external fallback; `node:` wins over everything else.
pub fn classify(specifier: Option<&str>) -> Category {
    let Some(spec) = specifier else {
        return Category::Local;
    };
    let prefix = scheme(spec);
    if prefix == Some("node") {
        return Category::BuiltIn;
    }
    if spec.starts_with('.') || spec.starts_with('/') {
        return Category::Local;
    }
    match prefix {
        Some("http") | Some("https") => Category::Http,
        _ => Category::External,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_each_category() {
        assert_eq!(classify(Some("node:buffer")), Category::BuiltIn);
        assert_eq!(
            classify(Some("https://deno.land/std/http/server.ts")),
            Category::Http
        );
        assert_eq!(classify(Some("http://example.com/mod.ts")), Category::Http);
        assert_eq!(classify(Some("jsr:@kiritaniayaka/fetcha")), Category::External);
        assert_eq!(classify(Some("npm:zod")), Category::External);
        assert_eq!(classify(Some("react")), Category::External);
        assert_eq!(classify(Some("@std/assert")), Category::External);
        assert_eq!(classify(Some("./helper.ts")), Category::Local);
        assert_eq!(classify(Some("../shared/mod.ts")), Category::Local);
        assert_eq!(classify(Some("/abs/path.ts")), Category::Local);
    }

    #[test]
    fn test_missing_specifier_is_local() {
        assert_eq!(classify(None), Category::Local);
    }

    #[test]
    fn test_path_rule_precedes_scheme_rules() {
        // a colon inside a path must not turn it into http/external
        assert_eq!(classify(Some("./http:thing.ts")), Category::Local);
        assert_eq!(classify(Some("/https:/x.ts")), Category::Local);
    }

    #[test]
    fn test_unknown_scheme_and_bare_node_are_external() {
        assert_eq!(classify(Some("file:///tmp/x.ts")), Category::External);
        assert_eq!(classify(Some("node")), Category::External);
        assert_eq!(classify(Some("")), Category::External);
    }

    #[test]
    fn test_category_order_is_fixed() {
        assert!(Category::BuiltIn < Category::Http);
        assert!(Category::Http < Category::External);
        assert!(Category::External < Category::Local);
        assert_eq!(Category::ALL.map(|c| c.index()), [0, 1, 2, 3]);
    }
}
