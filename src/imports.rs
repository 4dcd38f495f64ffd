//! Import Aliases - collision-free identifiers for foreign import paths
//!
//! Used by code that re-emits Go source referencing other packages. Each
//! aliaser is an explicitly owned value; share one across threads only behind
//! a lock, since both maps must change together.

use std::collections::HashMap;

const VENDOR_SEGMENT: &str = "/vendor/";

/// Go keywords can never be used as package names
const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Bidirectional import path <-> alias registry.
///
/// - a path keeps the alias it was first given
/// - two paths never share an alias
/// - every alias is a valid Go identifier
#[derive(Debug, Default, Clone)]
pub struct ImportAliaser {
    by_path: HashMap<String, String>,
    by_alias: HashMap<String, String>,
}

impl ImportAliaser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the alias bound to `import_path`, binding a new one if needed.
    ///
    /// The candidate starts as the sanitized last path segment. While it is
    /// taken by another path (or is not a usable identifier), the next segment
    /// up is sanitized and prepended; once the path is exhausted, `x` is
    /// appended until the alias is free.
    pub fn resolve(&mut self, import_path: &str) -> String {
        let import_path = strip_vendor(import_path);

        if let Some(alias) = self.by_path.get(import_path) {
            return alias.clone();
        }

        let mut segments = import_path.rsplit('/').filter(|s| !s.is_empty());
        let mut alias = String::new();

        loop {
            match segments.next() {
                Some(segment) => alias.insert_str(0, &sanitize_segment(segment)),
                None => alias.push('x'),
            }

            if is_usable_alias(&alias) && !self.by_alias.contains_key(&alias) {
                break;
            }
        }

        tracing::debug!("Import '{}' aliased as '{}'", import_path, alias);

        self.by_path.insert(import_path.to_string(), alias.clone());
        self.by_alias.insert(alias.clone(), import_path.to_string());

        alias
    }

    pub fn alias_for(&self, import_path: &str) -> Option<&str> {
        self.by_path
            .get(strip_vendor(import_path))
            .map(String::as_str)
    }

    pub fn path_for(&self, alias: &str) -> Option<&str> {
        self.by_alias.get(alias).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    /// Go import lines for every bound path, sorted by path.
    ///
    /// The alias is spelled out unless it equals the path's own last segment.
    /// A major-version segment (`.../v9`) is not the package name, so such
    /// paths always carry their alias.
    pub fn import_specs(&self) -> Vec<String> {
        let mut paths: Vec<(&String, &String)> = self.by_path.iter().collect();
        paths.sort();

        paths
            .into_iter()
            .map(|(path, alias)| {
                let default_name = path.rsplit('/').next().unwrap_or(path);
                if default_name == alias && !is_major_version(default_name) {
                    format!("{:?}", path)
                } else {
                    format!("{} {:?}", alias, path)
                }
            })
            .collect()
    }
}

/// Only the part after the last `/vendor/` identifies the package
fn strip_vendor(import_path: &str) -> &str {
    match import_path.rfind(VENDOR_SEGMENT) {
        Some(idx) => &import_path[idx + VENDOR_SEGMENT.len()..],
        None => import_path,
    }
}

/// Drop leading digits, then map every non-identifier character to `_`
fn sanitize_segment(segment: &str) -> String {
    segment
        .trim_start_matches(is_go_digit)
        .chars()
        .map(|c| {
            if is_go_letter(c) || is_go_digit(c) {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn is_usable_alias(alias: &str) -> bool {
    let mut chars = alias.chars();
    let valid = match chars.next() {
        Some(first) if is_go_letter(first) => chars.all(|c| is_go_letter(c) || is_go_digit(c)),
        _ => false,
    };
    valid && alias != "_" && !GO_KEYWORDS.contains(&alias)
}

/// Code points in XID_Start or XID_Continue only through the Other_ID_* properties
const OTHER_ID_CHARS: &[char] = &[
    '\u{1369}', '\u{136A}', '\u{136B}', '\u{136C}', '\u{136D}', '\u{136E}', '\u{136F}',
    '\u{1370}', '\u{1371}', '\u{19DA}', '\u{1885}', '\u{1886}', '\u{2118}', '\u{212E}',
    '\u{309B}', '\u{309C}', '\u{00B7}', '\u{0387}',
];

/// Go letter: a Unicode letter (category L) or `_`.
///
/// XID_Start is every letter plus letter numbers (Nl) and the Other_ID_Start
/// code points, so both are removed again.
fn is_go_letter(c: char) -> bool {
    c == '_'
        || (unicode_ident::is_xid_start(c) && !c.is_numeric() && !OTHER_ID_CHARS.contains(&c))
}

/// Go digit: a decimal digit (category Nd).
///
/// The numeric XID_Continue code points outside XID_Start are exactly Nd once
/// the Other_ID_Continue digits are removed; marks and connectors are not
/// numeric.
fn is_go_digit(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
        && !unicode_ident::is_xid_start(c)
        && c.is_numeric()
        && !OTHER_ID_CHARS.contains(&c)
}

/// `v2`, `v10`: a module major-version suffix, never the package name
fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_is_idempotent() {
        let mut aliaser = ImportAliaser::new();
        let first = aliaser.resolve("a/b/foo");
        let second = aliaser.resolve("a/b/foo");
        assert_eq!(first, "foo");
        assert_eq!(first, second);
        assert_eq!(aliaser.len(), 1);
    }

    #[test]
    fn test_collision_walks_up_the_path() {
        let mut aliaser = ImportAliaser::new();
        let first = aliaser.resolve("a/bar/foo");
        let second = aliaser.resolve("z/baz/foo");
        assert_eq!(first, "foo");
        assert_eq!(second, "bazfoo");
        assert_ne!(first, second);
        assert!(is_usable_alias(&second));
        assert_eq!(aliaser.path_for("bazfoo"), Some("z/baz/foo"));
    }

    #[test]
    fn test_exhausted_path_appends_marker() {
        let mut aliaser = ImportAliaser::new();
        assert_eq!(aliaser.resolve("x/foo"), "foo");
        assert_eq!(aliaser.resolve("foo/x/foo"), "xfoo");
        assert_eq!(aliaser.resolve("xfoo"), "xfoox");
    }

    #[test]
    fn test_vendor_prefix_is_stripped() {
        let mut aliaser = ImportAliaser::new();
        let vendored = aliaser.resolve("example.com/app/vendor/github.com/pkg/errors");
        let direct = aliaser.resolve("github.com/pkg/errors");
        assert_eq!(vendored, "errors");
        assert_eq!(vendored, direct);
        assert_eq!(aliaser.alias_for("github.com/pkg/errors"), Some("errors"));
    }

    #[test]
    fn test_sanitizes_segments() {
        let mut aliaser = ImportAliaser::new();
        assert_eq!(aliaser.resolve("gopkg.in/yaml.v3"), "yaml_v3");
        assert_eq!(aliaser.resolve("example.com/2fa-codes"), "fa_codes");
        assert_eq!(aliaser.resolve("example.com/go-redis/v9"), "v9");
    }

    #[test]
    fn test_aliases_are_go_identifiers() {
        let mut aliaser = ImportAliaser::new();
        assert_eq!(aliaser.resolve("example.com/x\u{00B2}"), "x_");
        assert_eq!(aliaser.resolve("example.com/lib\u{0345}"), "lib_");
        assert_eq!(aliaser.resolve("example.com/caf\u{00E9}"), "caf\u{00E9}");
        assert_eq!(aliaser.resolve("example.com/\u{4F8B}\u{5B50}"), "\u{4F8B}\u{5B50}");
        assert_eq!(aliaser.resolve("example.com/v\u{0663}"), "v\u{0663}");

        let roman = aliaser.resolve("example.com/\u{216B}");
        assert!(is_usable_alias(&roman));
        assert!(!roman.contains('\u{216B}'));
    }

    #[test]
    fn test_go_identifier_classes() {
        assert!(is_go_letter('a') && is_go_letter('_') && is_go_letter('\u{00E9}'));
        assert!(!is_go_letter('\u{216B}'), "letter number");
        assert!(!is_go_letter('\u{2118}'), "Other_ID_Start");
        assert!(!is_go_letter('1'));
        assert!(is_go_digit('7') && is_go_digit('\u{0663}'));
        assert!(!is_go_digit('\u{00B2}'), "superscript");
        assert!(!is_go_digit('\u{1369}'), "Ethiopic digit");
        assert!(!is_go_digit('\u{0345}') && !is_go_letter('\u{0345}'), "combining mark");
        assert!(!is_go_digit('\u{203F}') && !is_go_letter('\u{203F}'), "connector");
    }

    #[test]
    fn test_unusable_candidates_keep_walking() {
        let mut aliaser = ImportAliaser::new();
        assert_eq!(aliaser.resolve("example.com/lib/123"), "lib");
        assert_eq!(aliaser.resolve("example.com/types/type"), "typestype");
        assert_eq!(aliaser.resolve("42"), "x");
    }

    #[test]
    fn test_distinct_paths_never_share_alias() {
        let mut aliaser = ImportAliaser::new();
        let paths = [
            "a/foo", "b/foo", "c/b/foo", "foo", "a/foo_", "a-foo", "x/a/foo", "y/a/foo",
        ];
        let aliases: Vec<String> = paths.iter().map(|p| aliaser.resolve(p)).collect();
        let mut unique = aliases.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), aliases.len(), "aliases: {:?}", aliases);
        assert!(aliases.iter().all(|a| is_usable_alias(a)));
    }

    #[test]
    fn test_import_specs() {
        let mut aliaser = ImportAliaser::new();
        aliaser.resolve("a/bar/foo");
        aliaser.resolve("z/baz/foo");
        aliaser.resolve("time");
        assert_eq!(
            aliaser.import_specs(),
            vec![
                "\"a/bar/foo\"".to_string(),
                "\"time\"".to_string(),
                "bazfoo \"z/baz/foo\"".to_string(),
            ]
        );
    }

    #[test]
    fn test_major_version_imports_keep_alias() {
        let mut aliaser = ImportAliaser::new();
        aliaser.resolve("example.com/go-redis/v9");
        aliaser.resolve("example.com/v2");
        assert_eq!(
            aliaser.import_specs(),
            vec![
                "v9 \"example.com/go-redis/v9\"".to_string(),
                "v2 \"example.com/v2\"".to_string(),
            ]
        );
        assert!(is_major_version("v12"));
        assert!(!is_major_version("v"));
        assert!(!is_major_version("vfoo"));
    }
}
