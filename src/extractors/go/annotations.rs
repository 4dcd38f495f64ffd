use regex::Regex;
use std::sync::LazyLock;

use crate::extractors::base::Annotation;

/// `@Name` up to the first opening parenthesis or end of line
static ANNOTATION_HEAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@(?P<name>[^(]*)").unwrap());

/// Decode `@Name` / `@Name(value)` annotations from a struct's doc comments.
///
/// Each comment line is stripped of its leader and one following space; lines
/// whose remainder starts with `@` become annotations in source order.
/// Duplicates are kept.
pub fn decode_annotations(pkg: &str, struct_name: &str, comments: &[String]) -> Vec<Annotation> {
    let mut annotations = Vec::new();

    for comment in comments {
        for body in comment_bodies(comment) {
            if let Some((name, value)) = decode_line(body) {
                annotations.push(Annotation {
                    pkg: pkg.to_string(),
                    struct_name: struct_name.to_string(),
                    name,
                    value,
                    raw: comment.clone(),
                });
            }
        }
    }

    annotations
}

/// Parse one leader-free comment line into `(name, value)`
fn decode_line(body: &str) -> Option<(String, Option<String>)> {
    let captures = ANNOTATION_HEAD_RE.captures(body)?;
    let name = captures.name("name")?.as_str().trim();
    if name.is_empty() {
        return None;
    }

    let value = body
        .find('(')
        .and_then(|open| enclosed(&body[open..]))
        .map(str::to_string);

    Some((name.to_string(), value))
}

/// Text strictly inside the parenthesis that opens `text`, up to its match.
///
/// Parentheses inside string literals do not count toward nesting.
fn enclosed(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' && q == '"' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }

        match ch {
            '"' | '`' => quote = Some(ch),
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[1..idx]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Split a comment into leader-free lines.
///
/// Line comments lose `//` plus one space. Block comments lose their delimiters,
/// and each inner line loses leading whitespace, an optional `*`, and one space.
fn comment_bodies(comment: &str) -> Vec<&str> {
    if let Some(rest) = comment.strip_prefix("//") {
        return vec![strip_one_space(rest)];
    }

    if let Some(inner) = comment
        .strip_prefix("/*")
        .map(|s| s.strip_suffix("*/").unwrap_or(s))
    {
        return inner
            .lines()
            .map(|line| {
                let line = line.trim_start();
                let line = line.strip_prefix('*').unwrap_or(line);
                strip_one_space(line)
            })
            .collect();
    }

    Vec::new()
}

fn strip_one_space(text: &str) -> &str {
    text.strip_prefix(' ').unwrap_or(text)
}
