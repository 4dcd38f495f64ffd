use crate::extractors::base::{ExtractError, TagEntry, TagModel};

/// Decode a struct tag payload (delimiters already stripped).
///
/// The payload is split on single spaces; each token is `key:"value"`, split on
/// its first colon, with exactly one quote removed from each end of the value.
/// An empty payload has no entries. Any empty token, token without a colon, or
/// value not wrapped in quotes fails the whole tag.
pub fn decode_tag(raw: &str) -> Result<TagModel, ExtractError> {
    let mut entries = Vec::new();

    if !raw.is_empty() {
        for token in raw.split(' ') {
            if token.is_empty() {
                return Err(ExtractError::malformed_tag(raw, "empty token"));
            }

            let (key, quoted) = token
                .split_once(':')
                .ok_or_else(|| ExtractError::malformed_tag(raw, "missing colon"))?;

            if key.is_empty() {
                return Err(ExtractError::malformed_tag(raw, "empty key"));
            }

            let value = quoted
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .ok_or_else(|| ExtractError::malformed_tag(raw, "unbalanced quotes"))?;

            entries.push(TagEntry {
                key: key.to_string(),
                value: value.to_string(),
            });
        }
    }

    Ok(TagModel {
        raw: raw.to_string(),
        entries,
    })
}

/// Strip the delimiters from a tag literal as it appears in source.
///
/// Raw (backtick) literals are taken as-is; interpreted (double-quoted)
/// literals are unescaped with Go's string escape rules. An escape that Go
/// rejects, or one that yields invalid UTF-8, makes the tag malformed.
pub fn tag_payload(literal: &str) -> Result<String, ExtractError> {
    if let Some(inner) = literal
        .strip_prefix('`')
        .and_then(|s| s.strip_suffix('`'))
    {
        return Ok(inner.to_string());
    }

    match literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
    {
        Some(inner) => unescape_interpreted(inner, literal),
        None => Ok(literal.to_string()),
    }
}

fn unescape_interpreted(inner: &str, literal: &str) -> Result<String, ExtractError> {
    let bad = |reason: &'static str| ExtractError::malformed_tag(literal, reason);

    // `\x` and octal escapes are single bytes, so decode into bytes first
    let mut out: Vec<u8> = Vec::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            push_char(&mut out, ch);
            continue;
        }

        let escape = chars.next().ok_or_else(|| bad("dangling escape"))?;
        match escape {
            'a' => out.push(0x07),
            'b' => out.push(0x08),
            'f' => out.push(0x0c),
            'n' => out.push(b'\n'),
            'r' => out.push(b'\r'),
            't' => out.push(b'\t'),
            'v' => out.push(0x0b),
            '\\' => out.push(b'\\'),
            '"' => out.push(b'"'),
            'x' => {
                let value = digits(&mut chars, 16, 2).ok_or_else(|| bad("invalid hex escape"))?;
                out.push(value as u8);
            }
            '0'..='7' => {
                let rest = digits(&mut chars, 8, 2).ok_or_else(|| bad("invalid octal escape"))?;
                let value = (escape as u32 - '0' as u32) * 64 + rest;
                let byte = u8::try_from(value).map_err(|_| bad("octal escape out of range"))?;
                out.push(byte);
            }
            'u' | 'U' => {
                let width = if escape == 'u' { 4 } else { 8 };
                let decoded = digits(&mut chars, 16, width)
                    .and_then(char::from_u32)
                    .ok_or_else(|| bad("invalid unicode escape"))?;
                push_char(&mut out, decoded);
            }
            _ => return Err(bad("unknown escape")),
        }
    }

    String::from_utf8(out).map_err(|_| bad("invalid UTF-8"))
}

fn push_char(out: &mut Vec<u8>, ch: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
}

/// Exactly `count` digits in `radix`, as one number
fn digits(chars: &mut std::str::Chars<'_>, radix: u32, count: usize) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..count {
        value = value * radix + chars.next()?.to_digit(radix)?;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(tag: &TagModel) -> Vec<(&str, &str)> {
        tag.entries
            .iter()
            .map(|e| (e.key.as_str(), e.value.as_str()))
            .collect()
    }

    #[test]
    fn test_decode_preserves_order() {
        let tag = decode_tag(r#"json:"name" xml:"n""#).unwrap();
        assert_eq!(pairs(&tag), vec![("json", "name"), ("xml", "n")]);
        assert_eq!(tag.raw, r#"json:"name" xml:"n""#);
    }

    #[test]
    fn test_value_keeps_inner_colons_and_commas() {
        let tag = decode_tag(r#"json:"id,omitempty" db:"a:b""#).unwrap();
        assert_eq!(pairs(&tag), vec![("json", "id,omitempty"), ("db", "a:b")]);
        assert_eq!(tag.get("db"), Some("a:b"));
    }

    #[test]
    fn test_duplicate_keys_are_kept() {
        let tag = decode_tag(r#"k:"1" k:"2""#).unwrap();
        assert_eq!(pairs(&tag), vec![("k", "1"), ("k", "2")]);
        assert_eq!(tag.get("k"), Some("1"));
    }

    #[test]
    fn test_empty_payload_has_no_entries() {
        let tag = decode_tag("").unwrap();
        assert!(tag.entries.is_empty());
    }

    #[test]
    fn test_malformed_tags_fail() {
        for raw in [
            r#"json"#,
            r#"json:name"#,
            r#"json:"name"#,
            r#"json:"name"  xml:"n""#,
            r#" json:"name""#,
            r#":"v""#,
            r#"json:""#,
        ] {
            assert!(
                matches!(decode_tag(raw), Err(ExtractError::MalformedTag { .. })),
                "expected malformed tag for {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_tag_payload_strips_delimiters() {
        assert_eq!(tag_payload(r#"`json:"a"`"#).unwrap(), r#"json:"a""#);
        assert_eq!(tag_payload(r#""json:\"a\"""#).unwrap(), r#"json:"a""#);
        assert_eq!(tag_payload(r#"`a:"\t"`"#).unwrap(), r#"a:"\t""#);
    }

    #[test]
    fn test_tag_payload_unescapes_go_escapes() {
        assert_eq!(
            tag_payload(r#""sep:\"a\tb\" nl:\"\n\"""#).unwrap(),
            "sep:\"a\tb\" nl:\"\n\""
        );
        assert_eq!(tag_payload(r#""k:\"\x41\101\u00e9\U0001F600\"""#).unwrap(), "k:\"AAé😀\"");
        assert_eq!(tag_payload(r#""k:\"\\\"""#).unwrap(), "k:\"\\\"");
    }

    #[test]
    fn test_tag_payload_rejects_bad_escapes() {
        for literal in [
            r#""k:\"\q\"""#,
            r#""k:\"\x4\"""#,
            r#""k:\"\400\"""#,
            r#""k:\"\xff\"""#,
            r#""k:\"\uD800\"""#,
            r#""k:\""#,
        ] {
            assert!(
                matches!(tag_payload(literal), Err(ExtractError::MalformedTag { .. })),
                "expected malformed tag for {:?}",
                literal
            );
        }
    }
}
