use std::borrow::Cow;

use crate::types::{SqlValue, ValueMap};

fn replacement(ch: char) -> Option<&'static str> {
    match ch {
        '\\' => Some("\\\\"),
        '\0' => Some("\\0"),
        '\n' => Some("\\n"),
        '\r' => Some("\\r"),
        '\'' => Some("\\'"),
        '"' => Some("\\\""),
        '\x1a' => Some("\\Z"),
        _ => None,
    }
}

/// Backslash-escapes text for use inside a MySQL string literal.
///
/// Rewrites `\`, NUL, newline, carriage return, `'`, `"` and 0x1A; every other character is
/// left alone. Not idempotent: escaping already escaped text doubles the backslashes.
///
/// ```rust
/// use mysql_helper::escape;
///
/// assert_eq!(escape("O'Brien"), "O\\'Brien");
/// assert_eq!(escape("plain"), "plain");
/// ```
#[must_use]
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|ch| replacement(ch).is_some()) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match replacement(ch) {
            Some(rep) => escaped.push_str(rep),
            None => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}

/// [`escape`] that passes `None` through.
#[must_use]
pub fn escape_opt(text: Option<&str>) -> Option<Cow<'_, str>> {
    text.map(escape)
}

/// Escapes every column name and every textual value of `map`, element-wise for lists.
///
/// Raw expressions and non-textual values come back unchanged.
#[must_use]
pub fn escape_map(map: &ValueMap) -> ValueMap {
    map.iter()
        .map(|(column, value)| (escape(column).into_owned(), escape_value(value)))
        .collect()
}

fn escape_value(value: &SqlValue) -> SqlValue {
    match value {
        SqlValue::Text(text) => SqlValue::Text(escape(text).into_owned()),
        SqlValue::List(items) => SqlValue::List(items.iter().map(escape_value).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_each_special_character() {
        assert_eq!(escape("a\\b"), "a\\\\b");
        assert_eq!(escape("a\0b"), "a\\0b");
        assert_eq!(escape("a\nb"), "a\\nb");
        assert_eq!(escape("a\rb"), "a\\rb");
        assert_eq!(escape("a'b"), "a\\'b");
        assert_eq!(escape("a\"b"), "a\\\"b");
        assert_eq!(escape("a\x1ab"), "a\\Zb");
    }

    #[test]
    fn leaves_other_characters_alone() {
        let text = "abc XYZ 0123 %_ ` é 漢字 \t";
        assert!(matches!(escape(text), Cow::Borrowed(_)));
        assert_eq!(escape(text), text);
    }

    #[test]
    fn backslash_introduced_by_escaping_is_not_rescanned() {
        assert_eq!(escape("\\'"), "\\\\\\'");
    }

    #[test]
    fn escaping_twice_double_escapes() {
        let once = escape("it's").into_owned();
        assert_eq!(escape(&once), "it\\\\\\'s");
    }

    #[test]
    fn none_passes_through() {
        assert!(escape_opt(None).is_none());
        assert_eq!(escape_opt(Some("x'")).as_deref(), Some("x\\'"));
    }

    #[test]
    fn map_escapes_keys_values_and_list_elements() {
        let map = ValueMap::new()
            .with("na'me", "O'Brien")
            .with("ids", vec!["a'", "b"])
            .with("expr", SqlValue::raw("IF(a = 'x', 1, 0)"))
            .with("n", 5);
        let escaped = escape_map(&map);
        let entries: Vec<(&str, &SqlValue)> = escaped.iter().collect();
        assert_eq!(entries[0].0, "na\\'me");
        assert_eq!(entries[0].1, &SqlValue::Text("O\\'Brien".into()));
        assert_eq!(
            entries[1].1,
            &SqlValue::List(vec![SqlValue::Text("a\\'".into()), SqlValue::Text("b".into())])
        );
        assert_eq!(entries[2].1, &SqlValue::raw("IF(a = 'x', 1, 0)"));
        assert_eq!(entries[3].1, &SqlValue::Int(5));
    }
}
