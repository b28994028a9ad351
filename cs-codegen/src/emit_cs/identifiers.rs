/// C# identifier rules: reserved words, validation, and the two repair
/// strategies (escape with `@`, or rename with a leading `_`).
use std::borrow::Cow;

/// Reserved keywords of C#, sorted for binary search.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.binary_search(&name).is_ok()
}

/// True when `name` can be used verbatim as a C# identifier.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_alphanumeric() || c == '_') && !is_keyword(name)
}

/// Escape a keyword collision with the verbatim prefix: `class` -> `@class`.
pub fn create_escaped_identifier(name: &str) -> Cow<'_, str> {
    if is_keyword(name) {
        Cow::Owned(format!("@{name}"))
    } else {
        Cow::Borrowed(name)
    }
}

/// Turn arbitrary text into a usable identifier: invalid characters become
/// `_`, and a leading digit or a keyword collision gets a `_` prefix.
pub fn create_valid_identifier(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    let needs_prefix = match out.chars().next() {
        None => true,
        Some(c) => c.is_numeric() || is_keyword(&out),
    };
    if needs_prefix {
        out.insert(0, '_');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_table_is_sorted() {
        let mut sorted = KEYWORDS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, KEYWORDS);
    }

    #[test]
    fn test_is_keyword() {
        assert!(is_keyword("class"));
        assert!(is_keyword("while"));
        assert!(!is_keyword("Class"));
        assert!(!is_keyword("value"));
    }

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("count"));
        assert!(is_valid_identifier("_x1"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("1x"));
        assert!(!is_valid_identifier("a-b"));
        assert!(!is_valid_identifier("namespace"));
    }

    #[test]
    fn test_create_escaped_identifier() {
        assert_eq!(create_escaped_identifier("event"), "@event");
        assert_eq!(create_escaped_identifier("handler"), "handler");
        assert!(matches!(create_escaped_identifier("handler"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_create_valid_identifier() {
        assert_eq!(create_valid_identifier("for"), "_for");
        assert_eq!(create_valid_identifier("2d"), "_2d");
        assert_eq!(create_valid_identifier("first name"), "first_name");
        assert_eq!(create_valid_identifier(""), "_");
        assert_eq!(create_valid_identifier("ok"), "ok");
    }
}
