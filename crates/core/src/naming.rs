//! Identifier case conversion between C# and TypeScript conventions.
//!
//! Member names (properties, methods, parameters) use camelCase and must be
//! valid TypeScript identifiers. File names use kebab-case. Type names are
//! never converted.
//!
//! Every conversion is idempotent: `f(f(x)) == f(x)`.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::error::NamingError;

/// TypeScript reserved words that cannot be used as identifiers.
pub static TS_RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "import",
        "in",
        "instanceof",
        "new",
        "null",
        "return",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        "yield",
        "let",
        "static",
        "implements",
        "interface",
        "package",
        "private",
        "protected",
        "public",
        "await",
        "async",
    ]
    .into_iter()
    .collect()
});

/// Check whether `name` is a syntactically valid TypeScript identifier.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Convert a member identifier to TypeScript property case (camelCase).
///
/// The leading run of capitals is lowered, keeping the last capital of an
/// acronym that starts the next word (`URLValue` -> `urlValue`). The result
/// is then made a legal identifier: C# verbatim `@` prefixes are dropped,
/// illegal characters become `_`, and a leading digit or a reserved word gets
/// a `_` prefix.
pub fn to_property_case(identifier: &str) -> Result<String, NamingError> {
    let trimmed = identifier.trim_start_matches('@');
    if trimmed.is_empty() {
        return Err(NamingError::EmptyIdentifier);
    }

    let mut chars: Vec<char> = trimmed.chars().collect();
    for i in 0..chars.len() {
        if i == 1 && !chars[i].is_uppercase() {
            break;
        }
        let has_next = i + 1 < chars.len();
        if i > 0 && has_next && !chars[i + 1].is_uppercase() {
            break;
        }
        chars[i] = chars[i].to_ascii_lowercase();
    }

    let mut result: String = chars
        .into_iter()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    if TS_RESERVED_WORDS.contains(result.as_str()) {
        result.insert(0, '_');
    }

    Ok(result)
}

/// Convert an identifier to file case (kebab-case).
///
/// Word boundaries are lower-to-upper transitions, the end of an acronym
/// (`URLValue` -> `url-value`) and the separators `_`, ` `, `.`, `-`.
pub fn to_file_case(identifier: &str) -> Result<String, NamingError> {
    if identifier.is_empty() {
        return Err(NamingError::EmptyIdentifier);
    }

    let chars: Vec<char> = identifier.chars().collect();
    let mut result = String::with_capacity(identifier.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if matches!(c, '_' | ' ' | '.' | '-') {
            if !result.is_empty() && !result.ends_with('-') {
                result.push('-');
            }
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && !result.is_empty() && !result.ends_with('-') {
                result.push('-');
            }
        }
        result.extend(c.to_lowercase());
    }

    while result.ends_with('-') {
        result.pop();
    }
    if result.is_empty() {
        return Err(NamingError::EmptyIdentifier);
    }
    Ok(result)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_to_property_case() {
        assert_eq!(to_property_case("DisplayName").unwrap(), "displayName");
        assert_eq!(to_property_case("Id").unwrap(), "id");
        assert_eq!(to_property_case("ID").unwrap(), "id");
        assert_eq!(to_property_case("URLValue").unwrap(), "urlValue");
        assert_eq!(to_property_case("displayName").unwrap(), "displayName");
        assert_eq!(to_property_case("GetById").unwrap(), "getById");
        assert_eq!(to_property_case("X").unwrap(), "x");
    }

    #[test]
    fn test_to_property_case_sanitizes() {
        assert_eq!(to_property_case("Class").unwrap(), "_class");
        assert_eq!(to_property_case("@default").unwrap(), "_default");
        assert_eq!(to_property_case("1stPlace").unwrap(), "_1stPlace");
        assert!(is_valid_identifier(&to_property_case("New").unwrap()));
    }

    #[test]
    fn test_to_property_case_empty() {
        assert_eq!(to_property_case(""), Err(NamingError::EmptyIdentifier));
        assert_eq!(to_property_case("@"), Err(NamingError::EmptyIdentifier));
    }

    #[test]
    fn test_to_property_case_idempotent() {
        for name in [
            "DisplayName",
            "ID",
            "URLValue",
            "aBC",
            "Class",
            "snake_case_name",
            "HTTPStatus2Code",
            "x",
            "1stPlace",
            "_private",
            "IOStream",
        ] {
            let once = to_property_case(name).unwrap();
            let twice = to_property_case(&once).unwrap();
            assert_eq!(once, twice, "not idempotent for {name}");
        }
    }

    #[test]
    fn test_to_file_case() {
        assert_eq!(to_file_case("UserProfile").unwrap(), "user-profile");
        assert_eq!(to_file_case("URLValue").unwrap(), "url-value");
        assert_eq!(to_file_case("Role").unwrap(), "role");
        assert_eq!(to_file_case("user_profile").unwrap(), "user-profile");
        assert_eq!(to_file_case("Order2Line").unwrap(), "order2-line");
        assert_eq!(to_file_case(""), Err(NamingError::EmptyIdentifier));
        assert_eq!(to_file_case("__"), Err(NamingError::EmptyIdentifier));
    }

    #[test]
    fn test_to_file_case_idempotent() {
        for name in ["UserProfile", "URLValue", "user-profile", "A_B", "IOStream"] {
            let once = to_file_case(name).unwrap();
            assert_eq!(to_file_case(&once).unwrap(), once);
        }
    }

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("foo"));
        assert!(is_valid_identifier("_foo"));
        assert!(is_valid_identifier("$foo1"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("1foo"));
        assert!(!is_valid_identifier("foo-bar"));
    }
}
