//! Identifier sanitizing.
//!
//! Metadata names may contain characters C++ does not accept in identifiers (`<>c`,
//! `List`1`, `<Value>k__BackingField`, `System.IDisposable.Dispose`) or may collide with C++
//! keywords. Every identifier that ends up in generated code passes through [`sanitize`].
//! The mapping is a pure function of its input, so the same metadata always yields the same
//! spelling.

use std::collections::HashSet;

/// Replacement for characters outside `[A-Za-z0-9_]`
pub const PLACEHOLDER: char = '$';

/// Namespace segment used for types declared in the global namespace
pub const GLOBAL_NAMESPACE: &str = "GlobalNamespace";

/// C++17 keywords and alternative tokens, sorted for binary search.
const CPP_KEYWORDS: &[&str] = &[
    "alignas",
    "alignof",
    "and",
    "and_eq",
    "asm",
    "auto",
    "bitand",
    "bitor",
    "bool",
    "break",
    "case",
    "catch",
    "char",
    "char16_t",
    "char32_t",
    "char8_t",
    "class",
    "co_await",
    "co_return",
    "co_yield",
    "compl",
    "concept",
    "const",
    "const_cast",
    "consteval",
    "constexpr",
    "constinit",
    "continue",
    "decltype",
    "default",
    "delete",
    "do",
    "double",
    "dynamic_cast",
    "else",
    "enum",
    "explicit",
    "export",
    "extern",
    "false",
    "float",
    "for",
    "friend",
    "goto",
    "if",
    "inline",
    "int",
    "long",
    "mutable",
    "namespace",
    "new",
    "noexcept",
    "not",
    "not_eq",
    "nullptr",
    "operator",
    "or",
    "or_eq",
    "private",
    "protected",
    "public",
    "register",
    "reinterpret_cast",
    "requires",
    "return",
    "short",
    "signed",
    "sizeof",
    "static",
    "static_assert",
    "static_cast",
    "struct",
    "switch",
    "template",
    "this",
    "thread_local",
    "throw",
    "true",
    "try",
    "typedef",
    "typeid",
    "typename",
    "union",
    "unsigned",
    "using",
    "virtual",
    "void",
    "volatile",
    "wchar_t",
    "while",
    "xor",
    "xor_eq",
];

/// Returns true if `name` is reserved in C++
#[must_use]
pub fn is_keyword(name: &str) -> bool {
    CPP_KEYWORDS.binary_search(&name).is_ok()
}

/// Map an arbitrary metadata name to a valid C++ identifier.
///
/// # Examples
///
/// ```rust
/// use bnm_sdkgen::codegen::sanitize::sanitize;
///
/// assert_eq!(sanitize("List`1"), "List_1");
/// assert_eq!(sanitize("<Value>k__BackingField"), "$Value$k__BackingField");
/// assert_eq!(sanitize("2D"), "_2D");
/// assert_eq!(sanitize("register"), "register_");
/// assert_eq!(sanitize(""), "_");
/// ```
#[must_use]
pub fn sanitize(name: &str) -> String {
    if name.is_empty() {
        return "_".to_string();
    }

    let mut result = String::with_capacity(name.len() + 1);
    for c in name.chars() {
        match c {
            '`' | '.' => result.push('_'),
            c if c.is_ascii_alphanumeric() || c == '_' => result.push(c),
            _ => result.push(PLACEHOLDER),
        }
    }

    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }

    if is_keyword(&result) {
        result.push('_');
    }

    result
}

/// Sanitized namespace segments; the global namespace maps to [`GLOBAL_NAMESPACE`].
#[must_use]
pub fn namespace_segments(namespace: &str) -> Vec<String> {
    let segments: Vec<String> = namespace
        .split('.')
        .filter(|segment| !segment.is_empty())
        .map(sanitize)
        .collect();

    if segments.is_empty() {
        vec![GLOBAL_NAMESPACE.to_string()]
    } else {
        segments
    }
}

/// Sanitize a parameter list so no name repeats.
///
/// Later duplicates receive a `_<n>` suffix, skipping suffixes that are already taken.
#[must_use]
pub fn unique_parameter_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut used = HashSet::with_capacity(names.len());
    let mut result = Vec::with_capacity(names.len());

    for name in names {
        let base = sanitize(name.as_ref());
        let mut candidate = base.clone();
        let mut counter = 1;
        while used.contains(&candidate) {
            candidate = format!("{base}_{counter}");
            counter += 1;
        }
        used.insert(candidate.clone());
        result.push(candidate);
    }

    result
}

/// Replace every identifier in the spelled type `text` that has an entry in `renames`.
///
/// Only whole identifiers are replaced, so renaming `T` leaves `TP0` untouched.
///
/// # Examples
///
/// ```rust
/// use bnm_sdkgen::codegen::sanitize::rename_identifiers;
///
/// let renames = vec![("T".to_string(), "T_".to_string())];
/// assert_eq!(rename_identifiers("::Game::Pool_1<T>*", &renames), "::Game::Pool_1<T_>*");
/// assert_eq!(rename_identifiers("TP0", &renames), "TP0");
/// ```
#[must_use]
pub fn rename_identifiers(text: &str, renames: &[(String, String)]) -> String {
    if renames.is_empty() {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len());
    let mut start = None;
    for (index, c) in text.char_indices() {
        if c.is_ascii_alphanumeric() || c == '_' || c == PLACEHOLDER {
            start.get_or_insert(index);
            continue;
        }
        if let Some(begin) = start.take() {
            push_renamed(&text[begin..index], renames, &mut result);
        }
        result.push(c);
    }
    if let Some(begin) = start {
        push_renamed(&text[begin..], renames, &mut result);
    }

    result
}

fn push_renamed(identifier: &str, renames: &[(String, String)], result: &mut String) {
    match renames.iter().find(|(from, _)| from == identifier) {
        Some((_, to)) => result.push_str(to),
        None => result.push_str(identifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_table_sorted() {
        assert!(CPP_KEYWORDS.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_sanitize_replacements() {
        assert_eq!(sanitize("Dictionary`2"), "Dictionary_2");
        assert_eq!(
            sanitize("System.IDisposable.Dispose"),
            "System_IDisposable_Dispose"
        );
        assert_eq!(sanitize("<>c__DisplayClass0_0"), "$$c__DisplayClass0_0");
        assert_eq!(sanitize("<Module>"), "$Module$");
        assert_eq!(sanitize("Größe"), "Gr$$e");
    }

    #[test]
    fn test_sanitize_leading_digit_and_keywords() {
        assert_eq!(sanitize("1st"), "_1st");
        assert_eq!(sanitize("auto"), "auto_");
        assert_eq!(sanitize("class"), "class_");
        assert_eq!(sanitize("Class"), "Class");
        assert_eq!(sanitize("_"), "_");
    }

    #[test]
    fn test_sanitize_is_pure() {
        for name in ["get_Item", "<Value>k__BackingField", "", "op_Addition"] {
            assert_eq!(sanitize(name), sanitize(name));
        }
    }

    #[test]
    fn test_namespace_segments() {
        assert_eq!(namespace_segments(""), vec![GLOBAL_NAMESPACE]);
        assert_eq!(namespace_segments("Game.Net"), vec!["Game", "Net"]);
        assert_eq!(namespace_segments("My-Game.new"), vec!["My$Game", "new_"]);
    }

    #[test]
    fn test_unique_parameter_names() {
        assert_eq!(
            unique_parameter_names(&["a", "a", "a_1", "", ""]),
            vec!["a", "a_1", "a_1_1", "_", "__1"]
        );
        assert_eq!(unique_parameter_names(&["this", "x"]), vec!["this_", "x"]);
    }

    #[test]
    fn test_rename_identifiers_whole_tokens() {
        let renames = vec![
            ("T".to_string(), "`0".to_string()),
            ("TKey".to_string(), "`1".to_string()),
        ];
        assert_eq!(
            rename_identifiers("::BNM::Structures::Mono::Dictionary<TKey, T>*", &renames),
            "::BNM::Structures::Mono::Dictionary<`1, `0>*"
        );
        assert_eq!(rename_identifiers("T&", &renames), "`0&");
        assert_eq!(rename_identifiers("TP0", &renames), "TP0");
        assert_eq!(rename_identifiers("$T", &renames), "$T");
        assert_eq!(rename_identifiers("int", &[]), "int");
    }
}
