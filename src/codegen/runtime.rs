//! Names of the ByNameModding runtime API the generated code calls into.

/// Runtime class handle
pub const CLASS: &str = "::BNM::Class";
/// Field handle template
pub const FIELD: &str = "::BNM::Field";
/// Method handle template
pub const METHOD: &str = "::BNM::Method";
/// Managed object header every reference type derives from
pub const OBJECT: &str = "::BNM::IL2CPP::Il2CppObject";

/// Header declaring [`CLASS`]
pub const CLASS_INCLUDE: &str = "BNM/Class.hpp";
/// Header declaring [`FIELD`]
pub const FIELD_INCLUDE: &str = "BNM/Field.hpp";
/// Header declaring [`METHOD`]
pub const METHOD_INCLUDE: &str = "BNM/Method.hpp";
/// Base header of [`METHOD`]
pub const METHOD_BASE_INCLUDE: &str = "BNM/MethodBase.hpp";
/// Header declaring [`OBJECT`]
pub const IL2CPP_HEADERS_INCLUDE: &str = "BNM/Il2CppHeaders.hpp";
/// Header declaring `BNM::Defaults::Get<T>()`
pub const DEFAULTS_INCLUDE: &str = "BNM/Defaults.hpp";

/// Function-local class handle
pub const CLASS_LOCAL: &str = "_class_internal_";
/// Function-local field handle
pub const FIELD_LOCAL: &str = "_field_internal_";
/// Function-local method handle
pub const METHOD_LOCAL: &str = "_method_call_";

/// Escape `value` for use inside a C++ string literal
#[must_use]
pub fn string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for c in value.chars() {
        match c {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            _ => literal.push(c),
        }
    }
    literal.push('"');
    literal
}

/// Expression that looks up a runtime class by its metadata names.
///
/// `names` is the chain from the top-level type down to the type itself.
///
/// ```rust
/// use bnm_sdkgen::codegen::runtime::class_getter;
///
/// assert_eq!(
///     class_getter("Game", &["Player", "State"]),
///     r#"::BNM::Class("Game", "Player").GetInnerClass("State")"#
/// );
/// ```
#[must_use]
pub fn class_getter(namespace: &str, names: &[&str]) -> String {
    let mut getter = String::from(CLASS);
    let mut chain = names.iter();
    if let Some(top) = chain.next() {
        getter.push_str(&format!(
            "({}, {})",
            string_literal(namespace),
            string_literal(top)
        ));
    }
    for inner in chain {
        getter.push_str(&format!(".GetInnerClass({})", string_literal(inner)));
    }
    getter
}

/// Statement binding the current object to a function-local handle
#[must_use]
pub fn bind_instance(local: &str) -> String {
    format!("{local}.SetInstance(reinterpret_cast<{OBJECT}*>(this));")
}
