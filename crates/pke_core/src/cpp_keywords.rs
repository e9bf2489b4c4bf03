//! C++ identifier vocabulary (for emitted local and function names).

use crate::openfhe;

/// Keywords and alternative operator tokens of C++17/C++20.
pub const CPP_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break", "case", "catch", "char",
    "char8_t", "char16_t", "char32_t", "class", "compl", "concept", "const", "consteval", "constexpr", "constinit",
    "const_cast", "continue", "co_await", "co_return", "co_yield", "decltype", "default", "delete", "do", "double",
    "dynamic_cast", "else", "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto", "if",
    "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq", "nullptr", "operator", "or",
    "or_eq", "private", "protected", "public", "register", "reinterpret_cast", "requires", "return", "short",
    "signed", "sizeof", "static", "static_assert", "static_cast", "struct", "switch", "template", "this",
    "thread_local", "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using", "virtual",
    "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

/// Fixed-width and library type names the emitter spells directly.
const LIBRARY_TYPES: &[&str] = &[
    "int8_t", "int16_t", "int32_t", "int64_t", "uint32_t", "size_t", "main",
];

/// Check whether an identifier is a C++ keyword.
pub fn is_keyword(name: &str) -> bool {
    CPP_KEYWORDS.contains(&name)
}

/// Check whether `name` is lexically a C++ identifier (ASCII subset).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
        _ => false,
    }
}

/// Check whether `name` may not be bound by emitted code.
///
/// Covers keywords, names the prelude or OpenFHE put in scope, the fixed-width type names, and identifiers reserved
/// to the implementation (`__x`, `_X`).
pub fn is_reserved(name: &str) -> bool {
    if is_keyword(name) || openfhe::is_api_identifier(name) || LIBRARY_TYPES.contains(&name) {
        return true;
    }
    if name.contains("__") {
        return true;
    }
    let mut chars = name.chars();
    matches!((chars.next(), chars.next()), (Some('_'), Some(c)) if c.is_ascii_uppercase())
}

/// Check whether `name` can be used verbatim as an emitted symbol.
pub fn is_bindable(name: &str) -> bool {
    is_identifier(name) && !is_reserved(name)
}
