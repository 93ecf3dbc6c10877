//! Keyword resolution for the cooking layer.
//!
//! Raw identifiers are promoted to keyword tokens here; everything else
//! stays an `Identifier`. The lookup uses the word's length as a first-pass
//! filter (keywords range from 3-11 chars), then matches against the
//! keywords of that length.

use squint_ir::TokenKind;

/// Look up a keyword by text.
///
/// Returns the corresponding `TokenKind` if the text is a keyword, `None`
/// for a regular identifier.
#[inline]
pub(crate) fn lookup(text: &str) -> Option<TokenKind> {
    let bytes = text.as_bytes();
    let len = bytes.len();

    // Guard: all keywords are 3-11 chars and start with a letter or '_'
    if !(3..=11).contains(&len) {
        return None;
    }
    let first = bytes[0];
    if !first.is_ascii_alphabetic() && first != b'_' {
        return None;
    }

    match len {
        3 => match text {
            "int" => Some(TokenKind::Int),
            _ => None,
        },
        4 => match text {
            "auto" => Some(TokenKind::Auto),
            "bool" => Some(TokenKind::Bool),
            "char" => Some(TokenKind::Char),
            "enum" => Some(TokenKind::Enum),
            "half" => Some(TokenKind::Half),
            "long" => Some(TokenKind::Long),
            "true" => Some(TokenKind::True),
            "void" => Some(TokenKind::Void),
            _ => None,
        },
        5 => match text {
            "_Bool" => Some(TokenKind::CBool),
            "class" => Some(TokenKind::Class),
            "const" => Some(TokenKind::Const),
            "false" => Some(TokenKind::False),
            "float" => Some(TokenKind::Float),
            "short" => Some(TokenKind::Short),
            "union" => Some(TokenKind::Union),
            _ => None,
        },
        6 => match text {
            "double" => Some(TokenKind::Double),
            "public" => Some(TokenKind::Public),
            "return" => Some(TokenKind::Return),
            "signed" => Some(TokenKind::Signed),
            "static" => Some(TokenKind::Static),
            "struct" => Some(TokenKind::Struct),
            _ => None,
        },
        7 => match text {
            "__int64" => Some(TokenKind::Int64),
            "nullptr" => Some(TokenKind::Nullptr),
            "private" => Some(TokenKind::Private),
            "virtual" => Some(TokenKind::Virtual),
            "wchar_t" => Some(TokenKind::WcharT),
            _ => None,
        },
        8 => match text {
            "_Complex" => Some(TokenKind::Complex),
            "__int128" => Some(TokenKind::Int128),
            "__vector" => Some(TokenKind::Vector),
            "char16_t" => Some(TokenKind::Char16T),
            "char32_t" => Some(TokenKind::Char32T),
            "register" => Some(TokenKind::Register),
            "unsigned" => Some(TokenKind::Unsigned),
            "volatile" => Some(TokenKind::Volatile),
            _ => None,
        },
        9 => match text {
            "__objc_no" => Some(TokenKind::ObjcNo),
            "protected" => Some(TokenKind::Protected),
            _ => None,
        },
        10 => match text {
            "_Decimal32" => Some(TokenKind::Decimal32),
            "_Decimal64" => Some(TokenKind::Decimal64),
            "_Imaginary" => Some(TokenKind::Imaginary),
            "__objc_yes" => Some(TokenKind::ObjcYes),
            _ => None,
        },
        11 => match text {
            "_Decimal128" => Some(TokenKind::Decimal128),
            _ => None,
        },
        _ => None,
    }
}
