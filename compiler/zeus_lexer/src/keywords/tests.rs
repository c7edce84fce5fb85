use super::*;
use pretty_assertions::assert_eq;

#[test]
fn every_keyword_resolves() {
    let table = [
        ("u8", TokenKind::TyU8),
        ("char", TokenKind::TyChar),
        ("f32", TokenKind::TyF32),
        ("f64", TokenKind::TyF64),
        ("u16", TokenKind::TyU16),
        ("u32", TokenKind::TyU32),
        ("u64", TokenKind::TyU64),
        ("s64", TokenKind::TyS64),
        ("s8", TokenKind::TyS8),
        ("s16", TokenKind::TyS16),
        ("s32", TokenKind::TyS32),
        ("bool", TokenKind::TyBool),
        ("proc", TokenKind::Proc),
        ("if", TokenKind::If),
        ("struct", TokenKind::Struct),
        ("true", TokenKind::True),
        ("false", TokenKind::False),
        ("for", TokenKind::For),
        ("const", TokenKind::Const),
        ("else", TokenKind::Else),
        ("return", TokenKind::Return),
    ];
    for (text, kind) in table {
        assert_eq!(lookup(text), Some(kind), "{text}");
    }
}

#[test]
fn lookup_is_case_sensitive() {
    assert_eq!(lookup("Proc"), None);
    assert_eq!(lookup("IF"), None);
    assert_eq!(lookup("S32"), None);
}

#[test]
fn near_misses_are_identifiers() {
    for text in ["u", "s128", "procs", "iff", "structs", "returned", "x"] {
        assert_eq!(lookup(text), None, "{text}");
    }
}

#[test]
fn directives() {
    assert_eq!(lookup_directive("import"), Some(TokenKind::PoundImport));
    assert_eq!(lookup_directive("stack_size"), Some(TokenKind::PoundStackSize));
    assert_eq!(lookup_directive("include"), None);
}
