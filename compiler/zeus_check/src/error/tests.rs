use super::*;
use pretty_assertions::assert_eq;

#[test]
fn argument_count_pluralizes() {
    let one = CheckErrorKind::ArgumentCount {
        expected: 1,
        found: 2,
    };
    assert_eq!(
        one.to_string(),
        "Procedure defined with 1 input but you provided 2 inputs"
    );
    let none = CheckErrorKind::ArgumentCount {
        expected: 0,
        found: 1,
    };
    assert_eq!(
        none.to_string(),
        "Procedure defined with 0 inputs but you provided 1 input"
    );
}

#[test]
fn return_count_message() {
    let kind = CheckErrorKind::ReturnCount {
        expected: 2,
        found: 1,
    };
    assert_eq!(kind.to_string(), "Procedure returns 2 values but 1 was provided");
}

#[test]
fn field_message_names_the_member() {
    let kind = CheckErrorKind::FieldNotFound { name: "z".into() };
    assert_eq!(kind.to_string(), "z does not belong to the defined structure");
}

#[test]
fn error_displays_its_kind() {
    let err = CheckError::new(
        FileId::ENTRY,
        Span::new(3, 4),
        CheckErrorKind::ExplicitCast,
    );
    assert_eq!(err.to_string(), "Explicit cast required");
    assert_eq!(err.code(), ErrorCode::E3003);
}

#[test]
fn codes_follow_the_category() {
    assert_eq!(CheckErrorKind::VariableNotDefined.code(), ErrorCode::E3001);
    assert_eq!(CheckErrorKind::Redefinition.code(), ErrorCode::E3002);
    assert_eq!(CheckErrorKind::TwoPointers.code(), ErrorCode::E3004);
    assert_eq!(CheckErrorKind::TooFewValues.code(), ErrorCode::E3006);
    assert_eq!(CheckErrorKind::GlobalNotLiteral.code(), ErrorCode::E3008);
    assert_eq!(CheckErrorKind::InvalidStep.code(), ErrorCode::E3010);
    assert_eq!(
        CheckErrorKind::ImportCycle { file: "a".into() }.code(),
        ErrorCode::E9004
    );
}
