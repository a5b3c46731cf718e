//! Unit tests for error rendering and violation collection.

use rstest::rstest;

use super::{BindingError, Violation, Violations, WriteError};
use crate::{kind::EntryKind, shape::TypeShape};

fn sample_violations() -> Violations {
    let mut violations = Violations::default();
    violations.push(Violation::Mutability {
        property: "volume",
        expected: "var",
    });
    violations.push(Violation::TypeMismatch {
        property: "volume",
        kind: EntryKind::Integer,
    });
    violations
}

#[rstest]
fn violations_render_one_numbered_line_each() {
    let rendered = sample_violations().to_string();
    assert_eq!(
        rendered,
        "\n\t1: Property volume must be var\n\t2: Property volume is not of type INTEGER!"
    );
}

#[rstest]
fn invalid_entry_names_property_owner_and_rules() {
    let err = BindingError::InvalidEntry {
        property: "volume",
        owner: "Client",
        violations: sample_violations(),
    };
    let message = err.to_string();
    assert!(message.starts_with("Entry volume in Client is invalid!"));
    assert!(message.contains("must be var"));
    assert!(message.contains("is not of type INTEGER"));
    assert_eq!(err.property(), Some("volume"));
}

#[rstest]
fn violations_iterate_in_insertion_order() {
    let violations = sample_violations();
    let borrowed: Vec<_> = violations.iter().collect();
    assert_eq!(borrowed.len(), 2);
    assert!(matches!(borrowed.first(), Some(Violation::Mutability { .. })));
    let owned: Vec<_> = violations.into_iter().collect();
    assert!(matches!(owned.last(), Some(Violation::TypeMismatch { .. })));
}

#[rstest]
#[case(BindingError::MissingInstance { owner: "Extras" })]
#[case(BindingError::DuplicateId { id: "volume".into(), owner: "Client" })]
fn scope_level_errors_have_no_property(#[case] err: BindingError) {
    assert_eq!(err.property(), None);
}

#[rstest]
fn type_mismatch_names_expected_shape() {
    let err = WriteError::type_mismatch(&TypeShape::Array(Box::new(TypeShape::Integer)));
    assert_eq!(err.to_string(), "expected a value of type Vec<i32>");
}
