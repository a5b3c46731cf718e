//! Unit tests for entry reads, writes and resets.
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface declaration mistakes"
)]

use std::{cell::Cell, rc::Rc};

use indexmap::IndexMap;
use rstest::rstest;

use super::{
    CompiledPattern, Entry, EntryData, EntryMap, NestedObjectEntry, ObjectEntry, ObservableEntry,
    PropertyEntry, ValueEntry,
};
use crate::{
    annotations::Range,
    error::WriteError,
    infer,
    kind::EntryKind,
    observable::{Observable, ObservableCell},
    schema::{Shared, ValueAccess, shared},
    shape::{Declared, EnumValue, Value},
};

crate::config_enum! {
    enum Quality { Low, High }
}

struct Holder {
    level: i32,
    name: String,
    weights: Vec<i16>,
    quality: Quality,
}

fn holder() -> Shared<Holder> {
    shared(Holder {
        level: 3,
        name: String::from("abc"),
        weights: vec![1, 2],
        quality: Quality::Low,
    })
}

fn property<V: Declared>(
    instance: &Shared<Holder>,
    data: EntryData,
    getter: fn(&Holder) -> &V,
    setter: fn(&mut Holder) -> &mut V,
) -> PropertyEntry {
    let inference = infer::entry_kind(&V::shape(), None, None).expect("shape should infer");
    let access = ValueAccess::field(Rc::clone(instance), getter, Some(setter));
    PropertyEntry::new(data, inference, access)
}

fn level_entry(instance: &Shared<Holder>) -> PropertyEntry {
    let data = EntryData::new(String::from("level"), None).with_range(Some(Range::new(0.0, 10.0)));
    property(instance, data, |h| &h.level, |h| &mut h.level)
}

#[rstest]
fn accepted_write_reaches_the_instance() {
    let instance = holder();
    let entry = level_entry(&instance);
    assert!(entry.set_integer(7));
    assert_eq!(instance.borrow().level, 7);
    assert_eq!(entry.get_integer(), Some(7));
    assert_eq!(entry.kind(), EntryKind::Integer);
}

#[rstest]
#[case(11)]
#[case(-1)]
fn out_of_range_write_is_rejected(#[case] value: i32) {
    let instance = holder();
    let entry = level_entry(&instance);
    assert_eq!(
        entry.try_set(Value::Integer(value)),
        Err(WriteError::OutOfRange {
            value: f64::from(value),
            min: 0.0,
            max: 10.0,
        })
    );
    assert_eq!(instance.borrow().level, 3);
}

#[rstest]
fn wrong_kind_is_a_type_mismatch() {
    let instance = holder();
    let entry = level_entry(&instance);
    assert!(!entry.set_long(5));
    assert_eq!(
        entry.try_set(Value::Boolean(true)),
        Err(WriteError::TypeMismatch {
            expected: String::from("i32"),
        })
    );
    assert_eq!(entry.get_long(), None);
}

#[rstest]
fn reset_restores_the_captured_default() {
    let instance = holder();
    let entry = level_entry(&instance);
    assert!(entry.set_integer(5));
    assert!(entry.set_integer(9));
    entry.reset();
    assert_eq!(instance.borrow().level, 3);
    assert_eq!(entry.default_value(), Some(&Value::Integer(3)));
}

#[rstest]
fn reset_bypasses_constraints() {
    let instance = holder();
    instance.borrow_mut().level = 42;
    let entry = level_entry(&instance);
    assert!(entry.set_integer(1));
    entry.reset();
    assert_eq!(instance.borrow().level, 42);
}

#[rstest]
#[case("xyz", true)]
#[case("xyz1", false)]
#[case("1xyz", false)]
fn patterns_must_match_the_whole_string(#[case] candidate: &str, #[case] accepted: bool) {
    let instance = holder();
    let pattern = CompiledPattern::compile("[a-z]+").expect("pattern should compile");
    let data = EntryData::new(String::from("name"), None).with_pattern(Some(pattern));
    let entry = property(&instance, data, |h| &h.name, |h| &mut h.name);
    assert_eq!(entry.set_string(candidate), accepted);
    let expected = if accepted { candidate } else { "abc" };
    assert_eq!(instance.borrow().name, expected);
    assert_eq!(entry.data().pattern(), Some("[a-z]+"));
}

#[rstest]
fn array_writes_check_every_element() {
    let instance = holder();
    let data = EntryData::new(String::from("weights"), None).with_range(Some(Range::new(0.0, 5.0)));
    let entry = property(&instance, data, |h| &h.weights, |h| &mut h.weights);
    assert!(entry.is_array());
    assert!(entry.set_array(vec![Value::Short(4), Value::Short(5)]));
    assert!(!entry.set_array(vec![Value::Short(4), Value::Short(6)]));
    assert!(!entry.set_array(vec![Value::Integer(1)]));
    assert_eq!(instance.borrow().weights, vec![4, 5]);
}

#[rstest]
fn enum_entries_accept_variants_by_name() {
    let instance = holder();
    let data = EntryData::new(String::from("quality"), None);
    let entry = property(&instance, data, |h| &h.quality, |h| &mut h.quality);
    assert!(entry.set_enum_variant("High"));
    assert!(!entry.set_enum_variant("Ultra"));
    assert_eq!(instance.borrow().quality, Quality::High);
    assert_eq!(entry.get_enum().as_ref().map(EnumValue::variant), Some("High"));
    assert!(entry.set_enum(EnumValue::of(Quality::Low)));
    assert_eq!(instance.borrow().quality, Quality::Low);
}

#[rstest]
fn observable_entries_notify_subscribers() {
    let cell = Observable::new(1_i64);
    let notified = Rc::new(Cell::new(0_usize));
    let counter = Rc::clone(&notified);
    cell.subscribe(move |_| counter.set(counter.get() + 1));

    let handle: Rc<dyn ObservableCell> = Rc::new(cell.clone());
    let inference = infer::entry_kind(&handle.held_shape(), None, None).expect("i64 should infer");
    let entry = ObservableEntry::new(EntryData::new(String::from("count"), None), inference, handle);

    assert!(entry.is_observable());
    assert!(entry.set_long(4));
    assert_eq!(cell.get(), 4);
    assert_eq!(notified.get(), 1);
    entry.reset();
    assert_eq!(cell.get(), 1);
    assert_eq!(notified.get(), 2);
}

#[rstest]
fn object_reset_cascades_to_members() {
    let instance = holder();
    let mut members: EntryMap = IndexMap::new();
    members.insert(String::from("level"), Box::new(level_entry(&instance)));
    let object = NestedObjectEntry::new(EntryData::new(String::from("holder"), None), members);

    let level = object
        .entries()
        .get("level")
        .and_then(|entry| entry.as_value())
        .expect("member should be a value entry");
    assert!(level.set_integer(8));
    object.reset();
    assert_eq!(instance.borrow().level, 3);
    assert_eq!(object.kind(), EntryKind::Object);
    assert!(object.as_value().is_none());
    assert!(object.as_object().is_some());
}

#[rstest]
fn invalid_patterns_fail_to_compile() {
    assert!(CompiledPattern::compile("(").is_err());
}
