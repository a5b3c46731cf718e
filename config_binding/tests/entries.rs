//! Reads, writes and resets through parsed entries.
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface declaration mistakes"
)]

use std::{cell::RefCell, rc::Rc};

use anyhow::{Context, Result, ensure};
use config_binding::{
    Annotations, Comment, Config, ConfigEntry, ConfigObject, ConfigTree, ConfigType, Configurable,
    EntryKind, EnumValue, Observable, Pattern, Range, Schema, Shared, Slider, Value, ValueEntry,
    WriteError, config_enum, parse, shared,
};
use rstest::{fixture, rstest};

config_enum! {
    /// Render quality.
    enum Quality { Low, Medium, High }
}

thread_local! {
    static SETTINGS: Shared<Settings> = shared(Settings::default());
}

struct Window {
    width: i32,
    height: i32,
}

impl Configurable for Window {
    fn declare(schema: &mut Schema<Self>) {
        schema
            .var("width", |w| &w.width, |w| &mut w.width)
            .annotate(ConfigEntry::new("width"));
        schema
            .var("height", |w| &w.height, |w| &mut w.height)
            .annotate(ConfigEntry::new("height"));
    }

    fn annotations() -> Annotations {
        Annotations::new().with(ConfigObject)
    }
}

struct Settings {
    volume: i32,
    name: String,
    ratio: f32,
    offset: i64,
    quality: Quality,
    tags: Vec<String>,
    theme: Observable<String>,
    window: Shared<Window>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volume: 50,
            name: String::from("Player One"),
            ratio: 0.5,
            offset: 0,
            quality: Quality::Medium,
            tags: vec![String::from("default")],
            theme: Observable::new(String::from("dark")),
            window: shared(Window {
                width: 1024,
                height: 768,
            }),
        }
    }
}

impl Configurable for Settings {
    fn declare(schema: &mut Schema<Self>) {
        schema
            .var("volume", |s| &s.volume, |s| &mut s.volume)
            .annotate(ConfigEntry::new("volume"))
            .annotate(Range::new(0.0, 100.0))
            .annotate(Slider)
            .annotate(Comment::new("Master volume"));
        schema
            .var("name", |s| &s.name, |s| &mut s.name)
            .annotate(ConfigEntry::new("name"))
            .annotate(Pattern::new("[A-Za-z ]+"));
        schema
            .var("ratio", |s| &s.ratio, |s| &mut s.ratio)
            .annotate(ConfigEntry::new("ratio"))
            .annotate(Range::new(0.0, 1.0));
        schema
            .var("offset", |s| &s.offset, |s| &mut s.offset)
            .annotate(ConfigEntry::new("offset"))
            .annotate(Range::new(-10.0, 10.0));
        schema
            .var("quality", |s| &s.quality, |s| &mut s.quality)
            .annotate(ConfigEntry::new("quality"));
        schema
            .var("tags", |s| &s.tags, |s| &mut s.tags)
            .annotate(ConfigEntry::new("tags"))
            .annotate(Pattern::new("[a-z]+"));
        schema
            .val("theme", |s| &s.theme)
            .annotate(ConfigEntry::new("theme"));
        schema
            .val("window", |s| &s.window)
            .annotate(ConfigEntry::new("window"));
    }

    fn annotations() -> Annotations {
        Annotations::new().with(Config::new("settings"))
    }

    fn instance() -> Option<Shared<Self>> {
        Some(SETTINGS.with(Rc::clone))
    }
}

#[fixture]
fn tree() -> ConfigTree {
    parse(ConfigType::of::<Settings>())
        .expect("settings should parse")
        .expect("settings is a configuration root")
}

fn value<'tree>(tree: &'tree ConfigTree, path: &str) -> &'tree dyn ValueEntry {
    tree.entry_at(path)
        .and_then(|entry| entry.as_value())
        .unwrap_or_else(|| panic!("{path} should be a value entry"))
}

fn settings<R>(read: impl FnOnce(&Settings) -> R) -> R {
    SETTINGS.with(|settings| read(&settings.borrow()))
}

#[rstest]
#[case(0, true)]
#[case(100, true)]
#[case(42, true)]
#[case(101, false)]
#[case(-1, false)]
fn integer_writes_respect_the_range(tree: ConfigTree, #[case] candidate: i32, #[case] accepted: bool) {
    let volume = value(&tree, "volume");
    assert_eq!(volume.set_integer(candidate), accepted);
    let expected = if accepted { candidate } else { 50 };
    assert_eq!(volume.get_integer(), Some(expected));
    assert_eq!(settings(|s| s.volume), expected);
}

#[rstest]
fn rejected_writes_report_the_bounds(tree: ConfigTree) {
    let offset = value(&tree, "offset");
    assert_eq!(
        offset.try_set(Value::Long(11)),
        Err(WriteError::OutOfRange {
            value: 11.0,
            min: -10.0,
            max: 10.0,
        })
    );
    assert!(offset.set_long(-10));
    assert_eq!(settings(|s| s.offset), -10);
}

#[rstest]
fn float_writes_respect_the_range(tree: ConfigTree) {
    let ratio = value(&tree, "ratio");
    assert!(ratio.set_float(0.25));
    assert!(!ratio.set_float(1.5));
    assert_eq!(ratio.get(), Some(Value::Float(0.25)));
}

#[rstest]
#[case("Player Two", true)]
#[case("Player 2", false)]
#[case("", false)]
fn string_writes_respect_the_pattern(tree: ConfigTree, #[case] candidate: &str, #[case] accepted: bool) {
    let name = value(&tree, "name");
    assert_eq!(name.set_string(candidate), accepted);
    let expected = if accepted { candidate } else { "Player One" };
    assert_eq!(settings(|s| s.name.clone()), expected);
}

#[rstest]
fn array_writes_check_each_element(tree: ConfigTree) {
    let tags = value(&tree, "tags");
    assert!(tags.is_array());
    assert_eq!(tags.kind(), EntryKind::String);
    let good = vec![Value::String(String::from("fast")), Value::String(String::from("quiet"))];
    assert!(tags.set_array(good.clone()));
    assert!(!tags.set_array(vec![Value::String(String::from("Loud"))]));
    assert_eq!(tags.get_array(), Some(good));
}

#[rstest]
fn reset_restores_the_construction_value(tree: ConfigTree) {
    let volume = value(&tree, "volume");
    assert!(volume.set_integer(10));
    assert!(volume.set_integer(20));
    assert!(volume.set_integer(30));
    volume.reset();
    assert_eq!(settings(|s| s.volume), 50);
    assert_eq!(volume.default_value(), Some(&Value::Integer(50)));
}

#[rstest]
fn object_reset_cascades_to_every_member(tree: ConfigTree) -> Result<()> {
    let width = value(&tree, "window.width");
    let height = value(&tree, "window.height");
    ensure!(width.set_integer(1) && height.set_integer(2), "writes accepted");

    let window = tree.entry("window").context("window entry")?;
    window.reset();
    let restored = settings(|s| {
        let members = s.window.borrow();
        (members.width, members.height)
    });
    ensure!(restored == (1024, 768), "object members restored, got {restored:?}");
    Ok(())
}

#[rstest]
fn enum_entries_switch_variants(tree: ConfigTree) {
    let quality = value(&tree, "quality");
    assert_eq!(quality.kind(), EntryKind::Enum);
    assert!(quality.set_enum_variant("High"));
    assert_eq!(settings(|s| s.quality), Quality::High);
    assert!(!quality.set_enum_variant("Ultra"));
    assert!(quality.set_enum(EnumValue::of(Quality::Low)));
    assert_eq!(
        quality.get().as_ref().and_then(EnumValue::variant_of::<Quality>),
        Some(Quality::Low)
    );
}

#[rstest]
fn observable_entries_share_the_cell(tree: ConfigTree) {
    let theme = value(&tree, "theme");
    assert!(theme.is_observable());
    assert_eq!(theme.kind(), EntryKind::String);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    settings(|s| s.theme.subscribe(move |value: &String| sink.borrow_mut().push(value.clone())));

    assert!(theme.set_string("light"));
    assert_eq!(settings(|s| s.theme.get()), "light");
    settings(|s| s.theme.set(String::from("solarized")));
    assert_eq!(theme.get_string().as_deref(), Some("solarized"));
    assert_eq!(*seen.borrow(), vec![String::from("light"), String::from("solarized")]);
}

#[rstest]
fn metadata_is_exposed_on_entries(tree: ConfigTree) {
    let volume = value(&tree, "volume");
    let data = volume.data();
    assert!(data.is_slider());
    assert_eq!(data.comment().map(Comment::value), Some("Master volume"));
    assert_eq!(data.range(), Some(Range::new(0.0, 100.0)));
    assert_eq!(value(&tree, "name").data().pattern(), Some("[A-Za-z ]+"));
}
