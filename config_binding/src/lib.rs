//! Binds annotated configuration declarations to a host configuration tree.
//!
//! Types implement [`Configurable`] to register their properties, in order,
//! with a [`Schema`], attaching annotations such as [`ConfigEntry`],
//! [`Range`] or [`ConfigButton`]. [`parse`](fn@parse) turns a root type
//! marked with [`Config`] into a [`ConfigTree`] of value, observable and
//! object entries, buttons, and nested categories. Entries are live views:
//! writes go straight to the declared instance after range and pattern
//! checks.
//!
//! ```
//! use config_binding::{
//!     Annotations, Config, ConfigEntry, ConfigType, Configurable, Range, Schema, Shared, parse,
//!     shared,
//! };
//!
//! struct Audio {
//!     volume: i32,
//! }
//!
//! thread_local! {
//!     static AUDIO: Shared<Audio> = shared(Audio { volume: 40 });
//! }
//!
//! impl Configurable for Audio {
//!     fn declare(schema: &mut Schema<Self>) {
//!         schema
//!             .var("volume", |audio| &audio.volume, |audio| &mut audio.volume)
//!             .annotate(ConfigEntry::new("volume"))
//!             .annotate(Range::new(0.0, 100.0));
//!     }
//!
//!     fn annotations() -> Annotations {
//!         Annotations::new().with(Config::new("audio"))
//!     }
//!
//!     fn instance() -> Option<Shared<Self>> {
//!         Some(AUDIO.with(Shared::clone))
//!     }
//! }
//!
//! let tree = parse(ConfigType::of::<Audio>())?.expect("Audio is a configuration root");
//! let volume = tree.entry("volume").and_then(|entry| entry.as_value()).expect("value entry");
//! assert!(volume.set_integer(75));
//! assert!(!volume.set_integer(150));
//! assert_eq!(AUDIO.with(|audio| audio.borrow().volume), 75);
//! # Ok::<(), config_binding::BindingError>(())
//! ```

mod annotations;
mod entry;
mod error;
mod factory;
pub mod infer;
mod kind;
mod observable;
mod options;
mod parse;
mod schema;
mod shape;
mod tree;
mod validate;

pub use annotations::{
    Annotation, Annotations, Carrier, Carriers, Category, Comment, Config, ConfigButton,
    ConfigEntry, ConfigInfo, ConfigObject, Pattern, Range, Separator, Slider,
};
pub use entry::{
    Button, ButtonPosition, Entry, EntryData, EntryMap, NestedObjectEntry, ObjectEntry,
    ObservableEntry, PropertyEntry, ValueEntry,
};
pub use error::{BindingError, BindingResult, Violation, Violations, WriteError};
pub use kind::EntryKind;
pub use observable::{Observable, ObservableCell};
pub use options::{DuplicatePolicy, ParseOptions};
pub use parse::{ConfigParser, ParserRegistry, SchemaParser, parse, parse_with};
pub use schema::{
    BoundInstance, BoundProperty, ConfigType, Configurable, NestedInstance, Property, Schema,
    Shared, shared,
};
pub use shape::{Capture, ConfigEnum, Declared, EnumValue, TypeShape, Value};
pub use tree::{ButtonDescription, ConfigHeader, ConfigTree, EntryDescription, TreeDescription};
