//! Annotation types consumed by the binding.
//!
//! Their meaning belongs to the host engine; the binding only reads them.

use serde::Serialize;

use super::Annotation;
use crate::{
    entry::ButtonPosition,
    kind::EntryKind,
    schema::{ConfigType, Configurable},
};

/// Marks a type as a configuration root.
#[derive(Debug, Clone)]
pub struct Config {
    id: String,
    categories: Vec<ConfigType>,
}

impl Config {
    /// Root marker with the given id and no categories.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            categories: Vec::new(),
        }
    }

    /// Appends a nested category type.
    #[must_use]
    pub fn category<C: Configurable>(mut self) -> Self {
        self.categories.push(ConfigType::of::<C>());
        self
    }

    /// Config id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Declared category types, in order.
    #[must_use]
    pub fn categories(&self) -> &[ConfigType] {
        &self.categories
    }
}

impl Annotation for Config {}

/// Marks a type as a nested category.
#[derive(Debug, Clone)]
pub struct Category {
    id: String,
    categories: Vec<ConfigType>,
}

impl Category {
    /// Category marker with the given id and no sub-categories.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            categories: Vec::new(),
        }
    }

    /// Appends a nested sub-category type.
    #[must_use]
    pub fn category<C: Configurable>(mut self) -> Self {
        self.categories.push(ConfigType::of::<C>());
        self
    }

    /// Category id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Declared sub-category types, in order.
    #[must_use]
    pub fn categories(&self) -> &[ConfigType] {
        &self.categories
    }
}

impl Annotation for Category {}

/// Marks a property as a configuration entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    id: String,
    kind: Option<EntryKind>,
    translation: Option<String>,
}

impl ConfigEntry {
    /// Entry marker with the given id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: None,
            translation: None,
        }
    }

    /// Kind to use when the property's type is not recognised structurally.
    #[must_use]
    pub const fn with_kind(mut self, kind: EntryKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Translation key for the entry title.
    #[must_use]
    pub fn with_translation(mut self, key: impl Into<String>) -> Self {
        self.translation = Some(key.into());
        self
    }

    /// Entry id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Kind override, if any.
    #[must_use]
    pub const fn kind(&self) -> Option<EntryKind> {
        self.kind
    }

    /// Translation key, if any.
    #[must_use]
    pub fn translation(&self) -> Option<&str> {
        self.translation.as_deref()
    }
}

impl Annotation for ConfigEntry {}

/// Marks a type as a structured object usable as an object entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigObject;

impl Annotation for ConfigObject {}

/// Marks a property as an action button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigButton {
    title: String,
    text: String,
    position: ButtonPosition,
}

impl ConfigButton {
    /// Button with a title and the label shown on it.
    #[must_use]
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            position: ButtonPosition::After,
        }
    }

    /// Places the button before or after its target entry.
    #[must_use]
    pub const fn with_position(mut self, position: ButtonPosition) -> Self {
        self.position = position;
        self
    }

    /// Button title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Button label.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Placement relative to the target entry.
    #[must_use]
    pub const fn position(&self) -> ButtonPosition {
        self.position
    }
}

impl Annotation for ConfigButton {}

/// Human-readable description of an entry or button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    translation: Option<String>,
}

impl Comment {
    /// Comment text.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            translation: None,
        }
    }

    /// Translation key for the comment.
    #[must_use]
    pub fn with_translation(mut self, key: impl Into<String>) -> Self {
        self.translation = Some(key.into());
        self
    }

    /// Comment text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Translation key, if any.
    #[must_use]
    pub fn translation(&self) -> Option<&str> {
        self.translation.as_deref()
    }
}

impl Annotation for Comment {}

/// Inclusive numeric bounds checked on every numeric write.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range {
    min: f64,
    max: f64,
}

impl Range {
    /// Bounds `min..=max`.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Returns `true` when `value` lies within the bounds.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl Annotation for Range {}

/// Regular expression every string write must match in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
}

impl Pattern {
    /// Pattern with the given regular expression source.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Regular expression source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Annotation for Pattern {}

/// Display hint: render a ranged number as a slider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Slider;

impl Annotation for Slider {}

/// Display hint: draw a separator before the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Separator {
    title: String,
    description: String,
}

impl Separator {
    /// Separator with a title and description.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Separator title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Separator description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Annotation for Separator {}

/// Title and description shown for a config or category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigInfo {
    title: String,
    description: String,
}

impl ConfigInfo {
    /// Info block with a title and description.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Display description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Annotation for ConfigInfo {}
