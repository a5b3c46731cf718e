//! Serializable description of a configuration tree.
//!
//! The description is a snapshot: it records current values at the time it
//! was taken and holds no handles into the instances.

use serde::Serialize;

use super::ConfigTree;
use crate::{
    annotations::{Comment, ConfigInfo, Range, Separator},
    entry::{Button, ButtonPosition, Entry},
    kind::EntryKind,
    shape::Value,
};

/// Description of a root or category scope.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TreeDescription {
    /// Scope id.
    pub id: String,
    /// Short name of the declaring type.
    pub type_name: &'static str,
    /// Title and description, when declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<ConfigInfo>,
    /// Entries in declaration order.
    pub entries: Vec<EntryDescription>,
    /// Sub-categories in declaration order.
    pub categories: Vec<TreeDescription>,
    /// Buttons in declaration order.
    pub buttons: Vec<ButtonDescription>,
}

/// Description of one entry.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EntryDescription {
    /// Entry id.
    pub id: String,
    /// Entry kind.
    pub kind: EntryKind,
    /// Whether the entry holds an array.
    pub array: bool,
    /// Whether the entry is backed by an observable cell.
    pub observable: bool,
    /// Current value; absent for object entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Default captured at build time; absent for object entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Descriptive comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,
    /// Inclusive numeric bounds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Range>,
    /// Full-match pattern source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Slider display hint.
    pub slider: bool,
    /// Separator shown before the entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<Separator>,
    /// Translation key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    /// Members of an object entry.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<EntryDescription>,
}

/// Description of one button.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ButtonDescription {
    /// Title shown beside the button.
    pub title: String,
    /// Label on the button.
    pub text: String,
    /// Comment attached to the button property.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Id of the entry the button follows.
    pub target: String,
    /// Placement relative to the target.
    pub position: ButtonPosition,
}

impl TreeDescription {
    pub(super) fn of(tree: &ConfigTree) -> Self {
        let header = tree.header();
        Self {
            id: header.id().to_owned(),
            type_name: header.type_name(),
            info: header.info().cloned(),
            entries: tree
                .entries()
                .values()
                .map(|entry| EntryDescription::of(&**entry))
                .collect(),
            categories: tree.categories().values().map(Self::of).collect(),
            buttons: tree.buttons().iter().map(ButtonDescription::of).collect(),
        }
    }
}

impl EntryDescription {
    fn of(entry: &dyn Entry) -> Self {
        let data = entry.data();
        let backed = entry.as_value();
        Self {
            id: data.id().to_owned(),
            kind: entry.kind(),
            array: backed.is_some_and(|value| value.is_array()),
            observable: backed.is_some_and(|value| value.is_observable()),
            value: backed.and_then(|value| value.get()),
            default: backed.and_then(|value| value.default_value().cloned()),
            comment: data.comment().cloned(),
            range: data.range(),
            pattern: data.pattern().map(str::to_owned),
            slider: data.is_slider(),
            separator: data.separator().cloned(),
            translation: data.translation().map(str::to_owned),
            entries: entry
                .as_object()
                .map(|object| {
                    object
                        .entries()
                        .values()
                        .map(|member| Self::of(&**member))
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

impl ButtonDescription {
    fn of(button: &Button) -> Self {
        Self {
            title: button.title().to_owned(),
            text: button.text().to_owned(),
            description: button.description().map(str::to_owned),
            target: button.target().to_owned(),
            position: button.position(),
        }
    }
}
