//! Action buttons attached to a scope.

use std::{fmt, rc::Rc};

use serde::Serialize;

/// Where a button is placed relative to its target entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ButtonPosition {
    /// Before the target entry.
    Before,
    /// After the target entry.
    #[default]
    After,
}

/// A zero-argument action declared alongside a scope's entries.
#[derive(Clone)]
pub struct Button {
    title: String,
    text: String,
    description: Option<String>,
    target: String,
    position: ButtonPosition,
    action: Rc<dyn Fn()>,
}

impl Button {
    pub(crate) const fn new(
        title: String,
        text: String,
        description: Option<String>,
        target: String,
        position: ButtonPosition,
        action: Rc<dyn Fn()>,
    ) -> Self {
        Self {
            title,
            text,
            description,
            target,
            position,
            action,
        }
    }

    /// Title shown beside the button.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Label on the button itself.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Comment attached to the button property.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Id of the entry declared most recently before the button.
    ///
    /// Empty when the button precedes every entry of its scope.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Placement relative to [`Button::target`].
    #[must_use]
    pub const fn position(&self) -> ButtonPosition {
        self.position
    }

    /// Runs the action.
    pub fn invoke(&self) {
        (self.action)();
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("title", &self.title)
            .field("text", &self.text)
            .field("target", &self.target)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}
