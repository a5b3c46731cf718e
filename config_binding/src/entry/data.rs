//! Metadata shared by every entry variant.

use std::fmt;

use regex::Regex;

use crate::{
    annotations::{Comment, Range, Separator},
    error::WriteError,
    kind::EntryKind,
    shape::Value,
};

/// Identity and constraint metadata of one entry.
#[derive(Debug, Clone)]
pub struct EntryData {
    id: String,
    translation: Option<String>,
    comment: Option<Comment>,
    range: Option<Range>,
    pattern: Option<CompiledPattern>,
    slider: bool,
    separator: Option<Separator>,
}

impl EntryData {
    pub(crate) const fn new(id: String, translation: Option<String>) -> Self {
        Self {
            id,
            translation,
            comment: None,
            range: None,
            pattern: None,
            slider: false,
            separator: None,
        }
    }

    pub(crate) fn with_comment(mut self, comment: Option<Comment>) -> Self {
        self.comment = comment;
        self
    }

    pub(crate) const fn with_range(mut self, range: Option<Range>) -> Self {
        self.range = range;
        self
    }

    pub(crate) fn with_pattern(mut self, pattern: Option<CompiledPattern>) -> Self {
        self.pattern = pattern;
        self
    }

    pub(crate) const fn with_slider(mut self, slider: bool) -> Self {
        self.slider = slider;
        self
    }

    pub(crate) fn with_separator(mut self, separator: Option<Separator>) -> Self {
        self.separator = separator;
        self
    }

    /// Entry id, unique within its scope.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Translation key declared on the entry.
    #[must_use]
    pub fn translation(&self) -> Option<&str> {
        self.translation.as_deref()
    }

    /// Descriptive comment.
    #[must_use]
    pub const fn comment(&self) -> Option<&Comment> {
        self.comment.as_ref()
    }

    /// Inclusive numeric bounds.
    #[must_use]
    pub const fn range(&self) -> Option<Range> {
        self.range
    }

    /// Source of the full-match pattern constraint.
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(CompiledPattern::source)
    }

    /// Whether the entry is presented as a slider.
    #[must_use]
    pub const fn is_slider(&self) -> bool {
        self.slider
    }

    /// Separator shown before the entry.
    #[must_use]
    pub const fn separator(&self) -> Option<&Separator> {
        self.separator.as_ref()
    }

    /// Checks `value` against the range and pattern constraints.
    ///
    /// Arrays are checked element by element.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::OutOfRange`] or [`WriteError::PatternMismatch`]
    /// for the first element that violates a constraint.
    pub fn check(&self, value: &Value) -> Result<(), WriteError> {
        match value {
            Value::Array(items) => items.iter().try_for_each(|item| self.check(item)),
            Value::String(text) => self.check_pattern(text),
            scalar if scalar.kind().is_some_and(EntryKind::is_numeric) => self.check_range(scalar),
            _ => Ok(()),
        }
    }

    fn check_range(&self, value: &Value) -> Result<(), WriteError> {
        let (Some(range), Some(number)) = (self.range, value.as_f64()) else {
            return Ok(());
        };
        if range.contains(number) {
            Ok(())
        } else {
            Err(WriteError::OutOfRange {
                value: number,
                min: range.min(),
                max: range.max(),
            })
        }
    }

    fn check_pattern(&self, text: &str) -> Result<(), WriteError> {
        let Some(pattern) = &self.pattern else {
            return Ok(());
        };
        if pattern.matches(text) {
            Ok(())
        } else {
            Err(WriteError::PatternMismatch {
                value: text.to_owned(),
                pattern: pattern.source().to_owned(),
            })
        }
    }
}

/// A pattern annotation compiled for whole-string matching.
#[derive(Clone)]
pub(crate) struct CompiledPattern {
    source: String,
    regex: Regex,
}

impl CompiledPattern {
    pub(crate) fn compile(source: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{source})$"))?;
        Ok(Self {
            source: source.to_owned(),
            regex,
        })
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompiledPattern").field(&self.source).finish()
    }
}
