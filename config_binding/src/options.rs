//! Parse-time options.

use serde::{Deserialize, Serialize};

/// What happens when two entries of one scope share an id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// The later entry replaces the earlier one in place.
    #[default]
    Overwrite,
    /// The parse fails with [`BindingError::DuplicateId`](crate::BindingError::DuplicateId).
    Reject,
}

/// Options accepted by [`parse_with`](crate::parse_with).
///
/// # Examples
///
/// ```
/// use config_binding::{DuplicatePolicy, ParseOptions};
///
/// let options = ParseOptions::default().with_duplicate_ids(DuplicatePolicy::Reject);
/// assert!(options.skip_missing_categories);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParseOptions {
    /// Handling of repeated entry ids.
    pub duplicate_ids: DuplicatePolicy,
    /// Skip categories without a live instance instead of failing.
    pub skip_missing_categories: bool,
}

impl ParseOptions {
    /// Sets [`ParseOptions::duplicate_ids`].
    #[must_use]
    pub const fn with_duplicate_ids(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_ids = policy;
        self
    }

    /// Sets [`ParseOptions::skip_missing_categories`].
    #[must_use]
    pub const fn with_skip_missing_categories(mut self, skip: bool) -> Self {
        self.skip_missing_categories = skip;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            duplicate_ids: DuplicatePolicy::Overwrite,
            skip_missing_categories: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{DuplicatePolicy, ParseOptions};

    #[rstest]
    fn missing_fields_take_defaults() -> anyhow::Result<()> {
        let options: ParseOptions = serde_json::from_str(r#"{"duplicate-ids":"reject"}"#)?;
        assert_eq!(options.duplicate_ids, DuplicatePolicy::Reject);
        assert!(options.skip_missing_categories);
        Ok(())
    }

    #[rstest]
    fn serializes_in_kebab_case() -> anyhow::Result<()> {
        let json = serde_json::to_value(ParseOptions::default().with_skip_missing_categories(false))?;
        assert_eq!(
            json,
            serde_json::json!({"duplicate-ids": "overwrite", "skip-missing-categories": false})
        );
        Ok(())
    }
}
