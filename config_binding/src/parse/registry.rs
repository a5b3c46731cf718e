//! Dispatch across several configuration parsers.
//!
//! A host may hold parsers for more than one declaration style. The registry
//! asks each in descending priority and keeps the first tree produced.

use std::{cmp::Reverse, fmt};

use super::parse_with;
use crate::{error::BindingResult, options::ParseOptions, schema::ConfigType, tree::ConfigTree};

/// A parser that may recognise a candidate type.
pub trait ConfigParser {
    /// Ordering key; higher priorities are tried first.
    fn priority(&self) -> i32 {
        0
    }

    /// Builds a tree, or returns `Ok(None)` when `candidate` is not for this
    /// parser.
    ///
    /// # Errors
    ///
    /// Returns a [`BindingError`](crate::BindingError) when the candidate is
    /// recognised but malformed.
    fn parse(&self, candidate: ConfigType) -> BindingResult<Option<ConfigTree>>;
}

/// Parser for [`Configurable`](crate::Configurable) schemas.
#[derive(Debug, Clone, Default)]
pub struct SchemaParser {
    options: ParseOptions,
}

impl SchemaParser {
    /// Parser applying `options`.
    #[must_use]
    pub const fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Options applied to every parse.
    #[must_use]
    pub const fn options(&self) -> &ParseOptions {
        &self.options
    }
}

impl ConfigParser for SchemaParser {
    fn parse(&self, candidate: ConfigType) -> BindingResult<Option<ConfigTree>> {
        parse_with(candidate, &self.options)
    }
}

/// Ordered set of parsers.
///
/// # Examples
///
/// ```
/// use config_binding::{ParserRegistry, SchemaParser};
///
/// let registry = ParserRegistry::new().with(SchemaParser::default());
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Default)]
pub struct ParserRegistry {
    parsers: Vec<Box<dyn ConfigParser>>,
}

impl ParserRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `parser`, keeping the set sorted by descending priority.
    ///
    /// Parsers of equal priority keep their registration order.
    pub fn register(&mut self, parser: impl ConfigParser + 'static) {
        self.parsers.push(Box::new(parser));
        self.parsers
            .sort_by_key(|registered| Reverse(registered.priority()));
    }

    /// Builder form of [`ParserRegistry::register`].
    #[must_use]
    pub fn with(mut self, parser: impl ConfigParser + 'static) -> Self {
        self.register(parser);
        self
    }

    /// Number of registered parsers.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.parsers.len()
    }

    /// Whether no parser is registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    /// Returns the first tree any parser builds for `candidate`.
    ///
    /// # Errors
    ///
    /// Propagates the first error a parser reports; later parsers are not
    /// tried.
    pub fn parse(&self, candidate: ConfigType) -> BindingResult<Option<ConfigTree>> {
        for parser in &self.parsers {
            if let Some(tree) = parser.parse(candidate)? {
                return Ok(Some(tree));
            }
        }
        tracing::debug!(candidate = candidate.name(), "no parser recognised the candidate");
        Ok(None)
    }
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("parsers", &self.parsers.len())
            .finish()
    }
}
