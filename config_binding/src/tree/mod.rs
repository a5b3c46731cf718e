//! The configuration tree handed to the host engine.
//!
//! A tree is a live view: its entries hold handles into the declared
//! instances, so writes through an entry change the instance and the other
//! way round.

mod describe;

use indexmap::IndexMap;

pub use describe::{ButtonDescription, EntryDescription, TreeDescription};

use crate::{
    annotations::ConfigInfo,
    entry::{Button, Entry, EntryMap, ObjectEntry},
};

/// Identity of a root or category scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigHeader {
    id: String,
    type_name: &'static str,
    info: Option<ConfigInfo>,
    parent: Option<String>,
}

impl ConfigHeader {
    pub(crate) const fn new(
        id: String,
        type_name: &'static str,
        info: Option<ConfigInfo>,
        parent: Option<String>,
    ) -> Self {
        Self {
            id,
            type_name,
            info,
            parent,
        }
    }

    /// Id from the `Config` or `Category` annotation.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Short name of the declaring type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Title and description from [`ConfigInfo`].
    #[must_use]
    pub const fn info(&self) -> Option<&ConfigInfo> {
        self.info.as_ref()
    }

    /// Id of the enclosing scope; `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}

/// A root or category scope with its entries, sub-categories and buttons.
#[derive(Debug)]
pub struct ConfigTree {
    header: ConfigHeader,
    entries: EntryMap,
    categories: IndexMap<String, Self>,
    buttons: Vec<Button>,
}

impl ConfigTree {
    pub(crate) fn new(header: ConfigHeader, entries: EntryMap, buttons: Vec<Button>) -> Self {
        Self {
            header,
            entries,
            categories: IndexMap::new(),
            buttons,
        }
    }

    pub(crate) fn insert_category(&mut self, category: Self) {
        self.categories
            .insert(category.header.id.clone(), category);
    }

    /// Scope identity.
    #[must_use]
    pub const fn header(&self) -> &ConfigHeader {
        &self.header
    }

    /// Scope id; shorthand for `self.header().id()`.
    #[must_use]
    pub fn id(&self) -> &str {
        self.header.id()
    }

    /// Entries in declaration order.
    #[must_use]
    pub const fn entries(&self) -> &EntryMap {
        &self.entries
    }

    /// Entry of this scope with the given id.
    #[must_use]
    pub fn entry(&self, id: &str) -> Option<&dyn Entry> {
        self.entries.get(id).map(Box::as_ref)
    }

    /// Sub-categories keyed by id, in declaration order.
    #[must_use]
    pub const fn categories(&self) -> &IndexMap<String, Self> {
        &self.categories
    }

    /// Sub-category with the given id.
    #[must_use]
    pub fn category(&self, id: &str) -> Option<&Self> {
        self.categories.get(id)
    }

    /// Buttons in declaration order.
    #[must_use]
    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Resolves a dotted path through categories and object entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use config_binding::{
    ///     Annotations, Config, ConfigEntry, ConfigType, Configurable, Schema, Shared, parse, shared,
    /// };
    ///
    /// struct Root {
    ///     level: i32,
    /// }
    ///
    /// thread_local! {
    ///     static ROOT: Shared<Root> = shared(Root { level: 1 });
    /// }
    ///
    /// impl Configurable for Root {
    ///     fn declare(schema: &mut Schema<Self>) {
    ///         schema
    ///             .var("level", |root| &root.level, |root| &mut root.level)
    ///             .annotate(ConfigEntry::new("level"));
    ///     }
    ///
    ///     fn annotations() -> Annotations {
    ///         Annotations::new().with(Config::new("demo"))
    ///     }
    ///
    ///     fn instance() -> Option<Shared<Self>> {
    ///         Some(ROOT.with(Shared::clone))
    ///     }
    /// }
    ///
    /// let tree = parse(ConfigType::of::<Root>())?.expect("Root is a config root");
    /// assert!(tree.entry_at("level").is_some());
    /// assert!(tree.entry_at("missing.level").is_none());
    /// # Ok::<(), config_binding::BindingError>(())
    /// ```
    #[must_use]
    pub fn entry_at(&self, path: &str) -> Option<&dyn Entry> {
        let Some((head, rest)) = path.split_once('.') else {
            return self.entry(path);
        };
        self.categories.get(head).map_or_else(
            || object_entry_at(self.entries.get(head)?.as_object()?, rest),
            |category| category.entry_at(rest),
        )
    }

    /// Resets every entry of this scope and of every sub-category.
    pub fn reset_all(&self) {
        self.entries.values().for_each(|entry| entry.reset());
        self.categories.values().for_each(Self::reset_all);
    }

    /// Serializable snapshot of the tree's structure and current values.
    #[must_use]
    pub fn describe(&self) -> TreeDescription {
        TreeDescription::of(self)
    }
}

fn object_entry_at<'tree>(object: &'tree dyn ObjectEntry, path: &str) -> Option<&'tree dyn Entry> {
    path.split_once('.').map_or_else(
        || object.entry(path),
        |(head, rest)| object_entry_at(object.entry(head)?.as_object()?, rest),
    )
}
