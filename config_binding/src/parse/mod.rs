//! Builds configuration trees from declared roots and categories.
//!
//! The root type must carry a [`Config`] annotation and expose a live
//! instance. Its properties are walked in declaration order: entry
//! properties are inferred, validated and inserted under their id, and
//! button properties are attached to the last id in the scope's order. The
//! categories listed on the root are then built the same way and keyed by
//! their own ids.

mod registry;

use std::any::TypeId;

use crate::{
    annotations::{Category, Comment, Config, ConfigButton, ConfigEntry, ConfigInfo},
    entry::{Button, Entry, EntryMap},
    error::{BindingError, BindingResult},
    factory::{self, Objects},
    infer,
    options::{DuplicatePolicy, ParseOptions},
    schema::{BoundInstance, BoundProperty, ConfigType, NestedInstance},
    tree::{ConfigHeader, ConfigTree},
    validate,
};

pub use registry::{ConfigParser, ParserRegistry, SchemaParser};

/// Parses `candidate` with default [`ParseOptions`].
///
/// # Errors
///
/// Returns a [`BindingError`] when `candidate` is a configuration root whose
/// declarations are malformed.
pub fn parse(candidate: ConfigType) -> BindingResult<Option<ConfigTree>> {
    parse_with(candidate, &ParseOptions::default())
}

/// Parses `candidate` into a configuration tree.
///
/// Returns `Ok(None)` when the type has no [`Config`] annotation or no live
/// instance, so another parser may try it.
///
/// # Errors
///
/// Returns a [`BindingError`] naming the offending property or type when a
/// declaration breaks an entry, button or category rule. No partial tree is
/// returned.
pub fn parse_with(candidate: ConfigType, options: &ParseOptions) -> BindingResult<Option<ConfigTree>> {
    let annotations = candidate.annotations();
    let Some(config) = annotations.get::<Config>() else {
        tracing::debug!(candidate = candidate.name(), "no Config annotation; not a configuration root");
        return Ok(None);
    };
    let Some(instance) = candidate.instance()? else {
        tracing::debug!(candidate = candidate.name(), "configuration root has no live instance");
        return Ok(None);
    };

    let header = ConfigHeader::new(
        config.id().to_owned(),
        candidate.name(),
        annotations.get::<ConfigInfo>().cloned(),
        None,
    );
    let mut populator = Populator::new(options);
    let tree = populator.tree(header, &instance, config.categories())?;
    tracing::debug!(
        id = tree.id(),
        entries = tree.entries().len(),
        categories = tree.categories().len(),
        "built configuration tree"
    );
    Ok(Some(tree))
}

/// Walks declarations and assembles scopes.
struct Populator<'opts> {
    options: &'opts ParseOptions,
    path: Vec<TypeId>,
}

impl<'opts> Populator<'opts> {
    const fn new(options: &'opts ParseOptions) -> Self {
        Self {
            options,
            path: Vec::new(),
        }
    }

    fn tree(
        &mut self,
        header: ConfigHeader,
        instance: &BoundInstance,
        categories: &[ConfigType],
    ) -> BindingResult<ConfigTree> {
        self.path.push(instance.type_id());
        let built = self.scope_tree(header, instance, categories);
        self.path.pop();
        built
    }

    fn scope_tree(
        &mut self,
        header: ConfigHeader,
        instance: &BoundInstance,
        categories: &[ConfigType],
    ) -> BindingResult<ConfigTree> {
        let mut scope = Scope::new(instance.owner(), self.options.duplicate_ids);
        for property in instance.properties() {
            if let Some(declared) = property.resolve::<ConfigEntry>() {
                let entry = self.entry(property, declared, Objects::Allowed)?;
                scope.insert(entry)?;
            }
            if let Some(declared) = property.resolve::<ConfigButton>() {
                scope.push_button(button(property, declared, scope.target())?);
            }
        }

        let parent = header.id().to_owned();
        let (entries, buttons) = scope.finish();
        let mut tree = ConfigTree::new(header, entries, buttons);
        for category in categories {
            if let Some(subtree) = self.category(*category, &parent)? {
                tree.insert_category(subtree);
            }
        }
        Ok(tree)
    }

    fn category(&mut self, category: ConfigType, parent: &str) -> BindingResult<Option<ConfigTree>> {
        if self.path.contains(&category.type_id()) {
            tracing::warn!(category = category.name(), "category already on the current path; skipping cycle");
            return Ok(None);
        }
        let annotations = category.annotations();
        let marker = annotations
            .get::<Category>()
            .ok_or(BindingError::MissingAnnotation {
                annotation: "Category",
                owner: category.name(),
            })?;
        let Some(instance) = category.instance()? else {
            if self.options.skip_missing_categories {
                tracing::debug!(category = category.name(), "category has no live instance; skipping");
                return Ok(None);
            }
            return Err(BindingError::MissingInstance {
                owner: category.name(),
            });
        };

        let header = ConfigHeader::new(
            marker.id().to_owned(),
            category.name(),
            annotations.get::<ConfigInfo>().cloned(),
            Some(parent.to_owned()),
        );
        let subtree = self.tree(header, &instance, marker.categories())?;
        tracing::debug!(
            id = subtree.id(),
            parent,
            entries = subtree.entries().len(),
            "built category"
        );
        Ok(Some(subtree))
    }

    fn entry(
        &self,
        property: &BoundProperty,
        declared: &ConfigEntry,
        objects: Objects,
    ) -> BindingResult<Box<dyn Entry>> {
        let observed = property.observed_shape();
        let inference = infer::entry_kind(property.shape(), observed.as_ref(), declared.kind())
            .map_err(|err| BindingError::UnknownType {
                property: property.name(),
                owner: property.owner(),
                type_name: err.into_type_name(),
            })?;
        tracing::trace!(
            property = property.name(),
            owner = property.owner(),
            kind = %inference.kind(),
            array = inference.is_array(),
            observable = property.is_observable(),
            "classified property"
        );
        let data = validate::entry(property, declared, &inference)?;
        factory::create(property, data, inference, objects, |nested| {
            self.object_members(nested)
        })
    }

    /// Members of an object entry: no nested objects, no buttons, and every
    /// value must have a default.
    fn object_members(&self, nested: &NestedInstance) -> BindingResult<EntryMap> {
        let instance = nested.bind()?;
        let mut scope = Scope::new(instance.owner(), self.options.duplicate_ids);
        for property in instance.properties() {
            if property.resolve::<ConfigButton>().is_some() {
                return Err(BindingError::NestedButton {
                    property: property.name(),
                    owner: property.owner(),
                });
            }
            let Some(declared) = property.resolve::<ConfigEntry>() else {
                continue;
            };
            let entry = self.entry(property, declared, Objects::Forbidden)?;
            if entry.as_value().is_some_and(|value| value.default_value().is_none()) {
                return Err(BindingError::MissingDefault {
                    property: property.name(),
                    owner: property.owner(),
                });
            }
            scope.insert(entry)?;
        }
        Ok(scope.finish().0)
    }
}

fn button(property: &BoundProperty, declared: &ConfigButton, target: String) -> BindingResult<Button> {
    let action = validate::button(property)?;
    tracing::trace!(property = property.name(), button_target = %target, "attached button");
    Ok(Button::new(
        declared.title().to_owned(),
        declared.text().to_owned(),
        property.resolve::<Comment>().map(|comment| comment.value().to_owned()),
        target,
        declared.position(),
        action,
    ))
}

/// Entries and buttons of the scope being built.
struct Scope {
    owner: &'static str,
    policy: DuplicatePolicy,
    entries: EntryMap,
    buttons: Vec<Button>,
}

impl Scope {
    fn new(owner: &'static str, policy: DuplicatePolicy) -> Self {
        Self {
            owner,
            policy,
            entries: EntryMap::default(),
            buttons: Vec::new(),
        }
    }

    fn insert(&mut self, entry: Box<dyn Entry>) -> BindingResult<()> {
        let id = entry.id().to_owned();
        if self.entries.contains_key(&id) {
            if self.policy == DuplicatePolicy::Reject {
                return Err(BindingError::DuplicateId { id, owner: self.owner });
            }
            tracing::warn!(id = %id, owner = self.owner, "duplicate entry id overwrites the earlier entry");
        }
        self.entries.insert(id, entry);
        Ok(())
    }

    /// Last id in map order; an overwritten id keeps its first position.
    fn target(&self) -> String {
        self.entries
            .last()
            .map(|(id, _)| id.clone())
            .unwrap_or_default()
    }

    fn push_button(&mut self, button: Button) {
        self.buttons.push(button);
    }

    fn finish(self) -> (EntryMap, Vec<Button>) {
        (self.entries, self.buttons)
    }
}
