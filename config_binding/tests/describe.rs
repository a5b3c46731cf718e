//! Tree descriptions and multi-parser dispatch.

use std::rc::Rc;

use anyhow::{Context, Result, ensure};
use config_binding::{
    Annotations, BindingResult, Category, Comment, Config, ConfigButton, ConfigEntry, ConfigInfo,
    ConfigParser, ConfigTree, ConfigType, Configurable, ParserRegistry, Range, Schema,
    SchemaParser, Separator, Shared, shared,
};
use rstest::rstest;
use serde_json::json;

thread_local! {
    static PANEL: Shared<Panel> = shared(Panel { brightness: 70, reload });
    static NETWORK: Shared<Network> = shared(Network { host: String::from("localhost") });
}

fn reload() {}

struct Panel {
    brightness: i32,
    reload: fn(),
}

impl Configurable for Panel {
    fn declare(schema: &mut Schema<Self>) {
        schema
            .var("brightness", |p| &p.brightness, |p| &mut p.brightness)
            .annotate(ConfigEntry::new("brightness").with_translation("panel.brightness"))
            .annotate(Range::new(0.0, 100.0))
            .annotate(Separator::new("Display", "Screen settings"));
        schema
            .val("reload", |p| &p.reload)
            .annotate(ConfigButton::new("Reload", "Apply"))
            .annotate(Comment::new("Re-read the panel"));
    }

    fn annotations() -> Annotations {
        Annotations::new()
            .with(Config::new("panel").category::<Network>())
            .with(ConfigInfo::new("Panel", "Panel settings"))
    }

    fn instance() -> Option<Shared<Self>> {
        Some(PANEL.with(Rc::clone))
    }
}

struct Network {
    host: String,
}

impl Configurable for Network {
    fn declare(schema: &mut Schema<Self>) {
        schema
            .var("host", |n| &n.host, |n| &mut n.host)
            .annotate(ConfigEntry::new("host"));
    }

    fn annotations() -> Annotations {
        Annotations::new().with(Category::new("network"))
    }

    fn instance() -> Option<Shared<Self>> {
        Some(NETWORK.with(Rc::clone))
    }
}

#[rstest]
fn description_serializes_the_whole_tree() -> Result<()> {
    let tree = config_binding::parse(ConfigType::of::<Panel>())?.context("panel is a root")?;
    let described = serde_json::to_value(tree.describe())?;
    let expected = json!({
        "id": "panel",
        "type_name": "Panel",
        "info": { "title": "Panel", "description": "Panel settings" },
        "entries": [{
            "id": "brightness",
            "kind": "INTEGER",
            "array": false,
            "observable": false,
            "value": 70,
            "default": 70,
            "range": { "min": 0.0, "max": 100.0 },
            "slider": false,
            "separator": { "title": "Display", "description": "Screen settings" },
            "translation": "panel.brightness"
        }],
        "categories": [{
            "id": "network",
            "type_name": "Network",
            "entries": [{
                "id": "host",
                "kind": "STRING",
                "array": false,
                "observable": false,
                "value": "localhost",
                "default": "localhost",
                "slider": false
            }],
            "categories": [],
            "buttons": []
        }],
        "buttons": [{
            "title": "Reload",
            "text": "Apply",
            "description": "Re-read the panel",
            "target": "brightness",
            "position": "after"
        }]
    });
    ensure!(described == expected, "unexpected description: {described:#}");
    Ok(())
}

#[rstest]
fn description_reflects_current_values() -> Result<()> {
    let tree = config_binding::parse(ConfigType::of::<Panel>())?.context("panel is a root")?;
    let brightness = tree
        .entry("brightness")
        .and_then(|entry| entry.as_value())
        .context("brightness")?;
    ensure!(brightness.set_integer(20), "write accepted");
    let described = tree.describe();
    let entry = described.entries.first().context("one entry")?;
    ensure!(
        serde_json::to_value(&entry.value)? == json!(20),
        "value should be the current one"
    );
    ensure!(
        serde_json::to_value(&entry.default)? == json!(70),
        "default should be the captured one"
    );
    Ok(())
}

/// Parser that claims every candidate with a fixed result.
struct Claiming {
    priority: i32,
    claims: bool,
}

impl ConfigParser for Claiming {
    fn priority(&self) -> i32 {
        self.priority
    }

    fn parse(&self, candidate: ConfigType) -> BindingResult<Option<ConfigTree>> {
        if self.claims {
            SchemaParser::default().parse(candidate)
        } else {
            Ok(None)
        }
    }
}

#[rstest]
fn registry_returns_the_first_tree_by_priority() -> Result<()> {
    let registry = ParserRegistry::new()
        .with(Claiming {
            priority: -5,
            claims: true,
        })
        .with(Claiming {
            priority: 10,
            claims: false,
        })
        .with(SchemaParser::default());
    ensure!(registry.len() == 3, "three parsers registered");
    let tree = registry
        .parse(ConfigType::of::<Panel>())?
        .context("some parser should claim the panel")?;
    ensure!(tree.id() == "panel", "panel tree expected");
    Ok(())
}

#[rstest]
fn registry_yields_nothing_when_no_parser_claims() -> Result<()> {
    let registry = ParserRegistry::new().with(Claiming {
        priority: 0,
        claims: false,
    });
    ensure!(registry.parse(ConfigType::of::<Panel>())?.is_none(), "no tree expected");
    ensure!(ParserRegistry::default().is_empty(), "default registry is empty");
    Ok(())
}
