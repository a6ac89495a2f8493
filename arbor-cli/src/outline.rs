//! JSON outlines: the nested description a tree is built from.
//!
//! ```json
//! [
//!   { "label": "Folder", "children": [
//!       { "label": "File1" },
//!       { "label": "File2", "selected": true }
//!   ] }
//! ]
//! ```

use std::fs;
use std::path::Path;

use arbor::{Icon, Identifier, TreeItemBuilder, TreeItems, TreeItemsBuilder};
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// One node of an outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    pub label: String,
    #[serde(default = "default_expanded")]
    pub expanded: bool,
    #[serde(default)]
    pub selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OutlineNode>,
}

fn default_expanded() -> bool {
    true
}

impl OutlineNode {
    fn builder(self) -> TreeItemBuilder<String> {
        let mut builder = TreeItemBuilder::new(self.label)
            .expanded(self.expanded)
            .selected(self.selected);
        if let Some(icon) = self.icon {
            builder = builder.icon(Icon::named(icon));
        }
        if let Some(icon) = self.expanded_icon {
            builder = builder.expanded_icon(Icon::named(icon));
        }
        for child in self.children {
            builder = builder.with_child(child.builder());
        }
        builder
    }
}

/// Parse an outline from JSON text.
pub fn parse(text: &str) -> Result<Vec<OutlineNode>, CliError> {
    Ok(serde_json::from_str(text)?)
}

/// Read an outline file.
pub fn load(path: &Path) -> Result<Vec<OutlineNode>, CliError> {
    let text = fs::read_to_string(path)?;
    parse(&text)
}

/// Build a forest from an outline, keyed by normalized label.
pub fn build(outline: Vec<OutlineNode>) -> TreeItems<String> {
    let mut forest = TreeItemsBuilder::new();
    for node in outline {
        forest.add(node.builder());
    }
    forest.build(Identifier::from_display())
}

/// The tree shown when no outline file is given.
pub fn sample() -> TreeItems<String> {
    let mut forest = TreeItemsBuilder::new();
    forest.item("Application Launcher".into(), |launcher| {
        launcher.item("Application 1".into(), |app| {
            app.child("Settings".into());
            app.child("Current".into());
        });
        launcher.item("Application 2".into(), |app| {
            app.child("Settings".into());
            app.item("Loader".into(), |loader| {
                loader.child("Loading App 1".into());
                loader.child("Loading App 2".into());
                loader.child("Loading App 3".into());
            });
        });
    });
    forest.item("Cost Management".into(), |cost| {
        cost.item("Application 3".into(), |app| {
            app.child("Settings".into());
            app.child("Current".into());
        });
    });
    forest.item("Sources".into(), |sources| {
        sources.child("Application 4".into());
    });
    forest.item(
        "Really long folder name that overflows the container it is in".into(),
        |folder| {
            folder.child("Application 5".into());
        },
    );
    forest.build(Identifier::from_display())
}
