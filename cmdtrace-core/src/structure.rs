// cmdtrace-core/src/structure.rs
//! Flattening of a [`CommandTree`] into a nested [`StructureMap`].
//!
//! The map mirrors the command hierarchy: groups become nested maps, and each
//! terminal command maps either to its option-strings (raw mode, every option
//! pointing at `null`) or to its rendered help text (help mode).
//!
//! License: MIT OR APACHE 2.0

use indexmap::{map, IndexMap};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_ROOT_NAME;
use crate::errors::CoreError;
use crate::tree::CommandTree;

/// Nested mapping produced by [`flatten`]. Keys keep the order in which the
/// host declared them.
pub type StructureMap = IndexMap<String, StructureNode>;

/// A value in a [`StructureMap`]: either a nested map or a leaf that is
/// null or a string. Serialises as a plain object, string or null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StructureNode {
    Branch(StructureMap),
    Leaf(Option<String>),
}

impl StructureNode {
    pub fn as_branch(&self) -> Option<&StructureMap> {
        match self {
            StructureNode::Branch(map) => Some(map),
            StructureNode::Leaf(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StructureNode::Leaf(Some(text)) => Some(text),
            _ => None,
        }
    }
}

/// Flattens `tree` using [`DEFAULT_ROOT_NAME`] for unnamed groups.
pub fn flatten(tree: &CommandTree, include_help: bool) -> StructureMap {
    flatten_with_root(tree, include_help, DEFAULT_ROOT_NAME)
}

/// Flattens `tree` depth-first. Groups the host reports without a name are
/// keyed by `root_name`.
pub fn flatten_with_root(tree: &CommandTree, include_help: bool, root_name: &str) -> StructureMap {
    let mut output = StructureMap::new();
    flatten_into(tree, include_help, root_name, &mut output);
    debug!(
        "Flattened command tree (include_help={}) into {} top-level entries.",
        include_help,
        output.len()
    );
    output
}

fn flatten_into(node: &CommandTree, include_help: bool, root_name: &str, output: &mut StructureMap) {
    match node {
        CommandTree::Group(group) => {
            let mut children = StructureMap::new();
            for child in group.children() {
                flatten_into(child, include_help, root_name, &mut children);
            }
            let name = group.name().unwrap_or(root_name);
            output.insert(name.to_string(), StructureNode::Branch(children));
        }
        CommandTree::Command(command) => {
            let value = if include_help {
                StructureNode::Leaf(Some(command.render_help().to_string()))
            } else {
                StructureNode::Branch(
                    command
                        .option_strings()
                        .iter()
                        .map(|opt| (opt.clone(), StructureNode::Leaf(None)))
                        .collect(),
                )
            };
            output.insert(command.name().to_string(), value);
        }
    }
}

/// Iterates every entry of `map` in pre-order.
///
/// A nested map yields `(key, None)` before its own entries; a leaf yields
/// `(key, value)`.
pub fn recursive_items(map: &StructureMap) -> RecursiveItems<'_> {
    RecursiveItems {
        stack: vec![map.iter()],
    }
}

/// Iterator returned by [`recursive_items`].
pub struct RecursiveItems<'a> {
    stack: Vec<map::Iter<'a, String, StructureNode>>,
}

impl<'a> Iterator for RecursiveItems<'a> {
    type Item = (&'a str, Option<&'a str>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let current = self.stack.last_mut()?;
            match current.next() {
                Some((key, StructureNode::Branch(children))) => {
                    self.stack.push(children.iter());
                    return Some((key.as_str(), None));
                }
                Some((key, StructureNode::Leaf(value))) => {
                    return Some((key.as_str(), value.as_deref()));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Builds a [`StructureMap`] from an untyped JSON value.
///
/// Anything other than nested objects with string or null leaves is rejected.
pub fn structure_from_value(value: serde_json::Value) -> Result<StructureMap, CoreError> {
    serde_json::from_value(value).map_err(|e| CoreError::InvalidStructure(e.to_string()))
}

/// Parses a JSON structure document.
pub fn structure_from_json(text: &str) -> Result<StructureMap, CoreError> {
    serde_json::from_str(text).map_err(|e| CoreError::InvalidStructure(e.to_string()))
}

/// Parses a YAML structure document.
pub fn structure_from_yaml(text: &str) -> Result<StructureMap, CoreError> {
    serde_yml::from_str(text).map_err(|e| CoreError::InvalidStructure(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Command, Group};
    use serde_json::json;

    fn sample_tree() -> CommandTree {
        Group::unnamed()
            .with_child(
                Command::new("run")
                    .with_options(["-p", "--pipeline", "--help"])
                    .with_help("Usage: run [OPTIONS]\n\n  Run the pipeline."),
            )
            .with_child(
                Group::new("pipeline").with_child(
                    Command::new("create")
                        .with_options(["--skip-config", "--help"])
                        .with_help("Usage: pipeline create [OPTIONS] NAME"),
                ),
            )
            .into()
    }

    #[test]
    fn test_flatten_raw_maps_options_to_null() {
        let structure = flatten_with_root(&sample_tree(), false, "flowctl");
        let root = structure["flowctl"].as_branch().unwrap();
        let run = root["run"].as_branch().unwrap();

        let mut keys: Vec<&str> = run.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, vec!["--help", "--pipeline", "-p"]);
        assert!(run.values().all(|v| *v == StructureNode::Leaf(None)));

        let create = root["pipeline"].as_branch().unwrap()["create"].as_branch().unwrap();
        assert_eq!(create.len(), 2);
    }

    #[test]
    fn test_flatten_keeps_declaration_order() {
        let tree: CommandTree = Group::new("tool")
            .with_child(Command::new("run").with_options(["--pipeline", "-p"]))
            .with_child(Command::new("info"))
            .with_child(Group::new("catalog"))
            .into();
        let structure = flatten(&tree, false);
        let root = structure["tool"].as_branch().unwrap();

        let keys: Vec<&str> = root.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["run", "info", "catalog"]);
        let rendered = serde_json::to_string(&structure).unwrap();
        assert!(rendered.find("\"run\"").unwrap() < rendered.find("\"catalog\"").unwrap());
    }

    #[test]
    fn test_flatten_help_uses_rendered_text() {
        let structure = flatten_with_root(&sample_tree(), true, "flowctl");
        let root = structure["flowctl"].as_branch().unwrap();

        assert!(root["run"].as_text().unwrap().starts_with("Usage:"));
        let pipeline = root["pipeline"].as_branch().unwrap();
        assert_eq!(
            pipeline["create"].as_text(),
            Some("Usage: pipeline create [OPTIONS] NAME")
        );
    }

    #[test]
    fn test_flatten_named_root_keeps_its_name() {
        let tree: CommandTree = Group::new("tool").into();
        let structure = flatten(&tree, false);
        assert_eq!(structure.len(), 1);
        assert_eq!(structure["tool"], StructureNode::Branch(StructureMap::new()));
    }

    #[test]
    fn test_flatten_unnamed_root_uses_default() {
        let tree: CommandTree = Group::unnamed().into();
        let structure = flatten(&tree, false);
        assert!(structure.contains_key(DEFAULT_ROOT_NAME));
    }

    #[test]
    fn test_flatten_does_not_touch_input() {
        let tree = sample_tree();
        let before = tree.clone();
        let _ = flatten(&tree, true);
        assert_eq!(tree, before);
    }

    #[test]
    fn test_recursive_items_counts() {
        let cases = vec![
            (json!({}), 0),
            (json!({"a": "foo"}), 1),
            (json!({"a": {"b": "bar"}, "c": {}}), 3),
            (
                json!({
                    "a": {"b": "bar"},
                    "c": null,
                    "d": {"e": "fizz"},
                    "f": {"g": {"h": "buzz"}}
                }),
                8,
            ),
        ];

        for (input, expected) in cases {
            let structure = structure_from_value(input.clone()).unwrap();
            assert_eq!(recursive_items(&structure).count(), expected, "input: {}", input);
        }
    }

    #[test]
    fn test_recursive_items_yields_branch_key_before_children() {
        let structure = structure_from_value(json!({"a": {"b": "bar"}, "c": null})).unwrap();
        let items: Vec<_> = recursive_items(&structure).collect();
        assert_eq!(items, vec![("a", None), ("b", Some("bar")), ("c", None)]);
    }

    #[test]
    fn test_structure_rejects_other_value_kinds() {
        assert!(matches!(
            structure_from_value(json!({"a": 1})),
            Err(CoreError::InvalidStructure(_))
        ));
        assert!(structure_from_json(r#"{"a": ["x"]}"#).is_err());
        assert!(structure_from_yaml("a:\n  b:\n    - x\n").is_err());
    }

    #[test]
    fn test_structure_from_yaml_accepts_nulls_and_strings() {
        let structure = structure_from_yaml("flowctl:\n  run:\n    \"--pipeline\": ~\n  info: text\n").unwrap();
        let root = structure["flowctl"].as_branch().unwrap();
        assert_eq!(root["info"].as_text(), Some("text"));
        assert_eq!(root["run"].as_branch().unwrap()["--pipeline"], StructureNode::Leaf(None));
    }
}
