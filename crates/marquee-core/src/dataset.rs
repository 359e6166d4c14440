use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One node of a sales tree.
///
/// Internal nodes carry `children` (order preserved); leaves carry a
/// `value` and usually a `category`. Exactly one of `value`/`children`
/// is allowed per node — [`parse_dataset`] rejects anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SalesNode>>,
}

impl SalesNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Sum of all descendant leaf values (a leaf's own value for leaves).
    pub fn aggregate_value(&self) -> f64 {
        match self.children.as_deref() {
            Some(children) => children.iter().map(SalesNode::aggregate_value).sum(),
            None => self.value.unwrap_or(0.0),
        }
    }
}

/// Parses and validates a sales tree from its JSON source text.
pub fn parse_dataset(text: &str) -> Result<SalesNode> {
    let root: SalesNode = serde_json::from_str(text)?;
    validate_dataset(&root)?;
    Ok(root)
}

/// Re-validates an already deserialized tree (e.g. one read back from a cache).
pub fn validate_dataset(root: &SalesNode) -> Result<()> {
    if root.children.as_deref().is_some_and(|c| c.is_empty()) {
        return Err(Error::EmptyDataset);
    }
    validate_node(root, &root.name)
}

fn validate_node(node: &SalesNode, path: &str) -> Result<()> {
    if node.name.trim().is_empty() {
        return Err(Error::InvalidNode {
            path: path.to_string(),
            message: "node name is empty".to_string(),
        });
    }

    match (node.value, node.children.as_deref()) {
        (Some(_), Some(_)) => Err(Error::InvalidNode {
            path: path.to_string(),
            message: "node has both a value and children".to_string(),
        }),
        (None, None) => Err(Error::InvalidNode {
            path: path.to_string(),
            message: "node has neither a value nor children".to_string(),
        }),
        (Some(v), None) => {
            if !v.is_finite() || v < 0.0 {
                return Err(Error::InvalidNode {
                    path: path.to_string(),
                    message: format!("leaf value {v} is not a finite non-negative number"),
                });
            }
            Ok(())
        }
        (None, Some(children)) => {
            if children.is_empty() {
                return Err(Error::InvalidNode {
                    path: path.to_string(),
                    message: "internal node has no children".to_string(),
                });
            }
            for child in children {
                let child_path = format!("{path}.{}", child.name);
                validate_node(child, &child_path)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_dataset_accepts_two_level_tree() {
        let root = parse_dataset(
            r#"{
                "name": "Root",
                "children": [
                    {
                        "name": "Action",
                        "children": [
                            { "name": "Movie1", "category": "Action", "value": 100 }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(root.name, "Root");
        let action = &root.children.as_deref().unwrap()[0];
        let leaf = &action.children.as_deref().unwrap()[0];
        assert_eq!(leaf.category.as_deref(), Some("Action"));
        assert_eq!(leaf.value, Some(100.0));
        assert!(leaf.is_leaf());
    }

    #[test]
    fn parse_dataset_rejects_value_and_children_on_one_node() {
        let err = parse_dataset(
            r#"{ "name": "Root", "value": 3, "children": [ { "name": "A", "value": 1 } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidNode { .. }));
    }

    #[test]
    fn parse_dataset_rejects_bare_node() {
        let err = parse_dataset(r#"{ "name": "Root" }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidNode { .. }));
    }

    #[test]
    fn parse_dataset_rejects_childless_root() {
        let err = parse_dataset(r#"{ "name": "Root", "children": [] }"#).unwrap_err();
        assert!(matches!(err, Error::EmptyDataset));
    }

    #[test]
    fn parse_dataset_rejects_negative_leaf_value() {
        let err = parse_dataset(
            r#"{ "name": "Root", "children": [ { "name": "A", "value": -1 } ] }"#,
        )
        .unwrap_err();
        let Error::InvalidNode { path, .. } = err else {
            panic!("expected InvalidNode");
        };
        assert_eq!(path, "Root.A");
    }

    #[test]
    fn aggregate_value_sums_descendant_leaves() {
        let root = parse_dataset(
            r#"{
                "name": "Root",
                "children": [
                    { "name": "A", "children": [
                        { "name": "A1", "value": 1.5 },
                        { "name": "A2", "value": 2.5 }
                    ] },
                    { "name": "B", "value": 4 }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(root.aggregate_value(), 8.0);
    }

    #[test]
    fn dataset_round_trips_through_json() {
        let root = parse_dataset(
            r#"{
                "name": "Movies",
                "children": [
                    { "name": "Action", "children": [
                        { "name": "AvengersEndgame", "category": "Action", "value": 858.37 }
                    ] }
                ]
            }"#,
        )
        .unwrap();
        let text = serde_json::to_string(&root).unwrap();
        let back: SalesNode = serde_json::from_str(&text).unwrap();
        assert_eq!(back, root);
    }
}
