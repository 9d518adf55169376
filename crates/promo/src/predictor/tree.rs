use std::convert::Infallible;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Features;

use super::{Link, Predictor};

/// Structural problems found when validating a tree ensemble.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("tree {tree} has no nodes")]
    Empty { tree: usize },

    #[error("tree {tree}, node {node}: feature index {feature} is out of range")]
    Feature {
        tree: usize,
        node: usize,
        feature: usize,
    },

    #[error("tree {tree}, node {node}: child {child} must come after its parent and exist")]
    Child {
        tree: usize,
        node: usize,
        child: usize,
    },

    #[error("tree {tree}, node {node}: threshold is not finite")]
    Threshold { tree: usize, node: usize },
}

/// One node of a regression tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    /// Go to `left` when `features[feature] < threshold`, else `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },

    /// Terminal node contributing `value` to the score.
    Leaf { value: f64 },
}

/// A regression tree stored as a node array rooted at index 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    fn leaf_value(&self, features: &[f64; 3]) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                Node::Leaf { value } => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[feature] < threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    fn validate(&self, tree: usize) -> Result<(), TreeError> {
        if self.nodes.is_empty() {
            return Err(TreeError::Empty { tree });
        }

        for (node, entry) in self.nodes.iter().enumerate() {
            let Node::Split {
                feature,
                threshold,
                left,
                right,
            } = *entry
            else {
                continue;
            };

            if feature >= 3 {
                return Err(TreeError::Feature {
                    tree,
                    node,
                    feature,
                });
            }
            if !threshold.is_finite() {
                return Err(TreeError::Threshold { tree, node });
            }
            for child in [left, right] {
                if child <= node || child >= self.nodes.len() {
                    return Err(TreeError::Child { tree, node, child });
                }
            }
        }
        Ok(())
    }
}

/// A boosted ensemble of regression trees: `link(base_score + Σ treeᵢ(features))`.
///
/// Split features index into [`Features::as_array`]. Children always come
/// after their parent, so every walk reaches a leaf.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeEnsemble {
    base_score: f64,
    link: Link,
    trees: Vec<Tree>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEnsemble {
    #[serde(default)]
    base_score: f64,

    #[serde(default)]
    link: Link,

    trees: Vec<Tree>,
}

impl<'de> Deserialize<'de> for TreeEnsemble {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawEnsemble::deserialize(deserializer)?;
        Self::new(raw.base_score, raw.link, raw.trees).map_err(serde::de::Error::custom)
    }
}

impl TreeEnsemble {
    /// Creates a validated ensemble.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError`] if any tree is empty, splits on an unknown
    /// feature, has a non-finite threshold, or points to an invalid child.
    pub fn new(base_score: f64, link: Link, trees: Vec<Tree>) -> Result<Self, TreeError> {
        for (index, tree) in trees.iter().enumerate() {
            tree.validate(index)?;
        }
        Ok(Self {
            base_score,
            link,
            trees,
        })
    }

    /// Returns the number of trees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// Returns true if the ensemble has no trees.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}

impl Predictor for TreeEnsemble {
    type Error = Infallible;

    fn predict(&self, features: &Features) -> Result<f64, Self::Error> {
        let x = features.as_array();
        let score = self
            .trees
            .iter()
            .fold(self.base_score, |acc, tree| acc + tree.leaf_value(&x));
        Ok(self.link.apply(score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::PromotionParams;

    const JSON: &str = r#"{
        "base_score": 0.02,
        "trees": [
            { "nodes": [
                { "split": { "feature": 1, "threshold": 1000.0, "left": 1, "right": 2 } },
                { "leaf": { "value": 0.0 } },
                { "leaf": { "value": 0.03 } }
            ] },
            { "nodes": [
                { "split": { "feature": 0, "threshold": 200.0, "left": 1, "right": 2 } },
                { "leaf": { "value": 0.01 } },
                { "leaf": { "value": -0.01 } }
            ] }
        ]
    }"#;

    #[test]
    fn sums_leaves_over_base_score() {
        let ensemble: TreeEnsemble = serde_json::from_str(JSON).unwrap();
        assert_eq!(ensemble.len(), 2);

        let high = ensemble
            .predict(&PromotionParams::new(1500.0, 100.0, 1e6).features())
            .unwrap();
        let low = ensemble
            .predict(&PromotionParams::new(500.0, 300.0, 1e6).features())
            .unwrap();

        assert_relative_eq!(high, 0.06, epsilon = 1e-12);
        assert_relative_eq!(low, 0.01, epsilon = 1e-12);
    }

    #[test]
    fn threshold_ties_go_right() {
        let ensemble: TreeEnsemble = serde_json::from_str(JSON).unwrap();
        let rate = ensemble
            .predict(&PromotionParams::new(1000.0, 200.0, 1e6).features())
            .unwrap();
        assert_relative_eq!(rate, 0.04, epsilon = 1e-12);
    }

    #[test]
    fn rejects_backward_child() {
        let tree = Tree {
            nodes: vec![
                Node::Leaf { value: 0.0 },
                Node::Split {
                    feature: 0,
                    threshold: 1.0,
                    left: 0,
                    right: 0,
                },
            ],
        };
        assert_eq!(
            TreeEnsemble::new(0.0, Link::Identity, vec![tree]),
            Err(TreeError::Child {
                tree: 0,
                node: 1,
                child: 0
            })
        );
    }

    #[test]
    fn rejects_unknown_feature_from_json() {
        let json = r#"{ "trees": [ { "nodes": [
            { "split": { "feature": 3, "threshold": 1.0, "left": 1, "right": 2 } },
            { "leaf": { "value": 0.0 } },
            { "leaf": { "value": 1.0 } }
        ] } ] }"#;

        let err = serde_json::from_str::<TreeEnsemble>(json).unwrap_err();
        assert!(err.to_string().contains("feature index 3"));
    }

    #[test]
    fn rejects_empty_tree() {
        let result = TreeEnsemble::new(0.0, Link::Identity, vec![Tree { nodes: vec![] }]);
        assert_eq!(result, Err(TreeError::Empty { tree: 0 }));
    }
}
