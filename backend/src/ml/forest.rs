//! Decision-forest classifier decoded from a JSON artifact

use serde::{Deserialize, Serialize};

use super::{CropModel, ModelError};

/// Feature order the forest was trained with
pub const FEATURE_NAMES: [&str; 3] = ["temperature", "humidity", "rainfall"];

/// A node of a decision tree. Node 0 is the root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Node {
    /// Go to `left` when `features[feature] <= threshold`, else `right`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        class: usize,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

/// Majority-vote ensemble of decision trees
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionForest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    pub classes: Vec<String>,
    pub trees: Vec<Tree>,
}

impl DecisionForest {
    /// Decode and structurally validate an artifact
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        let forest: DecisionForest = serde_json::from_slice(bytes)?;
        forest.validate()?;
        Ok(forest)
    }

    /// Reject artifacts whose traversal could index out of bounds or loop.
    ///
    /// Children must point strictly forward, which bounds every walk by the
    /// node count.
    pub fn validate(&self) -> Result<(), ModelError> {
        if let Some(names) = &self.feature_names {
            if names.iter().map(String::as_str).ne(FEATURE_NAMES) {
                return Err(ModelError::Invalid(format!(
                    "feature order {:?} does not match {:?}",
                    names, FEATURE_NAMES
                )));
            }
        }
        if self.classes.is_empty() {
            return Err(ModelError::Invalid("no classes".into()));
        }
        if self.trees.is_empty() {
            return Err(ModelError::Invalid("no trees".into()));
        }

        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(ModelError::Invalid(format!("tree {} has no nodes", t)));
            }
            for (i, node) in tree.nodes.iter().enumerate() {
                match *node {
                    Node::Split {
                        feature,
                        threshold,
                        left,
                        right,
                    } => {
                        if feature >= FEATURE_NAMES.len() {
                            return Err(ModelError::Invalid(format!(
                                "tree {} node {}: feature index {} out of range",
                                t, i, feature
                            )));
                        }
                        if threshold.is_nan() {
                            return Err(ModelError::Invalid(format!(
                                "tree {} node {}: threshold is NaN",
                                t, i
                            )));
                        }
                        for child in [left, right] {
                            if child <= i || child >= tree.nodes.len() {
                                return Err(ModelError::Invalid(format!(
                                    "tree {} node {}: child {} must be in ({}, {})",
                                    t,
                                    i,
                                    child,
                                    i,
                                    tree.nodes.len()
                                )));
                            }
                        }
                    }
                    Node::Leaf { class } => {
                        if class >= self.classes.len() {
                            return Err(ModelError::Invalid(format!(
                                "tree {} node {}: class index {} out of range",
                                t, i, class
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn vote(tree: &Tree, features: &[f64; 3]) -> usize {
        let mut index = 0;
        loop {
            match tree.nodes[index] {
                Node::Leaf { class } => return class,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[feature] <= threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

impl CropModel for DecisionForest {
    fn predict(&self, features: [f64; 3]) -> String {
        let mut counts = vec![0usize; self.classes.len()];
        for tree in &self.trees {
            counts[Self::vote(tree, &features)] += 1;
        }

        // Ties go to the lowest class index
        let mut best = 0;
        for (class, &count) in counts.iter().enumerate() {
            if count > counts[best] {
                best = class;
            }
        }
        self.classes[best].clone()
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn estimators(&self) -> usize {
        self.trees.len()
    }
}
