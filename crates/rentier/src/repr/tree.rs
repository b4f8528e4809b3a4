//! Regression tree storage (SoA) and traversal.
//!
//! Trees are immutable once constructed: the offline trainer fitted them,
//! the artifact loader rebuilt them, and inference only reads them.

use super::NodeId;

/// Structural validation errors for [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeValidationError {
    /// Tree has no nodes.
    EmptyTree,
    /// Parallel node arrays disagree on length.
    ArrayLenMismatch { field: &'static str, expected: usize, got: usize },
    /// A child pointer references an out-of-bounds node.
    ChildOutOfBounds {
        node: NodeId,
        side: &'static str,
        child: NodeId,
        n_nodes: usize,
    },
    /// A node references itself as a child.
    SelfLoop { node: NodeId },
    /// A node was reached by more than one path.
    DuplicateVisit { node: NodeId },
    /// A cycle was detected during traversal.
    CycleDetected { node: NodeId },
    /// A node exists in storage but is unreachable from the root.
    UnreachableNode { node: NodeId },
    /// A split threshold is NaN or infinite.
    NonFiniteThreshold { node: NodeId },
    /// A leaf value is NaN or infinite.
    NonFiniteLeaf { node: NodeId },
}

/// Structure-of-Arrays regression tree for cache-friendly traversal.
///
/// Node 0 is the root; child indices are local to this tree. Splits are
/// numeric only: a sample goes left when `value <= threshold` (scikit-learn
/// split semantics, which the training pipeline uses). Encoded categorical
/// features ride on the same rule because their codes are plain numbers in
/// the feature vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    split_indices: Box<[u32]>,
    thresholds: Box<[f32]>,
    left_children: Box<[u32]>,
    right_children: Box<[u32]>,
    is_leaf: Box<[bool]>,
    leaf_values: Box<[f32]>,
}

impl Tree {
    /// Create a new tree from parallel arrays.
    ///
    /// All arrays must have the same length (number of nodes). For leaf
    /// nodes the split fields and child pointers are ignored; by convention
    /// they are zero. Use [`validate`](Self::validate) to check structural
    /// invariants after construction from untrusted data.
    pub fn new(
        split_indices: Vec<u32>,
        thresholds: Vec<f32>,
        left_children: Vec<u32>,
        right_children: Vec<u32>,
        is_leaf: Vec<bool>,
        leaf_values: Vec<f32>,
    ) -> Self {
        let n_nodes = split_indices.len();
        debug_assert_eq!(n_nodes, thresholds.len());
        debug_assert_eq!(n_nodes, left_children.len());
        debug_assert_eq!(n_nodes, right_children.len());
        debug_assert_eq!(n_nodes, is_leaf.len());
        debug_assert_eq!(n_nodes, leaf_values.len());

        Self {
            split_indices: split_indices.into_boxed_slice(),
            thresholds: thresholds.into_boxed_slice(),
            left_children: left_children.into_boxed_slice(),
            right_children: right_children.into_boxed_slice(),
            is_leaf: is_leaf.into_boxed_slice(),
            leaf_values: leaf_values.into_boxed_slice(),
        }
    }

    /// Build a single-leaf tree that predicts a constant.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![0], vec![0.0], vec![0], vec![0], vec![true], vec![value])
    }

    /// Number of nodes in the tree.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.is_leaf.len()
    }

    /// Check if a node is a leaf.
    #[inline]
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.is_leaf[node as usize]
    }

    /// Feature index tested at a split node.
    #[inline]
    pub fn split_index(&self, node: NodeId) -> u32 {
        self.split_indices[node as usize]
    }

    /// Threshold compared against at a split node.
    #[inline]
    pub fn threshold(&self, node: NodeId) -> f32 {
        self.thresholds[node as usize]
    }

    /// Left child of a split node.
    #[inline]
    pub fn left_child(&self, node: NodeId) -> NodeId {
        self.left_children[node as usize]
    }

    /// Right child of a split node.
    #[inline]
    pub fn right_child(&self, node: NodeId) -> NodeId {
        self.right_children[node as usize]
    }

    /// Predicted value at a leaf node.
    #[inline]
    pub fn leaf_value(&self, node: NodeId) -> f32 {
        self.leaf_values[node as usize]
    }

    /// Largest feature index referenced by any split node, or `None` for a
    /// leaf-only tree. Used to check the tree against the feature schema.
    pub fn max_split_index(&self) -> Option<u32> {
        self.split_indices
            .iter()
            .zip(self.is_leaf.iter())
            .filter(|(_, &leaf)| !leaf)
            .map(|(&idx, _)| idx)
            .max()
    }

    /// Traverse from the root to the leaf a sample falls into.
    ///
    /// Goes left when `features[split_index] <= threshold`. A NaN feature
    /// compares false and therefore goes right; the validated pipeline
    /// never produces one.
    ///
    /// # Panics
    ///
    /// Panics if `features` is shorter than the largest split index.
    #[inline]
    pub fn traverse_to_leaf(&self, features: &[f32]) -> NodeId {
        let mut node: NodeId = 0;

        while !self.is_leaf(node) {
            let value = features[self.split_index(node) as usize];
            node = if value <= self.threshold(node) {
                self.left_child(node)
            } else {
                self.right_child(node)
            };
        }

        node
    }

    /// Predict the tree's output for a single sample.
    pub fn predict_row(&self, features: &[f32]) -> f32 {
        self.leaf_value(self.traverse_to_leaf(features))
    }

    /// Validate basic structural invariants for this tree.
    ///
    /// Runs an iterative DFS with color marking to reject out-of-bounds
    /// children, self-loops, shared subtrees, cycles, and unreachable
    /// nodes, and checks that thresholds and leaf values are finite.
    pub fn validate(&self) -> Result<(), TreeValidationError> {
        let n_nodes = self.n_nodes();
        if n_nodes == 0 {
            return Err(TreeValidationError::EmptyTree);
        }
        self.check_len("thresholds", self.thresholds.len())?;
        self.check_len("left_children", self.left_children.len())?;
        self.check_len("right_children", self.right_children.len())?;
        self.check_len("is_leaf", self.is_leaf.len())?;
        self.check_len("leaf_values", self.leaf_values.len())?;

        // 0 = unvisited, 1 = visiting, 2 = done
        let mut color = vec![0u8; n_nodes];
        let mut stack: Vec<(NodeId, bool)> = vec![(0, false)];

        while let Some((node, closing)) = stack.pop() {
            let idx = node as usize;
            if closing {
                color[idx] = 2;
                continue;
            }

            match color[idx] {
                0 => {}
                1 => return Err(TreeValidationError::CycleDetected { node }),
                _ => return Err(TreeValidationError::DuplicateVisit { node }),
            }
            color[idx] = 1;
            stack.push((node, true));

            if self.is_leaf(node) {
                if !self.leaf_value(node).is_finite() {
                    return Err(TreeValidationError::NonFiniteLeaf { node });
                }
                continue;
            }

            if !self.threshold(node).is_finite() {
                return Err(TreeValidationError::NonFiniteThreshold { node });
            }

            let left = self.left_child(node);
            let right = self.right_child(node);
            if left == node || right == node {
                return Err(TreeValidationError::SelfLoop { node });
            }
            for (side, child) in [("left", left), ("right", right)] {
                if child as usize >= n_nodes {
                    return Err(TreeValidationError::ChildOutOfBounds {
                        node,
                        side,
                        child,
                        n_nodes,
                    });
                }
            }

            stack.push((right, false));
            stack.push((left, false));
        }

        for (i, &c) in color.iter().enumerate() {
            if c == 0 {
                return Err(TreeValidationError::UnreachableNode { node: i as NodeId });
            }
        }

        Ok(())
    }

    fn check_len(&self, field: &'static str, got: usize) -> Result<(), TreeValidationError> {
        let expected = self.split_indices.len();
        if got != expected {
            return Err(TreeValidationError::ArrayLenMismatch { field, expected, got });
        }
        Ok(())
    }
}
