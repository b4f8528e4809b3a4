//! Forest representation: a collection of regression trees plus the rule
//! for combining their outputs into one estimate.

use super::tree::{Tree, TreeValidationError};

/// How individual tree outputs combine into the ensemble output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aggregation {
    /// Mean of tree outputs (random forests, the trained artifact's mode).
    #[default]
    Average,
    /// Sum of tree outputs (boosted ensembles).
    Sum,
}

/// Structural validation errors for [`Forest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForestValidationError {
    /// Forest has no trees.
    EmptyForest,
    /// Base score is NaN or infinite.
    NonFiniteBaseScore,
    /// A tree failed structural validation.
    InvalidTree {
        tree_idx: usize,
        error: TreeValidationError,
    },
}

/// Forest of regression trees.
///
/// Prediction is `base_score + aggregate(tree outputs)` where the
/// aggregate is a mean or a sum depending on [`Aggregation`].
#[derive(Debug, Clone, PartialEq)]
pub struct Forest {
    trees: Vec<Tree>,
    aggregation: Aggregation,
    base_score: f32,
}

impl Forest {
    /// Create a forest from trees and an aggregation rule.
    pub fn new(trees: Vec<Tree>, aggregation: Aggregation) -> Self {
        Self {
            trees,
            aggregation,
            base_score: 0.0,
        }
    }

    /// Set the base score added to the aggregated output.
    pub fn with_base_score(mut self, base_score: f32) -> Self {
        self.base_score = base_score;
        self
    }

    /// Number of trees.
    #[inline]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Aggregation rule.
    #[inline]
    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    /// Base score added to the aggregated output.
    #[inline]
    pub fn base_score(&self) -> f32 {
        self.base_score
    }

    /// Get a reference to a specific tree.
    #[inline]
    pub fn tree(&self, idx: usize) -> &Tree {
        &self.trees[idx]
    }

    /// Iterate over trees.
    pub fn trees(&self) -> impl Iterator<Item = &Tree> {
        self.trees.iter()
    }

    /// Largest feature index referenced by any tree, or `None` if every
    /// tree is a bare leaf.
    pub fn max_split_index(&self) -> Option<u32> {
        self.trees.iter().filter_map(Tree::max_split_index).max()
    }

    /// Predict for a single row of features.
    ///
    /// # Panics
    ///
    /// Panics if `features` is shorter than the largest split index; the
    /// prediction engine checks the shape before delegating here.
    pub fn predict_row(&self, features: &[f32]) -> f32 {
        let total: f32 = self
            .trees
            .iter()
            .map(|tree| tree.predict_row(features))
            .sum();

        let aggregated = match self.aggregation {
            Aggregation::Average if !self.trees.is_empty() => total / self.trees.len() as f32,
            _ => total,
        };

        self.base_score + aggregated
    }

    /// Validate structural invariants for this forest and every tree in it.
    ///
    /// Intended for the artifact loader and tests; inference assumes a
    /// validated forest.
    pub fn validate(&self) -> Result<(), ForestValidationError> {
        if self.trees.is_empty() {
            return Err(ForestValidationError::EmptyForest);
        }
        if !self.base_score.is_finite() {
            return Err(ForestValidationError::NonFiniteBaseScore);
        }
        for (tree_idx, tree) in self.trees.iter().enumerate() {
            tree.validate()
                .map_err(|error| ForestValidationError::InvalidTree { tree_idx, error })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(threshold: f32, left_val: f32, right_val: f32) -> Tree {
        Tree::new(
            vec![0, 0, 0],
            vec![threshold, 0.0, 0.0],
            vec![1, 0, 0],
            vec![2, 0, 0],
            vec![false, true, true],
            vec![0.0, left_val, right_val],
        )
    }

    #[test]
    fn average_forest_takes_mean() {
        let forest = Forest::new(
            vec![stump(0.5, 1.0, 2.0), stump(0.5, 3.0, 5.0)],
            Aggregation::Average,
        );

        assert_eq!(forest.predict_row(&[0.3]), 2.0);
        assert_eq!(forest.predict_row(&[0.7]), 3.5);
    }

    #[test]
    fn sum_forest_accumulates() {
        let forest = Forest::new(
            vec![stump(0.5, 1.0, 2.0), stump(0.5, 0.5, 1.5)],
            Aggregation::Sum,
        );

        assert_eq!(forest.predict_row(&[0.3]), 1.5);
        assert_eq!(forest.predict_row(&[0.7]), 3.5);
    }

    #[test]
    fn base_score_shifts_output() {
        let forest = Forest::new(vec![stump(0.5, 1.0, 2.0)], Aggregation::Sum)
            .with_base_score(10_000.0);

        assert_eq!(forest.predict_row(&[0.3]), 10_001.0);
    }

    #[test]
    fn single_tree_average_equals_tree_output() {
        let forest = Forest::new(vec![stump(0.5, 8_000.0, 12_000.0)], Aggregation::Average);

        assert_eq!(forest.predict_row(&[0.0]), 8_000.0);
        assert_eq!(forest.predict_row(&[1.0]), 12_000.0);
    }

    #[test]
    fn max_split_index_across_trees() {
        let t1 = stump(0.5, 1.0, 2.0);
        let t2 = Tree::new(
            vec![4, 0, 0],
            vec![1.5, 0.0, 0.0],
            vec![1, 0, 0],
            vec![2, 0, 0],
            vec![false, true, true],
            vec![0.0, 1.0, 2.0],
        );
        let forest = Forest::new(vec![t1, t2], Aggregation::Average);

        assert_eq!(forest.max_split_index(), Some(4));

        let leaves_only = Forest::new(vec![Tree::constant(1.0)], Aggregation::Average);
        assert_eq!(leaves_only.max_split_index(), None);
    }

    #[test]
    fn validate_rejects_empty_forest() {
        let forest = Forest::new(vec![], Aggregation::Average);
        assert_eq!(forest.validate(), Err(ForestValidationError::EmptyForest));
    }

    #[test]
    fn validate_reports_offending_tree() {
        let bad = Tree::new(
            vec![0, 0, 0],
            vec![0.5, 0.0, 0.0],
            vec![1, 0, 0],
            vec![7, 0, 0],
            vec![false, true, true],
            vec![0.0, 1.0, 2.0],
        );
        let forest = Forest::new(vec![stump(0.5, 1.0, 2.0), bad], Aggregation::Average);

        match forest.validate() {
            Err(ForestValidationError::InvalidTree { tree_idx: 1, error }) => {
                assert!(matches!(error, TreeValidationError::ChildOutOfBounds { .. }));
            }
            other => panic!("expected InvalidTree for tree 1, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_non_finite_base_score() {
        let forest = Forest::new(vec![stump(0.5, 1.0, 2.0)], Aggregation::Sum)
            .with_base_score(f32::NAN);
        assert_eq!(
            forest.validate(),
            Err(ForestValidationError::NonFiniteBaseScore)
        );
    }
}
