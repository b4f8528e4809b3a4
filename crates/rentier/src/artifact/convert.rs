//! Conversion between artifact schema types and runtime types.
//!
//! Writing is infallible (`From` impls); reading validates everything the
//! inference path assumes: parallel array lengths, tree structure, split
//! index bounds, encoder vocabularies, and the feature schema itself.

use thiserror::Error;

use super::schema::{
    AggregationSchema, EncoderSchema, EncodersSchema, ForestSchema, MetaSchema, TreeSchema,
};
use crate::encoding::{
    CategoricalAttribute, EncoderRegistry, EncoderValidationError, LabelEncoder,
};
use crate::features::{FEATURE_COUNT, FEATURE_NAMES};
use crate::model::ModelMeta;
use crate::repr::{Aggregation, Forest, ForestValidationError, Tree};

/// Errors turning a parsed artifact into a usable model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// The artifact was trained for a different number of features.
    #[error("artifact advertises {found} features, this model consumes {expected}")]
    FeatureCountMismatch { expected: usize, found: usize },
    /// Feature names differ or are ordered differently than the trained
    /// schema. Accepting this would silently scramble every prediction.
    #[error("artifact feature order {found:?} does not match the expected schema {expected:?}")]
    FeatureNamesMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
    /// A tree's parallel arrays disagree with its declared node count.
    #[error("tree {tree_idx}: {array} has {len} entries, expected {expected}")]
    ArrayLenMismatch {
        tree_idx: usize,
        array: &'static str,
        len: usize,
        expected: usize,
    },
    /// A tree splits on a feature the schema does not have.
    #[error("tree {tree_idx} splits on feature {split_index}, but the schema has {num_features} features")]
    SplitIndexOutOfRange {
        tree_idx: usize,
        split_index: u32,
        num_features: usize,
    },
    /// The forest failed structural validation.
    #[error("invalid forest structure: {0:?}")]
    Forest(ForestValidationError),
    /// An encoder vocabulary failed validation.
    #[error("invalid encoder vocabulary: {0:?}")]
    Encoder(EncoderValidationError),
}

// =============================================================================
// Aggregation conversions
// =============================================================================

impl From<Aggregation> for AggregationSchema {
    fn from(aggregation: Aggregation) -> Self {
        match aggregation {
            Aggregation::Average => Self::Average,
            Aggregation::Sum => Self::Sum,
        }
    }
}

impl From<AggregationSchema> for Aggregation {
    fn from(schema: AggregationSchema) -> Self {
        match schema {
            AggregationSchema::Average => Self::Average,
            AggregationSchema::Sum => Self::Sum,
        }
    }
}

// =============================================================================
// Tree conversions
// =============================================================================

impl From<&Tree> for TreeSchema {
    fn from(tree: &Tree) -> Self {
        let n_nodes = tree.n_nodes();

        let mut split_indices = Vec::with_capacity(n_nodes);
        let mut thresholds = Vec::with_capacity(n_nodes);
        let mut left_children = Vec::with_capacity(n_nodes);
        let mut right_children = Vec::with_capacity(n_nodes);
        let mut is_leaf = Vec::with_capacity(n_nodes);
        let mut leaf_values = Vec::with_capacity(n_nodes);

        for node in 0..n_nodes as u32 {
            split_indices.push(tree.split_index(node));
            thresholds.push(tree.threshold(node) as f64);
            left_children.push(tree.left_child(node));
            right_children.push(tree.right_child(node));
            is_leaf.push(tree.is_leaf(node));
            leaf_values.push(tree.leaf_value(node) as f64);
        }

        TreeSchema {
            num_nodes: n_nodes as u32,
            split_indices,
            thresholds,
            left_children,
            right_children,
            is_leaf,
            leaf_values,
        }
    }
}

fn check_tree_array(
    tree_idx: usize,
    array: &'static str,
    len: usize,
    expected: usize,
) -> Result<(), ConversionError> {
    if len != expected {
        return Err(ConversionError::ArrayLenMismatch {
            tree_idx,
            array,
            len,
            expected,
        });
    }
    Ok(())
}

fn tree_from_schema(tree_idx: usize, schema: TreeSchema) -> Result<Tree, ConversionError> {
    let expected = schema.num_nodes as usize;
    check_tree_array(tree_idx, "split_indices", schema.split_indices.len(), expected)?;
    check_tree_array(tree_idx, "thresholds", schema.thresholds.len(), expected)?;
    check_tree_array(tree_idx, "left_children", schema.left_children.len(), expected)?;
    check_tree_array(tree_idx, "right_children", schema.right_children.len(), expected)?;
    check_tree_array(tree_idx, "is_leaf", schema.is_leaf.len(), expected)?;
    check_tree_array(tree_idx, "leaf_values", schema.leaf_values.len(), expected)?;

    Ok(Tree::new(
        schema.split_indices,
        schema.thresholds.into_iter().map(|t| t as f32).collect(),
        schema.left_children,
        schema.right_children,
        schema.is_leaf,
        schema.leaf_values.into_iter().map(|v| v as f32).collect(),
    ))
}

// =============================================================================
// Forest conversions
// =============================================================================

impl From<&Forest> for ForestSchema {
    fn from(forest: &Forest) -> Self {
        ForestSchema {
            aggregation: forest.aggregation().into(),
            base_score: forest.base_score() as f64,
            trees: forest.trees().map(TreeSchema::from).collect(),
        }
    }
}

impl TryFrom<ForestSchema> for Forest {
    type Error = ConversionError;

    fn try_from(schema: ForestSchema) -> Result<Self, Self::Error> {
        let mut trees = Vec::with_capacity(schema.trees.len());
        for (tree_idx, tree_schema) in schema.trees.into_iter().enumerate() {
            trees.push(tree_from_schema(tree_idx, tree_schema)?);
        }

        let forest = Forest::new(trees, schema.aggregation.into())
            .with_base_score(schema.base_score as f32);
        forest.validate().map_err(ConversionError::Forest)?;
        Ok(forest)
    }
}

/// Reject trees that reference features beyond the declared schema.
pub(crate) fn check_split_bounds(
    forest: &Forest,
    num_features: usize,
) -> Result<(), ConversionError> {
    for (tree_idx, tree) in forest.trees().enumerate() {
        if let Some(split_index) = tree.max_split_index() {
            if split_index as usize >= num_features {
                return Err(ConversionError::SplitIndexOutOfRange {
                    tree_idx,
                    split_index,
                    num_features,
                });
            }
        }
    }
    Ok(())
}

// =============================================================================
// Encoder conversions
// =============================================================================

impl From<&LabelEncoder> for EncoderSchema {
    fn from(encoder: &LabelEncoder) -> Self {
        EncoderSchema {
            classes: encoder.classes().to_vec(),
        }
    }
}

impl From<&EncoderRegistry> for EncodersSchema {
    fn from(registry: &EncoderRegistry) -> Self {
        EncodersSchema {
            furnishing: registry.encoder(CategoricalAttribute::Furnishing).into(),
            available_for: registry.encoder(CategoricalAttribute::AvailableFor).into(),
        }
    }
}

impl TryFrom<EncodersSchema> for EncoderRegistry {
    type Error = ConversionError;

    fn try_from(schema: EncodersSchema) -> Result<Self, Self::Error> {
        let registry = EncoderRegistry::new(
            LabelEncoder::new(CategoricalAttribute::Furnishing, schema.furnishing.classes),
            LabelEncoder::new(
                CategoricalAttribute::AvailableFor,
                schema.available_for.classes,
            ),
        );
        registry.validate().map_err(ConversionError::Encoder)?;
        Ok(registry)
    }
}

// =============================================================================
// Meta conversions
// =============================================================================

impl From<&ModelMeta> for MetaSchema {
    fn from(meta: &ModelMeta) -> Self {
        MetaSchema {
            feature_names: meta.feature_names.clone(),
            num_features: meta.n_features,
            source: meta.source.clone(),
        }
    }
}

impl TryFrom<MetaSchema> for ModelMeta {
    type Error = ConversionError;

    fn try_from(schema: MetaSchema) -> Result<Self, Self::Error> {
        if schema.num_features != FEATURE_COUNT {
            return Err(ConversionError::FeatureCountMismatch {
                expected: FEATURE_COUNT,
                found: schema.num_features,
            });
        }
        if schema.feature_names.iter().map(String::as_str).ne(FEATURE_NAMES) {
            return Err(ConversionError::FeatureNamesMismatch {
                expected: FEATURE_NAMES.iter().map(|&name| name.to_owned()).collect(),
                found: schema.feature_names,
            });
        }

        Ok(ModelMeta {
            n_features: schema.num_features,
            feature_names: schema.feature_names,
            source: schema.source,
        })
    }
}
