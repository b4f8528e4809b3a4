//! Schema types for the model artifact.
//!
//! These types define the stable on-disk JSON format, independent of the
//! runtime types. Keeping the schema separate allows the format to evolve
//! (new versions, new optional fields) without touching inference code, and
//! gives deserialization a place to validate before anything is built.
//!
//! Numeric values are stored as `f64` in the artifact and narrowed to `f32`
//! at conversion time.

use serde::{Deserialize, Serialize};

/// Top-level artifact document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactSchema {
    /// Format tag, always [`ArtifactSchema::FORMAT_TAG`].
    pub format: String,
    /// Format version.
    pub version: u32,
    /// Feature schema and provenance.
    pub meta: MetaSchema,
    /// Fitted label encoders.
    pub encoders: EncodersSchema,
    /// The trained forest.
    pub forest: ForestSchema,
}

impl ArtifactSchema {
    /// Tag identifying a rent model artifact.
    pub const FORMAT_TAG: &'static str = "rentier-model";

    /// Format version this build reads and writes.
    pub const VERSION: u32 = 1;

    /// Assemble an artifact with the current format tag and version.
    pub fn new(meta: MetaSchema, encoders: EncodersSchema, forest: ForestSchema) -> Self {
        Self {
            format: Self::FORMAT_TAG.to_owned(),
            version: Self::VERSION,
            meta,
            encoders,
            forest,
        }
    }
}

/// Model metadata schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaSchema {
    /// Feature names in vector slot order.
    pub feature_names: Vec<String>,
    /// Number of features the model consumes.
    pub num_features: usize,
    /// Training data provenance (free-form, optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// The fitted encoders, one per categorical attribute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodersSchema {
    pub furnishing: EncoderSchema,
    pub available_for: EncoderSchema,
}

/// A single fitted label encoder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderSchema {
    /// Class labels in code order (code = index).
    pub classes: Vec<String>,
}

/// Aggregation rule schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationSchema {
    /// Mean of tree outputs.
    Average,
    /// Sum of tree outputs.
    Sum,
}

/// Forest schema (collection of trees).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestSchema {
    /// How tree outputs combine.
    pub aggregation: AggregationSchema,
    /// Score added to the aggregated output.
    pub base_score: f64,
    /// Trees in ensemble order.
    pub trees: Vec<TreeSchema>,
}

/// Tree schema (SoA layout, parallel arrays of length `num_nodes`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeSchema {
    /// Number of nodes (internal + leaves).
    pub num_nodes: u32,
    /// Split feature index for each internal node.
    pub split_indices: Vec<u32>,
    /// Split threshold for each internal node.
    pub thresholds: Vec<f64>,
    /// Left child index for each internal node.
    pub left_children: Vec<u32>,
    /// Right child index for each internal node.
    pub right_children: Vec<u32>,
    /// Leaf marker for each node.
    pub is_leaf: Vec<bool>,
    /// Output value for each leaf node.
    pub leaf_values: Vec<f64>,
}
