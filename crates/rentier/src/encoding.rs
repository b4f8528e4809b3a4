//! Categorical label encoding.
//!
//! Each categorical attribute carries a [`LabelEncoder`] fitted at training
//! time: an ordered class list where a label's code is its index. The
//! encoders ship inside the model artifact and are read-only afterwards;
//! encoding a label the model never saw is an error, not a default.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// The categorical attributes of a property, one per fitted encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalAttribute {
    Furnishing,
    AvailableFor,
}

impl CategoricalAttribute {
    /// Attribute name as it appears in the artifact and feature schema.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Furnishing => "furnishing",
            Self::AvailableFor => "available_for",
        }
    }
}

impl fmt::Display for CategoricalAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors produced when encoding a label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The label is not part of the trained vocabulary.
    #[error("unknown {attribute} label {label:?}")]
    UnknownLabel {
        attribute: CategoricalAttribute,
        label: String,
    },
}

/// Structural validation errors for [`LabelEncoder`] / [`EncoderRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncoderValidationError {
    /// The encoder has no classes at all.
    EmptyVocabulary { attribute: CategoricalAttribute },
    /// The same label appears twice in the class list.
    DuplicateClass {
        attribute: CategoricalAttribute,
        label: String,
    },
}

/// Fitted label encoder: a bijection between labels and integer codes.
///
/// The code of a label is its index in the fitted class list, matching the
/// encoding the model was trained against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder {
    attribute: CategoricalAttribute,
    classes: Box<[String]>,
    codes: HashMap<String, u32>,
}

impl LabelEncoder {
    /// Create an encoder from the fitted class list.
    ///
    /// Class order is significant: it determines the codes. Use
    /// [`LabelEncoder::validate`] to check the list is a usable vocabulary.
    pub fn new(attribute: CategoricalAttribute, classes: Vec<String>) -> Self {
        let codes = classes
            .iter()
            .enumerate()
            .map(|(code, label)| (label.clone(), code as u32))
            .collect();
        Self {
            attribute,
            classes: classes.into_boxed_slice(),
            codes,
        }
    }

    /// Attribute this encoder was fitted for.
    #[inline]
    pub fn attribute(&self) -> CategoricalAttribute {
        self.attribute
    }

    /// Fitted class list, in code order.
    #[inline]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of classes in the vocabulary.
    #[inline]
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Encode a label into its training-time integer code.
    pub fn encode(&self, label: &str) -> Result<u32, EncodeError> {
        self.codes
            .get(label)
            .copied()
            .ok_or_else(|| EncodeError::UnknownLabel {
                attribute: self.attribute,
                label: label.to_owned(),
            })
    }

    /// Decode a code back into its label, if the code is in range.
    pub fn label(&self, code: u32) -> Option<&str> {
        self.classes.get(code as usize).map(String::as_str)
    }

    /// Validate that the vocabulary is non-empty and duplicate-free.
    pub fn validate(&self) -> Result<(), EncoderValidationError> {
        if self.classes.is_empty() {
            return Err(EncoderValidationError::EmptyVocabulary {
                attribute: self.attribute,
            });
        }
        // A duplicate collapses in the reverse map, breaking the bijection.
        let mut seen = HashMap::with_capacity(self.classes.len());
        for (code, label) in self.classes.iter().enumerate() {
            if seen.insert(label.as_str(), code).is_some() {
                return Err(EncoderValidationError::DuplicateClass {
                    attribute: self.attribute,
                    label: label.clone(),
                });
            }
        }
        Ok(())
    }
}

/// The set of fitted encoders shipped with a model, one per categorical
/// attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderRegistry {
    furnishing: LabelEncoder,
    available_for: LabelEncoder,
}

impl EncoderRegistry {
    /// Assemble a registry from the two fitted encoders.
    pub fn new(furnishing: LabelEncoder, available_for: LabelEncoder) -> Self {
        debug_assert_eq!(furnishing.attribute(), CategoricalAttribute::Furnishing);
        debug_assert_eq!(
            available_for.attribute(),
            CategoricalAttribute::AvailableFor
        );
        Self {
            furnishing,
            available_for,
        }
    }

    /// Get the encoder for an attribute.
    #[inline]
    pub fn encoder(&self, attribute: CategoricalAttribute) -> &LabelEncoder {
        match attribute {
            CategoricalAttribute::Furnishing => &self.furnishing,
            CategoricalAttribute::AvailableFor => &self.available_for,
        }
    }

    /// Encode a label for the given attribute.
    pub fn encode(&self, attribute: CategoricalAttribute, label: &str) -> Result<u32, EncodeError> {
        self.encoder(attribute).encode(label)
    }

    /// Validate every encoder in the registry.
    pub fn validate(&self) -> Result<(), EncoderValidationError> {
        self.furnishing.validate()?;
        self.available_for.validate()?;
        Ok(())
    }
}
