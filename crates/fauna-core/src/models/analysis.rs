use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Field names the vision model is asked to return, in prompt order.
pub const ANALYSIS_FIELDS: [&str; 7] = [
    "species",
    "breed",
    "country",
    "habitat",
    "specifications",
    "common_problems",
    "fun_facts",
];

/// Placeholder values that carry no information (compared trimmed and lowercased).
pub const REJECTION_SET: [&str; 3] = ["", "n/a", "none"];

/// Structured result of analyzing one animal image
///
/// Immutable once produced. Field names match the JSON keys the model replies with.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct AnimalAnalysis {
    pub species: String,
    pub breed: String,
    pub country: String,
    pub habitat: String,
    pub specifications: String,
    pub common_problems: String,
    pub fun_facts: String,
}

impl AnimalAnalysis {
    /// Field values in `ANALYSIS_FIELDS` order.
    pub fn values(&self) -> [&str; 7] {
        [
            &self.species,
            &self.breed,
            &self.country,
            &self.habitat,
            &self.specifications,
            &self.common_problems,
            &self.fun_facts,
        ]
    }

    /// An analysis is valid iff at least one field holds real content.
    ///
    /// When every field is a placeholder the image was not a recognizable animal.
    pub fn is_valid(&self) -> bool {
        self.values().iter().any(|value| !is_placeholder(value))
    }
}

/// Whether a field value belongs to the rejection set.
pub fn is_placeholder(value: &str) -> bool {
    let folded = value.trim().to_lowercase();
    REJECTION_SET.contains(&folded.as_str())
}
