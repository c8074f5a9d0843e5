use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema;

pub const DEFAULT_CURRENCY: &str = "USD";

/// How space-separated image URLs in a single cell are distributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImagePolicy {
    /// One output row per image URL; all other fields are duplicated.
    Explode,
    /// Keep only the first image URL; row count unchanged.
    FirstOnly,
}

impl ImagePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImagePolicy::Explode => "explode",
            ImagePolicy::FirstOnly => "first_only",
        }
    }
}

impl fmt::Display for ImagePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ImagePolicy {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "explode" => Ok(ImagePolicy::Explode),
            "first_only" | "first" => Ok(ImagePolicy::FirstOnly),
            other => Err(format!("unknown image policy '{other}'")),
        }
    }
}

/// How a stock cell that does not parse as a number is resolved before
/// classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityRule {
    /// Carry the previous row's raw numeric stock value; 0 when none
    /// has been seen yet.
    ForwardFill,
    /// Treat the missing value as 0.
    ZeroDefault,
}

impl AvailabilityRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityRule::ForwardFill => "forward_fill",
            AvailabilityRule::ZeroDefault => "zero_default",
        }
    }
}

impl fmt::Display for AvailabilityRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AvailabilityRule {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "forward_fill" | "ffill" => Ok(AvailabilityRule::ForwardFill),
            "zero_default" | "zero" => Ok(AvailabilityRule::ZeroDefault),
            other => Err(format!("unknown availability rule '{other}'")),
        }
    }
}

/// One configurable pipeline in place of the original's overlapping
/// script variants. `domain` is used verbatim as a link prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub domain: String,
    pub currency: String,
    /// When set, every output row carries this constant category.
    pub google_product_category: Option<String>,
    /// When true, every output row carries `condition = new`.
    pub set_condition: bool,
    pub image_policy: ImagePolicy,
    pub availability_rule: AvailabilityRule,
    /// Passthrough columns that also forward-fill when present.
    pub extra_sparse_columns: Vec<String>,
}

impl FeedConfig {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            currency: DEFAULT_CURRENCY.to_string(),
            google_product_category: None,
            set_condition: false,
            image_policy: ImagePolicy::Explode,
            availability_rule: AvailabilityRule::ForwardFill,
            extra_sparse_columns: vec![
                schema::PRODUCT_TYPE.to_string(),
                schema::SKU.to_string(),
            ],
        }
    }
}
