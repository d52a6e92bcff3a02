//! Experiment drafts: the create-experiment payload before ids are assigned.
//!
//! [`NewExperiment::into_experiment`] performs the same preparation the admin
//! wizard does before saving: trims names, fills in default variant names,
//! forces the first variant to be the control and assigns fresh ids.
//! Visitor and conversion counts are passed through untouched so that bad
//! counts still reach the engine's validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DraftError;
use crate::model::{Experiment, ExperimentStatus, ExperimentType, TargetingRule, Variant};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVariant {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub visitors: i64,
    #[serde(default)]
    pub conversions: i64,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub is_control: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExperiment {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ExperimentType,
    pub url: String,
    #[serde(default)]
    pub status: Option<ExperimentStatus>,
    pub variants: Vec<NewVariant>,
    #[serde(default)]
    pub targeting: Vec<TargetingRule>,
    #[serde(default)]
    pub start_date: Option<String>,
}

impl NewExperiment {
    /// Validate the draft and turn it into an [`Experiment`] with fresh ids.
    pub fn into_experiment(self) -> Result<Experiment, DraftError> {
        let name = self.name.trim();
        let url = self.url.trim();
        if name.is_empty() {
            return Err(DraftError::EmptyName);
        }
        if url.is_empty() {
            return Err(DraftError::EmptyUrl);
        }
        if self.variants.is_empty() {
            return Err(DraftError::NoVariants);
        }

        let variants = self
            .variants
            .into_iter()
            .enumerate()
            .map(|(idx, v)| {
                let trimmed = v.name.trim();
                Variant {
                    id: Uuid::new_v4().to_string(),
                    name: if trimmed.is_empty() { format!("Variant {}", idx + 1) } else { trimmed.to_string() },
                    visitors: v.visitors,
                    conversions: v.conversions,
                    weight: sanitize_weight(v.weight),
                    is_control: idx == 0 || v.is_control,
                }
            })
            .collect();

        Ok(Experiment {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            kind: self.kind,
            status: self.status.unwrap_or_default(),
            url: url.to_string(),
            start_date: self.start_date,
            variants,
            targeting: self.targeting,
        })
    }
}

fn sanitize_weight(weight: f64) -> f64 {
    if weight.is_nan() { 0.0 } else { weight.max(0.0) }
}
