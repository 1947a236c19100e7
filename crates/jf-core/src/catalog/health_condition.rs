use serde::{Deserialize, Serialize};

/// A selectable health condition as served by `GET /health-conditions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCondition {
    pub id: String,
    pub name: String,
    pub category: String,
    pub requires_medical_clearance: bool,
}
