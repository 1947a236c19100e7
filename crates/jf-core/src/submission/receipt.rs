use serde::{Deserialize, Serialize};

use crate::catalog::Tier;

/// Successful response of `POST /register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReceipt {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub user_id: String,
    #[serde(default)]
    pub membership: Option<Tier>,
}
