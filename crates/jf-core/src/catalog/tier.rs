use serde::{Deserialize, Serialize};

/// How often a membership is billed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    Month,
    Year,
}

impl BillingPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            BillingPeriod::Month => "month",
            BillingPeriod::Year => "year",
        }
    }
}

/// A selectable membership plan as served by `GET /tiers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub billing_period: BillingPeriod,
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_hours: Option<String>,
}

/// Contract violations in a tier record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TierError {
    #[error("ID is required")]
    MissingId,
    #[error("Name is required")]
    MissingName,
    #[error("Price must be a positive number")]
    NonPositivePrice,
    #[error("At least one feature is required")]
    NoFeatures,
}

impl Tier {
    /// Check the tier against the catalog contract.
    pub fn validate(&self) -> Result<(), TierError> {
        if self.id.is_empty() {
            return Err(TierError::MissingId);
        }
        if self.name.is_empty() {
            return Err(TierError::MissingName);
        }
        if !(self.price > 0.0) {
            return Err(TierError::NonPositivePrice);
        }
        if self.features.is_empty() {
            return Err(TierError::NoFeatures);
        }
        Ok(())
    }

    /// Price label such as `$49/month`.
    pub fn price_label(&self) -> String {
        format!("${}/{}", self.price, self.billing_period.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier() -> Tier {
        Tier {
            id: "gold".into(),
            name: "Gold".into(),
            price: 49.0,
            billing_period: BillingPeriod::Month,
            features: vec!["All classes".into()],
            access_hours: Some("24/7".into()),
        }
    }

    #[test]
    fn valid_tier_passes() {
        assert_eq!(tier().validate(), Ok(()));
    }

    #[test]
    fn rejects_non_positive_price_and_empty_features() {
        let mut free = tier();
        free.price = 0.0;
        assert_eq!(free.validate(), Err(TierError::NonPositivePrice));

        let mut bare = tier();
        bare.features.clear();
        assert_eq!(bare.validate(), Err(TierError::NoFeatures));
    }

    #[test]
    fn deserializes_wire_shape_without_access_hours() {
        let json = r#"{"id":"basic","name":"Basic","price":19.99,"billingPeriod":"month","features":["Gym floor"]}"#;
        let tier: Tier = serde_json::from_str(json).unwrap();
        assert_eq!(tier.billing_period, BillingPeriod::Month);
        assert_eq!(tier.access_hours, None);
        assert_eq!(tier.price_label(), "$19.99/month");
    }

    #[test]
    fn unknown_billing_period_is_rejected() {
        let json = r#"{"id":"x","name":"X","price":1,"billingPeriod":"week","features":["a"]}"#;
        assert!(serde_json::from_str::<Tier>(json).is_err());
    }
}
