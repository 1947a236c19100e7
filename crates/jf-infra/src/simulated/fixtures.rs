//! Canned catalog served by the simulated membership service.

use jf_core::catalog::{BillingPeriod, HealthCondition, Tier};

fn tier(
    id: &str,
    name: &str,
    price: f64,
    features: &[&str],
    access_hours: Option<&str>,
) -> Tier {
    Tier {
        id: id.to_string(),
        name: name.to_string(),
        price,
        billing_period: BillingPeriod::Month,
        features: features.iter().map(|f| f.to_string()).collect(),
        access_hours: access_hours.map(str::to_string),
    }
}

pub fn membership_tiers() -> Vec<Tier> {
    vec![
        tier(
            "basic",
            "Basic",
            29.99,
            &["Gym floor access", "Locker rooms", "Free fitness assessment"],
            Some("6am - 10pm"),
        ),
        tier(
            "gold",
            "Gold",
            49.99,
            &[
                "Everything in Basic",
                "Unlimited group classes",
                "Sauna and steam room",
                "1 guest pass per month",
            ],
            Some("24/7"),
        ),
        tier(
            "platinum",
            "Platinum",
            89.99,
            &[
                "Everything in Gold",
                "4 personal training sessions per month",
                "Nutrition coaching",
                "Unlimited guest passes",
            ],
            Some("24/7"),
        ),
    ]
}

fn condition(id: &str, name: &str, category: &str, requires_clearance: bool) -> HealthCondition {
    HealthCondition {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        requires_medical_clearance: requires_clearance,
    }
}

pub fn health_conditions() -> Vec<HealthCondition> {
    vec![
        condition("heart-disease", "Heart disease", "Cardiovascular", true),
        condition("high-blood-pressure", "High blood pressure", "Cardiovascular", true),
        condition("diabetes-type1", "Diabetes (Type 1)", "Metabolic", true),
        condition("diabetes-type2", "Diabetes (Type 2)", "Metabolic", true),
        condition("asthma", "Asthma", "Respiratory", false),
        condition("epilepsy", "Epilepsy", "Neurological", true),
        condition("pregnancy", "Pregnancy", "Other", true),
        condition("osteoporosis", "Osteoporosis", "Musculoskeletal", true),
        condition("back-pain", "Chronic back pain", "Musculoskeletal", false),
        condition("knee-injury", "Knee injury", "Musculoskeletal", false),
        condition("recent-surgery", "Surgery in the last 6 months", "Other", true),
        condition("none", "None of the above", "None", false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use jf_core::registration::health_selection::CLEARANCE_CONDITION_IDS;

    #[test]
    fn tiers_satisfy_contract() {
        for tier in membership_tiers() {
            assert_eq!(tier.validate(), Ok(()), "tier {}", tier.id);
        }
    }

    #[test]
    fn clearance_flags_agree_with_fixed_list() {
        for condition in health_conditions() {
            assert_eq!(
                condition.requires_medical_clearance,
                CLEARANCE_CONDITION_IDS.contains(&condition.id.as_str()),
                "condition {}",
                condition.id
            );
        }
    }
}
