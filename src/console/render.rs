//! Text rendering for the console.

use jf_core::catalog::{HealthCondition, Tier};
use jf_core::registration::{RegistrationData, RegistrationState, TOTAL_STEPS};
use jf_core::validation::FieldErrors;

pub fn header(state: &RegistrationState) -> String {
    format!(
        "\n== Step {}/{}: {} [{:.0}%] ==",
        state.step.number(),
        TOTAL_STEPS,
        state.step.label(),
        state.progress_percent()
    )
}

pub fn field_errors(errors: &FieldErrors) -> Vec<String> {
    errors
        .iter()
        .map(|(field, error)| format!("  ! {}: {}", field.label(), error))
        .collect()
}

pub fn tier_lines(index: usize, tier: &Tier, selected: bool) -> Vec<String> {
    let marker = if selected { " (selected)" } else { "" };
    let mut lines = vec![format!(
        "  {}. {} {}{}",
        index + 1,
        tier.name,
        tier.price_label(),
        marker
    )];
    if let Some(hours) = &tier.access_hours {
        lines.push(format!("     Access: {hours}"));
    }
    lines.extend(tier.features.iter().map(|f| format!("     - {f}")));
    lines
}

pub fn condition_line(index: usize, condition: &HealthCondition, selected: bool) -> String {
    format!(
        "  {:>2}. [{}] {} ({}){}",
        index + 1,
        if selected { "x" } else { " " },
        condition.name,
        condition.category,
        if condition.requires_medical_clearance {
            " *"
        } else {
            ""
        }
    )
}

/// `**** 4242`, or blank when there are too few digits.
pub fn mask_card(card_number: &str) -> String {
    let digits: Vec<char> = card_number.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < 4 {
        return String::new();
    }
    let last4: String = digits[digits.len() - 4..].iter().collect();
    format!("**** {last4}")
}

pub fn summary(data: &RegistrationData) -> Vec<String> {
    let plan = data
        .selected_tier
        .as_ref()
        .map(|tier| format!("{} {}", tier.name, tier.price_label()))
        .unwrap_or_else(|| "-".to_string());
    let address = &data.address;
    let street = match &address.apt {
        Some(apt) => format!("{}, {}", address.street, apt),
        None => address.street.clone(),
    };
    let conditions = if data.health_conditions.is_empty() {
        "-".to_string()
    } else {
        data.health_conditions.join(", ")
    };

    let mut lines = vec![
        format!("  Plan:      {plan}"),
        format!("  Email:     {}", data.account.email),
        format!(
            "  Name:      {} {}",
            data.personal.first_name, data.personal.last_name
        ),
        format!("  Phone:     {}", data.personal.phone),
        format!("  Born:      {}", data.personal.date_of_birth),
        format!("  Address:   {street}"),
        format!(
            "             {}, {} {}",
            address.city, address.state, address.zip
        ),
        format!("  Health:    {conditions}"),
        format!(
            "  Card:      {} exp {}",
            mask_card(&data.payment.card_number),
            data.payment.expiry
        ),
    ];
    if data.requires_medical_clearance {
        lines.push(
            "  Note: a doctor's clearance is required before your membership starts.".to_string(),
        );
    }
    lines
}
