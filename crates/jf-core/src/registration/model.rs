//! # Registration aggregate / 注册聚合
//!
//! Wizard step plus every field the member fills in. Pure data; the reducer
//! is the only writer.

use serde::{Deserialize, Serialize};

use crate::catalog::Tier;
use crate::security::SecretText;

/// Number of wizard steps.
/// 向导步骤总数。
pub const TOTAL_STEPS: u8 = 7;

/// Wizard step, in display order.
/// 向导步骤，按显示顺序排列。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Step {
    Plan = 1,
    Account = 2,
    Personal = 3,
    Address = 4,
    Health = 5,
    Payment = 6,
    Review = 7,
}

impl Step {
    /// Every step, first to last.
    /// 全部步骤（从首到尾）。
    pub const ALL: [Step; TOTAL_STEPS as usize] = [
        Step::Plan,
        Step::Account,
        Step::Personal,
        Step::Address,
        Step::Health,
        Step::Payment,
        Step::Review,
    ];

    /// 1-based position.
    /// 从 1 开始的序号。
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Step at a 1-based position, `None` outside `1..=TOTAL_STEPS`.
    /// 按序号查找步骤，越界返回 `None`。
    pub fn from_number(number: u8) -> Option<Step> {
        Step::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }

    /// Following step; `None` on `Review`.
    /// 下一步；最后一步返回 `None`。
    pub fn next(self) -> Option<Step> {
        Step::from_number(self.number() + 1)
    }

    /// Preceding step; `None` on `Plan`.
    /// 上一步；第一步返回 `None`。
    pub fn prev(self) -> Option<Step> {
        Step::from_number(self.number().checked_sub(1)?)
    }

    /// Short display name.
    /// 显示名称。
    pub fn label(self) -> &'static str {
        match self {
            Step::Plan => "Plan",
            Step::Account => "Account",
            Step::Personal => "Personal",
            Step::Address => "Address",
            Step::Health => "Health",
            Step::Payment => "Payment",
            Step::Review => "Review",
        }
    }
}

impl Default for Step {
    fn default() -> Self {
        Step::Plan
    }
}

/// Login credentials. Both secrets are redacted in `Debug`.
/// 登录凭据，密码在 `Debug` 输出中被隐藏。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountInfo {
    pub email: String,
    pub password: SecretText,
    pub confirm_password: SecretText,
}

/// Member identity and contact phone.
/// 会员个人信息。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    /// `YYYY-MM-DD`, as typed.
    /// 用户输入的出生日期。
    #[serde(rename = "dob")]
    pub date_of_birth: String,
}

/// Postal address. `apt` is the only optional field.
/// 邮寄地址，仅 `apt` 可选。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressInfo {
    pub street: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apt: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Payment details. `card_number` keeps its display grouping (`4242 4242 ...`).
/// 支付信息，卡号保留显示分组。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentInfo {
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
    pub billing_zip: String,
}

impl PaymentInfo {
    /// Card number without separators.
    /// 去掉分隔符后的卡号。
    pub fn raw_card_number(&self) -> String {
        self.card_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect()
    }
}

/// Agreement checkboxes on the review step.
/// 确认页的协议勾选项。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegalConsent {
    pub agree_terms: bool,
    pub agree_waiver: bool,
    pub marketing_opt_in: bool,
}

impl LegalConsent {
    /// Terms and waiver both accepted; marketing is optional.
    /// 条款与免责声明均已同意（营销订阅可选）。
    pub fn all_agreed(&self) -> bool {
        self.agree_terms && self.agree_waiver
    }
}

/// Every data field of the wizard; this is also the persisted snapshot.
/// 向导的全部数据字段，也是持久化快照的内容。
///
/// Unknown keys are ignored and missing keys fall back to defaults so that
/// an older snapshot still loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationData {
    pub selected_tier: Option<Tier>,
    pub account: AccountInfo,
    pub personal: PersonalInfo,
    pub address: AddressInfo,
    pub health_conditions: Vec<String>,
    pub requires_medical_clearance: bool,
    pub payment: PaymentInfo,
    pub legal: LegalConsent,
}

/// The aggregate owned by the registration store.
/// 注册存储持有的聚合状态。
///
/// `step` is never persisted; a restored session starts on `Plan`.
/// `step` 不会被持久化。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationState {
    pub step: Step,
    pub data: RegistrationData,
}

impl RegistrationState {
    /// `(step - 1) / (TOTAL_STEPS - 1) * 100`.
    /// 进度百分比。
    pub fn progress_percent(&self) -> f64 {
        f64::from(self.step.number() - 1) / f64::from(TOTAL_STEPS - 1) * 100.0
    }

    /// Whether the wizard is on `Review`.
    /// 是否处于最后一步。
    pub fn is_last_step(&self) -> bool {
        self.step == Step::Review
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_numbers_round_trip() {
        for step in Step::ALL {
            assert_eq!(Step::from_number(step.number()), Some(step));
        }
        assert_eq!(Step::from_number(0), None);
        assert_eq!(Step::from_number(8), None);
        assert_eq!(Step::Plan.prev(), None);
        assert_eq!(Step::Review.next(), None);
        assert_eq!(Step::Health.next(), Some(Step::Payment));
    }

    #[test]
    fn progress_runs_from_zero_to_hundred() {
        let mut state = RegistrationState::default();
        assert_eq!(state.progress_percent(), 0.0);
        assert!(!state.is_last_step());

        state.step = Step::Personal;
        assert!((state.progress_percent() - 100.0 / 3.0).abs() < 1e-9);

        state.step = Step::Review;
        assert_eq!(state.progress_percent(), 100.0);
        assert!(state.is_last_step());
    }

    #[test]
    fn raw_card_number_strips_separators() {
        let payment = PaymentInfo {
            card_number: "4242 4242-4242 4242".into(),
            ..Default::default()
        };
        assert_eq!(payment.raw_card_number(), "4242424242424242");
    }

    #[test]
    fn snapshot_uses_wire_field_names() {
        let data = RegistrationData {
            personal: PersonalInfo {
                date_of_birth: "1990-04-01".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["personal"]["dob"], "1990-04-01");
        assert!(json["address"].get("apt").is_none());
        assert_eq!(json["legal"]["marketingOptIn"], false);
        assert!(json.get("step").is_none());
    }

    #[test]
    fn partial_snapshot_fills_defaults() {
        let data: RegistrationData =
            serde_json::from_str(r#"{"account":{"email":"a@b.co"},"extra":1}"#).unwrap();
        assert_eq!(data.account.email, "a@b.co");
        assert!(data.account.password.is_empty());
        assert!(data.health_conditions.is_empty());
    }
}
