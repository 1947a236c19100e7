//! # Registration reducer / 注册状态归约器
//!
//! A pure transition function: no I/O, never fails. Commands that make no
//! sense for the current state leave it unchanged.

use tracing::debug;

use crate::registration::command::RegistrationCommand;
use crate::registration::health_selection;
use crate::registration::model::{RegistrationState, Step};

/// Pure state transition for the wizard aggregate.
/// 向导聚合的纯状态转换。
pub struct RegistrationReducer;

impl RegistrationReducer {
    /// Apply one command and return the next state.
    /// 应用一条命令并返回新状态。
    ///
    /// ## Behavior / 行为
    /// - `SetStep` moves at most one step; other targets are ignored.
    ///   `SetStep` 每次只能移动一步。
    /// - `SetTier` records the tier and jumps to `Account`.
    ///   `SetTier` 记录会员等级并跳转到账户步骤。
    /// - `Update*` patches only the fields it carries.
    ///   `Update*` 只修改补丁中提供的字段。
    /// - `SetHealthConditions` and `LoadPersisted` normalize the selection and
    ///   recompute `requires_medical_clearance`.
    ///   健康状况列表会被规范化，并重新计算是否需要医疗许可。
    /// - `LoadPersisted` keeps the current step.
    ///   `LoadPersisted` 保持当前步骤不变。
    /// - `Reset` returns the default state.
    ///   `Reset` 恢复默认状态。
    pub fn reduce(state: RegistrationState, command: RegistrationCommand) -> RegistrationState {
        let RegistrationState { step, mut data } = state;

        match command {
            RegistrationCommand::SetStep(target) => {
                if is_adjacent(step, target) {
                    RegistrationState { step: target, data }
                } else {
                    debug!(
                        from = step.number(),
                        to = target.number(),
                        "ignoring non-adjacent step change"
                    );
                    RegistrationState { step, data }
                }
            }
            RegistrationCommand::SetTier(tier) => {
                data.selected_tier = Some(tier);
                RegistrationState {
                    step: Step::Account,
                    data,
                }
            }
            RegistrationCommand::UpdateAccount(patch) => {
                patch.apply_to(&mut data.account);
                RegistrationState { step, data }
            }
            RegistrationCommand::UpdatePersonal(patch) => {
                patch.apply_to(&mut data.personal);
                RegistrationState { step, data }
            }
            RegistrationCommand::UpdateAddress(patch) => {
                patch.apply_to(&mut data.address);
                RegistrationState { step, data }
            }
            RegistrationCommand::SetHealthConditions(ids) => {
                let ids = health_selection::normalize(ids);
                data.requires_medical_clearance = health_selection::requires_medical_clearance(&ids);
                data.health_conditions = ids;
                RegistrationState { step, data }
            }
            RegistrationCommand::UpdatePayment(patch) => {
                patch.apply_to(&mut data.payment);
                RegistrationState { step, data }
            }
            RegistrationCommand::UpdateLegal(patch) => {
                patch.apply_to(&mut data.legal);
                RegistrationState { step, data }
            }
            RegistrationCommand::Reset => RegistrationState::default(),
            RegistrationCommand::LoadPersisted(mut restored) => {
                restored.health_conditions =
                    health_selection::normalize(std::mem::take(&mut restored.health_conditions));
                restored.requires_medical_clearance =
                    health_selection::requires_medical_clearance(&restored.health_conditions);
                RegistrationState {
                    step,
                    data: restored,
                }
            }
        }
    }
}

/// Steps move one at a time; re-setting the current step is allowed.
fn is_adjacent(current: Step, target: Step) -> bool {
    current.number().abs_diff(target.number()) <= 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BillingPeriod, Tier};
    use crate::registration::command::{
        AccountPatch, AddressPatch, LegalPatch, PaymentPatch, PersonalPatch,
    };
    use crate::registration::model::RegistrationData;

    fn gold() -> Tier {
        Tier {
            id: "gold".into(),
            name: "Gold".into(),
            price: 49.0,
            billing_period: BillingPeriod::Month,
            features: vec!["Classes".into()],
            access_hours: None,
        }
    }

    fn at(step: Step) -> RegistrationState {
        RegistrationState {
            step,
            data: RegistrationData::default(),
        }
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn set_tier_selects_and_moves_to_account() {
        let next = RegistrationReducer::reduce(at(Step::Plan), RegistrationCommand::SetTier(gold()));
        assert_eq!(next.step, Step::Account);
        assert_eq!(next.data.selected_tier.map(|t| t.id), Some("gold".to_string()));
    }

    #[test]
    fn set_step_moves_one_step_at_a_time() {
        let next = RegistrationReducer::reduce(at(Step::Plan), RegistrationCommand::SetStep(Step::Account));
        assert_eq!(next.step, Step::Account);

        let skipped =
            RegistrationReducer::reduce(at(Step::Plan), RegistrationCommand::SetStep(Step::Review));
        assert_eq!(skipped.step, Step::Plan);

        let back =
            RegistrationReducer::reduce(at(Step::Payment), RegistrationCommand::SetStep(Step::Health));
        assert_eq!(back.step, Step::Health);
    }

    #[test]
    fn back_then_forward_keeps_data() {
        let mut state = at(Step::Address);
        state.data.personal.first_name = "Ada".into();
        let before = state.clone();

        let back = RegistrationReducer::reduce(state, RegistrationCommand::SetStep(Step::Personal));
        let forward = RegistrationReducer::reduce(back, RegistrationCommand::SetStep(Step::Address));
        assert_eq!(forward, before);
    }

    #[test]
    fn partial_updates_merge_into_slices() {
        let state = RegistrationReducer::reduce(
            at(Step::Account),
            RegistrationCommand::UpdateAccount(AccountPatch {
                email: Some("ada@example.com".into()),
                ..Default::default()
            }),
        );
        let state = RegistrationReducer::reduce(
            state,
            RegistrationCommand::UpdatePersonal(PersonalPatch {
                first_name: Some("Ada".into()),
                ..Default::default()
            }),
        );
        let state = RegistrationReducer::reduce(
            state,
            RegistrationCommand::UpdateAddress(AddressPatch {
                apt: Some(Some("4B".into())),
                ..Default::default()
            }),
        );
        let state = RegistrationReducer::reduce(
            state,
            RegistrationCommand::UpdateLegal(LegalPatch {
                agree_terms: Some(true),
                ..Default::default()
            }),
        );

        assert_eq!(state.step, Step::Account);
        assert_eq!(state.data.account.email, "ada@example.com");
        assert!(state.data.account.password.is_empty());
        assert_eq!(state.data.personal.first_name, "Ada");
        assert_eq!(state.data.address.apt.as_deref(), Some("4B"));
        assert!(state.data.legal.agree_terms);
        assert!(!state.data.legal.agree_waiver);
        assert!(!state.data.legal.marketing_opt_in);
    }

    #[test]
    fn health_conditions_derive_clearance() {
        let state = RegistrationReducer::reduce(
            at(Step::Health),
            RegistrationCommand::SetHealthConditions(ids(&["diabetes-type1"])),
        );
        assert!(state.data.requires_medical_clearance);

        let state = RegistrationReducer::reduce(
            state,
            RegistrationCommand::SetHealthConditions(ids(&["diabetes-type1", "none"])),
        );
        assert_eq!(state.data.health_conditions, ids(&["none"]));
        assert!(!state.data.requires_medical_clearance);

        let state = RegistrationReducer::reduce(
            state,
            RegistrationCommand::SetHealthConditions(ids(&["none", "asthma"])),
        );
        assert_eq!(state.data.health_conditions, ids(&["asthma"]));
        assert!(!state.data.requires_medical_clearance);
    }

    #[test]
    fn reset_returns_defaults() {
        let state = RegistrationReducer::reduce(at(Step::Plan), RegistrationCommand::SetTier(gold()));
        let state = RegistrationReducer::reduce(state, RegistrationCommand::Reset);
        assert_eq!(state, RegistrationState::default());
    }

    #[test]
    fn load_persisted_keeps_current_step() {
        let mut restored = RegistrationData::default();
        restored.selected_tier = Some(gold());
        restored.health_conditions = ids(&["pregnancy"]);

        let state = RegistrationReducer::reduce(
            at(Step::Plan),
            RegistrationCommand::LoadPersisted(restored.clone()),
        );
        assert_eq!(state.step, Step::Plan);
        assert_eq!(state.data.selected_tier, restored.selected_tier);
        assert!(state.data.requires_medical_clearance);
    }

    #[test]
    fn persisted_data_round_trips_through_json() {
        let commands = vec![
            RegistrationCommand::SetTier(gold()),
            RegistrationCommand::UpdateAccount(AccountPatch {
                email: Some("ada@example.com".into()),
                password: Some("Secret123".into()),
                confirm_password: Some("Secret123".into()),
            }),
            RegistrationCommand::UpdatePersonal(PersonalPatch {
                first_name: Some("Ada".into()),
                last_name: Some("Lovelace".into()),
                phone: Some("+61 400 123 456".into()),
                date_of_birth: Some("1990-12-10".into()),
            }),
            RegistrationCommand::UpdateAddress(AddressPatch {
                street: Some("12 Analytical Way".into()),
                apt: Some(Some("4B".into())),
                city: Some("Sydney".into()),
                state: Some("NSW".into()),
                zip: Some("2000".into()),
            }),
            RegistrationCommand::SetHealthConditions(ids(&["diabetes-type1", "asthma"])),
            RegistrationCommand::UpdatePayment(PaymentPatch {
                card_number: Some("4242 4242 4242 4242".into()),
                expiry: Some("12/28".into()),
                cvv: Some("123".into()),
                billing_zip: Some("2000".into()),
            }),
            RegistrationCommand::UpdateLegal(LegalPatch {
                agree_terms: Some(true),
                agree_waiver: Some(true),
                marketing_opt_in: Some(true),
            }),
        ];
        let filled = commands
            .into_iter()
            .fold(at(Step::Plan), RegistrationReducer::reduce);
        assert!(filled.data.requires_medical_clearance);

        let json = serde_json::to_string(&filled.data).unwrap();
        let restored: RegistrationData = serde_json::from_str(&json).unwrap();
        let reloaded =
            RegistrationReducer::reduce(at(Step::Payment), RegistrationCommand::LoadPersisted(restored));

        assert_eq!(reloaded.step, Step::Payment);
        assert_eq!(reloaded.data, filled.data);
    }
}
