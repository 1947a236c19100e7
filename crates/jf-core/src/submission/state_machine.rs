//! Submission state machine.
//!
//! Pure transition function for the terminal review step.

use super::RegistrationReceipt;

/// Submission flow state.
///
/// 提交流程状态。
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmissionState {
    /// Nothing sent yet, or the last attempt was cancelled.
    ///
    /// 尚未提交，或上次提交已取消。
    #[default]
    Idle,
    /// Request in flight.
    ///
    /// 请求进行中。
    Submitting,
    /// Account created. Terminal.
    ///
    /// 账户已创建（终态）。
    Succeeded { receipt: RegistrationReceipt },
    /// Last attempt failed; a new submit retries.
    ///
    /// 上次提交失败，可重试。
    Failed { message: String },
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionState::Succeeded { .. })
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// Events that drive the submission flow.
///
/// 驱动提交流程的事件。
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionEvent {
    /// User pressed submit.
    ///
    /// 用户点击提交。
    Submit { all_agreed: bool },
    /// Endpoint accepted the registration.
    ///
    /// 服务端接受注册。
    Succeeded { receipt: RegistrationReceipt },
    /// Request failed with a user-facing message.
    ///
    /// 请求失败，附带提示信息。
    Failed { message: String },
    /// In-flight request was aborted.
    ///
    /// 进行中的请求被取消。
    Cancelled,
}

/// Side-effects produced by transitions.
///
/// 状态迁移产生的副作用。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionAction {
    /// Send the composite payload.
    ///
    /// 发送注册请求。
    SendRegistration,
    /// Freeze the aggregate and drop the saved snapshot.
    ///
    /// 冻结注册数据并清除本地快照。
    MarkRegistrationComplete,
}

/// Pure submission state machine.
///
/// 纯状态机：不包含副作用。
pub struct SubmissionStateMachine;

impl SubmissionStateMachine {
    pub fn transition(
        state: SubmissionState,
        event: SubmissionEvent,
    ) -> (SubmissionState, Vec<SubmissionAction>) {
        match (state, event) {
            (
                SubmissionState::Idle | SubmissionState::Failed { .. },
                SubmissionEvent::Submit { all_agreed: true },
            ) => (
                SubmissionState::Submitting,
                vec![SubmissionAction::SendRegistration],
            ),
            (SubmissionState::Submitting, SubmissionEvent::Succeeded { receipt }) => (
                SubmissionState::Succeeded { receipt },
                vec![SubmissionAction::MarkRegistrationComplete],
            ),
            (SubmissionState::Submitting, SubmissionEvent::Failed { message }) => {
                (SubmissionState::Failed { message }, Vec::new())
            }
            (SubmissionState::Submitting, SubmissionEvent::Cancelled) => {
                (SubmissionState::Idle, Vec::new())
            }
            (state, _event) => (state, Vec::new()),
        }
    }
}
