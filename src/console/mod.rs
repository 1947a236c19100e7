//! Console front-end.
//!
//! Prompts one step at a time. `back`, `reset` and `quit` work at any
//! prompt; progress is saved by the store as answers are accepted.

mod prompt;
mod render;

use jf_app::usecases::steps::StepError;
use jf_app::usecases::SubmissionError;
use jf_app::App;
use jf_core::registration::{RegistrationCommand, RegistrationData, Step};
use jf_core::submission::{RegistrationReceipt, SubmissionState};
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader, Stdin, Stdout};
use tracing::{info, warn};

pub use prompt::{Interrupt, Prompt};

/// How a console session ended.
#[derive(Debug)]
pub enum Outcome {
    Registered(RegistrationReceipt),
    Quit,
}

type StepResult<T = ()> = Result<T, Interrupt>;

pub struct Console<R, W> {
    app: App,
    prompt: Prompt<R, W>,
}

impl Console<BufReader<Stdin>, Stdout> {
    pub fn stdio(app: App) -> Self {
        Self::new(app, BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(app: App, input: R, output: W) -> Self {
        Self {
            app,
            prompt: Prompt::new(input, output),
        }
    }

    pub fn into_output(self) -> W {
        self.prompt.into_output()
    }

    pub async fn run(&mut self) -> anyhow::Result<Outcome> {
        let store = self.app.store();
        if store.data().await != RegistrationData::default() {
            self.prompt.say("Restored your saved progress.").await?;
        }
        self.prompt
            .say("Type 'back', 'reset' or 'quit' at any prompt.")
            .await?;

        loop {
            let state = store.state().await;
            self.prompt.say(render::header(&state)).await?;

            let result = match state.step {
                Step::Plan => self.plan().await.map(|()| None),
                Step::Account => self.account().await.map(|()| None),
                Step::Personal => self.personal().await.map(|()| None),
                Step::Address => self.address().await.map(|()| None),
                Step::Health => self.health().await.map(|()| None),
                Step::Payment => self.payment().await.map(|()| None),
                Step::Review => self.review().await,
            };

            match result {
                Ok(Some(receipt)) => return Ok(Outcome::Registered(receipt)),
                Ok(None) => {}
                Err(Interrupt::Back) => {
                    store.prev_step().await;
                }
                Err(Interrupt::Reset) => {
                    store.dispatch(RegistrationCommand::Reset).await;
                    self.prompt.say("Progress cleared.").await?;
                }
                Err(Interrupt::Quit) => {
                    info!(step = store.step().await.label(), "console session ended early");
                    self.prompt
                        .say("Your progress is saved. See you soon.")
                        .await?;
                    return Ok(Outcome::Quit);
                }
                Err(Interrupt::Io(err)) => return Err(err.into()),
            }
        }
    }

    /// Print a rejected step submit. `NotActive` is silent; the main loop
    /// re-reads the current step.
    async fn report(&mut self, err: &StepError) -> StepResult {
        match err {
            StepError::Invalid(errors) => {
                for line in render::field_errors(errors) {
                    self.prompt.say(line).await?;
                }
            }
            StepError::NotActive { .. } => {}
            other => self.prompt.say(format!("  ! {other}")).await?,
        }
        Ok(())
    }

    async fn plan(&mut self) -> StepResult {
        let plan = self.app.plan_step();
        let tiers = match plan.tiers().await {
            Ok(tiers) => tiers,
            Err(err) => {
                warn!(error = %err, "membership plans unavailable");
                self.report(&err).await?;
                return if self.prompt.confirm("Try again?", true).await? {
                    Ok(())
                } else {
                    Err(Interrupt::Quit)
                };
            }
        };

        let selected = plan.selected().await.map(|tier| tier.id);
        for (index, tier) in tiers.iter().enumerate() {
            let is_selected = selected.as_deref() == Some(tier.id.as_str());
            for line in render::tier_lines(index, tier, is_selected) {
                self.prompt.say(line).await?;
            }
        }

        let answer = self
            .prompt
            .ask("Choose a plan (number or id)", selected.as_deref().unwrap_or(""))
            .await?;
        let id = answer
            .parse::<usize>()
            .ok()
            .and_then(|n| tiers.get(n.checked_sub(1)?))
            .map(|tier| tier.id.clone())
            .unwrap_or(answer);

        if let Err(err) = plan.select_by_id(&id).await {
            self.report(&err).await?;
        }
        Ok(())
    }

    async fn account(&mut self) -> StepResult {
        let mut step = self.app.account_step().await;
        loop {
            let email = self.prompt.ask("Email", &step.form().values().email).await?;
            step.set_email(email);

            let has_password = !step.form().values().password.is_empty();
            if let Some(password) = self.prompt.ask_secret("Password", has_password).await? {
                step.set_password(password);
            }
            let has_confirm = !step.form().values().confirm_password.is_empty();
            if let Some(confirm) = self
                .prompt
                .ask_secret("Confirm password", has_confirm)
                .await?
            {
                step.set_confirm_password(confirm);
            }

            match step.submit().await {
                Ok(_) | Err(StepError::NotActive { .. }) => return Ok(()),
                Err(err) => self.report(&err).await?,
            }
        }
    }

    async fn personal(&mut self) -> StepResult {
        let mut step = self.app.personal_step().await;
        loop {
            let values = step.form().values().clone();
            let first = self.prompt.ask("First name", &values.first_name).await?;
            step.set_first_name(first);
            let last = self.prompt.ask("Last name", &values.last_name).await?;
            step.set_last_name(last);
            let phone = self.prompt.ask("Phone", &values.phone).await?;
            step.set_phone(phone);
            let dob = self
                .prompt
                .ask("Date of birth (YYYY-MM-DD)", &values.date_of_birth)
                .await?;
            step.set_date_of_birth(dob);

            match step.submit().await {
                Ok(_) | Err(StepError::NotActive { .. }) => return Ok(()),
                Err(err) => self.report(&err).await?,
            }
        }
    }

    async fn address(&mut self) -> StepResult {
        let mut step = self.app.address_step().await;
        loop {
            let values = step.form().values().clone();
            let street = self.prompt.ask("Street address", &values.street).await?;
            step.set_street(street);
            let apt = self
                .prompt
                .ask(
                    "Apt/Suite (optional, '-' clears)",
                    values.apt.as_deref().unwrap_or(""),
                )
                .await?;
            step.set_apt(if apt == "-" { String::new() } else { apt });
            let city = self.prompt.ask("City", &values.city).await?;
            step.set_city(city);
            let state = self.prompt.ask("State", &values.state).await?;
            step.set_state(state);
            let zip = self.prompt.ask("ZIP code", &values.zip).await?;
            step.set_zip(zip);

            match step.submit().await {
                Ok(_) | Err(StepError::NotActive { .. }) => return Ok(()),
                Err(err) => self.report(&err).await?,
            }
        }
    }

    async fn health(&mut self) -> StepResult {
        let mut step = self.app.health_step().await;
        let conditions = match step.conditions().await {
            Ok(conditions) => conditions,
            Err(err) => {
                warn!(error = %err, "health conditions unavailable");
                self.report(&err).await?;
                return if self.prompt.confirm("Try again?", true).await? {
                    Ok(())
                } else {
                    Err(Interrupt::Quit)
                };
            }
        };

        loop {
            for (index, condition) in conditions.iter().enumerate() {
                let selected = step.is_selected(&condition.id);
                self.prompt
                    .say(render::condition_line(index, condition, selected))
                    .await?;
            }
            self.prompt
                .say("  * requires medical clearance")
                .await?;

            let answer = self
                .prompt
                .ask("Toggle (numbers or ids, comma separated; blank to continue)", "")
                .await?;
            if !answer.is_empty() {
                for token in answer.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                    let condition = token
                        .parse::<usize>()
                        .ok()
                        .and_then(|n| conditions.get(n.checked_sub(1)?))
                        .or_else(|| conditions.iter().find(|c| c.id == token));
                    match condition {
                        Some(condition) => step.toggle(&condition.id),
                        None => self.prompt.say(format!("  ! Unknown condition '{token}'")).await?,
                    }
                }
                continue;
            }

            let flagged = step.flagged_by_catalog(&conditions);
            if step.requires_medical_clearance() || !flagged.is_empty() {
                self.prompt
                    .say("  Note: you will need a doctor's clearance before your first visit.")
                    .await?;
            }
            match step.submit().await {
                Ok(_) | Err(StepError::NotActive { .. }) => return Ok(()),
                Err(err) => self.report(&err).await?,
            }
        }
    }

    async fn payment(&mut self) -> StepResult {
        let mut step = self.app.payment_step().await;
        loop {
            let values = step.form().values().clone();
            let card = self.prompt.ask("Card number", &values.card_number).await?;
            step.set_card_number(&card);
            let expiry = self.prompt.ask("Expiry (MM/YY)", &values.expiry).await?;
            step.set_expiry(&expiry);
            let cvv = self.prompt.ask("CVV", &values.cvv).await?;
            step.set_cvv(&cvv);
            let zip = self.prompt.ask("Billing ZIP", &values.billing_zip).await?;
            step.set_billing_zip(&zip);

            match step.submit().await {
                Ok(_) | Err(StepError::NotActive { .. }) => return Ok(()),
                Err(err) => self.report(&err).await?,
            }
        }
    }

    async fn review(&mut self) -> StepResult<Option<RegistrationReceipt>> {
        let review = self.app.review_step();
        let data = review.summary().await;
        for line in render::summary(&data) {
            self.prompt.say(line).await?;
        }

        let legal = data.legal;
        let terms = self
            .prompt
            .confirm("I agree to the Terms of Service", legal.agree_terms)
            .await?;
        let waiver = self
            .prompt
            .confirm("I accept the Liability Waiver", legal.agree_waiver)
            .await?;
        let marketing = self
            .prompt
            .confirm("Send me offers and news", legal.marketing_opt_in)
            .await?;
        for result in [
            review.set_agree_terms(terms).await,
            review.set_agree_waiver(waiver).await,
            review.set_marketing_opt_in(marketing).await,
        ] {
            if let Err(err) = result {
                self.report(&err).await?;
                return Ok(None);
            }
        }

        if !review.all_agreed().await {
            self.prompt
                .say("  ! You must agree to the terms and the waiver to continue.")
                .await?;
            return Ok(None);
        }
        if !self.prompt.confirm("Create my account?", true).await? {
            return Ok(None);
        }

        loop {
            self.prompt.say("Submitting...").await?;
            match review.submit().await {
                Ok(SubmissionState::Succeeded { receipt }) => {
                    self.prompt.say(format!("{} (id {})", receipt.message, receipt.user_id)).await?;
                    return Ok(Some(receipt));
                }
                Ok(SubmissionState::Failed { message }) => {
                    self.prompt.say(format!("  ! {message}")).await?;
                    if !self.prompt.confirm("Try again?", true).await? {
                        return Ok(None);
                    }
                }
                Ok(_) => return Ok(None),
                Err(SubmissionError::AlreadySubmitted) => return Ok(None),
                Err(err) => {
                    self.prompt.say(format!("  ! {err}")).await?;
                    return Ok(None);
                }
            }
        }
    }
}
