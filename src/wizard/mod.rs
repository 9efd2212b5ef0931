//! Generic multi-step create/update wizard.
//!
//! Step 1 picks how many entities to create; steps `2..=count+1` each edit one
//! slot, and the last of them submits the whole batch in one call. Update
//! wizards are seeded from selected rows and start on step 2.

pub mod amount;
pub mod navigation;
pub mod submit;

pub use amount::{amount_options, seed_slots};
pub use navigation::{
    screen_for, slot_for_step, step_transition, NavAction, WizardNavError, WizardScreen,
    AMOUNT_STEP, FIRST_FORM_STEP,
};
pub use submit::{
    build_request, duplicate_message, find_duplicate, outcome_actions, outcome_toasts, Duplicate,
    SubmitReport, UNEXPECTED_ERROR_MESSAGE,
};

use crate::api::{FeatureApi, FeatureOutcome, Operation};
use crate::config::Settings;
use crate::form::{
    apply_field_change, validate_form, EntityForm, EntityKind, FieldIssue, FieldValue, FormError,
};
use crate::notify::{Notifier, ToastLevel};
use crate::shared::logging::EventLog;
use crate::store::{StoreAction, WizardContext, WizardSession};
use crate::tier::TierLimit;
use serde_json::json;

const DEFAULT_DISMISS_LABEL: &str = "Close";

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("no {feature} quota remaining")]
    QuotaExhausted { feature: String },
    #[error("tier limit is for `{actual}` but this wizard needs `{expected}`")]
    FeatureMismatch {
        expected: &'static str,
        actual: String,
    },
    #[error("select at least one row to update")]
    NoRowsSelected,
    #[error("{requested} rows selected but only {remaining} updates remain")]
    UpdateLimitExceeded { requested: usize, remaining: usize },
    #[error("amount {requested} is outside 1..={max}")]
    AmountOutOfRange { requested: usize, max: usize },
    #[error("the amount can only be chosen on the first step of a create wizard")]
    AmountUnavailable,
    #[error("submit is only available on step {terminal}, current step is {step}")]
    NotAtSubmitStep { step: usize, terminal: usize },
    #[error(transparent)]
    Navigation(#[from] WizardNavError),
    #[error(transparent)]
    Form(#[from] FormError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Advanced(WizardScreen),
    Blocked(Vec<FieldIssue>),
}

#[derive(Debug, Clone)]
pub struct WizardOptions {
    pub listing_route: String,
    pub dismiss_label: String,
    pub log: EventLog,
}

impl WizardOptions {
    pub fn default_for(kind: EntityKind) -> Self {
        Self {
            listing_route: kind.default_listing_route().to_string(),
            dismiss_label: DEFAULT_DISMISS_LABEL.to_string(),
            log: EventLog::disabled(),
        }
    }

    pub fn from_settings(settings: &Settings, kind: EntityKind) -> Self {
        Self {
            listing_route: settings.listing_route(kind),
            dismiss_label: settings.notifications.dismiss_label.clone(),
            log: settings.event_log(),
        }
    }

    pub fn with_log(mut self, log: EventLog) -> Self {
        self.log = log;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Wizard<E: EntityForm> {
    operation: Operation,
    context: WizardContext,
    slots: Vec<E>,
    feature: String,
    remaining: usize,
    options: WizardOptions,
}

impl<E: EntityForm> Wizard<E> {
    pub fn open_create(tier: &TierLimit, options: WizardOptions) -> Result<Self, WizardError> {
        check_feature::<E>(tier)?;
        let remaining = tier.remaining_create();
        if remaining == 0 {
            return Err(WizardError::QuotaExhausted {
                feature: tier.feature_name.to_string(),
            });
        }
        let wizard = Self {
            operation: Operation::Create,
            context: WizardContext::new(WizardSession::new(AMOUNT_STEP, 1)),
            slots: seed_slots(1),
            feature: tier.feature_name.to_string(),
            remaining,
            options,
        };
        wizard.log_opened();
        Ok(wizard)
    }

    pub fn open_update(
        tier: &TierLimit,
        rows: Vec<E>,
        options: WizardOptions,
    ) -> Result<Self, WizardError> {
        check_feature::<E>(tier)?;
        if rows.is_empty() {
            return Err(WizardError::NoRowsSelected);
        }
        let remaining = tier.remaining_update();
        if rows.len() > remaining {
            return Err(WizardError::UpdateLimitExceeded {
                requested: rows.len(),
                remaining,
            });
        }
        let mut context = WizardContext::new(WizardSession::new(FIRST_FORM_STEP, rows.len()));
        context.dispatch(StoreAction::SetSelectedRows(
            rows.iter().map(EntityForm::identity_key).collect(),
        ));
        let wizard = Self {
            operation: Operation::Update,
            context,
            slots: rows,
            feature: tier.feature_name.to_string(),
            remaining,
            options,
        };
        wizard.log_opened();
        Ok(wizard)
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn context(&self) -> &WizardContext {
        &self.context
    }

    pub fn session(&self) -> &WizardSession {
        &self.context.session
    }

    pub fn current_step(&self) -> usize {
        self.context.session.current_step
    }

    pub fn count(&self) -> usize {
        self.context.session.count
    }

    pub fn is_loading(&self) -> bool {
        self.context.session.loading
    }

    pub fn screen(&self) -> WizardScreen {
        screen_for(&self.context.session)
    }

    pub fn slots(&self) -> &[E] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Result<&E, WizardError> {
        let count = self.slots.len();
        self.slots
            .get(index)
            .ok_or(WizardError::Form(FormError::SlotOutOfRange { index, count }))
    }

    /// Direct access for bulk edits. Writes made here skip the cascade-clear
    /// that [`Wizard::set_field`] applies.
    pub fn slot_mut(&mut self, index: usize) -> Result<&mut E, WizardError> {
        let count = self.slots.len();
        self.slots
            .get_mut(index)
            .ok_or(WizardError::Form(FormError::SlotOutOfRange { index, count }))
    }

    /// Quota left for this wizard's operation. Shrinks as batches succeed.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn amount_options(&self) -> Vec<usize> {
        match self.operation {
            Operation::Create => amount_options(self.remaining),
            Operation::Update => Vec::new(),
        }
    }

    /// Replaces every slot with `amount` fresh templates.
    pub fn select_amount(&mut self, amount: usize) -> Result<(), WizardError> {
        if self.operation != Operation::Create || self.current_step() != AMOUNT_STEP {
            return Err(WizardError::AmountUnavailable);
        }
        self.check_quota()?;
        if amount == 0 || amount > self.remaining {
            return Err(WizardError::AmountOutOfRange {
                requested: amount,
                max: self.remaining,
            });
        }
        self.slots = seed_slots(amount);
        self.context.dispatch(StoreAction::SetCount(amount));
        self.options.log.info(
            "wizard.amount",
            "amount selected",
            json!({ "kind": E::KIND.as_str(), "count": amount }),
        );
        Ok(())
    }

    pub fn next(&mut self) -> Result<StepOutcome, WizardError> {
        let target = step_transition(&self.context.session, self.floor(), NavAction::Next)?;
        if self.current_step() == AMOUNT_STEP {
            self.check_quota()?;
        }
        if let Some(slot) = slot_for_step(self.current_step()) {
            let issues = validate_form(self.slot(slot)?, slot);
            if !issues.is_empty() {
                return Ok(StepOutcome::Blocked(issues));
            }
        }
        self.move_to(target);
        Ok(StepOutcome::Advanced(self.screen()))
    }

    pub fn previous(&mut self) -> Result<WizardScreen, WizardError> {
        let target = step_transition(&self.context.session, self.floor(), NavAction::Previous)?;
        self.move_to(target);
        Ok(self.screen())
    }

    /// User edit of one field. Returns the dependent fields that were reset.
    pub fn set_field(
        &mut self,
        slot: usize,
        field: E::Field,
        value: impl Into<FieldValue>,
    ) -> Result<Vec<E::Field>, WizardError> {
        let form = self.slot_mut(slot)?;
        Ok(apply_field_change(form, field, value.into())?)
    }

    pub fn append_row(&mut self, slot: usize, group: E::Group) -> Result<usize, WizardError> {
        Ok(self.slot_mut(slot)?.append_row(group))
    }

    pub fn remove_row(
        &mut self,
        slot: usize,
        group: E::Group,
        index: usize,
    ) -> Result<(), WizardError> {
        Ok(self.slot_mut(slot)?.remove_row(group, index)?)
    }

    pub fn dismiss_modal(&mut self) {
        self.context.dismiss_modal();
    }

    /// Validates, de-duplicates and sends the whole batch. `loading` is set for
    /// the duration of the call and always cleared afterwards.
    pub fn submit(
        &mut self,
        api: &mut dyn FeatureApi,
        notifier: &mut dyn Notifier,
    ) -> Result<SubmitReport, WizardError> {
        let session = &self.context.session;
        if !session.is_terminal() {
            return Err(WizardError::NotAtSubmitStep {
                step: session.current_step,
                terminal: session.terminal_step(),
            });
        }
        if self.count() > self.remaining {
            return Err(self.quota_exhausted());
        }
        if session.error.is_some() {
            self.context.dispatch(StoreAction::SetError(None));
        }
        self.context.dispatch(StoreAction::SetLoading(true));
        let report = self.run_submission(api, notifier);
        self.context.dispatch(StoreAction::SetLoading(false));
        Ok(report)
    }

    pub fn close(self) {
        self.options.log.info(
            "wizard.closed",
            "wizard closed",
            json!({
                "kind": E::KIND.as_str(),
                "step": self.current_step(),
                "count": self.count(),
            }),
        );
    }

    fn run_submission(
        &mut self,
        api: &mut dyn FeatureApi,
        notifier: &mut dyn Notifier,
    ) -> SubmitReport {
        let kind = E::KIND;
        let log = self.options.log.clone();

        let issues: Vec<FieldIssue> = self
            .slots
            .iter()
            .enumerate()
            .flat_map(|(index, slot)| validate_form(slot, index))
            .collect();
        if !issues.is_empty() {
            log.warn(
                "submit.invalid",
                "batch failed validation",
                json!({ "kind": kind.as_str(), "issues": issues.len() }),
            );
            return SubmitReport::Invalid(issues);
        }

        if let Some(duplicate) = find_duplicate(&self.slots) {
            self.toast(notifier, vec![(ToastLevel::Error, duplicate_message(kind))]);
            log.warn(
                "submit.duplicate",
                "duplicate identity in batch",
                json!({
                    "kind": kind.as_str(),
                    "identity": duplicate.identity,
                    "name": self.slots[duplicate.second].display_name(),
                    "slots": [duplicate.first, duplicate.second],
                }),
            );
            return SubmitReport::Duplicate(duplicate);
        }

        let outcome = match build_request(&self.slots, self.operation) {
            Ok(request) => {
                log.info(
                    "submit.sent",
                    "batch sent",
                    json!({
                        "kind": kind.as_str(),
                        "operation": self.operation.as_str(),
                        "forms": request.forms.len(),
                    }),
                );
                FeatureOutcome::from_result(api.submit(&request))
            }
            Err(err) => FeatureOutcome::Failure(err.to_string()),
        };

        self.toast(notifier, outcome_toasts(&outcome, kind, self.operation));
        for action in outcome_actions(&outcome) {
            self.context.dispatch(action);
        }

        if let FeatureOutcome::Failure(message) = &outcome {
            log.error(
                "submit.failure",
                message,
                json!({ "kind": kind.as_str(), "operation": self.operation.as_str() }),
            );
            return SubmitReport::Completed {
                outcome,
                redirect: None,
            };
        }

        log.info(
            "submit.outcome",
            outcome.as_str(),
            json!({ "kind": kind.as_str(), "operation": self.operation.as_str() }),
        );
        if let FeatureOutcome::Success(items) = &outcome {
            let applied = items.iter().filter(|item| item.success).count();
            self.remaining = self.remaining.saturating_sub(applied);
        }
        let redirect = outcome
            .is_success()
            .then(|| self.options.listing_route.clone());
        self.reset_batch();
        SubmitReport::Completed { outcome, redirect }
    }

    /// Back to a single template slot after any mapped response. Entered data
    /// in every slot is discarded, and an update batch also drops its row
    /// selection.
    fn reset_batch(&mut self) {
        let step = self.floor();
        self.slots = vec![E::template()];
        self.context.dispatch(StoreAction::SetCount(1));
        self.context.dispatch(StoreAction::SetCurrentStep(step));
        if self.operation == Operation::Update {
            self.context.dispatch(StoreAction::SetSelectedRows(Vec::new()));
        }
    }

    fn toast(&self, notifier: &mut dyn Notifier, toasts: Vec<(ToastLevel, String)>) {
        submit::send_toasts(notifier, toasts, &self.options.dismiss_label);
    }

    fn check_quota(&self) -> Result<(), WizardError> {
        if self.remaining == 0 {
            return Err(self.quota_exhausted());
        }
        Ok(())
    }

    fn quota_exhausted(&self) -> WizardError {
        WizardError::QuotaExhausted {
            feature: self.feature.clone(),
        }
    }

    fn floor(&self) -> usize {
        match self.operation {
            Operation::Create => AMOUNT_STEP,
            Operation::Update => FIRST_FORM_STEP,
        }
    }

    fn move_to(&mut self, step: usize) {
        if step == self.current_step() {
            return;
        }
        self.context.dispatch(StoreAction::SetCurrentStep(step));
        self.options.log.info(
            "wizard.step",
            "step changed",
            json!({ "kind": E::KIND.as_str(), "step": step }),
        );
    }

    fn log_opened(&self) {
        self.options.log.info(
            "wizard.opened",
            "wizard opened",
            json!({
                "kind": E::KIND.as_str(),
                "operation": self.operation.as_str(),
                "remaining": self.remaining,
                "count": self.count(),
            }),
        );
    }
}

fn check_feature<E: EntityForm>(tier: &TierLimit) -> Result<(), WizardError> {
    let expected = E::KIND.feature_name();
    if tier.feature_name.as_str() != expected {
        return Err(WizardError::FeatureMismatch {
            expected,
            actual: tier.feature_name.to_string(),
        });
    }
    Ok(())
}
