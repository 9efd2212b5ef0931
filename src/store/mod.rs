//! Explicit wizard state. Every mutation goes through [`reduce`] via
//! [`WizardContext::dispatch`], which also records the action.

use crate::api::ResultItem;

/// Navigation and submission state for one open wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardSession {
    pub current_step: usize,
    pub count: usize,
    pub loading: bool,
    pub error: Option<String>,
}

impl WizardSession {
    pub fn new(current_step: usize, count: usize) -> Self {
        Self {
            current_step,
            count,
            loading: false,
            error: None,
        }
    }

    /// Last valid step; it shows Submit instead of Next.
    pub fn terminal_step(&self) -> usize {
        self.count + 1
    }

    pub fn is_terminal(&self) -> bool {
        self.current_step == self.terminal_step()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    SetLoading(bool),
    SetCurrentStep(usize),
    SetCount(usize),
    SetError(Option<String>),
    SetSelectedRows(Vec<String>),
    SetIsLimitReached(bool),
    SetNotFoundError(bool),
    SetErrorDetails(Vec<ResultItem>),
}

pub const DISPATCH_HISTORY_LIMIT: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    NotFound,
    LimitReached,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WizardContext {
    pub session: WizardSession,
    pub selected_rows: Vec<String>,
    pub is_limit_reached: bool,
    pub not_found_error: bool,
    pub error_details: Vec<ResultItem>,
    dispatched: Vec<StoreAction>,
}

impl WizardContext {
    pub fn new(session: WizardSession) -> Self {
        Self {
            session,
            selected_rows: Vec::new(),
            is_limit_reached: false,
            not_found_error: false,
            error_details: Vec::new(),
            dispatched: Vec::new(),
        }
    }

    pub fn dispatch(&mut self, action: StoreAction) {
        reduce(self, &action);
        if self.dispatched.len() == DISPATCH_HISTORY_LIMIT {
            self.dispatched.remove(0);
        }
        self.dispatched.push(action);
    }

    /// Most recent actions in dispatch order, at most
    /// [`DISPATCH_HISTORY_LIMIT`] of them.
    pub fn dispatched(&self) -> &[StoreAction] {
        &self.dispatched
    }

    pub fn visible_modal(&self) -> Option<Modal> {
        if self.not_found_error {
            Some(Modal::NotFound)
        } else if self.is_limit_reached {
            Some(Modal::LimitReached)
        } else {
            None
        }
    }

    pub fn dismiss_modal(&mut self) {
        match self.visible_modal() {
            Some(Modal::NotFound) => {
                self.dispatch(StoreAction::SetNotFoundError(false));
                self.dispatch(StoreAction::SetErrorDetails(Vec::new()));
            }
            Some(Modal::LimitReached) => self.dispatch(StoreAction::SetIsLimitReached(false)),
            None => {}
        }
    }
}

pub fn reduce(state: &mut WizardContext, action: &StoreAction) {
    match action {
        StoreAction::SetLoading(loading) => state.session.loading = *loading,
        StoreAction::SetCurrentStep(step) => state.session.current_step = *step,
        StoreAction::SetCount(count) => state.session.count = *count,
        StoreAction::SetError(error) => state.session.error = error.clone(),
        StoreAction::SetSelectedRows(rows) => state.selected_rows = rows.clone(),
        StoreAction::SetIsLimitReached(flag) => state.is_limit_reached = *flag,
        StoreAction::SetNotFoundError(flag) => state.not_found_error = *flag,
        StoreAction::SetErrorDetails(details) => state.error_details = details.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_applies_and_records_actions() {
        let mut context = WizardContext::new(WizardSession::new(1, 1));
        context.dispatch(StoreAction::SetCount(3));
        context.dispatch(StoreAction::SetCurrentStep(4));

        assert_eq!(context.session.count, 3);
        assert!(context.session.is_terminal());
        assert_eq!(
            context.dispatched(),
            &[StoreAction::SetCount(3), StoreAction::SetCurrentStep(4)]
        );
    }

    #[test]
    fn dispatch_history_keeps_only_latest_actions() {
        let mut context = WizardContext::new(WizardSession::new(1, 1));
        for step in 0..DISPATCH_HISTORY_LIMIT + 10 {
            context.dispatch(StoreAction::SetCurrentStep(step));
        }

        let history = context.dispatched();
        assert_eq!(history.len(), DISPATCH_HISTORY_LIMIT);
        assert_eq!(history[0], StoreAction::SetCurrentStep(10));
        assert_eq!(
            history.last(),
            Some(&StoreAction::SetCurrentStep(DISPATCH_HISTORY_LIMIT + 9))
        );
    }

    #[test]
    fn not_found_modal_takes_priority_and_dismisses_first() {
        let mut context = WizardContext::new(WizardSession::new(1, 1));
        context.dispatch(StoreAction::SetIsLimitReached(true));
        context.dispatch(StoreAction::SetErrorDetails(vec![ResultItem::not_found("C1")]));
        context.dispatch(StoreAction::SetNotFoundError(true));
        assert_eq!(context.visible_modal(), Some(Modal::NotFound));

        context.dismiss_modal();
        assert!(context.error_details.is_empty());
        assert_eq!(context.visible_modal(), Some(Modal::LimitReached));

        context.dismiss_modal();
        assert_eq!(context.visible_modal(), None);
    }
}
