use crate::store::WizardSession;

pub const AMOUNT_STEP: usize = 1;
pub const FIRST_FORM_STEP: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Next,
    Previous,
}

impl NavAction {
    fn as_str(self) -> &'static str {
        match self {
            NavAction::Next => "next",
            NavAction::Previous => "previous",
        }
    }
}

/// What the current step renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardScreen {
    AmountSelector,
    EntityForm { slot: usize, submit: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardNavError {
    InvalidTransition { step: usize, action: NavAction },
}

impl std::fmt::Display for WizardNavError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WizardNavError::InvalidTransition { step, action } => {
                write!(
                    f,
                    "invalid wizard transition: step={} action={}",
                    step,
                    action.as_str()
                )
            }
        }
    }
}

impl std::error::Error for WizardNavError {}

/// Pure step reducer. `floor` is the lowest step `Previous` may reach.
pub fn step_transition(
    session: &WizardSession,
    floor: usize,
    action: NavAction,
) -> Result<usize, WizardNavError> {
    let step = session.current_step;
    match action {
        NavAction::Next => {
            if step >= session.terminal_step() {
                return Err(WizardNavError::InvalidTransition { step, action });
            }
            Ok(step + 1)
        }
        NavAction::Previous => Ok(step.saturating_sub(1).max(floor)),
    }
}

/// Slot edited on `step`, if the step is a form step.
pub fn slot_for_step(step: usize) -> Option<usize> {
    step.checked_sub(FIRST_FORM_STEP)
}

pub fn screen_for(session: &WizardSession) -> WizardScreen {
    match slot_for_step(session.current_step) {
        None => WizardScreen::AmountSelector,
        Some(slot) => WizardScreen::EntityForm {
            slot,
            submit: session.is_terminal(),
        },
    }
}
