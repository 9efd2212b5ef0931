use crate::api::{ApiError, FeatureOutcome, FeatureRequest, Operation, ResultItem};
use crate::form::{EntityForm, EntityKind, FieldIssue};
use crate::notify::{Notifier, Toast, ToastLevel};
use crate::store::StoreAction;
use std::collections::HashMap;

pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Two slots in one batch share an identity key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate {
    pub identity: String,
    pub first: usize,
    pub second: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitReport {
    Invalid(Vec<FieldIssue>),
    Duplicate(Duplicate),
    Completed {
        outcome: FeatureOutcome,
        redirect: Option<String>,
    },
}

impl SubmitReport {
    pub fn redirect(&self) -> Option<&str> {
        match self {
            SubmitReport::Completed { redirect, .. } => redirect.as_deref(),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<&FeatureOutcome> {
        match self {
            SubmitReport::Completed { outcome, .. } => Some(outcome),
            _ => None,
        }
    }
}

pub fn find_duplicate<E: EntityForm>(slots: &[E]) -> Option<Duplicate> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    for (index, slot) in slots.iter().enumerate() {
        let identity = slot.identity_key();
        if let Some(first) = seen.get(&identity) {
            return Some(Duplicate {
                identity,
                first: *first,
                second: index,
            });
        }
        seen.insert(identity, index);
    }
    None
}

pub fn duplicate_message(kind: EntityKind) -> String {
    format!("Duplicate {} found", kind.singular())
}

pub fn build_request<E: EntityForm>(
    slots: &[E],
    operation: Operation,
) -> Result<FeatureRequest, ApiError> {
    let forms = slots
        .iter()
        .map(|slot| {
            slot.payload().map_err(|source| ApiError::Encode {
                kind: E::KIND,
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(FeatureRequest {
        kind: E::KIND,
        operation,
        forms,
    })
}

/// Toast texts for a mapped outcome, in display order.
pub fn outcome_toasts(
    outcome: &FeatureOutcome,
    kind: EntityKind,
    operation: Operation,
) -> Vec<(ToastLevel, String)> {
    match outcome {
        FeatureOutcome::Success(items) => items
            .iter()
            .filter(|item| item.success)
            .map(|item| {
                (
                    ToastLevel::Success,
                    format!("{} {} successfully.", item.name, operation.past_tense()),
                )
            })
            .collect(),
        // Items that did succeed inside a not-found batch get no toast.
        FeatureOutcome::NotFound(items) => items
            .iter()
            .filter(|item| item.not_found)
            .map(|item| {
                (
                    ToastLevel::Error,
                    format!(
                        "Unable to {} {}. Please check your access permissions.",
                        operation.as_str(),
                        item.name
                    ),
                )
            })
            .collect(),
        FeatureOutcome::LimitReached(items) => items
            .iter()
            .filter(|item| item.limit_reached)
            .map(|item| (ToastLevel::Error, limit_message(item, kind, operation)))
            .collect(),
        FeatureOutcome::Errors(messages) => messages
            .iter()
            .map(|message| (ToastLevel::Error, message.clone()))
            .collect(),
        FeatureOutcome::Failure(_) => {
            vec![(ToastLevel::Error, UNEXPECTED_ERROR_MESSAGE.to_string())]
        }
    }
}

fn limit_message(item: &ResultItem, kind: EntityKind, operation: Operation) -> String {
    match item.remaining {
        Some(remaining) => format!(
            "Unable to {} {}. You have {} more {} available.",
            operation.as_str(),
            item.name,
            remaining.max(0),
            kind.plural()
        ),
        None => format!(
            "Unable to {} {}. You have reached your {} limit.",
            operation.as_str(),
            item.name,
            kind.plural()
        ),
    }
}

pub fn outcome_actions(outcome: &FeatureOutcome) -> Vec<StoreAction> {
    match outcome {
        FeatureOutcome::NotFound(items) => vec![
            StoreAction::SetErrorDetails(items.clone()),
            StoreAction::SetNotFoundError(true),
        ],
        FeatureOutcome::LimitReached(_) => vec![StoreAction::SetIsLimitReached(true)],
        FeatureOutcome::Failure(message) => vec![StoreAction::SetError(Some(message.clone()))],
        FeatureOutcome::Success(_) | FeatureOutcome::Errors(_) => Vec::new(),
    }
}

pub fn send_toasts(
    notifier: &mut dyn Notifier,
    toasts: Vec<(ToastLevel, String)>,
    dismiss_label: &str,
) {
    for (level, message) in toasts {
        notifier.notify(Toast {
            level,
            message,
            dismiss_label: dismiss_label.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::WorkspaceForm;

    fn workspace(account: &str, container: &str, name: &str) -> WorkspaceForm {
        WorkspaceForm {
            account_id: account.to_string(),
            container_id: container.to_string(),
            name: name.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn duplicate_reports_first_colliding_pair() {
        let slots = vec![
            workspace("1", "10", "Staging"),
            workspace("1", "11", "Staging"),
            workspace("1", "10", "Staging"),
        ];
        assert_eq!(
            find_duplicate(&slots),
            Some(Duplicate {
                identity: "1-10-Staging".to_string(),
                first: 0,
                second: 2,
            })
        );
        assert_eq!(find_duplicate(&slots[..2]), None);
    }

    #[test]
    fn limit_toast_names_remaining_quota() {
        let toasts = outcome_toasts(
            &FeatureOutcome::LimitReached(vec![
                ResultItem::limit_reached("Tag B", Some(0)),
                ResultItem::succeeded("Tag A"),
            ]),
            EntityKind::Tag,
            Operation::Create,
        );
        assert_eq!(
            toasts,
            vec![(
                ToastLevel::Error,
                "Unable to create Tag B. You have 0 more tags available.".to_string()
            )]
        );
    }

    #[test]
    fn errors_outcome_toasts_each_message() {
        let toasts = outcome_toasts(
            &FeatureOutcome::Errors(vec!["first".to_string(), "second".to_string()]),
            EntityKind::Variable,
            Operation::Update,
        );
        assert_eq!(toasts.len(), 2);
        assert!(outcome_actions(&FeatureOutcome::Errors(Vec::new())).is_empty());
    }
}
