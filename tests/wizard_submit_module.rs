use tagwizard::api::{
    ApiError, FeatureApi, FeatureOutcome, FeatureRequest, FeatureResponse, Operation, ResultItem,
};
use tagwizard::entities::{
    ContainerField, ContainerForm, KeyEventField, KeyEventForm, TagField, TagForm, WorkspaceForm,
};
use tagwizard::form::{EntityForm, EntityKind};
use tagwizard::notify::ToastLog;
use tagwizard::shared::ids::FeatureName;
use tagwizard::store::{Modal, StoreAction};
use tagwizard::tier::TierLimit;
use tagwizard::wizard::{
    StepOutcome, SubmitReport, Wizard, WizardError, WizardOptions, UNEXPECTED_ERROR_MESSAGE,
};

enum Reply {
    Respond(FeatureResponse),
    Fail(String),
}

struct RecordingApi {
    reply: Reply,
    requests: Vec<FeatureRequest>,
}

impl RecordingApi {
    fn responding(response: FeatureResponse) -> Self {
        Self {
            reply: Reply::Respond(response),
            requests: Vec::new(),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            reply: Reply::Fail(message.to_string()),
            requests: Vec::new(),
        }
    }

    fn calls(&self) -> usize {
        self.requests.len()
    }
}

impl FeatureApi for RecordingApi {
    fn submit(&mut self, request: &FeatureRequest) -> Result<FeatureResponse, ApiError> {
        self.requests.push(request.clone());
        match &self.reply {
            Reply::Respond(response) => Ok(response.clone()),
            Reply::Fail(message) => Err(ApiError::Request(message.clone())),
        }
    }
}

fn open<E: EntityForm>(remaining: i64) -> Wizard<E> {
    let feature = FeatureName::parse(E::KIND.feature_name()).expect("feature name");
    Wizard::open_create(
        &TierLimit::new(feature, remaining, 0),
        WizardOptions::default_for(E::KIND),
    )
    .expect("open wizard")
}

fn advance_to_submit<E: EntityForm>(wizard: &mut Wizard<E>) {
    while !wizard.session().is_terminal() {
        match wizard.next().expect("next") {
            StepOutcome::Advanced(_) => {}
            StepOutcome::Blocked(issues) => panic!("slot invalid: {issues:?}"),
        }
    }
}

fn fill_key_event(wizard: &mut Wizard<KeyEventForm>, slot: usize, property: &str, event: &str) {
    wizard
        .set_field(slot, KeyEventField::Account, "accounts/1")
        .expect("account");
    wizard
        .set_field(slot, KeyEventField::AccountProperty, property)
        .expect("property");
    wizard
        .set_field(slot, KeyEventField::EventName, event)
        .expect("event name");
}

fn fill_container(wizard: &mut Wizard<ContainerForm>, slot: usize, name: &str) {
    wizard
        .set_field(slot, ContainerField::AccountId, "100")
        .expect("account");
    wizard
        .set_field(slot, ContainerField::Name, name)
        .expect("name");
}

#[test]
fn wizard_submit_module_duplicate_key_events_abort_without_api_call() {
    let mut wizard = open::<KeyEventForm>(3);
    assert_eq!(wizard.amount_options(), vec![1, 2, 3]);
    wizard.select_amount(2).expect("amount");
    assert_eq!(wizard.count(), 2);
    assert_eq!(
        wizard.slots(),
        &[KeyEventForm::template(), KeyEventForm::template()]
    );

    fill_key_event(&mut wizard, 0, "properties/1", "purchase");
    fill_key_event(&mut wizard, 1, "properties/1", "purchase");
    advance_to_submit(&mut wizard);
    assert_eq!(wizard.current_step(), 3);

    let mut api = RecordingApi::responding(FeatureResponse::default());
    let mut toasts = ToastLog::default();
    let report = wizard.submit(&mut api, &mut toasts).expect("submit");

    let SubmitReport::Duplicate(duplicate) = report else {
        panic!("expected duplicate report, got {report:?}");
    };
    assert_eq!(duplicate.identity, "properties/1-purchase");
    assert_eq!((duplicate.first, duplicate.second), (0, 1));
    assert_eq!(toasts.errors(), vec!["Duplicate key event found"]);
    assert!(toasts.successes().is_empty());
    assert_eq!(api.calls(), 0);
    assert!(!wizard.is_loading());
    assert_eq!(wizard.slots().len(), 2);
    assert_eq!(wizard.current_step(), 3);
}

#[test]
fn wizard_submit_module_strips_default_value_unless_toggled() {
    let mut wizard = open::<KeyEventForm>(2);
    wizard.select_amount(2).expect("amount");
    fill_key_event(&mut wizard, 0, "properties/1", "purchase");
    fill_key_event(&mut wizard, 1, "properties/1", "refund");
    wizard
        .set_field(1, KeyEventField::IncludeDefaultValue, true)
        .expect("toggle");
    wizard
        .set_field(1, KeyEventField::DefaultNumericValue, 4.5)
        .expect("value");
    wizard
        .set_field(1, KeyEventField::DefaultCurrencyCode, "EUR")
        .expect("currency");
    advance_to_submit(&mut wizard);

    let mut api = RecordingApi::responding(FeatureResponse {
        success: true,
        results: vec![
            ResultItem::succeeded("purchase"),
            ResultItem::succeeded("refund"),
        ],
        ..FeatureResponse::default()
    });
    let mut toasts = ToastLog::default();
    wizard.submit(&mut api, &mut toasts).expect("submit");

    assert_eq!(api.calls(), 1);
    let request = &api.requests[0];
    assert_eq!(request.kind, EntityKind::KeyEvent);
    assert_eq!(request.operation, Operation::Create);
    assert!(request.forms[0].get("defaultValue").is_none());
    assert_eq!(
        request.forms[1]["defaultValue"],
        serde_json::json!({ "numericValue": 4.5, "currencyCode": "EUR" })
    );
    assert_eq!(
        toasts.successes(),
        vec!["purchase created successfully.", "refund created successfully."]
    );
}

#[test]
fn wizard_submit_module_tag_success_redirects_and_resets() {
    let mut wizard = open::<TagForm>(5);
    wizard.select_amount(1).expect("amount");
    wizard.set_field(0, TagField::AccountId, "1").expect("account");
    wizard
        .set_field(0, TagField::ContainerId, "2")
        .expect("container");
    wizard
        .set_field(0, TagField::WorkspaceId, "3")
        .expect("workspace");
    wizard.set_field(0, TagField::Name, "Tag A").expect("name");
    wizard
        .set_field(0, TagField::ParameterValue(0), "<script></script>")
        .expect("parameter");
    wizard
        .set_field(0, TagField::FiringTrigger(0), "7")
        .expect("trigger");
    advance_to_submit(&mut wizard);
    assert_eq!(wizard.current_step(), 2);

    let mut api = RecordingApi::responding(FeatureResponse {
        success: true,
        results: vec![ResultItem::succeeded("Tag A")],
        ..FeatureResponse::default()
    });
    let mut toasts = ToastLog::default();
    let report = wizard.submit(&mut api, &mut toasts).expect("submit");

    assert_eq!(report.redirect(), Some("/dashboard/gtm/configurations"));
    assert!(matches!(report.outcome(), Some(FeatureOutcome::Success(_))));
    assert_eq!(toasts.successes(), vec!["Tag A created successfully."]);
    assert!(toasts.toasts().iter().all(|toast| toast.dismiss_label == "Close"));
    assert_eq!(api.requests[0].forms[0]["firingTriggerId"], serde_json::json!(["7"]));

    assert_eq!(wizard.slots(), &[TagForm::template()]);
    assert_eq!(wizard.count(), 1);
    assert_eq!(wizard.current_step(), 1);
    assert!(!wizard.is_loading());
    let dispatched = wizard.context().dispatched();
    let loading: Vec<&StoreAction> = dispatched
        .iter()
        .filter(|action| matches!(action, StoreAction::SetLoading(_)))
        .collect();
    assert_eq!(
        loading,
        vec![&StoreAction::SetLoading(true), &StoreAction::SetLoading(false)]
    );
}

#[test]
fn wizard_submit_module_container_not_found_shows_modal_without_success_toasts() {
    let mut wizard = open::<ContainerForm>(4);
    wizard.select_amount(2).expect("amount");
    fill_container(&mut wizard, 0, "C1");
    fill_container(&mut wizard, 1, "C2");
    advance_to_submit(&mut wizard);

    let results = vec![ResultItem::not_found("C1"), ResultItem::succeeded("C2")];
    let mut api = RecordingApi::responding(FeatureResponse {
        success: false,
        results: results.clone(),
        not_found_error: true,
        ..FeatureResponse::default()
    });
    let mut toasts = ToastLog::default();
    let report = wizard.submit(&mut api, &mut toasts).expect("submit");

    assert_eq!(report.redirect(), None);
    assert_eq!(
        toasts.errors(),
        vec!["Unable to create C1. Please check your access permissions."]
    );
    assert!(toasts.successes().is_empty());
    assert!(wizard
        .context()
        .dispatched()
        .contains(&StoreAction::SetNotFoundError(true)));
    assert_eq!(wizard.context().error_details, results);
    assert_eq!(wizard.context().visible_modal(), Some(Modal::NotFound));
    assert_eq!(wizard.slots().len(), 1);
    assert_eq!(wizard.current_step(), 1);

    wizard.dismiss_modal();
    assert_eq!(wizard.context().visible_modal(), None);
    assert!(wizard.context().error_details.is_empty());
}

#[test]
fn wizard_submit_module_limit_reached_names_remaining_quota() {
    let mut wizard = open::<ContainerForm>(3);
    wizard.select_amount(2).expect("amount");
    fill_container(&mut wizard, 0, "C1");
    fill_container(&mut wizard, 1, "C2");
    advance_to_submit(&mut wizard);

    let mut api = RecordingApi::responding(FeatureResponse {
        limit_reached: true,
        results: vec![
            ResultItem::limit_reached("C1", Some(0)),
            ResultItem::limit_reached("C2", None),
        ],
        ..FeatureResponse::default()
    });
    let mut toasts = ToastLog::default();
    let report = wizard.submit(&mut api, &mut toasts).expect("submit");

    assert!(matches!(
        report.outcome(),
        Some(FeatureOutcome::LimitReached(_))
    ));
    assert_eq!(
        toasts.errors(),
        vec![
            "Unable to create C1. You have 0 more containers available.",
            "Unable to create C2. You have reached your containers limit.",
        ]
    );
    assert_eq!(wizard.context().visible_modal(), Some(Modal::LimitReached));
    assert_eq!(wizard.count(), 1);
}

#[test]
fn wizard_submit_module_error_messages_toast_one_each() {
    let mut wizard = open::<ContainerForm>(1);
    wizard.select_amount(1).expect("amount");
    fill_container(&mut wizard, 0, "C1");
    advance_to_submit(&mut wizard);

    let mut api = RecordingApi::responding(FeatureResponse {
        errors: vec!["quota backend offline".to_string(), "retry later".to_string()],
        ..FeatureResponse::default()
    });
    let mut toasts = ToastLog::default();
    wizard.submit(&mut api, &mut toasts).expect("submit");

    assert_eq!(toasts.errors(), vec!["quota backend offline", "retry later"]);
    assert_eq!(wizard.context().visible_modal(), None);
    assert_eq!(wizard.slots(), &[ContainerForm::template()]);
}

#[test]
fn wizard_submit_module_transport_failure_keeps_slots_and_clears_loading() {
    let mut wizard = open::<ContainerForm>(2);
    wizard.select_amount(2).expect("amount");
    fill_container(&mut wizard, 0, "C1");
    fill_container(&mut wizard, 1, "C2");
    advance_to_submit(&mut wizard);
    let filled = wizard.slots().to_vec();

    let mut api = RecordingApi::failing("connection reset");
    let mut toasts = ToastLog::default();
    let report = wizard.submit(&mut api, &mut toasts).expect("submit");

    assert!(matches!(report.outcome(), Some(FeatureOutcome::Failure(_))));
    assert_eq!(report.redirect(), None);
    assert_eq!(toasts.errors(), vec![UNEXPECTED_ERROR_MESSAGE]);
    assert!(!wizard.is_loading());
    assert!(wizard
        .session()
        .error
        .as_deref()
        .is_some_and(|error| error.contains("connection reset")));
    assert_eq!(wizard.slots(), filled.as_slice());
    assert_eq!(wizard.current_step(), 3);

    // A retry clears the previous error before sending again.
    api.reply = Reply::Respond(FeatureResponse {
        success: true,
        results: vec![ResultItem::succeeded("C1"), ResultItem::succeeded("C2")],
        ..FeatureResponse::default()
    });
    toasts.clear();
    let retry = wizard.submit(&mut api, &mut toasts).expect("retry");
    assert_eq!(retry.redirect(), Some("/dashboard/gtm/containers"));
    assert_eq!(wizard.session().error, None);
    assert_eq!(api.calls(), 2);
}

#[test]
fn wizard_submit_module_rejects_submit_before_terminal_step() {
    let mut wizard = open::<WorkspaceForm>(2);
    wizard.select_amount(2).expect("amount");
    let mut api = RecordingApi::responding(FeatureResponse::default());
    let mut toasts = ToastLog::default();

    let err = wizard
        .submit(&mut api, &mut toasts)
        .expect_err("step 1 cannot submit");
    assert!(matches!(
        err,
        WizardError::NotAtSubmitStep {
            step: 1,
            terminal: 3
        }
    ));
    assert_eq!(api.calls(), 0);
    assert!(!wizard.is_loading());
}

#[test]
fn wizard_submit_module_invalid_batch_is_not_sent() {
    let mut wizard = open::<ContainerForm>(2);
    wizard.select_amount(2).expect("amount");
    fill_container(&mut wizard, 0, "C1");
    fill_container(&mut wizard, 1, "C2");
    advance_to_submit(&mut wizard);
    // Bulk edits bypass per-step validation.
    wizard.slot_mut(1).expect("slot").account_id.clear();

    let mut api = RecordingApi::responding(FeatureResponse::default());
    let mut toasts = ToastLog::default();
    let report = wizard.submit(&mut api, &mut toasts).expect("submit");

    let SubmitReport::Invalid(issues) = report else {
        panic!("expected validation issues");
    };
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].slot, 1);
    assert_eq!(issues[0].field, "accountId");
    assert_eq!(api.calls(), 0);
    assert!(toasts.toasts().is_empty());
    assert!(!wizard.is_loading());
}
