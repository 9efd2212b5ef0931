use tagwizard::entities::{
    AccountForm, ContainerForm, PropertyForm, TagField, TagForm, TriggerField, TriggerForm,
    TriggerRows, VariableForm, VariableRows, WorkspaceForm,
};
use tagwizard::form::{apply_field_change, validate_form, EntityForm, EntityKind, ALL_ENTITY_KINDS};

#[test]
fn entities_module_every_kind_has_descriptor_metadata() {
    let features: Vec<&str> = ALL_ENTITY_KINDS
        .iter()
        .map(|kind| kind.feature_name())
        .collect();
    assert_eq!(
        features,
        vec![
            "GA4Accounts",
            "GA4Properties",
            "GA4ConversionEvents",
            "GTMContainer",
            "GTMWorkspaces",
            "GTMTags",
            "GTMTriggers",
            "GTMVariables",
        ]
    );
    for kind in ALL_ENTITY_KINDS {
        assert_eq!(EntityKind::parse(kind.as_str()), Ok(kind));
        assert!(kind.default_listing_route().starts_with("/dashboard/"));
    }
    assert_eq!(EntityKind::KeyEvent.singular(), "key event");
}

#[test]
fn entities_module_identity_keys_follow_entity_scope() {
    let account = AccountForm {
        display_name: "  Main ".to_string(),
        ..AccountForm::template()
    };
    assert_eq!(account.identity_key(), "Main");

    let property = PropertyForm {
        parent: "accounts/4".to_string(),
        display_name: "Web".to_string(),
        ..PropertyForm::template()
    };
    assert_eq!(property.identity_key(), "accounts/4-Web");

    let container = ContainerForm {
        account_id: "4".to_string(),
        name: "Site".to_string(),
        ..ContainerForm::template()
    };
    assert_eq!(container.identity_key(), "4-Site");

    let workspace = WorkspaceForm {
        account_id: "4".to_string(),
        container_id: "8".to_string(),
        name: "Staging".to_string(),
        description: String::new(),
    };
    assert_eq!(workspace.identity_key(), "4-8-Staging");

    let variable = VariableForm {
        account_id: "4".to_string(),
        container_id: "8".to_string(),
        workspace_id: "2".to_string(),
        name: "Currency".to_string(),
        ..VariableForm::template()
    };
    assert_eq!(variable.identity_key(), "4-8-2-Currency");
}

#[test]
fn entities_module_templates_start_invalid_only_on_user_fields() {
    let fields: Vec<String> = validate_form(&ContainerForm::template(), 0)
        .into_iter()
        .map(|issue| issue.field)
        .collect();
    assert_eq!(fields, vec!["accountId", "name"]);

    let fields: Vec<String> = validate_form(&PropertyForm::template(), 0)
        .into_iter()
        .map(|issue| issue.field)
        .collect();
    assert_eq!(fields, vec!["parent", "displayName"]);
}

#[test]
fn entities_module_tag_consent_types_required_only_when_needed() {
    let mut tag = TagForm {
        account_id: "1".to_string(),
        container_id: "2".to_string(),
        workspace_id: "3".to_string(),
        name: "Consent".to_string(),
        firing_trigger_id: vec!["4".to_string()],
        ..TagForm::template()
    };
    assert!(validate_form(&tag, 0).is_empty());

    tag.set(TagField::ConsentStatus, "needed".into())
        .expect("status");
    let issues = validate_form(&tag, 0);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, "consentSettings.consentType");

    tag.set(
        TagField::ConsentTypes,
        vec!["ad_storage".to_string()].into(),
    )
    .expect("types");
    assert!(validate_form(&tag, 0).is_empty());

    apply_field_change(&mut tag, TagField::ConsentStatus, "notNeeded".into()).expect("status");
    assert!(tag.consent_settings.consent_type.is_empty());
}

#[test]
fn entities_module_trigger_custom_event_name_follows_type() {
    let mut trigger = TriggerForm {
        account_id: "1".to_string(),
        container_id: "2".to_string(),
        workspace_id: "3".to_string(),
        name: "Checkout".to_string(),
        ..TriggerForm::template()
    };
    apply_field_change(&mut trigger, TriggerField::TriggerType, "customEvent".into())
        .expect("type");
    let issues = validate_form(&trigger, 2);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].to_string(), format!("entity 3 `customEventName`: {}", issues[0].message));

    trigger
        .set(TriggerField::CustomEventName, "checkout".into())
        .expect("name");
    assert!(validate_form(&trigger, 0).is_empty());
    let payload = trigger.payload().expect("payload");
    assert_eq!(payload["customEventName"], "checkout");

    apply_field_change(&mut trigger, TriggerField::TriggerType, "pageview".into())
        .expect("type");
    assert_eq!(trigger.custom_event_name, "");
    assert!(trigger.payload().expect("payload").get("customEventName").is_none());
}

#[test]
fn entities_module_trigger_filter_rows_validate_each_cell() {
    let mut trigger = TriggerForm {
        account_id: "1".to_string(),
        container_id: "2".to_string(),
        workspace_id: "3".to_string(),
        name: "Blog".to_string(),
        ..TriggerForm::template()
    };
    assert_eq!(trigger.append_row(TriggerRows::Filter), 0);
    let fields: Vec<String> = validate_form(&trigger, 0)
        .into_iter()
        .map(|issue| issue.field)
        .collect();
    assert_eq!(fields, vec!["filter[0].value"]);

    trigger
        .set(TriggerField::FilterValue(0), "/blog".into())
        .expect("value");
    assert!(validate_form(&trigger, 0).is_empty());
    assert_eq!(trigger.payload().expect("payload")["filter"][0]["value"], "/blog");
}

#[test]
fn entities_module_variable_parameter_rows_require_values() {
    let mut variable = VariableForm {
        account_id: "1".to_string(),
        container_id: "2".to_string(),
        workspace_id: "3".to_string(),
        name: "Currency".to_string(),
        ..VariableForm::template()
    };
    let fields: Vec<String> = validate_form(&variable, 0)
        .into_iter()
        .map(|issue| issue.field)
        .collect();
    assert_eq!(fields, vec!["parameter[0].value"]);

    variable.parameter[0].value = "EUR".to_string();
    variable.append_row(VariableRows::Parameter);
    assert_eq!(variable.row_count(VariableRows::Parameter), 2);
    variable
        .remove_row(VariableRows::Parameter, 1)
        .expect("remove blank row");
    assert!(validate_form(&variable, 0).is_empty());
    assert_eq!(
        variable.payload().expect("payload")["parameter"][0],
        serde_json::json!({ "type": "template", "key": "value", "value": "EUR" })
    );
}
