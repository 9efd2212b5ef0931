use tagwizard::entities::{
    ContainerForm, ContainerRows, KeyEventField, KeyEventForm, TagField, TagForm, TagRows,
    WorkspaceField, WorkspaceForm,
};
use tagwizard::form::{
    apply_field_change, transitive_dependents, EntityForm, FieldValue, FormError,
};

fn filled_tag() -> TagForm {
    TagForm {
        account_id: "1".to_string(),
        container_id: "2".to_string(),
        workspace_id: "3".to_string(),
        name: "Pageview".to_string(),
        firing_trigger_id: vec!["7".to_string(), "8".to_string()],
        ..TagForm::template()
    }
}

#[test]
fn form_cascade_module_account_change_clears_three_levels() {
    let mut tag = filled_tag();
    let cleared = apply_field_change(&mut tag, TagField::AccountId, "9".into()).expect("set");

    assert_eq!(
        cleared,
        vec![
            TagField::ContainerId,
            TagField::WorkspaceId,
            TagField::FiringTriggers
        ]
    );
    assert_eq!(tag.account_id, "9");
    assert_eq!(tag.container_id, "");
    assert_eq!(tag.workspace_id, "");
    assert_eq!(tag.firing_trigger_id, TagForm::template().firing_trigger_id);
    assert_eq!(tag.name, "Pageview");
}

#[test]
fn form_cascade_module_container_change_leaves_account_alone() {
    let mut tag = filled_tag();
    apply_field_change(&mut tag, TagField::ContainerId, "5".into()).expect("set");

    assert_eq!(tag.account_id, "1");
    assert_eq!(tag.container_id, "5");
    assert_eq!(tag.workspace_id, "");
    assert_eq!(tag.firing_trigger_id, vec![String::new()]);
}

#[test]
fn form_cascade_module_same_value_is_a_no_op() {
    let mut tag = filled_tag();
    let cleared = apply_field_change(&mut tag, TagField::AccountId, "1".into()).expect("set");

    assert!(cleared.is_empty());
    assert_eq!(tag, filled_tag());
}

#[test]
fn form_cascade_module_resets_dependents_even_when_still_valid() {
    let mut workspace = WorkspaceForm {
        account_id: "1".to_string(),
        container_id: "2".to_string(),
        name: "Staging".to_string(),
        description: String::new(),
    };
    apply_field_change(&mut workspace, WorkspaceField::AccountId, "4".into()).expect("set");
    assert_eq!(workspace.container_id, "");
    assert_eq!(workspace.name, "Staging");
}

#[test]
fn form_cascade_module_toggle_clears_conditional_fields() {
    let mut event = KeyEventForm {
        account: "accounts/1".to_string(),
        account_property: "properties/1".to_string(),
        event_name: "purchase".to_string(),
        include_default_value: true,
        ..KeyEventForm::template()
    };
    event.default_value.numeric_value = 12.0;
    event.default_value.currency_code = "USD".to_string();

    apply_field_change(&mut event, KeyEventField::IncludeDefaultValue, false.into())
        .expect("toggle");
    assert_eq!(event.default_value, KeyEventForm::template().default_value);
    assert!(!event
        .required_fields()
        .contains(&KeyEventField::DefaultCurrencyCode));
}

#[test]
fn form_cascade_module_transitive_walk_excludes_root() {
    assert_eq!(
        transitive_dependents::<TagForm>(TagField::WorkspaceId),
        vec![TagField::FiringTriggers]
    );
    assert!(transitive_dependents::<TagForm>(TagField::Name).is_empty());
}

#[test]
fn form_cascade_module_rejects_mismatched_value_type() {
    let mut tag = filled_tag();
    let err = apply_field_change(&mut tag, TagField::Name, FieldValue::Flag(true))
        .expect_err("flag into text field");
    assert!(matches!(err, FormError::TypeMismatch { .. }));
    assert_eq!(tag, filled_tag());
}

#[test]
fn form_cascade_module_rows_append_at_end_and_remove_by_index() {
    let mut tag = filled_tag();
    assert_eq!(tag.append_row(TagRows::FiringTrigger), 2);
    tag.set(TagField::FiringTrigger(2), "9".into()).expect("set row");
    assert_eq!(tag.row_count(TagRows::FiringTrigger), 3);

    tag.remove_row(TagRows::FiringTrigger, 0).expect("remove first");
    assert_eq!(tag.firing_trigger_id, vec!["8".to_string(), "9".to_string()]);

    let err = tag
        .remove_row(TagRows::FiringTrigger, 5)
        .expect_err("out of range");
    assert!(matches!(
        err,
        FormError::RowOutOfRange {
            index: 5,
            len: 2,
            ..
        }
    ));
    assert_eq!(tag.firing_trigger_id.len(), 2);

    let mut container = ContainerForm::template();
    assert_eq!(container.append_row(ContainerRows::UsageContext), 1);
    assert_eq!(container.row_count(ContainerRows::UsageContext), 2);
}

#[test]
fn form_cascade_module_row_field_out_of_range_is_typed() {
    let tag = TagForm::template();
    assert!(matches!(
        tag.get(TagField::ParameterKey(4)),
        Err(FormError::RowOutOfRange { index: 4, .. })
    ));
}
