use super::check_one_of;
use super::gtm::{
    check_account_id, check_container_id, check_parameter_key, check_workspace_id,
    workspace_scoped_key, GtmParameter,
};
use crate::form::rows::{append_row, remove_row, row, row_mut};
use crate::form::{EntityForm, EntityKind, FieldValue, FormError};
use crate::shared::ids::{validate_display_name, validate_identifier_value, validate_numeric_id};
use serde::{Deserialize, Serialize};

const CONSENT_STATUSES: [&str; 3] = ["notSet", "notNeeded", "needed"];
const CONSENT_TYPES: [&str; 4] = [
    "ad_storage",
    "analytics_storage",
    "ad_user_data",
    "ad_personalization",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagForm {
    pub account_id: String,
    pub container_id: String,
    pub workspace_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub tag_type: String,
    pub parameter: Vec<GtmParameter>,
    pub firing_trigger_id: Vec<String>,
    pub consent_settings: ConsentSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentSettings {
    pub consent_status: String,
    pub consent_type: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagField {
    AccountId,
    ContainerId,
    WorkspaceId,
    Name,
    TagType,
    ParameterKey(usize),
    ParameterValue(usize),
    FiringTriggers,
    FiringTrigger(usize),
    ConsentStatus,
    ConsentTypes,
}

impl std::fmt::Display for TagField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagField::AccountId => f.write_str("accountId"),
            TagField::ContainerId => f.write_str("containerId"),
            TagField::WorkspaceId => f.write_str("workspaceId"),
            TagField::Name => f.write_str("name"),
            TagField::TagType => f.write_str("type"),
            TagField::ParameterKey(index) => write!(f, "parameter[{index}].key"),
            TagField::ParameterValue(index) => write!(f, "parameter[{index}].value"),
            TagField::FiringTriggers => f.write_str("firingTriggerId"),
            TagField::FiringTrigger(index) => write!(f, "firingTriggerId[{index}]"),
            TagField::ConsentStatus => f.write_str("consentSettings.consentStatus"),
            TagField::ConsentTypes => f.write_str("consentSettings.consentType"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRows {
    Parameter,
    FiringTrigger,
}

impl std::fmt::Display for TagRows {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TagRows::Parameter => "parameter",
            TagRows::FiringTrigger => "firingTriggerId",
        })
    }
}

impl EntityForm for TagForm {
    type Field = TagField;
    type Group = TagRows;

    const KIND: EntityKind = EntityKind::Tag;

    fn template() -> Self {
        Self {
            account_id: String::new(),
            container_id: String::new(),
            workspace_id: String::new(),
            name: String::new(),
            tag_type: "html".to_string(),
            parameter: vec![GtmParameter::template("html")],
            firing_trigger_id: vec![String::new()],
            consent_settings: ConsentSettings {
                consent_status: "notSet".to_string(),
                consent_type: Vec::new(),
            },
        }
    }

    fn get(&self, field: TagField) -> Result<FieldValue, FormError> {
        Ok(match field {
            TagField::AccountId => FieldValue::Text(self.account_id.clone()),
            TagField::ContainerId => FieldValue::Text(self.container_id.clone()),
            TagField::WorkspaceId => FieldValue::Text(self.workspace_id.clone()),
            TagField::Name => FieldValue::Text(self.name.clone()),
            TagField::TagType => FieldValue::Text(self.tag_type.clone()),
            TagField::ParameterKey(index) => {
                FieldValue::Text(row(&self.parameter, "parameter", index)?.key.clone())
            }
            TagField::ParameterValue(index) => {
                FieldValue::Text(row(&self.parameter, "parameter", index)?.value.clone())
            }
            TagField::FiringTriggers => FieldValue::List(self.firing_trigger_id.clone()),
            TagField::FiringTrigger(index) => FieldValue::Text(
                row(&self.firing_trigger_id, "firingTriggerId", index)?.clone(),
            ),
            TagField::ConsentStatus => {
                FieldValue::Text(self.consent_settings.consent_status.clone())
            }
            TagField::ConsentTypes => FieldValue::List(self.consent_settings.consent_type.clone()),
        })
    }

    fn set(&mut self, field: TagField, value: FieldValue) -> Result<(), FormError> {
        let label = field.to_string();
        match field {
            TagField::AccountId => self.account_id = value.into_text(&label)?,
            TagField::ContainerId => self.container_id = value.into_text(&label)?,
            TagField::WorkspaceId => self.workspace_id = value.into_text(&label)?,
            TagField::Name => self.name = value.into_text(&label)?,
            TagField::TagType => self.tag_type = value.into_text(&label)?,
            TagField::ParameterKey(index) => {
                let text = value.into_text(&label)?;
                row_mut(&mut self.parameter, "parameter", index)?.key = text;
            }
            TagField::ParameterValue(index) => {
                let text = value.into_text(&label)?;
                row_mut(&mut self.parameter, "parameter", index)?.value = text;
            }
            TagField::FiringTriggers => self.firing_trigger_id = value.into_list(&label)?,
            TagField::FiringTrigger(index) => {
                let text = value.into_text(&label)?;
                *row_mut(&mut self.firing_trigger_id, "firingTriggerId", index)? = text;
            }
            TagField::ConsentStatus => {
                self.consent_settings.consent_status = value.into_text(&label)?
            }
            TagField::ConsentTypes => self.consent_settings.consent_type = value.into_list(&label)?,
        }
        Ok(())
    }

    fn dependents(field: TagField) -> Vec<TagField> {
        match field {
            TagField::AccountId => vec![TagField::ContainerId],
            TagField::ContainerId => vec![TagField::WorkspaceId],
            // Trigger ids are only meaningful inside one workspace.
            TagField::WorkspaceId => vec![TagField::FiringTriggers],
            TagField::ConsentStatus => vec![TagField::ConsentTypes],
            _ => Vec::new(),
        }
    }

    fn required_fields(&self) -> Vec<TagField> {
        let mut fields = vec![
            TagField::AccountId,
            TagField::ContainerId,
            TagField::WorkspaceId,
            TagField::Name,
            TagField::TagType,
            TagField::FiringTriggers,
            TagField::ConsentStatus,
        ];
        fields.extend((0..self.parameter.len()).map(TagField::ParameterKey));
        fields.extend((0..self.firing_trigger_id.len()).map(TagField::FiringTrigger));
        if self.consent_settings.consent_status == "needed" {
            fields.push(TagField::ConsentTypes);
        }
        fields
    }

    fn check(&self, field: TagField) -> Result<(), String> {
        match field {
            TagField::AccountId => check_account_id(&self.account_id),
            TagField::ContainerId => check_container_id(&self.container_id),
            TagField::WorkspaceId => check_workspace_id(&self.workspace_id),
            TagField::Name => validate_display_name("tag name", &self.name),
            TagField::TagType => validate_identifier_value("tag type", &self.tag_type),
            TagField::ParameterKey(index) => match self.parameter.get(index) {
                Some(parameter) => check_parameter_key(&parameter.key),
                None => Err(format!("parameter {index} does not exist")),
            },
            TagField::ParameterValue(_) => Ok(()),
            TagField::FiringTriggers => {
                if self.firing_trigger_id.is_empty() {
                    Err("at least one firing trigger is required".to_string())
                } else {
                    Ok(())
                }
            }
            TagField::FiringTrigger(index) => match self.firing_trigger_id.get(index) {
                Some(trigger_id) => validate_numeric_id("firing trigger", trigger_id),
                None => Err(format!("firing trigger {index} does not exist")),
            },
            TagField::ConsentStatus => check_one_of(
                "consent status",
                &self.consent_settings.consent_status,
                &CONSENT_STATUSES,
            ),
            TagField::ConsentTypes => {
                let types = &self.consent_settings.consent_type;
                if types.is_empty() {
                    return Err("choose at least one consent type".to_string());
                }
                types
                    .iter()
                    .try_for_each(|kind| check_one_of("consent type", kind, &CONSENT_TYPES))
            }
        }
    }

    fn identity_key(&self) -> String {
        workspace_scoped_key(
            &self.account_id,
            &self.container_id,
            &self.workspace_id,
            &self.name,
        )
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn append_row(&mut self, group: TagRows) -> usize {
        match group {
            TagRows::Parameter => append_row(&mut self.parameter, GtmParameter::blank()),
            TagRows::FiringTrigger => append_row(&mut self.firing_trigger_id, String::new()),
        }
    }

    fn remove_row(&mut self, group: TagRows, index: usize) -> Result<(), FormError> {
        match group {
            TagRows::Parameter => remove_row(&mut self.parameter, "parameter", index).map(|_| ()),
            TagRows::FiringTrigger => {
                remove_row(&mut self.firing_trigger_id, "firingTriggerId", index).map(|_| ())
            }
        }
    }

    fn row_count(&self, group: TagRows) -> usize {
        match group {
            TagRows::Parameter => self.parameter.len(),
            TagRows::FiringTrigger => self.firing_trigger_id.len(),
        }
    }
}
