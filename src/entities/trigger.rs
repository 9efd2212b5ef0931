use super::check_one_of;
use super::gtm::{check_account_id, check_container_id, check_workspace_id, workspace_scoped_key};
use crate::form::rows::{append_row, remove_row, row, row_mut};
use crate::form::{EntityForm, EntityKind, FieldValue, FormError};
use crate::shared::ids::validate_display_name;
use serde::{Deserialize, Serialize};

const TRIGGER_TYPES: [&str; 6] = [
    "pageview",
    "domReady",
    "windowLoaded",
    "click",
    "linkClick",
    "customEvent",
];
const CONDITION_OPERATORS: [&str; 6] = [
    "equals",
    "contains",
    "startsWith",
    "endsWith",
    "matchRegex",
    "doesNotContain",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerForm {
    pub account_id: String,
    pub container_id: String,
    pub workspace_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub trigger_type: String,
    pub custom_event_name: String,
    pub filter: Vec<TriggerCondition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerCondition {
    pub variable: String,
    pub operator: String,
    pub value: String,
}

impl TriggerCondition {
    fn blank() -> Self {
        Self {
            variable: "{{Page URL}}".to_string(),
            operator: "contains".to_string(),
            value: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerField {
    AccountId,
    ContainerId,
    WorkspaceId,
    Name,
    TriggerType,
    CustomEventName,
    FilterVariable(usize),
    FilterOperator(usize),
    FilterValue(usize),
}

impl std::fmt::Display for TriggerField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriggerField::AccountId => f.write_str("accountId"),
            TriggerField::ContainerId => f.write_str("containerId"),
            TriggerField::WorkspaceId => f.write_str("workspaceId"),
            TriggerField::Name => f.write_str("name"),
            TriggerField::TriggerType => f.write_str("type"),
            TriggerField::CustomEventName => f.write_str("customEventName"),
            TriggerField::FilterVariable(index) => write!(f, "filter[{index}].variable"),
            TriggerField::FilterOperator(index) => write!(f, "filter[{index}].operator"),
            TriggerField::FilterValue(index) => write!(f, "filter[{index}].value"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerRows {
    Filter,
}

impl std::fmt::Display for TriggerRows {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("filter")
    }
}

impl EntityForm for TriggerForm {
    type Field = TriggerField;
    type Group = TriggerRows;

    const KIND: EntityKind = EntityKind::Trigger;

    fn template() -> Self {
        Self {
            account_id: String::new(),
            container_id: String::new(),
            workspace_id: String::new(),
            name: String::new(),
            trigger_type: "pageview".to_string(),
            custom_event_name: String::new(),
            filter: Vec::new(),
        }
    }

    fn get(&self, field: TriggerField) -> Result<FieldValue, FormError> {
        let text = match field {
            TriggerField::AccountId => self.account_id.clone(),
            TriggerField::ContainerId => self.container_id.clone(),
            TriggerField::WorkspaceId => self.workspace_id.clone(),
            TriggerField::Name => self.name.clone(),
            TriggerField::TriggerType => self.trigger_type.clone(),
            TriggerField::CustomEventName => self.custom_event_name.clone(),
            TriggerField::FilterVariable(index) => {
                row(&self.filter, "filter", index)?.variable.clone()
            }
            TriggerField::FilterOperator(index) => {
                row(&self.filter, "filter", index)?.operator.clone()
            }
            TriggerField::FilterValue(index) => row(&self.filter, "filter", index)?.value.clone(),
        };
        Ok(FieldValue::Text(text))
    }

    fn set(&mut self, field: TriggerField, value: FieldValue) -> Result<(), FormError> {
        let text = value.into_text(&field.to_string())?;
        match field {
            TriggerField::AccountId => self.account_id = text,
            TriggerField::ContainerId => self.container_id = text,
            TriggerField::WorkspaceId => self.workspace_id = text,
            TriggerField::Name => self.name = text,
            TriggerField::TriggerType => self.trigger_type = text,
            TriggerField::CustomEventName => self.custom_event_name = text,
            TriggerField::FilterVariable(index) => {
                row_mut(&mut self.filter, "filter", index)?.variable = text
            }
            TriggerField::FilterOperator(index) => {
                row_mut(&mut self.filter, "filter", index)?.operator = text
            }
            TriggerField::FilterValue(index) => {
                row_mut(&mut self.filter, "filter", index)?.value = text
            }
        }
        Ok(())
    }

    fn dependents(field: TriggerField) -> Vec<TriggerField> {
        match field {
            TriggerField::AccountId => vec![TriggerField::ContainerId],
            TriggerField::ContainerId => vec![TriggerField::WorkspaceId],
            TriggerField::TriggerType => vec![TriggerField::CustomEventName],
            _ => Vec::new(),
        }
    }

    fn required_fields(&self) -> Vec<TriggerField> {
        let mut fields = vec![
            TriggerField::AccountId,
            TriggerField::ContainerId,
            TriggerField::WorkspaceId,
            TriggerField::Name,
            TriggerField::TriggerType,
        ];
        if self.trigger_type == "customEvent" {
            fields.push(TriggerField::CustomEventName);
        }
        for index in 0..self.filter.len() {
            fields.push(TriggerField::FilterVariable(index));
            fields.push(TriggerField::FilterOperator(index));
            fields.push(TriggerField::FilterValue(index));
        }
        fields
    }

    fn check(&self, field: TriggerField) -> Result<(), String> {
        let condition = |index: usize| {
            self.filter
                .get(index)
                .ok_or_else(|| format!("filter {index} does not exist"))
        };
        match field {
            TriggerField::AccountId => check_account_id(&self.account_id),
            TriggerField::ContainerId => check_container_id(&self.container_id),
            TriggerField::WorkspaceId => check_workspace_id(&self.workspace_id),
            TriggerField::Name => validate_display_name("trigger name", &self.name),
            TriggerField::TriggerType => {
                check_one_of("trigger type", &self.trigger_type, &TRIGGER_TYPES)
            }
            TriggerField::CustomEventName => {
                validate_display_name("custom event name", &self.custom_event_name)
            }
            TriggerField::FilterVariable(index) => {
                let variable = &condition(index)?.variable;
                if variable.starts_with("{{") && variable.ends_with("}}") && variable.len() > 4 {
                    Ok(())
                } else {
                    Err("filter variable must be a `{{Variable Name}}` reference".to_string())
                }
            }
            TriggerField::FilterOperator(index) => {
                check_one_of("filter operator", &condition(index)?.operator, &CONDITION_OPERATORS)
            }
            TriggerField::FilterValue(index) => {
                if condition(index)?.value.trim().is_empty() {
                    Err("filter value is required".to_string())
                } else {
                    Ok(())
                }
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

    fn payload(&self) -> Result<serde_json::Value, serde_json::Error> {
        let mut value = serde_json::to_value(self)?;
        if self.trigger_type != "customEvent" {
            if let Some(object) = value.as_object_mut() {
                object.remove("customEventName");
            }
        }
        Ok(value)
    }

    fn append_row(&mut self, group: TriggerRows) -> usize {
        match group {
            TriggerRows::Filter => append_row(&mut self.filter, TriggerCondition::blank()),
        }
    }

    fn remove_row(&mut self, group: TriggerRows, index: usize) -> Result<(), FormError> {
        match group {
            TriggerRows::Filter => remove_row(&mut self.filter, "filter", index).map(|_| ()),
        }
    }

    fn row_count(&self, group: TriggerRows) -> usize {
        match group {
            TriggerRows::Filter => self.filter.len(),
        }
    }
}
