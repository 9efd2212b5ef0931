use super::check_one_of;
use super::gtm::{
    check_account_id, check_container_id, check_parameter_key, check_workspace_id,
    workspace_scoped_key, GtmParameter,
};
use crate::form::rows::{append_row, remove_row, row, row_mut};
use crate::form::{EntityForm, EntityKind, FieldValue, FormError};
use crate::shared::ids::validate_display_name;
use serde::{Deserialize, Serialize};

/// Constant, data layer, custom JavaScript, first-party cookie, URL.
const VARIABLE_TYPES: [&str; 5] = ["c", "v", "jsm", "k", "u"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableForm {
    pub account_id: String,
    pub container_id: String,
    pub workspace_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub variable_type: String,
    pub parameter: Vec<GtmParameter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableField {
    AccountId,
    ContainerId,
    WorkspaceId,
    Name,
    VariableType,
    ParameterKey(usize),
    ParameterValue(usize),
}

impl std::fmt::Display for VariableField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariableField::AccountId => f.write_str("accountId"),
            VariableField::ContainerId => f.write_str("containerId"),
            VariableField::WorkspaceId => f.write_str("workspaceId"),
            VariableField::Name => f.write_str("name"),
            VariableField::VariableType => f.write_str("type"),
            VariableField::ParameterKey(index) => write!(f, "parameter[{index}].key"),
            VariableField::ParameterValue(index) => write!(f, "parameter[{index}].value"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableRows {
    Parameter,
}

impl std::fmt::Display for VariableRows {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("parameter")
    }
}

impl EntityForm for VariableForm {
    type Field = VariableField;
    type Group = VariableRows;

    const KIND: EntityKind = EntityKind::Variable;

    fn template() -> Self {
        Self {
            account_id: String::new(),
            container_id: String::new(),
            workspace_id: String::new(),
            name: String::new(),
            variable_type: "c".to_string(),
            parameter: vec![GtmParameter::template("value")],
        }
    }

    fn get(&self, field: VariableField) -> Result<FieldValue, FormError> {
        let text = match field {
            VariableField::AccountId => self.account_id.clone(),
            VariableField::ContainerId => self.container_id.clone(),
            VariableField::WorkspaceId => self.workspace_id.clone(),
            VariableField::Name => self.name.clone(),
            VariableField::VariableType => self.variable_type.clone(),
            VariableField::ParameterKey(index) => {
                row(&self.parameter, "parameter", index)?.key.clone()
            }
            VariableField::ParameterValue(index) => {
                row(&self.parameter, "parameter", index)?.value.clone()
            }
        };
        Ok(FieldValue::Text(text))
    }

    fn set(&mut self, field: VariableField, value: FieldValue) -> Result<(), FormError> {
        let text = value.into_text(&field.to_string())?;
        match field {
            VariableField::AccountId => self.account_id = text,
            VariableField::ContainerId => self.container_id = text,
            VariableField::WorkspaceId => self.workspace_id = text,
            VariableField::Name => self.name = text,
            VariableField::VariableType => self.variable_type = text,
            VariableField::ParameterKey(index) => {
                row_mut(&mut self.parameter, "parameter", index)?.key = text
            }
            VariableField::ParameterValue(index) => {
                row_mut(&mut self.parameter, "parameter", index)?.value = text
            }
        }
        Ok(())
    }

    fn dependents(field: VariableField) -> Vec<VariableField> {
        match field {
            VariableField::AccountId => vec![VariableField::ContainerId],
            VariableField::ContainerId => vec![VariableField::WorkspaceId],
            _ => Vec::new(),
        }
    }

    fn required_fields(&self) -> Vec<VariableField> {
        let mut fields = vec![
            VariableField::AccountId,
            VariableField::ContainerId,
            VariableField::WorkspaceId,
            VariableField::Name,
            VariableField::VariableType,
        ];
        for index in 0..self.parameter.len() {
            fields.push(VariableField::ParameterKey(index));
            fields.push(VariableField::ParameterValue(index));
        }
        fields
    }

    fn check(&self, field: VariableField) -> Result<(), String> {
        match field {
            VariableField::AccountId => check_account_id(&self.account_id),
            VariableField::ContainerId => check_container_id(&self.container_id),
            VariableField::WorkspaceId => check_workspace_id(&self.workspace_id),
            VariableField::Name => validate_display_name("variable name", &self.name),
            VariableField::VariableType => {
                check_one_of("variable type", &self.variable_type, &VARIABLE_TYPES)
            }
            VariableField::ParameterKey(index) => match self.parameter.get(index) {
                Some(parameter) => check_parameter_key(&parameter.key),
                None => Err(format!("parameter {index} does not exist")),
            },
            VariableField::ParameterValue(index) => match self.parameter.get(index) {
                Some(parameter) if parameter.value.trim().is_empty() => {
                    Err("parameter value is required".to_string())
                }
                Some(_) => Ok(()),
                None => Err(format!("parameter {index} does not exist")),
            },
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

    fn append_row(&mut self, group: VariableRows) -> usize {
        match group {
            VariableRows::Parameter => append_row(&mut self.parameter, GtmParameter::blank()),
        }
    }

    fn remove_row(&mut self, group: VariableRows, index: usize) -> Result<(), FormError> {
        match group {
            VariableRows::Parameter => {
                remove_row(&mut self.parameter, "parameter", index).map(|_| ())
            }
        }
    }

    fn row_count(&self, group: VariableRows) -> usize {
        match group {
            VariableRows::Parameter => self.parameter.len(),
        }
    }
}
