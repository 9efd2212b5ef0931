use super::gtm::{check_account_id, check_container_id};
use crate::form::{EntityForm, EntityKind, FieldValue, FormError, NoRows};
use crate::shared::ids::validate_display_name;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceForm {
    pub account_id: String,
    pub container_id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceField {
    AccountId,
    ContainerId,
    Name,
    Description,
}

impl std::fmt::Display for WorkspaceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            WorkspaceField::AccountId => "accountId",
            WorkspaceField::ContainerId => "containerId",
            WorkspaceField::Name => "name",
            WorkspaceField::Description => "description",
        })
    }
}

impl EntityForm for WorkspaceForm {
    type Field = WorkspaceField;
    type Group = NoRows;

    const KIND: EntityKind = EntityKind::Workspace;

    fn template() -> Self {
        Self {
            account_id: String::new(),
            container_id: String::new(),
            name: String::new(),
            description: String::new(),
        }
    }

    fn get(&self, field: WorkspaceField) -> Result<FieldValue, FormError> {
        let text = match field {
            WorkspaceField::AccountId => &self.account_id,
            WorkspaceField::ContainerId => &self.container_id,
            WorkspaceField::Name => &self.name,
            WorkspaceField::Description => &self.description,
        };
        Ok(FieldValue::Text(text.clone()))
    }

    fn set(&mut self, field: WorkspaceField, value: FieldValue) -> Result<(), FormError> {
        let text = value.into_text(&field.to_string())?;
        match field {
            WorkspaceField::AccountId => self.account_id = text,
            WorkspaceField::ContainerId => self.container_id = text,
            WorkspaceField::Name => self.name = text,
            WorkspaceField::Description => self.description = text,
        }
        Ok(())
    }

    fn dependents(field: WorkspaceField) -> Vec<WorkspaceField> {
        match field {
            WorkspaceField::AccountId => vec![WorkspaceField::ContainerId],
            _ => Vec::new(),
        }
    }

    fn required_fields(&self) -> Vec<WorkspaceField> {
        vec![
            WorkspaceField::AccountId,
            WorkspaceField::ContainerId,
            WorkspaceField::Name,
        ]
    }

    fn check(&self, field: WorkspaceField) -> Result<(), String> {
        match field {
            WorkspaceField::AccountId => check_account_id(&self.account_id),
            WorkspaceField::ContainerId => check_container_id(&self.container_id),
            WorkspaceField::Name => validate_display_name("workspace name", &self.name),
            WorkspaceField::Description => Ok(()),
        }
    }

    fn identity_key(&self) -> String {
        format!(
            "{}-{}-{}",
            self.account_id,
            self.container_id,
            self.name.trim()
        )
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn append_row(&mut self, group: NoRows) -> usize {
        match group {}
    }

    fn remove_row(&mut self, group: NoRows, _index: usize) -> Result<(), FormError> {
        match group {}
    }

    fn row_count(&self, group: NoRows) -> usize {
        match group {}
    }
}
