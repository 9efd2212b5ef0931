use super::check_one_of;
use super::gtm::check_account_id;
use crate::form::rows::{append_row, remove_row, row, row_mut};
use crate::form::{EntityForm, EntityKind, FieldValue, FormError};
use crate::shared::ids::validate_display_name;
use serde::{Deserialize, Serialize};

const USAGE_CONTEXTS: [&str; 5] = ["web", "android", "ios", "amp", "server"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerForm {
    pub account_id: String,
    pub name: String,
    pub usage_context: Vec<String>,
    pub domain_name: String,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerField {
    AccountId,
    Name,
    UsageContexts,
    UsageContext(usize),
    DomainName,
    Notes,
}

impl std::fmt::Display for ContainerField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerField::AccountId => f.write_str("accountId"),
            ContainerField::Name => f.write_str("name"),
            ContainerField::UsageContexts => f.write_str("usageContext"),
            ContainerField::UsageContext(index) => write!(f, "usageContext[{index}]"),
            ContainerField::DomainName => f.write_str("domainName"),
            ContainerField::Notes => f.write_str("notes"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerRows {
    UsageContext,
}

impl std::fmt::Display for ContainerRows {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("usageContext")
    }
}

impl EntityForm for ContainerForm {
    type Field = ContainerField;
    type Group = ContainerRows;

    const KIND: EntityKind = EntityKind::Container;

    fn template() -> Self {
        Self {
            account_id: String::new(),
            name: String::new(),
            usage_context: vec!["web".to_string()],
            domain_name: String::new(),
            notes: String::new(),
        }
    }

    fn get(&self, field: ContainerField) -> Result<FieldValue, FormError> {
        Ok(match field {
            ContainerField::AccountId => FieldValue::Text(self.account_id.clone()),
            ContainerField::Name => FieldValue::Text(self.name.clone()),
            ContainerField::UsageContexts => FieldValue::List(self.usage_context.clone()),
            ContainerField::UsageContext(index) => FieldValue::Text(
                row(&self.usage_context, "usageContext", index)?.clone(),
            ),
            ContainerField::DomainName => FieldValue::Text(self.domain_name.clone()),
            ContainerField::Notes => FieldValue::Text(self.notes.clone()),
        })
    }

    fn set(&mut self, field: ContainerField, value: FieldValue) -> Result<(), FormError> {
        let label = field.to_string();
        match field {
            ContainerField::AccountId => self.account_id = value.into_text(&label)?,
            ContainerField::Name => self.name = value.into_text(&label)?,
            ContainerField::UsageContexts => self.usage_context = value.into_list(&label)?,
            ContainerField::UsageContext(index) => {
                let text = value.into_text(&label)?;
                *row_mut(&mut self.usage_context, "usageContext", index)? = text;
            }
            ContainerField::DomainName => self.domain_name = value.into_text(&label)?,
            ContainerField::Notes => self.notes = value.into_text(&label)?,
        }
        Ok(())
    }

    fn dependents(_field: ContainerField) -> Vec<ContainerField> {
        Vec::new()
    }

    fn required_fields(&self) -> Vec<ContainerField> {
        let mut fields = vec![
            ContainerField::AccountId,
            ContainerField::Name,
            ContainerField::UsageContexts,
        ];
        fields.extend((0..self.usage_context.len()).map(ContainerField::UsageContext));
        fields
    }

    fn check(&self, field: ContainerField) -> Result<(), String> {
        match field {
            ContainerField::AccountId => check_account_id(&self.account_id),
            ContainerField::Name => validate_display_name("container name", &self.name),
            ContainerField::UsageContexts => {
                if self.usage_context.is_empty() {
                    Err("at least one usage context is required".to_string())
                } else {
                    Ok(())
                }
            }
            ContainerField::UsageContext(index) => match self.usage_context.get(index) {
                Some(context) => check_one_of("usage context", context, &USAGE_CONTEXTS),
                None => Err(format!("usage context {index} does not exist")),
            },
            ContainerField::DomainName | ContainerField::Notes => Ok(()),
        }
    }

    fn identity_key(&self) -> String {
        format!("{}-{}", self.account_id, self.name.trim())
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn append_row(&mut self, group: ContainerRows) -> usize {
        match group {
            ContainerRows::UsageContext => append_row(&mut self.usage_context, "web".to_string()),
        }
    }

    fn remove_row(&mut self, group: ContainerRows, index: usize) -> Result<(), FormError> {
        match group {
            ContainerRows::UsageContext => {
                remove_row(&mut self.usage_context, "usageContext", index).map(|_| ())
            }
        }
    }

    fn row_count(&self, group: ContainerRows) -> usize {
        match group {
            ContainerRows::UsageContext => self.usage_context.len(),
        }
    }
}
