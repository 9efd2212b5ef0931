use super::check_one_of;
use crate::form::{EntityForm, EntityKind, FieldValue, FormError, NoRows};
use crate::shared::ids::validate_display_name;
use serde::{Deserialize, Serialize};

const SUPPORTED_REGIONS: [&str; 8] = ["US", "CA", "GB", "DE", "FR", "AU", "JP", "BR"];

/// GA4 account provisioning request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountForm {
    pub display_name: String,
    pub region_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountField {
    DisplayName,
    RegionCode,
}

impl std::fmt::Display for AccountField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            AccountField::DisplayName => "displayName",
            AccountField::RegionCode => "regionCode",
        })
    }
}

impl EntityForm for AccountForm {
    type Field = AccountField;
    type Group = NoRows;

    const KIND: EntityKind = EntityKind::Account;

    fn template() -> Self {
        Self {
            display_name: String::new(),
            region_code: "US".to_string(),
        }
    }

    fn get(&self, field: AccountField) -> Result<FieldValue, FormError> {
        Ok(match field {
            AccountField::DisplayName => FieldValue::Text(self.display_name.clone()),
            AccountField::RegionCode => FieldValue::Text(self.region_code.clone()),
        })
    }

    fn set(&mut self, field: AccountField, value: FieldValue) -> Result<(), FormError> {
        let label = field.to_string();
        match field {
            AccountField::DisplayName => self.display_name = value.into_text(&label)?,
            AccountField::RegionCode => self.region_code = value.into_text(&label)?,
        }
        Ok(())
    }

    fn dependents(_field: AccountField) -> Vec<AccountField> {
        Vec::new()
    }

    fn required_fields(&self) -> Vec<AccountField> {
        vec![AccountField::DisplayName, AccountField::RegionCode]
    }

    fn check(&self, field: AccountField) -> Result<(), String> {
        match field {
            AccountField::DisplayName => validate_display_name("account name", &self.display_name),
            AccountField::RegionCode => {
                check_one_of("region code", &self.region_code, &SUPPORTED_REGIONS)
            }
        }
    }

    fn identity_key(&self) -> String {
        self.display_name.trim().to_string()
    }

    fn display_name(&self) -> String {
        self.display_name.clone()
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
