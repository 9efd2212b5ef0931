use super::{check_currency_code, check_one_of};
use crate::form::{EntityForm, EntityKind, FieldValue, FormError, NoRows};
use crate::shared::ids::{validate_display_name, validate_resource_name};
use serde::{Deserialize, Serialize};

const PROPERTY_TYPES: [&str; 3] = [
    "PROPERTY_TYPE_ORDINARY",
    "PROPERTY_TYPE_SUBPROPERTY",
    "PROPERTY_TYPE_ROLLUP",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyForm {
    /// Parent account, `accounts/<id>`.
    pub parent: String,
    pub display_name: String,
    pub time_zone: String,
    pub currency_code: String,
    pub industry_category: String,
    pub property_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyField {
    Parent,
    DisplayName,
    TimeZone,
    CurrencyCode,
    IndustryCategory,
    PropertyType,
}

impl std::fmt::Display for PropertyField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PropertyField::Parent => "parent",
            PropertyField::DisplayName => "displayName",
            PropertyField::TimeZone => "timeZone",
            PropertyField::CurrencyCode => "currencyCode",
            PropertyField::IndustryCategory => "industryCategory",
            PropertyField::PropertyType => "propertyType",
        })
    }
}

impl EntityForm for PropertyForm {
    type Field = PropertyField;
    type Group = NoRows;

    const KIND: EntityKind = EntityKind::Property;

    fn template() -> Self {
        Self {
            parent: String::new(),
            display_name: String::new(),
            time_zone: "America/New_York".to_string(),
            currency_code: "USD".to_string(),
            industry_category: String::new(),
            property_type: "PROPERTY_TYPE_ORDINARY".to_string(),
        }
    }

    fn get(&self, field: PropertyField) -> Result<FieldValue, FormError> {
        let text = match field {
            PropertyField::Parent => &self.parent,
            PropertyField::DisplayName => &self.display_name,
            PropertyField::TimeZone => &self.time_zone,
            PropertyField::CurrencyCode => &self.currency_code,
            PropertyField::IndustryCategory => &self.industry_category,
            PropertyField::PropertyType => &self.property_type,
        };
        Ok(FieldValue::Text(text.clone()))
    }

    fn set(&mut self, field: PropertyField, value: FieldValue) -> Result<(), FormError> {
        let text = value.into_text(&field.to_string())?;
        match field {
            PropertyField::Parent => self.parent = text,
            PropertyField::DisplayName => self.display_name = text,
            PropertyField::TimeZone => self.time_zone = text,
            PropertyField::CurrencyCode => self.currency_code = text,
            PropertyField::IndustryCategory => self.industry_category = text,
            PropertyField::PropertyType => self.property_type = text,
        }
        Ok(())
    }

    fn dependents(_field: PropertyField) -> Vec<PropertyField> {
        Vec::new()
    }

    fn required_fields(&self) -> Vec<PropertyField> {
        vec![
            PropertyField::Parent,
            PropertyField::DisplayName,
            PropertyField::TimeZone,
            PropertyField::CurrencyCode,
            PropertyField::PropertyType,
        ]
    }

    fn check(&self, field: PropertyField) -> Result<(), String> {
        match field {
            PropertyField::Parent => validate_resource_name("account", "accounts", &self.parent),
            PropertyField::DisplayName => {
                validate_display_name("property name", &self.display_name)
            }
            PropertyField::TimeZone => {
                if self.time_zone.contains('/') || self.time_zone == "UTC" {
                    Ok(())
                } else {
                    Err("time zone must be an IANA zone such as Europe/Berlin".to_string())
                }
            }
            PropertyField::CurrencyCode => check_currency_code(&self.currency_code),
            PropertyField::IndustryCategory => Ok(()),
            PropertyField::PropertyType => {
                check_one_of("property type", &self.property_type, &PROPERTY_TYPES)
            }
        }
    }

    fn identity_key(&self) -> String {
        format!("{}-{}", self.parent, self.display_name.trim())
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
