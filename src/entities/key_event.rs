use super::{check_currency_code, check_one_of};
use crate::form::{EntityForm, EntityKind, FieldValue, FormError, NoRows};
use crate::shared::ids::{validate_event_name, validate_resource_name};
use serde::{Deserialize, Serialize};

const COUNTING_METHODS: [&str; 2] = ["ONCE_PER_EVENT", "ONCE_PER_SESSION"];

/// GA4 key event (formerly conversion event).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEventForm {
    pub account: String,
    pub account_property: String,
    pub event_name: String,
    pub counting_method: String,
    pub include_default_value: bool,
    pub default_value: DefaultValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultValue {
    pub numeric_value: f64,
    pub currency_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventField {
    Account,
    AccountProperty,
    EventName,
    CountingMethod,
    IncludeDefaultValue,
    DefaultNumericValue,
    DefaultCurrencyCode,
}

impl std::fmt::Display for KeyEventField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            KeyEventField::Account => "account",
            KeyEventField::AccountProperty => "accountProperty",
            KeyEventField::EventName => "eventName",
            KeyEventField::CountingMethod => "countingMethod",
            KeyEventField::IncludeDefaultValue => "includeDefaultValue",
            KeyEventField::DefaultNumericValue => "defaultValue.numericValue",
            KeyEventField::DefaultCurrencyCode => "defaultValue.currencyCode",
        })
    }
}

impl EntityForm for KeyEventForm {
    type Field = KeyEventField;
    type Group = NoRows;

    const KIND: EntityKind = EntityKind::KeyEvent;

    fn template() -> Self {
        Self {
            account: String::new(),
            account_property: String::new(),
            event_name: String::new(),
            counting_method: "ONCE_PER_EVENT".to_string(),
            include_default_value: false,
            default_value: DefaultValue {
                numeric_value: 0.0,
                currency_code: String::new(),
            },
        }
    }

    fn get(&self, field: KeyEventField) -> Result<FieldValue, FormError> {
        Ok(match field {
            KeyEventField::Account => FieldValue::Text(self.account.clone()),
            KeyEventField::AccountProperty => FieldValue::Text(self.account_property.clone()),
            KeyEventField::EventName => FieldValue::Text(self.event_name.clone()),
            KeyEventField::CountingMethod => FieldValue::Text(self.counting_method.clone()),
            KeyEventField::IncludeDefaultValue => FieldValue::Flag(self.include_default_value),
            KeyEventField::DefaultNumericValue => {
                FieldValue::Number(self.default_value.numeric_value)
            }
            KeyEventField::DefaultCurrencyCode => {
                FieldValue::Text(self.default_value.currency_code.clone())
            }
        })
    }

    fn set(&mut self, field: KeyEventField, value: FieldValue) -> Result<(), FormError> {
        let label = field.to_string();
        match field {
            KeyEventField::Account => self.account = value.into_text(&label)?,
            KeyEventField::AccountProperty => self.account_property = value.into_text(&label)?,
            KeyEventField::EventName => self.event_name = value.into_text(&label)?,
            KeyEventField::CountingMethod => self.counting_method = value.into_text(&label)?,
            KeyEventField::IncludeDefaultValue => {
                self.include_default_value = value.into_flag(&label)?
            }
            KeyEventField::DefaultNumericValue => {
                self.default_value.numeric_value = value.into_number(&label)?
            }
            KeyEventField::DefaultCurrencyCode => {
                self.default_value.currency_code = value.into_text(&label)?
            }
        }
        Ok(())
    }

    fn dependents(field: KeyEventField) -> Vec<KeyEventField> {
        match field {
            KeyEventField::Account => vec![KeyEventField::AccountProperty],
            KeyEventField::IncludeDefaultValue => vec![
                KeyEventField::DefaultNumericValue,
                KeyEventField::DefaultCurrencyCode,
            ],
            _ => Vec::new(),
        }
    }

    fn required_fields(&self) -> Vec<KeyEventField> {
        let mut fields = vec![
            KeyEventField::Account,
            KeyEventField::AccountProperty,
            KeyEventField::EventName,
            KeyEventField::CountingMethod,
        ];
        if self.include_default_value {
            fields.push(KeyEventField::DefaultNumericValue);
            fields.push(KeyEventField::DefaultCurrencyCode);
        }
        fields
    }

    fn check(&self, field: KeyEventField) -> Result<(), String> {
        match field {
            KeyEventField::Account => validate_resource_name("account", "accounts", &self.account),
            KeyEventField::AccountProperty => {
                validate_resource_name("property", "properties", &self.account_property)
            }
            KeyEventField::EventName => validate_event_name(&self.event_name),
            KeyEventField::CountingMethod => {
                check_one_of("counting method", &self.counting_method, &COUNTING_METHODS)
            }
            KeyEventField::IncludeDefaultValue => Ok(()),
            KeyEventField::DefaultNumericValue => {
                let value = self.default_value.numeric_value;
                if value.is_finite() && value >= 0.0 {
                    Ok(())
                } else {
                    Err("default value must be a non-negative number".to_string())
                }
            }
            KeyEventField::DefaultCurrencyCode => {
                check_currency_code(&self.default_value.currency_code)
            }
        }
    }

    fn identity_key(&self) -> String {
        format!("{}-{}", self.account_property, self.event_name)
    }

    fn display_name(&self) -> String {
        self.event_name.clone()
    }

    fn payload(&self) -> Result<serde_json::Value, serde_json::Error> {
        let mut value = serde_json::to_value(self)?;
        if !self.include_default_value {
            if let Some(object) = value.as_object_mut() {
                object.remove("defaultValue");
            }
        }
        Ok(value)
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
