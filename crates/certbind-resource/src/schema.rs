//! Schema descriptors handed to the host.
//!
//! The host uses these to validate user configuration before any lifecycle
//! call, to decide which changes force a replacement, and to know which
//! fields it must not accept from users.

use indexmap::IndexMap;
use serde_json::Value;

/// Validation hook for a single string value.
pub type ValidateFn = fn(&str) -> Result<(), String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
}

/// Declaration of one configuration or state field.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub field_type: FieldType,
    pub required: bool,
    /// A change to this field replaces the resource.
    pub force_new: bool,
    /// Populated by the resource, never by the user.
    pub computed: bool,
    pub validate: Option<ValidateFn>,
}

impl FieldSchema {
    pub fn required_string() -> Self {
        Self {
            field_type: FieldType::String,
            required: true,
            force_new: false,
            computed: false,
            validate: None,
        }
    }

    pub fn computed_string() -> Self {
        Self {
            field_type: FieldType::String,
            required: false,
            force_new: false,
            computed: true,
            validate: None,
        }
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn with_validation(mut self, validate: ValidateFn) -> Self {
        self.validate = Some(validate);
        self
    }

    /// Checks a single configured value against this declaration.
    pub fn check(&self, name: &str, value: Option<&Value>) -> Result<(), String> {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            return if self.required {
                Err(format!("{name}: required field is not set"))
            } else {
                Ok(())
            };
        };

        match self.field_type {
            FieldType::String => {
                let s = value
                    .as_str()
                    .ok_or_else(|| format!("{name}: expected a string, got {value}"))?;
                if let Some(validate) = self.validate {
                    validate(s).map_err(|e| format!("{name}: {e}"))?;
                }
            }
        }
        Ok(())
    }
}

/// Ordered field declarations keyed by field name.
pub type Schema = IndexMap<&'static str, FieldSchema>;

/// Validates a user configuration object against `arguments` and `attributes`.
///
/// Every problem found is reported, not only the first one.
pub fn validate_config(
    arguments: &Schema,
    attributes: &Schema,
    config: &Value,
) -> Result<(), Vec<String>> {
    let Some(object) = config.as_object() else {
        return Err(vec![format!("expected an object, got {config}")]);
    };

    let mut problems = Vec::new();
    for (name, field) in arguments {
        if let Err(e) = field.check(name, object.get(*name)) {
            problems.push(e);
        }
    }
    for key in object.keys() {
        if attributes.contains_key(key.as_str()) {
            problems.push(format!("{key}: computed field cannot be configured"));
        } else if !arguments.contains_key(key.as_str()) {
            problems.push(format!("{key}: unsupported argument"));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}

pub fn string_is_not_empty(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("must not be empty".to_string());
    }
    Ok(())
}

/// Passes if any of `validators` passes; otherwise reports all failures.
pub fn any_of(value: &str, validators: &[ValidateFn]) -> Result<(), String> {
    let mut errors = Vec::with_capacity(validators.len());
    for validate in validators {
        match validate(value) {
            Ok(()) => return Ok(()),
            Err(e) => errors.push(e),
        }
    }
    Err(errors.join("; "))
}
