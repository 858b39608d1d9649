//! Schema-style form validation in on-change mode.
//!
//! DESIGN
//! ======
//! A form is a set of fields, each with one validation rule that yields a
//! single human-readable message. Editing a field re-validates that field
//! right away; submitting validates all of them and blocks while any fails.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use std::collections::BTreeMap;

use validator::ValidateEmail;

/// One message per invalid field.
pub type FieldErrors<F> = BTreeMap<F, &'static str>;

pub trait FormField: Copy + Ord + 'static {
    const ALL: &'static [Self];

    fn validate(self, value: &str) -> Result<(), &'static str>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Form<F: FormField> {
    values: BTreeMap<F, String>,
    errors: FieldErrors<F>,
}

impl<F: FormField> Default for Form<F> {
    fn default() -> Self {
        Self { values: BTreeMap::new(), errors: BTreeMap::new() }
    }
}

impl<F: FormField> Form<F> {
    pub fn value(&self, field: F) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    pub fn error(&self, field: F) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn errors(&self) -> &FieldErrors<F> {
        &self.errors
    }

    pub fn set_field(&mut self, field: F, value: impl Into<String>) {
        let value = value.into();
        match field.validate(&value) {
            Ok(()) => {
                self.errors.remove(&field);
            }
            Err(message) => {
                self.errors.insert(field, message);
            }
        }
        self.values.insert(field, value);
    }

    /// Validate every field.
    ///
    /// # Errors
    ///
    /// Returns one message per invalid field.
    pub fn submit(&mut self) -> Result<(), FieldErrors<F>> {
        self.errors = F::ALL
            .iter()
            .filter_map(|&field| field.validate(self.value(field)).err().map(|message| (field, message)))
            .collect();
        if self.errors.is_empty() { Ok(()) } else { Err(self.errors.clone()) }
    }
}

pub fn require(value: &str, message: &'static str) -> Result<(), &'static str> {
    if value.is_empty() { Err(message) } else { Ok(()) }
}

/// 11 or 12 ASCII digits, nothing else.
pub fn is_phone_number(value: &str) -> bool {
    (11..=12).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit())
}

/// Email shape check; the auth service does the real verification.
pub fn is_email(value: &str) -> bool {
    value.validate_email()
}
