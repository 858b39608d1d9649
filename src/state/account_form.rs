//! Login and registration form rules.

#[cfg(test)]
#[path = "account_form_test.rs"]
mod account_form_test;

use crate::util::validation::{FieldErrors, Form, FormField, is_email, require};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegisterField {
    Name,
    Email,
    Password,
}

impl FormField for RegisterField {
    const ALL: &'static [Self] = &[Self::Name, Self::Email, Self::Password];

    fn validate(self, value: &str) -> Result<(), &'static str> {
        match self {
            Self::Name => require(value, "Name is required"),
            Self::Email => validate_email(value),
            Self::Password => {
                require(value, "Password is required")?;
                if value.chars().count() < MIN_PASSWORD_LEN {
                    Err("Password must be at least 6 characters")
                } else {
                    Ok(())
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LoginField {
    Email,
    Password,
}

impl FormField for LoginField {
    const ALL: &'static [Self] = &[Self::Email, Self::Password];

    fn validate(self, value: &str) -> Result<(), &'static str> {
        match self {
            Self::Email => validate_email(value),
            Self::Password => require(value, "Password is required"),
        }
    }
}

fn validate_email(value: &str) -> Result<(), &'static str> {
    require(value, "Email is required")?;
    if is_email(value) { Ok(()) } else { Err("Enter a valid email") }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// # Errors
///
/// One message per invalid field.
pub fn submit_login(form: &mut Form<LoginField>) -> Result<Credentials, FieldErrors<LoginField>> {
    form.submit()?;
    Ok(Credentials {
        email: form.value(LoginField::Email).to_owned(),
        password: form.value(LoginField::Password).to_owned(),
    })
}

/// # Errors
///
/// One message per invalid field.
pub fn submit_registration(form: &mut Form<RegisterField>) -> Result<Registration, FieldErrors<RegisterField>> {
    form.submit()?;
    Ok(Registration {
        name: form.value(RegisterField::Name).to_owned(),
        email: form.value(RegisterField::Email).to_owned(),
        password: form.value(RegisterField::Password).to_owned(),
    })
}
