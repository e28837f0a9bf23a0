//! Step validators.
//!
//! Pure field checks with stable, user-facing messages. Each wizard step
//! has its own validator so a step only blocks on the fields it shows.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::profile::model::DraftProfile;

/// Permissive email shape: one `@`, no whitespace, a dot in the domain.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Fields a validator can reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationField {
    FullName,
    Email,
    Age,
    City,
    State,
    Country,
}

impl fmt::Display for ValidationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Age => "age",
            Self::City => "city",
            Self::State => "state",
            Self::Country => "country",
        };
        write!(f, "{name}")
    }
}

/// Field-to-message mapping produced by a validator. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors(BTreeMap<ValidationField, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The message recorded for `field`, if it failed.
    pub fn get(&self, field: ValidationField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: ValidationField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ValidationField, &String)> {
        self.0.iter()
    }

    /// Fold another validator's findings into this one.
    pub fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    fn insert(&mut self, field: ValidationField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Validate the basic-info step: full name, email, and age.
pub fn validate_basic_info(draft: &DraftProfile) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    match draft.full_name.as_deref() {
        Some(name) if !name.trim().is_empty() => {}
        _ => errors.insert(ValidationField::FullName, "Full Name is required"),
    }

    match draft.email.as_deref() {
        Some(email) if !email.trim().is_empty() => {
            if !EMAIL_RE.is_match(email) {
                errors.insert(ValidationField::Email, "Please enter a valid email");
            }
        }
        _ => errors.insert(ValidationField::Email, "Email is required"),
    }

    match draft.age.as_deref() {
        Some(age) if !age.trim().is_empty() => {
            // Any numeric value in range passes, fractional included.
            let in_range = age
                .trim()
                .parse::<f64>()
                .is_ok_and(|n| (1.0..=150.0).contains(&n));
            if !in_range {
                errors.insert(ValidationField::Age, "Please enter a valid age (1-150)");
            }
        }
        _ => errors.insert(ValidationField::Age, "Age is required"),
    }

    errors
}

/// Validate the address step: city, state, and country.
pub fn validate_address_info(draft: &DraftProfile) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    let required = [
        (ValidationField::City, draft.city.as_deref(), "City is required"),
        (ValidationField::State, draft.state.as_deref(), "State is required"),
        (ValidationField::Country, draft.country.as_deref(), "Country is required"),
    ];
    for (field, value, message) in required {
        match value {
            Some(value) if !value.trim().is_empty() => {}
            _ => errors.insert(field, message),
        }
    }

    errors
}
