//! Profile data model and validation.

pub mod model;
pub mod validate;

pub use model::{DraftProfile, Profile, storage_keys};
pub use validate::{ValidationErrors, ValidationField, validate_address_info, validate_basic_info};
