//! Profile data model.
//!
//! Two shapes travel through the wizard: the [`DraftProfile`] being filled
//! in step by step, and the complete [`Profile`] that lives in the store.

use serde::{Deserialize, Serialize};

use crate::profile::validate::{ValidationErrors, validate_address_info, validate_basic_info};

/// Storage keys used for persistence.
pub mod storage_keys {
    /// Key the serialized profile list is stored under.
    pub const PROFILES: &str = "@profiles_storage";
}

/// A completed profile, as stored and as serialized to the wire.
///
/// Persisted as one element of the JSON array kept under
/// [`storage_keys::PROFILES`]. Field names serialize in camelCase so data
/// written by earlier clients keeps loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Stable unique id. New profiles get a UUID string; ids already in
    /// storage are opaque and preserved as-is.
    pub id: String,
    pub full_name: String,
    pub email: String,
    /// Kept as the string the user entered; validated as a number in 1..=150.
    pub age: String,
    pub city: String,
    pub state: String,
    pub country: String,
    /// Opaque image reference (URI or inline data). Omitted from the wire
    /// when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Profile {
    /// Seed a draft with this profile's fields, for editing.
    pub fn to_draft(&self) -> DraftProfile {
        DraftProfile {
            full_name: Some(self.full_name.clone()),
            email: Some(self.email.clone()),
            age: Some(self.age.clone()),
            city: Some(self.city.clone()),
            state: Some(self.state.clone()),
            country: Some(self.country.clone()),
            avatar: self.avatar.clone(),
        }
    }
}

/// A profile under construction.
///
/// Every field is optional and nothing is validated until the draft is
/// promoted with [`DraftProfile::into_profile`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl DraftProfile {
    /// Merge `patch` into this draft. Present fields overwrite, absent
    /// fields keep their current value. An explicit empty string counts as
    /// present.
    pub fn merge(&mut self, patch: DraftProfile) {
        self.full_name = patch.full_name.or(self.full_name.take());
        self.email = patch.email.or(self.email.take());
        self.age = patch.age.or(self.age.take());
        self.city = patch.city.or(self.city.take());
        self.state = patch.state.or(self.state.take());
        self.country = patch.country.or(self.country.take());
        self.avatar = patch.avatar.or(self.avatar.take());
    }

    /// Promote the draft into a complete [`Profile`] under `id`.
    ///
    /// Runs both step validators and returns every outstanding field error
    /// if any check fails. An empty avatar string normalizes to `None`.
    pub fn into_profile(self, id: impl Into<String>) -> Result<Profile, ValidationErrors> {
        let mut errors = validate_basic_info(&self);
        errors.extend(validate_address_info(&self));
        if !errors.is_empty() {
            return Err(errors);
        }

        // Validators guarantee the required fields are present past this point.
        Ok(Profile {
            id: id.into(),
            full_name: self.full_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            age: self.age.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            country: self.country.unwrap_or_default(),
            avatar: self.avatar.filter(|avatar| !avatar.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_profile(id: &str) -> Profile {
        Profile {
            id: id.to_string(),
            full_name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            age: "30".to_string(),
            city: "Lima".to_string(),
            state: "Lima".to_string(),
            country: "Peru".to_string(),
            avatar: None,
        }
    }

    #[test]
    fn profile_serializes_with_wire_field_names() {
        let value = serde_json::to_value(make_profile("p1")).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("fullName"));
        assert!(obj.contains_key("city"));
        assert!(!obj.contains_key("full_name"));
        // Absent avatar is omitted entirely, not serialized as null.
        assert!(!obj.contains_key("avatar"));
    }

    #[test]
    fn profile_with_avatar_round_trips() {
        let mut profile = make_profile("p1");
        profile.avatar = Some("https://example.com/ana.png".to_string());
        let raw = serde_json::to_string(&profile).unwrap();
        let back: Profile = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn deserializes_previously_stored_records() {
        let raw = r#"{"id":"1","fullName":"Bob","email":"bob@example.com","age":"42","city":"Austin","state":"TX","country":"USA","avatar":""}"#;
        let profile: Profile = serde_json::from_str(raw).unwrap();
        assert_eq!(profile.id, "1");
        assert_eq!(profile.full_name, "Bob");
        assert_eq!(profile.avatar.as_deref(), Some(""));
    }

    #[test]
    fn merge_overwrites_present_and_keeps_absent_fields() {
        let mut draft = DraftProfile {
            full_name: Some("Ana".to_string()),
            email: Some("ana@example.com".to_string()),
            ..Default::default()
        };
        draft.merge(DraftProfile {
            email: Some("ana@lima.pe".to_string()),
            city: Some("Lima".to_string()),
            ..Default::default()
        });
        assert_eq!(draft.full_name.as_deref(), Some("Ana"));
        assert_eq!(draft.email.as_deref(), Some("ana@lima.pe"));
        assert_eq!(draft.city.as_deref(), Some("Lima"));
        assert_eq!(draft.state, None);
    }

    #[test]
    fn merge_treats_empty_string_as_a_value() {
        let mut draft = DraftProfile {
            city: Some("Lima".to_string()),
            ..Default::default()
        };
        draft.merge(DraftProfile {
            city: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(draft.city.as_deref(), Some(""));
    }

    #[test]
    fn complete_draft_promotes_to_profile() {
        let draft = make_profile("ignored").to_draft();
        let profile = draft.into_profile("p9").unwrap();
        assert_eq!(profile.id, "p9");
        assert_eq!(profile.full_name, "Ana");
        assert_eq!(profile.country, "Peru");
        assert_eq!(profile.avatar, None);
    }

    #[test]
    fn empty_avatar_normalizes_to_none() {
        let mut draft = make_profile("p1").to_draft();
        draft.avatar = Some(String::new());
        let profile = draft.into_profile("p1").unwrap();
        assert_eq!(profile.avatar, None);
    }

    #[test]
    fn incomplete_draft_reports_every_missing_field() {
        let errors = DraftProfile::default().into_profile("p1").unwrap_err();
        assert_eq!(errors.len(), 6);
    }
}
