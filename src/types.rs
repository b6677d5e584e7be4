//! Session record, wire DTOs, and registration normalization.
//!
//! Wire structs mirror the backend's camelCase JSON. [`ProfileResponse`]
//! keeps every identity field optional; promotion to a [`Session`] is the
//! validation step (a body without an id or email never becomes a session).

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// The in-memory authenticated-user record.
///
/// Either fully populated (authenticated) or absent; no partial states are
/// exposed to consumers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub is_active: bool,
    /// RFC 3339 creation timestamp, as formatted by the server (or
    /// synthesized at login time).
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Raw body of the `GET`/`PUT` profile endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl ProfileResponse {
    /// Promote to a [`Session`] if the required identity fields are present
    /// and non-empty. Missing optional fields fall back to neutral values.
    #[must_use]
    pub fn into_session(self) -> Option<Session> {
        let id = self.id.filter(|v| !v.is_empty())?;
        let email = self.email.filter(|v| !v.is_empty())?;
        Some(Session {
            id,
            email,
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            role: self.role.unwrap_or_default(),
            is_active: self.is_active.unwrap_or(true),
            created_at: self.created_at.unwrap_or_default(),
            location: self.location,
        })
    }
}

/// `POST` login request body.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username_or_email: String,
    pub password: String,
}

/// Successful login response.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub active: bool,
}

/// Registration input as collected by the onboarding form.
#[derive(Clone, Debug, Default)]
pub struct RegisterData {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub property_type: String,
    pub property_size: String,
    pub building_type: String,
    pub number_of_rooms: String,
    pub number_of_floors: String,
    pub has_solar: bool,
    pub has_generator: bool,
    pub has_inverter: bool,
    pub current_meter_type: String,
    pub energy_provider: String,
    pub monthly_energy_bill: String,
}

/// Normalized `POST` registration payload.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub property_type: String,
    pub property_size: String,
    pub building_type: String,
    pub number_of_rooms: String,
    pub number_of_floors: String,
    pub has_solar: bool,
    pub has_generator: bool,
    pub has_inverter: bool,
    pub current_meter_type: String,
    pub energy_provider: String,
    pub monthly_energy_bill: String,
}

impl RegisterRequest {
    /// Normalize form input into the wire payload: the username is derived
    /// from the email local-part and the phone number is coerced to a single
    /// leading-country-code form.
    #[must_use]
    pub fn from_data(data: RegisterData) -> Self {
        Self {
            username: derive_username(&data.email),
            phone_number: normalize_phone(&data.phone_number),
            email: data.email,
            password: data.password,
            first_name: data.first_name,
            last_name: data.last_name,
            address: data.address,
            city: data.city,
            state: data.state,
            country: data.country,
            property_type: data.property_type,
            property_size: data.property_size,
            building_type: data.building_type,
            number_of_rooms: data.number_of_rooms,
            number_of_floors: data.number_of_floors,
            has_solar: data.has_solar,
            has_generator: data.has_generator,
            has_inverter: data.has_inverter,
            current_meter_type: data.current_meter_type,
            energy_provider: data.energy_provider,
            monthly_energy_bill: data.monthly_energy_bill,
        }
    }
}

/// Registration response; a missing `accessToken` means the account was
/// created but requires a manual login.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<ProfileResponse>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Partial profile update; only set fields are serialized.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Feature-flag catalog entry as served by the flag service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlag {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub feature_key: String,
    #[serde(default)]
    pub feature_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_globally_enabled: bool,
    #[serde(default)]
    pub is_paid_feature: bool,
    #[serde(default)]
    pub feature_category: String,
}

/// Per-user entitlement record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccess {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub current_plan: String,
    #[serde(default)]
    pub enabled_features: Vec<String>,
    #[serde(default)]
    pub disabled_features: Vec<String>,
    #[serde(default)]
    pub has_active_subscription: bool,
}

/// Derive a username from the email local-part: non-alphanumerics stripped,
/// lowercased.
#[must_use]
pub fn derive_username(email: &str) -> String {
    email
        .split('@')
        .next()
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Coerce a phone number into a single `+234…` form.
///
/// Accepts local (`0801…`), bare (`801…`), country-prefixed (`234801…`), and
/// already-international (`+234801…`) input; formatting characters are
/// dropped. Numbers carrying a different explicit country code are kept as
/// entered.
#[must_use]
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if raw.trim_start().starts_with('+') {
        return format!("+{digits}");
    }
    if let Some(rest) = digits.strip_prefix("234") {
        return format!("+234{rest}");
    }
    if let Some(rest) = digits.strip_prefix('0') {
        return format!("+234{rest}");
    }
    format!("+234{digits}")
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
