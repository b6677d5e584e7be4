//! Role → feature policy and best-effort entitlement loaders.
//!
//! DESIGN
//! ======
//! The boolean gating decisions are pure functions of (role, key, static
//! tables). The remotely-fetched catalog and per-user entitlement record are
//! loaded best-effort for display purposes but are deliberately NOT consulted
//! by [`is_feature_enabled`]; real enforcement happens server-side. Flagged
//! for product clarification — do not wire the remote data into the boolean
//! without that answer.

use std::sync::{Arc, Mutex, PoisonError};

use crate::api::AuthApi;
use crate::types::{FeatureFlag, Session, UserAccess};

/// Premium feature keys unconditionally hidden from navigation-level checks,
/// regardless of role or remote entitlement data.
pub const PREMIUM_FEATURES: [&str; 5] = [
    "FACILITY360",
    "BILLING_DASHBOARD",
    "PARTNER_SERVICES",
    "ADVANCED_ANALYTICS",
    "API_ACCESS",
];

/// Baseline feature keys available to every signed-in user.
pub const BASIC_FEATURES: [&str; 4] = [
    "BASIC_MONITORING",
    "BASIC_ANALYTICS",
    "DEVICE_MANAGEMENT",
    "APPLIANCE_MONITORING",
];

/// Plan → feature fallback table, used for display when the entitlement
/// endpoint is unavailable.
#[must_use]
pub fn plan_features(plan: &str) -> &'static [&'static str] {
    match plan {
        "FREEMIUM" => &["BASIC_MONITORING", "BASIC_ANALYTICS"],
        "PREMIUM" => &[
            "BASIC_MONITORING",
            "BASIC_ANALYTICS",
            "FACILITY360",
            "BILLING_DASHBOARD",
            "PARTNER_SERVICES",
            "APPLIANCE_MONITORING",
        ],
        "ENTERPRISE" => &[
            "BASIC_MONITORING",
            "BASIC_ANALYTICS",
            "FACILITY360",
            "BILLING_DASHBOARD",
            "ADVANCED_ANALYTICS",
            "API_ACCESS",
            "PARTNER_SERVICES",
            "DEVICE_MANAGEMENT",
            "APPLIANCE_MONITORING",
        ],
        _ => &[],
    }
}

/// Whether a feature is visible to the given session.
///
/// Deny-listed premium keys are always hidden, for every role. Otherwise:
/// no session → false; enterprise admin → true; basic keys → true; and any
/// unclassified key defaults to true for a signed-in user.
#[must_use]
pub fn is_feature_enabled(session: Option<&Session>, key: &str) -> bool {
    if PREMIUM_FEATURES.contains(&key) {
        return false;
    }
    let Some(session) = session else {
        return false;
    };
    if session.role.is_enterprise_admin() {
        return true;
    }
    // Basic keys and any unclassified key are visible once signed in; the
    // basic list only matters for the plan display tables.
    true
}

/// Whether the session may administer a feature. Enterprise admins only.
#[must_use]
pub fn can_manage_feature(session: Option<&Session>, _key: &str) -> bool {
    session.is_some_and(|s| s.role.is_enterprise_admin())
}

/// Loader/cache for the flag catalog and per-user entitlement record.
///
/// Both loads are independent and may interleave freely; each writes its own
/// slot on completion. Failures are logged and leave the previous value in
/// place (empty on first load), matching the "fallback to static tables"
/// behavior of the original client.
pub struct FeatureFlagService {
    api: Arc<dyn AuthApi>,
    catalog: Mutex<Vec<FeatureFlag>>,
    user_access: Mutex<Option<UserAccess>>,
}

impl FeatureFlagService {
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>) -> Self {
        Self {
            api,
            catalog: Mutex::new(Vec::new()),
            user_access: Mutex::new(None),
        }
    }

    /// Fetch the flag catalog. Best-effort.
    pub async fn load_catalog(&self) {
        match self.api.fetch_feature_catalog().await {
            Ok(flags) => {
                *self.catalog.lock().unwrap_or_else(PoisonError::into_inner) = flags;
            }
            Err(err) => tracing::warn!(error = %err, "feature catalog load failed, using fallback"),
        }
    }

    /// Fetch the per-user entitlement record. Best-effort.
    pub async fn load_user_access(&self, user_id: &str) {
        match self.api.fetch_user_access(user_id).await {
            Ok(access) => {
                *self
                    .user_access
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner) = Some(access);
            }
            Err(err) => tracing::warn!(error = %err, "user access load failed, using fallback"),
        }
    }

    /// Kick off both loads for a signed-in session; a signed-out session
    /// loads nothing.
    pub async fn load(&self, session: Option<&Session>) {
        if let Some(session) = session {
            tokio::join!(self.load_catalog(), self.load_user_access(&session.id));
        }
    }

    /// Last successfully loaded catalog.
    #[must_use]
    pub fn catalog(&self) -> Vec<FeatureFlag> {
        self.catalog
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Last successfully loaded entitlement record.
    #[must_use]
    pub fn user_access(&self) -> Option<UserAccess> {
        self.user_access
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
#[path = "features_test.rs"]
mod tests;
