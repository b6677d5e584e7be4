use super::*;

// =============================================================================
// MemoryCredentialStore
// =============================================================================

#[test]
fn token_starts_absent() {
    let store = MemoryCredentialStore::new();
    assert!(store.token().is_none());
}

#[test]
fn set_then_get_token() {
    let store = MemoryCredentialStore::new();
    store.set_token("valid-token-12345");
    assert_eq!(store.token().as_deref(), Some("valid-token-12345"));
}

#[test]
fn clear_removes_token() {
    let store = MemoryCredentialStore::new();
    store.set_token("valid-token-12345");
    store.clear_token();
    assert!(store.token().is_none());
}

#[test]
fn clear_token_leaves_admin_marker() {
    let store = MemoryCredentialStore::new();
    store.set_token("valid-token-12345");
    store.set_admin_marker("admin@smartwatts.ng");
    store.clear_token();
    assert_eq!(store.admin_marker().as_deref(), Some("admin@smartwatts.ng"));
}

#[test]
fn set_token_overwrites() {
    let store = MemoryCredentialStore::new();
    store.set_token("first-token-12345");
    store.set_token("second-token-12345");
    assert_eq!(store.token().as_deref(), Some("second-token-12345"));
}

#[test]
fn admin_marker_starts_absent() {
    let store = MemoryCredentialStore::new();
    assert!(store.admin_marker().is_none());
}

// =============================================================================
// storage keys
// =============================================================================

#[test]
fn keys_match_the_persisted_storage_contract() {
    // Keyed backends (browser local storage) must use these exact keys so
    // sessions survive a backend swap.
    assert_eq!(TOKEN_KEY, "token");
    assert_eq!(ADMIN_EMAIL_KEY, "adminEmail");
}
