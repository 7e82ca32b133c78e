//! Persisted session slot.
//!
//! The bearer token and the last known user snapshot live under fixed
//! LocalStorage keys so a page reload can rehydrate the session without
//! prompting for credentials again. Both entries are wiped on logout and on
//! any 401 response.

use biblio_shared::User;
use gloo_storage::{LocalStorage, Storage};

/// LocalStorage key holding the bearer token.
pub const TOKEN_KEY: &str = "biblio_token";
/// LocalStorage key holding the serialized [`User`].
pub const USER_KEY: &str = "biblio_user";

/// Static accessors for the persisted session.
pub struct SessionStorage;

impl SessionStorage {
    /// The persisted token, if any.
    pub fn token() -> Option<String> {
        LocalStorage::get(TOKEN_KEY).ok()
    }

    pub fn save_token(token: &str) {
        let _ = LocalStorage::set(TOKEN_KEY, token);
    }

    /// The persisted user snapshot, if present and well-formed.
    pub fn user() -> Option<User> {
        LocalStorage::get(USER_KEY).ok()
    }

    pub fn save_user(user: &User) {
        let _ = LocalStorage::set(USER_KEY, user);
    }

    /// Remove both session entries.
    pub fn clear() {
        LocalStorage::delete(TOKEN_KEY);
        LocalStorage::delete(USER_KEY);
    }
}
