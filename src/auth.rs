//! Session store.
//!
//! Holds the current user and the token-bound API client behind a signal
//! pair, decoupled from routing: the router only sees derived boolean
//! signals. Login persists the session to LocalStorage; startup rehydrates
//! it and validates the token against `/users/me`.

use crate::api::{ApiError, LibraryApi, api_base_url};
use crate::web::storage::SessionStorage;
use biblio_shared::{RegisterRequest, User};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Session state.
#[derive(Clone, Default)]
pub struct AuthState {
    /// API client bound to the session token (present only while signed in)
    pub api: Option<LibraryApi>,
    /// The signed-in user
    pub user: Option<User>,
    /// True while the persisted session is being rehydrated
    pub is_loading: bool,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// State after logout or a 401-triggered reset.
    pub fn signed_out() -> Self {
        Self::default()
    }
}

/// Session context.
///
/// The read/write signal pair shared across components through Context.
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    /// Create a fresh context, loading until rehydration has run.
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState {
            is_loading: true,
            ..AuthState::default()
        });
        Self { state, set_state }
    }

    /// Derived signal for the router guard.
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated())
    }

    /// Derived signal flagging pending rehydration.
    pub fn is_loading_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_loading)
    }
}

/// Fetch the session context from Context.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// Rehydrate the persisted session at startup.
///
/// With no persisted token the app starts signed out. Otherwise the stored
/// user snapshot is adopted immediately (so a reload does not flash the
/// login view) and the token is validated against `/users/me`; any failure
/// clears the whole session.
pub fn init_auth(ctx: &AuthContext) {
    let Some(token) = SessionStorage::token() else {
        ctx.set_state.update(|state| *state = AuthState::signed_out());
        return;
    };

    let api = LibraryApi::new(api_base_url(), Some(token), ctx.set_state);
    let persisted_user = SessionStorage::user();
    ctx.set_state.update(|state| {
        state.api = Some(api.clone());
        state.user = persisted_user;
        state.is_loading = true;
    });

    let set_state = ctx.set_state;
    spawn_local(async move {
        match api.current_user().await {
            Ok(user) => {
                SessionStorage::save_user(&user);
                set_state.update(|state| {
                    state.user = Some(user);
                    state.is_loading = false;
                });
            }
            Err(_) => {
                // Stale or rejected token. A 401 already wiped storage and
                // state; this covers transport failures as well.
                SessionStorage::clear();
                set_state.update(|state| *state = AuthState::signed_out());
            }
        }
    });
}

/// Exchange credentials for a session.
///
/// On success the token and user snapshot are persisted and the state flips
/// to authenticated; the router's session effect takes care of leaving the
/// login page.
pub async fn login(ctx: &AuthContext, username: &str, password: &str) -> Result<User, ApiError> {
    let anonymous = LibraryApi::new(api_base_url(), None, ctx.set_state);
    let token = anonymous.login(username, password).await?;

    SessionStorage::save_token(&token.access_token);

    let api = LibraryApi::new(api_base_url(), Some(token.access_token), ctx.set_state);
    let user = api.current_user().await?;
    SessionStorage::save_user(&user);

    ctx.set_state.update(|state| {
        state.api = Some(api);
        state.user = Some(user.clone());
        state.is_loading = false;
    });

    Ok(user)
}

/// Create an account. Does not authenticate; the caller decides whether to
/// chain into [`login`].
pub async fn register(
    ctx: &AuthContext,
    username: &str,
    email: &str,
    password: &str,
) -> Result<User, ApiError> {
    let anonymous = LibraryApi::new(api_base_url(), None, ctx.set_state);
    anonymous
        .register(&RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
        .await
}

/// Drop the session from memory and storage.
///
/// No manual navigation here: the router watches the session signals and
/// redirects to the login view on its own.
pub fn logout(ctx: &AuthContext) {
    SessionStorage::clear();
    ctx.set_state.update(|state| *state = AuthState::signed_out());
}
