//! Routing service - core engine.
//!
//! Wraps the `web_sys` History API with high cohesion: every access to
//! `window.history` lives in this module. Navigation follows the
//! "request -> guard -> apply -> load" flow, and an effect watches the
//! injected session signals so that logout or a 401-triggered session reset
//! moves the user back to the login view without any caller cooperation.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// Guard verdict for a route under a given session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    Redirect(AppRoute),
}

/// Core guard decision, kept free of DOM access.
///
/// While session rehydration is pending nothing redirects; the outlet shows
/// a spinner and the session-change effect re-runs once loading settles.
pub fn check_access(route: AppRoute, is_authenticated: bool, is_loading: bool) -> GuardOutcome {
    if is_loading {
        return GuardOutcome::Allow;
    }
    if route.requires_auth() && !is_authenticated {
        return GuardOutcome::Redirect(AppRoute::auth_failure_redirect());
    }
    if route.should_redirect_when_authenticated() && is_authenticated {
        return GuardOutcome::Redirect(AppRoute::auth_success_redirect());
    }
    GuardOutcome::Allow
}

/// Current browser path.
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// Push a History entry (internal helper).
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Replace the current History entry (internal helper, used for redirects).
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Router service.
///
/// Holds the current route as a signal and applies the guard on every
/// navigation. Session state arrives through injected signals, keeping the
/// router decoupled from the session store.
#[derive(Clone, Copy)]
pub struct RouterService {
    /// Current route (read side)
    current_route: ReadSignal<AppRoute>,
    /// Current route (write side)
    set_route: WriteSignal<AppRoute>,
    /// Injected: whether a session exists
    is_authenticated: Signal<bool>,
    /// Injected: whether session rehydration is still pending
    is_loading: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>, is_loading: Signal<bool>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            is_authenticated,
            is_loading,
        }
    }

    /// Current route signal.
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// Whether session rehydration is still pending.
    pub fn is_loading(&self) -> Signal<bool> {
        self.is_loading
    }

    /// **Core method: navigate with guard.**
    pub fn navigate(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), true);
    }

    /// Navigate to a route.
    ///
    /// `use_push` selects `pushState` over `replaceState`.
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        let is_auth = self.is_authenticated.get_untracked();
        let is_loading = self.is_loading.get_untracked();

        let route = match check_access(target_route, is_auth, is_loading) {
            GuardOutcome::Allow => target_route,
            GuardOutcome::Redirect(redirect) => {
                web_sys::console::log_1(
                    &format!(
                        "[router] access to {} denied, redirecting to {}",
                        target_route.to_path(),
                        redirect.to_path()
                    )
                    .into(),
                );
                redirect
            }
        };

        if use_push {
            push_history_state(route.to_path());
        } else {
            replace_history_state(route.to_path());
        }
        self.set_route.set(route);
    }

    /// Listen for the browser back/forward buttons.
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;
        let is_loading = self.is_loading;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());

            // The guard also applies to history traversal
            match check_access(
                target_route,
                is_authenticated.get_untracked(),
                is_loading.get_untracked(),
            ) {
                GuardOutcome::Allow => set_route.set(target_route),
                GuardOutcome::Redirect(redirect) => {
                    replace_history_state(redirect.to_path());
                    set_route.set(redirect);
                }
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // Leak the closure to keep the listener alive
        closure.forget();
    }

    /// Redirect automatically when the session state changes.
    ///
    /// This is the path by which logout and the global 401 reset force
    /// navigation back to the login view, and by which a fresh login leaves
    /// the login page.
    fn setup_session_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;
        let is_loading = self.is_loading;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let loading = is_loading.get();
            let route = current_route.get_untracked();

            if let GuardOutcome::Redirect(redirect) = check_access(route, is_auth, loading) {
                web_sys::console::log_1(
                    &format!(
                        "[router] session changed, redirecting to {}",
                        redirect.to_path()
                    )
                    .into(),
                );
                push_history_state(redirect.to_path());
                set_route.set(redirect);
            }
        });
    }
}

/// Provide the router service through Context and wire its listeners.
fn provide_router(is_authenticated: Signal<bool>, is_loading: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated, is_loading);

    router.init_popstate_listener();
    router.setup_session_redirect();

    provide_context(router);
    router
}

/// Fetch the router service from Context.
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI components
// ============================================================================

/// Router root component.
///
/// Provides the routing context; mount once at the root of the app.
#[component]
pub fn Router(
    /// Whether a session exists
    is_authenticated: Signal<bool>,
    /// Whether session rehydration is still pending
    is_loading: Signal<bool>,
    /// Child components
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated, is_loading);

    children()
}

/// Router outlet component.
///
/// Renders the component matching the current route, or a full-page spinner
/// while the persisted session is being rehydrated.
#[component]
pub fn RouterOutlet(
    /// Route matching function: current route in, view out
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        if router.is_loading().get() {
            view! {
                <div class="flex items-center justify-center min-h-screen bg-base-200">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
            .into_any()
        } else {
            matcher(router.current_route().get())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_routes_redirect_visitors_to_login() {
        for route in [AppRoute::Dashboard, AppRoute::Books, AppRoute::Loans] {
            assert_eq!(
                check_access(route, false, false),
                GuardOutcome::Redirect(AppRoute::Login)
            );
        }
    }

    #[test]
    fn protected_routes_open_up_with_a_session() {
        for route in [AppRoute::Dashboard, AppRoute::Books, AppRoute::Loans] {
            assert_eq!(check_access(route, true, false), GuardOutcome::Allow);
        }
    }

    #[test]
    fn authenticated_users_leave_the_login_page() {
        assert_eq!(
            check_access(AppRoute::Login, true, false),
            GuardOutcome::Redirect(AppRoute::Dashboard)
        );
        assert_eq!(check_access(AppRoute::Login, false, false), GuardOutcome::Allow);
    }

    #[test]
    fn nothing_redirects_while_rehydration_is_pending() {
        for route in [
            AppRoute::Login,
            AppRoute::Dashboard,
            AppRoute::Books,
            AppRoute::Loans,
        ] {
            assert_eq!(check_access(route, false, true), GuardOutcome::Allow);
        }
    }

    #[test]
    fn not_found_is_reachable_either_way() {
        assert_eq!(check_access(AppRoute::NotFound, false, false), GuardOutcome::Allow);
        assert_eq!(check_access(AppRoute::NotFound, true, false), GuardOutcome::Allow);
    }
}
