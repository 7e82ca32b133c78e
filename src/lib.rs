//! Biblio frontend application.
//!
//! A thin presentation layer over the library-management REST API, built as
//! a context-driven architecture with high cohesion and low coupling:
//! - `web::route`: route definitions (domain model)
//! - `web::router`: routing service and guard (core engine)
//! - `auth`: session store
//! - `api`: REST client
//! - `components`: UI layer

mod api;
mod auth;
mod components {
    mod book_dialog;
    pub mod books;
    pub mod dashboard;
    mod icons;
    pub mod loans;
    pub mod login;
    mod navbar;
}

use crate::auth::{AuthContext, init_auth};
use crate::components::books::BooksPage;
use crate::components::dashboard::DashboardPage;
use crate::components::loans::LoansPage;
use crate::components::login::LoginPage;

use leptos::prelude::*;

// Browser-facing plumbing: routing over the History API and the persisted
// session slot in LocalStorage.
pub(crate) mod web {
    pub mod route;
    pub mod router;
    pub mod storage;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// Route matching function.
///
/// Maps an `AppRoute` to the view component that renders it.
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Books => view! { <BooksPage /> }.into_any(),
        AppRoute::Loans => view! { <LoansPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. Create the session context
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. Rehydrate the persisted session (token + user from LocalStorage)
    init_auth(&auth_ctx);

    // 3. Session signals injected into the router, so the guard stays
    //    decoupled from the session store itself
    let is_authenticated = auth_ctx.is_authenticated_signal();
    let is_loading = auth_ctx.is_loading_signal();

    view! {
        // 4. Router component: the injected signals drive the guard
        <Router is_authenticated=is_authenticated is_loading=is_loading>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
