//! Navigation shell.
//!
//! Route-aware menu rendered on every authenticated view, with the current
//! username and the logout affordance.

use crate::auth::{logout, use_auth};
use crate::components::icons::{Library, LogOut};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_auth();
    let router = use_router();
    let current = router.current_route();

    let username = move || {
        ctx.state
            .get()
            .user
            .map(|user| user.username)
            .unwrap_or_default()
    };

    let link_class = move |route: AppRoute| {
        if current.get() == route { "active" } else { "" }
    };

    // Navigation back to /login is handled by the router's session effect
    let on_logout = move |_| logout(&ctx);

    view! {
        <div class="navbar bg-base-100 shadow-lg px-4">
            <div class="flex-1 gap-2">
                <Library attr:class="h-6 w-6 text-primary" />
                <a class="btn btn-ghost text-xl" on:click=move |_| router.navigate("/")>
                    "Biblio"
                </a>
            </div>
            <div class="flex-none items-center gap-2">
                <ul class="menu menu-horizontal px-1 gap-1">
                    <li>
                        <a
                            class=move || link_class(AppRoute::Dashboard)
                            on:click=move |_| router.navigate("/")
                        >
                            "Dashboard"
                        </a>
                    </li>
                    <li>
                        <a
                            class=move || link_class(AppRoute::Books)
                            on:click=move |_| router.navigate("/books")
                        >
                            "Books"
                        </a>
                    </li>
                    <li>
                        <a
                            class=move || link_class(AppRoute::Loans)
                            on:click=move |_| router.navigate("/loans")
                        >
                            "My loans"
                        </a>
                    </li>
                </ul>
                <span class="badge badge-neutral hidden md:inline-flex">{username}</span>
                <button class="btn btn-ghost btn-sm gap-2" on:click=on_logout>
                    <LogOut attr:class="h-4 w-4" /> "Log out"
                </button>
            </div>
        </div>
    }
}
