//! Dashboard view: library-wide aggregates.

use crate::auth::use_auth;
use crate::components::icons::*;
use crate::components::navbar::Navbar;
use biblio_shared::LibraryStats;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();

    let (stats, set_stats) = signal(Option::<LibraryStats>::None);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);

    let load_stats = move || {
        let state = auth.state.get();
        if let Some(api) = state.api {
            set_loading.set(true);
            spawn_local(async move {
                match api.stats().await {
                    Ok(data) => set_stats.set(Some(data)),
                    Err(_) => {
                        set_stats.set(None);
                        set_error.set(Some("Failed to load statistics".to_string()));
                    }
                }
                set_loading.set(false);
            });
        }
    };

    // Initial fetch once the session is settled
    Effect::new(move |_| {
        let state = auth.state.get();
        if state.is_authenticated() && !state.is_loading {
            load_stats();
        }
    });

    let username = move || {
        auth.state
            .get()
            .user
            .map(|user| user.username)
            .unwrap_or_default()
    };

    let stat = move |field: fn(&LibraryStats) -> u64| {
        stats.get().as_ref().map(field).unwrap_or(0)
    };

    view! {
        <div class="min-h-screen bg-base-200">
            <Navbar />
            <div class="max-w-7xl mx-auto p-4 md:p-8 space-y-8">
                <div class="flex items-center justify-between">
                    <div>
                        <h1 class="text-3xl font-bold">"Dashboard"</h1>
                        <p class="text-base-content/70 mt-1">
                            "Welcome, " {username} "! Use the menu to manage books and your loans."
                        </p>
                    </div>
                    <button
                        class="btn btn-ghost btn-circle"
                        on:click=move |_| load_stats()
                        disabled=move || loading.get()
                    >
                        <RefreshCw attr:class=move || {
                            if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" }
                        } />
                    </button>
                </div>

                <Show when=move || error.get().is_some()>
                    <div role="alert" class="alert alert-error">
                        <span>{move || error.get().unwrap_or_default()}</span>
                        <button class="btn btn-ghost btn-xs" on:click=move |_| set_error.set(None)>
                            "Dismiss"
                        </button>
                    </div>
                </Show>

                <Show
                    when=move || stats.get().is_some()
                    fallback=move || {
                        view! {
                            <Show when=move || loading.get()>
                                <div class="flex justify-center py-12">
                                    <span class="loading loading-spinner loading-lg text-primary"></span>
                                </div>
                            </Show>
                        }
                    }
                >
                    <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                        <div class="stat">
                            <div class="stat-figure text-primary">
                                <Library attr:class="h-8 w-8" />
                            </div>
                            <div class="stat-title">"Total books"</div>
                            <div class="stat-value text-primary">
                                {move || stat(|s| s.total_books)}
                            </div>
                        </div>
                        <div class="stat">
                            <div class="stat-figure text-success">
                                <CircleCheck attr:class="h-8 w-8" />
                            </div>
                            <div class="stat-title">"Available books"</div>
                            <div class="stat-value text-success">
                                {move || stat(|s| s.available_books)}
                            </div>
                        </div>
                        <div class="stat">
                            <div class="stat-figure text-info">
                                <ClipboardList attr:class="h-8 w-8" />
                            </div>
                            <div class="stat-title">"Total loans"</div>
                            <div class="stat-value text-info">
                                {move || stat(|s| s.total_loans)}
                            </div>
                        </div>
                        <div class="stat">
                            <div class="stat-figure text-warning">
                                <Undo2 attr:class="h-8 w-8" />
                            </div>
                            <div class="stat-title">"Active loans"</div>
                            <div class="stat-value text-warning">
                                {move || stat(|s| s.active_loans)}
                            </div>
                        </div>
                    </div>
                </Show>
            </div>
        </div>
    }
}
