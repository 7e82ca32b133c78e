//! Login view: sign-in and registration behind two tabs.
//!
//! No explicit navigation on success: flipping the session state is enough,
//! the router's session effect leaves this page on its own.

use crate::auth::{login, register, use_auth};
use crate::components::icons::Library;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthTab {
    SignIn,
    Register,
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_auth();

    let (tab, set_tab) = signal(AuthTab::SignIn);
    let (error, set_error) = signal(Option::<String>::None);
    let (is_submitting, set_submitting) = signal(false);

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());

    let (reg_username, set_reg_username) = signal(String::new());
    let (reg_email, set_reg_email) = signal(String::new());
    let (reg_password, set_reg_password) = signal(String::new());

    let switch_tab = move |target: AuthTab| {
        set_tab.set(target);
        set_error.set(None);
    };

    let on_sign_in = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let username = username.get();
        let password = password.get();
        set_error.set(None);
        set_submitting.set(true);
        spawn_local(async move {
            // Credential failures get a fixed message, never the raw detail
            if login(&ctx, &username, &password).await.is_err() {
                set_error.set(Some("Incorrect username or password".to_string()));
            }
            set_submitting.set(false);
        });
    };

    let on_register = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let username = reg_username.get();
        let email = reg_email.get();
        let password = reg_password.get();
        set_error.set(None);
        set_submitting.set(true);
        spawn_local(async move {
            match register(&ctx, &username, &email, &password).await {
                // Registration chains straight into a session
                Ok(_) => {
                    if login(&ctx, &username, &password).await.is_err() {
                        set_error.set(Some(
                            "Account created, but sign-in failed. Please sign in.".to_string(),
                        ));
                        set_tab.set(AuthTab::SignIn);
                    }
                }
                Err(e) => set_error.set(Some(e.detail_or("Registration failed"))),
            }
            set_submitting.set(false);
        });
    };

    let tab_class = move |target: AuthTab| {
        if tab.get() == target { "tab tab-active" } else { "tab" }
    };

    view! {
        <div class="min-h-screen bg-base-200 flex items-center justify-center p-4">
            <div class="card w-full max-w-md bg-base-100 shadow-xl">
                <div class="card-body">
                    <div class="flex items-center justify-center gap-2 mb-2">
                        <Library attr:class="h-8 w-8 text-primary" />
                        <h1 class="text-2xl font-bold">"Biblio"</h1>
                    </div>

                    <div role="tablist" class="tabs tabs-boxed">
                        <a
                            role="tab"
                            class=move || tab_class(AuthTab::SignIn)
                            on:click=move |_| switch_tab(AuthTab::SignIn)
                        >
                            "Sign in"
                        </a>
                        <a
                            role="tab"
                            class=move || tab_class(AuthTab::Register)
                            on:click=move |_| switch_tab(AuthTab::Register)
                        >
                            "Register"
                        </a>
                    </div>

                    <Show when=move || error.get().is_some()>
                        <div role="alert" class="alert alert-error mt-2">
                            <span>{move || error.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <Show
                        when=move || tab.get() == AuthTab::SignIn
                        fallback=move || {
                            view! {
                                <form class="space-y-4 mt-2" on:submit=on_register>
                                    <div class="form-control">
                                        <label for="reg_username" class="label">
                                            <span class="label-text">"Username"</span>
                                        </label>
                                        <input id="reg_username" required
                                            type="text"
                                            class="input input-bordered w-full"
                                            on:input=move |ev| {
                                                set_reg_username.set(event_target_value(&ev))
                                            }
                                            prop:value=reg_username
                                        />
                                    </div>
                                    <div class="form-control">
                                        <label for="reg_email" class="label">
                                            <span class="label-text">"Email"</span>
                                        </label>
                                        <input id="reg_email" required
                                            type="email"
                                            class="input input-bordered w-full"
                                            on:input=move |ev| {
                                                set_reg_email.set(event_target_value(&ev))
                                            }
                                            prop:value=reg_email
                                        />
                                    </div>
                                    <div class="form-control">
                                        <label for="reg_password" class="label">
                                            <span class="label-text">"Password"</span>
                                        </label>
                                        <input id="reg_password" required
                                            type="password"
                                            class="input input-bordered w-full"
                                            on:input=move |ev| {
                                                set_reg_password.set(event_target_value(&ev))
                                            }
                                            prop:value=reg_password
                                        />
                                    </div>
                                    <button
                                        type="submit"
                                        class="btn btn-primary w-full"
                                        disabled=move || is_submitting.get()
                                    >
                                        {move || {
                                            if is_submitting.get() {
                                                "Creating account..."
                                            } else {
                                                "Create account"
                                            }
                                        }}
                                    </button>
                                </form>
                            }
                        }
                    >
                        <form class="space-y-4 mt-2" on:submit=on_sign_in>
                            <div class="form-control">
                                <label for="login_username" class="label">
                                    <span class="label-text">"Username"</span>
                                </label>
                                <input id="login_username" required
                                    type="text"
                                    class="input input-bordered w-full"
                                    on:input=move |ev| set_username.set(event_target_value(&ev))
                                    prop:value=username
                                />
                            </div>
                            <div class="form-control">
                                <label for="login_password" class="label">
                                    <span class="label-text">"Password"</span>
                                </label>
                                <input id="login_password" required
                                    type="password"
                                    class="input input-bordered w-full"
                                    on:input=move |ev| set_password.set(event_target_value(&ev))
                                    prop:value=password
                                />
                            </div>
                            <button
                                type="submit"
                                class="btn btn-primary w-full"
                                disabled=move || is_submitting.get()
                            >
                                {move || {
                                    if is_submitting.get() { "Signing in..." } else { "Sign in" }
                                }}
                            </button>
                        </form>
                    </Show>
                </div>
            </div>
        </div>
    }
}
