//! Loans view: the signed-in user's borrow history with returns.

use crate::auth::use_auth;
use crate::components::navbar::Navbar;
use biblio_shared::Loan;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoansPage() -> impl IntoView {
    let auth = use_auth();

    let (loans, set_loans) = signal(Vec::<Loan>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);

    let load_loans = move || {
        let state = auth.state.get();
        if let Some(api) = state.api {
            set_loading.set(true);
            spawn_local(async move {
                match api.my_loans(None).await {
                    Ok(data) => set_loans.set(data),
                    Err(_) => {
                        set_loans.set(Vec::new());
                        set_error.set(Some("Failed to load loans".to_string()));
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
            load_loans();
        }
    });

    let handle_return = move |id: i64| {
        let state = auth.state.get();
        if let Some(api) = state.api {
            spawn_local(async move {
                match api.return_loan(id).await {
                    Ok(_) => load_loans(),
                    Err(e) => set_error.set(Some(e.detail_or("Could not return this book"))),
                }
            });
        }
    };

    let loan_count = move || loans.with(|list| list.len());

    view! {
        <div class="min-h-screen bg-base-200">
            <Navbar />
            <div class="max-w-7xl mx-auto p-4 md:p-8 space-y-6">
                <h1 class="text-3xl font-bold">"My loans"</h1>

                <Show when=move || error.get().is_some()>
                    <div role="alert" class="alert alert-error">
                        <span>{move || error.get().unwrap_or_default()}</span>
                        <button class="btn btn-ghost btn-xs" on:click=move |_| set_error.set(None)>
                            "Dismiss"
                        </button>
                    </div>
                </Show>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"Book"</th>
                                        <th class="hidden md:table-cell">"Author"</th>
                                        <th>"Borrowed"</th>
                                        <th class="hidden md:table-cell">"Returned"</th>
                                        <th>"Status"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || loan_count() == 0 && !loading.get()>
                                        <tr>
                                            <td colspan="6" class="text-center py-8 text-base-content/50">
                                                "You have no loans yet."
                                            </td>
                                        </tr>
                                    </Show>
                                    <Show when=move || loading.get() && loan_count() == 0>
                                        <tr>
                                            <td colspan="6" class="text-center py-8 text-base-content/50">
                                                <span class="loading loading-spinner loading-md"></span>
                                                " Loading..."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=move || loans.get()
                                        key=|loan| (loan.id, loan.is_returned)
                                        children=move |loan: Loan| {
                                            let loan_id = loan.id;
                                            let is_returned = loan.is_returned;
                                            let returned_on = loan
                                                .return_date
                                                .map(|d| d.format("%Y-%m-%d").to_string())
                                                .unwrap_or_else(|| "-".to_string());
                                            view! {
                                                <tr>
                                                    <td class="font-medium">{loan.book.title.clone()}</td>
                                                    <td class="hidden md:table-cell">
                                                        {loan.book.author.clone()}
                                                    </td>
                                                    <td>{loan.loan_date.format("%Y-%m-%d").to_string()}</td>
                                                    <td class="hidden md:table-cell">{returned_on}</td>
                                                    <td>
                                                        <span class=if is_returned {
                                                            "badge badge-ghost"
                                                        } else {
                                                            "badge badge-info badge-outline"
                                                        }>
                                                            {if is_returned { "Returned" } else { "On loan" }}
                                                        </span>
                                                    </td>
                                                    <td class="text-right">
                                                        <Show when=move || !is_returned>
                                                            <button
                                                                class="btn btn-outline btn-sm"
                                                                on:click=move |_| handle_return(loan_id)
                                                            >
                                                                "Return"
                                                            </button>
                                                        </Show>
                                                    </td>
                                                </tr>
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
