//! Books view: catalogue listing, search, create/edit/delete, borrow.
//!
//! Follows the shared list-view contract: every mutation re-fetches the
//! authoritative list instead of patching local state, a failed fetch
//! leaves the list empty behind a fixed error message, and an empty result
//! renders an explicit "no items" row.

use crate::auth::use_auth;
use crate::components::book_dialog::{BookDialog, BookSubmission};
use crate::components::icons::{Pencil, Plus, Search, Trash2};
use crate::components::navbar::Navbar;
use biblio_shared::{Book, LoanCreate};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn BooksPage() -> impl IntoView {
    let auth = use_auth();

    let (books, set_books) = signal(Vec::<Book>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    let (search_query, set_search_query) = signal(String::new());

    let dialog_open = RwSignal::new(false);
    let editing = RwSignal::new(Option::<Book>::None);

    let load_books = move || {
        let state = auth.state.get();
        if let Some(api) = state.api {
            set_loading.set(true);
            spawn_local(async move {
                match api.list_books(None).await {
                    Ok(data) => set_books.set(data),
                    Err(_) => {
                        // Never show stale rows behind an error
                        set_books.set(Vec::new());
                        set_error.set(Some("Failed to load books".to_string()));
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
            load_books();
        }
    });

    // An empty query is a plain reload; a non-empty one swaps the list for
    // the search result wholesale.
    let handle_search = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let query = search_query.get();
        let query = query.trim().to_string();
        if query.is_empty() {
            load_books();
            return;
        }
        let state = auth.state.get();
        if let Some(api) = state.api {
            set_loading.set(true);
            spawn_local(async move {
                match api.search_books(&query, None).await {
                    Ok(data) => set_books.set(data),
                    Err(_) => {
                        set_books.set(Vec::new());
                        set_error.set(Some("Search failed".to_string()));
                    }
                }
                set_loading.set(false);
            });
        }
    };

    let handle_save = move |submission: BookSubmission| {
        let state = auth.state.get();
        if let Some(api) = state.api {
            spawn_local(async move {
                let result = match submission {
                    BookSubmission::Create(payload) => {
                        api.create_book(&payload).await.map(|_| ())
                    }
                    BookSubmission::Update(id, payload) => {
                        api.update_book(id, &payload).await.map(|_| ())
                    }
                };
                match result {
                    Ok(()) => load_books(),
                    Err(e) => set_error.set(Some(e.detail_or("Could not save the book"))),
                }
            });
        }
    };

    let handle_delete = move |id: i64| {
        let confirmed = web_sys::window()
            .map(|w| w.confirm_with_message("Delete this book?").unwrap_or(false))
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        let state = auth.state.get();
        if let Some(api) = state.api {
            spawn_local(async move {
                match api.delete_book(id).await {
                    Ok(()) => load_books(),
                    Err(_) => set_error.set(Some("Could not delete the book".to_string())),
                }
            });
        }
    };

    let handle_borrow = move |id: i64| {
        let state = auth.state.get();
        if let Some(api) = state.api {
            spawn_local(async move {
                match api.create_loan(&LoanCreate { book_id: id }).await {
                    Ok(_) => load_books(),
                    Err(e) => set_error.set(Some(e.detail_or("Could not borrow this book"))),
                }
            });
        }
    };

    let book_count = move || books.with(|list| list.len());

    view! {
        <div class="min-h-screen bg-base-200">
            <Navbar />
            <div class="max-w-7xl mx-auto p-4 md:p-8 space-y-6">
                <div class="flex items-center justify-between">
                    <h1 class="text-3xl font-bold">"Books"</h1>
                    <button
                        class="btn btn-primary gap-2"
                        on:click=move |_| {
                            editing.set(None);
                            dialog_open.set(true);
                        }
                    >
                        <Plus attr:class="h-4 w-4" /> "Add a book"
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

                <form class="join w-full" on:submit=handle_search>
                    <input
                        type="text"
                        placeholder="Search by title, author or ISBN..."
                        class="input input-bordered join-item w-full"
                        on:input=move |ev| set_search_query.set(event_target_value(&ev))
                        prop:value=search_query
                    />
                    <button type="submit" class="btn btn-primary join-item gap-2">
                        <Search attr:class="h-4 w-4" /> "Search"
                    </button>
                </form>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"Title"</th>
                                        <th>"Author"</th>
                                        <th class="hidden md:table-cell">"ISBN"</th>
                                        <th>"Status"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || book_count() == 0 && !loading.get()>
                                        <tr>
                                            <td colspan="5" class="text-center py-8 text-base-content/50">
                                                "No books found."
                                            </td>
                                        </tr>
                                    </Show>
                                    <Show when=move || loading.get() && book_count() == 0>
                                        <tr>
                                            <td colspan="5" class="text-center py-8 text-base-content/50">
                                                <span class="loading loading-spinner loading-md"></span>
                                                " Loading..."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=move || books.get()
                                        // Key on the rendered fields so edits and borrows
                                        // re-render the row even when the id is unchanged
                                        key=|book| {
                                            (
                                                book.id,
                                                book.title.clone(),
                                                book.author.clone(),
                                                book.isbn.clone(),
                                                book.available,
                                            )
                                        }
                                        children=move |book: Book| {
                                            let book_id = book.id;
                                            let available = book.available;
                                            let edit_book = book.clone();
                                            view! {
                                                <tr>
                                                    <td class="font-medium">{book.title.clone()}</td>
                                                    <td>{book.author.clone()}</td>
                                                    <td class="hidden md:table-cell font-mono text-sm opacity-70">
                                                        {book.isbn.clone()}
                                                    </td>
                                                    <td>
                                                        <span class=if available {
                                                            "badge badge-success badge-outline"
                                                        } else {
                                                            "badge badge-error badge-outline"
                                                        }>
                                                            {if available { "Available" } else { "Borrowed" }}
                                                        </span>
                                                    </td>
                                                    <td>
                                                        <div class="flex justify-end gap-1">
                                                            <Show when=move || available>
                                                                <button
                                                                    class="btn btn-primary btn-sm"
                                                                    on:click=move |_| handle_borrow(book_id)
                                                                >
                                                                    "Borrow"
                                                                </button>
                                                            </Show>
                                                            <button
                                                                class="btn btn-ghost btn-sm btn-square"
                                                                on:click=move |_| {
                                                                    editing.set(Some(edit_book.clone()));
                                                                    dialog_open.set(true);
                                                                }
                                                            >
                                                                <Pencil attr:class="h-4 w-4" />
                                                            </button>
                                                            <button
                                                                class="btn btn-ghost btn-sm btn-square text-error"
                                                                on:click=move |_| handle_delete(book_id)
                                                            >
                                                                <Trash2 attr:class="h-4 w-4" />
                                                            </button>
                                                        </div>
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

            <BookDialog open=dialog_open editing=editing on_submit=handle_save />
        </div>
    }
}
