//! Create/edit dialog for a book.
//!
//! One `<dialog>` serves both flows: when `editing` holds a book its fields
//! are preloaded and the submit produces a partial update (availability
//! included); otherwise the submit produces a create payload and the
//! backend defaults the availability.

mod form_state;

pub use form_state::BookSubmission;
use form_state::FormState;

use biblio_shared::Book;
use leptos::prelude::*;

#[component]
pub fn BookDialog(
    /// Dialog visibility, owned by the books page
    open: RwSignal<bool>,
    /// Book being edited; `None` switches the dialog to create mode
    editing: RwSignal<Option<Book>>,
    #[prop(into)] on_submit: Callback<BookSubmission>,
) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();
    let form = FormState::new();

    // Keep the native <dialog> element in sync with the open signal
    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    // Reload the fields whenever the edit target changes
    Effect::new(move |_| match editing.get() {
        Some(book) => form.load(&book),
        None => form.reset(),
    });

    let on_form_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        on_submit.run(form.submission());
        open.set(false);
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">
                    {move || if form.is_editing() { "Edit book" } else { "Add a book" }}
                </h3>

                <form on:submit=on_form_submit class="space-y-4 mt-4">
                    <div class="form-control">
                        <label for="book_title" class="label">
                            <span class="label-text">"Title"</span>
                        </label>
                        <input id="book_title" required
                            type="text"
                            placeholder="The Left Hand of Darkness"
                            on:input=move |ev| form.title.set(event_target_value(&ev))
                            prop:value=move || form.title.get()
                            class="input input-bordered w-full"
                        />
                    </div>
                    <div class="form-control">
                        <label for="book_author" class="label">
                            <span class="label-text">"Author"</span>
                        </label>
                        <input id="book_author" required
                            type="text"
                            placeholder="Ursula K. Le Guin"
                            on:input=move |ev| form.author.set(event_target_value(&ev))
                            prop:value=move || form.author.get()
                            class="input input-bordered w-full"
                        />
                    </div>
                    <div class="form-control">
                        <label for="book_isbn" class="label">
                            <span class="label-text">"ISBN"</span>
                        </label>
                        <input id="book_isbn" required
                            type="text"
                            placeholder="978-0441478125"
                            on:input=move |ev| form.isbn.set(event_target_value(&ev))
                            prop:value=move || form.isbn.get()
                            class="input input-bordered w-full"
                        />
                    </div>

                    // Availability is only editable on an existing book
                    <Show when=move || form.is_editing()>
                        <div class="form-control">
                            <label class="label cursor-pointer">
                                <span class="label-text">"Available"</span>
                                <input type="checkbox" class="toggle toggle-primary"
                                    prop:checked=move || form.available.get()
                                    on:change=move |ev| form.available.set(event_target_checked(&ev))
                                />
                            </label>
                        </div>
                    </Show>

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn-primary">
                            {move || if form.is_editing() { "Save" } else { "Add" }}
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
