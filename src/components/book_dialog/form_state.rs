//! Form state for the book create/edit dialog.
//!
//! Gathers the loose signals into one `FormState` struct responsible for
//! holding the fields, resetting them, preloading a book for editing, and
//! converting to the right request payload.

use biblio_shared::{Book, BookCreate, BookUpdate};
use leptos::prelude::*;

/// What the dialog submits: a create payload, or the target id plus a
/// partial update carrying every user-editable field.
#[derive(Debug, Clone, PartialEq)]
pub enum BookSubmission {
    Create(BookCreate),
    Update(i64, BookUpdate),
}

/// Create payload: title, author and ISBN only. Availability is the
/// backend's default, never the client's choice at creation time.
pub fn create_payload(title: &str, author: &str, isbn: &str) -> BookCreate {
    BookCreate {
        title: title.to_string(),
        author: author.to_string(),
        isbn: isbn.to_string(),
    }
}

/// Edit payload: every user-editable field, availability included.
pub fn update_payload(title: &str, author: &str, isbn: &str, available: bool) -> BookUpdate {
    BookUpdate {
        title: Some(title.to_string()),
        author: Some(author.to_string()),
        isbn: Some(isbn.to_string()),
        available: Some(available),
    }
}

/// Dialog form state.
///
/// `RwSignal` fields keep the struct `Copy`, convenient to hand around
/// between the dialog and its inputs.
#[derive(Clone, Copy)]
pub struct FormState {
    pub title: RwSignal<String>,
    pub author: RwSignal<String>,
    pub isbn: RwSignal<String>,
    pub available: RwSignal<bool>,
    /// Id of the book being edited; `None` means the dialog creates.
    pub editing_id: RwSignal<Option<i64>>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            author: RwSignal::new(String::new()),
            isbn: RwSignal::new(String::new()),
            available: RwSignal::new(true),
            editing_id: RwSignal::new(None),
        }
    }

    /// Back to an empty create form.
    pub fn reset(&self) {
        self.title.set(String::new());
        self.author.set(String::new());
        self.isbn.set(String::new());
        self.available.set(true);
        self.editing_id.set(None);
    }

    /// Preload the fields from an existing book for editing.
    pub fn load(&self, book: &Book) {
        self.title.set(book.title.clone());
        self.author.set(book.author.clone());
        self.isbn.set(book.isbn.clone());
        self.available.set(book.available);
        self.editing_id.set(Some(book.id));
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.get().is_some()
    }

    /// Convert the current fields into the request to submit.
    pub fn submission(&self) -> BookSubmission {
        match self.editing_id.get_untracked() {
            Some(id) => BookSubmission::Update(
                id,
                update_payload(
                    &self.title.get_untracked(),
                    &self.author.get_untracked(),
                    &self.isbn.get_untracked(),
                    self.available.get_untracked(),
                ),
            ),
            None => BookSubmission::Create(create_payload(
                &self.title.get_untracked(),
                &self.author.get_untracked(),
                &self.isbn.get_untracked(),
            )),
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_payload_never_carries_availability() {
        let payload = create_payload("New Book", "New Author", "978-1111111111");
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "title": "New Book",
                "author": "New Author",
                "isbn": "978-1111111111"
            })
        );
    }

    #[test]
    fn update_payload_carries_every_editable_field() {
        let payload = update_payload("T", "A", "978-2222222222", false);
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "title": "T",
                "author": "A",
                "isbn": "978-2222222222",
                "available": false
            })
        );
    }
}
