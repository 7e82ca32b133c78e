//! Shared data model for the Biblio client.
//!
//! Plain serde mirrors of the backend's REST payloads. The client owns no
//! identity and enforces no invariants beyond shape: every record here is
//! produced by the backend and reflected as-is after each round trip.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// =========================================================
// Accounts & authentication
// =========================================================

/// A library member, as returned by `/register` and `/users/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_active: bool,
}

/// Body of `POST /register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Response of the form-encoded `POST /token` exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

// =========================================================
// Books
// =========================================================

/// A catalogue entry. `available` is toggled by the backend when loans are
/// created or returned; the client only ever sets it through an explicit
/// edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub available: bool,
    /// Naive ISO timestamp, e.g. `2024-01-01T00:00:00`.
    pub created_at: NaiveDateTime,
}

/// Body of `POST /books`. Carries no availability; the backend defaults it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookCreate {
    pub title: String,
    pub author: String,
    pub isbn: String,
}

/// Body of `PUT /books/{id}`. Unset fields are omitted from the JSON so the
/// backend treats the update as partial.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

// =========================================================
// Loans
// =========================================================

/// A borrow record linking a user to a book, with embedded snapshots of
/// both as the backend saw them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    pub loan_date: NaiveDateTime,
    #[serde(default)]
    pub return_date: Option<NaiveDateTime>,
    pub is_returned: bool,
    pub book: Book,
    pub user: User,
}

/// Body of `POST /loans`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanCreate {
    pub book_id: i64,
}

// =========================================================
// Statistics
// =========================================================

/// Aggregates returned by `GET /stats`. Computed entirely by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryStats {
    pub total_books: u64,
    pub available_books: u64,
    pub total_loans: u64,
    pub active_loans: u64,
}

// =========================================================
// Pagination
// =========================================================

/// Optional `skip`/`limit` window accepted by every list endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl Pagination {
    /// Query-string pairs for the set fields, in `skip`, `limit` order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(skip) = self.skip {
            pairs.push(("skip", skip.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn book_deserializes_from_backend_shape() {
        let body = json!({
            "id": 1,
            "title": "Test Book",
            "author": "Test Author",
            "isbn": "978-0123456789",
            "available": true,
            "created_at": "2024-01-01T00:00:00"
        });
        let book: Book = serde_json::from_value(body).unwrap();
        assert_eq!(book.id, 1);
        assert!(book.available);
        assert_eq!(book.created_at.to_string(), "2024-01-01 00:00:00");
    }

    #[test]
    fn loan_deserializes_with_and_without_return_date() {
        let body = json!({
            "id": 7,
            "user_id": 1,
            "book_id": 2,
            "loan_date": "2024-02-10T12:30:00",
            "is_returned": false,
            "book": {
                "id": 2,
                "title": "Borrowed",
                "author": "Somebody",
                "isbn": "978-1111111111",
                "available": false,
                "created_at": "2024-01-01T00:00:00"
            },
            "user": {
                "id": 1,
                "username": "reader",
                "email": "reader@example.com",
                "is_active": true
            }
        });
        let loan: Loan = serde_json::from_value(body).unwrap();
        assert!(loan.return_date.is_none());
        assert!(!loan.is_returned);
        assert_eq!(loan.book.title, "Borrowed");

        let returned = json!({
            "id": 7,
            "user_id": 1,
            "book_id": 2,
            "loan_date": "2024-02-10T12:30:00",
            "return_date": "2024-02-20T09:00:00",
            "is_returned": true,
            "book": {
                "id": 2,
                "title": "Borrowed",
                "author": "Somebody",
                "isbn": "978-1111111111",
                "available": true,
                "created_at": "2024-01-01T00:00:00"
            },
            "user": {
                "id": 1,
                "username": "reader",
                "email": "reader@example.com",
                "is_active": true
            }
        });
        let loan: Loan = serde_json::from_value(returned).unwrap();
        assert!(loan.return_date.is_some());
        assert!(loan.is_returned);
    }

    #[test]
    fn book_create_serializes_without_availability() {
        let payload = BookCreate {
            title: "New Book".to_string(),
            author: "New Author".to_string(),
            isbn: "978-1111111111".to_string(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "New Book",
                "author": "New Author",
                "isbn": "978-1111111111"
            })
        );
    }

    #[test]
    fn book_update_omits_unset_fields() {
        let update = BookUpdate {
            available: Some(false),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, json!({ "available": false }));
    }

    #[test]
    fn loan_create_carries_only_the_book_id() {
        let value = serde_json::to_value(&LoanCreate { book_id: 42 }).unwrap();
        assert_eq!(value, json!({ "book_id": 42 }));
    }

    #[test]
    fn stats_deserialize() {
        let stats: LibraryStats = serde_json::from_value(json!({
            "total_books": 10,
            "available_books": 6,
            "total_loans": 9,
            "active_loans": 4
        }))
        .unwrap();
        assert_eq!(stats.total_books, 10);
        assert_eq!(stats.active_loans, 4);
    }

    #[test]
    fn pagination_pairs_keep_skip_limit_order() {
        assert!(Pagination::default().query_pairs().is_empty());

        let page = Pagination {
            skip: Some(20),
            limit: Some(10),
        };
        assert_eq!(
            page.query_pairs(),
            vec![("skip", "20".to_string()), ("limit", "10".to_string())]
        );

        let only_limit = Pagination {
            skip: None,
            limit: Some(5),
        };
        assert_eq!(only_limit.query_pairs(), vec![("limit", "5".to_string())]);
    }
}
