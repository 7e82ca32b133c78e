//! REST client for the library backend.
//!
//! Single point of HTTP access. Every request is stamped with the bearer
//! token when one exists, and every response passes through one status
//! check: a 401 from *any* endpoint unconditionally clears the persisted
//! session and resets the in-memory auth state through the injected write
//! signal - callers cannot opt out. The router observes that signal and
//! moves the user back to the login view.
//!
//! No retry, no request deduplication, no caching: each call is a single
//! request whose result goes straight back to the caller.

use biblio_shared::{
    Book, BookCreate, BookUpdate, LibraryStats, Loan, LoanCreate, Pagination, RegisterRequest,
    Token, User,
};
use gloo_net::http::{Method, RequestBuilder, Response};
use leptos::prelude::*;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::auth::AuthState;
use crate::web::storage::SessionStorage;

/// Fallback when `BIBLIO_API_URL` is not set at build time.
const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Backend base URL, configurable through the build environment.
pub fn api_base_url() -> String {
    option_env!("BIBLIO_API_URL")
        .unwrap_or(DEFAULT_API_URL)
        .trim_end_matches('/')
        .to_string()
}

// =========================================================
// Errors
// =========================================================

/// Client-side error taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request could not be built or never produced a response.
    Network(String),
    /// The response body could not be decoded.
    Decode(String),
    /// The backend rejected the token. The session has already been cleared
    /// by the time the caller sees this.
    Unauthorized,
    /// Any other non-2xx response, with the backend's `detail` message when
    /// it provided one.
    Status { status: u16, detail: Option<String> },
}

impl ApiError {
    /// The backend's `detail` message when present, else the fallback copy.
    pub fn detail_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {}", msg),
            ApiError::Decode(msg) => write!(f, "malformed response: {}", msg),
            ApiError::Unauthorized => write!(f, "session expired"),
            ApiError::Status {
                status,
                detail: Some(detail),
            } => write!(f, "request failed ({}): {}", status, detail),
            ApiError::Status {
                status,
                detail: None,
            } => write!(f, "request failed ({})", status),
        }
    }
}

impl std::error::Error for ApiError {}

/// Extract the `detail` field from a FastAPI-style error body.
///
/// Validation errors ship a `detail` array instead of a string; those fall
/// back to `None` and the views render their generic copy.
fn error_detail(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|body| body.detail)
}

// =========================================================
// URL & body helpers
// =========================================================

/// Join a base URL and a path without doubling the slash.
fn join_url(base_url: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", base_url, path)
    } else {
        format!("{}/{}", base_url, path)
    }
}

/// Percent-encode one `application/x-www-form-urlencoded` value.
fn form_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Form-encoded body of the `/token` exchange.
fn login_form_body(username: &str, password: &str) -> String {
    format!(
        "username={}&password={}",
        form_encode(username),
        form_encode(password)
    )
}

// =========================================================
// Client
// =========================================================

/// HTTP client bound to the current session.
///
/// Cheap to clone; views pull a clone out of the auth state before spawning
/// a request.
#[derive(Clone)]
pub struct LibraryApi {
    base_url: String,
    token: Option<String>,
    /// Written on 401 so every call site observes the session reset.
    set_auth: WriteSignal<AuthState>,
}

impl PartialEq for LibraryApi {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url && self.token == other.token
    }
}

impl LibraryApi {
    pub fn new(base_url: String, token: Option<String>, set_auth: WriteSignal<AuthState>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            token,
            set_auth,
        }
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// Start a request, stamping the bearer token when one exists.
    fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = RequestBuilder::new(&self.url(path)).method(method);
        if let Some(token) = &self.token {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }
        builder
    }

    /// Send a request and apply the global status policy.
    async fn send(&self, request: gloo_net::http::Request) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.status() == 401 {
            // Global side effect: wipe the session before the caller even
            // sees the error. The router reacts to the signal change.
            web_sys::console::log_1(&"[api] 401 received, clearing session".into());
            SessionStorage::clear();
            self.set_auth.update(|state| *state = AuthState::signed_out());
            return Err(ApiError::Unauthorized);
        }

        if !response.ok() {
            let status = response.status();
            let detail = response
                .text()
                .await
                .ok()
                .and_then(|body| error_detail(&body));
            return Err(ApiError::Status { status, detail });
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let mut builder = self.builder(Method::GET, path);
        if !query.is_empty() {
            builder = builder.query(query.iter().map(|(key, value)| (*key, value.as_str())));
        }
        let request = builder
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let response = self.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self
            .builder(method, path)
            .json(body)
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let response = self.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    // --- Authentication ---

    /// Exchange credentials for a bearer token. The backend expects a
    /// form-encoded body here, unlike every other endpoint.
    pub async fn login(&self, username: &str, password: &str) -> Result<Token, ApiError> {
        let request = self
            .builder(Method::POST, "/token")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(login_form_body(username, password))
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let response = self.send(request).await?;
        response
            .json::<Token>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Create an account. Does not authenticate.
    pub async fn register(&self, payload: &RegisterRequest) -> Result<User, ApiError> {
        self.send_json(Method::POST, "/register", payload).await
    }

    /// The user owning the current token.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get_json("/users/me", &[]).await
    }

    // --- Books ---

    pub async fn list_books(&self, page: Option<Pagination>) -> Result<Vec<Book>, ApiError> {
        let query = page.map(|p| p.query_pairs()).unwrap_or_default();
        self.get_json("/books", &query).await
    }

    pub async fn search_books(
        &self,
        q: &str,
        page: Option<Pagination>,
    ) -> Result<Vec<Book>, ApiError> {
        let mut query = vec![("q", q.to_string())];
        if let Some(page) = page {
            query.extend(page.query_pairs());
        }
        self.get_json("/books/search", &query).await
    }

    pub async fn get_book(&self, id: i64) -> Result<Book, ApiError> {
        self.get_json(&format!("/books/{}", id), &[]).await
    }

    pub async fn create_book(&self, payload: &BookCreate) -> Result<Book, ApiError> {
        self.send_json(Method::POST, "/books", payload).await
    }

    pub async fn update_book(&self, id: i64, payload: &BookUpdate) -> Result<Book, ApiError> {
        self.send_json(Method::PUT, &format!("/books/{}", id), payload)
            .await
    }

    pub async fn delete_book(&self, id: i64) -> Result<(), ApiError> {
        let request = self
            .builder(Method::DELETE, &format!("/books/{}", id))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        // 204: nothing to decode
        self.send(request).await?;
        Ok(())
    }

    // --- Loans ---

    pub async fn create_loan(&self, payload: &LoanCreate) -> Result<Loan, ApiError> {
        self.send_json(Method::POST, "/loans", payload).await
    }

    pub async fn return_loan(&self, id: i64) -> Result<Loan, ApiError> {
        let request = self
            .builder(Method::PATCH, &format!("/loans/{}/return", id))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let response = self.send(request).await?;
        response
            .json::<Loan>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn my_loans(&self, page: Option<Pagination>) -> Result<Vec<Loan>, ApiError> {
        let query = page.map(|p| p.query_pairs()).unwrap_or_default();
        self.get_json("/loans/my-loans", &query).await
    }

    // --- Statistics ---

    pub async fn stats(&self) -> Result<LibraryStats, ApiError> {
        self.get_json("/stats", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_handles_leading_slashes() {
        assert_eq!(
            join_url("http://localhost:8000", "/books"),
            "http://localhost:8000/books"
        );
        assert_eq!(
            join_url("http://localhost:8000", "books"),
            "http://localhost:8000/books"
        );
    }

    #[test]
    fn form_encoding_escapes_reserved_characters() {
        assert_eq!(form_encode("alice"), "alice");
        assert_eq!(form_encode("p@ss&word=1"), "p%40ss%26word%3D1");
        assert_eq!(form_encode("two words"), "two+words");
        assert_eq!(form_encode("caf\u{e9}"), "caf%C3%A9");
    }

    #[test]
    fn login_body_is_form_encoded() {
        assert_eq!(
            login_form_body("alice", "s3cret&more"),
            "username=alice&password=s3cret%26more"
        );
    }

    #[test]
    fn error_detail_reads_string_details_only() {
        assert_eq!(
            error_detail(r#"{"detail": "Book not available"}"#),
            Some("Book not available".to_string())
        );
        // FastAPI validation errors carry an array; views use generic copy
        assert_eq!(error_detail(r#"{"detail": [{"msg": "bad"}]}"#), None);
        assert_eq!(error_detail("not json"), None);
        assert_eq!(error_detail(r#"{"message": "other shape"}"#), None);
    }

    #[test]
    fn detail_or_prefers_the_backend_message() {
        let err = ApiError::Status {
            status: 400,
            detail: Some("ISBN already registered".to_string()),
        };
        assert_eq!(err.detail_or("Could not save"), "ISBN already registered");

        let bare = ApiError::Status {
            status: 500,
            detail: None,
        };
        assert_eq!(bare.detail_or("Could not save"), "Could not save");
        assert_eq!(
            ApiError::Network("timeout".into()).detail_or("Could not save"),
            "Could not save"
        );
        assert_eq!(
            ApiError::Unauthorized.detail_or("Could not save"),
            "Could not save"
        );
    }

    #[test]
    fn display_includes_status_and_detail() {
        let err = ApiError::Status {
            status: 409,
            detail: Some("duplicate".to_string()),
        };
        assert_eq!(err.to_string(), "request failed (409): duplicate");
        assert_eq!(ApiError::Unauthorized.to_string(), "session expired");
    }

    #[test]
    fn base_url_has_no_trailing_slash() {
        assert!(!api_base_url().ends_with('/'));
    }
}
