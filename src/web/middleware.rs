//! Session and anti-forgery layer.
//!
//! Runs before every handler. It resolves the session from its cookie (or
//! starts one), rejects state-changing requests whose CSRF token does not
//! belong to that session, and hands the session to the handler through the
//! request extensions.

use super::error::AppError;
use super::AppState;
use crate::libs::csrf::{self, CSRF_FORM_FIELD, CSRF_HEADER_NAME};
use crate::libs::messages::Message;
use crate::libs::session::Session;
use crate::{msg_debug, msg_warning};
use axum::body::{self, Body};
use axum::extract::{Request, State};
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, Method};
use axum::middleware::Next;
use axum::response::Response;
use cookie::{Cookie, SameSite};

/// Upper bound for buffered form bodies, the same as axum's default body
/// limit for `Form`.
pub const MAX_FORM_BYTES: usize = 2 * 1024 * 1024;

pub async fn session_layer(State(state): State<AppState>, request: Request, next: Next) -> Result<Response, AppError> {
    let cookie_name = &state.session_config.cookie_name;
    let cookie_id = session_cookie(request.headers(), cookie_name);
    let (session, created) = state.sessions.load_or_create(cookie_id.as_deref());
    if created {
        msg_debug!(Message::SessionStarted);
    }

    let mut request = if is_safe(request.method()) {
        request
    } else {
        verify_csrf(&session, request).await?
    };
    request.extensions_mut().insert(session.clone());

    let mut response = next.run(request).await;
    if created {
        let cookie = Cookie::build((cookie_name.clone(), session.id().to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(state.session_config.cookie_secure)
            .build();
        let value = HeaderValue::from_str(&cookie.to_string()).map_err(|e| AppError::Internal(e.into()))?;
        response.headers_mut().append(SET_COOKIE, value);
    }

    Ok(response)
}

fn is_safe(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE)
}

/// Value of the session cookie, if the request carries one.
pub fn session_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
}

/// Checks the token from the `X-CSRFToken` header or, failing that, from the
/// [`CSRF_FORM_FIELD`] field of a urlencoded body. The body is buffered and
/// put back so the handler can still read it.
async fn verify_csrf(session: &Session, request: Request) -> Result<Request, AppError> {
    let secret = session.csrf_secret().unwrap_or_default();
    let path = request.uri().path().to_string();

    if let Some(token) = request.headers().get(CSRF_HEADER_NAME).and_then(|v| v.to_str().ok()) {
        return match csrf::check_token(Some(token), &secret) {
            Ok(()) => Ok(request),
            Err(reject) => reject_request(&path, reject),
        };
    }

    let is_form = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"));
    if !is_form {
        return reject_request(&path, csrf::RejectRequest::new(csrf::REASON_CSRF_TOKEN_MISSING));
    }

    let (parts, body) = request.into_parts();
    let bytes = body::to_bytes(body, MAX_FORM_BYTES).await.map_err(|e| AppError::BadRequest(e.to_string()))?;
    let token = form_token(&bytes);

    match csrf::check_token(token.as_deref(), &secret) {
        Ok(()) => Ok(Request::from_parts(parts, Body::from(bytes))),
        Err(reject) => reject_request(&path, reject),
    }
}

/// The CSRF field of a urlencoded body, if present and parseable.
fn form_token(body: &[u8]) -> Option<String> {
    serde_urlencoded::from_bytes::<Vec<(String, String)>>(body)
        .ok()?
        .into_iter()
        .find(|(name, _)| name == CSRF_FORM_FIELD)
        .map(|(_, value)| value)
}

fn reject_request(path: &str, reject: csrf::RejectRequest) -> Result<Request, AppError> {
    msg_warning!(Message::CsrfRejected {
        path: path.to_string(),
        reason: reject.reason.to_string(),
    });
    Err(AppError::Forbidden(reject.reason.to_string()))
}
