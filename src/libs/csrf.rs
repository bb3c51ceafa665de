//! CSRF (Cross-Site Request Forgery) protection.
//!
//! Each session owns a random secret. Pages embed a token derived from the
//! secret: a random mask followed by the secret shifted by that mask, so the
//! token differs on every render while always unmasking to the same secret.
//! A state-changing request is accepted only when its token unmasks to the
//! secret of the session it arrives with.

use rand::distr::Alphanumeric;
use rand::Rng;
use thiserror::Error;

/// CSRF token length (64 characters)
pub const CSRF_TOKEN_LENGTH: usize = 64;

/// CSRF secret length (32 characters)
pub const CSRF_SECRET_LENGTH: usize = 32;

/// Allowed characters for CSRF tokens (alphanumeric)
pub const CSRF_ALLOWED_CHARS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Form field carrying the token.
pub const CSRF_FORM_FIELD: &str = "csrf_token";

/// Header carrying the token for non-form clients.
pub const CSRF_HEADER_NAME: &str = "x-csrftoken";

pub const REASON_CSRF_TOKEN_MISSING: &str = "CSRF token missing.";
pub const REASON_INCORRECT_LENGTH: &str = "CSRF token has incorrect length.";
pub const REASON_INVALID_CHARACTERS: &str = "CSRF token has invalid characters.";
pub const REASON_MISMATCH: &str = "CSRF token does not match the session.";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{reason}")]
pub struct RejectRequest {
    pub reason: &'static str,
}

impl RejectRequest {
    pub const fn new(reason: &'static str) -> Self {
        RejectRequest { reason }
    }
}

/// Random alphanumeric string of `len` characters.
pub fn random_string(len: usize) -> String {
    rand::rng().sample_iter(&Alphanumeric).take(len).map(char::from).collect()
}

/// Generates a new session secret.
pub fn new_secret() -> String {
    random_string(CSRF_SECRET_LENGTH)
}

fn char_index(c: char) -> Option<usize> {
    CSRF_ALLOWED_CHARS.find(c)
}

fn char_at(idx: usize) -> char {
    CSRF_ALLOWED_CHARS.as_bytes()[idx % CSRF_ALLOWED_CHARS.len()] as char
}

/// Masks a secret into a fresh token.
pub fn mask_secret(secret: &str) -> String {
    let mask = new_secret();
    let masked: String = secret
        .chars()
        .zip(mask.chars())
        .map(|(s, m)| char_at(char_index(s).unwrap_or(0) + char_index(m).unwrap_or(0)))
        .collect();

    format!("{}{}", mask, masked)
}

/// Recovers the secret from a token. The token must have passed
/// [`check_token_format`].
fn unmask_token(token: &str) -> String {
    let (mask, masked) = token.split_at(CSRF_SECRET_LENGTH);
    let len = CSRF_ALLOWED_CHARS.len();

    mask.chars()
        .zip(masked.chars())
        .map(|(m, c)| char_at(char_index(c).unwrap_or(0) + len - char_index(m).unwrap_or(0)))
        .collect()
}

pub fn check_token_format(token: &str) -> Result<(), RejectRequest> {
    if token.len() != CSRF_TOKEN_LENGTH {
        return Err(RejectRequest::new(REASON_INCORRECT_LENGTH));
    }
    if !token.chars().all(|c| CSRF_ALLOWED_CHARS.contains(c)) {
        return Err(RejectRequest::new(REASON_INVALID_CHARACTERS));
    }
    Ok(())
}

/// Compares without short-circuiting on the first differing byte.
fn constant_time_eq(a: &str, b: &str) -> bool {
    a.len() == b.len() && a.bytes().zip(b.bytes()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Validates a submitted token against the session secret.
pub fn check_token(request_token: Option<&str>, secret: &str) -> Result<(), RejectRequest> {
    let token = request_token.filter(|t| !t.is_empty()).ok_or(RejectRequest::new(REASON_CSRF_TOKEN_MISSING))?;
    check_token_format(token)?;

    if !constant_time_eq(&unmask_token(token), secret) {
        return Err(RejectRequest::new(REASON_MISMATCH));
    }
    Ok(())
}
