#![allow(dead_code)]

use axum::body::{self, Body};
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION};
use axum::http::{Request, StatusCode};
use axum::Router;
use taskdir::db::db::Store;
use taskdir::libs::config::SessionConfig;
use taskdir::libs::csrf::CSRF_FORM_FIELD;
use taskdir::libs::session::Session;
use taskdir::web::{router, AppState};
use tempfile::TempDir;
use test_context::AsyncTestContext;
use tower::ServiceExt;

/// A fresh database in a temporary directory plus the application state
/// wired to it.
pub struct AppContext {
    _temp_dir: TempDir,
    pub store: Store,
    pub state: AppState,
}

impl AsyncTestContext for AppContext {
    async fn setup() -> Self {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = Store::new(temp_dir.path().join("taskdir.db"));
        store.init().unwrap();
        let state = AppState::new(store.clone(), SessionConfig::default()).unwrap();

        AppContext {
            _temp_dir: temp_dir,
            store,
            state,
        }
    }

    async fn teardown(self) {
        // TempDir removes the database on drop
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl AppContext {
    pub fn app(&self) -> Router {
        router(self.state.clone())
    }

    /// Starts a session the way the first page view would.
    pub fn session(&self) -> Session {
        self.state.sessions.load_or_create(None).0
    }

    fn cookie(&self, session: &Session) -> String {
        format!("{}={}", self.state.session_config.cookie_name, session.id())
    }

    pub async fn get(&self, session: &Session, uri: &str) -> TestResponse {
        let request = Request::get(uri).header(COOKIE, self.cookie(session)).body(Body::empty()).unwrap();
        self.send(request).await
    }

    /// Posts a urlencoded form with a valid CSRF token for `session`.
    pub async fn post(&self, session: &Session, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let token = session.csrf_token();
        let mut fields = fields.to_vec();
        fields.push((CSRF_FORM_FIELD, token.as_str()));
        self.post_raw(session, uri, &fields).await
    }

    /// Posts exactly `fields`, without adding a token.
    pub async fn post_raw(&self, session: &Session, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = serde_urlencoded::to_string(fields).unwrap();
        let request = Request::post(uri)
            .header(COOKIE, self.cookie(session))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app().oneshot(request).await.unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();

        TestResponse {
            status,
            location,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}

impl TestResponse {
    pub fn assert_redirect(&self, to: &str) {
        assert_eq!(self.status, StatusCode::SEE_OTHER, "body: {}", self.body);
        assert_eq!(self.location.as_deref(), Some(to));
    }
}
