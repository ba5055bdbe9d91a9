//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use serde_json::json;

use crate::inbound::http::configure_api;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::MemoryStore;

/// Password used by [`signed_in`] for every fixture account.
pub const TEST_PASSWORD: &str = "correct horse";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by `response`.
pub fn session_cookie(response: &ServiceResponse) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}

/// Handler state over a fresh in-memory store.
pub fn memory_state() -> HttpState {
    let store = Arc::new(MemoryStore::new());
    HttpState::from_repositories(store.clone(), store.clone(), store)
}

/// The full `/api/v1` surface over `state`.
pub fn api_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .service(web::scope("/api/v1").configure(configure_api))
}

/// Register `email` and sign in, returning the session cookie.
pub async fn signed_in(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    email: &str,
) -> Cookie<'static> {
    let register = test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({ "email": email, "password": TEST_PASSWORD, "name": "Cook" }))
        .to_request();
    let response = test::call_service(app, register).await;
    assert!(response.status().is_success(), "register {email}");

    let login = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "email": email, "password": TEST_PASSWORD }))
        .to_request();
    let response = test::call_service(app, login).await;
    assert!(response.status().is_success(), "login {email}");
    session_cookie(&response)
}
