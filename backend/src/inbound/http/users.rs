//! Identity HTTP handlers.
//!
//! ```text
//! POST /api/v1/users {"email":"cook@example.com","password":"secret","name":"Cook"}
//! POST /api/v1/login {"email":"cook@example.com","password":"secret"}
//! GET /api/v1/users/me
//! PATCH /api/v1/users/me {"name":"Head cook"}
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{RegisterUserRequest, UpdateProfileRequest};
use crate::domain::{
    Email, Error, LoginCredentials, LoginValidationError, Password, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    ErrorCode, field_error, missing_field_error, password_error, user_error,
};

/// Registration body for `POST /api/v1/users`.
///
/// Example JSON:
/// `{"email":"cook@example.com","password":"secret","name":"Cook"}`
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "cook@example.com")]
    pub email: Option<String>,
    #[schema(example = "secret")]
    pub password: Option<String>,
    #[schema(example = "Cook")]
    pub name: Option<String>,
}

impl TryFrom<RegisterRequest> for RegisterUserRequest {
    type Error = Error;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        let email = value.email.ok_or_else(|| missing_field_error("email"))?;
        let password = value
            .password
            .ok_or_else(|| missing_field_error("password"))?;
        Ok(Self {
            email: Email::new(email).map_err(user_error)?,
            password: Password::new(&password).map_err(password_error)?,
            name: value.name.unwrap_or_default(),
        })
    }
}

/// Login body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "cook@example.com")]
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::Email(inner) => user_error(inner),
        LoginValidationError::EmptyPassword => {
            field_error("password", ErrorCode::EmptyValue, err)
        }
    }
}

/// Profile changes for `PATCH /api/v1/users/me`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileBody {
    #[schema(example = "Head cook")]
    pub name: Option<String>,
    pub password: Option<String>,
}

impl TryFrom<UpdateProfileBody> for UpdateProfileRequest {
    type Error = Error;

    fn try_from(value: UpdateProfileBody) -> Result<Self, Self::Error> {
        let password = value
            .password
            .map(|raw| Password::new(&raw).map_err(password_error))
            .transpose()?;
        Ok(Self {
            name: value.name,
            password,
        })
    }
}

/// Register a new identity.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registered user", body = User),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let request = RegisterUserRequest::try_from(payload.into_inner())?;
    let user = state.accounts.register(request).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 403, description = "Account inactive", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Return the signed-in identity.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<User>> {
    let user_id = session.require_user_id()?;
    let user = state.profile.profile(&user_id).await?;
    Ok(web::Json(user))
}

/// Change the signed-in identity's name or password.
#[utoipa::path(
    patch,
    path = "/api/v1/users/me",
    request_body = UpdateProfileBody,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateCurrentUser"
)]
#[patch("/users/me")]
pub async fn update_current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UpdateProfileBody>,
) -> ApiResult<web::Json<User>> {
    let user_id = session.require_user_id()?;
    let request = UpdateProfileRequest::try_from(payload.into_inner())?;
    let user = state.accounts.update_profile(&user_id, request).await?;
    Ok(web::Json(user))
}
