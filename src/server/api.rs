//! JSON API handlers
use super::AppState;
use crate::auth::{AdminToken, Auth, MaybeAdmin};
use crate::model::de;
use crate::store::{
    BlogInput, BlogPatch, BlogRecord, ListQuery, Pagination, StoreError, ValidationError,
};
use crate::upload::UploadError;
use axum::body::Bytes;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, Path, Query, Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use displaydoc::Display;
use log::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::instrument;

/// The response body of every API call
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
            pagination: None,
        })
    }
}

impl Envelope<()> {
    pub fn error(message: String) -> Json<Self> {
        Json(Self {
            success: false,
            data: None,
            error: Some(message),
            pagination: None,
        })
    }
}

/// A failed API call; the message is shown to the client
#[derive(Debug, Error, Display)]
pub enum ApiError {
    /// Username and password are required
    MissingCredentials,
    /// Invalid credentials
    InvalidCredentials,
    /// Blog not found
    NotFound,
    /// {0}
    BadRequest(String),
    /// {0}
    Store(#[from] StoreError),
    /// {0}
    Upload(#[from] UploadError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingCredentials | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Store(StoreError::Invalid(_)) | Self::Store(StoreError::DuplicateSlug(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upload(e) if e.is_rejection() => StatusCode::BAD_REQUEST,
            Self::Upload(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{}", self);
        }
        (status, Envelope::error(self.to_string())).into_response()
    }
}

pub type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

/// A JSON body that may carry a document tree
///
/// Unlike [`Json`] this accepts trees nested past serde_json's default
/// limit of 128 levels, up to [`de::MAX_NESTING`].
#[derive(Debug)]
pub struct TreeJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for TreeJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        if de::nesting_depth(&bytes) > de::MAX_NESTING {
            return Err(StoreError::Invalid(ValidationError::ContentTooDeep).into());
        }
        de::from_slice_deep(&bytes)
            .map(TreeJson)
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginData {
    pub token: String,
    pub username: String,
}

/// `POST /api/admin/auth`
#[instrument(skip_all)]
pub async fn login(
    State(auth): State<Arc<Auth>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginData> {
    let Json(login) = body?;
    if login.username.is_empty() || login.password.is_empty() {
        return Err(ApiError::MissingCredentials);
    }
    if !auth.verify_credentials(&login.username, &login.password) {
        warn!("Failed login for {:?}", login.username);
        return Err(ApiError::InvalidCredentials);
    }
    info!("Admin {} logged in", login.username);
    Ok(Envelope::ok(LoginData {
        token: auth.issue(&login.username),
        username: login.username,
    }))
}

/// `GET /api/blogs`
#[instrument(skip_all)]
pub async fn list_blogs(
    State(state): State<AppState>,
    MaybeAdmin(admin): MaybeAdmin,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Vec<BlogRecord>> {
    let Query(mut query) = query?;
    query.include_unpublished &= admin.is_some();
    let page = state.store.list(&query).await;
    let mut envelope = Envelope::ok(page.blogs);
    envelope.pagination = Some(page.pagination);
    Ok(envelope)
}

/// `POST /api/blogs`
#[instrument(skip_all)]
pub async fn create_blog(
    _admin: AdminToken,
    State(state): State<AppState>,
    TreeJson(input): TreeJson<BlogInput>,
) -> Result<(StatusCode, Json<Envelope<BlogRecord>>), ApiError> {
    let record = state.store.create(input).await?;
    Ok((StatusCode::CREATED, Envelope::ok(record)))
}

/// `GET /api/blogs/:id`
pub async fn get_blog(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<BlogRecord> {
    let record = state.store.get(&id).await.ok_or(ApiError::NotFound)?;
    Ok(Envelope::ok(record))
}

/// `PUT /api/blogs/:id`
#[instrument(skip(_admin, state, patch))]
pub async fn update_blog(
    _admin: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<String>,
    TreeJson(patch): TreeJson<BlogPatch>,
) -> ApiResult<BlogRecord> {
    let record = state.store.update(&id, patch).await?;
    Ok(Envelope::ok(record))
}

/// `DELETE /api/blogs/:id`
#[instrument(skip(_admin, state))]
pub async fn delete_blog(
    _admin: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<BlogRecord> {
    let record = state.store.delete(&id).await?;
    Ok(Envelope::ok(record))
}

/// `GET /api/blogs/slug/:slug`, published posts only
pub async fn get_blog_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<BlogRecord> {
    match state.store.get_by_slug(&slug).await {
        Some(record) if record.published => Ok(Envelope::ok(record)),
        _ => Err(ApiError::NotFound),
    }
}
