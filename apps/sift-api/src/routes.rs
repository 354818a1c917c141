use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use sift_domain::{InferenceChunk, SearchQuery, SearchRequest, SearchResponse};
use sift_service::{Error, PreprocessOptions};

#[derive(Debug, Deserialize)]
pub struct PreprocessBody {
	#[serde(flatten)]
	pub request: SearchRequest,
	#[serde(default)]
	pub user_email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConsolidateBody {
	pub query: SearchQuery,
	pub chunks: Vec<InferenceChunk>,
	#[serde(default)]
	pub dedupe_docs: bool,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}
impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::InvalidRequest { message } =>
				Self::new(StatusCode::BAD_REQUEST, "invalid_request", message, None),
			Error::Validation(sift_domain::Error::Validation { field, message }) => Self::new(
				StatusCode::UNPROCESSABLE_ENTITY,
				"validation_failed",
				message,
				Some(vec![field.to_string()]),
			),
			Error::NotFound { message } =>
				Self::new(StatusCode::NOT_FOUND, "not_found", message, None),
			Error::Provider { message } =>
				Self::new(StatusCode::BAD_GATEWAY, "provider_error", message, None),
			Error::Coordination { message } =>
				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message, None),
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/search/preprocess", post(preprocess))
		.route("/v1/search/consolidate", post(consolidate))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

// ACL bypass is never reachable from HTTP.
async fn preprocess(
	State(state): State<AppState>,
	Json(payload): Json<PreprocessBody>,
) -> Result<Json<SearchQuery>, ApiError> {
	let PreprocessBody { request, user_email } = payload;
	let query = state
		.service
		.preprocess(&request, user_email.as_deref(), PreprocessOptions::default())
		.await?;

	Ok(Json(query))
}

async fn consolidate(
	State(state): State<AppState>,
	Json(payload): Json<ConsolidateBody>,
) -> Result<Json<SearchResponse>, ApiError> {
	let ConsolidateBody { query, chunks, dedupe_docs } = payload;
	let response = state.service.consolidate(&query, chunks, dedupe_docs).await?;

	Ok(Json(response))
}
