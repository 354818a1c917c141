pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Request to {endpoint} failed.")]
	Request { endpoint: String, source: reqwest::Error },
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
	#[error("Default header {name} is not a valid header.")]
	InvalidHeader { name: String },
	#[error("{message}")]
	InvalidConfig { message: String },
	#[error("{message}")]
	InvalidResponse { message: String },
}
impl Error {
	pub(crate) fn invalid_response(message: impl Into<String>) -> Self {
		Self::InvalidResponse { message: message.into() }
	}
}
