pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid criteria: {message}")]
	InvalidCriteria { message: String },
	#[error("Search was cancelled.")]
	Cancelled,
	#[error("Index error: {message}")]
	Index { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}

impl From<catalog_storage::Error> for Error {
	fn from(err: catalog_storage::Error) -> Self {
		match err {
			catalog_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			catalog_storage::Error::InvalidArgument(message) => Self::InvalidCriteria { message },
		}
	}
}

impl From<catalog_domain::CriteriaViolation> for Error {
	fn from(violation: catalog_domain::CriteriaViolation) -> Self {
		Self::InvalidCriteria { message: violation.message().to_string() }
	}
}
