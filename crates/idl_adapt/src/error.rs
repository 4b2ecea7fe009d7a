use std::path::PathBuf;

/// Errors produced while adapting an IDL.
#[derive(Debug, thiserror::Error)]
pub enum AdaptError {
	#[error("IO error at {path}: {source}")]
	Io {
		path: PathBuf,
		source: std::io::Error,
	},

	#[error("Failed to parse JSON in {path}: {source}")]
	Json {
		path: PathBuf,
		source: serde_json::Error,
	},

	#[error("Invalid config field `{field}`: {reason}")]
	InvalidConfig { field: String, reason: String },

	#[error("Unknown IDL generator `{origin}` (expected `anchor` or `shank`)")]
	UnknownGenerator { origin: String },

	#[error("Instruction `{name}` not found in the IDL")]
	UnknownInstruction { name: String },

	#[error("Failed to serialize IDL: {0}")]
	Serialize(#[from] serde_json::Error),
}

impl AdaptError {
	pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Self::Io {
			path: path.into(),
			source,
		}
	}

	pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
		Self::Json {
			path: path.into(),
			source,
		}
	}

	pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
		Self::InvalidConfig {
			field: field.into(),
			reason: reason.into(),
		}
	}
}

/// Errors raised while evaluating compiled account metas against the
/// accounts a caller supplied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountMetasError {
	#[error("Required account `{account}` was not supplied and has no default address")]
	MissingRequiredAccount { account: String },

	#[error(
		"Optional account `{account}` was supplied but the earlier optional accounts {} were not",
		.missing.join(", ")
	)]
	OptionalAccountOrder {
		account: String,
		missing: Vec<String>,
	},
}
