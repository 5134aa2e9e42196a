use thiserror::Error;

#[derive(Error, Debug)]
pub enum HuffError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Symbol {0:?} has no entry in the code table")]
	UnknownSymbol(char),

	#[error("Corrupt payload: {0}")]
	CorruptPayload(String),

	#[error("Invalid code table: {0}")]
	InvalidCodeTable(String),

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("Configuration error: {0}")]
	ConfigError(String),
}

pub type Result<T> = std::result::Result<T, HuffError>;
