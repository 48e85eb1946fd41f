use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
	pub server_host: String,
	pub port: u16,
	pub data_dir: PathBuf,
	pub providers_file: String,
	pub receivers_file: String,
	pub listings_file: String,
	pub claims_file: String,
}

impl Config {
	pub fn from_env() -> Result<Self, ConfigError> {
		// Load .env file if it exists
		let _ = dotenvy::dotenv();

		Self::from_lookup(|key| env::var(key).ok())
	}

	/// Builds the configuration from an arbitrary key lookup.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

		Ok(Self {
			server_host: var("SERVER_HOST", "0.0.0.0"),
			port: var("PORT", "8501")
				.parse()
				.map_err(|_| ConfigError::InvalidPort)?,
			data_dir: PathBuf::from(var("DATA_DIR", "data")),
			providers_file: var("PROVIDERS_FILE", "providers_data.csv"),
			receivers_file: var("RECEIVERS_FILE", "receivers_data.csv"),
			listings_file: var("LISTINGS_FILE", "food_listings_data.csv"),
			claims_file: var("CLAIMS_FILE", "claims_data.csv"),
		})
	}

	pub fn server_addr(&self) -> String {
		format!("{}:{}", self.server_host, self.port)
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("Invalid port number")]
	InvalidPort,
}
