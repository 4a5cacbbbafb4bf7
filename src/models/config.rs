use serde::Deserialize;

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_uploads_dir() -> String {
    "./uploads".to_string()
}

/// Configuration options for the salon admin server, loaded from
/// `config.yaml` with environment-variable overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Path or URL of the SQLite database.
    pub database_url: String,
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Root directory for uploaded files, served under `/uploads`.
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: String,
}
