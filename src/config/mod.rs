//! Server and provider configuration.
//!
//! Configuration is read once at startup (`.env` loading happens in
//! `main`, before [`ServerConfig::from_env`]) and then carried explicitly:
//! adapters receive credentials from [`ProviderCredentials`] at
//! construction rather than reading process state, so a missing key
//! surfaces as a configuration error on the failing call, not as a panic.

/// Default bind host.
const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port.
const DEFAULT_PORT: u16 = 8000;

/// API keys for the supported providers. `None` means not configured.
#[derive(Debug, Clone, Default)]
pub struct ProviderCredentials {
    pub openai_api_key: Option<String>,
    pub elevenlabs_api_key: Option<String>,
    pub groq_api_key: Option<String>,
}

impl ProviderCredentials {
    /// Read credentials from the process environment. Values are trimmed;
    /// blank values count as absent.
    pub fn from_env() -> Self {
        Self {
            openai_api_key: read_env_key("OPENAI_API_KEY"),
            elevenlabs_api_key: read_env_key("ELEVENLABS_API_KEY"),
            groq_api_key: read_env_key("GROQ_API_KEY"),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub credentials: ProviderCredentials,
}

impl ServerConfig {
    /// Load configuration from environment variables, with defaults.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            host,
            port,
            credentials: ProviderCredentials::from_env(),
        }
    }

    /// The socket address string to bind.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            credentials: ProviderCredentials::default(),
        }
    }
}

fn read_env_key(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
