//! Environment-driven configuration.

/// Runtime configuration for the API binary.
pub struct Config {
    pub port: u16,
    /// Bearer token that grants development access (wildcard permission).
    pub anon_key: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: load_port(),
            anon_key: load_anon_key(),
        }
    }
}

fn load_port() -> u16 {
    match std::env::var("FORNO_PORT") {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            tracing::warn!("invalid FORNO_PORT '{raw}': {e}; using 8080");
            8080
        }),
        Err(_) => 8080,
    }
}

fn load_anon_key() -> String {
    std::env::var("FORNO_ANON_KEY").unwrap_or_else(|_| {
        tracing::warn!("FORNO_ANON_KEY not set; using insecure dev default");
        "dev-anon-key".to_string()
    })
}
