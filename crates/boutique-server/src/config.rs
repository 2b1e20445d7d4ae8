use std::env;

/// Server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub admin_token: String,
}

impl Config {
    /// `BOUTIQUE_ADMIN_TOKEN` has no default: admin registration is gated
    /// on it, and a well-known fallback would make the gate decorative.
    pub fn from_env() -> eyre::Result<Config> {
        let bind_addr =
            env::var("BOUTIQUE_BIND").unwrap_or_else(|_| "0.0.0.0:5000".to_string());
        let admin_token = env::var("BOUTIQUE_ADMIN_TOKEN")
            .map_err(|_| eyre::eyre!("BOUTIQUE_ADMIN_TOKEN must be set"))?;
        if admin_token.is_empty() {
            return Err(eyre::eyre!("BOUTIQUE_ADMIN_TOKEN must not be empty"));
        }
        Ok(Config {
            bind_addr,
            admin_token,
        })
    }
}
