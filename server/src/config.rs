use anyhow::{Result, anyhow};

const DEFAULT_API_PREFIX: &str = "/API";

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Path every entity route is mounted under; empty mounts at the root.
    pub api_prefix: String,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_prefix: DEFAULT_API_PREFIX.into(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let api_prefix = normalize_prefix(
            &std::env::var("API_PREFIX").unwrap_or_else(|_| DEFAULT_API_PREFIX.into()),
        )?;

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>();

        Ok(Self {
            api_prefix,
            cors_allowed_origins,
        })
    }
}

fn normalize_prefix(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    if trimmed.contains(['{', '}', '*']) {
        return Err(anyhow!("API_PREFIX must be a literal path, got {raw}"));
    }
    if trimmed.starts_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("/{trimmed}"))
    }
}
