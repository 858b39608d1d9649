//! Backend configuration resolved at build time.
//!
//! SYSTEM CONTEXT
//! ==============
//! The app is a static WASM bundle, so the Supabase project URL and anon key
//! are baked in when the bundle is compiled. Table and bucket names are fixed
//! by the hosted schema.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_LISTINGS_TABLE: &str = "carros";
pub const DEFAULT_IMAGES_BUCKET: &str = "car";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    Missing(&'static str),
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
    pub table: String,
    pub bucket: String,
}

impl SupabaseConfig {
    /// Build config from the values compiled into the bundle.
    ///
    /// Required:
    /// - `SUPABASE_URL`
    /// - `SUPABASE_ANON_KEY`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a value is missing or the URL is not http(s).
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match key {
            "SUPABASE_URL" => option_env!("SUPABASE_URL").map(str::to_owned),
            "SUPABASE_ANON_KEY" => option_env!("SUPABASE_ANON_KEY").map(str::to_owned),
            _ => None,
        })
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a value is missing or the URL is not http(s).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = required(&lookup, "SUPABASE_URL")?;
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::Invalid { var: "SUPABASE_URL", reason: format!("expected http(s) URL, got '{url}'") });
        }
        let anon_key = required(&lookup, "SUPABASE_ANON_KEY")?;

        Ok(Self {
            url: url.trim_end_matches('/').to_owned(),
            anon_key,
            table: DEFAULT_LISTINGS_TABLE.to_owned(),
            bucket: DEFAULT_IMAGES_BUCKET.to_owned(),
        })
    }
}

fn required<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(var))
}
