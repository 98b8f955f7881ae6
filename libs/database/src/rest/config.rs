#[cfg(feature = "config")]
use core_config::{env_or_default, env_parse, env_required, ConfigError, FromEnv};

/// Connection settings for a hosted PostgREST endpoint
#[derive(Clone, Debug)]
pub struct RestConfig {
    /// Project URL, e.g. `https://abc.supabase.co`
    pub url: String,
    /// API key sent as both `apikey` and bearer token
    pub api_key: String,
    /// Schema selected through `Accept-Profile`
    pub schema: String,
    pub timeout_secs: u64,
}

impl RestConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            schema: "public".to_string(),
            timeout_secs: 10,
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    /// Base URL of the REST interface, without a trailing slash
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.url.trim_end_matches('/'))
    }
}

/// Environment variables:
/// - `SUPABASE_URL` (required)
/// - `SUPABASE_KEY` (required)
/// - `SUPABASE_SCHEMA` (default: public)
/// - `SUPABASE_TIMEOUT_SECS` (default: 10)
#[cfg(feature = "config")]
impl FromEnv for RestConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env_required("SUPABASE_URL")?,
            api_key: env_required("SUPABASE_KEY")?,
            schema: env_or_default("SUPABASE_SCHEMA", "public"),
            timeout_secs: env_parse("SUPABASE_TIMEOUT_SECS", "10")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_url_strips_trailing_slash() {
        let config = RestConfig::new("https://abc.supabase.co/", "key");
        assert_eq!(config.rest_url(), "https://abc.supabase.co/rest/v1");
        assert_eq!(config.schema, "public");
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_rest_config_from_env() {
        temp_env::with_vars(
            [
                ("SUPABASE_URL", Some("https://abc.supabase.co")),
                ("SUPABASE_KEY", Some("anon")),
                ("SUPABASE_SCHEMA", Some("catalog")),
                ("SUPABASE_TIMEOUT_SECS", None),
            ],
            || {
                let config = RestConfig::from_env().unwrap();
                assert_eq!(config.api_key, "anon");
                assert_eq!(config.schema, "catalog");
                assert_eq!(config.timeout_secs, 10);
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_rest_config_requires_key() {
        temp_env::with_vars(
            [
                ("SUPABASE_URL", Some("https://abc.supabase.co")),
                ("SUPABASE_KEY", None),
            ],
            || {
                let err = RestConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("SUPABASE_KEY"));
            },
        );
    }
}
