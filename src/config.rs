use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub session_db_path: String,
    pub genai_api_url: String,
    pub genai_api_key: Option<String>,
    pub genai_model: String,
    pub sim_bid_interval_ms: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let session_db_path = env_map
            .get("SESSION_DB_PATH")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("SESSION_DB_PATH".to_string()))?;

        let genai_api_url = env_map
            .get("GENAI_API_URL")
            .cloned()
            .unwrap_or_else(|| "https://generativelanguage.googleapis.com".to_string());

        // Optional: without a key the portal falls back to canned text.
        let genai_api_key = env_map.get("GENAI_API_KEY").cloned().filter(|k| !k.is_empty());

        let genai_model = env_map
            .get("GENAI_MODEL")
            .cloned()
            .unwrap_or_else(|| "gemini-3-flash-preview".to_string());

        let sim_bid_interval_ms = env_map
            .get("SIM_BID_INTERVAL_MS")
            .map(|s| s.as_str())
            .unwrap_or("15000")
            .parse::<u64>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "SIM_BID_INTERVAL_MS".to_string(),
                    "must be a valid u64".to_string(),
                )
            })?;

        Ok(Config {
            port,
            session_db_path,
            genai_api_url,
            genai_api_key,
            genai_model,
            sim_bid_interval_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_required_env() -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert(
            "SESSION_DB_PATH".to_string(),
            "/tmp/session.db".to_string(),
        );
        map
    }

    #[test]
    fn test_missing_session_db_path() {
        let result = Config::from_env_map(HashMap::new());
        match result {
            Err(ConfigError::MissingEnv(s)) => assert_eq!(s, "SESSION_DB_PATH"),
            _ => panic!("Expected MissingEnv error"),
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_env_map(setup_required_env()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.genai_model, "gemini-3-flash-preview");
        assert_eq!(config.sim_bid_interval_ms, 15000);
        assert!(config.genai_api_key.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let mut env_map = setup_required_env();
        env_map.insert("PORT".to_string(), "not_a_number".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "PORT"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_empty_api_key_treated_as_absent() {
        let mut env_map = setup_required_env();
        env_map.insert("GENAI_API_KEY".to_string(), "".to_string());
        let config = Config::from_env_map(env_map).unwrap();
        assert!(config.genai_api_key.is_none());
    }

    #[test]
    fn test_invalid_sim_interval() {
        let mut env_map = setup_required_env();
        env_map.insert("SIM_BID_INTERVAL_MS".to_string(), "fast".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "SIM_BID_INTERVAL_MS"),
            _ => panic!("Expected InvalidValue error"),
        }
    }
}
