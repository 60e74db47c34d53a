//! Process configuration from environment variables

use std::fmt;

use crate::bot::BotConfig;
use crate::category::CategorySet;
use crate::error::ConfigError;

pub const BOT_TOKEN_ENV: &str = "DISCORD_BOT_TOKEN";
pub const CHANNEL_ID_ENV: &str = "DISCORD_CHANNEL_ID";
pub const BOT_USER_ID_ENV: &str = "PESA_BOT_USER_ID";
/// Comma-separated category list replacing the defaults
pub const CATEGORIES_ENV: &str = "PESA_CATEGORIES";

#[derive(Clone)]
pub struct Config {
    /// Chat transport credential, handed to the transport adapter
    pub bot_token: String,
    pub channel_id: String,
    pub bot_user_id: Option<String>,
    pub categories: CategorySet,
}

impl Config {
    /// Load from the process environment
    ///
    /// `DISCORD_BOT_TOKEN` and `DISCORD_CHANNEL_ID` are required; empty
    /// values count as missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bot_token = var(BOT_TOKEN_ENV).ok_or(ConfigError::Missing(BOT_TOKEN_ENV))?;
        let channel_id = var(CHANNEL_ID_ENV).ok_or(ConfigError::Missing(CHANNEL_ID_ENV))?;
        let categories = var(CATEGORIES_ENV)
            .and_then(|list| CategorySet::parse_list(&list))
            .unwrap_or_default();

        Ok(Self {
            bot_token,
            channel_id: channel_id.trim().to_string(),
            bot_user_id: var(BOT_USER_ID_ENV).map(|id| id.trim().to_string()),
            categories,
        })
    }

    pub fn bot_config(&self) -> BotConfig {
        BotConfig {
            channel_id: self.channel_id.clone(),
            bot_user_id: self.bot_user_id.clone(),
            categories: self.categories.clone(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"[redacted]")
            .field("channel_id", &self.channel_id)
            .field("bot_user_id", &self.bot_user_id)
            .field("categories", &self.categories)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_required_variables() {
        assert_eq!(load(&[]).unwrap_err(), ConfigError::Missing(BOT_TOKEN_ENV));
        assert_eq!(
            load(&[(BOT_TOKEN_ENV, "secret")]).unwrap_err(),
            ConfigError::Missing(CHANNEL_ID_ENV)
        );
        assert_eq!(
            load(&[(BOT_TOKEN_ENV, ""), (CHANNEL_ID_ENV, "123")]).unwrap_err(),
            ConfigError::Missing(BOT_TOKEN_ENV)
        );
        assert_eq!(
            ConfigError::Missing(CHANNEL_ID_ENV).to_string(),
            "DISCORD_CHANNEL_ID is not set"
        );
    }

    #[test]
    fn test_defaults() {
        let config = load(&[(BOT_TOKEN_ENV, "secret"), (CHANNEL_ID_ENV, "123")]).unwrap();
        assert_eq!(config.channel_id, "123");
        assert_eq!(config.bot_user_id, None);
        assert_eq!(config.categories, CategorySet::default());
    }

    #[test]
    fn test_optional_overrides() {
        let config = load(&[
            (BOT_TOKEN_ENV, "secret"),
            (CHANNEL_ID_ENV, "123"),
            (BOT_USER_ID_ENV, "999"),
            (CATEGORIES_ENV, "Rent, fees"),
        ])
        .unwrap();
        assert_eq!(config.bot_user_id.as_deref(), Some("999"));
        assert!(config.categories.is_valid("rent"));
        assert!(!config.categories.is_valid("food"));

        let bot = config.bot_config();
        assert_eq!(bot.channel_id, "123");
        assert_eq!(bot.categories.len(), 2);
    }

    #[test]
    fn test_blank_category_list_keeps_defaults() {
        let config = load(&[
            (BOT_TOKEN_ENV, "secret"),
            (CHANNEL_ID_ENV, "123"),
            (CATEGORIES_ENV, " , "),
        ])
        .unwrap();
        assert_eq!(config.categories, CategorySet::default());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = load(&[(BOT_TOKEN_ENV, "secret"), (CHANNEL_ID_ENV, "123")]).unwrap();
        assert!(!format!("{:?}", config).contains("secret"));
    }
}
