use crate::knowledge::KnowledgeConfig;
use careerbot_llm_sdk::models;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_PUSHOVER_URL: &str = "https://api.pushover.net/1/messages.json";
pub const DEFAULT_PERSONA_NAME: &str = "Colby Hood";
pub const DEFAULT_DOCS_DIR: &str = "me";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required credential {0}; set it in the environment or the config file")]
    MissingCredential(&'static str),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },

    #[error("Failed to load configuration: {0}")]
    Source(#[from] config::ConfigError),
}

/// Flat view of every recognised key. Environment variables map onto these
/// fields lowercased (`OPENAI_API_KEY` -> `openai_api_key`); a TOML file uses
/// the same lowercase names.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSettings {
    openai_api_key: Option<String>,
    openai_base_url: Option<String>,
    pushover_user: Option<String>,
    pushover_token: Option<String>,
    pushover_url: Option<String>,
    careerbot_name: Option<String>,
    careerbot_docs_dir: Option<PathBuf>,
    careerbot_model: Option<String>,
    careerbot_temperature: Option<f32>,
    careerbot_top_p: Option<f32>,
    careerbot_max_tokens: Option<u32>,
    careerbot_max_tool_rounds: Option<u32>,
    careerbot_request_timeout_secs: Option<u64>,
    careerbot_host: Option<String>,
    careerbot_port: Option<u16>,
}

/// Process-wide configuration, loaded once at startup and passed down explicitly
#[derive(Debug, Clone)]
pub struct Settings {
    pub llm: LlmSettings,
    pub pushover: PushoverSettings,
    pub chat: ChatSettings,
    pub knowledge: KnowledgeConfig,
    pub server: ServerSettings,
}

#[derive(Clone)]
pub struct LlmSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub request_timeout: Duration,
}

#[derive(Clone)]
pub struct PushoverSettings {
    pub user: String,
    pub token: String,
    pub url: String,
}

/// Parameters of the conversation loop
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSettings {
    /// Whose background the bot speaks for
    pub persona_name: String,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    /// Upper bound on tool-resolution rounds within a single user turn
    pub max_tool_rounds: u32,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            persona_name: DEFAULT_PERSONA_NAME.to_string(),
            temperature: 0.2,
            top_p: 0.9,
            max_tokens: 500,
            max_tool_rounds: 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7860,
        }
    }
}

impl std::fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSettings")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl std::fmt::Debug for PushoverSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushoverSettings")
            .field("user", &redact(&self.user))
            .field("token", &redact(&self.token))
            .field("url", &self.url)
            .finish()
    }
}

fn redact(secret: &str) -> String {
    match secret.chars().next() {
        Some(first) => format!("{first}***"),
        None => String::new(),
    }
}

impl Settings {
    /// Load settings from an optional TOML file overlaid by the process environment.
    ///
    /// Without an explicit file, `<config dir>/careerbot/careerbot.toml` is read
    /// when it exists.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(config_file, None::<Vec<(String, String)>>)
    }

    /// Like [`Settings::load`], but reads environment variables from `env`
    /// instead of the process environment when given.
    pub fn load_with_env<I>(config_file: Option<&Path>, env: Option<I>) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut builder = Config::builder();

        match config_file {
            Some(path) => {
                builder = builder.add_source(File::from(path.to_path_buf()).required(true));
            }
            None => {
                if let Some(path) = default_config_path() {
                    builder = builder.add_source(File::from(path).required(false));
                }
            }
        }

        let environment = match env {
            Some(vars) => Environment::default().source(Some(vars.into_iter().collect())),
            None => Environment::default(),
        };
        builder = builder.add_source(environment);

        let raw: RawSettings = builder.build()?.try_deserialize()?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawSettings) -> Result<Self, ConfigError> {
        let api_key = required(raw.openai_api_key, "OPENAI_API_KEY")?;
        let user = required(raw.pushover_user, "PUSHOVER_USER")?;
        let token = required(raw.pushover_token, "PUSHOVER_TOKEN")?;

        let defaults = ChatSettings::default();
        let chat = ChatSettings {
            persona_name: non_blank(raw.careerbot_name).unwrap_or(defaults.persona_name),
            temperature: raw.careerbot_temperature.unwrap_or(defaults.temperature),
            top_p: raw.careerbot_top_p.unwrap_or(defaults.top_p),
            max_tokens: raw.careerbot_max_tokens.unwrap_or(defaults.max_tokens),
            max_tool_rounds: raw
                .careerbot_max_tool_rounds
                .unwrap_or(defaults.max_tool_rounds),
        };

        if !(0.0..=2.0).contains(&chat.temperature) {
            return Err(ConfigError::InvalidValue {
                key: "CAREERBOT_TEMPERATURE",
                message: format!("{} is outside 0.0..=2.0", chat.temperature),
            });
        }
        if !(0.0..=1.0).contains(&chat.top_p) {
            return Err(ConfigError::InvalidValue {
                key: "CAREERBOT_TOP_P",
                message: format!("{} is outside 0.0..=1.0", chat.top_p),
            });
        }
        if chat.max_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                key: "CAREERBOT_MAX_TOKENS",
                message: "must be at least 1".to_string(),
            });
        }
        if chat.max_tool_rounds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "CAREERBOT_MAX_TOOL_ROUNDS",
                message: "must be at least 1".to_string(),
            });
        }

        let timeout_secs = raw.careerbot_request_timeout_secs.unwrap_or(60);
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "CAREERBOT_REQUEST_TIMEOUT_SECS",
                message: "must be at least 1".to_string(),
            });
        }

        let server_defaults = ServerSettings::default();

        Ok(Self {
            llm: LlmSettings {
                api_key,
                base_url: non_blank(raw.openai_base_url)
                    .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
                model: non_blank(raw.careerbot_model)
                    .unwrap_or_else(|| models::openai::GPT_4O_MINI_ID.to_string()),
                request_timeout: Duration::from_secs(timeout_secs),
            },
            pushover: PushoverSettings {
                user,
                token,
                url: non_blank(raw.pushover_url)
                    .unwrap_or_else(|| DEFAULT_PUSHOVER_URL.to_string()),
            },
            chat,
            knowledge: KnowledgeConfig::with_default_documents(
                raw.careerbot_docs_dir
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DOCS_DIR)),
            ),
            server: ServerSettings {
                host: non_blank(raw.careerbot_host).unwrap_or(server_defaults.host),
                port: raw.careerbot_port.unwrap_or(server_defaults.port),
            },
        })
    }

    /// Report which credentials were found without revealing them
    pub fn log_credentials(&self) {
        tracing::info!(
            "Pushover user found and starts with {}",
            redact(&self.pushover.user)
        );
        tracing::info!(
            "Pushover token found and starts with {}",
            redact(&self.pushover.token)
        );
        tracing::info!(
            model = %self.llm.model,
            base_url = %self.llm.base_url,
            "Language model configured"
        );
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    non_blank(value).ok_or(ConfigError::MissingCredential(name))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("careerbot/careerbot.toml"))
}
