use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Login gate
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub auth_username: String,
    pub auth_password: String,
    // External services
    pub openai_api_key: Option<String>,
    pub translation_model: String,
    pub tts_provider: TtsProvider,
    pub openai_tts_model: String,
    pub openai_tts_voice: String,
    pub aws_region: String,
    pub google_tts_url: String,
    // Audio assembly
    pub synthesis_timeout_ms: u64,
    pub output_sample_rate: u32,
    pub mp3_bitrate: String,
    pub ffmpeg_path: String,
    // Phrase parsing
    pub delimiters: String,
    pub language_check_enabled: bool,
    // Caches
    pub cache_enabled: bool,
    pub cache_max_capacity: u64,
    pub cache_tti_minutes: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    Google,
    OpenAi,
    Polly,
}

impl std::fmt::Display for TtsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TtsProvider::Google => write!(f, "google"),
            TtsProvider::OpenAi => write!(f, "openai"),
            TtsProvider::Polly => write!(f, "polly"),
        }
    }
}

impl std::str::FromStr for TtsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" | "gtts" => Ok(TtsProvider::Google),
            "openai" => Ok(TtsProvider::OpenAi),
            "polly" | "aws" => Ok(TtsProvider::Polly),
            other => Err(format!("Unknown TTS_PROVIDER: {}", other)),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|s| matches!(s.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env_or("HOST", "0.0.0.0"),
            port: env_or("PORT", "8080").parse()?,
            environment: match env_or("ENVIRONMENT", "development").as_str() {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env_or("LOG_FORMAT", "pretty").as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            jwt_secret: env::var("JWT_SECRET")?,
            jwt_expiration_hours: env_or("JWT_EXPIRATION_HOURS", "12").parse()?,
            auth_username: env::var("AUTH_USERNAME")?,
            auth_password: env::var("AUTH_PASSWORD")?,
            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            translation_model: env_or("TRANSLATION_MODEL", "gpt-4o-mini"),
            tts_provider: env_or("TTS_PROVIDER", "google").parse()?,
            openai_tts_model: env_or("OPENAI_TTS_MODEL", "tts-1"),
            openai_tts_voice: env_or("OPENAI_TTS_VOICE", ""),
            aws_region: env_or("AWS_REGION", "eu-west-1"),
            google_tts_url: env_or("GOOGLE_TTS_URL", "https://translate.google.com"),
            synthesis_timeout_ms: env_or("SYNTHESIS_TIMEOUT_MS", "5000").parse()?,
            output_sample_rate: env_or("OUTPUT_SAMPLE_RATE", "24000").parse()?,
            mp3_bitrate: env_or("MP3_BITRATE", "128k"),
            ffmpeg_path: env_or("FFMPEG_PATH", "ffmpeg"),
            delimiters: env_or("DELIMITERS", "|;"),
            language_check_enabled: env_flag("LANGUAGE_CHECK_ENABLED", true),
            cache_enabled: env_flag("CACHE_ENABLED", true),
            cache_max_capacity: env_or("CACHE_MAX_CAPACITY", "32").parse()?,
            cache_tti_minutes: env_or("CACHE_TTI_MINUTES", "60").parse()?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Rejects values that parse but cannot drive audio generation
    pub fn validate(&self) -> Result<(), String> {
        if self.output_sample_rate == 0 {
            return Err("OUTPUT_SAMPLE_RATE must be greater than zero".to_string());
        }
        if self.synthesis_timeout_ms == 0 {
            return Err("SYNTHESIS_TIMEOUT_MS must be greater than zero".to_string());
        }
        Ok(())
    }

    pub fn synthesis_timeout(&self) -> Duration {
        Duration::from_millis(self.synthesis_timeout_ms)
    }

    pub fn cache_time_to_idle(&self) -> Duration {
        Duration::from_secs(self.cache_tti_minutes * 60)
    }

    /// Generation entries are also the download store, so a disabled cache
    /// still keeps the last few results.
    pub fn generation_cache_capacity(&self) -> u64 {
        if self.cache_enabled {
            self.cache_max_capacity
        } else {
            4
        }
    }
}
