use async_openai::{config::OpenAIConfig, Client as OpenAiClient};
use std::sync::Arc;
use superlearning_backend::controllers::{
    audio::AudioController, auth::AuthController, health::HealthController,
    phrases::PhrasesController,
};
use superlearning_backend::domain::audio::{
    AudioPipeline, AudioService, GenerationCache, TextNormalizer,
};
use superlearning_backend::domain::auth::{AuthService, JwtManager};
use superlearning_backend::domain::phrases::{DelimiterSet, PhraseService};
use superlearning_backend::domain::translation::TranslationService;
use superlearning_backend::infrastructure::audio::{FfmpegMp3Encoder, TrackEncoder};
use superlearning_backend::infrastructure::config::{Config, LogFormat, TtsProvider};
use superlearning_backend::infrastructure::http::{start_http_server, AppControllers};
use superlearning_backend::infrastructure::repositories::{
    GoogleTtsRepository, OpenAiTranslationRepository, OpenAiTtsRepository, PollyTtsRepository,
    TranslationRepository, TtsRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        environment = ?config.environment,
        "Starting Superlearning Backend on {}:{}",
        config.host,
        config.port
    );

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. External clients
    let openai_client = Arc::new(match &config.openai_api_key {
        Some(key) => OpenAiClient::with_config(OpenAIConfig::new().with_api_key(key.clone())),
        None => {
            tracing::warn!("OPENAI_API_KEY not set, translation will degrade to placeholders");
            OpenAiClient::new()
        }
    });

    // 2. Repositories
    tracing::info!(provider = %config.tts_provider, "Instantiating repositories...");
    let tts_repo: Arc<dyn TtsRepository> = match config.tts_provider {
        TtsProvider::Google => Arc::new(GoogleTtsRepository::new(config.google_tts_url.clone())),
        TtsProvider::OpenAi => Arc::new(OpenAiTtsRepository::new(
            openai_client.clone(),
            config.openai_tts_model.clone(),
            config.openai_tts_voice.clone(),
        )),
        TtsProvider::Polly => {
            tracing::info!("Initializing AWS Polly client with region: {}", config.aws_region);
            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;
            Arc::new(PollyTtsRepository::new(Arc::new(
                aws_sdk_polly::Client::new(&aws_config),
            )))
        }
    };
    let translation_repo: Arc<dyn TranslationRepository> = Arc::new(
        OpenAiTranslationRepository::new(openai_client, config.translation_model.clone()),
    );

    let encoder_available = ffmpeg_available(&config.ffmpeg_path).await;
    if !encoder_available {
        tracing::warn!(ffmpeg = %config.ffmpeg_path, "ffmpeg not found, MP3 export will fail");
    }
    let encoder: Arc<dyn TrackEncoder> = Arc::new(FfmpegMp3Encoder::new(
        config.ffmpeg_path.clone(),
        config.mp3_bitrate.clone(),
    ));

    // 3. Services
    tracing::info!("Instantiating services...");
    let jwt_manager = Arc::new(JwtManager::new(
        config.jwt_secret.clone(),
        config.jwt_expiration_hours,
    ));
    let auth_service = Arc::new(AuthService::new(
        config.auth_username.clone(),
        config.auth_password.clone(),
        jwt_manager.clone(),
    ));
    let translation_service = Arc::new(TranslationService::new(translation_repo));
    let phrase_service = Arc::new(PhraseService::new(
        DelimiterSet::parse(&config.delimiters)?,
        translation_service,
        config.language_check_enabled,
        config
            .cache_enabled
            .then(|| (config.cache_max_capacity, config.cache_time_to_idle())),
    ));
    let pipeline = AudioPipeline::new(
        tts_repo,
        encoder,
        TextNormalizer::default(),
        config.synthesis_timeout(),
        config.output_sample_rate,
    );
    let audio_service = Arc::new(AudioService::new(
        pipeline,
        GenerationCache::new(
            config.generation_cache_capacity(),
            config.cache_time_to_idle(),
        ),
    ));

    // 4. Controllers
    tracing::info!("Instantiating controllers...");
    let controllers = AppControllers {
        health: Arc::new(HealthController::new(
            config.tts_provider.to_string(),
            config.translation_model.clone(),
            encoder_available,
        )),
        auth: Arc::new(AuthController::new(auth_service)),
        phrases: Arc::new(PhrasesController::new(phrase_service)),
        audio: Arc::new(AudioController::new(audio_service)),
    };

    // Start HTTP server with all routes
    start_http_server(config, controllers, jwt_manager).await?;

    Ok(())
}

async fn ffmpeg_available(path: &str) -> bool {
    tokio::process::Command::new(path)
        .arg("-version")
        .output()
        .await
        .map(|output| output.status.success())
        .unwrap_or(false)
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "superlearning_backend=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
