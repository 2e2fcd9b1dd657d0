use std::{sync::Arc, time::Duration};

use assistant::{Assistant, Classifier, EndpointClassifier, GatewayClassifier};
use engine::{DriverRegistry, Engine, JsonFileStore, SystemClock};
use settings::ClassifierMode;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "frota={level},server={level},assistant={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let engine = build_engine(&settings.engine)?;
    let timeout = Duration::from_secs(settings.classifier.timeout_secs);
    let classifier = build_classifier(&settings.classifier, engine.drivers(), timeout)?;
    let assistant = Assistant::new(classifier, timeout);

    let state = server::ServerState::new(engine, assistant, settings.server.api_key);
    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    server::run(state, &addr).await?;

    Ok(())
}

fn build_engine(
    config: &settings::Engine,
) -> Result<Engine, Box<dyn std::error::Error + Send + Sync>> {
    let clock = match config.timezone.as_deref() {
        Some(name) => {
            let tz = name
                .parse::<chrono_tz::Tz>()
                .map_err(|err| format!("invalid engine.timezone {name:?}: {err}"))?;
            tracing::info!("Using time zone {tz}");
            SystemClock::in_zone(tz)
        }
        None => SystemClock::local(),
    };

    let builder = Engine::builder()
        .clock(clock)
        .strict_drivers(config.strict_drivers);
    let engine = match config.store_path.as_deref() {
        Some(path) => {
            let store = JsonFileStore::open(path)?;
            tracing::info!("Using store file {}", store.path().display());
            builder.store(store).build()
        }
        None => {
            tracing::info!("No store file configured, keeping transactions in memory");
            builder.build()
        }
    };
    Ok(engine)
}

fn build_classifier(
    config: &settings::Classifier,
    drivers: &DriverRegistry,
    timeout: Duration,
) -> Result<Arc<dyn Classifier>, Box<dyn std::error::Error + Send + Sync>> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let classifier: Arc<dyn Classifier> = match config.mode {
        ClassifierMode::Gateway => {
            if config.api_key.is_none() {
                tracing::warn!("classifier.api_key is not set, gateway calls will likely fail");
            }
            Arc::new(GatewayClassifier::new(
                client,
                config.url.clone(),
                config.api_key.clone(),
                config.model.clone(),
                drivers,
            ))
        }
        ClassifierMode::Endpoint => Arc::new(EndpointClassifier::new(
            client,
            config.url.clone(),
            config.api_key.clone(),
        )),
    };
    tracing::info!("Classifier mode {:?} at {}", config.mode, config.url);
    Ok(classifier)
}
