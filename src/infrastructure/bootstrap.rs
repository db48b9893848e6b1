use std::error::Error;
use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use crate::application::VocabMerger;
use crate::domain::deck_config::AppConfig;
use crate::infrastructure::config::ConfigService;
use crate::interfaces::http::{add_log, HttpState, SharedLogs};

pub struct Bootstrapped {
    pub config: AppConfig,
    pub state: HttpState,
}

pub fn setup() -> Result<Bootstrapped, Box<dyn Error>> {
    let _ = dotenvy::dotenv();

    let config_service = ConfigService::new();
    let config = config_service.load().map_err(|err| {
        eprintln!(
            "Failed to load configuration from {}: {}",
            config_service.path().display(),
            err
        );
        err
    })?;

    init_tracing(&config.log_level);

    let logs: SharedLogs = Arc::new(Mutex::new(Vec::new()));
    add_log(
        &logs,
        "INFO",
        "Bootstrap",
        &format!(
            "Loaded configuration (data_dir={} cards_file={})",
            config.data_dir.display(),
            config.cards_path().display()
        ),
    );

    if config.merge_on_startup {
        run_startup_merge(&config, &logs);
    }

    let state = HttpState {
        cards_path: config.cards_path(),
        title: config.title.clone(),
        logs,
    };

    Ok(Bootstrapped { config, state })
}

pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// A failed merge is logged and the service starts with whatever file is on disk
pub fn run_startup_merge(config: &AppConfig, logs: &SharedLogs) {
    let merger = VocabMerger::new(config.merge.clone(), &config.data_dir, logs.clone());
    // VocabMerger::merge logs its own fatal errors
    let _ = merger.merge();
}
