use std::path::PathBuf;

use booking_db::Db;

use crate::error::{AppError, Result};
use crate::services::AppServices;

/// Paths and knobs needed to run the engine.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db_path: PathBuf,
}

/// Application state shared by transports.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    pub fn new(db_path: PathBuf) -> Self {
        let config = AppConfig { db_path };
        let services = AppServices::new(&config);
        Self { config, services }
    }

    pub fn setup_db(&self) -> Result<()> {
        setup_db(&self.config.db_path)
            .map_err(|err| AppError::Message(format!("initialize db: {}", err)))
    }
}

pub fn setup_db(path: &std::path::Path) -> Result<()> {
    let mut db = Db::open(path)?;
    db.migrate()?;
    Ok(())
}
