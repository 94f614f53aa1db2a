pub mod app;
pub mod error;
pub mod rates;
pub mod services;
pub mod util;

pub use app::{AppConfig, AppState, setup_db};
pub use error::{ApiError, AppError, Result};
pub use rates::{ResolvedNight, resolve_night};
pub use services::{AppServices, Available, FeatureFlags, FeaturesService, RangeCheck};
pub use util::dates::{parse_date, parse_range};
