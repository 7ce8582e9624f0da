pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{LocalStorage, MemoryStorage};
pub use config::Settings;
pub use core::{Course, CourseKind, Platform, DEFAULT_POPULAR_COUNT};
pub use domain::record::CourseRecord;
pub use utils::error::{PlatformError, Result};
