pub mod codec;
pub mod platform;

pub use crate::domain::model::{Course, CourseKind};
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
pub use platform::{Platform, DEFAULT_POPULAR_COUNT};
