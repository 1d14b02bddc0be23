pub mod api;
pub mod entities;
pub mod gemini;
pub mod metrics;
pub mod migrator;
pub mod storage;
pub mod telemetry;

pub use sea_orm;
