pub mod analysis;
pub mod error;
pub mod models;

pub use error::StatsError;
