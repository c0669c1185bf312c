pub mod ids;
pub mod models;

pub use ids::*;
pub use models::*;
