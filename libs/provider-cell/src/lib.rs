pub mod models;
pub mod services;

pub use models::*;
pub use services::availability::DayAvailabilityService;
pub use services::catalog::ProviderCatalogService;
