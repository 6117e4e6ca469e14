// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod csv_store;
pub mod http_response;
pub mod logging;
pub mod simulated_source;
