// Presentation layer - HTTP and command-line surfaces
pub mod app_state;
pub mod cli;
pub mod handlers;
pub mod routes;
