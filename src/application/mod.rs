// Application layer - Use cases over the heat load core
pub mod pipeline;
pub mod scoring_service;
pub mod weather_source;
