// Domain layer - Pure heat load types and formulas
pub mod chart;
pub mod error;
pub mod heat_load;
pub mod risk;
pub mod summary;
pub mod weather;
