pub mod evolution;
pub mod model;
