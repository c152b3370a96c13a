// Core trading domain entities and value objects
pub mod pair;
pub mod types;
