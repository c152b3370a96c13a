// Performance analytics for the reporting views
pub mod analytics;
