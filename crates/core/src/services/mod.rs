pub mod activity_service;
pub mod analytics_service;
pub mod balance_service;
pub mod chart_service;
pub mod date_service;
pub mod series_service;
