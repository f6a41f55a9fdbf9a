pub mod credentials;
pub mod date_window;
pub mod error;
pub mod search_analytics;
pub mod sites;
