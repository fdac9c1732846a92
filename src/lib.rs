pub mod app;
pub mod config;
pub mod errors;
pub mod external;
pub mod logging;
pub mod models;
pub mod routes;
pub mod screens;
pub mod services;
pub mod session;
pub mod state;
