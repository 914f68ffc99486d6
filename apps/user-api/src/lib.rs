pub mod config;
pub mod constants;
pub mod error;
pub mod methods;
pub mod middleware;
pub mod router;
pub mod shutdown;
pub mod state;
pub mod telemetry;
