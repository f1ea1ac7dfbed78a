pub mod app;
pub mod config;
pub mod http;
pub mod moderation;
pub mod server;
pub mod store;
pub mod telemetry;
pub mod types;
pub mod util;

pub use app::App;
