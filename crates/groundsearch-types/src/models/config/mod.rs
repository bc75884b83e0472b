//! Application configuration models.

mod app;
mod model;
mod server;
mod session;

pub use app::AppConfig;
pub use model::ModelConfig;
pub use server::ServerConfig;
pub use session::SessionConfig;
