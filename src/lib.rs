pub mod app;
pub mod error;
pub mod model;
pub mod request;
pub mod session;

pub use tokio;
pub use tokio::sync::Mutex as TokioMutex;
