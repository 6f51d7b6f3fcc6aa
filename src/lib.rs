pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod pages;
pub mod polling;
pub mod services;

pub use api::ApiClient;
pub use config::Config;
pub use error::{ClientError, ClientResult};
pub use polling::Poller;
