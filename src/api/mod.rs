pub mod client;
pub mod shared;

pub use client::ApiClient;
pub use shared::ApiResponse;
