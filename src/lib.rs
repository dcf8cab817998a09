pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod normalize;
pub mod prompts;
pub mod request;
pub mod server;
pub mod vercel;


pub use error::GatewayError;
pub type Result<T> = std::result::Result<T, GatewayError>;
