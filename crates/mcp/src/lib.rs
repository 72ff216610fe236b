pub mod error;
pub mod prompts;
pub mod resources;
pub mod server;
pub mod tools;
pub mod transport;

pub use error::CallError;
pub use server::McpServer;
