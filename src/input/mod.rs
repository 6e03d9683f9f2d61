pub mod handler;

pub use handler::{HostKey, InputHandler};
