//! In-memory product store behind a service task, reached through a typed
//! cloneable client.

pub mod client;
pub mod error;
pub mod messages;
pub mod service;

pub use client::*;
pub use error::*;
pub use messages::*;
pub use service::*;
