pub mod classify;
pub mod client;
pub mod envelope;
pub mod error;
pub mod types;

pub use client::GraphClient;
pub use envelope::ErrorDetails;
pub use error::{GraphError, GraphResult};
pub use types::*;
