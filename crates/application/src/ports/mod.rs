//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the screenshot core and the host.
//! The core consumes exactly two capabilities: resolving per-item
//! parameters and executing an HTTP request.

mod parameters;
mod transport;

pub use parameters::{ParameterError, ParameterResolver};
pub use transport::{Transport, TransportError};
