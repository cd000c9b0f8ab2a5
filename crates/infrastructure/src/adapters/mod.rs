//! Port adapters.

mod reqwest_transport;

pub use reqwest_transport::{API_KEY_HEADER, ReqwestTransport};
