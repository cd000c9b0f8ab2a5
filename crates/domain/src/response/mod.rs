//! Remote response domain types

mod spec;

pub use spec::{RemoteResponse, ResponseBody, StatusCode};
