//! Response envelopes.

mod envelope;

pub use envelope::{data_response, list_response, success_response};
