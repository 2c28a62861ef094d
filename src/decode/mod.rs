//! Response decoder module
//!
//! JazzHR answers every list endpoint with a bare JSON array. The decoder
//! turns that body into records without touching their contents; anything
//! that is not an array is a malformed response.

mod decoders;

pub use decoders::JsonArrayDecoder;

use crate::error::Result;
use crate::types::Record;

/// Trait for decoding response bodies into records
pub trait RecordDecoder: Send + Sync {
    /// Decode the response body from `endpoint` into a list of records
    fn decode(&self, endpoint: &str, body: &str) -> Result<Vec<Record>>;
}
