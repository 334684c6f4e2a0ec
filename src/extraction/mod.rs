pub mod filter;
pub mod gemini;
pub mod prompt;
pub mod schema;
pub mod types;

pub use filter::*;
pub use gemini::*;
pub use prompt::*;
pub use schema::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Gemini API request failed: {0}")]
    Connection(String),

    #[error("Gemini API returned error (status {status}): {body}")]
    ApiStatus { status: u16, body: String },

    #[error("Unexpected response structure from Gemini API: {0}")]
    MalformedResponse(String),

    #[error("Failed to decode JSON from Gemini API: {0}")]
    Decode(String),

    #[error("An unexpected error occurred with Gemini API: {0}")]
    Processing(String),
}
