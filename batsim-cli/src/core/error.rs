/// Errors raised by the simulation engine and the event decoders.
///
/// None of them is fatal to a running event loop except [`Error::InvalidConfiguration`],
/// which is only ever returned while constructing the engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: `{field}` {reason}")]
    InvalidConfiguration { field: &'static str, reason: &'static str },

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("malformed payload")]
    MalformedPayload(#[from] serde_json::Error),
}
