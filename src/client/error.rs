use thiserror::Error;

/// Errors constructing the client.
///
/// Calls themselves never fail; see [`super::Fetched`].
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}
