use bytes::Bytes;
use reqwest::{Response, StatusCode};

/// The outcome of a single GET request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fetched {
    /// The server answered with a success status, carrying the full body.
    Success(Bytes),
    /// The server answered with a non-success status. The body was not read.
    Status(StatusCode),
}

impl Fetched {
    /// Extract the outcome from a [`Response`].
    ///
    /// The body is only consumed for success responses.
    pub async fn from_response(response: Response) -> Result<Self, reqwest::Error> {
        let status = response.status();
        if !status.is_success() {
            return Ok(Self::Status(status));
        }

        Ok(Self::Success(response.bytes().await?))
    }
}
