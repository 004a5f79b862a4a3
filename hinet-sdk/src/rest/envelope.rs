use serde::{Deserialize, Serialize};

use super::endpoint::Endpoint;

/// Generic request envelope pairing an [`Endpoint`] with an optional typed body.
///
/// The body is opaque to the library: it is handed to the JSON serializer as-is
/// and never inspected. `None` means no request payload is sent.
///
/// # Example
/// ```
/// use hinet::{ApiRequest, Endpoint, HttpMethod};
///
/// // A bodyless GET:
/// let get = ApiRequest::new(Endpoint::new("/users", HttpMethod::Get));
///
/// // A POST with a typed payload:
/// #[derive(serde::Serialize)]
/// struct Login { user: String }
/// let post = ApiRequest::with_body(
///     Endpoint::new("/auth/login", HttpMethod::Post),
///     Login { user: "alice".into() },
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ApiRequest<B> {
    /// The endpoint this request targets.
    pub endpoint: Endpoint,
    /// The optional request payload, serialized as JSON when present.
    pub body: Option<B>,
}

impl ApiRequest<()> {
    /// A request with no payload.
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            body: None,
        }
    }
}

impl<B> ApiRequest<B> {
    /// A request carrying a typed payload.
    pub fn with_body(endpoint: Endpoint, body: B) -> Self {
        Self {
            endpoint,
            body: Some(body),
        }
    }
}

/// Generic response envelope: typed data plus a status code and a message.
///
/// Produced by [`RestClient::request`](crate::RestClient::request) when the
/// server body decodes into this shape. The wire field for [`Self::status_code`]
/// is `statusCode`. A body that does not match the caller-declared `T` is a
/// decode failure, never a silent default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// The data returned by the API.
    pub data: T,
    /// The status code reported inside the envelope (e.g. 200).
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// A descriptive message, often used for errors or additional info.
    pub message: String,
}
