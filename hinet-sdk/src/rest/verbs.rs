use reqwest::Response;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::core::RestClient;
use super::endpoint::Endpoint;
use super::envelope::{ApiRequest, ApiResponse};
use crate::errors::{RequestError, Result};
use crate::util::check_http_status;

/// Recommended parameter mapping for [`RestClient::request_raw`]: string keys
/// to a closed JSON variant type (string, number, boolean, null, array,
/// nested mapping).
pub type Params = serde_json::Map<String, serde_json::Value>;

impl RestClient {
    /// Send a typed request and decode the server's [`ApiResponse`] envelope.
    ///
    /// The request body, when present, is serialized as JSON. Exactly one
    /// outcome is delivered per call:
    ///
    /// - transport failure (DNS, refused connection, timeout) ⇒
    ///   [`RequestError::Transport`],
    /// - non-2xx status ⇒ [`RequestError::Server`] with the response body as
    ///   the message,
    /// - 2xx with an empty body ⇒ [`RequestError::EmptyBody`],
    /// - 2xx with a body that does not decode into `ApiResponse<T>` ⇒
    ///   [`RequestError::DecodeJson`],
    /// - otherwise ⇒ `Ok` with the decoded envelope.
    ///
    /// # Example
    /// ```no_run
    /// use hinet::{ApiRequest, ApiResponse, Endpoint, HttpMethod, RestClient};
    /// # #[derive(serde::Deserialize)] struct User { name: String }
    /// # async fn ex(client: RestClient) -> hinet::Result<()> {
    /// let request = ApiRequest::new(Endpoint::new("/users/42", HttpMethod::Get));
    /// let user: ApiResponse<User> = client.request(&request, "https://api.example.com").await?;
    /// # Ok(()) }
    /// ```
    pub async fn request<B, T>(
        &self,
        request: &ApiRequest<B>,
        base_url: &str,
    ) -> Result<ApiResponse<T>>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let mut rb = self.request_builder(&request.endpoint, base_url)?;
        if let Some(body) = &request.body {
            rb = rb.json(body);
        }

        tracing::debug!(path = request.endpoint.path(), "dispatching typed request");
        let response = rb.send().await?;
        let response = check_http_status(response).await?;

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(RequestError::EmptyBody.into());
        }
        let envelope =
            serde_json::from_slice::<ApiResponse<T>>(&bytes).map_err(|e| {
                RequestError::DecodeJson {
                    message: e.to_string(),
                }
            })?;
        Ok(envelope)
    }

    /// Send a request with an optional JSON parameter body and hand back the
    /// raw [`Response`] unmodified — the caller reads it.
    ///
    /// Parameters are encoded to JSON **before** any network activity; an
    /// encoding failure short-circuits with [`RequestError::EncodeJson`] and
    /// the transport is never invoked. [`Params`] is the recommended mapping
    /// type, but any `Serialize` mapping works.
    ///
    /// Failure and non-2xx handling match [`request`](Self::request); a 2xx
    /// response is returned as-is, body untouched.
    ///
    /// # Example
    /// ```no_run
    /// use hinet::{Endpoint, HttpMethod, Params, RestClient};
    /// # async fn ex(client: RestClient) -> hinet::Result<()> {
    /// let mut params = Params::new();
    /// params.insert("q".into(), "hello".into());
    /// let endpoint = Endpoint::new("/search", HttpMethod::Get);
    /// let response = client
    ///     .request_raw(&endpoint, "https://api.example.com", Some(&params))
    ///     .await?;
    /// # Ok(()) }
    /// ```
    pub async fn request_raw<P>(
        &self,
        endpoint: &Endpoint,
        base_url: &str,
        parameters: Option<&P>,
    ) -> Result<Response>
    where
        P: Serialize + ?Sized,
    {
        let mut rb = self.request_builder(endpoint, base_url)?;
        if let Some(params) = parameters {
            let body = serde_json::to_vec(params).map_err(|e| RequestError::EncodeJson {
                message: e.to_string(),
            })?;
            rb = rb
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        tracing::debug!(path = endpoint.path(), "dispatching raw request");
        let response = rb.send().await?;
        check_http_status(response).await
    }
}

#[cfg(test)]
mod test {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::rest::endpoint::HttpMethod;
    use crate::{Error, RestClient};

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct User {
        name: String,
    }

    #[tokio::test]
    async fn typed_request_decodes_envelope() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/users/1");
                then.status(200)
                    .json_body(json!({"data": {"name": "alice"}, "statusCode": 200, "message": "ok"}));
            })
            .await;

        let client = RestClient::new().unwrap();
        let request = ApiRequest::new(Endpoint::new("/users/1", HttpMethod::Get));
        let envelope: ApiResponse<User> =
            client.request(&request, &server.base_url()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(envelope.data, User { name: "alice".into() });
        assert_eq!(envelope.status_code, 200);
        assert_eq!(envelope.message, "ok");
    }

    #[tokio::test]
    async fn typed_request_sends_json_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/users")
                    .header("content-type", "application/json")
                    .json_body(json!({"name": "bob"}));
                then.status(200)
                    .json_body(json!({"data": {"name": "bob"}, "statusCode": 200, "message": "created"}));
            })
            .await;

        let client = RestClient::new().unwrap();
        let request = ApiRequest::with_body(
            Endpoint::new("/users", HttpMethod::Post),
            User { name: "bob".into() },
        );
        let _: ApiResponse<User> = client.request(&request, &server.base_url()).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_a_server_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/boom");
                then.status(500).body("it broke");
            })
            .await;

        let client = RestClient::new().unwrap();
        let request = ApiRequest::new(Endpoint::new("/boom", HttpMethod::Get));
        let err = client
            .request::<(), User>(&request, &server.base_url())
            .await
            .unwrap_err();

        match err {
            Error::Request(RequestError::Server { status, message }) => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(message, "it broke");
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_body_on_success_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/empty");
                then.status(200);
            })
            .await;

        let client = RestClient::new().unwrap();
        let request = ApiRequest::new(Endpoint::new("/empty", HttpMethod::Get));
        let err = client
            .request::<(), User>(&request, &server.base_url())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Request(RequestError::EmptyBody)));
        assert_eq!(
            err.to_string(),
            "Request failed: empty response body"
        );
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error_not_a_fault() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/weird");
                then.status(200).body("{\"not\": \"an envelope\"}");
            })
            .await;

        let client = RestClient::new().unwrap();
        let request = ApiRequest::new(Endpoint::new("/weird", HttpMethod::Get));
        let err = client
            .request::<(), User>(&request, &server.base_url())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Request(RequestError::DecodeJson { .. })
        ));
    }

    #[tokio::test]
    async fn raw_request_sends_params_and_returns_response_unmodified() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/search")
                    .header("content-type", "application/json")
                    .json_body(json!({"q": "hello"}));
                then.status(200).body("raw payload");
            })
            .await;

        let client = RestClient::new().unwrap();
        let mut params = Params::new();
        params.insert("q".into(), "hello".into());
        let endpoint = Endpoint::new("/search", HttpMethod::Get);
        let response = client
            .request_raw(&endpoint, &server.base_url(), Some(&params))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(response.text().await.unwrap(), "raw payload");
    }

    #[tokio::test]
    async fn raw_request_without_params_sends_no_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/users/1");
                then.status(204);
            })
            .await;

        let client = RestClient::new().unwrap();
        let endpoint = Endpoint::new("/users/1", HttpMethod::Delete);
        let response = client
            .request_raw(&endpoint, &server.base_url(), None::<&Params>)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status().as_u16(), 204);
    }

    /// A payload whose serialization always fails, to prove the encode step
    /// short-circuits before dispatch.
    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S>(&self, _serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            Err(serde::ser::Error::custom("deliberately unserializable"))
        }
    }

    #[tokio::test]
    async fn encode_failure_short_circuits_without_dispatch() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.path("/never");
                then.status(200);
            })
            .await;

        let client = RestClient::new().unwrap();
        let endpoint = Endpoint::new("/never", HttpMethod::Post);
        let err = client
            .request_raw(&endpoint, &server.base_url(), Some(&Unserializable))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Request(RequestError::EncodeJson { .. })
        ));
        assert_eq!(mock.hits_async().await, 0);
    }
}
