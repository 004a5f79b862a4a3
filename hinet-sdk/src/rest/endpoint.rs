use std::collections::HashMap;

use reqwest::Method;

/// The HTTP methods an [`Endpoint`] can use.
///
/// A closed set: the REST wrapper only ever issues these five verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP `GET`.
    Get,
    /// HTTP `POST`.
    Post,
    /// HTTP `PUT`.
    Put,
    /// HTTP `DELETE`.
    Delete,
    /// HTTP `PATCH`.
    Patch,
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Patch => Method::PATCH,
        }
    }
}

/// Immutable description of an API call target: path, method, and optional
/// headers and query parameters.
///
/// An `Endpoint` is a plain value. It is created per call, handed to the
/// [`RestClient`](crate::RestClient), and discarded; it is never looked up or
/// indexed. The path is joined to the base URL by plain concatenation, so it
/// should start with `/`.
///
/// # Example
/// ```
/// use hinet::{Endpoint, HttpMethod};
///
/// let endpoint = Endpoint::new("/users", HttpMethod::Get)
///     .header("Accept-Language", "en")
///     .query_item("page", "2");
/// assert_eq!(endpoint.path(), "/users");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    path: String,
    method: HttpMethod,
    headers: Option<HashMap<String, String>>,
    query: Option<HashMap<String, String>>,
}

impl Endpoint {
    /// Create an endpoint with no headers and no query parameters.
    pub fn new<P: Into<String>>(path: P, method: HttpMethod) -> Self {
        Self {
            path: path.into(),
            method,
            headers: None,
            query: None,
        }
    }

    /// Add a header to send with every request built from this endpoint.
    ///
    /// A bearer token, when set on the client, is applied *after* these and
    /// overrides an `Authorization` header supplied here.
    #[must_use]
    pub fn header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Add a query parameter appended to the target URL (percent-encoded).
    #[must_use]
    pub fn query_item<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.query
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// The endpoint path, e.g. `/users` or `/auth/login`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The HTTP method used for the request.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Optional headers included in the request.
    pub fn headers(&self) -> Option<&HashMap<String, String>> {
        self.headers.as_ref()
    }

    /// Optional query parameters appended to the URL.
    pub fn query(&self) -> Option<&HashMap<String, String>> {
        self.query.as_ref()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn method_conversion() {
        assert_eq!(Method::from(HttpMethod::Get), Method::GET);
        assert_eq!(Method::from(HttpMethod::Patch), Method::PATCH);
    }

    #[test]
    fn chained_construction() {
        let endpoint = Endpoint::new("/users", HttpMethod::Post)
            .header("X-Trace", "abc")
            .header("Accept", "application/json")
            .query_item("page", "2");

        assert_eq!(endpoint.method(), HttpMethod::Post);
        assert_eq!(endpoint.headers().unwrap().len(), 2);
        assert_eq!(
            endpoint.query().unwrap().get("page").map(String::as_str),
            Some("2")
        );
    }
}
