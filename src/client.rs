//! Authenticated client for the Exposed API.
//!
//! Every operation maps to a single endpoint and returns a [`FeedResponse`].
//! A request rejected with 401 triggers one re-authentication of the owned
//! [`Session`] and one resend; any other failure is returned as is.

use crate::{
    auth::AuthError,
    model::{FeedRecord, FeedResponse},
    session::Session,
};
use reqwest::{header::CONTENT_TYPE, Method, Response, StatusCode};
use thiserror::Error;
use tracing::{debug, error, trace};
use url::Url;

pub const ENDPOINT_TARGET: &str = "target";
pub const ENDPOINT_CONFIG: &str = "config";
pub const ENDPOINT_FEED: &str = "feed";

pub const PARAMETER_HOST: &str = "host";
pub const PARAMETER_URL: &str = "url";

/// Error emitted by the Exposed API client
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    NetworkError(#[source] reqwest::Error),
    #[error("{0}")]
    AuthError(#[from] AuthError),
    #[error("request failed {status}")]
    RequestError { status: StatusCode, body: String },
    #[error("failed to decode response: {0}")]
    DecodeError(#[source] serde_json::Error),
    #[error("failed to encode request body: {0}")]
    EncodeError(#[source] serde_json::Error),
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("invalid feed name {0:?}")]
    InvalidNamespace(String),
}

impl ApiError {
    /// Status code of a rejected request, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::RequestError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub struct ExposedClient {
    session: Session,
    http: reqwest::Client,
}

impl ExposedClient {
    pub fn new(session: Session) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("exposed/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::NetworkError)?;

        Ok(Self { session, http })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Start monitoring a host.
    pub async fn add_target(&mut self, host: &str) -> Result<FeedResponse, ApiError> {
        self.call(Method::POST, &[ENDPOINT_TARGET], &[(PARAMETER_HOST, host)], None)
            .await
    }

    /// Stop monitoring a host.
    pub async fn remove_target(&mut self, host: &str) -> Result<FeedResponse, ApiError> {
        self.call(Method::DELETE, &[ENDPOINT_TARGET], &[(PARAMETER_HOST, host)], None)
            .await
    }

    pub async fn list_targets(&mut self) -> Result<FeedResponse, ApiError> {
        self.call(Method::GET, &[ENDPOINT_TARGET], &[], None).await
    }

    /// Set the webhook address that receives notifications.
    pub async fn set_notification(&mut self, url: &str) -> Result<FeedResponse, ApiError> {
        self.call(Method::POST, &[ENDPOINT_CONFIG], &[(PARAMETER_URL, url)], None)
            .await
    }

    pub async fn push(
        &mut self,
        namespace: &str,
        host: &str,
        value: &str,
    ) -> Result<FeedResponse, ApiError> {
        let namespace = checked_namespace(namespace)?;
        let body = FeedRecord::for_push(host, value);
        self.call(Method::POST, &[ENDPOINT_FEED, namespace], &[], Some(&body))
            .await
    }

    /// Read a feed. An empty host asks for the feed of every target.
    pub async fn pull(&mut self, namespace: &str, host: &str) -> Result<FeedResponse, ApiError> {
        let namespace = checked_namespace(namespace)?;
        self.call(
            Method::GET,
            &[ENDPOINT_FEED, namespace],
            &[(PARAMETER_HOST, host)],
            None,
        )
        .await
    }

    /// Each segment is appended percent-encoded, so `/`, `?` and `#` inside a
    /// segment never change the endpoint.
    fn endpoint_url(&self, segments: &[&str], params: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = Url::parse(self.session.api())?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    async fn send(
        &self,
        method: &Method,
        url: &Url,
        body: Option<&[u8]>,
    ) -> Result<Response, ApiError> {
        trace!("{} {}", method, url);

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .bearer_auth(self.session.access_token().unwrap_or_default());

        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_vec());
        }

        request.send().await.map_err(ApiError::NetworkError)
    }

    async fn call(
        &mut self,
        method: Method,
        segments: &[&str],
        params: &[(&str, &str)],
        body: Option<&FeedRecord>,
    ) -> Result<FeedResponse, ApiError> {
        let endpoint = segments.join("/");
        let url = self.endpoint_url(segments, params)?;
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(ApiError::EncodeError)?;

        let mut response = self
            .send(&method, &url, body.as_deref())
            .await
            .inspect_err(|e| error!(endpoint = %endpoint, error = %e, "exposed"))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            debug!("Received 401 from {}, refreshing session", endpoint);

            if let Err(e) = self.session.refresh().await {
                error!(endpoint = %endpoint, error = %e, "exposed");
                return Err(ApiError::AuthError(e));
            }

            response = self
                .send(&method, &url, body.as_deref())
                .await
                .inspect_err(|e| error!(endpoint = %endpoint, error = %e, "exposed"))?;
        }

        let status = response.status();
        let text = response.text().await.map_err(ApiError::NetworkError)?;
        trace!("Raw response text for deserialization: {}", text);

        if status != StatusCode::OK {
            error!(endpoint = %endpoint, error = %text, code = status.as_u16(), "exposed");
            return Err(ApiError::RequestError { status, body: text });
        }

        decode_response(&text)
    }
}

/// Dot segments would be dropped from the path, so they are refused outright.
fn checked_namespace(namespace: &str) -> Result<&str, ApiError> {
    match namespace {
        "" | "." | ".." => Err(ApiError::InvalidNamespace(namespace.to_string())),
        _ => Ok(namespace),
    }
}

fn decode_response(text: &str) -> Result<FeedResponse, ApiError> {
    serde_json::from_str::<FeedResponse>(text).map_err(|e| {
        error!(
            "Failed to deserialize response: {}. Raw response: {}",
            e, text
        );
        ApiError::DecodeError(e)
    })
}
