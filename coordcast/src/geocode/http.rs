//! HTTP geocoder for what3words-style APIs.

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::coord::{LatLong, WordTriple};

use super::types::{GeocodeError, Geocoder, ResolveFuture};

/// Raw HTTP response: status plus body bytes.
///
/// Keeping the status separate lets the geocoder distinguish provider-side
/// throttling (429) from unknown words (other 4xx) and outages (5xx).
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Transport seam for the HTTP geocoder.
///
/// Allows mock transports in tests; the production implementation is
/// [`ReqwestTransport`].
pub trait Transport: Send + Sync {
    /// Performs an HTTP GET and returns status plus body.
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, GeocodeError>> + Send;
}

/// Transport backed by a shared [`reqwest::Client`].
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeocodeError::Network(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, GeocodeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GeocodeError::Network(format!("request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| GeocodeError::Network(format!("failed to read response: {}", e)))?
            .to_vec();

        Ok(HttpResponse { status, body })
    }
}

/// Documented provider-side request budget, requests per minute.
const PROVIDER_RATE_LIMIT: u32 = 60;

/// Expected response body: `{"coordinates": {"lat": ..., "lng": ...}}`.
#[derive(Debug, Deserialize)]
struct ResolveResponse {
    coordinates: ResolveCoordinates,
}

#[derive(Debug, Deserialize)]
struct ResolveCoordinates {
    lat: f64,
    lng: f64,
}

/// Geocoder that queries a what3words-style JSON API.
pub struct HttpGeocoder<T: Transport> {
    transport: T,
    endpoint: String,
    api_key: Option<String>,
}

impl<T: Transport> HttpGeocoder<T> {
    /// Creates a geocoder against `endpoint`
    /// (e.g. `https://api.what3words.com/v3/convert-to-coordinates`).
    pub fn new(transport: T, endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            api_key,
        }
    }

    fn request_url(&self, words: &WordTriple) -> String {
        let mut url = format!("{}?words={}", self.endpoint, words.key());
        if let Some(key) = &self.api_key {
            url.push_str("&key=");
            url.push_str(key);
        }
        url
    }

    fn interpret(&self, words: &WordTriple, response: HttpResponse) -> Result<LatLong, GeocodeError> {
        match response.status {
            200 => {}
            429 => {
                warn!(words = %words.key(), "geocoding provider throttled the request");
                return Err(GeocodeError::RateLimited {
                    limit: PROVIDER_RATE_LIMIT,
                });
            }
            status @ 400..=499 => {
                debug!(words = %words.key(), status, "provider rejected the triple");
                return Err(GeocodeError::UnknownWords(words.key()));
            }
            status => {
                return Err(GeocodeError::Network(format!(
                    "provider answered HTTP {}",
                    status
                )));
            }
        }

        let parsed: ResolveResponse = serde_json::from_slice(&response.body)
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;
        let position = LatLong::new(parsed.coordinates.lat, parsed.coordinates.lng);
        if !position.in_range() {
            return Err(GeocodeError::InvalidResponse(format!(
                "coordinates out of range: {}",
                position
            )));
        }
        Ok(position)
    }
}

impl<T: Transport + 'static> Geocoder for HttpGeocoder<T> {
    fn resolve<'a>(&'a self, words: &'a WordTriple) -> ResolveFuture<'a> {
        Box::pin(async move {
            let url = self.request_url(words);
            debug!(words = %words.key(), "resolving word triple");
            let response = self.transport.get(&url).await?;
            self.interpret(words, response)
        })
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Transport that replays a canned response and records request URLs.
    struct MockTransport {
        status: u16,
        body: &'static str,
        seen: std::sync::Mutex<Vec<String>>,
    }

    impl MockTransport {
        fn new(status: u16, body: &'static str) -> Self {
            Self {
                status,
                body,
                seen: std::sync::Mutex::new(Vec::new()),
            }
        }
    }

    impl Transport for std::sync::Arc<MockTransport> {
        async fn get(&self, url: &str) -> Result<HttpResponse, GeocodeError> {
            self.seen.lock().unwrap().push(url.to_string());
            Ok(HttpResponse {
                status: self.status,
                body: self.body.as_bytes().to_vec(),
            })
        }
    }

    fn mock(status: u16, body: &'static str) -> std::sync::Arc<MockTransport> {
        std::sync::Arc::new(MockTransport::new(status, body))
    }

    fn triple(text: &str) -> WordTriple {
        crate::parse::words::parse(text).unwrap()
    }

    #[tokio::test]
    async fn resolves_documented_response_shape() {
        let transport = mock(200, r#"{"coordinates": {"lat": 51.520847, "lng": -0.195521}}"#);
        let geocoder = HttpGeocoder::new(
            std::sync::Arc::clone(&transport),
            "https://example.test/convert",
            Some("k".into()),
        );

        let pos = geocoder.resolve(&triple("filled.count.soap")).await.unwrap();
        assert!((pos.lat - 51.520847).abs() < 1e-9);
        assert!((pos.lng + 0.195521).abs() < 1e-9);

        let seen = transport.seen.lock().unwrap();
        assert_eq!(
            seen[0],
            "https://example.test/convert?words=filled.count.soap&key=k"
        );
    }

    #[tokio::test]
    async fn http_429_maps_to_rate_limited() {
        let transport = mock(429, "");
        let geocoder = HttpGeocoder::new(transport, "https://example.test", None);
        let err = geocoder.resolve(&triple("a.b.c")).await.unwrap_err();
        assert!(matches!(err, GeocodeError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn http_400_maps_to_unknown_words() {
        let transport = mock(400, r#"{"error": "BadWords"}"#);
        let geocoder = HttpGeocoder::new(transport, "https://example.test", None);
        let err = geocoder.resolve(&triple("no.such.triple")).await.unwrap_err();
        assert_eq!(err, GeocodeError::UnknownWords("no.such.triple".into()));
    }

    #[tokio::test]
    async fn http_500_maps_to_network_error() {
        let transport = mock(503, "");
        let geocoder = HttpGeocoder::new(transport, "https://example.test", None);
        let err = geocoder.resolve(&triple("a.b.c")).await.unwrap_err();
        assert!(matches!(err, GeocodeError::Network(_)));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn malformed_body_is_invalid_response() {
        let transport = mock(200, "not json");
        let geocoder = HttpGeocoder::new(transport, "https://example.test", None);
        let err = geocoder.resolve(&triple("a.b.c")).await.unwrap_err();
        assert!(matches!(err, GeocodeError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn out_of_range_coordinates_are_rejected() {
        let transport = mock(200, r#"{"coordinates": {"lat": 95.0, "lng": 0.0}}"#);
        let geocoder = HttpGeocoder::new(transport, "https://example.test", None);
        let err = geocoder.resolve(&triple("a.b.c")).await.unwrap_err();
        assert!(matches!(err, GeocodeError::InvalidResponse(_)));
    }
}
