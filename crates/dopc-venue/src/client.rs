//! # Venue Client
//!
//! The [`VenueSource`] seam and its HTTP implementation.
//!
//! ## Fetch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fetch_venue(source, "home-assignment-venue-helsinki")                  │
//! │         │                                                               │
//! │         ├──► fetch_location ──► GET …/{slug}/static   ─┐                │
//! │         │                                              │ try_join!      │
//! │         └──► fetch_pricing  ──► GET …/{slug}/dynamic  ─┘                │
//! │                                                        │                │
//! │              both Ok ──► Venue { location, pricing }   │                │
//! │              any Err ──► that error, the other is dropped               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use dopc_core::{Coordinate, PricingSpec};

use crate::error::{VenueError, VenueResult};
use crate::wire::{VenueDynamicResponse, VenueStaticResponse};

/// Production venue API.
pub const DEFAULT_BASE_URL: &str =
    "https://consumer-api.development.dev.woltapi.com/home-assignment-api/v1/venues";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// =============================================================================
// Venue Source Trait
// =============================================================================

/// Where venue location and pricing come from.
///
/// Implemented over HTTP by [`HttpVenueClient`]; tests use in-memory fakes.
#[async_trait]
pub trait VenueSource: Send + Sync {
    /// Venue position. `NotFound` for an unknown slug.
    async fn fetch_location(&self, slug: &str) -> VenueResult<Coordinate>;

    /// Venue pricing rules. `NotFound` for an unknown slug.
    async fn fetch_pricing(&self, slug: &str) -> VenueResult<PricingSpec>;
}

/// Everything the core needs about one venue.
#[derive(Debug, Clone, PartialEq)]
pub struct Venue {
    pub slug: String,
    pub location: Coordinate,
    pub pricing: PricingSpec,
}

/// Fetches location and pricing concurrently; fails if either fails.
pub async fn fetch_venue<S>(source: &S, slug: &str) -> VenueResult<Venue>
where
    S: VenueSource + ?Sized,
{
    let (location, pricing) =
        tokio::try_join!(source.fetch_location(slug), source.fetch_pricing(slug))?;

    Ok(Venue {
        slug: slug.to_string(),
        location,
        pricing,
    })
}

// =============================================================================
// HTTP Client
// =============================================================================

/// [`VenueSource`] backed by the venue HTTP API.
#[derive(Debug, Clone)]
pub struct HttpVenueClient {
    client: Client,
    base_url: Url,
}

impl HttpVenueClient {
    /// Creates a client for `base_url` (the `…/venues` collection URL).
    ///
    /// ## Errors
    /// `InvalidBaseUrl` unless the URL parses as an http(s) base URL.
    pub fn new(base_url: &str, timeout: Duration) -> VenueResult<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| VenueError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;

        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(VenueError::InvalidBaseUrl(format!(
                "{}: must be an http or https URL",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VenueError::Transport(e.to_string()))?;

        Ok(HttpVenueClient {
            client,
            base_url: parsed,
        })
    }

    /// Client for [`DEFAULT_BASE_URL`].
    pub fn with_defaults() -> VenueResult<Self> {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/{slug}/{endpoint}` with the slug encoded as one path segment.
    fn endpoint(&self, slug: &str, endpoint: &str) -> VenueResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| VenueError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(slug)
            .push(endpoint);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, slug: &str, endpoint: &str) -> VenueResult<T> {
        let url = self.endpoint(slug, endpoint)?;
        debug!(%url, "Fetching venue data");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| VenueError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(%url, "Venue not found");
            return Err(VenueError::NotFound {
                slug: slug.to_string(),
            });
        }

        if !status.is_success() {
            // Body is best-effort context for the message.
            let details = response.text().await.unwrap_or_default();
            warn!(%url, status = status.as_u16(), "Venue API request failed");
            return Err(VenueError::Fetch {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                details,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| VenueError::Transport(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| VenueError::Decode(e.to_string()))
    }
}

#[async_trait]
impl VenueSource for HttpVenueClient {
    async fn fetch_location(&self, slug: &str) -> VenueResult<Coordinate> {
        let response: VenueStaticResponse = self.get_json(slug, "static").await?;
        response.location()
    }

    async fn fetch_pricing(&self, slug: &str) -> VenueResult<PricingSpec> {
        let response: VenueDynamicResponse = self.get_json(slug, "dynamic").await?;
        response.pricing()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use axum::extract::Path;
    use axum::http::StatusCode as AxumStatus;
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    const HELSINKI: &str = "home-assignment-venue-helsinki";

    // Mirrors the venue API: one known venue, 404 for the rest, plus two
    // slugs that misbehave.
    async fn static_handler(Path(slug): Path<String>) -> Response {
        match slug.as_str() {
            HELSINKI => Json(json!({
                "venue_raw": { "location": { "coordinates": [24.93087, 60.17094] } }
            }))
            .into_response(),
            "broken-venue" => {
                (AxumStatus::INTERNAL_SERVER_ERROR, "upstream exploded").into_response()
            }
            "garbled-venue" => "not json".into_response(),
            _ => (AxumStatus::NOT_FOUND, Json(json!({ "message": "Not found" }))).into_response(),
        }
    }

    async fn dynamic_handler(Path(slug): Path<String>) -> Response {
        match slug.as_str() {
            HELSINKI | "broken-venue" | "garbled-venue" => Json(json!({
                "venue_raw": {
                    "delivery_specs": {
                        "order_minimum_no_surcharge": 1000,
                        "delivery_pricing": {
                            "base_price": 190,
                            "distance_ranges": [
                                { "min": 0, "max": 500, "a": 0, "b": 0, "flag": null },
                                { "min": 500, "max": 1000, "a": 100, "b": 1, "flag": null },
                                { "min": 1000, "max": 0, "a": 0, "b": 0, "flag": null }
                            ]
                        }
                    }
                }
            }))
            .into_response(),
            _ => (AxumStatus::NOT_FOUND, Json(json!({ "message": "Not found" }))).into_response(),
        }
    }

    async fn spawn_fake_api() -> String {
        let app = Router::new()
            .route("/venues/{slug}/static", get(static_handler))
            .route("/venues/{slug}/dynamic", get(dynamic_handler));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}/venues", addr)
    }

    fn client(base_url: &str) -> HttpVenueClient {
        HttpVenueClient::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_rejects_bad_base_urls() {
        for url in ["not a url", "ftp://example.com/venues", "mailto:someone@example.com"] {
            let err = HttpVenueClient::new(url, DEFAULT_TIMEOUT).unwrap_err();
            assert!(matches!(err, VenueError::InvalidBaseUrl(_)), "{}", url);
        }
        assert!(HttpVenueClient::with_defaults().is_ok());
    }

    #[test]
    fn test_endpoint_encodes_slug() {
        let client = client("https://example.com/api/venues/");

        let url = client.endpoint("my venue/x", "static").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/api/venues/my%20venue%2Fx/static"
        );

        let url = client.endpoint(HELSINKI, "dynamic").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/api/venues/home-assignment-venue-helsinki/dynamic"
        );
    }

    #[tokio::test]
    async fn test_fetch_venue_success() {
        let base = spawn_fake_api().await;
        let venue = fetch_venue(&client(&base), HELSINKI).await.unwrap();

        assert_eq!(venue.slug, HELSINKI);
        assert_eq!(venue.location.latitude, 60.17094);
        assert_eq!(venue.location.longitude, 24.93087);
        assert_eq!(venue.pricing.base_price.cents(), 190);
        assert_eq!(venue.pricing.order_minimum_no_surcharge.cents(), 1000);
        assert_eq!(venue.pricing.distance_ranges.len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_venue_is_typed_not_found() {
        let base = spawn_fake_api().await;
        let err = fetch_venue(&client(&base), "no-such-venue").await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(
            err,
            VenueError::NotFound {
                slug: "no-such-venue".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_server_error_fails_whole_fetch() {
        let base = spawn_fake_api().await;
        let err = fetch_venue(&client(&base), "broken-venue").await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Request failed: 500 Internal Server Error (upstream exploded)"
        );
    }

    #[tokio::test]
    async fn test_garbled_body_is_decode_error() {
        let base = spawn_fake_api().await;
        let err = client(&base).fetch_location("garbled-venue").await.unwrap_err();
        assert!(matches!(err, VenueError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let base = format!("http://{}/venues", addr);
        let err = client(&base).fetch_pricing(HELSINKI).await.unwrap_err();
        assert!(matches!(err, VenueError::Transport(_)));
    }
}
