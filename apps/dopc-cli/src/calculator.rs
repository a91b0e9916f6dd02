//! # Delivery Calculator
//!
//! Runs one form submission end to end: validate, fetch the venue, price.
//!
//! ## Stale Results
//! A submission may still be waiting on the venue API when the user submits
//! again. Each calculation takes a generation number; only the newest one may
//! publish its outcome, older ones finish with [`AppError::Superseded`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  submit #1 ──► gen 1 ──► fetch ···················· done ──► discarded  │
//! │  submit #2 ──► gen 2 ──► fetch ······ done ──► published                │
//! │                                                                         │
//! │  latest: Mutex<Option<Calculation>>  holds gen 2 only                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use tracing::{debug, info, warn};

use dopc_core::{OrderInput, PriceResult};
use dopc_venue::{fetch_venue, VenueSource};

use crate::error::{AppError, AppResult};

/// Raw form text, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderForm {
    pub venue_slug: String,
    pub cart_value: String,
    pub user_latitude: String,
    pub user_longitude: String,
}

/// A published price breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Calculation {
    #[serde(skip)]
    pub generation: u64,
    pub venue_slug: String,
    #[serde(flatten)]
    pub result: PriceResult,
}

/// Orchestrates calculations against a [`VenueSource`].
pub struct DeliveryCalculator<S> {
    source: S,
    generation: AtomicU64,
    latest: Mutex<Option<Calculation>>,
}

impl<S: VenueSource> DeliveryCalculator<S> {
    pub fn new(source: S) -> Self {
        DeliveryCalculator {
            source,
            generation: AtomicU64::new(0),
            latest: Mutex::new(None),
        }
    }

    /// Validates, fetches and prices one submission.
    ///
    /// ## Errors
    /// - `Input` when any field is invalid; nothing is fetched
    /// - `Venue` when either venue fetch fails
    /// - `Core` when the venue does not deliver that far
    /// - `Superseded` when a newer submission started meanwhile
    pub async fn calculate(&self, form: &OrderForm) -> AppResult<Calculation> {
        let input = OrderInput::parse(
            &form.venue_slug,
            &form.cart_value,
            &form.user_latitude,
            &form.user_longitude,
        )?;

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(generation, venue = %input.venue_slug, "Calculating delivery price");

        let outcome = self.price(&input, generation).await;

        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "Discarding stale calculation");
            return Err(AppError::Superseded);
        }

        match outcome {
            Ok(result) => {
                let calculation = Calculation {
                    generation,
                    venue_slug: input.venue_slug,
                    result,
                };
                *latest = Some(calculation.clone());
                Ok(calculation)
            }
            Err(err) => {
                warn!(generation, error = %err, "Calculation failed");
                *latest = None;
                Err(err)
            }
        }
    }

    async fn price(&self, input: &OrderInput, generation: u64) -> AppResult<PriceResult> {
        let venue = fetch_venue(&self.source, &input.venue_slug).await?;

        for issue in venue.pricing.check_ranges() {
            warn!(generation, venue = %venue.slug, %issue, "Inconsistent distance ranges");
        }

        let result = input.price(venue.location, &venue.pricing)?;
        debug!(
            generation,
            distance = result.delivery_distance,
            total = result.total_price.cents(),
            "Priced order"
        );
        Ok(result)
    }

    /// The newest published calculation, if the newest one succeeded.
    pub fn latest(&self) -> Option<Calculation> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
