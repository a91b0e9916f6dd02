//! # dopc-venue: Venue Data for DOPC
//!
//! Fetches what the pricing core needs about a venue: where it is, and how it
//! prices delivery.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         dopc-venue Crate                                │
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────────────────────────┐ │
//! │  │                        VenueSource (trait)                        │ │
//! │  │        fetch_location(slug)          fetch_pricing(slug)          │ │
//! │  └──────────────┬───────────────────────────────┬────────────────────┘ │
//! │                 │                               │                       │
//! │  ┌──────────────▼─────────────┐   ┌─────────────▼─────────────────────┐ │
//! │  │      HttpVenueClient       │   │   test fakes (in-memory)          │ │
//! │  │  reqwest + wire decoding   │   │                                   │ │
//! │  └────────────────────────────┘   └───────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`client`] - `VenueSource`, `HttpVenueClient`, `fetch_venue`
//! - [`wire`] - JSON payloads and their conversion to core types
//! - [`error`] - `VenueError`

pub mod client;
pub mod error;
pub mod wire;

pub use client::{fetch_venue, HttpVenueClient, Venue, VenueSource, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{VenueError, VenueResult};
