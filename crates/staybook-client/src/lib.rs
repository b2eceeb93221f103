//! Staybook client - data-access layer for the hotel-booking backend
//!
//! This crate wraps every outbound HTTP call to the booking backend with
//! credential attachment and a bounded retry policy, and declares the wire
//! shapes its callers exchange with the backend.
//!
//! # Main Components
//!
//! - **Gateway**: authenticated, retrying HTTP client ([`http::Gateway`])
//! - **Session storage**: injected token capability ([`session::SessionStore`])
//! - **Configuration**: base-address resolution and retry policy ([`config`])
//! - **Wire types**: passive records for users, hotels, bookings, and
//!   payment intents ([`types`])
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use staybook_client::{Gateway, GatewayConfig, HotelSearchResponse};
//! use staybook_client::session::FileSessionStore;
//!
//! async fn example() -> staybook_client::Result<()> {
//!     let session = Arc::new(FileSessionStore::default_location()?);
//!     let gateway = Gateway::new(GatewayConfig::default(), session)?;
//!
//!     let results: HotelSearchResponse =
//!         gateway.get("/api/hotels/search?destination=Lisbon").await?;
//!     println!("{} hotels found", results.pagination.total);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod session;
pub mod types;

// Re-export main types for convenience
pub use config::{resolve_base_url, GatewayConfig};
pub use error::{Error, Result};
pub use http::{ErrorClassification, Gateway, HttpError, RetryDecision, RetryPolicy};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
pub use types::{
    // Domain records
    Booking, Hotel, HotelWithBookings, User,

    // Nested records
    Address, Amenities, BudgetRange, HotelContact, HotelLocation, HotelPolicies,
    TravelPreferences,

    // Enumerations
    BookingStatus, PaymentStatus, UserRole,

    // Response envelopes
    HotelSearchResponse, Pagination, PaymentIntentResponse,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_error_creation() {
        let err = Error::Http {
            message: "Test error".to_string(),
            status_code: Some(500),
            source: None,
        };
        assert!(err.to_string().contains("Test error"));
    }
}
