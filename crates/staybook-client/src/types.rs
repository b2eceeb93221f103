//! Wire-shape declarations for the Staybook backend API
//!
//! This module defines the passive records exchanged with the booking
//! backend. They mirror the backend's JSON format exactly: camelCase field
//! names, Mongo-style `_id` identifiers, RFC 3339 timestamps. No invariant
//! enforcement or lifecycle management lives here; the endpoints producing
//! these shapes are out of scope for this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize a nullable wire field into a double `Option`, so that an
/// explicit `null` (`Some(None)`) is distinguished from an absent field
/// (`None`, supplied by `#[serde(default)]`).
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

/// Role assigned to a user account
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    User,
    Admin,
    HotelOwner,
}

/// Postal address shared by user profiles and hotel locations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: String,
}

/// Budget range within a user's travel preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetRange {
    pub min: f64,
    pub max: f64,
}

/// Travel preferences attached to a user profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TravelPreferences {
    pub preferred_destinations: Vec<String>,
    pub preferred_hotel_types: Vec<String>,
    pub budget_range: BudgetRange,
}

/// A registered user of the booking platform
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,

    pub email: String,

    /// Password hash as stored by the backend; never populated on reads
    /// from authenticated endpoints
    pub password: String,

    pub first_name: String,
    pub last_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<TravelPreferences>,

    /// Lifetime booking count aggregate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_bookings: Option<u64>,

    /// Lifetime spend aggregate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_spent: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Geographic position and address of a property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HotelLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub address: Address,
}

/// Contact details published for a property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HotelContact {
    pub phone: String,
    pub email: String,
    pub website: String,
}

/// House policies published for a property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HotelPolicies {
    pub check_in_time: String,
    pub check_out_time: String,
    pub cancellation_policy: String,
    pub pet_policy: String,
    pub smoking_policy: String,
}

/// Amenity flags published for a property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Amenities {
    pub parking: bool,
    pub wifi: bool,
    pub pool: bool,
    pub gym: bool,
    pub spa: bool,
    pub restaurant: bool,
    pub bar: bool,
    pub airport_shuttle: bool,
    pub business_center: bool,
}

/// A hotel listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    #[serde(rename = "_id")]
    pub id: String,

    /// Owning user's identifier
    pub user_id: String,

    pub name: String,
    pub city: String,
    pub country: String,
    pub description: String,

    /// Property categories, e.g. "Budget", "Boutique"
    #[serde(rename = "type")]
    pub hotel_type: Vec<String>,

    pub adult_count: u32,
    pub child_count: u32,
    pub facilities: Vec<String>,
    pub price_per_night: f64,
    pub star_rating: u8,
    pub image_urls: Vec<String>,
    pub last_updated: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<HotelLocation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<HotelContact>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub policies: Option<HotelPolicies>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Amenities>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_bookings: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_revenue: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupancy_rate: Option<f64>,

    /// Moderation: whether the listing passed review
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_approved: Option<bool>,

    /// Moderation: reviewer feedback from the most recent rejection.
    /// Nullable on the wire, so a double Option distinguishes "absent"
    /// from an explicit null.
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_rejection_reason: Option<Option<String>>,

    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_rejected_at: Option<Option<DateTime<Utc>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Lifecycle state of a booking
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    Refunded,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
            BookingStatus::Refunded => "refunded",
        }
    }
}

/// Settlement state of a booking's payment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

/// A stay booked by a user at a hotel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,

    pub user_id: String,
    pub hotel_id: String,

    pub first_name: String,
    pub last_name: String,
    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    pub adult_count: u32,
    pub child_count: u32,

    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub total_cost: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_amount: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A hotel listing together with its bookings, as returned by
/// owner-facing endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelWithBookings {
    #[serde(flatten)]
    pub hotel: Hotel,
    pub bookings: Vec<Booking>,
}

/// Pagination envelope on search results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Total number of matching listings
    pub total: u64,
    /// Current page, 1-based
    pub page: u64,
    /// Total number of pages
    pub pages: u64,
}

/// Response shape of the hotel search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelSearchResponse {
    pub data: Vec<Hotel>,
    pub pagination: Pagination,
}

/// Ephemeral description of a pending payment transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub order_id: String,
    /// Amount in the smallest currency unit, as issued by the payment
    /// provider
    pub amount: u64,
    pub currency: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,

    pub total_cost: f64,
}
