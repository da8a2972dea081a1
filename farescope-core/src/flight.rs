use serde::{Deserialize, Serialize};

use crate::wire::{FareDetail, Fee, SegmentPoint};

/// The display-friendly flight entity the rest of the system works with.
/// One offer from upstream becomes exactly one of these; ordering from
/// upstream is preserved. Serialized camelCase for the consuming UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformedFlight {
    pub id: String,
    /// Grand total parsed from the offer price block.
    pub amount: f64,
    pub currency: String,
    /// One itinerary for a one-way trip, two for a round trip.
    pub itineraries: Vec<TransformedItinerary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats_remaining: Option<u32>,
    pub validating_airline_codes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_ticketing_date: Option<String>,
    pub price_breakdown: PriceBreakdown,
    pub instant_ticketing_required: bool,
    pub one_way: bool,
    pub non_homogeneous: bool,
}

/// One directional leg (outbound or return) of a trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformedItinerary {
    /// ISO-8601 duration as received (e.g. `PT2H30M`).
    pub duration: String,
    pub segments: Vec<TransformedSegment>,
    /// Intermediate layovers: segments − 1.
    pub stops: u32,
    /// Display name of the first segment's marketing carrier; falls back to
    /// the raw code when the dictionary has no entry.
    pub airline: String,
    pub airline_code: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub origin_code: String,
    pub destination_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cabin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_class: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformedSegment {
    pub id: String,
    pub departure: SegmentPoint,
    pub arrival: SegmentPoint,
    pub carrier_code: String,
    pub number: String,
    pub duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aircraft_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aircraft_name: Option<String>,
    /// Present only when the operating carrier differs from the marketing one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_carrier_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_carrier_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fare: Option<FareDetail>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub base: String,
    pub grand_total: String,
    pub currency: String,
    pub fees: Vec<Fee>,
}

/// One bar of the price-trend view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceDataPoint {
    /// ISO calendar date (`YYYY-MM-DD`).
    pub date: String,
    /// Rounded to 2 decimals.
    pub price: f64,
    pub currency: String,
}
