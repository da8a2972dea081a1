use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Provider wire models (flight-offers search v2 shapes)
// ============================================================================
//
// These mirror the upstream JSON exactly (camelCase) and are tolerant of
// absent fields: anything the transformer can degrade over is defaulted so a
// sparse payload deserializes instead of failing the whole response.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffer {
    pub id: String,
    #[serde(default)]
    pub one_way: bool,
    #[serde(default)]
    pub instant_ticketing_required: bool,
    #[serde(default)]
    pub non_homogeneous: bool,
    #[serde(default)]
    pub number_of_bookable_seats: Option<u32>,
    pub itineraries: Vec<RawItinerary>,
    pub price: OfferPrice,
    #[serde(default)]
    pub validating_airline_codes: Vec<String>,
    #[serde(default)]
    pub traveler_pricings: Vec<TravelerPricing>,
    #[serde(default)]
    pub last_ticketing_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawItinerary {
    #[serde(default)]
    pub duration: String,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    #[serde(default)]
    pub id: String,
    pub departure: SegmentPoint,
    pub arrival: SegmentPoint,
    pub carrier_code: String,
    pub number: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub aircraft: Option<Aircraft>,
    #[serde(default)]
    pub operating: Option<OperatingCarrier>,
    #[serde(default)]
    pub number_of_stops: u32,
    #[serde(default, rename = "blacklistedInEU")]
    pub blacklisted_in_eu: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentPoint {
    pub iata_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<String>,
    /// Local timestamp, ISO 8601 (e.g. `2025-06-01T07:35:00`).
    pub at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aircraft {
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingCarrier {
    pub carrier_code: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OfferPrice {
    pub currency: String,
    pub total: String,
    pub base: String,
    pub grand_total: String,
    pub fees: Vec<Fee>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fee {
    pub amount: String,
    #[serde(rename = "type")]
    pub fee_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelerPricing {
    #[serde(default)]
    pub traveler_id: String,
    #[serde(default)]
    pub fare_option: Option<String>,
    #[serde(default)]
    pub traveler_type: Option<String>,
    #[serde(default)]
    pub fare_details_by_segment: Vec<FareDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareDetail {
    pub segment_id: String,
    #[serde(default)]
    pub cabin: Option<String>,
    #[serde(default)]
    pub fare_basis: Option<String>,
    #[serde(default)]
    pub branded_fare: Option<String>,
    #[serde(default, rename = "class")]
    pub booking_class: Option<String>,
    #[serde(default)]
    pub included_checked_bags: Option<CheckedBags>,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckedBags {
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub weight_unit: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amenity {
    pub description: String,
    #[serde(default)]
    pub is_chargeable: bool,
    #[serde(default)]
    pub amenity_type: Option<String>,
}

/// Side-table mapping carrier/aircraft codes to display names. Either map
/// may be missing upstream; lookups fall back to the raw code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dictionaries {
    #[serde(default)]
    pub carriers: HashMap<String, String>,
    #[serde(default)]
    pub aircraft: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OffersResponse {
    #[serde(default)]
    pub data: Vec<FlightOffer>,
    #[serde(default)]
    pub dictionaries: Option<Dictionaries>,
}

// ============================================================================
// Airport / city lookup models
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Airport {
    pub name: String,
    pub detailed_name: String,
    pub iata_code: String,
    pub sub_type: String,
    pub address: AirportAddress,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AirportAddress {
    pub city_name: String,
    pub city_code: String,
    pub country_name: String,
    pub country_code: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationsResponse {
    #[serde(default)]
    pub data: Vec<Airport>,
}

// ============================================================================
// Cheapest-dates lookup models
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDestination {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    #[serde(default)]
    pub return_date: Option<String>,
    pub price: DestinationPrice,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationPrice {
    pub total: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatesResponse {
    #[serde(default)]
    pub data: Vec<FlightDestination>,
}
