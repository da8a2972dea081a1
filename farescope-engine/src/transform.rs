use std::collections::HashMap;

use farescope_core::flight::{
    PriceBreakdown, TransformedFlight, TransformedItinerary, TransformedSegment,
};
use farescope_core::wire::{Dictionaries, FareDetail, FlightOffer, RawItinerary, Segment};

/// Map raw provider offers into the internal flight model. Pure, no I/O,
/// and total: unresolvable lookups degrade to the raw code, unparseable
/// prices degrade to 0.0, and the upstream offer ordering is preserved.
pub fn transform(
    offers: &[FlightOffer],
    dictionaries: Option<&Dictionaries>,
) -> Vec<TransformedFlight> {
    offers
        .iter()
        .filter_map(|offer| transform_offer(offer, dictionaries))
        .collect()
}

fn transform_offer(
    offer: &FlightOffer,
    dictionaries: Option<&Dictionaries>,
) -> Option<TransformedFlight> {
    let fares = fare_index(offer);

    let itineraries: Vec<TransformedItinerary> = offer
        .itineraries
        .iter()
        .filter_map(|itinerary| transform_itinerary(itinerary, &fares, dictionaries))
        .collect();

    if itineraries.is_empty() {
        tracing::warn!(offer_id = %offer.id, "offer has no itinerary with segments, dropping");
        return None;
    }

    let amount = parse_amount(&offer.price.grand_total)
        .or_else(|| parse_amount(&offer.price.total))
        .unwrap_or(0.0);

    Some(TransformedFlight {
        id: offer.id.clone(),
        amount,
        currency: offer.price.currency.clone(),
        itineraries,
        seats_remaining: offer.number_of_bookable_seats,
        validating_airline_codes: offer.validating_airline_codes.clone(),
        last_ticketing_date: offer.last_ticketing_date.clone(),
        price_breakdown: PriceBreakdown {
            base: offer.price.base.clone(),
            grand_total: offer.price.grand_total.clone(),
            currency: offer.price.currency.clone(),
            fees: offer.price.fees.clone(),
        },
        instant_ticketing_required: offer.instant_ticketing_required,
        one_way: offer.one_way || offer.itineraries.len() == 1,
        non_homogeneous: offer.non_homogeneous,
    })
}

/// Fare details keyed by segment id, from the first traveler pricing.
fn fare_index(offer: &FlightOffer) -> HashMap<&str, &FareDetail> {
    offer
        .traveler_pricings
        .first()
        .map(|pricing| {
            pricing
                .fare_details_by_segment
                .iter()
                .map(|fare| (fare.segment_id.as_str(), fare))
                .collect()
        })
        .unwrap_or_default()
}

fn transform_itinerary(
    itinerary: &RawItinerary,
    fares: &HashMap<&str, &FareDetail>,
    dictionaries: Option<&Dictionaries>,
) -> Option<TransformedItinerary> {
    // Overall endpoints: first segment's departure, last segment's arrival.
    let first = itinerary.segments.first()?;
    let last = itinerary.segments.last()?;

    let airline_code = first.carrier_code.clone();
    let head_fare = fares.get(first.id.as_str());

    Some(TransformedItinerary {
        duration: itinerary.duration.clone(),
        segments: itinerary
            .segments
            .iter()
            .map(|segment| transform_segment(segment, fares, dictionaries))
            .collect(),
        stops: (itinerary.segments.len() - 1) as u32,
        airline: resolve_carrier(&airline_code, dictionaries),
        airline_code,
        departure_time: first.departure.at.clone(),
        arrival_time: last.arrival.at.clone(),
        origin_code: first.departure.iata_code.clone(),
        destination_code: last.arrival.iata_code.clone(),
        cabin: head_fare.and_then(|fare| fare.cabin.clone()),
        booking_class: head_fare.and_then(|fare| fare.booking_class.clone()),
    })
}

fn transform_segment(
    segment: &Segment,
    fares: &HashMap<&str, &FareDetail>,
    dictionaries: Option<&Dictionaries>,
) -> TransformedSegment {
    let aircraft_code = segment.aircraft.as_ref().map(|aircraft| aircraft.code.clone());
    // Operating carrier is only interesting when it differs from marketing.
    let operating = segment
        .operating
        .as_ref()
        .filter(|op| op.carrier_code != segment.carrier_code);

    TransformedSegment {
        id: segment.id.clone(),
        departure: segment.departure.clone(),
        arrival: segment.arrival.clone(),
        carrier_code: segment.carrier_code.clone(),
        number: segment.number.clone(),
        duration: segment.duration.clone(),
        aircraft_name: aircraft_code
            .as_deref()
            .map(|code| resolve_aircraft(code, dictionaries)),
        aircraft_code,
        operating_carrier_code: operating.map(|op| op.carrier_code.clone()),
        operating_carrier_name: operating.map(|op| resolve_carrier(&op.carrier_code, dictionaries)),
        fare: fares.get(segment.id.as_str()).map(|fare| (*fare).clone()),
    }
}

fn resolve_carrier(code: &str, dictionaries: Option<&Dictionaries>) -> String {
    dictionaries
        .and_then(|dict| dict.carriers.get(code))
        .cloned()
        .unwrap_or_else(|| code.to_string())
}

fn resolve_aircraft(code: &str, dictionaries: Option<&Dictionaries>) -> String {
    dictionaries
        .and_then(|dict| dict.aircraft.get(code))
        .cloned()
        .unwrap_or_else(|| code.to_string())
}

fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn segment(id: &str, carrier: &str, from: &str, to: &str) -> serde_json::Value {
        json!({
            "id": id,
            "departure": { "iataCode": from, "at": format!("2025-06-01T0{id}:00:00") },
            "arrival": { "iataCode": to, "at": format!("2025-06-01T1{id}:00:00") },
            "carrierCode": carrier,
            "number": "6845",
            "duration": "PT2H30M",
            "aircraft": { "code": "320" }
        })
    }

    fn offer(id: &str, segments: Vec<serde_json::Value>) -> FlightOffer {
        serde_json::from_value(json!({
            "id": id,
            "itineraries": [{ "duration": "PT2H30M", "segments": segments }],
            "price": { "currency": "EUR", "total": "110.00", "grandTotal": "123.45" }
        }))
        .expect("offer fixture")
    }

    fn dictionaries() -> Dictionaries {
        serde_json::from_value(json!({
            "carriers": { "IB": "Iberia", "VY": "Vueling" },
            "aircraft": { "320": "Airbus A320" }
        }))
        .unwrap()
    }

    #[test]
    fn test_stops_equal_segments_minus_one() {
        for n in 1..=4usize {
            let segments = (0..n)
                .map(|i| segment(&i.to_string(), "IB", "MAD", "BCN"))
                .collect();
            let flights = transform(&[offer("1", segments)], None);
            assert_eq!(flights[0].itineraries[0].stops, (n - 1) as u32);
        }
    }

    #[test]
    fn test_carrier_resolved_from_dictionaries() {
        let flights = transform(
            &[offer("1", vec![segment("1", "IB", "MAD", "BCN")])],
            Some(&dictionaries()),
        );
        let itinerary = &flights[0].itineraries[0];
        assert_eq!(itinerary.airline, "Iberia");
        assert_eq!(itinerary.airline_code, "IB");
        assert_eq!(
            itinerary.segments[0].aircraft_name.as_deref(),
            Some("Airbus A320")
        );
    }

    #[test]
    fn test_unknown_carrier_falls_back_to_code() {
        let flights = transform(
            &[offer("1", vec![segment("1", "XQ", "MAD", "BCN")])],
            Some(&dictionaries()),
        );
        assert_eq!(flights[0].itineraries[0].airline, "XQ");
    }

    #[test]
    fn test_missing_dictionaries_fall_back_to_codes() {
        let flights = transform(&[offer("1", vec![segment("1", "IB", "MAD", "BCN")])], None);
        assert_eq!(flights[0].itineraries[0].airline, "IB");
        assert_eq!(
            flights[0].itineraries[0].segments[0].aircraft_name.as_deref(),
            Some("320")
        );
    }

    #[test]
    fn test_itinerary_endpoints_span_all_segments() {
        let flights = transform(
            &[offer(
                "1",
                vec![
                    segment("1", "IB", "MAD", "ZRH"),
                    segment("2", "IB", "ZRH", "BCN"),
                ],
            )],
            None,
        );
        let itinerary = &flights[0].itineraries[0];
        assert_eq!(itinerary.origin_code, "MAD");
        assert_eq!(itinerary.destination_code, "BCN");
        assert_eq!(itinerary.departure_time, "2025-06-01T01:00:00");
        assert_eq!(itinerary.arrival_time, "2025-06-01T12:00:00");
    }

    #[test]
    fn test_fare_details_join_by_segment_id() {
        let raw = json!({
            "id": "1",
            "itineraries": [{
                "duration": "PT5H",
                "segments": [
                    segment("7", "IB", "MAD", "ZRH"),
                    segment("8", "IB", "ZRH", "BCN")
                ]
            }],
            "price": { "currency": "EUR", "grandTotal": "200.00" },
            "travelerPricings": [{
                "travelerId": "1",
                "fareDetailsBySegment": [
                    { "segmentId": "8", "cabin": "BUSINESS", "class": "J" },
                    { "segmentId": "7", "cabin": "ECONOMY", "class": "Y", "fareBasis": "YOWIB" }
                ]
            }]
        });
        let offer: FlightOffer = serde_json::from_value(raw).unwrap();
        let flights = transform(&[offer], None);
        let itinerary = &flights[0].itineraries[0];

        // Headline cabin comes from the first segment's fare detail.
        assert_eq!(itinerary.cabin.as_deref(), Some("ECONOMY"));
        assert_eq!(itinerary.booking_class.as_deref(), Some("Y"));
        let fare = itinerary.segments[1].fare.as_ref().expect("joined fare");
        assert_eq!(fare.cabin.as_deref(), Some("BUSINESS"));
    }

    #[test]
    fn test_amount_parsed_from_grand_total_with_fallbacks() {
        let flights = transform(&[offer("1", vec![segment("1", "IB", "MAD", "BCN")])], None);
        assert_eq!(flights[0].amount, 123.45);

        let mut broken = offer("2", vec![segment("1", "IB", "MAD", "BCN")]);
        broken.price.grand_total = "not-a-number".to_string();
        let flights = transform(&[broken], None);
        assert_eq!(flights[0].amount, 110.00);

        let mut hopeless = offer("3", vec![segment("1", "IB", "MAD", "BCN")]);
        hopeless.price.grand_total = String::new();
        hopeless.price.total = String::new();
        let flights = transform(&[hopeless], None);
        assert_eq!(flights[0].amount, 0.0);
    }

    #[test]
    fn test_operating_carrier_resolved_only_when_different() {
        let mut seg = segment("1", "IB", "MAD", "BCN");
        seg["operating"] = json!({ "carrierCode": "VY" });
        let flights = transform(&[offer("1", vec![seg])], Some(&dictionaries()));
        let out = &flights[0].itineraries[0].segments[0];
        assert_eq!(out.operating_carrier_code.as_deref(), Some("VY"));
        assert_eq!(out.operating_carrier_name.as_deref(), Some("Vueling"));

        let mut same = segment("1", "IB", "MAD", "BCN");
        same["operating"] = json!({ "carrierCode": "IB" });
        let flights = transform(&[offer("2", vec![same])], Some(&dictionaries()));
        assert!(flights[0].itineraries[0].segments[0]
            .operating_carrier_code
            .is_none());
    }

    #[test]
    fn test_output_preserves_offer_order() {
        let offers = vec![
            offer("z", vec![segment("1", "IB", "MAD", "BCN")]),
            offer("a", vec![segment("1", "VY", "MAD", "BCN")]),
            offer("m", vec![segment("1", "UX", "MAD", "BCN")]),
        ];
        let flights = transform(&offers, None);
        let ids: Vec<&str> = flights.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["z", "a", "m"]);
    }

    #[test]
    fn test_round_trip_keeps_both_itineraries() {
        let raw = json!({
            "id": "rt",
            "itineraries": [
                { "duration": "PT2H", "segments": [segment("1", "IB", "MAD", "BCN")] },
                { "duration": "PT2H10M", "segments": [segment("2", "VY", "BCN", "MAD")] }
            ],
            "price": { "currency": "EUR", "grandTotal": "250.00" }
        });
        let offer: FlightOffer = serde_json::from_value(raw).unwrap();
        let flights = transform(&[offer], None);
        assert_eq!(flights[0].itineraries.len(), 2);
        assert!(!flights[0].one_way);
        assert_eq!(flights[0].itineraries[1].airline_code, "VY");
    }
}
