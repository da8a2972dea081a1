use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use farescope_core::duration::duration_to_minutes;
use farescope_core::flight::TransformedFlight;

/// Stop-count bucket. A round trip is bucketed by the worst (maximum) stop
/// count across its itineraries, so one direct leg plus one 1-stop leg
/// counts as "1".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopsFilter {
    #[default]
    #[serde(rename = "any")]
    Any,
    #[serde(rename = "0")]
    NonStop,
    #[serde(rename = "1")]
    OneStop,
    #[serde(rename = "2+")]
    TwoPlus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    #[default]
    PriceAsc,
    PriceDesc,
    DurationAsc,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub stops: StopsFilter,
    /// Selected airline names or codes; empty means no airline filtering.
    #[serde(default)]
    pub airlines: Vec<String>,
    #[serde(default)]
    pub sort: SortOption,
}

/// Derive a filtered, sorted view over the flight list. The input is never
/// mutated; the result is a fresh ordering over clones of the surviving
/// entries. Sorting is stable, so equal keys keep their upstream order.
pub fn apply(flights: &[TransformedFlight], criteria: &FilterCriteria) -> Vec<TransformedFlight> {
    let mut result: Vec<TransformedFlight> = flights
        .iter()
        .filter(|flight| matches(flight, criteria))
        .cloned()
        .collect();

    match criteria.sort {
        SortOption::PriceAsc => result.sort_by(|a, b| compare_amount(a, b)),
        SortOption::PriceDesc => result.sort_by(|a, b| compare_amount(b, a)),
        SortOption::DurationAsc => result.sort_by_key(first_leg_minutes),
    }

    result
}

fn matches(flight: &TransformedFlight, criteria: &FilterCriteria) -> bool {
    // Price bounds are inclusive at both ends.
    if let Some(min) = criteria.min_price {
        if flight.amount < min {
            return false;
        }
    }
    if let Some(max) = criteria.max_price {
        if flight.amount > max {
            return false;
        }
    }

    let max_stops = flight
        .itineraries
        .iter()
        .map(|itinerary| itinerary.stops)
        .max()
        .unwrap_or(0);
    let stops_ok = match criteria.stops {
        StopsFilter::Any => true,
        StopsFilter::NonStop => max_stops == 0,
        StopsFilter::OneStop => max_stops == 1,
        StopsFilter::TwoPlus => max_stops >= 2,
    };
    if !stops_ok {
        return false;
    }

    if !criteria.airlines.is_empty() {
        let selected = flight.itineraries.iter().any(|itinerary| {
            criteria
                .airlines
                .iter()
                .any(|airline| airline == &itinerary.airline || airline == &itinerary.airline_code)
        });
        if !selected {
            return false;
        }
    }

    true
}

fn compare_amount(a: &TransformedFlight, b: &TransformedFlight) -> Ordering {
    a.amount.partial_cmp(&b.amount).unwrap_or(Ordering::Equal)
}

/// Sort key for `DurationAsc`: the first itinerary's duration in minutes.
/// Unparseable durations sort last rather than poisoning the order.
fn first_leg_minutes(flight: &TransformedFlight) -> u32 {
    flight
        .itineraries
        .first()
        .and_then(|itinerary| duration_to_minutes(&itinerary.duration))
        .unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use farescope_core::flight::{PriceBreakdown, TransformedItinerary};

    fn itinerary(airline: &str, code: &str, stops: u32, duration: &str) -> TransformedItinerary {
        TransformedItinerary {
            duration: duration.to_string(),
            segments: Vec::new(),
            stops,
            airline: airline.to_string(),
            airline_code: code.to_string(),
            departure_time: "2025-06-01T07:35:00".to_string(),
            arrival_time: "2025-06-01T10:05:00".to_string(),
            origin_code: "MAD".to_string(),
            destination_code: "BCN".to_string(),
            cabin: None,
            booking_class: None,
        }
    }

    fn flight(id: &str, amount: f64, itineraries: Vec<TransformedItinerary>) -> TransformedFlight {
        TransformedFlight {
            id: id.to_string(),
            amount,
            currency: "EUR".to_string(),
            itineraries,
            seats_remaining: None,
            validating_airline_codes: Vec::new(),
            last_ticketing_date: None,
            price_breakdown: PriceBreakdown::default(),
            instant_ticketing_required: false,
            one_way: true,
            non_homogeneous: false,
        }
    }

    fn direct(id: &str, amount: f64, airline: &str) -> TransformedFlight {
        flight(id, amount, vec![itinerary(airline, airline, 0, "PT2H")])
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let flights = vec![
            direct("a", 99.99, "IB"),
            direct("b", 100.00, "IB"),
            direct("c", 500.00, "IB"),
        ];
        let criteria = FilterCriteria {
            min_price: Some(100.0),
            max_price: Some(500.0),
            ..Default::default()
        };
        let kept = apply(&flights, &criteria);
        let ids: Vec<&str> = kept.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["b", "c"]);
    }

    #[test]
    fn test_empty_airline_selection_filters_nothing() {
        let flights = vec![direct("a", 50.0, "Iberia"), direct("b", 60.0, "Vueling")];
        let kept = apply(&flights, &FilterCriteria::default());
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_airline_selection_matches_any_itinerary() {
        let round_trip = flight(
            "rt",
            200.0,
            vec![
                itinerary("Iberia", "IB", 0, "PT2H"),
                itinerary("Vueling", "VY", 0, "PT2H"),
            ],
        );
        let criteria = FilterCriteria {
            airlines: vec!["Vueling".to_string()],
            ..Default::default()
        };
        assert_eq!(apply(&[round_trip.clone()], &criteria).len(), 1);

        let criteria = FilterCriteria {
            airlines: vec!["Lufthansa".to_string()],
            ..Default::default()
        };
        assert!(apply(&[round_trip], &criteria).is_empty());
    }

    #[test]
    fn test_stops_bucket_uses_worst_leg() {
        // One direct leg, one 1-stop leg: counts as "1 stop" for filtering.
        let round_trip = flight(
            "rt",
            200.0,
            vec![
                itinerary("Iberia", "IB", 0, "PT2H"),
                itinerary("Iberia", "IB", 1, "PT4H"),
            ],
        );
        let one_stop = FilterCriteria {
            stops: StopsFilter::OneStop,
            ..Default::default()
        };
        assert_eq!(apply(&[round_trip.clone()], &one_stop).len(), 1);

        let non_stop = FilterCriteria {
            stops: StopsFilter::NonStop,
            ..Default::default()
        };
        assert!(apply(&[round_trip], &non_stop).is_empty());
    }

    #[test]
    fn test_two_plus_bucket() {
        let flights = vec![
            flight("a", 10.0, vec![itinerary("IB", "IB", 2, "PT9H")]),
            flight("b", 20.0, vec![itinerary("IB", "IB", 3, "PT12H")]),
            flight("c", 30.0, vec![itinerary("IB", "IB", 1, "PT5H")]),
        ];
        let criteria = FilterCriteria {
            stops: StopsFilter::TwoPlus,
            ..Default::default()
        };
        assert_eq!(apply(&flights, &criteria).len(), 2);
    }

    #[test]
    fn test_price_sort_is_stable() {
        let flights = vec![
            direct("first", 120.0, "IB"),
            direct("second", 80.0, "IB"),
            direct("third", 80.0, "VY"),
            direct("fourth", 200.0, "IB"),
        ];
        let criteria = FilterCriteria {
            sort: SortOption::PriceAsc,
            ..Default::default()
        };
        let sorted = apply(&flights, &criteria);
        let ids: Vec<&str> = sorted.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["second", "third", "first", "fourth"]);
    }

    #[test]
    fn test_price_desc_sort() {
        let flights = vec![direct("a", 80.0, "IB"), direct("b", 200.0, "IB")];
        let criteria = FilterCriteria {
            sort: SortOption::PriceDesc,
            ..Default::default()
        };
        let sorted = apply(&flights, &criteria);
        assert_eq!(sorted[0].id, "b");
    }

    #[test]
    fn test_duration_sort_compares_parsed_minutes() {
        // Lexicographically "PT10H" < "PT2H"; parsed it must come after.
        let flights = vec![
            flight("long", 50.0, vec![itinerary("IB", "IB", 0, "PT10H")]),
            flight("short", 60.0, vec![itinerary("IB", "IB", 0, "PT2H")]),
            flight("broken", 70.0, vec![itinerary("IB", "IB", 0, "whatever")]),
        ];
        let criteria = FilterCriteria {
            sort: SortOption::DurationAsc,
            ..Default::default()
        };
        let sorted = apply(&flights, &criteria);
        let ids: Vec<&str> = sorted.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["short", "long", "broken"]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let flights = vec![direct("b", 200.0, "IB"), direct("a", 80.0, "IB")];
        let criteria = FilterCriteria {
            min_price: Some(100.0),
            ..Default::default()
        };
        let _ = apply(&flights, &criteria);
        assert_eq!(flights[0].id, "b");
        assert_eq!(flights.len(), 2);
    }
}
