//! Deterministic local data served when no provider credentials are
//! configured. Mock offers are built as raw wire payloads and run through
//! the same transformer as live responses, so the rest of the stack
//! exercises one code path.

use std::collections::HashMap;

use farescope_core::flight::TransformedFlight;
use farescope_core::search::SearchParams;
use farescope_core::wire::{
    Aircraft, Airport, AirportAddress, Dictionaries, FlightOffer, OfferPrice, RawItinerary,
    Segment, SegmentPoint,
};
use farescope_engine::transform;

const CARRIERS: &[(&str, &str)] = &[
    ("IB", "Iberia"),
    ("VY", "Vueling"),
    ("LH", "Lufthansa"),
    ("AF", "Air France"),
    ("UX", "Air Europa"),
];

const AIRPORTS: &[(&str, &str, &str, &str)] = &[
    ("MAD", "Adolfo Suarez Madrid-Barajas Airport", "Madrid", "Spain"),
    ("BCN", "Josep Tarradellas Barcelona-El Prat Airport", "Barcelona", "Spain"),
    ("LIS", "Humberto Delgado Airport", "Lisbon", "Portugal"),
    ("CDG", "Charles de Gaulle Airport", "Paris", "France"),
    ("LHR", "Heathrow Airport", "London", "United Kingdom"),
    ("FRA", "Frankfurt Airport", "Frankfurt", "Germany"),
    ("AMS", "Schiphol Airport", "Amsterdam", "Netherlands"),
    ("FCO", "Leonardo da Vinci Fiumicino Airport", "Rome", "Italy"),
    ("ZRH", "Zurich Airport", "Zurich", "Switzerland"),
    ("JFK", "John F. Kennedy International Airport", "New York", "United States"),
];

pub fn flights(params: &SearchParams) -> Vec<TransformedFlight> {
    let route = format!("{}-{}", params.origin, params.destination);
    let hash = seed_hash(&route);

    let (code, _) = CARRIERS[(hash % CARRIERS.len() as u64) as usize];
    let (alt_code, _) = CARRIERS[((hash / 7) % CARRIERS.len() as u64) as usize];
    let base = 60.0 + (hash % 161) as f64;

    let mut offers = vec![
        direct_offer("mock-1", params, code, base),
        one_stop_offer("mock-2", params, alt_code, base * 0.82),
    ];
    // Cheap red-eye variant on longer fares only.
    if base > 120.0 {
        offers.push(direct_offer("mock-3", params, alt_code, base * 0.65));
    }

    transform(&offers, Some(&dictionaries()))
}

pub fn airports(keyword: &str) -> Vec<Airport> {
    let needle = keyword.to_ascii_lowercase();
    AIRPORTS
        .iter()
        .filter(|(iata, name, city, _)| {
            iata.to_ascii_lowercase().contains(&needle)
                || name.to_ascii_lowercase().contains(&needle)
                || city.to_ascii_lowercase().contains(&needle)
        })
        .map(|(iata, name, city, country)| Airport {
            name: name.to_string(),
            detailed_name: format!("{city}/{country}"),
            iata_code: iata.to_string(),
            sub_type: "CITY".to_string(),
            address: AirportAddress {
                city_name: city.to_string(),
                city_code: iata.to_string(),
                country_name: country.to_string(),
                country_code: String::new(),
            },
        })
        .collect()
}

fn dictionaries() -> Dictionaries {
    let carriers: HashMap<String, String> = CARRIERS
        .iter()
        .map(|(code, name)| (code.to_string(), name.to_string()))
        .collect();
    let aircraft: HashMap<String, String> = [
        ("320", "Airbus A320"),
        ("321", "Airbus A321"),
        ("738", "Boeing 737-800"),
    ]
    .into_iter()
    .map(|(code, name)| (code.to_string(), name.to_string()))
    .collect();
    Dictionaries { carriers, aircraft }
}

fn direct_offer(id: &str, params: &SearchParams, carrier: &str, amount: f64) -> FlightOffer {
    let mut itineraries = vec![RawItinerary {
        duration: "PT2H30M".to_string(),
        segments: vec![segment(
            "1",
            carrier,
            &params.origin,
            &params.destination,
            &params.date,
            "07:35",
            "10:05",
            "PT2H30M",
            "320",
        )],
    }];
    if let Some(return_date) = &params.return_date {
        itineraries.push(RawItinerary {
            duration: "PT2H35M".to_string(),
            segments: vec![segment(
                "2",
                carrier,
                &params.destination,
                &params.origin,
                return_date,
                "18:20",
                "20:55",
                "PT2H35M",
                "320",
            )],
        });
    }
    offer(id, itineraries, amount)
}

fn one_stop_offer(id: &str, params: &SearchParams, carrier: &str, amount: f64) -> FlightOffer {
    let via = if params.origin != "ZRH" && params.destination != "ZRH" {
        "ZRH"
    } else {
        "FRA"
    };
    let mut itineraries = vec![RawItinerary {
        duration: "PT5H45M".to_string(),
        segments: vec![
            segment(
                "11", carrier, &params.origin, via, &params.date, "09:10", "11:20", "PT2H10M",
                "321",
            ),
            segment(
                "12",
                carrier,
                via,
                &params.destination,
                &params.date,
                "12:40",
                "14:55",
                "PT2H15M",
                "738",
            ),
        ],
    }];
    if let Some(return_date) = &params.return_date {
        itineraries.push(RawItinerary {
            duration: "PT5H50M".to_string(),
            segments: vec![
                segment(
                    "13",
                    carrier,
                    &params.destination,
                    via,
                    return_date,
                    "08:05",
                    "10:15",
                    "PT2H10M",
                    "738",
                ),
                segment(
                    "14",
                    carrier,
                    via,
                    &params.origin,
                    return_date,
                    "11:35",
                    "13:55",
                    "PT2H20M",
                    "321",
                ),
            ],
        });
    }
    offer(id, itineraries, amount)
}

#[allow(clippy::too_many_arguments)]
fn segment(
    id: &str,
    carrier: &str,
    from: &str,
    to: &str,
    date: &str,
    departs: &str,
    arrives: &str,
    duration: &str,
    aircraft: &str,
) -> Segment {
    Segment {
        id: id.to_string(),
        departure: SegmentPoint {
            iata_code: from.to_string(),
            terminal: None,
            at: format!("{date}T{departs}:00"),
        },
        arrival: SegmentPoint {
            iata_code: to.to_string(),
            terminal: None,
            at: format!("{date}T{arrives}:00"),
        },
        carrier_code: carrier.to_string(),
        number: format!("{}", 1000 + (seed_hash(id) % 9000)),
        duration: duration.to_string(),
        aircraft: Some(Aircraft {
            code: aircraft.to_string(),
        }),
        operating: None,
        number_of_stops: 0,
        blacklisted_in_eu: None,
    }
}

fn offer(id: &str, itineraries: Vec<RawItinerary>, amount: f64) -> FlightOffer {
    FlightOffer {
        id: id.to_string(),
        one_way: itineraries.len() == 1,
        instant_ticketing_required: false,
        non_homogeneous: false,
        number_of_bookable_seats: Some(9),
        itineraries,
        price: OfferPrice {
            currency: "EUR".to_string(),
            total: format!("{amount:.2}"),
            base: format!("{:.2}", amount * 0.8),
            grand_total: format!("{amount:.2}"),
            fees: Vec::new(),
        },
        validating_airline_codes: Vec::new(),
        traveler_pricings: Vec::new(),
        last_ticketing_date: None,
    }
}

fn seed_hash(input: &str) -> u64 {
    input
        .bytes()
        .fold(5381u64, |hash, byte| hash.wrapping_mul(33).wrapping_add(byte as u64))
}
