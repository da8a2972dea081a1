use chrono::{Datelike, Months, NaiveDate, Weekday};
use rand::{rngs::StdRng, Rng, SeedableRng};

use farescope_core::flight::PriceDataPoint;
use farescope_core::wire::FlightDestination;

const PRICE_FLOOR: f64 = 25.0;

/// First and last calendar day of the month containing `day`.
pub fn month_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = day.with_day(1).unwrap_or(day);
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(start);
    (start, end)
}

/// Produce one price point per calendar day of the month containing `month`.
///
/// Prices are derived entirely from hashes of the route and the date, so
/// identical inputs always yield identical output. The calendar popover and
/// the trend graph both render from this, and they must agree across
/// renders.
pub fn generate(origin: &str, destination: &str, month: NaiveDate) -> Vec<PriceDataPoint> {
    let (start, end) = month_bounds(month);
    let route = format!(
        "{}-{}",
        origin.to_ascii_uppercase(),
        destination.to_ascii_uppercase()
    );
    // Route-level base fare, 30..=80.
    let base = 30.0 + (seed_hash(&route) % 51) as f64;

    let mut points = Vec::with_capacity(31);
    let mut day = start;
    while day <= end {
        points.push(PriceDataPoint {
            date: day.format("%Y-%m-%d").to_string(),
            price: day_price(&route, day, base),
            currency: "EUR".to_string(),
        });
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    points
}

fn day_price(route: &str, day: NaiveDate, base: f64) -> f64 {
    let hash = seed_hash(&format!("{route}-{}", day.format("%Y-%m-%d")));
    // Day-to-day jitter, ±10.
    let mut price = base + (hash % 21) as f64 - 10.0;

    if matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
        // Weekend premium, +15..+40.
        price += 15.0 + (hash % 26) as f64;
    }
    let dom = day.day();
    if (10..=20).contains(&dom) {
        // Mid-month lull, -5..-15.
        price -= 5.0 + (hash % 11) as f64;
    }
    if dom <= 5 || dom >= 25 {
        // Month-edge premium, +10..+25.
        price += 10.0 + (hash % 16) as f64;
    }

    let mut rng = StdRng::seed_from_u64(hash);
    price += rng.gen_range(-15.0..=15.0);

    (price.max(PRICE_FLOOR) * 100.0).round() / 100.0
}

fn seed_hash(input: &str) -> u64 {
    input
        .bytes()
        .fold(5381u64, |hash, byte| hash.wrapping_mul(33).wrapping_add(byte as u64))
}

/// Live-data path: map cheapest-dates rows onto price points. Rows with an
/// unparseable total are dropped.
pub fn from_cheapest_dates(rows: &[FlightDestination]) -> Vec<PriceDataPoint> {
    rows.iter()
        .filter_map(|row| match row.price.total.trim().parse::<f64>() {
            Ok(price) => Some(PriceDataPoint {
                date: row.departure_date.clone(),
                price: (price * 100.0).round() / 100.0,
                currency: "EUR".to_string(),
            }),
            Err(_) => {
                tracing::debug!(date = %row.departure_date, "dropping cheapest-date row with unparseable total");
                None
            }
        })
        .collect()
}
