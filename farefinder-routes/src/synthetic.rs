//! Placeholder itineraries routed through hub airports.
//!
//! Prices and durations here are fixed formulas, not provider quotes. They
//! stand in until each leg is priced with a real provider search.

use farefinder_core::{Flight, SearchQuery};

pub const ONE_STOP_AIRLINE: &str = "Multi-Airline";
pub const TWO_STOP_AIRLINE: &str = "Multi-Airline Express";
pub const ONE_STOP_DURATION: &str = "8h 30m";
pub const TWO_STOP_DURATION: &str = "12h 45m";
const CURRENCY: &str = "USD";

/// `origin -> hub -> destination`, priced at `350 + 10 * len(hub)`.
pub fn via_hub(query: &SearchQuery, hub: &str) -> Flight {
    Flight {
        id: format!("multi-{}-{}-{}", query.origin, hub, query.destination),
        origin: query.origin.clone(),
        destination: query.destination.clone(),
        date: query.date,
        price: 350.0 + 10.0 * hub.len() as f64,
        currency: CURRENCY.to_string(),
        airline: ONE_STOP_AIRLINE.to_string(),
        duration: ONE_STOP_DURATION.to_string(),
        stops: 1,
        route: vec![query.origin.clone(), hub.to_string(), query.destination.clone()],
        booking_url: None,
    }
}

/// `origin -> first -> second -> destination`, priced at
/// `250 + 5 * (len(first) + len(second))`.
pub fn via_two_hubs(query: &SearchQuery, first: &str, second: &str) -> Flight {
    Flight {
        id: format!(
            "multi2-{}-{}-{}-{}",
            query.origin, first, second, query.destination
        ),
        origin: query.origin.clone(),
        destination: query.destination.clone(),
        date: query.date,
        price: 250.0 + 5.0 * (first.len() + second.len()) as f64,
        currency: CURRENCY.to_string(),
        airline: TWO_STOP_AIRLINE.to_string(),
        duration: TWO_STOP_DURATION.to_string(),
        stops: 2,
        route: vec![
            query.origin.clone(),
            first.to_string(),
            second.to_string(),
            query.destination.clone(),
        ],
        booking_url: None,
    }
}

/// Hubs usable for a one-stop route: neither endpoint of the query.
pub fn one_stop_hubs<'a>(candidates: &[&'a str], query: &SearchQuery) -> Vec<&'a str> {
    candidates
        .iter()
        .copied()
        .filter(|hub| *hub != query.origin && *hub != query.destination)
        .collect()
}

/// Unordered hub pairs in candidate order, skipping any pair that touches
/// an endpoint or repeats a hub.
pub fn two_stop_pairs<'a>(candidates: &'a [String], query: &SearchQuery) -> Vec<(&'a str, &'a str)> {
    let usable = |hub: &str| hub != query.origin && hub != query.destination;

    let mut pairs = Vec::new();
    for (i, first) in candidates.iter().enumerate() {
        for second in &candidates[i + 1..] {
            if first != second && usable(first.as_str()) && usable(second.as_str()) {
                pairs.push((first.as_str(), second.as_str()));
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn query() -> SearchQuery {
        SearchQuery::new("BKK", "SIN", NaiveDate::from_ymd_opt(2030, 3, 1).unwrap(), 1)
    }

    #[test]
    fn test_one_stop_shape() {
        let flight = via_hub(&query(), "DXB");
        assert_eq!(flight.id, "multi-BKK-DXB-SIN");
        assert_eq!(flight.route, vec!["BKK", "DXB", "SIN"]);
        assert_eq!(flight.stops, 1);
        assert_eq!(flight.price, 380.0);
        assert_eq!(flight.airline, ONE_STOP_AIRLINE);
        assert_eq!(flight.duration, "8h 30m");
    }

    #[test]
    fn test_two_stop_shape() {
        let flight = via_two_hubs(&query(), "DXB", "IST");
        assert_eq!(flight.id, "multi2-BKK-DXB-IST-SIN");
        assert_eq!(flight.route, vec!["BKK", "DXB", "IST", "SIN"]);
        assert_eq!(flight.stops, 2);
        assert_eq!(flight.price, 280.0);
        assert_eq!(flight.duration, "12h 45m");
    }

    #[test]
    fn test_endpoints_are_never_hubs() {
        let q = query();
        assert_eq!(one_stop_hubs(&["BKK", "DXB", "SIN", "DOH"], &q), vec!["DXB", "DOH"]);

        let candidates: Vec<String> = ["DXB", "SIN", "DOH", "IST", "DOH"].iter().map(|s| s.to_string()).collect();
        let pairs = two_stop_pairs(&candidates, &q);
        assert!(pairs.iter().all(|(a, b)| a != b && *a != "SIN" && *b != "SIN"));
        assert_eq!(pairs, vec![("DXB", "DOH"), ("DXB", "IST"), ("DXB", "DOH"), ("DOH", "IST"), ("IST", "DOH")]);
    }
}
