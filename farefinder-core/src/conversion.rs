//! Mapping of provider flight offers onto [`Flight`] records.

use tracing::debug;

use crate::carriers::CarrierTable;
use crate::offer_schema::{FlightOffersResponse, ProviderOffer, Segment};
use crate::search::{Flight, SearchQuery};

/// Convert every usable offer. Offers without segments or with an
/// unreadable price are skipped individually.
pub fn convert_offers(
    response: &FlightOffersResponse,
    query: &SearchQuery,
    carriers: &CarrierTable,
) -> Vec<Flight> {
    response
        .data
        .iter()
        .filter_map(|offer| convert_offer(offer, query, carriers))
        .collect()
}

pub fn convert_offer(
    offer: &ProviderOffer,
    query: &SearchQuery,
    carriers: &CarrierTable,
) -> Option<Flight> {
    let itinerary = offer.itineraries.first()?;
    let segments = &itinerary.segments;
    let first = segments.first()?;

    let price = match parse_price(&offer.price.total) {
        Some(price) => price,
        None => {
            debug!("Dropping offer {}: unreadable price {:?}", offer.id, offer.price.total);
            return None;
        }
    };

    Some(Flight {
        id: offer.id.clone(),
        origin: query.origin.clone(),
        destination: query.destination.clone(),
        date: query.date,
        price,
        currency: offer.price.currency.clone(),
        airline: carriers.name_for(&first.carrier_code).to_string(),
        duration: format_duration(&itinerary.duration),
        stops: (segments.len() - 1) as u32,
        route: build_route(segments),
        booking_url: None,
    })
}

/// First departure followed by every arrival, in order.
pub fn build_route(segments: &[Segment]) -> Vec<String> {
    let mut route = Vec::with_capacity(segments.len() + 1);
    if let Some(first) = segments.first() {
        route.push(first.departure.iata_code.clone());
    }
    route.extend(segments.iter().map(|s| s.arrival.iata_code.clone()));
    route
}

fn parse_price(total: &str) -> Option<f64> {
    total
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
}

/// `PT2H30M` -> `2h 30m`, `PT45M` -> `45m`, `PT3H` -> `3h`.
/// Anything else is returned unchanged.
pub fn format_duration(iso: &str) -> String {
    let Some(mut rest) = iso.strip_prefix("PT") else {
        return iso.to_string();
    };

    let mut hours = 0u32;
    let mut minutes = 0u32;

    if let Some(h) = rest.find('H') {
        match rest[..h].parse() {
            Ok(v) => hours = v,
            Err(_) => return iso.to_string(),
        }
        rest = &rest[h + 1..];
    }

    if let Some(m) = rest.find('M') {
        match rest[..m].parse() {
            Ok(v) => minutes = v,
            Err(_) => return iso.to_string(),
        }
    }

    match (hours, minutes) {
        (0, 0) => iso.to_string(),
        (h, 0) => format!("{}h", h),
        (0, m) => format!("{}m", m),
        (h, m) => format!("{}h {}m", h, m),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offer_schema::{Itinerary, OfferPrice, SegmentEndpoint};
    use chrono::NaiveDate;

    fn segment(from: &str, to: &str, carrier: &str) -> Segment {
        Segment {
            departure: SegmentEndpoint { iata_code: from.into(), ..Default::default() },
            arrival: SegmentEndpoint { iata_code: to.into(), ..Default::default() },
            carrier_code: carrier.into(),
            ..Default::default()
        }
    }

    fn offer(id: &str, total: &str, segments: Vec<Segment>) -> ProviderOffer {
        ProviderOffer {
            id: id.into(),
            itineraries: vec![Itinerary { duration: "PT5H10M".into(), segments }],
            price: OfferPrice { currency: "USD".into(), total: total.into(), ..Default::default() },
            ..Default::default()
        }
    }

    fn query() -> SearchQuery {
        SearchQuery::new("BKK", "SIN", NaiveDate::from_ymd_opt(2030, 3, 1).unwrap(), 1)
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration("PT2H30M"), "2h 30m");
        assert_eq!(format_duration("PT45M"), "45m");
        assert_eq!(format_duration("PT3H"), "3h");
        assert_eq!(format_duration("2 hours"), "2 hours");
        assert_eq!(format_duration("PTxH5M"), "PTxH5M");
        assert_eq!(format_duration("PT0H0M"), "PT0H0M");
        assert_eq!(format_duration(""), "");
    }

    #[test]
    fn test_two_segment_route_and_stops() {
        let carriers = CarrierTable::default();
        let o = offer("7", "512.40", vec![segment("BKK", "KUL", "TG"), segment("KUL", "SIN", "SQ")]);

        let flight = convert_offer(&o, &query(), &carriers).unwrap();
        assert_eq!(flight.route, vec!["BKK", "KUL", "SIN"]);
        assert_eq!(flight.stops, 1);
        assert_eq!(flight.airline, "Thai Airways");
        assert_eq!(flight.duration, "5h 10m");
        assert_eq!(flight.route.len() as u32, flight.stops + 2);
        assert!((flight.price - 512.40).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unparseable_price_drops_only_that_offer() {
        let carriers = CarrierTable::default();
        let response = FlightOffersResponse {
            meta: None,
            data: vec![
                offer("1", "450.00", vec![segment("BKK", "SIN", "TG")]),
                offer("2", "not-a-price", vec![segment("BKK", "SIN", "SQ")]),
                offer("3", "399.99", vec![segment("BKK", "SIN", "XX")]),
            ],
        };

        let flights = convert_offers(&response, &query(), &carriers);
        assert_eq!(flights.len(), response.data.len() - 1);
        assert_eq!(flights[1].airline, "XX");
    }

    #[test]
    fn test_offers_without_segments_are_dropped() {
        let carriers = CarrierTable::default();
        let mut no_itinerary = offer("1", "100", vec![]);
        no_itinerary.itineraries.clear();
        let response = FlightOffersResponse {
            meta: None,
            data: vec![no_itinerary, offer("2", "100", vec![])],
        };

        assert!(convert_offers(&response, &query(), &carriers).is_empty());
    }
}
