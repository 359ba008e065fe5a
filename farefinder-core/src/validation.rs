use chrono::NaiveDate;

use crate::airports::AirportDirectory;
use crate::search::{FlightSearchRequest, SearchQuery};
use crate::{CoreError, CoreResult};

pub const MIN_PASSENGERS: i64 = 1;
pub const MAX_PASSENGERS: i64 = 9;

pub fn normalize_airport_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Exactly three ASCII letters, any case.
pub fn is_valid_airport_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_alphabetic())
}

pub fn is_valid_passenger_count(count: i64) -> bool {
    (MIN_PASSENGERS..=MAX_PASSENGERS).contains(&count)
}

/// Parse a `YYYY-MM-DD` travel date that is not before `today`.
pub fn parse_travel_date(date: &str, today: NaiveDate) -> CoreResult<NaiveDate> {
    let parsed = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| CoreError::ValidationError(format!("invalid date {:?}: {}", date, e)))?;

    if parsed < today {
        return Err(CoreError::ValidationError("date cannot be in the past".to_string()));
    }

    Ok(parsed)
}

/// Validate and normalize a search request.
///
/// Every violation is collected in check order; callers typically report the
/// first. When an airport directory is supplied, codes must also appear in it.
pub fn validate_search_request(
    req: &FlightSearchRequest,
    airports: Option<&AirportDirectory>,
    today: NaiveDate,
) -> Result<SearchQuery, Vec<String>> {
    let mut errors = Vec::new();

    let origin = normalize_airport_code(&req.origin);
    let destination = normalize_airport_code(&req.destination);

    let known = |code: &str| {
        is_valid_airport_code(code) && airports.map_or(true, |dir| dir.contains(code))
    };

    if !known(&origin) {
        errors.push(format!("invalid origin airport code: {}", origin));
    }
    if !known(&destination) {
        errors.push(format!("invalid destination airport code: {}", destination));
    }
    if origin == destination {
        errors.push("origin and destination cannot be the same".to_string());
    }

    let date = parse_travel_date(&req.date, today);
    if date.is_err() {
        errors.push("date must be in YYYY-MM-DD format and not in the past".to_string());
    }

    if !is_valid_passenger_count(req.passengers) {
        errors.push(format!(
            "passenger count must be between {} and {}",
            MIN_PASSENGERS, MAX_PASSENGERS
        ));
    }

    match date {
        Ok(date) if errors.is_empty() => Ok(SearchQuery {
            origin,
            destination,
            date,
            passengers: req.passengers as u8,
        }),
        _ => Err(errors),
    }
}
