use std::collections::HashSet;

use farefinder_core::Flight;

/// Upper bound on flights returned for a single search. The reserved
/// direct-flight slot replaces an entry, so the bound always holds.
pub const MAX_RESULTS: usize = 10;

/// Sort by price, drop near-duplicates and keep the cheapest [`MAX_RESULTS`].
///
/// If the cut leaves no direct flight while one was found, the cheapest
/// direct flight takes the last slot. It can only be priced at or above
/// every flight it follows, so the list stays sorted.
pub fn select_best(mut flights: Vec<Flight>) -> Vec<Flight> {
    // stable: equal prices keep their arrival order
    flights.sort_by(|a, b| a.price.total_cmp(&b.price));

    let unique = remove_duplicates(flights);
    let cheapest_direct = unique.iter().position(Flight::is_direct);

    let mut selected: Vec<Flight> = unique.iter().take(MAX_RESULTS).cloned().collect();
    if let Some(idx) = cheapest_direct {
        if idx >= MAX_RESULTS {
            selected.pop();
            selected.push(unique[idx].clone());
        }
    }
    selected
}

/// Keep the first flight seen for each `(route, price bucket)` key.
pub fn remove_duplicates(flights: Vec<Flight>) -> Vec<Flight> {
    let mut seen = HashSet::new();
    flights
        .into_iter()
        .filter(|f| seen.insert(dedupe_key(f)))
        .collect()
}

/// Route plus price floored to a multiple of 10.
pub fn dedupe_key(flight: &Flight) -> (Vec<String>, i64) {
    let bucket = (flight.price / 10.0).floor() as i64 * 10;
    (flight.route.clone(), bucket)
}
