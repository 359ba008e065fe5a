use std::collections::HashMap;

/// Carrier code to display name lookup.
#[derive(Debug, Clone)]
pub struct CarrierTable {
    names: HashMap<String, String>,
}

impl CarrierTable {
    pub fn new(names: HashMap<String, String>) -> Self {
        Self { names }
    }

    /// Display name for a carrier code. Unknown codes are returned unchanged.
    pub fn name_for<'a>(&'a self, code: &'a str) -> &'a str {
        self.names.get(code).map(String::as_str).unwrap_or(code)
    }
}

impl Default for CarrierTable {
    fn default() -> Self {
        let names = [
            ("AA", "American Airlines"),
            ("UA", "United Airlines"),
            ("DL", "Delta Air Lines"),
            ("WN", "Southwest Airlines"),
            ("AS", "Alaska Airlines"),
            ("B6", "JetBlue Airways"),
            ("NK", "Spirit Airlines"),
            ("F9", "Frontier Airlines"),
            ("TG", "Thai Airways"),
            ("SQ", "Singapore Airlines"),
            ("CX", "Cathay Pacific"),
            ("EK", "Emirates"),
            ("QR", "Qatar Airways"),
            ("LH", "Lufthansa"),
            ("AF", "Air France"),
            ("KL", "KLM"),
            ("BA", "British Airways"),
        ]
        .into_iter()
        .map(|(code, name)| (code.to_string(), name.to_string()))
        .collect();

        Self { names }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_carriers() {
        let table = CarrierTable::default();
        assert_eq!(table.name_for("SQ"), "Singapore Airlines");
        assert_eq!(table.name_for("ZZ"), "ZZ");
    }
}
