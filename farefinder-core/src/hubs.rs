/// Upper bound on hubs considered for one-stop synthesis.
pub const ONE_STOP_HUB_LIMIT: usize = 20;
/// Upper bound on major hubs paired for two-stop synthesis.
pub const TWO_STOP_HUB_LIMIT: usize = 10;

/// Hub airports grouped by region, plus the shorter list of major hubs.
///
/// Built once at start-up and shared read-only between requests.
#[derive(Debug, Clone)]
pub struct HubRegistry {
    regions: Vec<(String, Vec<String>)>,
    major_hubs: Vec<String>,
}

fn codes(list: &[&str]) -> Vec<String> {
    list.iter().map(|c| c.to_string()).collect()
}

impl HubRegistry {
    pub fn new(regions: Vec<(String, Vec<String>)>, major_hubs: Vec<String>) -> Self {
        Self { regions, major_hubs }
    }

    pub fn region(&self, name: &str) -> Option<&[String]> {
        self.regions
            .iter()
            .find(|(region, _)| region == name)
            .map(|(_, hubs)| hubs.as_slice())
    }

    /// Regional hubs flattened in registry order, capped at [`ONE_STOP_HUB_LIMIT`].
    ///
    /// The cap applies before any route-specific exclusion.
    pub fn one_stop_candidates(&self) -> Vec<&str> {
        self.regions
            .iter()
            .flat_map(|(_, hubs)| hubs.iter().map(String::as_str))
            .take(ONE_STOP_HUB_LIMIT)
            .collect()
    }

    /// Major hubs truncated to [`TWO_STOP_HUB_LIMIT`].
    pub fn two_stop_candidates(&self) -> &[String] {
        let end = self.major_hubs.len().min(TWO_STOP_HUB_LIMIT);
        &self.major_hubs[..end]
    }
}

impl Default for HubRegistry {
    fn default() -> Self {
        let regions = vec![
            (
                "north_america".to_string(),
                codes(&[
                    "JFK", "LAX", "ORD", "DFW", "ATL", "DEN", "SFO", "LAS", "SEA", "MIA", "BOS",
                    "IAH", "PHX", "CLT", "MCO", "MSP", "DTW", "PHL", "LGA", "BWI",
                ]),
            ),
            (
                "europe".to_string(),
                codes(&[
                    "LHR", "CDG", "FRA", "AMS", "MAD", "FCO", "MUC", "ZUR", "VIE", "CPH", "ARN",
                    "HEL", "OSL", "LIS", "ATH", "IST", "SVO", "WAW", "PRG", "BUD",
                ]),
            ),
            (
                "asia_pacific".to_string(),
                codes(&[
                    "NRT", "ICN", "PVG", "PEK", "HKG", "SIN", "BKK", "KUL", "CGK", "MNL", "TPE",
                    "CAN", "DEL", "BOM", "SYD", "MEL", "DXB", "DOH", "KWI", "CAI",
                ]),
            ),
            (
                "middle_east_africa".to_string(),
                codes(&[
                    "DXB", "DOH", "AUH", "KWI", "CAI", "JNB", "CPT", "NBO", "ADD", "DAR", "LOS",
                    "ACC", "CAS", "TUN", "ALG", "RUH", "JED", "AMM", "BEY", "BAH",
                ]),
            ),
            (
                "south_america".to_string(),
                codes(&[
                    "GRU", "EZE", "SCL", "BOG", "LIM", "CWB", "FOR", "GIG", "BSB", "MAO", "UIO",
                    "MVD", "ASU", "CCS", "GEO", "PBM", "BEL", "STM", "CGB", "THE",
                ]),
            ),
        ];

        let major_hubs = codes(&[
            "DXB", "DOH", "IST", "FRA", "LHR", "CDG", "AMS", "SIN", "HKG", "ICN", "NRT", "PVG",
            "JFK", "LAX", "ORD", "DFW", "ATL",
        ]);

        Self::new(regions, major_hubs)
    }
}
