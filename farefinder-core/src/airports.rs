use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{CoreError, CoreResult};

const SEARCH_RESULT_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub country_code: String,
    pub region_name: String,
    pub iata: String,
    pub icao: String,
    pub airport_name: String,
    pub latitude: String,
    pub longitude: String,
}

impl Airport {
    fn new(
        country_code: &str,
        region_name: &str,
        iata: &str,
        icao: &str,
        airport_name: &str,
        latitude: &str,
        longitude: &str,
    ) -> Self {
        Self {
            country_code: country_code.to_string(),
            region_name: region_name.to_string(),
            iata: iata.to_uppercase(),
            icao: icao.to_string(),
            airport_name: airport_name.to_string(),
            latitude: latitude.to_string(),
            longitude: longitude.to_string(),
        }
    }
}

/// Read-only airport reference data, keyed by IATA code.
#[derive(Debug, Clone, Default)]
pub struct AirportDirectory {
    airports: BTreeMap<String, Airport>,
}

impl AirportDirectory {
    /// Directory with the compiled-in list of major airports.
    pub fn builtin() -> Self {
        let list = [
            ("TH", "Bangkok", "BKK", "VTBS", "Bangkok - Suvarnabhumi", "13.6900", "100.7501"),
            ("TH", "Bangkok", "DMK", "VTBD", "Bangkok - Don Mueang", "13.9126", "100.6067"),
            ("TH", "Phuket", "HKT", "VTSP", "Phuket International", "8.1132", "98.3169"),
            ("SG", "Singapore", "SIN", "WSSS", "Singapore - Changi", "1.3644", "103.9915"),
            ("MY", "Kuala Lumpur", "KUL", "WMKK", "Kuala Lumpur International", "2.7456", "101.7072"),
            ("ID", "Jakarta", "CGK", "WIII", "Soekarno-Hatta International", "-6.1256", "106.6559"),
            ("HK", "Hong Kong", "HKG", "VHHH", "Hong Kong International", "22.3080", "113.9185"),
            ("JP", "Tokyo", "NRT", "RJAA", "Tokyo - Narita", "35.7720", "140.3929"),
            ("KR", "Seoul", "ICN", "RKSI", "Seoul - Incheon", "37.4602", "126.4407"),
            ("CN", "Shanghai", "PVG", "ZSPD", "Shanghai - Pudong", "31.1443", "121.8083"),
            ("AU", "Sydney", "SYD", "YSSY", "Sydney Kingsford Smith", "-33.9399", "151.1753"),
            ("IN", "Delhi", "DEL", "VIDP", "Indira Gandhi International", "28.5562", "77.1000"),
            ("AE", "Dubai", "DXB", "OMDB", "Dubai International", "25.2532", "55.3657"),
            ("QA", "Doha", "DOH", "OTHH", "Hamad International", "25.2731", "51.6081"),
            ("TR", "Istanbul", "IST", "LTFM", "Istanbul Airport", "41.2753", "28.7519"),
            ("DE", "Frankfurt", "FRA", "EDDF", "Frankfurt", "50.0264", "8.5431"),
            ("DE", "Munich", "MUC", "EDDM", "Munich", "48.3538", "11.7861"),
            ("GB", "London", "LHR", "EGLL", "London - Heathrow", "51.4700", "-0.4543"),
            ("FR", "Paris", "CDG", "LFPG", "Paris - Charles de Gaulle", "49.0097", "2.5479"),
            ("NL", "Amsterdam", "AMS", "EHAM", "Amsterdam - Schiphol", "52.3105", "4.7683"),
            ("ES", "Madrid", "MAD", "LEMD", "Madrid - Barajas", "40.4983", "-3.5676"),
            ("US", "New York", "JFK", "KJFK", "John F. Kennedy International Airport", "40.6413", "-73.7781"),
            ("US", "Los Angeles", "LAX", "KLAX", "Los Angeles International Airport", "33.9425", "-118.4081"),
            ("US", "Chicago", "ORD", "KORD", "Chicago O'Hare International", "41.9742", "-87.9073"),
            ("US", "Dallas", "DFW", "KDFW", "Dallas/Fort Worth International", "32.8998", "-97.0403"),
            ("US", "Atlanta", "ATL", "KATL", "Hartsfield-Jackson Atlanta International", "33.6407", "-84.4277"),
            ("US", "San Francisco", "SFO", "KSFO", "San Francisco International", "37.6213", "-122.3790"),
            ("BR", "Sao Paulo", "GRU", "SBGR", "Sao Paulo - Guarulhos", "-23.4356", "-46.4731"),
            ("ZA", "Johannesburg", "JNB", "FAOR", "O. R. Tambo International", "-26.1392", "28.2460"),
        ];

        let airports = list
            .iter()
            .map(|(cc, region, iata, icao, name, lat, lon)| {
                let airport = Airport::new(cc, region, iata, icao, name, lat, lon);
                (airport.iata.clone(), airport)
            })
            .collect();

        Self { airports }
    }

    /// Parse reference data in the `country_code,region_name,iata,icao,airport_name,latitude,longitude`
    /// layout. The first row is a header. Rows with fewer than seven columns or
    /// an empty IATA code are skipped.
    pub fn from_csv_reader<R: Read>(reader: R) -> CoreResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut airports = BTreeMap::new();
        for record in csv_reader.records() {
            let record = record.map_err(|e| CoreError::AirportData(e.to_string()))?;
            if record.len() < 7 || record[2].trim().is_empty() {
                continue;
            }

            let airport = Airport::new(
                &record[0],
                &record[1],
                record[2].trim(),
                &record[3],
                &record[4],
                &record[5],
                &record[6],
            );
            airports.insert(airport.iata.clone(), airport);
        }

        Ok(Self { airports })
    }

    /// Load from a CSV file, falling back to the built-in list when the path is
    /// absent, unreadable, malformed or empty.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::builtin();
        };

        let loaded = std::fs::File::open(path)
            .map_err(|e| CoreError::AirportData(e.to_string()))
            .and_then(Self::from_csv_reader);

        match loaded {
            Ok(directory) if !directory.is_empty() => {
                info!("Loaded {} airports from {}", directory.len(), path.display());
                directory
            }
            Ok(_) => {
                warn!("Airport file {} has no usable rows, using built-in list", path.display());
                Self::builtin()
            }
            Err(e) => {
                warn!("Failed to load airports from {}: {}, using built-in list", path.display(), e);
                Self::builtin()
            }
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.airports.contains_key(&code.trim().to_uppercase())
    }

    pub fn get(&self, code: &str) -> Option<&Airport> {
        self.airports.get(&code.trim().to_uppercase())
    }

    /// Case-insensitive substring match on IATA code, name and region.
    pub fn search(&self, query: &str) -> Vec<Airport> {
        let query = query.trim().to_lowercase();
        self.airports
            .values()
            .filter(|a| {
                a.iata.to_lowercase().contains(&query)
                    || a.airport_name.to_lowercase().contains(&query)
                    || a.region_name.to_lowercase().contains(&query)
            })
            .take(SEARCH_RESULT_LIMIT)
            .cloned()
            .collect()
    }

    /// All airports ordered by IATA code.
    pub fn all(&self) -> impl Iterator<Item = &Airport> {
        self.airports.values()
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_contains_common_airports() {
        let directory = AirportDirectory::builtin();
        assert!(directory.contains("BKK"));
        assert!(directory.contains(" sin "));
        assert!(!directory.contains("ZZZ"));
    }

    #[test]
    fn test_search_matches_code_name_and_region() {
        let directory = AirportDirectory::builtin();

        let by_region = directory.search("bangkok");
        assert_eq!(by_region.len(), 2);

        let by_name = directory.search("heathrow");
        assert_eq!(by_name[0].iata, "LHR");

        assert!(directory.search("no such place").is_empty());
    }

    #[test]
    fn test_search_is_capped() {
        let directory = AirportDirectory::builtin();
        // A single vowel matches most entries.
        assert!(directory.search("a").len() <= SEARCH_RESULT_LIMIT);
    }

    #[test]
    fn test_csv_loading_skips_incomplete_rows() {
        let data = "\
country_code,region_name,iata,icao,airport_name,latitude,longitude
TH,Chiang Mai,cnx,VTCC,Chiang Mai International,18.7668,98.9626
TH,Nowhere,,VTXX,No Code,0,0
TH,Short,ABC
";
        let directory = AirportDirectory::from_csv_reader(data.as_bytes()).unwrap();
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.get("CNX").unwrap().airport_name, "Chiang Mai International");
    }

    #[test]
    fn test_load_falls_back_to_builtin() {
        let directory = AirportDirectory::load(Some(Path::new("/definitely/missing/airports.csv")));
        assert_eq!(directory.len(), AirportDirectory::builtin().len());
    }
}
