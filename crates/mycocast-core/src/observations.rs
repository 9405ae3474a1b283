//! Observation table input.
//!
//! Rows come from an external tabular gather (iNaturalist-derived CSV) with
//! columns `Subject`, `Current Status`, and `Recent Locations`. The location
//! column is a literal Python-style list string, e.g.
//! `['Salt Point State Park', 'Jenner']`; it is parsed exactly as produced,
//! not as JSON.
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::LoadError;

/// One sighting report for a guild.
#[derive(Debug, Clone, Deserialize)]
pub struct Observation {
    /// Guild display name; contains the canonical guild name as a substring.
    #[serde(rename = "Subject")]
    pub subject: String,
    /// Free text, passed through to output features untouched.
    #[serde(rename = "Current Status")]
    pub status: String,
    /// Raw bracket-list of quoted location labels.
    #[serde(rename = "Recent Locations")]
    pub recent_locations_raw: String,
}

impl Observation {
    /// Split the bracket-list string into individual location labels.
    /// Labels keep their quotes and padding here; the gazetteer cleans them.
    pub fn recent_locations(&self) -> Vec<String> {
        parse_location_list(&self.recent_locations_raw)
    }
}

/// Parse `['Loc1', 'Loc2']` into its comma-separated elements.
/// An empty list (`[]` or blank) yields no labels.
pub fn parse_location_list(raw: &str) -> Vec<String> {
    raw.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(str::to_string)
        .filter(|s| !s.trim().trim_matches(['\'', '"']).is_empty())
        .collect()
}

/// Load observations from a CSV reader.
pub fn read_observations<R: Read>(reader: R) -> Result<Vec<Observation>, LoadError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for record in rdr.deserialize() {
        let obs: Observation = record?;
        rows.push(obs);
    }
    Ok(rows)
}

/// Load observations from a CSV file on disk.
pub fn load_observations(path: &Path) -> Result<Vec<Observation>, LoadError> {
    let file = std::fs::File::open(path)?;
    read_observations(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_element_list() {
        let labels = parse_location_list("['Salt Point State Park', 'Jenner']");
        assert_eq!(labels.len(), 2);
        assert!(labels[0].contains("Salt Point State Park"));
        assert!(labels[1].contains("Jenner"));
    }

    #[test]
    fn parses_single_element_list() {
        let labels = parse_location_list("['Mendocino']");
        assert_eq!(labels.len(), 1);
    }

    #[test]
    fn empty_list_yields_no_labels() {
        assert!(parse_location_list("[]").is_empty());
        assert!(parse_location_list("").is_empty());
    }

    #[test]
    fn double_quoted_labels_survive() {
        let labels = parse_location_list(r#"["Fort Bragg", "Willits"]"#);
        assert_eq!(labels.len(), 2);
    }

    #[test]
    fn reads_csv_rows() {
        let csv = "\
Subject,Current Status,Recent Locations
Golden Chanterelle (Cantharellus californicus),Fruiting heavily,\"['Salt Point State Park', 'Jenner']\"
King Bolete (Boletus edulis),Scattered singles,\"['Mendocino']\"
";
        let rows = read_observations(csv.as_bytes()).expect("csv should parse");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].status, "Fruiting heavily");
        assert_eq!(rows[0].recent_locations().len(), 2);
        assert_eq!(rows[1].recent_locations().len(), 1);
    }
}
