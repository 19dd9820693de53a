//! TSPLIB coordinate-list reader.
//!
//! Only the `NODE_COORD_SECTION` is interpreted. Header lines before it
//! (`NAME`, `TYPE`, `DIMENSION`, ...) are skipped, reading stops at `EOF`,
//! and records are `index x y` with the index ignored (cities are numbered
//! in file order).

use super::City;
use crate::error::AcoError;
use std::path::Path;

const SECTION_MARKER: &str = "NODE_COORD_SECTION";
const EOF_MARKER: &str = "EOF";

/// Parses TSPLIB text into a list of cities.
///
/// Lines inside the section with fewer than three fields are skipped.
///
/// # Errors
///
/// - [`AcoError::MissingCoordSection`] if no section marker is present.
/// - [`AcoError::Parse`] if a coordinate is not a finite number.
///
/// # Examples
///
/// ```
/// use u_aco::cities::parse_tsplib;
///
/// let text = "NAME: tiny\nNODE_COORD_SECTION\n1 0 0\n2 3 4\nEOF\n";
/// let cities = parse_tsplib(text).unwrap();
/// assert_eq!(cities.len(), 2);
/// assert_eq!(cities[1].x, 3.0);
/// ```
pub fn parse_tsplib(text: &str) -> Result<Vec<City>, AcoError> {
    let mut cities = Vec::new();
    let mut in_section = false;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line == EOF_MARKER {
            break;
        }
        if line == SECTION_MARKER {
            in_section = true;
            continue;
        }
        if !in_section {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            continue;
        }
        let x = parse_coord(fields[1], idx + 1)?;
        let y = parse_coord(fields[2], idx + 1)?;
        cities.push(City::new(x, y));
    }

    if !in_section {
        return Err(AcoError::MissingCoordSection);
    }
    Ok(cities)
}

/// Reads and parses a TSPLIB file.
///
/// # Errors
///
/// I/O failures plus everything [`parse_tsplib`] reports.
pub fn read_tsplib<P: AsRef<Path>>(path: P) -> Result<Vec<City>, AcoError> {
    let text = std::fs::read_to_string(path)?;
    parse_tsplib(&text)
}

fn parse_coord(field: &str, line: usize) -> Result<f64, AcoError> {
    match field.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(AcoError::Parse {
            line,
            reason: format!("invalid coordinate '{field}'"),
        }),
    }
}
