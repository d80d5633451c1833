//! Resource file naming shared by the location cache and the NSRDB client.
//!
//! The format is `nsrdb_<lat>_<lon>_<suffix>`, where both coordinates are signed decimals that
//! always carry a decimal point, and the suffix names the dataset, for example
//! `nsrdb_38.0367_-84.5078_psm3-tmy_60_tmy.csv`.

use crate::{core::GeoPoint, prelude::*};

const PREFIX: &str = "nsrdb_";
const DATASET: &str = "psm3-tmy";
const EXTENSION: &str = ".csv";

/// Build the file name under which the typical-meteorological-year dataset for the point is
/// stored.
pub fn file_name(point: GeoPoint, interval_minutes: u32) -> String {
    format!(
        "{PREFIX}{}_{}_{DATASET}_{interval_minutes}_tmy{EXTENSION}",
        format_coordinate(point.latitude()),
        format_coordinate(point.longitude()),
    )
}

/// Parse the point back from a resource file name.
///
/// Returns [`None`] for anything that does not follow the naming contract.
pub fn parse_file_name(file_name: &str) -> Option<GeoPoint> {
    let rest = file_name.strip_prefix(PREFIX)?;
    let (latitude, rest) = rest.split_once('_')?;
    let (longitude, suffix) = rest.split_once('_')?;
    if suffix.strip_prefix(DATASET).is_none_or(|rest| !rest.starts_with('_'))
        || !suffix.ends_with(EXTENSION)
    {
        return None;
    }
    let latitude = parse_coordinate(latitude)?;
    let longitude = parse_coordinate(longitude)?;
    GeoPoint::try_new(latitude, longitude).ok()
}

/// Format with up to four decimals, keeping at least one so that the point is always there.
fn format_coordinate(degrees: f64) -> String {
    let formatted = format!("{degrees:.4}");
    let trimmed = formatted.trim_end_matches('0');
    if trimmed.ends_with('.') { format!("{trimmed}0") } else { trimmed.to_string() }
}

/// Strictly `-?\d+\.\d+`.
fn parse_coordinate(token: &str) -> Option<f64> {
    let unsigned = token.strip_prefix('-').unwrap_or(token);
    let (integer, fraction) = unsigned.split_once('.')?;
    let is_digits = |part: &str| !part.is_empty() && part.bytes().all(|byte| byte.is_ascii_digit());
    if !is_digits(integer) || !is_digits(fraction) {
        return None;
    }
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() -> Result {
        let point = GeoPoint::try_new(38.0367, -84.5078)?;
        assert_eq!(file_name(point, 60), "nsrdb_38.0367_-84.5078_psm3-tmy_60_tmy.csv");
        Ok(())
    }

    #[test]
    fn test_file_name_keeps_decimal_point() -> Result {
        let point = GeoPoint::try_new(45.0, -90.5)?;
        assert_eq!(file_name(point, 60), "nsrdb_45.0_-90.5_psm3-tmy_60_tmy.csv");
        Ok(())
    }

    #[test]
    fn test_parse_file_name_ok() -> Result {
        let point = parse_file_name("nsrdb_38.0367_-84.5078_psm3-tmy_60_tmy.csv")
            .context("the name should be parsed")?;
        assert_eq!(point, GeoPoint::try_new(38.0367, -84.5078)?);
        Ok(())
    }

    #[test]
    fn test_parse_file_name_roundtrip() -> Result {
        let point = GeoPoint::try_new(-33.8688, 151.2093)?;
        assert_eq!(parse_file_name(&file_name(point, 30)), Some(point));
        Ok(())
    }

    #[test]
    fn test_parse_file_name_rejects_foreign_names() {
        assert_eq!(parse_file_name("notes.txt"), None);
        assert_eq!(parse_file_name("nsrdb_38_-84.5078_psm3-tmy_60_tmy.csv"), None);
        assert_eq!(parse_file_name("nsrdb_38.0367_-84.5078_psm3-5min_5_2020.csv"), None);
        assert_eq!(parse_file_name("nsrdb_38.0367_-84.5078_psm3-tmy_60_tmy.json"), None);
        assert_eq!(parse_file_name("nsrdb_+38.0367_-84.5078_psm3-tmy_60_tmy.csv"), None);
        assert_eq!(parse_file_name("nsrdb_98.0_-84.5078_psm3-tmy_60_tmy.csv"), None);
        assert_eq!(parse_file_name("nsrdb_38.0367_-84.5078_psm3-tmyfoo_60_tmy.csv"), None);
        assert_eq!(parse_file_name("nsrdb_38.0367_-84.5078_psm3-tmy.csv"), None);
    }
}
