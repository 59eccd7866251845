// 📂 CSV Loader - Register files → flat records
//
// Reads the political and postal community registers (header row, one
// record per line) and hands flat records to the Join Engine.
// Column names follow the published federal registers.

use crate::config::LoaderConfig;
use crate::error::{CommunityError, CommunityResult};
use crate::records::{FlatPoliticalCommunity, FlatPostalCommunity};
use chrono::NaiveDate;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

// ============================================================================
// RAW ROWS (as they appear in the files)
// ============================================================================

#[derive(Debug, Deserialize)]
struct PoliticalCommunityRow {
    #[serde(rename = "GDENR")]
    number: String,

    #[serde(rename = "GDENAME")]
    name: String,

    #[serde(rename = "GDENAMK")]
    short_name: String,

    #[serde(rename = "GDEMUTDAT")]
    last_update: String,

    #[serde(rename = "GDEKT")]
    canton_code: String,

    #[serde(rename = "GDEKTNA")]
    canton_name: String,

    #[serde(rename = "GDEBZNR")]
    district_number: String,

    #[serde(rename = "GDEBZNA")]
    district_name: String,
}

impl PoliticalCommunityRow {
    fn into_flat(self, config: &LoaderConfig) -> CommunityResult<FlatPoliticalCommunity> {
        Ok(FlatPoliticalCommunity {
            last_update: parse_date(&self.last_update, config)?,
            number: self.number,
            name: self.name,
            short_name: self.short_name,
            canton_code: self.canton_code,
            canton_name: self.canton_name,
            district_number: self.district_number,
            district_name: self.district_name,
        })
    }
}

#[derive(Debug, Deserialize)]
struct PostalCommunityRow {
    #[serde(rename = "PLZ4")]
    zip_code: String,

    #[serde(rename = "PLZZ", default)]
    zip_code_addition: String,

    #[serde(rename = "PLZNAMK")]
    name: String,

    #[serde(rename = "GDENR")]
    political_community_number: String,
}

impl From<PostalCommunityRow> for FlatPostalCommunity {
    fn from(row: PostalCommunityRow) -> Self {
        FlatPostalCommunity {
            zip_code: row.zip_code,
            zip_code_addition: row.zip_code_addition,
            name: row.name,
            political_community_number: row.political_community_number,
        }
    }
}

// ============================================================================
// LOADING
// ============================================================================

pub fn load_political_communities(
    path: &Path,
    config: &LoaderConfig,
) -> CommunityResult<Vec<FlatPoliticalCommunity>> {
    let records = read_political_communities(std::fs::File::open(path)?, config)?;
    info!(path = %path.display(), records = records.len(), "loaded political communities");
    Ok(records)
}

pub fn load_postal_communities(
    path: &Path,
    config: &LoaderConfig,
) -> CommunityResult<Vec<FlatPostalCommunity>> {
    let records = read_postal_communities(std::fs::File::open(path)?, config)?;
    info!(path = %path.display(), records = records.len(), "loaded postal communities");
    Ok(records)
}

/// Same as `load_political_communities`, from any reader
pub fn read_political_communities<R: Read>(
    reader: R,
    config: &LoaderConfig,
) -> CommunityResult<Vec<FlatPoliticalCommunity>> {
    let mut rdr = reader_builder(config).from_reader(reader);

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let row: PoliticalCommunityRow = result?;
        records.push(row.into_flat(config)?);
    }

    debug!(records = records.len(), "political community rows parsed");
    Ok(records)
}

/// Same as `load_postal_communities`, from any reader
pub fn read_postal_communities<R: Read>(
    reader: R,
    config: &LoaderConfig,
) -> CommunityResult<Vec<FlatPostalCommunity>> {
    let mut rdr = reader_builder(config).from_reader(reader);

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let row: PostalCommunityRow = result?;
        records.push(FlatPostalCommunity::from(row));
    }

    debug!(records = records.len(), "postal community rows parsed");
    Ok(records)
}

fn reader_builder(config: &LoaderConfig) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .delimiter(config.delimiter)
        .has_headers(true)
        .trim(csv::Trim::All);
    builder
}

/// Try every configured format, first match wins
fn parse_date(value: &str, config: &LoaderConfig) -> CommunityResult<NaiveDate> {
    config
        .date_formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .ok_or_else(|| CommunityError::InvalidDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const POLITICAL_CSV: &str = "\
GDEKT;GDEBZNR;GDENR;GDENAME;GDENAMK;GDEBZNA;GDEKTNA;GDEMUTDAT
ZH;112;261;Zürich;Zürich;Bezirk Zürich;Zürich;01.01.2020
BE;246;351;Bern;Bern;Verwaltungskreis Bern-Mittelland;Bern;2019-06-15
";

    const POSTAL_CSV: &str = "\
PLZ4;PLZZ;PLZNAMK;KTKZ;GDENR
8001;00;Zürich;ZH;261
3000;;Bern;BE;351
";

    #[test]
    fn test_read_political_communities() {
        let records =
            read_political_communities(POLITICAL_CSV.as_bytes(), &LoaderConfig::default()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].number, "261");
        assert_eq!(records[0].canton_code, "ZH");
        assert_eq!(records[0].district_name, "Bezirk Zürich");
        assert_eq!(records[0].last_update, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(records[1].last_update, NaiveDate::from_ymd_opt(2019, 6, 15).unwrap());
    }

    #[test]
    fn test_read_postal_communities_with_empty_addition() {
        let records =
            read_postal_communities(POSTAL_CSV.as_bytes(), &LoaderConfig::default()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].zip_key(), "800100");
        assert_eq!(records[1].zip_code_addition, "");
        assert_eq!(records[1].political_community_number, "351");
    }

    #[test]
    fn test_comma_delimiter() {
        let csv = "PLZ4,PLZZ,PLZNAMK,GDENR\n6000,00,Luzern,1061\n";
        let config = LoaderConfig::default().with_delimiter(b',');

        let records = read_postal_communities(csv.as_bytes(), &config).unwrap();

        assert_eq!(records[0].name, "Luzern");
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let csv = "\
GDEKT;GDEBZNR;GDENR;GDENAME;GDENAMK;GDEBZNA;GDEKTNA;GDEMUTDAT
ZH;112;261;Zürich;Zürich;Bezirk Zürich;Zürich;sometime
";
        let err = read_political_communities(csv.as_bytes(), &LoaderConfig::default()).unwrap_err();

        assert!(matches!(err, CommunityError::InvalidDate(value) if value == "sometime"));
    }

    #[test]
    fn test_missing_column_is_csv_error() {
        let csv = "PLZ4;PLZNAMK\n8001;Zürich\n";
        let err = read_postal_communities(csv.as_bytes(), &LoaderConfig::default()).unwrap_err();

        assert!(matches!(err, CommunityError::Csv(_)));
    }

    #[test]
    fn test_load_from_files() {
        let mut political = tempfile::NamedTempFile::new().unwrap();
        political.write_all(POLITICAL_CSV.as_bytes()).unwrap();
        let mut postal = tempfile::NamedTempFile::new().unwrap();
        postal.write_all(POSTAL_CSV.as_bytes()).unwrap();

        let config = LoaderConfig::default();
        let political = load_political_communities(political.path(), &config).unwrap();
        let postal = load_postal_communities(postal.path(), &config).unwrap();

        assert_eq!(political.len(), 2);
        assert_eq!(postal.len(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_political_communities(
            Path::new("/nonexistent/gde.csv"),
            &LoaderConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(err, CommunityError::Io(_)));
    }
}
