use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::SeedImportError;
use crate::matching::domain::{HostId, HostListing, UserId, UserProfile};

#[derive(Debug)]
pub(crate) struct SeedRecord {
    pub(crate) owner: UserProfile,
    pub(crate) listing: HostListing,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<SeedRecord>, SeedImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv_reader.deserialize::<SeedRow>().enumerate() {
        // The header occupies line one, data rows start on line two.
        let line = index + 2;
        let row = row?;
        records.push(row.into_record(line)?);
    }

    Ok(records)
}

/// One row of the platform export. Each row carries an owner profile and
/// the listing it publishes; owners with several listings repeat across
/// rows.
#[derive(Debug, Deserialize)]
struct SeedRow {
    owner_id: u64,
    owner_name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    owner_interests: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    owner_location: Option<String>,
    #[serde(default)]
    owner_rating: Option<f64>,
    #[serde(default)]
    owner_reviews: Option<u32>,
    host_id: u64,
    title: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    description: Option<String>,
    location: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    property_type: Option<String>,
    max_guests: u8,
    price_per_night: u32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    amenities: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    house_rules: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    photos: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    available_dates: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    active: Option<String>,
}

impl SeedRow {
    fn into_record(self, line: usize) -> Result<SeedRecord, SeedImportError> {
        let available_dates = parse_date_list(self.available_dates.as_deref(), line)?;
        let is_active = match self.active.as_deref() {
            Some(raw) => parse_flag(raw).ok_or_else(|| SeedImportError::Row {
                line,
                message: format!("unrecognized active flag '{raw}'"),
            })?,
            None => true,
        };

        let owner = UserProfile {
            id: UserId(self.owner_id),
            name: self.owner_name,
            interests: split_list(self.owner_interests.as_deref()),
            location: self.owner_location.unwrap_or_default(),
            rating: self.owner_rating.unwrap_or(0.0),
            review_count: self.owner_reviews.unwrap_or(0),
        };
        let listing = HostListing {
            id: HostId(self.host_id),
            owner: owner.id,
            title: self.title,
            description: self.description.unwrap_or_default(),
            location: self.location,
            property_type: self
                .property_type
                .unwrap_or_else(|| "apartment".to_string()),
            max_guests: self.max_guests,
            price_per_night: self.price_per_night,
            amenities: split_list(self.amenities.as_deref()),
            house_rules: split_list(self.house_rules.as_deref()),
            photos: split_list(self.photos.as_deref()),
            available_dates,
            is_active,
        };

        Ok(SeedRecord { owner, listing })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(value) => value
            .split(';')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}

fn parse_date_list(raw: Option<&str>, line: usize) -> Result<Vec<NaiveDate>, SeedImportError> {
    let raw = match raw {
        Some(value) => value,
        None => return Ok(Vec::new()),
    };

    let mut dates = Vec::new();
    for item in raw.split(';').map(str::trim).filter(|item| !item.is_empty()) {
        let date =
            NaiveDate::parse_from_str(item, "%Y-%m-%d").map_err(|_| SeedImportError::Row {
                line,
                message: format!("invalid date '{item}', expected YYYY-MM-DD"),
            })?;
        dates.push(date);
    }

    Ok(dates)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) fn parse_flag_for_tests(raw: &str) -> Option<bool> {
    parse_flag(raw)
}
