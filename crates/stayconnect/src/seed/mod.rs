mod parser;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use crate::matching::{HostListing, UserProfile};

/// Profiles and listings decoded from one platform CSV export.
#[derive(Debug, Default)]
pub struct SeedBatch {
    pub users: Vec<UserProfile>,
    pub listings: Vec<HostListing>,
}

#[derive(Debug)]
pub enum SeedImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Row { line: usize, message: String },
}

impl std::fmt::Display for SeedImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedImportError::Io(err) => write!(f, "failed to read seed export: {}", err),
            SeedImportError::Csv(err) => write!(f, "invalid seed CSV data: {}", err),
            SeedImportError::Row { line, message } => write!(f, "seed row {}: {}", line, message),
        }
    }
}

impl std::error::Error for SeedImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SeedImportError::Io(err) => Some(err),
            SeedImportError::Csv(err) => Some(err),
            SeedImportError::Row { .. } => None,
        }
    }
}

impl From<std::io::Error> for SeedImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for SeedImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct SeedImporter;

impl SeedImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<SeedBatch, SeedImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Decode an export into a batch, keeping the first profile seen for
    /// each owner and every listing row.
    pub fn from_reader<R: Read>(reader: R) -> Result<SeedBatch, SeedImportError> {
        let mut batch = SeedBatch::default();
        let mut seen_owners = HashSet::new();

        for record in parser::parse_records(reader)? {
            if seen_owners.insert(record.owner.id) {
                batch.users.push(record.owner);
            }
            batch.listings.push(record.listing);
        }

        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::UserId;
    use chrono::NaiveDate;
    use std::io::Cursor;

    const HEADER: &str = "owner_id,owner_name,owner_interests,owner_location,owner_rating,owner_reviews,host_id,title,description,location,property_type,max_guests,price_per_night,amenities,house_rules,photos,available_dates,active";

    fn seed_csv(rows: &[&str]) -> String {
        let mut csv = String::from(HEADER);
        for row in rows {
            csv.push('\n');
            csv.push_str(row);
        }
        csv.push('\n');
        csv
    }

    #[test]
    fn import_builds_profiles_and_listings() {
        let csv = seed_csv(&[
            "101,Aiko Tanaka,cooking;photography;travel,\"Shibuya, Tokyo\",4.8,52,11,Shibuya Modern Apartment,Bright two-room flat,\"Shibuya, Tokyo\",apartment,2,8000,wifi;kitchen,no smoking,/photos/11.jpg,2026-09-01;2026-09-02,true",
            "102,Kenji Sato,music;art,Shimokitazawa Tokyo,4.5,38,12,Shimokitazawa Artist Loft,,Shimokitazawa Tokyo,loft,3,9500,,,,,false",
        ]);

        let batch = SeedImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(batch.users.len(), 2);
        assert_eq!(batch.listings.len(), 2);
        assert_eq!(batch.users[0].name, "Aiko Tanaka");
        assert_eq!(
            batch.users[0].interests,
            vec!["cooking", "photography", "travel"]
        );
        assert_eq!(batch.users[0].location, "Shibuya, Tokyo");
        assert_eq!(batch.users[0].rating, 4.8);
        assert_eq!(batch.listings[0].owner, UserId(101));
        assert_eq!(
            batch.listings[0].available_dates,
            vec![
                NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 9, 2).unwrap(),
            ]
        );
        assert!(batch.listings[0].is_active);
        assert!(!batch.listings[1].is_active);
        assert_eq!(batch.listings[1].description, "");
    }

    #[test]
    fn duplicate_owner_rows_keep_the_first_profile() {
        let csv = seed_csv(&[
            "101,Aiko Tanaka,cooking,Shibuya Tokyo,4.8,52,11,First Listing,,Shibuya Tokyo,apartment,2,8000,,,,,true",
            "101,Aiko T.,hiking,Asakusa Tokyo,1.0,1,12,Second Listing,,Asakusa Tokyo,loft,3,9500,,,,,true",
        ]);

        let batch = SeedImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(batch.users.len(), 1);
        assert_eq!(batch.users[0].name, "Aiko Tanaka");
        assert_eq!(batch.users[0].rating, 4.8);
        assert_eq!(batch.listings.len(), 2);
    }

    #[test]
    fn empty_cells_fall_back_to_defaults() {
        let csv = seed_csv(&["101,Aiko Tanaka,,,,,11,Loft,,Tokyo,,2,8000,,,,,"]);

        let batch = SeedImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        let owner = &batch.users[0];
        assert!(owner.interests.is_empty());
        assert_eq!(owner.location, "");
        assert_eq!(owner.rating, 0.0);
        assert_eq!(owner.review_count, 0);
        let listing = &batch.listings[0];
        assert_eq!(listing.property_type, "apartment");
        assert_eq!(listing.description, "");
        assert!(listing.amenities.is_empty());
        assert!(listing.available_dates.is_empty());
        assert!(listing.is_active);
    }

    #[test]
    fn semicolon_lists_are_split_and_trimmed() {
        let csv = seed_csv(&[
            "101,Aiko Tanaka,cooking ; travel ;,Tokyo,4.0,10,11,Loft,,Tokyo,,2,8000,wifi; kitchen ;; washer,,,,",
        ]);

        let batch = SeedImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(batch.users[0].interests, vec!["cooking", "travel"]);
        assert_eq!(
            batch.listings[0].amenities,
            vec!["wifi", "kitchen", "washer"]
        );
    }

    #[test]
    fn invalid_dates_are_reported_with_their_line() {
        let csv = seed_csv(&[
            "101,Aiko Tanaka,,,,,11,Loft,,Tokyo,,2,8000,,,,2026-09-01,",
            "102,Kenji Sato,,,,,12,Loft,,Tokyo,,2,8000,,,,September first,",
        ]);

        let error = SeedImporter::from_reader(Cursor::new(csv)).expect_err("expected row error");

        match error {
            SeedImportError::Row { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("invalid date 'September first'"));
            }
            other => panic!("expected row error, got {other:?}"),
        }
    }

    #[test]
    fn unrecognized_active_flags_are_rejected() {
        let csv = seed_csv(&["101,Aiko Tanaka,,,,,11,Loft,,Tokyo,,2,8000,,,,,maybe"]);

        let error = SeedImporter::from_reader(Cursor::new(csv)).expect_err("expected row error");

        match error {
            SeedImportError::Row { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("unrecognized active flag 'maybe'"));
            }
            other => panic!("expected row error, got {other:?}"),
        }
    }

    #[test]
    fn active_flag_accepts_common_spellings() {
        assert_eq!(parser::parse_flag_for_tests("true"), Some(true));
        assert_eq!(parser::parse_flag_for_tests("Yes"), Some(true));
        assert_eq!(parser::parse_flag_for_tests("1"), Some(true));
        assert_eq!(parser::parse_flag_for_tests("FALSE"), Some(false));
        assert_eq!(parser::parse_flag_for_tests("no"), Some(false));
        assert_eq!(parser::parse_flag_for_tests("0"), Some(false));
        assert_eq!(parser::parse_flag_for_tests("maybe"), None);
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error =
            SeedImporter::from_path("./does-not-exist.csv").expect_err("expected io error");

        match error {
            SeedImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
