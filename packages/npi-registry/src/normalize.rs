//! Flattening of registry records into fixed-width display rows.
//!
//! Name precedence is individual name, then authorized official, then
//! organization name. Address columns come from the first address only, while
//! phone numbers are gathered from every address on the record.

use serde::{Deserialize, Serialize};

use crate::types::{Address, RawRecord};

/// Placeholder for any value the record does not carry.
pub const NOT_AVAILABLE: &str = "N/A";

/// Number of columns in a [`NormalizedRow`].
pub const COLUMN_COUNT: usize = 11;

/// Column titles, in row order.
pub const COLUMN_HEADERS: [&str; COLUMN_COUNT] = [
    "NPI",
    "NPI Type",
    "Name",
    "Address",
    "City",
    "State",
    "Postal Code",
    "Enumeration Date",
    "Telephone",
    "Position",
    "Taxonomies",
];

/// Display-ready provider row.
///
/// Serializes as a plain JSON array of 11 strings, which is what the search
/// endpoint returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedRow(pub [String; COLUMN_COUNT]);

impl NormalizedRow {
    /// Value at column `index`, or `None` past the last column.
    pub fn field(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn npi(&self) -> &str {
        &self.0[0]
    }

    pub fn name(&self) -> &str {
        &self.0[2]
    }

    pub fn fields(&self) -> &[String; COLUMN_COUNT] {
        &self.0
    }
}

/// Map one registry record to a display row. Pure and deterministic.
pub fn normalize_record(record: &RawRecord) -> NormalizedRow {
    let basic = &record.basic;

    NormalizedRow([
        record
            .number
            .as_ref()
            .map(|n| n.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        or_sentinel(record.enumeration_type.as_deref()),
        display_name(record),
        from_first_address(record, |a| a.address_1.as_deref()),
        from_first_address(record, |a| a.city.as_deref()),
        from_first_address(record, |a| a.state.as_deref()),
        from_first_address(record, |a| a.postal_code.as_deref()),
        or_sentinel(basic.enumeration_date.as_deref()),
        join_or_sentinel(
            record
                .addresses
                .iter()
                .filter_map(|a| a.telephone_number.as_deref()),
        ),
        or_sentinel(basic.authorized_official_title_or_position.as_deref()),
        join_or_sentinel(record.taxonomies.iter().filter_map(|t| t.desc.as_deref())),
    ])
}

fn from_first_address(record: &RawRecord, pick: impl Fn(&Address) -> Option<&str>) -> String {
    or_sentinel(record.addresses.first().and_then(pick))
}

fn display_name(record: &RawRecord) -> String {
    let basic = &record.basic;

    if let Some(first) = present(basic.first_name.as_deref()) {
        return full_name(first, basic.middle_name.as_deref(), basic.last_name.as_deref());
    }
    if let Some(first) = present(basic.authorized_official_first_name.as_deref()) {
        return full_name(
            first,
            basic.authorized_official_middle_name.as_deref(),
            basic.authorized_official_last_name.as_deref(),
        );
    }
    if let Some(org) = present(basic.organization_name.as_deref()) {
        return org.to_string();
    }
    NOT_AVAILABLE.to_string()
}

// A missing middle name still leaves both separators in place.
fn full_name(first: &str, middle: Option<&str>, last: Option<&str>) -> String {
    format!(
        "{} {} {}",
        first,
        middle.unwrap_or_default(),
        last.unwrap_or_default()
    )
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn or_sentinel(value: Option<&str>) -> String {
    present(value).unwrap_or(NOT_AVAILABLE).to_string()
}

fn join_or_sentinel<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let joined = values
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{individual, organization, with_address, with_official};
    use crate::types::{BasicInfo, NpiNumber, Taxonomy};

    #[test]
    fn test_individual_name_beats_organization_name() {
        let mut record = individual(1111111111, "JANE", "DOE");
        record.basic.organization_name = Some("ACME CLINIC".to_string());

        let row = normalize_record(&record);
        assert_eq!(row.name(), "JANE  DOE");
    }

    #[test]
    fn test_middle_name_is_included() {
        let mut record = individual(1111111111, "JANE", "DOE");
        record.basic.middle_name = Some("Q".to_string());
        assert_eq!(normalize_record(&record).name(), "JANE Q DOE");
    }

    #[test]
    fn test_official_name_beats_organization_name() {
        let record = with_official(organization(2222222222, "ACME CLINIC"), "BOB", "STONE");
        let row = normalize_record(&record);
        assert_eq!(row.name(), "BOB  STONE");
    }

    #[test]
    fn test_organization_name_used_alone() {
        let row = normalize_record(&organization(2222222222, "ACME CLINIC"));
        assert_eq!(row.name(), "ACME CLINIC");
        assert_eq!(row.field(1), Some("NPI-2"));
    }

    #[test]
    fn test_nameless_record_is_all_sentinels() {
        let row = normalize_record(&RawRecord::default());
        assert!(row.fields().iter().all(|f| f == NOT_AVAILABLE));
    }

    #[test]
    fn test_first_address_but_all_phones() {
        let record = with_address(
            with_address(
                individual(3333333333, "ANN", "LEE"),
                "1 MAIN ST",
                "CHEYENNE",
                "WY",
                "82001",
                Some("307-555-0100"),
            ),
            "9 SIDE RD",
            "CASPER",
            "WY",
            "82601",
            Some("307-555-0199"),
        );

        let row = normalize_record(&record);
        assert_eq!(row.field(3), Some("1 MAIN ST"));
        assert_eq!(row.field(4), Some("CHEYENNE"));
        assert_eq!(row.field(5), Some("WY"));
        assert_eq!(row.field(6), Some("82001"));
        assert_eq!(row.field(8), Some("307-555-0100, 307-555-0199"));
    }

    #[test]
    fn test_blank_phones_are_skipped() {
        let record = with_address(
            with_address(individual(1, "A", "B"), "X", "Y", "WY", "1", None),
            "X2",
            "Y2",
            "WY",
            "2",
            Some("555"),
        );
        assert_eq!(normalize_record(&record).field(8), Some("555"));
    }

    #[test]
    fn test_taxonomies_joined() {
        let mut record = individual(1, "A", "B");
        record.taxonomies = vec![
            Taxonomy {
                desc: Some("Optometrist".to_string()),
            },
            Taxonomy {
                desc: Some("Optician".to_string()),
            },
        ];
        assert_eq!(
            normalize_record(&record).field(10),
            Some("Optometrist, Optician")
        );
    }

    #[test]
    fn test_text_npi_and_basic_fields() {
        let record = RawRecord {
            number: Some(NpiNumber::Text("1467560003".to_string())),
            enumeration_type: None,
            basic: BasicInfo {
                organization_name: Some("NORTH CLINIC".to_string()),
                enumeration_date: Some("2007-05-01".to_string()),
                authorized_official_title_or_position: Some("CEO".to_string()),
                ..Default::default()
            },
            addresses: vec![],
            taxonomies: vec![],
        };

        let row = normalize_record(&record);
        assert_eq!(row.npi(), "1467560003");
        assert_eq!(row.field(1), Some(NOT_AVAILABLE));
        assert_eq!(row.field(7), Some("2007-05-01"));
        assert_eq!(row.field(9), Some("CEO"));
        assert_eq!(row.field(3), Some(NOT_AVAILABLE));
    }

    #[test]
    fn test_normalizing_twice_is_identical() {
        let record = with_address(
            individual(4444444444, "SAM", "ORR"),
            "2 ELM",
            "LARAMIE",
            "WY",
            "82070",
            Some("307-555-0111"),
        );
        assert_eq!(normalize_record(&record), normalize_record(&record));
    }

    #[test]
    fn test_row_serializes_as_array() {
        let row = normalize_record(&organization(5, "ORG"));
        let json = serde_json::to_value(&row).unwrap();
        assert!(json.is_array());
        assert_eq!(json.as_array().unwrap().len(), COLUMN_COUNT);
        assert_eq!(json[2], "ORG");
    }
}
