// src/locations/definitions.rs
use std::cmp::Ordering;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

// --- Wire types (as received from the upstream endpoint) ---

/// Top-level payload returned by the location endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchPayload {
    #[serde(deserialize_with = "lenient_entries")]
    pub results: Vec<FetchResultEntry>,
}

/// One entry of `results`. Only the `location` object is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FetchResultEntry {
    #[serde(default, deserialize_with = "lenient")]
    pub location: RawLocation,
}

/// Reads any JSON value and falls back to `T::default()` when it does not
/// have the expected shape. A null or mistyped nested object becomes absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// `results` must be an array, but each entry in it is read leniently.
fn lenient_entries<'de, D>(deserializer: D) -> Result<Vec<FetchResultEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .map(|entry| serde_json::from_value(entry).unwrap_or_default())
        .collect())
}

/// A scalar leaf as sent upstream. Some fields (postcode, street number)
/// arrive as a string in one record and a number in the next.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Text(String),
    Number(serde_json::Number),
    /// Objects, arrays, booleans: kept so one bad leaf doesn't reject the batch.
    Other(serde_json::Value),
}

impl RawScalar {
    /// Text form of the leaf. Numbers are rendered in decimal.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawScalar::Text(s) => Some(s.clone()),
            RawScalar::Number(n) => Some(n.to_string()),
            RawScalar::Other(_) => None,
        }
    }

    /// Integer form of the leaf. Numeric strings are parsed.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            RawScalar::Number(n) => n.as_i64(),
            RawScalar::Text(s) => s.trim().parse().ok(),
            RawScalar::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCoordinates {
    #[serde(default)]
    pub latitude: Option<RawScalar>,
    #[serde(default)]
    pub longitude: Option<RawScalar>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawStreet {
    #[serde(default)]
    pub number: Option<RawScalar>,
    #[serde(default)]
    pub name: Option<RawScalar>,
}

/// Nested location record of one person. Never modified after parsing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawLocation {
    #[serde(default)]
    pub city: Option<RawScalar>,
    #[serde(default)]
    pub country: Option<RawScalar>,
    #[serde(default)]
    pub postcode: Option<RawScalar>,
    #[serde(default)]
    pub state: Option<RawScalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub coordinates: Option<RawCoordinates>,
    #[serde(default, deserialize_with = "lenient")]
    pub street: Option<RawStreet>,
}

// --- Flat rows ---

/// Identity of a flat row. Assigned once by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(Uuid);

impl RowId {
    pub fn new_random() -> Self {
        RowId(Uuid::new_v4())
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One displayed table row.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRow {
    pub id: RowId,
    pub city: Option<String>,
    pub country: Option<String>,
    pub postcode: Option<String>,
    pub state: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub street_number: Option<i64>,
    pub street_name: Option<String>,
}

impl FlatRow {
    /// A row with the given id and every field absent.
    #[cfg(test)]
    pub fn empty(id: RowId) -> Self {
        Self {
            id,
            city: None,
            country: None,
            postcode: None,
            state: None,
            latitude: None,
            longitude: None,
            street_number: None,
            street_name: None,
        }
    }

    /// Text value of a column, or `None` for the numeric column.
    pub fn text(&self, key: ColumnKey) -> Option<&str> {
        let value = match key {
            ColumnKey::City => &self.city,
            ColumnKey::Country => &self.country,
            ColumnKey::Postcode => &self.postcode,
            ColumnKey::State => &self.state,
            ColumnKey::Latitude => &self.latitude,
            ColumnKey::Longitude => &self.longitude,
            ColumnKey::StreetName => &self.street_name,
            ColumnKey::StreetNumber => return None,
        };
        value.as_deref()
    }

    /// Natural ordering of two rows on one column. Absent sorts first.
    pub fn compare_by(&self, other: &FlatRow, key: ColumnKey) -> Ordering {
        match key {
            ColumnKey::StreetNumber => self.street_number.cmp(&other.street_number),
            _ => self.text(key).cmp(&other.text(key)),
        }
    }

    /// Cell text as rendered in the table. Absent values render empty.
    pub fn display_value(&self, key: ColumnKey) -> String {
        match key {
            ColumnKey::StreetNumber => self
                .street_number
                .map(|n| n.to_string())
                .unwrap_or_default(),
            _ => self.text(key).unwrap_or_default().to_string(),
        }
    }
}

// --- Columns ---

/// The closed set of table columns, one per flat field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
#[value(rename_all = "camelCase")]
pub enum ColumnKey {
    City,
    Country,
    Postcode,
    State,
    Latitude,
    Longitude,
    StreetNumber,
    StreetName,
}

impl ColumnKey {
    /// All columns in display order.
    pub const ALL: [ColumnKey; 8] = [
        ColumnKey::City,
        ColumnKey::Country,
        ColumnKey::Postcode,
        ColumnKey::State,
        ColumnKey::Latitude,
        ColumnKey::Longitude,
        ColumnKey::StreetNumber,
        ColumnKey::StreetName,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Position in `ALL`; also the slot in a `SortStateMap`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Field name as used on the wire and on the command line.
    pub fn wire_name(self) -> &'static str {
        match self {
            ColumnKey::City => "city",
            ColumnKey::Country => "country",
            ColumnKey::Postcode => "postcode",
            ColumnKey::State => "state",
            ColumnKey::Latitude => "latitude",
            ColumnKey::Longitude => "longitude",
            ColumnKey::StreetNumber => "streetNumber",
            ColumnKey::StreetName => "streetName",
        }
    }

    /// Header label shown in the table.
    pub fn label(self) -> &'static str {
        match self {
            ColumnKey::City => "City",
            ColumnKey::Country => "Country",
            ColumnKey::Postcode => "Postcode",
            ColumnKey::State => "State",
            ColumnKey::Latitude => "Latitude",
            ColumnKey::Longitude => "Longitude",
            ColumnKey::StreetNumber => "Street No.",
            ColumnKey::StreetName => "Street Name",
        }
    }

    /// Whether the search index looks at this column.
    pub fn is_searchable(self) -> bool {
        !matches!(self, ColumnKey::StreetNumber)
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}
