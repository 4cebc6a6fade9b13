// src/locations/normalizer.rs
use super::definitions::{FlatRow, RawLocation, RawScalar, RowId};

fn text_leaf(leaf: Option<&RawScalar>) -> Option<String> {
    leaf.and_then(RawScalar::as_text)
}

/// Flattens one nested record. Missing leaves stay absent.
pub fn flatten_location(raw: &RawLocation) -> FlatRow {
    let coordinates = raw.coordinates.as_ref();
    let street = raw.street.as_ref();

    FlatRow {
        id: RowId::new_random(),
        city: text_leaf(raw.city.as_ref()),
        country: text_leaf(raw.country.as_ref()),
        postcode: text_leaf(raw.postcode.as_ref()),
        state: text_leaf(raw.state.as_ref()),
        latitude: text_leaf(coordinates.and_then(|c| c.latitude.as_ref())),
        longitude: text_leaf(coordinates.and_then(|c| c.longitude.as_ref())),
        street_number: street
            .and_then(|s| s.number.as_ref())
            .and_then(RawScalar::as_integer),
        street_name: text_leaf(street.and_then(|s| s.name.as_ref())),
    }
}

/// Converts a fetched batch into flat rows, one per input record, in input order.
pub fn normalize(raw: &[RawLocation]) -> Vec<FlatRow> {
    raw.iter().map(flatten_location).collect()
}
