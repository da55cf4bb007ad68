//! Catalog type codes and column descriptions.
//!
//! `RDB$FIELDS.RDB$FIELD_TYPE` reports the storage type. NUMERIC and DECIMAL
//! are stored as SMALLINT, INTEGER or BIGINT with a positive
//! `RDB$FIELD_SUB_TYPE`, so those are lifted into helper codes `160 + sub`.
//! Two domains used as flags and IP addresses get helper codes of their own.

use fbsql_core::FieldKind;

/// Domain whose columns are reported as booleans.
pub const FLAGS_DOMAIN: &str = "FLAGS";
/// Domain whose columns are reported as IP addresses.
pub const IP_DOMAIN: &str = "IP";

/// Helper code for columns of the [`FLAGS_DOMAIN`] domain.
pub const BOOLEAN_CODE: i32 = 170;
/// Helper code for columns of the [`IP_DOMAIN`] domain.
pub const IP_ADDRESS_CODE: i32 = 171;
/// Base of the NUMERIC/DECIMAL helper codes.
pub const SCALED_INTEGER_BASE: i32 = 160;

/// Storage codes of SMALLINT, INTEGER and BIGINT.
const INTEGER_STORAGE: [i32; 3] = [7, 8, 16];

/// Separator between a description's label and its annotation.
pub const DESCRIPTION_DELIMITER: &str = "//";

/// Remaps a raw catalog type code.
///
/// The domain overrides apply regardless of storage type.
#[must_use]
pub fn remap_type_code(field_source: &str, field_type: i32, sub_type: Option<i32>) -> i32 {
    match field_source.trim() {
        FLAGS_DOMAIN => BOOLEAN_CODE,
        IP_DOMAIN => IP_ADDRESS_CODE,
        _ => match sub_type {
            Some(sub) if sub > 0 && INTEGER_STORAGE.contains(&field_type) => {
                SCALED_INTEGER_BASE + sub
            }
            _ => field_type,
        },
    }
}

/// Maps a remapped type code to its engine-agnostic kind.
#[must_use]
pub const fn field_kind(type_code: i32) -> FieldKind {
    match type_code {
        7 => FieldKind::SmallInteger,
        8 => FieldKind::Integer,
        16 => FieldKind::BigInteger,
        10 | 27 => FieldKind::Float,
        12 => FieldKind::Date,
        13 => FieldKind::Time,
        35 => FieldKind::DateTime,
        14 | 37 => FieldKind::Char,
        40 | 261 => FieldKind::Text,
        161 | 162 => FieldKind::Decimal,
        BOOLEAN_CODE => FieldKind::Boolean,
        IP_ADDRESS_CODE => FieldKind::IpAddress,
        other => FieldKind::Unknown(other),
    }
}

/// Splits a packed column description into `(label, annotation)`.
///
/// Without the delimiter the whole text is the label. A missing
/// description yields neither.
#[must_use]
pub fn split_description(description: Option<&str>) -> (Option<String>, Option<String>) {
    match description {
        None => (None, None),
        Some(text) => match text.split_once(DESCRIPTION_DELIMITER) {
            Some((label, annotation)) => (Some(label.to_owned()), Some(annotation.to_owned())),
            None => (Some(text.to_owned()), None),
        },
    }
}
