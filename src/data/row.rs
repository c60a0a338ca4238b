use crate::data::table::TabularSource;
use crate::foundation::error::RiverGlyphResult;

/// Header of the continent column.
pub const CONTINENT_COLUMN: &str = "continent";
/// Header of the river name column.
pub const NAME_COLUMN: &str = "name";
/// Header of the river length column.
pub const LENGTH_COLUMN: &str = "length";
/// Header of the basin area column.
pub const AREA_COLUMN: &str = "area";

/// One typed dataset row.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RiverRow {
    /// Continent label as written in the source.
    pub continent: String,
    /// Raw river name, possibly `"A–B"`.
    pub name: String,
    /// Length, already coerced (`0.0` on malformed input).
    pub length: f64,
    /// Basin area, already coerced (`0.0` on malformed input).
    pub area: f64,
}

impl RiverRow {
    /// Build a row from raw string cells, coercing the numeric fields.
    pub fn from_raw(continent: &str, name: &str, length: &str, area: &str) -> Self {
        Self {
            continent: continent.trim().to_owned(),
            name: name.to_owned(),
            length: parse_metric(length),
            area: parse_metric(area),
        }
    }
}

/// Convert a tabular source into typed rows.
///
/// `continent` and `name` are required columns. `length` and `area` are optional: when a column is
/// absent every row gets `0.0`.
pub fn parse_rows(source: &dyn TabularSource) -> RiverGlyphResult<Vec<RiverRow>> {
    let continents = source.column(CONTINENT_COLUMN)?;
    let names = source.column(NAME_COLUMN)?;
    let lengths = optional_column(source, LENGTH_COLUMN)?;
    let areas = optional_column(source, AREA_COLUMN)?;

    let n = source.row_count();
    let cell = |col: &Option<Vec<String>>, i: usize| -> String {
        col.as_ref()
            .and_then(|c| c.get(i).cloned())
            .unwrap_or_default()
    };

    let rows = (0..n)
        .map(|i| {
            RiverRow::from_raw(
                continents.get(i).map(String::as_str).unwrap_or_default(),
                names.get(i).map(String::as_str).unwrap_or_default(),
                &cell(&lengths, i),
                &cell(&areas, i),
            )
        })
        .collect::<Vec<_>>();

    tracing::debug!(rows = rows.len(), "parsed dataset rows");
    Ok(rows)
}

fn optional_column(
    source: &dyn TabularSource,
    name: &str,
) -> RiverGlyphResult<Option<Vec<String>>> {
    if !source.has_column(name) {
        tracing::warn!(column = name, "dataset column missing; values default to 0");
        return Ok(None);
    }
    source.column(name).map(Some)
}

/// Leniently parse a non-negative measurement.
///
/// The longest leading decimal literal is used (`"6650 km"` reads as `6650`, `"1e3x"` as `1000`).
/// Empty, malformed, non-finite or negative input yields `0.0`. Never fails.
pub fn parse_metric(raw: &str) -> f64 {
    let s = raw.trim();
    let end = float_prefix_len(s.as_bytes());
    match s[..end].parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

fn float_prefix_len(b: &[u8]) -> usize {
    let digits = |mut i: usize| {
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = 0;
    if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
        i += 1;
    }
    let int_start = i;
    i = digits(i);
    let mut mantissa_digits = i - int_start;

    if i < b.len() && b[i] == b'.' {
        let frac_start = i + 1;
        let frac_end = digits(frac_start);
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            i = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return 0;
    }

    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        let exp_end = digits(j);
        if exp_end > j {
            i = exp_end;
        }
    }
    i
}

#[cfg(test)]
#[path = "../../tests/unit/data/row.rs"]
mod tests;
