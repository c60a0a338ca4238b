use std::collections::HashMap;

use crate::data::row::RiverRow;
use crate::foundation::error::{RiverGlyphError, RiverGlyphResult};

/// Weight of river length in the combined metric.
pub const LENGTH_WEIGHT: f64 = 0.85;
/// Weight of basin area in the combined metric.
pub const AREA_WEIGHT: f64 = 0.15;
/// Separator between alternate or segment names inside one river name.
pub const NAME_SEPARATOR: char = '–';

const REMAPPED_CONTINENT: (&str, &str) = ("Australia", "Oceania");

/// A ranked river under one continent.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct River {
    /// Trimmed river name.
    pub name: String,
    /// Length, `>= 0`.
    pub length: f64,
    /// Basin area, `>= 0`.
    pub area: f64,
}

impl River {
    /// `0.85 * length + 0.15 * area`.
    pub fn combined_metric(&self) -> f64 {
        LENGTH_WEIGHT * self.length + AREA_WEIGHT * self.area
    }
}

/// A continent and its deduplicated, length-ranked rivers.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Continent {
    /// Normalized continent name.
    pub name: String,
    /// Rivers sorted by length descending.
    pub rivers: Vec<River>,
}

/// Key used to decide whether two split names denote the same river.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupPolicy {
    /// Same name under the same continent.
    #[default]
    Name,
    /// Same name and same length under the same continent.
    NameAndLength,
}

/// Aggregation knobs.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AggregateOpts {
    /// Rivers kept per continent after ranking.
    pub max_rivers: usize,
    /// Duplicate detection key.
    pub dedup: DedupPolicy,
}

impl Default for AggregateOpts {
    fn default() -> Self {
        Self {
            max_rivers: 15,
            dedup: DedupPolicy::Name,
        }
    }
}

impl AggregateOpts {
    /// Validate option invariants.
    pub fn validate(&self) -> RiverGlyphResult<()> {
        if self.max_rivers == 0 {
            return Err(RiverGlyphError::validation("aggregate.max_rivers must be > 0"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum DedupKey {
    Name(String),
    NameAndLength(String, u64),
}

impl DedupPolicy {
    fn key(self, name: &str, length: f64) -> DedupKey {
        match self {
            Self::Name => DedupKey::Name(name.to_owned()),
            Self::NameAndLength => DedupKey::NameAndLength(name.to_owned(), length.to_bits()),
        }
    }
}

#[derive(Default)]
struct ContinentAcc {
    name: String,
    rivers: Vec<River>,
    seen: std::collections::HashSet<DedupKey>,
}

/// Normalize a continent label. `"Australia"` is folded into `"Oceania"`.
pub fn normalize_continent(label: &str) -> &str {
    let label = label.trim();
    if label == REMAPPED_CONTINENT.0 {
        REMAPPED_CONTINENT.1
    } else {
        label
    }
}

/// Split a raw river name into at most two trimmed components on the en-dash.
///
/// Text after a second dash is dropped. Empty components are skipped.
pub fn split_river_name(raw: &str) -> Vec<&str> {
    raw.split(NAME_SEPARATOR)
        .take(2)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Group rows into continents, dedup, rank by length and truncate.
///
/// Continents appear in first-seen order. First occurrence of a river wins; later rows with the
/// same key are absorbed without overwriting.
#[tracing::instrument(skip(rows), fields(rows = rows.len()))]
pub fn aggregate(rows: &[RiverRow], opts: &AggregateOpts) -> Vec<Continent> {
    let mut order: Vec<ContinentAcc> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();
    let mut absorbed = 0usize;

    for row in rows {
        let continent = normalize_continent(&row.continent);
        let idx = match index_by_name.get(continent) {
            Some(&idx) => idx,
            None => {
                order.push(ContinentAcc {
                    name: continent.to_owned(),
                    ..ContinentAcc::default()
                });
                index_by_name.insert(continent.to_owned(), order.len() - 1);
                order.len() - 1
            }
        };
        let acc = &mut order[idx];

        for name in split_river_name(&row.name) {
            if acc.seen.insert(opts.dedup.key(name, row.length)) {
                acc.rivers.push(River {
                    name: name.to_owned(),
                    length: row.length,
                    area: row.area,
                });
            } else {
                absorbed += 1;
            }
        }
    }

    let continents = order
        .into_iter()
        .map(|acc| {
            let mut rivers = acc.rivers;
            // `sort_by` is stable, so ties keep input order.
            rivers.sort_by(|a, b| b.length.total_cmp(&a.length));
            rivers.truncate(opts.max_rivers);
            Continent {
                name: acc.name,
                rivers,
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        continents = continents.len(),
        spokes = total_spokes(&continents),
        absorbed,
        "aggregated rivers"
    );
    continents
}

/// Total number of spokes across all continents; the animation's terminal phase.
pub fn total_spokes(continents: &[Continent]) -> usize {
    continents.iter().map(|c| c.rivers.len()).sum()
}

/// Flat index of each continent's first river in continent-then-rank order.
pub fn flat_offsets(continents: &[Continent]) -> Vec<usize> {
    continents
        .iter()
        .scan(0usize, |acc, c| {
            let start = *acc;
            *acc += c.rivers.len();
            Some(start)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/data/aggregate.rs"]
mod tests;
