//! Field-usage aggregation: how often each column is referenced across a report's visuals.

use crate::model::{Page, Visual};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Length of the ranked most/least used lists shown on the dashboard.
pub const DEFAULT_TOP_N: usize = 5;

/// Occurrence count per field name, in first-encountered order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageTally {
    counts: IndexMap<String, usize>,
}

impl UsageTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, field: &str) {
        match self.counts.get_mut(field) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(field.to_string(), 1);
            }
        }
    }

    pub fn get(&self, field: &str) -> Option<usize> {
        self.counts.get(field).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the number of field references seen.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCount {
    pub field: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedUsage {
    pub most_used: Vec<FieldCount>,
    pub least_used: Vec<FieldCount>,
}

fn record_visual(tally: &mut UsageTally, visual: &Visual) {
    for field in &visual.query_fields {
        tally.record(field);
    }
    // A field bound to several roles of the same visual counts once per role.
    for fields in visual.projections.values() {
        for field in fields {
            tally.record(field);
        }
    }
}

pub fn aggregate(pages: &[Page]) -> UsageTally {
    let mut tally = UsageTally::new();
    for page in pages {
        for visual in &page.visuals {
            record_visual(&mut tally, visual);
        }
    }
    tally
}

pub fn aggregate_page(page: &Page) -> UsageTally {
    aggregate(std::slice::from_ref(page))
}

pub fn rank(tally: &UsageTally) -> RankedUsage {
    rank_top(tally, DEFAULT_TOP_N)
}

/// Ranks the tally into the `n` most used (count descending) and `n` least used (count
/// ascending) fields. Both sorts are stable, so equal counts keep the tally's insertion order.
pub fn rank_top(tally: &UsageTally, n: usize) -> RankedUsage {
    let entries: Vec<FieldCount> = tally
        .iter()
        .map(|(field, count)| FieldCount {
            field: field.to_string(),
            count,
        })
        .collect();

    let mut most_used = entries.clone();
    most_used.sort_by_key(|e| std::cmp::Reverse(e.count));
    most_used.truncate(n);

    let mut least_used = entries;
    least_used.sort_by_key(|e| e.count);
    least_used.truncate(n);

    RankedUsage {
        most_used,
        least_used,
    }
}
