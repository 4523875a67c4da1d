//! Aggregation layer: pure group-by / sum / rank functions over a [`Dataset`].
//!
//! Ordering rules shared by every view:
//! - groups are collected in order of first appearance (`IndexMap`), never hash order;
//! - descending rankings use a stable sort, so ties keep that first-appearance order;
//! - a missing key (no year, no publisher) is a group of its own and sorts last
//!   wherever the view is ordered by key;
//! - a key without rows never shows up, so there are no zero-valued entries.

use crate::dataset::{Dataset, SaleRecord, SalesColumn};
use indexmap::IndexMap;
use itertools::Itertools;
use std::cmp::Ordering;
use std::hash::Hash;

/// Summed Global_Sales for one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotal<K> {
    pub key: K,
    pub total: f64,
}

/// Number of records in one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCount<K> {
    pub key: K,
    pub count: usize,
}

/// What `top_n` does with records tied on the cut-off value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiePolicy {
    /// Exactly `n` rows; among equal values the earlier source row wins.
    First,
    /// Every record equal to the `n`th value is kept, so the result may exceed `n`.
    KeepAll,
}

/// The regional column with the largest column sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionTotal {
    pub column: SalesColumn,
    pub total: f64,
}

/// Total order on optional keys with the missing group last.
pub fn cmp_missing_last<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn sum_by<K, F>(dataset: &Dataset, key: F) -> IndexMap<K, f64>
where
    K: Hash + Eq,
    F: Fn(&SaleRecord) -> K,
{
    let mut sums: IndexMap<K, f64> = IndexMap::new();
    for record in dataset {
        *sums.entry(key(record)).or_insert(0.0) += record.global_sales;
    }
    sums
}

fn group_rows<'a, K, F>(dataset: &'a Dataset, key: F) -> IndexMap<K, Vec<&'a SaleRecord>>
where
    K: Hash + Eq,
    F: Fn(&'a SaleRecord) -> K,
{
    let mut groups: IndexMap<K, Vec<&'a SaleRecord>> = IndexMap::new();
    for record in dataset {
        groups.entry(key(record)).or_default().push(record);
    }
    groups
}

fn rank_desc<K>(sums: IndexMap<K, f64>) -> Vec<GroupTotal<K>> {
    sums.into_iter()
        .map(|(key, total)| GroupTotal { key, total })
        .sorted_by(|a, b| b.total.total_cmp(&a.total))
        .collect()
}

/// Year → Σ Global_Sales, ascending by year, missing year last.
pub fn yearly_sales(dataset: &Dataset) -> Vec<GroupTotal<Option<i32>>> {
    sum_by(dataset, |r| r.year)
        .into_iter()
        .map(|(key, total)| GroupTotal { key, total })
        .sorted_by(|a, b| cmp_missing_last(&a.key, &b.key))
        .collect()
}

/// Platform → Σ Global_Sales, descending.
pub fn platform_sales(dataset: &Dataset) -> Vec<GroupTotal<String>> {
    rank_desc(sum_by(dataset, |r| r.platform.clone()))
}

/// Genre → Σ Global_Sales, descending.
pub fn genre_sales(dataset: &Dataset) -> Vec<GroupTotal<String>> {
    rank_desc(sum_by(dataset, |r| r.genre.clone()))
}

/// The `n` records with the largest Global_Sales, best first.
pub fn top_n<'a, I>(records: I, n: usize, policy: TiePolicy) -> Vec<&'a SaleRecord>
where
    I: IntoIterator<Item = &'a SaleRecord>,
{
    if n == 0 {
        return Vec::new();
    }
    let mut ranked: Vec<&SaleRecord> = records
        .into_iter()
        .sorted_by(|a, b| b.global_sales.total_cmp(&a.global_sales))
        .collect();
    if ranked.len() <= n {
        return ranked;
    }
    let keep = match policy {
        TiePolicy::First => n,
        TiePolicy::KeepAll => {
            let cutoff = ranked[n - 1].global_sales;
            n + ranked[n..]
                .iter()
                .take_while(|r| r.global_sales == cutoff)
                .count()
        }
    };
    ranked.truncate(keep);
    ranked
}

/// For each year, the top `n` records of that year with all ties kept.
pub fn top_per_year(dataset: &Dataset, n: usize) -> Vec<(Option<i32>, Vec<&SaleRecord>)> {
    group_rows(dataset, |r| r.year)
        .into_iter()
        .map(|(year, rows)| (year, top_n(rows, n, TiePolicy::KeepAll)))
        .sorted_by(|a, b| cmp_missing_last(&a.0, &b.0))
        .collect()
}

/// For each genre (ascending), the top `n` records of that genre with all ties kept.
pub fn top_per_genre(dataset: &Dataset, n: usize) -> Vec<(&str, Vec<&SaleRecord>)> {
    group_rows(dataset, |r| r.genre.as_str())
        .into_iter()
        .map(|(genre, rows)| (genre, top_n(rows, n, TiePolicy::KeepAll)))
        .sorted_by(|a, b| a.0.cmp(b.0))
        .collect()
}

/// Publisher → names of its games in source order. Publishers ascending, unknown last.
pub fn publisher_games(dataset: &Dataset) -> Vec<(Option<&str>, Vec<&str>)> {
    group_rows(dataset, |r| r.publisher.as_deref())
        .into_iter()
        .map(|(publisher, rows)| {
            (publisher, rows.iter().map(|r| r.name.as_str()).collect::<Vec<_>>())
        })
        .sorted_by(|a, b| cmp_missing_last(&a.0, &b.0))
        .collect()
}

/// Publisher → Σ Global_Sales, the `n` largest.
pub fn top_publishers(dataset: &Dataset, n: usize) -> Vec<GroupTotal<Option<String>>> {
    let mut ranked = rank_desc(sum_by(dataset, |r| r.publisher.clone()));
    ranked.truncate(n);
    ranked
}

/// Regional column with the largest sum. Ties resolve to the earlier column
/// (NA, EU, JP, Other). `None` for an empty dataset.
pub fn region_dominance(dataset: &Dataset) -> Option<RegionTotal> {
    if dataset.is_empty() {
        return None;
    }
    SalesColumn::REGIONAL
        .iter()
        .map(|&column| RegionTotal {
            column,
            total: dataset.iter().map(|r| r.sales(column)).sum(),
        })
        .fold(None, |best: Option<RegionTotal>, candidate| match best {
            Some(b) if b.total >= candidate.total => Some(b),
            _ => Some(candidate),
        })
}

/// Platform → number of records, descending, ties by first appearance.
pub fn platform_counts(dataset: &Dataset) -> Vec<GroupCount<String>> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for record in dataset {
        *counts.entry(record.platform.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(key, count)| GroupCount {
            key: key.to_string(),
            count,
        })
        .sorted_by(|a, b| b.count.cmp(&a.count))
        .collect()
}

/// The platform with the most records.
pub fn platform_mode(dataset: &Dataset) -> Option<GroupCount<String>> {
    platform_counts(dataset).into_iter().next()
}

/// The platform with the largest summed Global_Sales.
pub fn platform_sales_leader(dataset: &Dataset) -> Option<GroupTotal<String>> {
    platform_sales(dataset).into_iter().next()
}

/// Distinct genres in order of first appearance.
pub fn genres(dataset: &Dataset) -> Vec<String> {
    dataset.iter().map(|r| r.genre.clone()).unique().collect()
}

/// Per sales column, how many records sold anything there; descending.
pub fn region_game_counts(dataset: &Dataset) -> Vec<GroupCount<SalesColumn>> {
    SalesColumn::ALL
        .iter()
        .map(|&column| GroupCount {
            key: column,
            count: dataset.iter().filter(|r| r.sales(column) > 0.0).count(),
        })
        .sorted_by(|a, b| b.count.cmp(&a.count))
        .collect()
}
