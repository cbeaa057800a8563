//! Consolidation of the per-worker accumulators.

use indexmap::IndexMap;

use crate::scan::Record;

/// Concatenate the per-worker accumulators into the consolidated result.
///
/// The operation is associative and commutative on the multiset of records;
/// the output order is fixed to worker-rank order, then within-worker
/// discovery order, so that repeated runs are deterministic.
pub fn merge(accumulators: Vec<Vec<Record>>) -> Vec<Record> {
    let total = accumulators.iter().map(Vec::len).sum();
    let mut merged = Vec::with_capacity(total);
    for accumulator in accumulators {
        merged.extend(accumulator);
    }
    merged
}

/// Key to count mapping.
///
/// Iteration follows first-encountered insertion order, which makes the
/// tie-break of [`max_count`] deterministic.
pub type CountMap = IndexMap<String, u64>;

/// Count the records of one accumulator by language.
pub fn count_languages(records: &[Record]) -> CountMap {
    let mut counts = CountMap::new();
    for record in records {
        *counts.entry(record.lang.clone()).or_insert(0) += 1;
    }
    counts
}

/// Fold several partial count maps into one, summing the counts per key.
pub fn merge_counts<I>(maps: I) -> CountMap
where
    I: IntoIterator<Item = CountMap>,
{
    let mut merged = CountMap::new();
    for map in maps {
        for (key, count) in map {
            *merged.entry(key).or_insert(0) += count;
        }
    }
    merged
}

/// The entry with the maximum aggregated count, with ties broken by the
/// first key encountered in iteration order.
pub fn max_count(counts: &CountMap) -> Option<(&str, u64)> {
    let mut best: Option<(&str, u64)> = None;
    for (key, &count) in counts {
        match best {
            Some((_, max)) if count <= max => {}
            _ => best = Some((key.as_str(), count)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, lang: &str) -> Record {
        Record {
            id: id.into(),
            text: "t".into(),
            created_at: "2023-03-15T04:12:56.000Z".into(),
            lang: lang.into(),
            p1: "1".into(),
            p2: "2".into(),
            p3: "3".into(),
            p4: "4".into(),
        }
    }

    #[test]
    fn merge_is_associative() {
        let a = vec![record("1", "en")];
        let b = vec![record("2", "fr"), record("3", "en")];
        let c = vec![record("4", "es")];

        let all = merge(vec![a.clone(), b.clone(), c.clone()]);
        let left = merge(vec![merge(vec![a.clone(), b.clone()]), c.clone()]);
        let right = merge(vec![a, merge(vec![b, c])]);

        assert_eq!(all, left);
        assert_eq!(all, right);
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn merge_keeps_rank_order() {
        let merged = merge(vec![
            vec![record("1", "en"), record("2", "en")],
            vec![],
            vec![record("3", "fr")],
        ]);
        let ids: Vec<_> = merged.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn counts_sum_per_key() {
        let first = CountMap::from([("a".to_string(), 3), ("b".to_string(), 5)]);
        let second = CountMap::from([("a".to_string(), 2)]);

        let merged = merge_counts([first, second]);
        assert_eq!(merged["a"], 5);
        assert_eq!(merged["b"], 5);
    }

    #[test]
    fn tie_break_picks_first_encountered_key() {
        // "a" is inserted before "b" and both total 5: "a" must win
        let first = CountMap::from([("a".to_string(), 3), ("b".to_string(), 5)]);
        let second = CountMap::from([("a".to_string(), 2)]);

        let merged = merge_counts([first, second]);
        assert_eq!(max_count(&merged), Some(("a", 5)));
    }

    #[test]
    fn strictly_larger_count_wins_regardless_of_order() {
        let counts = CountMap::from([("a".to_string(), 3), ("b".to_string(), 7)]);
        assert_eq!(max_count(&counts), Some(("b", 7)));
        assert_eq!(max_count(&CountMap::new()), None);
    }

    #[test]
    fn count_languages_follows_discovery_order() {
        let records = vec![record("1", "en"), record("2", "fr"), record("3", "en")];
        let counts = count_languages(&records);
        let keys: Vec<_> = counts.keys().map(String::as_str).collect();
        assert_eq!(keys, ["en", "fr"]);
        assert_eq!(counts["en"], 2);
    }
}
