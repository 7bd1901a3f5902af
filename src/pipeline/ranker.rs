use std::cmp::Ordering;
use crate::config::RankMode;

/// Ascending order of `entries` by value.
///
/// `entries` is an ordered mapping: its order is the iteration order that
/// decides ties (`Stable`) or the order names are re-paired in (`LegacyZip`).
/// Either way the output has the same length as the input and its values
/// are non-decreasing.
pub fn rank<V>(entries: &[(String, V)], mode: RankMode) -> Vec<(String, V)>
where
    V: PartialOrd + Copy,
{
    match mode {
        RankMode::Stable => {
            let mut ranked = entries.to_vec();
            // sort_by is stable
            ranked.sort_by(|a, b| compare(&a.1, &b.1));
            ranked
        }
        RankMode::LegacyZip => {
            let mut values: Vec<V> = entries.iter().map(|(_, v)| *v).collect();
            values.sort_by(compare);
            entries
                .iter()
                .map(|(name, _)| name.clone())
                .zip(values)
                .collect()
        }
    }
}

/// The `k` highest entries: rank ascending, reverse, take the first `k`.
pub fn top_k<V>(entries: &[(String, V)], k: usize, mode: RankMode) -> Vec<(String, V)>
where
    V: PartialOrd + Copy,
{
    let mut ranked = rank(entries, mode);
    ranked.reverse();
    ranked.truncate(k);
    ranked
}

fn compare<V: PartialOrd>(a: &V, b: &V) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, f64)]) -> Vec<(String, f64)> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn is_non_decreasing(ranked: &[(String, f64)]) -> bool {
        ranked.windows(2).all(|w| w[0].1 <= w[1].1)
    }

    #[test]
    fn test_rank_length_and_order_hold_in_both_modes() {
        let cases = vec![
            entries(&[]),
            entries(&[("Salem", 700.0)]),
            entries(&[("Salem", 700.0), ("Lynn", 512.0), ("Nahant", 801.0), ("Ayer", 512.0)]),
            entries(&[("a", 3.0), ("b", 2.0), ("c", 1.0), ("d", 0.0), ("e", -1.0)]),
            entries(&[("a", 5.0), ("b", 5.0), ("c", 5.0)]),
        ];
        for case in &cases {
            for mode in [RankMode::Stable, RankMode::LegacyZip] {
                let ranked = rank(case, mode);
                assert_eq!(ranked.len(), case.len());
                assert!(is_non_decreasing(&ranked), "{:?} in {} mode", ranked, mode);
            }
        }
    }

    #[test]
    fn test_stable_keeps_pairs_together() {
        let ranked = rank(&entries(&[("Salem", 700.0), ("Lynn", 512.0), ("Nahant", 801.0)]), RankMode::Stable);
        assert_eq!(ranked, entries(&[("Lynn", 512.0), ("Salem", 700.0), ("Nahant", 801.0)]));
    }

    #[test]
    fn test_stable_ties_keep_iteration_order() {
        let ranked = rank(&entries(&[("b", 1.0), ("a", 1.0), ("c", 0.0)]), RankMode::Stable);
        assert_eq!(ranked, entries(&[("c", 0.0), ("b", 1.0), ("a", 1.0)]));
    }

    #[test]
    fn test_legacy_zip_repairs_in_iteration_order() {
        let ranked = rank(&entries(&[("Salem", 700.0), ("Lynn", 512.0), ("Nahant", 801.0)]), RankMode::LegacyZip);
        assert_eq!(ranked, entries(&[("Salem", 512.0), ("Lynn", 700.0), ("Nahant", 801.0)]));
    }

    #[test]
    fn test_top_k_picks_highest() {
        let counts: Vec<(String, usize)> = vec![("x".into(), 2), ("y".into(), 1), ("z".into(), 5)];
        let top = top_k(&counts, 2, RankMode::Stable);
        assert_eq!(top, vec![("z".to_string(), 5), ("x".to_string(), 2)]);
    }

    #[test]
    fn test_top_k_larger_than_input() {
        let counts: Vec<(String, usize)> = vec![("x".into(), 2)];
        assert_eq!(top_k(&counts, 15, RankMode::Stable).len(), 1);
        assert!(top_k(&counts, 0, RankMode::Stable).is_empty());
    }

    #[test]
    fn test_top_k_ties_favour_later_entries() {
        // Ascending stable pass puts "a" before "b"; reversing puts "b" first.
        let counts: Vec<(String, usize)> = vec![("a".into(), 3), ("b".into(), 3), ("c".into(), 1)];
        let top = top_k(&counts, 1, RankMode::Stable);
        assert_eq!(top, vec![("b".to_string(), 3)]);
    }
}
