//! Group-by building blocks shared by the report catalog.
//!
//! Two orderings exist and both are deterministic:
//! - [`value_counts`] ranks by descending count, ties in first-seen order.
//! - the `group_*` helpers visit keys in ascending order, then rank
//!   descending with a stable sort, so ties stay in ascending key order.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// Treats an empty cell as a missing group key.
pub fn present(key: &str) -> Option<&str> {
	if key.is_empty() { None } else { Some(key) }
}

/// Occurrences per key, most frequent first, ties in first-seen order.
pub fn value_counts<K, I>(keys: I) -> Vec<(K, i64)>
where
	K: Eq + Hash + Clone,
	I: IntoIterator<Item = K>,
{
	let mut counts: Vec<(K, i64)> = Vec::new();
	let mut positions: HashMap<K, usize> = HashMap::new();

	for key in keys {
		match positions.get(&key) {
			Some(&position) => counts[position].1 += 1,
			None => {
				positions.insert(key.clone(), counts.len());
				counts.push((key, 1));
			}
		}
	}

	counts.sort_by(|a, b| b.1.cmp(&a.1));
	counts
}

/// Rows per key, largest group first.
pub fn group_size<K, I>(keys: I) -> Vec<(K, i64)>
where
	K: Ord,
	I: IntoIterator<Item = K>,
{
	let mut groups: BTreeMap<K, i64> = BTreeMap::new();
	for key in keys {
		*groups.entry(key).or_insert(0) += 1;
	}

	let mut ranked: Vec<(K, i64)> = groups.into_iter().collect();
	ranked.sort_by(|a, b| b.1.cmp(&a.1));
	ranked
}

/// Sum of present values per key, largest first.
///
/// Missing values are skipped; a group with no present value sums to 0.
pub fn group_sum<K, I>(pairs: I) -> Vec<(K, f64)>
where
	K: Ord,
	I: IntoIterator<Item = (K, Option<f64>)>,
{
	let mut groups: BTreeMap<K, f64> = BTreeMap::new();
	for (key, value) in pairs {
		*groups.entry(key).or_insert(0.0) += value.unwrap_or(0.0);
	}

	let mut ranked: Vec<(K, f64)> = groups.into_iter().collect();
	ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
	ranked
}

/// Mean of present values per key, largest first.
///
/// A group with no present value has no mean and ranks last.
pub fn group_mean<K, I>(pairs: I) -> Vec<(K, Option<f64>)>
where
	K: Ord,
	I: IntoIterator<Item = (K, Option<f64>)>,
{
	let mut groups: BTreeMap<K, (f64, usize)> = BTreeMap::new();
	for (key, value) in pairs {
		let entry = groups.entry(key).or_insert((0.0, 0));
		if let Some(value) = value {
			entry.0 += value;
			entry.1 += 1;
		}
	}

	let mut ranked: Vec<(K, Option<f64>)> = groups
		.into_iter()
		.map(|(key, (sum, count))| (key, (count > 0).then(|| sum / count as f64)))
		.collect();
	ranked.sort_by(|a, b| match (a.1, b.1) {
		(Some(x), Some(y)) => y.total_cmp(&x),
		(Some(_), None) => std::cmp::Ordering::Less,
		(None, Some(_)) => std::cmp::Ordering::Greater,
		(None, None) => std::cmp::Ordering::Equal,
	});
	ranked
}

/// Rounds half to even at `decimals` places.
pub fn round_half_even(value: f64, decimals: i32) -> f64 {
	let factor = 10f64.powi(decimals);
	(value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_value_counts_ties_keep_first_seen() {
		let counts = value_counts(["b", "a", "c", "a", "c"]);
		assert_eq!(counts, vec![("a", 2), ("c", 2), ("b", 1)]);
	}

	#[test]
	fn test_group_size_ties_ascending() {
		let sizes = group_size(["Soup", "Rice", "Bread", "Rice"]);
		assert_eq!(sizes, vec![("Rice", 2), ("Bread", 1), ("Soup", 1)]);
	}

	#[test]
	fn test_group_sum_skips_missing() {
		let sums = group_sum([("x", Some(2.0)), ("y", None), ("x", Some(3.0)), ("z", Some(1.0))]);
		assert_eq!(sums, vec![("x", 5.0), ("z", 1.0), ("y", 0.0)]);
	}

	#[test]
	fn test_group_mean_missing_last() {
		let means = group_mean([(1, Some(10.0)), (2, None), (1, Some(20.0)), (3, Some(40.0))]);
		assert_eq!(means, vec![(3, Some(40.0)), (1, Some(15.0)), (2, None)]);
	}

	#[test]
	fn test_empty_inputs() {
		assert!(value_counts(Vec::<&str>::new()).is_empty());
		assert!(group_sum(Vec::<(&str, Option<f64>)>::new()).is_empty());
	}

	#[test]
	fn test_round_half_even() {
		assert_eq!(round_half_even(33.333_333, 2), 33.33);
		assert_eq!(round_half_even(66.666_666, 2), 66.67);
		assert_eq!(round_half_even(2.5, 0), 2.0);
		assert_eq!(present(""), None);
	}
}
