//! Determinism utilities: first-occurrence selection & stable ordering.
//!
//! This module is **I/O-free**. It provides:
//! - `argmax_first_by`: maximum by a float key, ties resolved to the earliest index
//! - `sort_by_magnitude_desc`: stable descending sort by `|key|`
//! - `is_sorted_by_magnitude_desc`: check used to avoid re-sorting ordered input
//! - `cmp_numeric_ids`: total order on cluster ids written as decimal strings

use core::cmp::Ordering;

/* -------------------------------------------------------------------------- */
/*                             First-occurrence max                           */
/* -------------------------------------------------------------------------- */

/// Return the item with the greatest `key`, or `None` for an empty input.
///
/// Only a *strictly* greater key replaces the current leader, so among equal
/// keys the first one in iteration order wins. NaN keys never lead.
pub fn argmax_first_by<'a, T, F>(items: &'a [T], key: F) -> Option<&'a T>
where
    F: Fn(&T) -> f64,
{
    let mut best: Option<(&'a T, f64)> = None;
    for it in items {
        let k = key(it);
        if k.is_nan() {
            continue;
        }
        match best {
            Some((_, bk)) if k <= bk => {}
            _ => best = Some((it, k)),
        }
    }
    best.map(|(it, _)| it)
}

/* -------------------------------------------------------------------------- */
/*                              Magnitude ordering                            */
/* -------------------------------------------------------------------------- */

#[inline]
fn cmp_magnitude_desc(a: f64, b: f64) -> Ordering {
    b.abs().partial_cmp(&a.abs()).unwrap_or(Ordering::Equal)
}

/// True when `items` is already non-increasing by `|key|`.
pub fn is_sorted_by_magnitude_desc<T, F>(items: &[T], key: F) -> bool
where
    F: Fn(&T) -> f64,
{
    items
        .windows(2)
        .all(|w| cmp_magnitude_desc(key(&w[0]), key(&w[1])) != Ordering::Greater)
}

/// Sort **in place** by descending `|key|`. `sort_by` is stable, so equal
/// magnitudes keep their original relative order.
#[inline]
pub fn sort_by_magnitude_desc<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> f64,
{
    items.sort_by(|a, b| cmp_magnitude_desc(key(a), key(b)));
}

/* -------------------------------------------------------------------------- */
/*                                Numeric ids                                 */
/* -------------------------------------------------------------------------- */

/// Order decimal id strings by value ("2" < "10"); unparsable ids sort last,
/// lexicographically among themselves.
pub fn cmp_numeric_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/* ---------------------------------- Tests --------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_ties_go_to_first() {
        let xs = [("A", 0.9), ("B", 0.9), ("C", 0.8)];
        let got = argmax_first_by(&xs, |x| x.1).unwrap();
        assert_eq!(got.0, "A");
    }

    #[test]
    fn argmax_empty_is_none() {
        let xs: [(&str, f64); 0] = [];
        assert!(argmax_first_by(&xs, |x| x.1).is_none());
    }

    #[test]
    fn argmax_skips_nan() {
        let xs = [("A", f64::NAN), ("B", 0.1)];
        assert_eq!(argmax_first_by(&xs, |x| x.1).unwrap().0, "B");
    }

    #[test]
    fn magnitude_sort_is_stable() {
        let mut xs = vec![("a", 0.2), ("b", -0.5), ("c", 0.5), ("d", -0.2)];
        assert!(!is_sorted_by_magnitude_desc(&xs, |x| x.1));
        sort_by_magnitude_desc(&mut xs, |x| x.1);
        let got: Vec<&str> = xs.iter().map(|x| x.0).collect();
        assert_eq!(got, vec!["b", "c", "a", "d"]);
        assert!(is_sorted_by_magnitude_desc(&xs, |x| x.1));
    }

    #[test]
    fn numeric_ids_sort_by_value() {
        let mut ids = vec!["10", "2", "0", "x"];
        ids.sort_by(|a, b| cmp_numeric_ids(a, b));
        assert_eq!(ids, vec!["0", "2", "10", "x"]);
    }
}
