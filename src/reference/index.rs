//! Static interval index for overlap queries.
//!
//! [`IntervalArray`] keeps its entries sorted by begin coordinate together
//! with a running maximum of end coordinates. Built once, it answers
//! overlap queries in O(log n + k) and reports the nearest entries left and
//! right of a query that hits nothing.

/// An entry with half-open forward-strand bounds `[begin, end)`
#[derive(Debug, Clone)]
struct Entry<T> {
    begin: i64,
    end: i64,
    value: T,
}

/// Result of an overlap query
#[derive(Debug)]
pub struct QueryResult<'a, T> {
    /// Entries overlapping the query, in begin order
    pub entries: Vec<&'a T>,
    /// Entry ending closest before the query; only set when `entries` is empty
    pub left: Option<&'a T>,
    /// Entry beginning closest after the query; only set when `entries` is empty
    pub right: Option<&'a T>,
}

impl<'a, T> QueryResult<'a, T> {
    fn empty() -> Self {
        Self {
            entries: Vec::new(),
            left: None,
            right: None,
        }
    }
}

/// A sorted array of intervals with a running maximum of end coordinates
#[derive(Debug, Clone)]
pub struct IntervalArray<T> {
    entries: Vec<Entry<T>>,
    /// `max_end[i]` is the index of the entry with the largest end in `0..=i`
    max_end: Vec<usize>,
}

impl<T> Default for IntervalArray<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            max_end: Vec::new(),
        }
    }
}

impl<T> IntervalArray<T> {
    /// Build from `(begin, end, value)` triples in any order
    pub fn new(items: impl IntoIterator<Item = (i64, i64, T)>) -> Self {
        let mut entries: Vec<Entry<T>> = items
            .into_iter()
            .map(|(begin, end, value)| Entry { begin, end, value })
            .collect();
        entries.sort_by_key(|e| (e.begin, e.end));

        let mut max_end: Vec<usize> = Vec::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            let best = match max_end.last() {
                Some(&prev) if entries[prev].end >= entry.end => prev,
                _ => i,
            };
            max_end.push(best);
        }
        Self { entries, max_end }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All values in begin order
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|e| &e.value)
    }

    /// Entries containing the 0-based position `pos`
    pub fn find_overlapping_with_point(&self, pos: i64) -> QueryResult<'_, T> {
        self.query(pos, pos + 1)
    }

    /// Entries overlapping `[begin, end)`
    ///
    /// An empty query interval behaves like a point query at `begin`.
    pub fn find_overlapping_with_interval(&self, begin: i64, end: i64) -> QueryResult<'_, T> {
        self.query(begin, end.max(begin + 1))
    }

    fn query(&self, begin: i64, end: i64) -> QueryResult<'_, T> {
        if self.entries.is_empty() {
            return QueryResult::empty();
        }
        // entries[..hi] begin before the query end
        let hi = self.entries.partition_point(|e| e.begin < end);
        // first index whose prefix maximum reaches into the query
        let lo = self.max_end[..hi].partition_point(|&i| self.entries[i].end <= begin);

        let entries: Vec<&T> = self.entries[lo..hi]
            .iter()
            .filter(|e| e.end > begin)
            .map(|e| &e.value)
            .collect();

        if !entries.is_empty() {
            return QueryResult {
                entries,
                left: None,
                right: None,
            };
        }

        let left = hi
            .checked_sub(1)
            .map(|i| &self.entries[self.max_end[i]].value);
        let right = self.entries.get(hi).map(|e| &e.value);
        QueryResult {
            entries,
            left,
            right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn array() -> IntervalArray<&'static str> {
        IntervalArray::new(vec![
            (100, 200, "a"),
            (150, 400, "b"),
            (500, 600, "c"),
            (520, 540, "d"),
            (900, 1000, "e"),
        ])
    }

    #[test]
    fn test_point_query() {
        let arr = array();
        let res = arr.find_overlapping_with_point(160);
        assert_eq!(res.entries, vec![&"a", &"b"]);
        assert!(res.left.is_none() && res.right.is_none());

        let res = arr.find_overlapping_with_point(200);
        assert_eq!(res.entries, vec![&"b"]);

        let res = arr.find_overlapping_with_point(99);
        assert!(res.entries.is_empty());
        assert_eq!(res.left, None);
        assert_eq!(res.right, Some(&"a"));
    }

    #[test]
    fn test_interval_query() {
        let arr = array();
        let res = arr.find_overlapping_with_interval(390, 530);
        assert_eq!(res.entries, vec![&"b", &"c", &"d"]);

        let res = arr.find_overlapping_with_interval(0, 2000);
        assert_eq!(res.entries.len(), 5);
    }

    #[test]
    fn test_neighbors_when_nothing_overlaps() {
        let arr = array();
        let res = arr.find_overlapping_with_interval(700, 800);
        assert!(res.entries.is_empty());
        // "c" ends at 600 which is further right than "d"
        assert_eq!(res.left, Some(&"c"));
        assert_eq!(res.right, Some(&"e"));

        let res = arr.find_overlapping_with_point(5000);
        assert_eq!(res.left, Some(&"e"));
        assert_eq!(res.right, None);
    }

    #[test]
    fn test_left_neighbor_uses_longest_reaching_entry() {
        let arr = IntervalArray::new(vec![(0, 450, "long"), (100, 120, "short")]);
        let res = arr.find_overlapping_with_point(460);
        assert_eq!(res.left, Some(&"long"));
    }

    #[test]
    fn test_nested_entries_behind_a_long_one() {
        let arr = IntervalArray::new(vec![
            (0, 1000, "outer"),
            (100, 200, "first"),
            (300, 400, "second"),
            (1200, 1300, "after"),
        ]);
        let res = arr.find_overlapping_with_point(250);
        assert_eq!(res.entries, vec![&"outer"]);

        let res = arr.find_overlapping_with_interval(350, 1250);
        assert_eq!(res.entries, vec![&"outer", &"second", &"after"]);

        let res = arr.find_overlapping_with_point(1100);
        assert!(res.entries.is_empty());
        assert_eq!(res.left, Some(&"outer"));
        assert_eq!(res.right, Some(&"after"));
    }

    #[test]
    fn test_empty_query_is_point_query() {
        let arr = array();
        let res = arr.find_overlapping_with_interval(150, 150);
        assert_eq!(res.entries, vec![&"a", &"b"]);
    }

    #[test]
    fn test_empty_array() {
        let arr: IntervalArray<u32> = IntervalArray::new(Vec::new());
        let res = arr.find_overlapping_with_point(10);
        assert!(res.entries.is_empty());
        assert!(res.left.is_none() && res.right.is_none());
        assert!(arr.is_empty());
    }
}
