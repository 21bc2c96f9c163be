//! Keyset pagination shared by every store.
//!
//! A cursor is the last-seen id, not an opaque token. Queries select
//! `id > cursor ORDER BY id LIMIT n`, so ids must be monotonic and never
//! reused. Callers start with cursor `0` and stop on the first empty page;
//! the returned cursor alone does not signal the end.

/// Rows that can be paged by their primary key.
pub(crate) trait Keyed {
    fn key(&self) -> i64;
}

/// One page of entities plus the cursor to pass for the next page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub cursor: i64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Convert a page of rows, taking the cursor from the largest key.
    pub(crate) fn from_rows<R>(rows: Vec<R>) -> Self
    where
        R: Keyed + Into<T>,
    {
        let cursor = next_cursor(rows.iter().map(Keyed::key));
        Self {
            cursor,
            items: rows.into_iter().map(Into::into).collect(),
        }
    }

    /// An empty page is the end of the scan.
    pub fn is_last(&self) -> bool {
        self.items.is_empty()
    }
}

/// Largest key seen, or `0` for an empty page.
pub fn next_cursor(keys: impl IntoIterator<Item = i64>) -> i64 {
    keys.into_iter().fold(0, i64::max)
}
