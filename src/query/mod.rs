//! Paged query exhaustion
//!
//! A paged query source hands out bounded batches of results, addressed by
//! offset. An empty batch means the source is exhausted. [`fetch_all_pages`]
//! and [`fetch_all_pages_stream`] turn such a source into one lazy sequence,
//! requesting pages strictly one after another.

use crate::error::Result;
use async_trait::async_trait;
use futures::stream::{self, Stream};
use std::collections::VecDeque;
use std::iter::FusedIterator;
use tracing::debug;

/// A source of result pages addressed by offset
///
/// Closures of the form `FnMut(usize) -> Result<Vec<T>>` are sources too.
pub trait PagedQuery<T> {
    /// Fetch the page starting at `offset`; an empty page signals the end
    fn execute_at(&mut self, offset: usize) -> Result<Vec<T>>;
}

impl<T, F> PagedQuery<T> for F
where
    F: FnMut(usize) -> Result<Vec<T>>,
{
    fn execute_at(&mut self, offset: usize) -> Result<Vec<T>> {
        self(offset)
    }
}

/// Asynchronous counterpart of [`PagedQuery`]
#[async_trait]
pub trait AsyncPagedQuery<T: Send>: Send {
    /// Fetch the page starting at `offset`; an empty page signals the end
    async fn execute_at(&mut self, offset: usize) -> Result<Vec<T>>;
}

/// Lazy iterator over every element of a paged query source
///
/// Created by [`fetch_all_pages`].
#[derive(Debug)]
pub struct AllPages<T, Q> {
    source: Q,
    buffer: VecDeque<T>,
    yielded: usize,
    done: bool,
}

impl<T, Q> AllPages<T, Q> {
    /// Number of elements yielded so far
    pub const fn yielded(&self) -> usize {
        self.yielded
    }

    /// Give back the underlying source
    pub fn into_inner(self) -> Q {
        self.source
    }
}

impl<T, Q: PagedQuery<T>> Iterator for AllPages<T, Q> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                self.yielded += 1;
                return Some(Ok(item));
            }
            if self.done {
                return None;
            }

            let offset = self.yielded;
            match self.source.execute_at(offset) {
                Ok(page) if page.is_empty() => {
                    debug!("Paged query exhausted at offset {}", offset);
                    self.done = true;
                    return None;
                }
                Ok(page) => {
                    debug!("Fetched page at offset {}: {} items", offset, page.len());
                    self.buffer.extend(page);
                }
                Err(e) => {
                    debug!("Paged query failed at offset {}: {}", offset, e);
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<T, Q: PagedQuery<T>> FusedIterator for AllPages<T, Q> {}

/// Exhaust a paged query source, one page at a time
///
/// The first page is requested at offset 0 and each following page at the
/// number of elements yielded so far. Nothing is fetched until the iterator
/// is advanced, and the next page is only requested once the current one
/// has been consumed.
///
/// A failing page is yielded once as `Err`, after which the iterator ends.
///
/// # Example
///
/// ```rust
/// use useful_extensions::error::Result;
/// use useful_extensions::query::fetch_all_pages;
///
/// let rows: Vec<u32> = (1..=7).collect();
/// let source = |offset: usize| -> Result<Vec<u32>> {
///     Ok(rows.iter().skip(offset).take(3).copied().collect())
/// };
///
/// let all: Result<Vec<u32>> = fetch_all_pages(source).collect();
/// assert_eq!(all.unwrap(), rows);
/// ```
pub fn fetch_all_pages<T, Q: PagedQuery<T>>(source: Q) -> AllPages<T, Q> {
    AllPages {
        source,
        buffer: VecDeque::new(),
        yielded: 0,
        done: false,
    }
}

/// Exhaust an asynchronous paged query source as a stream
///
/// Same offsets and termination as [`fetch_all_pages`]; a page is only
/// requested after the previous one has been fully consumed, so requests
/// never overlap.
pub fn fetch_all_pages_stream<T, Q>(source: Q) -> impl Stream<Item = Result<T>>
where
    T: Send,
    Q: AsyncPagedQuery<T>,
{
    let state = AllPages {
        source,
        buffer: VecDeque::new(),
        yielded: 0,
        done: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(item) = state.buffer.pop_front() {
                state.yielded += 1;
                return Some((Ok(item), state));
            }
            if state.done {
                return None;
            }

            let offset = state.yielded;
            match state.source.execute_at(offset).await {
                Ok(page) if page.is_empty() => {
                    debug!("Paged query exhausted at offset {}", offset);
                    return None;
                }
                Ok(page) => {
                    debug!("Fetched page at offset {}: {} items", offset, page.len());
                    state.buffer.extend(page);
                }
                Err(e) => {
                    debug!("Paged query failed at offset {}: {}", offset, e);
                    state.done = true;
                    return Some((Err(e), state));
                }
            }
        }
    })
}
