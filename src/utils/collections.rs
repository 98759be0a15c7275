//! Collection helper functions
//!
//! Membership testing and lazy flattening of tree-shaped data. Paged query
//! exhaustion lives in [`crate::query`].

use crate::error::{Error, Result};
use std::fmt;
use std::iter::FusedIterator;

/// Check whether `value` equals one of `candidates`
///
/// Unlike most helpers in this crate this one is strict: an absent value is
/// an error rather than `false`.
///
/// # Errors
///
/// Returns [`Error::NullArgument`] when `value` is `None`.
///
/// # Example
///
/// ```rust
/// use useful_extensions::utils::collections::contains;
///
/// assert!(contains(Some(&"b"), &["a", "b", "c"]).unwrap());
/// assert!(!contains(Some(&4), &[1, 2, 3]).unwrap());
/// assert!(contains::<i32>(None, &[1]).is_err());
/// ```
pub fn contains<T: PartialEq>(value: Option<&T>, candidates: &[T]) -> Result<bool> {
    let value = value.ok_or_else(|| Error::null_argument("value"))?;
    Ok(candidates.contains(value))
}

/// Lazy stack-driven traversal returned by [`flatten`]
pub struct Flatten<T, F> {
    stack: Vec<T>,
    // Last yielded node, expanded on the following call
    pending: Option<T>,
    children_of: F,
}

impl<T: Clone, F, C> Iterator for Flatten<T, F>
where
    F: FnMut(&T) -> C,
    C: IntoIterator<Item = T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(previous) = self.pending.take() {
            self.stack.extend((self.children_of)(&previous));
        }
        let item = self.stack.pop()?;
        self.pending = Some(item.clone());
        Some(item)
    }
}

impl<T: Clone, F, C> FusedIterator for Flatten<T, F>
where
    F: FnMut(&T) -> C,
    C: IntoIterator<Item = T>,
{
}

impl<T: fmt::Debug, F> fmt::Debug for Flatten<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flatten")
            .field("stack", &self.stack)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

/// Visit every node reachable from `roots`, one at a time
///
/// Traversal uses an explicit stack. The stack is seeded by pushing `roots`
/// in order, so the last root comes out first. Each step pops a node and
/// yields it; its children are pushed, in the order `children_of` returns
/// them, only when the next node is requested. Siblings therefore come out
/// in reverse order, each followed by its own descendants. A yielded node is
/// cloned and kept until then.
///
/// Nodes are not tracked: a node reachable along two paths is yielded twice,
/// and a cycle never terminates.
///
/// # Example
///
/// ```rust
/// use useful_extensions::utils::collections::flatten;
///
/// // 1 -> [2, 3], 2 -> [4]
/// let children = |n: &u32| match n {
///     1 => vec![2, 3],
///     2 => vec![4],
///     _ => vec![],
/// };
/// let order: Vec<u32> = flatten([1], children).collect();
/// assert_eq!(order, vec![1, 3, 2, 4]);
/// ```
pub fn flatten<I, F, C>(roots: I, children_of: F) -> Flatten<I::Item, F>
where
    I: IntoIterator,
    I::Item: Clone,
    F: FnMut(&I::Item) -> C,
    C: IntoIterator<Item = I::Item>,
{
    Flatten {
        stack: roots.into_iter().collect(),
        pending: None,
        children_of,
    }
}
