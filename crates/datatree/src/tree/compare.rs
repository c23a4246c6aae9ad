//! Comparators used by the set-backed child stores

use std::cmp::Ordering;
use std::fmt::Display;
use std::rc::Rc;

/// A shared ordering over `T`
///
/// Set-backed stores keep their children sorted by a comparator and treat
/// `Ordering::Equal` as "same entry". Nodes built through a node's factory
/// share the comparator of the node that built them.
pub type Comparator<T> = Rc<dyn Fn(&T, &T) -> Ordering>;

/// Orders by `T`'s own `Ord` implementation
pub fn natural_order<T: Ord + 'static>() -> Comparator<T> {
    Rc::new(|a: &T, b: &T| a.cmp(b))
}

/// Orders by the `Display` representation of `T`
///
/// Two values that print the same compare equal, so a set-backed store using
/// this comparator will treat them as one entry.
pub fn display_order<T: Display + 'static>() -> Comparator<T> {
    Rc::new(|a: &T, b: &T| a.to_string().cmp(&b.to_string()))
}

/// Inverts another comparator
pub fn reverse<T: 'static>(inner: Comparator<T>) -> Comparator<T> {
    Rc::new(move |a: &T, b: &T| inner(b, a))
}

/// Compares optional keys, placing missing keys after present ones
pub(crate) fn compare_keys<K>(cmp: &Comparator<K>, a: Option<&K>, b: Option<&K>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
