//! Hit predicates applied by hub streams before a hit is yielded.

use crate::record::Hit;

/// Decides whether a decoded hit is passed on.
///
/// Any `FnMut(&Hit) -> bool + Send` closure is a filter.
pub trait HitFilter: Send {
    fn accept(&mut self, hit: &Hit) -> bool;
}

impl<F> HitFilter for F
where
    F: FnMut(&Hit) -> bool + Send,
{
    fn accept(&mut self, hit: &Hit) -> bool {
        self(hit)
    }
}

/// Owned filter as stored by a hub stream.
pub type BoxedFilter = Box<dyn HitFilter>;

/// Pass every hit.
pub fn accept_all() -> impl HitFilter + Clone {
    |_: &Hit| true
}

/// Only hits recorded under the min-bias trigger.
pub fn min_bias_only() -> impl HitFilter + Clone {
    |hit: &Hit| hit.min_bias()
}

/// Hits with `start <= timestamp < end`.
pub fn time_window(start: u64, end: u64) -> impl HitFilter + Clone {
    move |hit: &Hit| (start..end).contains(&hit.timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_half_open() {
        let mut f = time_window(10, 20);
        assert!(!f.accept(&Hit::new("x", 9, 0, 0)));
        assert!(f.accept(&Hit::new("x", 10, 0, 0)));
        assert!(!f.accept(&Hit::new("x", 20, 0, 0)));
    }

    #[test]
    fn min_bias_reads_bit_30() {
        let mut f = min_bias_only();
        assert!(f.accept(&Hit::new("x", 0, 1 << 30, 0)));
        assert!(!f.accept(&Hit::new("x", 0, 0, 0)));
    }
}
