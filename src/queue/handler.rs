//! Item callback capability used by the drain operations

/// Receives each drained item, one call per item, in queue order
///
/// Any `FnMut(&str)` closure is a handler. Implement the trait directly for
/// stateful handlers that should be reusable across drains.
///
/// # Example
///
/// ```rust
/// use drainq::queue::api::ItemHandler;
///
/// struct Counter(usize);
///
/// impl ItemHandler for Counter {
///     fn handle(&mut self, _item: &str) {
///         self.0 += 1;
///     }
/// }
///
/// let mut counter = Counter(0);
/// counter.handle("a");
/// assert_eq!(counter.0, 1);
/// ```
pub trait ItemHandler {
    fn handle(&mut self, item: &str);
}

impl<F> ItemHandler for F
where
    F: FnMut(&str),
{
    fn handle(&mut self, item: &str) {
        self(item)
    }
}
