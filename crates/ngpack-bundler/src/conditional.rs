//! Ordered, declarative inclusion lists.
//!
//! Rules and plugins are declared as `(predicate, producer)` pairs in their
//! final order. Producers only run when their predicate holds, and the list
//! is evaluated exactly once.

/// An ordered list of conditionally produced items.
///
/// # Example
///
/// ```
/// use ngpack_bundler::conditional::Conditional;
///
/// let verbose = false;
/// let items = Conditional::new()
///     .always(|| "first")
///     .when(verbose, || "verbose")
///     .when_many(true, || vec!["a", "b"])
///     .build();
///
/// assert_eq!(items, vec!["first", "a", "b"]);
/// ```
pub struct Conditional<'a, T> {
    entries: Vec<(bool, Box<dyn FnOnce() -> Vec<T> + 'a>)>,
}

impl<'a, T: 'a> Conditional<'a, T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn always(self, produce: impl FnOnce() -> T + 'a) -> Self {
        self.when(true, produce)
    }

    pub fn when(self, predicate: bool, produce: impl FnOnce() -> T + 'a) -> Self {
        self.when_many(predicate, move || vec![produce()])
    }

    pub fn when_many(mut self, predicate: bool, produce: impl FnOnce() -> Vec<T> + 'a) -> Self {
        self.entries.push((predicate, Box::new(produce)));
        self
    }

    /// Run the producers whose predicate holds, in declaration order.
    pub fn build(self) -> Vec<T> {
        self.entries
            .into_iter()
            .filter(|(predicate, _)| *predicate)
            .flat_map(|(_, produce)| produce())
            .collect()
    }
}

impl<'a, T: 'a> Default for Conditional<'a, T> {
    fn default() -> Self {
        Self::new()
    }
}
