//! Store configuration.

/// Tunables for a [`super::Store`]. There is no network or filesystem
/// surface here, so configuration is a plain struct constructed by the
/// caller rather than sourced from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Bounded history ring capacity. Defaults to 50 entries.
    pub history_capacity: usize,
    /// Starting value for the store's internal logical clock, which
    /// stands in for a creation timestamp when minting ids and document
    /// metadata. Tests pin this to get reproducible ids; production
    /// callers that want wall-clock-derived ids seed it from their own
    /// clock once at construction.
    pub id_seed: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            history_capacity: 50,
            id_seed: 0,
        }
    }
}

impl StoreConfig {
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    pub fn with_id_seed(mut self, seed: u64) -> Self {
        self.id_seed = seed;
        self
    }
}
