use chrono::{DateTime, Utc};

/// A change notification published once the ledger has applied it.
///
/// Subscribers only learn about committed changes; the payload is a snapshot
/// and is never edited after publishing.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Dotted name subscribers filter on, e.g. `inventory.stock.moved`.
    fn event_type(&self) -> &'static str;

    /// Bumped when the payload shape of `event_type` changes.
    fn version(&self) -> u32;

    /// Ledger clock time of the change.
    fn occurred_at(&self) -> DateTime<Utc>;
}
