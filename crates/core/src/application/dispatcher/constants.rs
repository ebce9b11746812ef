// Dispatcher constants (no magic values)

/// Distributor queue capacity. tokio channels need at least one slot, so a
/// send completes once the previous item has been taken by a worker.
pub const DISTRIBUTOR_CAPACITY: usize = 1;

/// Smallest accepted pool size
pub const MIN_WORKERS: usize = 1;
