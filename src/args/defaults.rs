pub(crate) const DEFAULT_USER_AGENT: &str = concat!("steadyload/", env!("CARGO_PKG_VERSION"));

/// Outcome channel depth; absorbs completion bursts between dispatch drains.
pub(crate) const DEFAULT_OUTCOME_QUEUE_CAPACITY: usize = 1024;
