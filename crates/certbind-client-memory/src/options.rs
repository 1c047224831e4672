use std::time::Duration;

/// What the in-memory control plane answers when deleting an absent certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingDelete {
    /// Succeed, as Azure Resource Manager does with `204 No Content`.
    #[default]
    Succeed,
    /// Fail with `ApiError::NotFound`.
    NotFound,
}

/// Behaviour knobs for [`InMemoryWebPubSub`](crate::InMemoryWebPubSub).
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Delay between two polls of a long-running operation.
    pub poll_interval: Duration,
    /// Number of polls before a long-running operation reaches a terminal state.
    pub polls_until_complete: u32,
    /// Delay before every call is served, to simulate a slow control plane.
    pub latency: Duration,
    pub missing_delete: MissingDelete,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(5),
            polls_until_complete: 2,
            latency: Duration::ZERO,
            missing_delete: MissingDelete::default(),
        }
    }
}

impl ClientOptions {
    /// Options that complete long-running operations on the first poll.
    pub fn immediate() -> Self {
        Self {
            poll_interval: Duration::ZERO,
            polls_until_complete: 0,
            ..Self::default()
        }
    }
}
