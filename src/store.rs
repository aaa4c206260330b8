//! Notification count storage seam

use crate::UserId;
use async_trait::async_trait;

/// Read seam over the backend notification log.
///
/// The only contract this component needs from the backend: how many
/// notification records a user has with a creation time at or after a
/// given instant. Injected at construction instead of imported globally
/// so tests can swap in an in-memory store.
#[async_trait]
pub trait NotificationCountStore: Send + Sync + 'static {
    /// Count notification records for `user` created at or after `since_millis`
    async fn count_since(&self, user: &UserId, since_millis: u64)
        -> Result<u64, CountStoreError>;
}

/// Errors from the count store
#[derive(Debug, thiserror::Error)]
pub enum CountStoreError {
    /// Query failed inside the store
    #[error("Storage error: {0}")]
    Storage(Box<str>),
    /// Store could not be reached
    #[error("Backend unreachable: {0}")]
    Unreachable(Box<str>),
}

/// In-memory count store for testing
pub struct InMemoryCountStore {
    data: std::sync::RwLock<std::collections::HashMap<Box<str>, Vec<u64>>>,
}

impl InMemoryCountStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            data: std::sync::RwLock::new(std::collections::HashMap::new()),
        }
    }

    /// Record a delivery timestamp for a user
    pub fn record(&self, user: &UserId, at_millis: u64) -> Result<(), CountStoreError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CountStoreError::Storage(e.to_string().into()))?;
        data.entry(user.as_str().into()).or_default().push(at_millis);
        Ok(())
    }
}

#[async_trait]
impl NotificationCountStore for InMemoryCountStore {
    async fn count_since(
        &self,
        user: &UserId,
        since_millis: u64,
    ) -> Result<u64, CountStoreError> {
        let data = self
            .data
            .read()
            .map_err(|e| CountStoreError::Storage(e.to_string().into()))?;
        Ok(data
            .get(user.as_str())
            .map(|times| times.iter().filter(|&&at| at >= since_millis).count() as u64)
            .unwrap_or(0))
    }
}

impl Default for InMemoryCountStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_count_since_boundary() {
        let store = InMemoryCountStore::new();
        let user = UserId::from("user-1");

        store.record(&user, 999).unwrap();
        store.record(&user, 1_000).unwrap();
        store.record(&user, 1_001).unwrap();

        // "at or after" the boundary
        assert_eq!(store.count_since(&user, 1_000).await.unwrap(), 2);
        assert_eq!(store.count_since(&user, 0).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_unknown_user_counts_zero() {
        let store = InMemoryCountStore::new();
        let count = store
            .count_since(&UserId::from("nobody"), 0)
            .await
            .unwrap();

        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_records_are_per_user() {
        let store = InMemoryCountStore::new();
        store.record(&UserId::from("a"), 100).unwrap();
        store.record(&UserId::from("b"), 100).unwrap();

        assert_eq!(store.count_since(&UserId::from("a"), 0).await.unwrap(), 1);
    }
}
