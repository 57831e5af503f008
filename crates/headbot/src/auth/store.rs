//! Token store holding the session's current token pair.

use std::sync::Arc;
use tokio::sync::RwLock;

use super::tokens::TokenPair;

/// Holds the current [`TokenPair`], or nothing before the first login.
///
/// The pair is swapped as a single `Arc`, so readers observe either a
/// complete pair or none. Two snapshots taken from the store can be compared
/// with [`Arc::ptr_eq`] to tell whether the pair was replaced in between.
#[derive(Debug, Default)]
pub struct TokenStore {
    current: RwLock<Option<Arc<TokenPair>>>,
}

impl TokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the current pair.
    pub async fn get(&self) -> Option<Arc<TokenPair>> {
        self.current.read().await.clone()
    }

    /// Replace the current pair, returning the stored snapshot.
    pub async fn set(&self, pair: TokenPair) -> Arc<TokenPair> {
        let pair = Arc::new(pair);
        *self.current.write().await = Some(Arc::clone(&pair));
        pair
    }

    /// Discard the current pair.
    pub async fn clear(&self) {
        self.current.write().await.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(access: &str, refresh: &str) -> TokenPair {
        TokenPair::new(access, refresh).unwrap()
    }

    #[tokio::test]
    async fn starts_empty() {
        let store = TokenStore::new();
        assert!(store.get().await.is_none());
    }

    #[tokio::test]
    async fn set_replaces_whole_pair() {
        let store = TokenStore::new();
        let first = store.set(pair("a1", "r1")).await;
        let second = store.set(pair("a2", "r2")).await;

        let current = store.get().await.unwrap();
        assert!(Arc::ptr_eq(&current, &second));
        assert!(!Arc::ptr_eq(&current, &first));
        assert_eq!(current.access().as_str(), "a2");
        assert_eq!(current.refresh().as_str(), "r2");
    }

    #[tokio::test]
    async fn clear_discards_pair() {
        let store = TokenStore::new();
        store.set(pair("a1", "r1")).await;
        store.clear().await;
        assert!(store.get().await.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_readers_never_see_mixed_pairs() {
        let store = Arc::new(TokenStore::new());
        store.set(pair("access-0", "refresh-0")).await;

        let writer = {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                for i in 1..200 {
                    store
                        .set(pair(&format!("access-{i}"), &format!("refresh-{i}")))
                        .await;
                }
            })
        };

        let mut readers = Vec::new();
        for _ in 0..4 {
            let store = Arc::clone(&store);
            readers.push(tokio::spawn(async move {
                for _ in 0..200 {
                    let current = store.get().await.unwrap();
                    let access = current.access().as_str().trim_start_matches("access-");
                    let refresh = current.refresh().as_str().trim_start_matches("refresh-");
                    assert_eq!(access, refresh);
                }
            }));
        }

        writer.await.unwrap();
        for reader in readers {
            reader.await.unwrap();
        }
    }
}
