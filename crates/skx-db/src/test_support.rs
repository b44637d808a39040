//! Shared test utilities for skx-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use skx_core::entities::Connection;
    use skx_core::repository::NewConnection;

    use crate::store::SkxStore;

    /// Create an in-memory, migrated store.
    pub async fn test_store() -> SkxStore {
        SkxStore::open_local(":memory:").await.unwrap()
    }

    /// Create two users and return their IDs.
    pub async fn two_users(store: &SkxStore) -> (String, String) {
        let a = store.create_user("Ada", None).await.unwrap();
        let b = store.create_user("Bo", None).await.unwrap();
        (a.id, b.id)
    }

    /// Create two users and a pending connection from the first to the second.
    pub async fn pending_connection(store: &SkxStore) -> Connection {
        let (a, b) = two_users(store).await;
        store
            .create_connection(&NewConnection {
                from_user_id: &a,
                to_user_id: &b,
                event_id: None,
                message: "hello",
            })
            .await
            .unwrap()
    }
}
