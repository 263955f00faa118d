use crate::store::core::{DeleteOutcome, Mutator, StoreClient, StoreEntity, StoreError, UpdateOutcome};
use crate::store::occ::Version;
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the standard store
/// operations.
///
/// This trait reduces boilerplate by providing default implementations for
/// the operations whose shape is identical across resources: `get`,
/// `delete`, and the conditional update. Each implementor only supplies its
/// inner generic client and its error type; the error type absorbs
/// transport faults through `From<StoreError>`.
#[async_trait]
pub trait EntityClient<T: StoreEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<StoreError> + Send + Sync;

    /// Access the inner generic StoreClient.
    fn inner(&self) -> &StoreClient<T>;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::Error::from)
    }

    /// Delete an entity by ID. Unconditional once the entity exists.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<DeleteOutcome, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::Error::from)
    }

    /// Attempt a compare-and-swap update at the caller's expected version.
    #[tracing::instrument(skip(self, mutate))]
    async fn conditional_update(
        &self,
        id: T::Id,
        expected: Version,
        mutate: Mutator<T>,
    ) -> Result<UpdateOutcome<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner()
            .conditional_update(id, expected, mutate)
            .await
            .map_err(Self::Error::from)
    }
}
