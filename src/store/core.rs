//! # Core versioned store
//!
//! This module defines the generic building blocks for versioned resource
//! storage.
//!
//! ## Key Types
//!
//! - [`StoreEntity`]: The trait that all stored resource types must implement.
//! - [`StoreActor`]: The generic actor that owns the entities.
//! - [`StoreClient`]: The generic client for talking to a store actor.
//! - [`StoreError`]: Transport faults between client and store task.
//!
//! ## Concurrency Model
//!
//! Each `StoreActor` runs in its own Tokio task and processes requests
//! *sequentially*. That sequencing is what makes the conditional update a
//! single atomic step: the version check and the write happen inside one
//! message handler with no await point between them, so no other mutation
//! on the same store can interleave. Callers get optimistic concurrency
//! control without any lock of their own.

use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use super::occ::{self, Version, VersionCheck};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any resource entity must implement to be managed by a
/// [`StoreActor`].
///
/// # Architecture Note
/// By defining a contract that all our versioned resource types (Product,
/// Review) must satisfy, we write the store loop *once* and reuse it for
/// every resource. Associated types keep the operations type-safe: you
/// cannot send a product payload to the review store, the compiler rejects
/// it outright.
///
/// The store owns version stamping. Entities expose their version through
/// [`StoreEntity::version`] / [`StoreEntity::set_version`] and never
/// advance it themselves; the actor stamps 1 on create and the authorized
/// successor on each applied update.
pub trait StoreEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity (e.g., String, u32).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance (DTO).
    type CreateParams: Send + Debug;

    /// Construct the full entity from the store-assigned id and payload.
    /// The store stamps the version immediately afterwards.
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Self;

    /// The entity's current revision.
    fn version(&self) -> Version;

    /// Replace the entity's revision. Called only by the store actor.
    fn set_version(&mut self, version: Version);

    /// Uniqueness probe evaluated against every stored entity at create
    /// time. Returning `true` rejects the candidate as a duplicate before
    /// anything is written. The default accepts everything.
    fn conflicts_with(&self, _existing: &Self) -> bool {
        false
    }
}

// =============================================================================
// 2. OUTCOMES, ERRORS, AND MESSAGES
// =============================================================================

/// Result of a create request.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome<T> {
    /// The entity was stored with version 1; this is the stored form.
    Created(T),
    /// The candidate's uniqueness probe matched an existing entity.
    /// Nothing was written.
    Duplicate,
}

/// Result of a conditional update request.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome<T> {
    /// The expected version matched; the mutated state was stored with the
    /// successor version.
    Applied(T),
    /// The stored version differs from the expected one. The current state
    /// is deliberately not returned on this path, so a failed update can
    /// never double as a read.
    VersionConflict,
    /// No entity is stored under the id.
    NotFound,
}

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Transport faults between a client and its store task.
///
/// Kept apart from the operation outcomes so a fault can never be mistaken
/// for absence or a version conflict.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("store task closed")]
    Closed,
    #[error("store task dropped the response channel")]
    Dropped,
}

/// Type alias for the one-shot response channel used by the store.
pub type Response<T> = oneshot::Sender<T>;

/// In-place mutation applied to an entity when its version check passes.
pub type Mutator<T> = Box<dyn FnOnce(&mut T) + Send>;

/// Predicate used for secondary lookups.
pub type Predicate<T> = Box<dyn Fn(&T) -> bool + Send>;

/// Internal message type sent to the store actor.
///
/// The variants map to the conditional-update contract the rest of the
/// system is built on: reads (`Get`, `List`, `Find`) never mutate, `Create`
/// stamps version 1, `ConditionalUpdate` is the single compare-and-swap
/// primitive, and `Delete` is unconditional once the entity exists.
pub enum StoreRequest<T: StoreEntity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<CreateOutcome<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Find {
        matches: Predicate<T>,
        respond_to: Response<Option<T>>,
    },
    ConditionalUpdate {
        id: T::Id,
        expected: Version,
        mutate: Mutator<T>,
        respond_to: Response<UpdateOutcome<T>>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<DeleteOutcome>,
    },
}

// =============================================================================
// 3. THE GENERIC STORE ACTOR
// =============================================================================

/// The generic actor that owns a collection of versioned entities.
///
/// # Architecture Note
/// This struct is the "server" half of the store. It owns the state
/// (`entities`) and the receiver end of the channel. Exclusive ownership of
/// the map inside one task is what the linearizability guarantee rests on:
/// accepted mutations for an id form a total order consistent with version
/// numbers 1, 2, 3, … and no update is ever lost.
pub struct StoreActor<T: StoreEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    entities: HashMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: StoreEntity> StoreActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            entities: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = StoreClient::new(sender);
        (actor, client)
    }

    /// Runs the store's event loop, processing requests until the channel
    /// closes.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "Product" instead of
        // "versioned_catalog::model::product::Product")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = (self.next_id_fn)();

                    let mut item = T::from_create_params(id.clone(), params);
                    item.set_version(Version::initial());

                    if self.entities.values().any(|existing| item.conflicts_with(existing)) {
                        warn!(entity_type, %id, "Create rejected, duplicate of a stored entity");
                        let _ = respond_to.send(CreateOutcome::Duplicate);
                        continue;
                    }

                    let previous = self.entities.insert(id.clone(), item.clone());
                    debug_assert!(previous.is_none(), "id generator produced a duplicate id");
                    info!(entity_type, %id, size = self.entities.len(), "Created");
                    let _ = respond_to.send(CreateOutcome::Created(item));
                }
                StoreRequest::Get { id, respond_to } => {
                    let item = self.entities.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(item);
                }
                StoreRequest::List { respond_to } => {
                    debug!(entity_type, size = self.entities.len(), "List");
                    let _ = respond_to.send(self.entities.values().cloned().collect());
                }
                StoreRequest::Find { matches, respond_to } => {
                    let item = self.entities.values().find(|item| matches(item)).cloned();
                    debug!(entity_type, found = item.is_some(), "Find");
                    let _ = respond_to.send(item);
                }
                StoreRequest::ConditionalUpdate {
                    id,
                    expected,
                    mutate,
                    respond_to,
                } => {
                    debug!(entity_type, %id, %expected, "ConditionalUpdate");
                    let current = self.entities.get(&id).map(T::version);
                    match occ::classify(expected, current) {
                        VersionCheck::Absent => {
                            warn!(entity_type, %id, "Not found");
                            let _ = respond_to.send(UpdateOutcome::NotFound);
                        }
                        VersionCheck::Mismatch => {
                            warn!(entity_type, %id, %expected, "Version conflict");
                            let _ = respond_to.send(UpdateOutcome::VersionConflict);
                        }
                        VersionCheck::Match => {
                            // The map has not been touched since the check,
                            // so the entry is still there.
                            if let Some(item) = self.entities.get_mut(&id) {
                                mutate(item);
                                item.set_version(expected.next());
                                info!(entity_type, %id, version = %item.version(), "Updated");
                                let _ = respond_to.send(UpdateOutcome::Applied(item.clone()));
                            }
                        }
                    }
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if self.entities.remove(&id).is_some() {
                        info!(entity_type, %id, size = self.entities.len(), "Deleted");
                        let _ = respond_to.send(DeleteOutcome::Deleted);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(DeleteOutcome::NotFound);
                    }
                }
            }
        }

        info!(entity_type, size = self.entities.len(), "Shutdown");
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe client for interacting with a [`StoreActor`].
///
/// Channel failures surface as [`StoreError`]; every domain outcome travels
/// inside the response payload instead.
#[derive(Clone)]
pub struct StoreClient<T: StoreEntity> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: StoreEntity> StoreClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<CreateOutcome<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Create { params, respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Get { id, respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)
    }

    pub async fn list(&self) -> Result<Vec<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::List { respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)
    }

    pub async fn find_one(
        &self,
        matches: impl Fn(&T) -> bool + Send + 'static,
    ) -> Result<Option<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Find {
                matches: Box::new(matches),
                respond_to,
            })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)
    }

    pub async fn conditional_update(
        &self,
        id: T::Id,
        expected: Version,
        mutate: impl FnOnce(&mut T) + Send + 'static,
    ) -> Result<UpdateOutcome<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::ConditionalUpdate {
                id,
                expected,
                mutate: Box::new(mutate),
                respond_to,
            })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)
    }

    pub async fn delete(&self, id: T::Id) -> Result<DeleteOutcome, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Delete { id, respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: String,
        topic: String,
        body: String,
        version: Version,
    }

    #[derive(Debug)]
    struct NoteCreate {
        topic: String,
        body: String,
    }

    impl StoreEntity for Note {
        type Id = String;
        type CreateParams = NoteCreate;

        fn from_create_params(id: String, params: NoteCreate) -> Self {
            Self {
                id,
                topic: params.topic,
                body: params.body,
                version: Version::initial(),
            }
        }

        fn version(&self) -> Version {
            self.version
        }

        fn set_version(&mut self, version: Version) {
            self.version = version;
        }

        // One note per topic.
        fn conflicts_with(&self, existing: &Self) -> bool {
            self.topic == existing.topic
        }
    }

    fn spawn_store() -> StoreClient<Note> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || {
            let id = counter.fetch_add(1, Ordering::SeqCst);
            format!("note_{}", id)
        };
        let (actor, client) = StoreActor::new(10, next_id);
        tokio::spawn(actor.run());
        client
    }

    fn params(topic: &str, body: &str) -> NoteCreate {
        NoteCreate {
            topic: topic.into(),
            body: body.into(),
        }
    }

    async fn create_note(client: &StoreClient<Note>, topic: &str, body: &str) -> Note {
        match client.create(params(topic, body)).await.unwrap() {
            CreateOutcome::Created(note) => note,
            CreateOutcome::Duplicate => panic!("unexpected duplicate"),
        }
    }

    #[tokio::test]
    async fn create_stamps_version_one() {
        let client = spawn_store();
        let note = create_note(&client, "rust", "first").await;
        assert_eq!(note.version, Version::initial());
        assert_eq!(note.id, "note_1");
    }

    #[tokio::test]
    async fn conditional_update_applies_at_matching_version() {
        let client = spawn_store();
        let note = create_note(&client, "rust", "first").await;

        let outcome = client
            .conditional_update(note.id.clone(), note.version, |n| n.body = "second".into())
            .await
            .unwrap();

        match outcome {
            UpdateOutcome::Applied(updated) => {
                assert_eq!(updated.body, "second");
                assert_eq!(updated.version, note.version.next());
                assert_eq!(updated.topic, "rust");
            }
            other => panic!("expected Applied, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn stale_update_conflicts_and_leaves_state_untouched() {
        let client = spawn_store();
        let note = create_note(&client, "rust", "first").await;

        // Advance to version 2.
        client
            .conditional_update(note.id.clone(), note.version, |n| n.body = "second".into())
            .await
            .unwrap();

        // Replay the original version.
        let outcome = client
            .conditional_update(note.id.clone(), note.version, |n| n.body = "third".into())
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::VersionConflict);

        let stored = client.get(note.id.clone()).await.unwrap().unwrap();
        assert_eq!(stored.body, "second");
        assert_eq!(stored.version, note.version.next());
    }

    #[tokio::test]
    async fn update_of_unknown_id_reports_not_found() {
        let client = spawn_store();
        let outcome = client
            .conditional_update("note_99".to_string(), Version::initial(), |n| {
                n.body = "ghost".into()
            })
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::NotFound);
    }

    #[tokio::test]
    async fn delete_then_get_reports_absence() {
        let client = spawn_store();
        let note = create_note(&client, "rust", "first").await;

        assert_eq!(client.delete(note.id.clone()).await.unwrap(), DeleteOutcome::Deleted);
        assert_eq!(client.delete(note.id.clone()).await.unwrap(), DeleteOutcome::NotFound);
        assert!(client.get(note.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_rejects_duplicates_by_probe() {
        let client = spawn_store();
        create_note(&client, "rust", "first").await;

        let outcome = client.create(params("rust", "second")).await.unwrap();
        assert_eq!(outcome, CreateOutcome::Duplicate);

        // A different topic is fine.
        let other = client.create(params("tokio", "first")).await.unwrap();
        assert!(matches!(other, CreateOutcome::Created(_)));
    }

    #[tokio::test]
    async fn find_one_matches_a_stored_entity() {
        let client = spawn_store();
        create_note(&client, "rust", "first").await;
        create_note(&client, "tokio", "second").await;

        let found = client
            .find_one(|n: &Note| n.topic == "tokio")
            .await
            .unwrap();
        assert_eq!(found.map(|n| n.body), Some("second".to_string()));

        let missing = client.find_one(|n: &Note| n.topic == "serde").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn racing_updates_at_the_same_version_admit_one_winner() {
        let client = spawn_store();
        let note = create_note(&client, "rust", "first").await;

        let a = {
            let client = client.clone();
            let id = note.id.clone();
            let version = note.version;
            tokio::spawn(async move {
                client
                    .conditional_update(id, version, |n| n.body = "from a".into())
                    .await
                    .unwrap()
            })
        };
        let b = {
            let client = client.clone();
            let id = note.id.clone();
            let version = note.version;
            tokio::spawn(async move {
                client
                    .conditional_update(id, version, |n| n.body = "from b".into())
                    .await
                    .unwrap()
            })
        };

        let outcomes = [a.await.unwrap(), b.await.unwrap()];
        let applied = outcomes
            .iter()
            .filter(|o| matches!(o, UpdateOutcome::Applied(_)))
            .count();
        let conflicts = outcomes
            .iter()
            .filter(|o| matches!(o, UpdateOutcome::VersionConflict))
            .count();
        assert_eq!((applied, conflicts), (1, 1));

        let stored = client.get(note.id).await.unwrap().unwrap();
        assert_eq!(stored.version, note.version.next());
    }
}
