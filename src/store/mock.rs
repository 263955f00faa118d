//! # Mock store
//!
//! Utilities for testing clients and endpoints in isolation.
//!
//! [`MockClient`] hands out a [`StoreClient`] whose requests are answered
//! from a queue of expectations instead of a real [`StoreActor`]. A test
//! double here is just another producer of [`StoreRequest`] responses; no
//! runtime patching is involved.

use crate::store::core::{
    CreateOutcome, DeleteOutcome, StoreClient, StoreEntity, StoreRequest, UpdateOutcome,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the canned response for it.
///
/// A `None` response makes the mock drop the responder instead of
/// answering, which the client observes as [`StoreError::Dropped`], the
/// storage-fault path.
///
/// [`StoreError::Dropped`]: crate::store::core::StoreError::Dropped
#[allow(dead_code)]
enum Expectation<T: StoreEntity> {
    Get {
        id: T::Id,
        response: Option<Option<T>>,
    },
    List {
        response: Option<Vec<T>>,
    },
    Find {
        response: Option<Option<T>>,
    },
    Create {
        response: Option<CreateOutcome<T>>,
    },
    ConditionalUpdate {
        id: T::Id,
        response: Option<UpdateOutcome<T>>,
    },
    Delete {
        id: T::Id,
        response: Option<DeleteOutcome>,
    },
}

/// A mock store client with expectation tracking.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<Product>::new();
/// mock.expect_get(1).returns(Some(product));
/// mock.expect_conditional_update(1).returns(UpdateOutcome::VersionConflict);
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<T: StoreEntity> {
    client: StoreClient<T>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: StoreEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Arc<Mutex<VecDeque<Expectation<T>>>> =
            Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Answer requests from the expectation queue.
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        StoreRequest::Get { id: _, respond_to },
                        Some(Expectation::Get { id: _, response }),
                    ) => {
                        if let Some(response) = response {
                            let _ = respond_to.send(response);
                        }
                    }
                    (
                        StoreRequest::List { respond_to },
                        Some(Expectation::List { response }),
                    ) => {
                        if let Some(response) = response {
                            let _ = respond_to.send(response);
                        }
                    }
                    (
                        StoreRequest::Find { matches: _, respond_to },
                        Some(Expectation::Find { response }),
                    ) => {
                        if let Some(response) = response {
                            let _ = respond_to.send(response);
                        }
                    }
                    (
                        StoreRequest::Create { params: _, respond_to },
                        Some(Expectation::Create { response }),
                    ) => {
                        if let Some(response) = response {
                            let _ = respond_to.send(response);
                        }
                    }
                    (
                        StoreRequest::ConditionalUpdate { respond_to, .. },
                        Some(Expectation::ConditionalUpdate { id: _, response }),
                    ) => {
                        if let Some(response) = response {
                            let _ = respond_to.send(response);
                        }
                    }
                    (
                        StoreRequest::Delete { id: _, respond_to },
                        Some(Expectation::Delete { id: _, response }),
                    ) => {
                        if let Some(response) = response {
                            let _ = respond_to.send(response);
                        }
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    /// Expects a `get` request for the given id.
    pub fn expect_get(&mut self, id: T::Id) -> ResponseBuilder<T, Option<T>> {
        self.push_builder(move |response| Expectation::Get { id, response })
    }

    /// Expects a `list` request.
    pub fn expect_list(&mut self) -> ResponseBuilder<T, Vec<T>> {
        self.push_builder(|response| Expectation::List { response })
    }

    /// Expects a `find_one` request.
    pub fn expect_find(&mut self) -> ResponseBuilder<T, Option<T>> {
        self.push_builder(|response| Expectation::Find { response })
    }

    /// Expects a `create` request.
    pub fn expect_create(&mut self) -> ResponseBuilder<T, CreateOutcome<T>> {
        self.push_builder(|response| Expectation::Create { response })
    }

    /// Expects a `conditional_update` request for the given id.
    pub fn expect_conditional_update(
        &mut self,
        id: T::Id,
    ) -> ResponseBuilder<T, UpdateOutcome<T>> {
        self.push_builder(move |response| Expectation::ConditionalUpdate { id, response })
    }

    /// Expects a `delete` request for the given id.
    pub fn expect_delete(&mut self, id: T::Id) -> ResponseBuilder<T, DeleteOutcome> {
        self.push_builder(move |response| Expectation::Delete { id, response })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    fn push_builder<R>(
        &mut self,
        build: impl FnOnce(Option<R>) -> Expectation<T> + Send + 'static,
    ) -> ResponseBuilder<T, R> {
        ResponseBuilder {
            build: Box::new(build),
            expectations: self.expectations.clone(),
        }
    }
}

impl<T: StoreEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder that attaches the canned response to a queued expectation.
pub struct ResponseBuilder<T: StoreEntity, R> {
    build: Box<dyn FnOnce(Option<R>) -> Expectation<T> + Send>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: StoreEntity, R> ResponseBuilder<T, R> {
    /// Answer the request with the given payload.
    pub fn returns(self, response: R) {
        let expectation = (self.build)(Some(response));
        self.expectations.lock().unwrap().push_back(expectation);
    }

    /// Drop the responder instead of answering, so the caller observes a
    /// storage fault.
    pub fn drops_response(self) {
        let expectation = (self.build)(None);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}
