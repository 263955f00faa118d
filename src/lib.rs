#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Versioned Catalog
//!
//! > **Optimistic concurrency control for catalog resources, actor style.**
//!
//! This crate manages versioned domain resources (products, reviews) that
//! many clients read, create, conditionally update, and delete at the same
//! time without losing updates. Every mutation flows through one
//! compare-and-swap primitive: the caller presents the version it last
//! observed, and the write is applied only if that version is still
//! current.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Why OCC + Actor Model?
//!
//! Optimistic concurrency control detects conflicts at write time instead
//! of locking at read time. That only works if the version check and the
//! write are a single atomic step; a naive read-then-write reintroduces
//! the race it is meant to prevent. Here the atomicity comes from the
//! actor model: each store runs in its own Tokio task and processes
//! requests sequentially, so the check-and-write inside one message
//! handler can never interleave with another mutation. No locks are
//! needed, and no update is ever lost.
//!
//! ### Generics: The Power of `T`
//!
//! You'll see `StoreActor<T: StoreEntity>` everywhere. This means "I can
//! store *anything* versioned, as long as it behaves like a StoreEntity."
//! The store loop (id assignment, version stamping, conditional writes)
//! is written **once** and works for Products and Reviews alike.
//!
//! ### Contention without locks
//!
//! Appending a review entry is a read-modify-write over a shared document.
//! The [`review_store::ReviewAggregator`] handles concurrent appenders
//! with a bounded retry loop that re-reads the current state and
//! recomputes the append. Each store call stays atomic, only cheap local
//! work is ever repeated, and sustained contention surfaces as `Busy`
//! rather than spinning forever.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`store`])
//! The generic versioned store: [`store::StoreActor`],
//! [`store::StoreClient`], the [`store::StoreEntity`] trait, and the
//! version-comparison policy in [`store::occ`]. See [`store::mock`] for
//! testing clients without real actors.
//!
//! ### 2. The Resources ([`model`], [`product_store`], [`review_store`])
//! Plain data types plus their `StoreEntity` implementations, per-resource
//! error taxonomies, and the review append aggregator.
//!
//! ### 3. The Interface ([`clients`], [`endpoint`])
//! Typed client wrappers hide the raw message passing; the endpoints
//! validate input, translate entity tags, and map store outcomes onto
//! boundary results without reinterpretation.
//!
//! ### 4. The Collaborator ([`inventory`])
//! The external inventory manager the catalog consumes: a trait seam, an
//! in-memory implementation, and a pass-through endpoint.
//!
//! ### 5. The Orchestrator ([`runtime`])
//! [`runtime::CatalogSystem`] spins up the store actors, wires the
//! endpoints, and shuts everything down gracefully.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the tests with info logs
//! RUST_LOG=info cargo test
//! ```

pub mod clients;
pub mod endpoint;
pub mod inventory;
pub mod model;
pub mod product_store;
pub mod review_store;
pub mod runtime;
pub mod store;
