// Routing engine - validation, storage and the dispatch seam

//! # Engine Module
//!
//! The layer between the domain models and the outside world:
//!
//! - `storage`: the [`DocumentStorage`](storage::DocumentStorage) trait and
//!   its in-memory implementation
//! - `routing`: the [`RoutingEngine`](routing::RoutingEngine) - the only
//!   writer of document status and handler
//! - `views`: role-scoped inbox projections (pure reads)
//! - `dispatch`: the [`Notifier`](dispatch::Notifier) collaborator seam for
//!   outbound decision notifications

pub mod dispatch;
pub mod routing;
pub mod storage;
pub mod views;

pub use dispatch::{LoggingNotifier, Notifier};
pub use routing::{RegisterDocument, RoutingEngine};
pub use storage::{DocumentStorage, InMemoryStorage};
pub use views::actionable_statuses;
