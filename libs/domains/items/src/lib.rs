//! Items Domain
//!
//! Create/read/update/delete lifecycle for a single resource type, backed by
//! a process-lifetime in-memory store.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (boundary)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Orchestration, validation, conflict detection
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌──────────┐
//! │ Repository  │     │  Mapper  │  ← Entity ↔ view projection
//! └──────┬──────┘     └──────────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entity, view, enums
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_items::{handlers, InMemoryItemRepository, ItemService};
//!
//! let repository = InMemoryItemRepository::new();
//! let service = ItemService::new(repository);
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod mapper;
pub mod models;
pub mod repository;
pub mod service;

/// OpenAPI tag shared by all item endpoints.
pub const ITEMS_TAG: &str = "items";

/// Mount point of the item router below the API prefix.
pub const ITEMS_URL: &str = "/items";

pub use error::{ItemError, ItemResult};
pub use handlers::ApiDoc;
pub use models::{Item, ItemSize, ItemView};
pub use repository::{InMemoryItemRepository, ItemRepository};
pub use service::ItemService;
