//! Core module containing the domain model, error types and persistence contracts

pub mod error;
pub mod model;
pub mod query;
pub mod service;
pub mod validation;

pub use error::{EntityKind, FieldError, OrderError};
pub use model::{Item, ItemScope, LineItem, NewOrder, Order, OrderStatus, StatusFilter};
pub use query::{ListingQuery, PaginationMeta};
pub use service::{CatalogRepository, OrderRepository};
