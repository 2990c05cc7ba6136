//! CQRS markers
//!
//! Every request type registered with the mediator is tagged as either a
//! [`Command`] (mutates state) or a [`Query`] (read-only).

/// Marker for write operations
pub trait Command: Send + 'static {}

/// Marker for read-only operations
pub trait Query: Send + 'static {}
