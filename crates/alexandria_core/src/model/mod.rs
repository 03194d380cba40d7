//! Domain model for cataloguing articles inside a library.
//!
//! # Responsibility
//! - Define the `Article` leaf entity and the `Library` aggregate.
//! - Keep construction-time validation and date handling in one place.
//!
//! # Invariants
//! - Articles compare by value over `(title, tag, date, text)`.
//! - A library owns its articles; articles never point back to a library.
//! - Title uniqueness is NOT enforced; name lookups resolve to the first match.

pub mod article;
pub mod library;
