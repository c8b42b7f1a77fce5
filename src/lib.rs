//! # Gatehouse
//!
//! Gatehouse holds the edges of an account service that sit next to, but outside
//! of, third-party authentication:
//!
//! - [`server::middleware::ExceptionRedirect`] turns upstream HTTP failures raised while
//!   completing a third-party login into a redirect back to the login page, carrying a
//!   flash message for the learner.
//! - [`db::mixins`] has the model capabilities used by account retirement: removing rows
//!   by a single field value, and retiring whole model types without dropping their tables.

// =========================================================================
//                  Canonical lints for whole crate
// =========================================================================
// Official docs:
//   https://doc.rust-lang.org/nightly/clippy/lints.html
//
// Warnings only during development; CI denies.
#![warn(
    clippy::all,
    missing_docs,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![allow(
    clippy::blanket_clippy_restriction_lints,
    reason = "Restriction lints are opted into as a group and allowed individually below."
)]
#![warn(clippy::restriction)]
//
// =========================================================================
//   Individually blanket-allow single lints relevant to this whole crate
// =========================================================================
#![allow(clippy::implicit_return, reason = "This is idiomatic Rust")]
#![allow(
    clippy::multiple_crate_versions,
    reason = "sqlx and actix pull in overlapping transitive versions"
)]
#![allow(
    clippy::std_instead_of_alloc,
    reason = "We're not interested in becoming no-std compatible"
)]
#![allow(
    clippy::std_instead_of_core,
    reason = "Import items from std instead of core"
)]
#![allow(clippy::mod_module_files, reason = "mod.rs is the layout used for models")]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "No function here is hot enough to warrant inline hints"
)]
#![allow(
    clippy::exhaustive_structs,
    reason = "`#[non_exhaustive]` is for types consumed by other crates"
)]
#![allow(
    clippy::exhaustive_enums,
    reason = "`#[non_exhaustive]` is for types consumed by other crates"
)]
#![allow(
    clippy::question_mark_used,
    reason = "We rely on propagating errors with question mark extensively"
)]
#![allow(
    clippy::semicolon_outside_block,
    reason = "Opt in to have semicolon in the outside block across codebase"
)]
#![allow(
    clippy::single_call_fn,
    reason = "Long functions are broken into smaller ones, so this lint is not useful"
)]
#![allow(
    clippy::arbitrary_source_item_ordering,
    reason = "Items are ordered by reading flow, not alphabetically"
)]

pub mod db;
pub mod server;
pub mod utils;
