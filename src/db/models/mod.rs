//! This module contains all the sqlx structs for the database tables.

/// Size of batch for bulk inserts.
pub const BATCH_SIZE: usize = 1000;

/// sqlx structs for account_recovery table.
pub mod account_recovery;
/// sqlx structs for pending_email_change table.
pub mod pending_email_change;
/// Deprecated provider configuration. Table kept, model unusable.
pub mod provider_config_legacy;
/// sqlx structs for user_social_auth table.
pub mod user_social_auth;
