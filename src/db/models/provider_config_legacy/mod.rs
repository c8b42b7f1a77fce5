use std::convert::Infallible;

use sqlx::{FromRow, Row};

use crate::db::mixins::{decode_error, Deprecated};

/// Provider configuration from before per-backend config tables.
///
/// Uninhabited: [`Deprecated::construct`] and `FromRow` both refuse to build one, so the
/// rows in `provider_config_legacy` are only reachable through raw queries.
#[derive(Debug)]
pub struct ProviderConfigLegacy {
    /// Never constructed.
    _unusable: Infallible,
}

impl Deprecated for ProviderConfigLegacy {
    const TABLE: &'static str = "provider_config_legacy";
}

impl<'r, R: Row> FromRow<'r, R> for ProviderConfigLegacy {
    fn from_row(_row: &'r R) -> Result<Self, sqlx::Error> {
        Err(decode_error::<Self>())
    }
}
