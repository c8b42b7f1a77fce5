use gatehouse::db::mixins::{Deprecated, DeprecatedManager, ModelError};
use gatehouse::db::models::provider_config_legacy::ProviderConfigLegacy;
use gatehouse::db::DatabaseConnection;

use crate::common;

async fn insert_legacy_config(db: &DatabaseConnection, backend_name: &str) {
    sqlx::query("INSERT INTO provider_config_legacy ( backend_name, enabled ) VALUES ( $1, $2 )")
        .bind(backend_name)
        .bind(1_i64)
        .execute(&db.pool)
        .await
        .unwrap();
}

#[test]
fn test_construct_deprecated_model_expect_fixed_error() {
    let expected = ModelError::Deprecated {
        model: "provider_config_legacy",
    };
    assert_eq!(ProviderConfigLegacy::construct(()).unwrap_err(), expected);
    assert_eq!(
        ProviderConfigLegacy::construct(("google-oauth2", true)).unwrap_err(),
        expected
    );
    assert_eq!(
        ProviderConfigLegacy::construct(vec![1_i64, 2, 3]).unwrap_err(),
        expected
    );
}

#[test]
fn test_construct_deprecated_model_expect_exact_message() {
    let actual = ProviderConfigLegacy::construct(()).unwrap_err().to_string();
    assert_eq!(actual, "This model has been deprecated and should not be used.");
}

#[actix_web::test]
async fn test_deprecated_model_table_expect_rows_readable_by_raw_query() {
    let (_dir, db) = common::initialize_db().await;
    insert_legacy_config(&db, "google-oauth2").await;
    insert_legacy_config(&db, "github").await;

    let actual = db.count_rows::<ProviderConfigLegacy>().await.unwrap();
    assert_eq!(actual, 2);

    let backends = sqlx::query_as::<_, (String,)>(
        "SELECT backend_name FROM provider_config_legacy ORDER BY id",
    )
    .fetch_all(&db.pool)
    .await
    .unwrap();
    assert_eq!(backends[0].0, "google-oauth2");
    assert_eq!(backends[1].0, "github");
}

#[actix_web::test]
async fn test_deprecated_model_from_row_expect_decode_error() {
    let (_dir, db) = common::initialize_db().await;
    insert_legacy_config(&db, "google-oauth2").await;

    let actual = sqlx::query_as::<_, ProviderConfigLegacy>("SELECT * FROM provider_config_legacy")
        .fetch_all(&db.pool)
        .await
        .unwrap_err();
    assert!(matches!(actual, sqlx::Error::Decode(_)));
    assert!(actual
        .to_string()
        .contains("This model has been deprecated and should not be used."));
}
