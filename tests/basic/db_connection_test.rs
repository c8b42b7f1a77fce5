use gatehouse::db::init::{connect, SQLITE_FILE_NAME};
use gatehouse::db::{DatabaseConnection, DatabaseKind, Db};
use std::path::Path;
use tempfile::{tempdir, tempdir_in};

#[actix_web::test]
async fn test_get_db_connection_when_no_env_var_expect_sqlite_connection() {
    let dir = tempdir().unwrap();
    let actual = connect(dir.path()).await.unwrap();
    assert_eq!(actual.kind, DatabaseKind::Sqlite);
    assert!(dir.path().join(SQLITE_FILE_NAME).exists());
}

#[actix_web::test]
async fn test_get_db_connection_when_relative_data_dir_expect_sqlite_connection() {
    let dir = tempdir_in(".").unwrap();
    let relative = Path::new(".").join(dir.path().file_name().unwrap());
    let actual = connect(&relative).await.unwrap();
    assert_eq!(actual.kind, DatabaseKind::Sqlite);
    assert!(relative.join(SQLITE_FILE_NAME).exists());
}

#[actix_web::test]
async fn test_get_db_connection_when_no_data_dir_expect_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does_not_exist");
    let actual = connect(&missing).await.unwrap_err();
    let expected = "is not accessible";
    assert!(
        actual.to_string().contains(expected),
        "\"{actual}\" doesn't contain {expected}"
    );
}

#[actix_web::test]
async fn test_connect_when_unsupported_url_expect_error() {
    let actual = DatabaseConnection::connect("mysql://localhost/accounts")
        .await
        .unwrap_err();
    let expected = "Unsupported database URL";
    assert!(
        actual.to_string().contains(expected),
        "\"{actual}\" doesn't contain {expected}"
    );
}
