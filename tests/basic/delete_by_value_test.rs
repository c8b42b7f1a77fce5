use gatehouse::db::mixins::{DeleteByValue, TxDeleteByValue};
use gatehouse::db::models::account_recovery::AccountRecovery;
use gatehouse::db::models::pending_email_change::{self, PendingEmailChange};
use gatehouse::db::models::user_social_auth::{Manager as _, UserSocialAuth};
use gatehouse::db::{DatabaseTransaction, Tx};

use crate::common;

#[actix_web::test]
async fn test_delete_by_value_when_rows_match_expect_exactly_those_deleted() {
    let (_dir, db) = common::initialize_db().await;
    common::seed_links(
        &db,
        vec![
            common::link(1, "google-oauth2"),
            common::link(1, "github"),
            common::link(1, "facebook"),
            common::link(2, "github"),
        ],
    )
    .await;

    let actual = db
        .delete_by_value::<UserSocialAuth, _>(1_i64, "user_id")
        .await
        .unwrap();
    assert!(actual);
    assert!(db.find_all_by_user_id(1).await.unwrap().is_empty());
    assert_eq!(db.find_all_by_user_id(2).await.unwrap().len(), 1);
}

#[actix_web::test]
async fn test_delete_by_value_when_called_twice_expect_false_second_time() {
    let (_dir, db) = common::initialize_db().await;
    common::seed_recoveries(&db, vec![common::recovery(3, "learner@example.com")]).await;

    let first = db
        .delete_by_value::<AccountRecovery, _>("learner@example.com", "secondary_email")
        .await
        .unwrap();
    let second = db
        .delete_by_value::<AccountRecovery, _>("learner@example.com", "secondary_email")
        .await
        .unwrap();
    assert!(first);
    assert!(!second);
}

#[actix_web::test]
async fn test_delete_by_value_when_no_rows_match_expect_false() {
    let (_dir, db) = common::initialize_db().await;
    common::seed_links(&db, vec![common::link(4, "github")]).await;

    let actual = db
        .delete_by_value::<UserSocialAuth, _>(5_i64, "user_id")
        .await
        .unwrap();
    assert!(!actual);
    assert_eq!(db.find_all_by_user_id(4).await.unwrap().len(), 1);
}

#[actix_web::test]
async fn test_delete_by_value_when_value_differs_only_in_case_expect_false() {
    let (_dir, db) = common::initialize_db().await;
    common::seed_recoveries(&db, vec![common::recovery(6, "learner@example.com")]).await;

    let actual = db
        .delete_by_value::<AccountRecovery, _>("Learner@Example.com", "secondary_email")
        .await
        .unwrap();
    assert!(!actual);
}

#[actix_web::test]
async fn test_delete_by_value_when_unknown_field_expect_error() {
    let (_dir, db) = common::initialize_db().await;
    let actual = db
        .delete_by_value::<UserSocialAuth, _>("learner@example.com", "email")
        .await;
    assert!(actual.is_err());
}

#[actix_web::test]
async fn test_delete_by_value_when_value_equals_misspelled_field_expect_error_and_rows_kept() {
    let (_dir, db) = common::initialize_db().await;
    common::seed_recoveries(
        &db,
        vec![
            common::recovery(12, "first@example.com"),
            common::recovery(13, "second@example.com"),
        ],
    )
    .await;

    let actual = db
        .delete_by_value::<AccountRecovery, _>("secondary_emial", "secondary_emial")
        .await;
    assert!(actual.is_err());

    let remaining = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM account_recovery")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(remaining.0, 2);
}

#[actix_web::test]
async fn test_tx_delete_by_value_when_unknown_field_expect_error() {
    let (_dir, db) = common::initialize_db().await;
    common::seed_email_changes(&db, vec![common::email_change(14)]).await;

    let mut tx = DatabaseTransaction::begin(db.pool.clone()).await.unwrap();
    let actual = tx
        .delete_by_value::<PendingEmailChange, _>("new_emial", "new_emial")
        .await;
    assert!(actual.is_err());
    tx.rollback().await.unwrap();

    use pending_email_change::Manager;
    assert!(db.find_by_user_id(14).await.unwrap().is_some());
}

#[actix_web::test]
async fn test_tx_delete_by_value_when_rolled_back_expect_rows_kept() {
    let (_dir, db) = common::initialize_db().await;
    common::seed_email_changes(&db, vec![common::email_change(9)]).await;

    let mut tx = DatabaseTransaction::begin(db.pool.clone()).await.unwrap();
    let deleted = tx
        .delete_by_value::<PendingEmailChange, _>(9_i64, "user_id")
        .await
        .unwrap();
    assert!(deleted);
    tx.rollback().await.unwrap();

    use pending_email_change::Manager;
    let kept = db.find_by_user_id(9).await.unwrap();
    assert_eq!(kept, Some(common::email_change(9)));
}

#[actix_web::test]
async fn test_tx_delete_by_value_when_committed_expect_rows_gone() {
    let (_dir, db) = common::initialize_db().await;
    common::seed_email_changes(&db, vec![common::email_change(10), common::email_change(11)])
        .await;

    let mut tx = DatabaseTransaction::begin(db.pool.clone()).await.unwrap();
    let deleted = tx
        .delete_by_value::<PendingEmailChange, _>("new10@example.com", "new_email")
        .await
        .unwrap();
    tx.commit().await.unwrap();
    assert!(deleted);

    use pending_email_change::Manager;
    assert!(db.find_by_user_id(10).await.unwrap().is_none());
    assert!(db.find_by_user_id(11).await.unwrap().is_some());
}
