//! Integration tests for `DieselUserRepository` against embedded PostgreSQL.
//!
//! Set `SKIP_TEST_CLUSTER=1` to skip when the cluster cannot start.

use recipe_backend::domain::ports::{UserPersistenceError, UserRepository};
use recipe_backend::domain::{Email, HashedPassword, UserAccount, UserId};
use recipe_backend::outbound::persistence::DieselUserRepository;
use rstest::{fixture, rstest};

mod support;

use support::embedded_postgres::drop_table;
use support::{TestDatabase, test_database};

#[fixture]
fn account() -> UserAccount {
    UserAccount::register(
        Email::new("Cook@Example.com").expect("valid email"),
        "Diesel Cook",
        HashedPassword::from_stored("$argon2id$v=19$stub"),
    )
}

fn repository(db: &TestDatabase) -> DieselUserRepository {
    DieselUserRepository::new(db.pool.clone())
}

#[rstest]
fn insert_then_find_by_id_and_email(account: UserAccount) {
    let Some(db) = test_database() else { return };
    let repo = repository(&db);

    db.runtime
        .block_on(repo.insert(&account))
        .expect("insert succeeds");

    let by_id = db
        .runtime
        .block_on(repo.find_by_id(account.user().id()))
        .expect("lookup succeeds")
        .expect("account exists");
    assert_eq!(by_id, account);

    let by_email = db
        .runtime
        .block_on(repo.find_by_email(account.user().email()))
        .expect("lookup succeeds")
        .expect("account exists");
    assert_eq!(by_email.user().id(), account.user().id());
    assert_eq!(by_email.password_hash().as_str(), "$argon2id$v=19$stub");
}

#[rstest]
fn duplicate_email_is_reported(account: UserAccount) {
    let Some(db) = test_database() else { return };
    let repo = repository(&db);
    db.runtime
        .block_on(repo.insert(&account))
        .expect("first insert succeeds");

    let twin = UserAccount::register(
        account.user().email().clone(),
        "Twin",
        HashedPassword::from_stored("$argon2id$other"),
    );
    let err = db
        .runtime
        .block_on(repo.insert(&twin))
        .expect_err("duplicate email rejected");
    assert!(matches!(err, UserPersistenceError::DuplicateEmail { .. }));
}

#[rstest]
fn unknown_user_is_none() {
    let Some(db) = test_database() else { return };
    let repo = repository(&db);
    let missing = db
        .runtime
        .block_on(repo.find_by_id(&UserId::random()))
        .expect("lookup succeeds");
    assert!(missing.is_none());
}

#[rstest]
fn update_persists_name_and_password(mut account: UserAccount) {
    let Some(db) = test_database() else { return };
    let repo = repository(&db);
    db.runtime
        .block_on(repo.insert(&account))
        .expect("insert succeeds");

    account.set_name("Renamed");
    account.set_password_hash(HashedPassword::from_stored("$argon2id$rotated"));
    let updated = db
        .runtime
        .block_on(repo.update(&account))
        .expect("update succeeds");
    assert!(updated);

    let stored = db
        .runtime
        .block_on(repo.find_by_id(account.user().id()))
        .expect("lookup succeeds")
        .expect("account exists");
    assert_eq!(stored.user().name(), "Renamed");
    assert_eq!(stored.password_hash().as_str(), "$argon2id$rotated");
}

#[rstest]
fn update_of_missing_account_reports_false(account: UserAccount) {
    let Some(db) = test_database() else { return };
    let repo = repository(&db);
    let updated = db
        .runtime
        .block_on(repo.update(&account))
        .expect("update succeeds");
    assert!(!updated);
}

#[rstest]
fn missing_table_surfaces_query_error(account: UserAccount) {
    let Some(db) = test_database() else { return };
    drop_table(&db.url, "users").expect("drop users table");
    let repo = repository(&db);

    let err = db
        .runtime
        .block_on(repo.find_by_email(account.user().email()))
        .expect_err("query fails without the table");
    assert!(matches!(err, UserPersistenceError::Query { .. }));
}
