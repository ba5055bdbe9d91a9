//! Tests for the account service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::MockUserRepository;
use crate::domain::{AccountFlags, Email, ErrorCode};
use rstest::rstest;

fn make_service(repo: MockUserRepository) -> UserAccountService<MockUserRepository> {
    UserAccountService::new(Arc::new(repo))
}

fn email(raw: &str) -> Email {
    Email::new(raw).expect("valid email")
}

fn stored_account(password: &str, flags: AccountFlags) -> UserAccount {
    let hash = HashedPassword::hash(&Password::new(password).expect("valid password"))
        .expect("hashing succeeds");
    UserAccount::from_parts(
        UserId::random(),
        email("cook@example.com"),
        "Cook".to_owned(),
        flags,
        hash,
    )
}

#[tokio::test]
async fn register_hashes_password_and_keeps_local_case() {
    let mut repo = MockUserRepository::new();
    repo.expect_insert()
        .times(1)
        .withf(|account| {
            account.user().email().as_ref() == "Test2@example.com"
                && account
                    .password_hash()
                    .verify(&Password::presented("testpass123"))
                && account.password_hash().as_str() != "testpass123"
        })
        .return_once(|_| Ok(()));

    let service = make_service(repo);
    let user = service
        .register(RegisterUserRequest {
            email: email("Test2@Example.com"),
            password: Password::new("testpass123").expect("valid password"),
            name: "Test".to_owned(),
        })
        .await
        .expect("registration succeeds");

    assert_eq!(user.email().as_ref(), "Test2@example.com");
    assert!(user.is_active());
    assert!(!user.is_staff());
}

#[tokio::test]
async fn register_reports_duplicate_email() {
    let mut repo = MockUserRepository::new();
    repo.expect_insert()
        .times(1)
        .return_once(|_| Err(UserPersistenceError::duplicate_email("cook@example.com")));

    let service = make_service(repo);
    let err = service
        .register(RegisterUserRequest {
            email: email("cook@example.com"),
            password: Password::new("testpass123").expect("valid password"),
            name: String::new(),
        })
        .await
        .expect_err("duplicate email rejected");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.details().and_then(|d| d.get("code")),
        Some(&serde_json::json!("email_taken"))
    );
}

#[rstest]
#[case(true, "testpass123", Ok(()))]
#[case(true, "wrongpass", Err(ErrorCode::Unauthorized))]
#[case(false, "testpass123", Err(ErrorCode::Forbidden))]
#[tokio::test]
async fn authenticate_checks_password_and_activity(
    #[case] is_active: bool,
    #[case] presented: &str,
    #[case] expected: Result<(), ErrorCode>,
) {
    let account = stored_account(
        "testpass123",
        AccountFlags {
            is_active,
            is_staff: false,
        },
    );
    let expected_id = account.user().id().clone();
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(move |_| Ok(Some(account)));

    let service = make_service(repo);
    let creds =
        LoginCredentials::try_from_parts("cook@EXAMPLE.com", presented).expect("valid creds");
    let result = service.authenticate(&creds).await;

    match expected {
        Ok(()) => assert_eq!(result.expect("login succeeds"), expected_id),
        Err(code) => assert_eq!(result.expect_err("login fails").code(), code),
    }
}

#[tokio::test]
async fn authenticate_rejects_unknown_email() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(None));

    let service = make_service(repo);
    let creds = LoginCredentials::try_from_parts("ghost@example.com", "whatever")
        .expect("valid creds");
    let err = service.authenticate(&creds).await.expect_err("unknown user");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn profile_maps_repository_errors(
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Err(failure));

    let service = make_service(repo);
    let err = service
        .profile(&UserId::random())
        .await
        .expect_err("repository failure surfaces");
    assert_eq!(err.code(), expected);
}

#[tokio::test]
async fn update_profile_changes_name_and_password() {
    let account = stored_account("oldpass1", AccountFlags::default());
    let user_id = account.user().id().clone();
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(account)));
    repo.expect_update()
        .times(1)
        .withf(|account| {
            account.user().name() == "Chef"
                && account
                    .password_hash()
                    .verify(&Password::presented("newpass1"))
        })
        .return_once(|_| Ok(true));

    let service = make_service(repo);
    let user = service
        .update_profile(
            &user_id,
            UpdateProfileRequest {
                name: Some("Chef".to_owned()),
                password: Some(Password::new("newpass1").expect("valid password")),
            },
        )
        .await
        .expect("update succeeds");

    assert_eq!(user.name(), "Chef");
    assert_eq!(user.email().as_ref(), "cook@example.com");
}

#[tokio::test]
async fn profile_of_vanished_user_is_unauthorized() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let service = make_service(repo);
    let err = service
        .profile(&UserId::random())
        .await
        .expect_err("missing account");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}
