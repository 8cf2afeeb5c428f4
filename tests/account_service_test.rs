//! Account service unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;
use mockall::predicate::eq;
use uuid::Uuid;

use placebook::domain::{Address, AddressInput, NewAddress, Password, User};
use placebook::errors::{AppError, AppResult, ErrorKind};
use placebook::infra::{AddressRepository, UnitOfWork, UserRepository};
use placebook::services::{AccountManager, AccountService, JwtTokenService, TokenService};

mock! {
    pub UserRepo {}

    #[async_trait]
    impl UserRepository for UserRepo {
        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
        async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
        async fn create(&self, name: String, email: String, password_hash: String) -> AppResult<User>;
        async fn append_location(&self, user_id: Uuid, location: String) -> AppResult<Vec<String>>;
        async fn locations(&self, user_id: Uuid) -> AppResult<Vec<String>>;
    }
}

mock! {
    pub AddressRepo {}

    #[async_trait]
    impl AddressRepository for AddressRepo {
        async fn create_for_user(&self, user_id: Uuid, address: NewAddress) -> AppResult<Vec<Uuid>>;
        async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Address>>;
    }
}

const SECRET: &[u8] = b"test-secret-key-for-testing-only-32chars";

/// Test UnitOfWork that hands out mocked repositories
struct TestUnitOfWork {
    user_repo: Arc<MockUserRepo>,
    address_repo: Arc<MockAddressRepo>,
}

impl TestUnitOfWork {
    fn new(user_repo: MockUserRepo, address_repo: MockAddressRepo) -> Self {
        Self {
            user_repo: Arc::new(user_repo),
            address_repo: Arc::new(address_repo),
        }
    }
}

impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn addresses(&self) -> Arc<dyn AddressRepository> {
        self.address_repo.clone()
    }
}

fn tokens() -> Arc<JwtTokenService> {
    Arc::new(JwtTokenService::new(SECRET, 3600))
}

fn service(users: MockUserRepo, addresses: MockAddressRepo) -> AccountManager<TestUnitOfWork> {
    AccountManager::new(Arc::new(TestUnitOfWork::new(users, addresses)), tokens())
}

fn new_user(name: String, email: String, password_hash: String) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        name,
        email,
        password_hash,
        created_at: now,
        updated_at: now,
    }
}

fn user_with_password(email: &str, password: &str) -> User {
    let hash = Password::new(password).unwrap().into_string();
    new_user("Jane".to_string(), email.to_string(), hash)
}

fn home_input() -> AddressInput {
    AddressInput {
        label: "Home".to_string(),
        street: "221B Baker Street".to_string(),
        city: "London".to_string(),
        state: "Greater London".to_string(),
        postal_code: "NW1 6XE".to_string(),
        country: "United Kingdom".to_string(),
    }
}

/// User repository backed by a shared in-memory list
fn in_memory_users(store: Arc<Mutex<Vec<User>>>) -> MockUserRepo {
    let mut repo = MockUserRepo::new();

    let by_email = store.clone();
    repo.expect_find_by_email().returning(move |email| {
        Ok(by_email.lock().unwrap().iter().find(|u| u.email == email).cloned())
    });

    let by_id = store.clone();
    repo.expect_find_by_id()
        .returning(move |id| Ok(by_id.lock().unwrap().iter().find(|u| u.id == id).cloned()));

    repo.expect_create().returning(move |name, email, hash| {
        let user = new_user(name, email, hash);
        store.lock().unwrap().push(user.clone());
        Ok(user)
    });

    repo
}

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn test_register_issues_token_for_new_user() {
    let store = Arc::new(Mutex::new(Vec::new()));
    let service = service(in_memory_users(store.clone()), MockAddressRepo::new());

    let session = service
        .register("Jane".into(), "jane@example.com".into(), "s3cret".into())
        .await
        .unwrap();

    assert_eq!(session.user.email, "jane@example.com");
    assert_eq!(session.user.name, "Jane");

    let identity = tokens().verify(&session.token).unwrap();
    assert_eq!(identity.user_id, session.user.id);
    assert_eq!(identity.email, "jane@example.com");

    // Stored hash is argon2, never the plain text
    let stored = store.lock().unwrap()[0].clone();
    assert_ne!(stored.password_hash, "s3cret");
    assert!(stored.password().verify("s3cret"));
}

#[tokio::test]
async fn test_register_twice_is_duplicate_email() {
    let store = Arc::new(Mutex::new(Vec::new()));
    let service = service(in_memory_users(store.clone()), MockAddressRepo::new());

    service
        .register("Jane".into(), "a@x.com".into(), "p1".into())
        .await
        .unwrap();
    let err = service
        .register("Other".into(), "a@x.com".into(), "p2".into())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::DuplicateEmail));
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(store.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_unique_index_race_is_duplicate_email() {
    let mut users = MockUserRepo::new();
    users.expect_find_by_email().returning(|_| Ok(None));
    users
        .expect_create()
        .times(1)
        .returning(|_, _, _| Err(AppError::DuplicateEmail));

    let err = service(users, MockAddressRepo::new())
        .register("Jane".into(), "a@x.com".into(), "p1".into())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::DuplicateEmail));
}

#[tokio::test]
async fn test_register_missing_fields_never_touch_store() {
    let mut users = MockUserRepo::new();
    users.expect_find_by_email().never();
    users.expect_create().never();
    let service = service(users, MockAddressRepo::new());

    for (name, email, password) in [("", "a@x.com", "p"), ("Jane", "  ", "p")] {
        let err = service
            .register(name.into(), email.into(), password.into())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MissingField(_)), "{:?}", err);
    }
}

#[tokio::test]
async fn test_register_empty_password_is_missing_field() {
    let mut users = MockUserRepo::new();
    users.expect_find_by_email().returning(|_| Ok(None));
    users.expect_create().never();

    let err = service(users, MockAddressRepo::new())
        .register("Jane".into(), "a@x.com".into(), "".into())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::MissingField(_)));
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_success() {
    let user = user_with_password("a@x.com", "p1");
    let user_id = user.id;

    let mut users = MockUserRepo::new();
    users
        .expect_find_by_email()
        .with(eq("a@x.com"))
        .returning(move |_| Ok(Some(user.clone())));

    let session = service(users, MockAddressRepo::new())
        .login("a@x.com".into(), "p1".into())
        .await
        .unwrap();

    assert_eq!(session.user.id, user_id);
    assert_eq!(tokens().verify(&session.token).unwrap().user_id, user_id);
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_email_are_indistinguishable() {
    let user = user_with_password("a@x.com", "p1");

    let mut users = MockUserRepo::new();
    users.expect_find_by_email().returning(move |email| {
        Ok((email == "a@x.com").then(|| user.clone()))
    });
    let service = service(users, MockAddressRepo::new());

    let wrong_password = service
        .login("a@x.com".into(), "wrong".into())
        .await
        .unwrap_err();
    let unknown_email = service
        .login("b@x.com".into(), "p1".into())
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, AppError::InvalidCredentials));
    assert!(matches!(unknown_email, AppError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    assert_eq!(wrong_password.status(), unknown_email.status());
}

// =============================================================================
// Saved locations
// =============================================================================

#[tokio::test]
async fn test_append_location_keeps_order_without_dedup() {
    let user_id = Uuid::new_v4();
    let saved = Arc::new(Mutex::new(Vec::<String>::new()));

    let mut users = MockUserRepo::new();
    let list = saved.clone();
    users
        .expect_append_location()
        .with(eq(user_id), mockall::predicate::always())
        .returning(move |_, location| {
            let mut list = list.lock().unwrap();
            list.push(location);
            Ok(list.clone())
        });
    let service = service(users, MockAddressRepo::new());

    service.append_location(user_id, "Paris".into()).await.unwrap();
    service.append_location(user_id, "Rome".into()).await.unwrap();
    let locations = service.append_location(user_id, "Paris".into()).await.unwrap();

    assert_eq!(locations, vec!["Paris", "Rome", "Paris"]);
}

#[tokio::test]
async fn test_append_blank_location_is_missing_field() {
    let mut users = MockUserRepo::new();
    users.expect_append_location().never();
    let service = service(users, MockAddressRepo::new());

    for blank in ["", "   ", "\t\n"] {
        let err = service
            .append_location(Uuid::new_v4(), blank.into())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MissingField(_)));
    }
}

#[tokio::test]
async fn test_append_location_unknown_user() {
    let mut users = MockUserRepo::new();
    users
        .expect_append_location()
        .returning(|_, _| Err(AppError::UserNotFound));

    let err = service(users, MockAddressRepo::new())
        .append_location(Uuid::new_v4(), "Paris".into())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::UserNotFound));
}

// =============================================================================
// Addresses and profile
// =============================================================================

#[tokio::test]
async fn test_add_address_rejects_unknown_label() {
    let mut addresses = MockAddressRepo::new();
    addresses.expect_create_for_user().never();

    let input = AddressInput {
        label: "Work".to_string(),
        ..home_input()
    };
    let err = service(MockUserRepo::new(), addresses)
        .add_address(Uuid::new_v4(), input)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidLabel(ref label) if label == "Work"));
}

#[tokio::test]
async fn test_add_address_label_is_case_sensitive() {
    let mut addresses = MockAddressRepo::new();
    addresses.expect_create_for_user().never();

    let input = AddressInput {
        label: "home".to_string(),
        ..home_input()
    };
    let err = service(MockUserRepo::new(), addresses)
        .add_address(Uuid::new_v4(), input)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidLabel(_)));
}

#[tokio::test]
async fn test_add_address_missing_field() {
    let mut addresses = MockAddressRepo::new();
    addresses.expect_create_for_user().never();

    let input = AddressInput {
        city: " ".to_string(),
        ..home_input()
    };
    let err = service(MockUserRepo::new(), addresses)
        .add_address(Uuid::new_v4(), input)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::MissingField(_)));
}

#[tokio::test]
async fn test_add_address_unknown_user() {
    let mut addresses = MockAddressRepo::new();
    addresses
        .expect_create_for_user()
        .returning(|_, _| Err(AppError::UserNotFound));

    let err = service(MockUserRepo::new(), addresses)
        .add_address(Uuid::new_v4(), home_input())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::UserNotFound));
}

#[tokio::test]
async fn test_added_address_is_expanded_in_profile() {
    let user = user_with_password("a@x.com", "p1");
    let user_id = user.id;
    let saved = Arc::new(Mutex::new(Vec::<Address>::new()));

    let mut users = MockUserRepo::new();
    users
        .expect_find_by_id()
        .with(eq(user_id))
        .returning(move |_| Ok(Some(user.clone())));
    users
        .expect_locations()
        .returning(|_| Ok(vec!["Paris".to_string()]));

    let mut addresses = MockAddressRepo::new();
    let created = saved.clone();
    addresses
        .expect_create_for_user()
        .returning(move |owner, new| {
            let now = Utc::now();
            let mut list = created.lock().unwrap();
            list.push(Address {
                id: Uuid::new_v4(),
                user_id: owner,
                label: new.label,
                street: new.street,
                city: new.city,
                state: new.state,
                postal_code: new.postal_code,
                country: new.country,
                created_at: now,
                updated_at: now,
            });
            Ok(list.iter().map(|a| a.id).collect())
        });
    let listed = saved.clone();
    addresses
        .expect_list_for_user()
        .returning(move |owner| {
            Ok(listed
                .lock()
                .unwrap()
                .iter()
                .filter(|a| a.user_id == owner)
                .cloned()
                .collect())
        });

    let service = service(users, addresses);
    let ids = service.add_address(user_id, home_input()).await.unwrap();
    let profile = service.get_profile(user_id).await.unwrap();

    let profile_ids: Vec<Uuid> = profile.addresses.iter().map(|a| a.id).collect();
    assert_eq!(profile_ids, ids);
    assert_eq!(profile.location, vec!["Paris"]);

    let address = &profile.addresses[0];
    let input = home_input();
    assert_eq!(address.label.as_str(), input.label);
    assert_eq!(address.street, input.street);
    assert_eq!(address.city, input.city);
    assert_eq!(address.state, input.state);
    assert_eq!(address.postal_code, input.postal_code);
    assert_eq!(address.country, input.country);
}

#[tokio::test]
async fn test_profile_unknown_user() {
    let mut users = MockUserRepo::new();
    users.expect_find_by_id().returning(|_| Ok(None));
    users.expect_locations().returning(|_| Ok(vec![]));
    let mut addresses = MockAddressRepo::new();
    addresses.expect_list_for_user().returning(|_| Ok(vec![]));

    let err = service(users, addresses)
        .get_profile(Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::UserNotFound));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_profile_never_exposes_password_hash() {
    let user = user_with_password("a@x.com", "p1");
    let user_id = user.id;

    let mut users = MockUserRepo::new();
    users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(user.clone())));
    users.expect_locations().returning(|_| Ok(vec![]));
    let mut addresses = MockAddressRepo::new();
    addresses.expect_list_for_user().returning(|_| Ok(vec![]));

    let profile = service(users, addresses).get_profile(user_id).await.unwrap();
    let json = serde_json::to_string(&profile).unwrap();

    assert!(!json.contains("argon2"));
    assert!(!json.to_lowercase().contains("password"));
}
