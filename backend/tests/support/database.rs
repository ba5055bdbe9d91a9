//! Per-test database context for repository integration suites.

use pg_embedded_setup_unpriv::TemporaryDatabase;
use recipe_backend::domain::ports::UserRepository;
use recipe_backend::domain::{Email, HashedPassword, UserAccount, UserId};
use recipe_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
use tokio::runtime::Runtime;

/// Set to `1`, `true` or `yes` to skip repository suites when PostgreSQL
/// cannot start.
const SKIP_CLUSTER_VAR: &str = "SKIP_TEST_CLUSTER";

use super::pg_embed::shared_cluster;
use super::provision_template_database;

/// A migrated temporary database with a pool and a runtime to drive it.
pub struct TestDatabase {
    pub runtime: Runtime,
    pub pool: DbPool,
    pub url: String,
    _database: TemporaryDatabase,
}

impl TestDatabase {
    fn provision() -> Result<Self, String> {
        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let cluster = shared_cluster()?;
        let database = provision_template_database(cluster)?;
        let url = database.url().to_string();
        let config = PoolConfig::new(url.as_str())
            .with_max_size(2)
            .with_min_idle(Some(1));
        let pool = runtime
            .block_on(DbPool::new(config))
            .map_err(|err| err.to_string())?;
        Ok(Self {
            runtime,
            pool,
            url,
            _database: database,
        })
    }

    /// Insert a user account so recipes and attributes have an owner.
    pub fn insert_user(&self, email: &str) -> UserId {
        let account = UserAccount::register(
            Email::new(email).expect("valid email"),
            "Cook",
            HashedPassword::from_stored("$argon2id$stub"),
        );
        let repository = DieselUserRepository::new(self.pool.clone());
        self.runtime
            .block_on(repository.insert(&account))
            .expect("user inserts");
        account.user().id().clone()
    }
}

fn skip_requested() -> bool {
    std::env::var(SKIP_CLUSTER_VAR).is_ok_and(|value| {
        ["1", "true", "yes"]
            .iter()
            .any(|accepted| value.trim().eq_ignore_ascii_case(accepted))
    })
}

/// Provision a test database, or `None` when `SKIP_TEST_CLUSTER` is set and
/// the cluster cannot start.
///
/// Without the skip flag a provisioning failure fails the test.
pub fn test_database() -> Option<TestDatabase> {
    let reason = match TestDatabase::provision() {
        Ok(database) => return Some(database),
        Err(reason) => reason,
    };
    assert!(
        skip_requested(),
        "recipe test database unavailable: {reason}; set {SKIP_CLUSTER_VAR}=1 to skip"
    );
    eprintln!("skipping repository suite, no database: {reason}");
    None
}
