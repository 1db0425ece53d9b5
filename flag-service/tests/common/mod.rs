use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::PasswordHasher;
use flag_service::domain::flag::models::Flag;
use flag_service::domain::flag::models::FlagId;
use flag_service::domain::flag::ports::FlagServicePort;
use flag_service::domain::flag::ports::FlagStore;
use flag_service::domain::flag::service::FlagService;
use flag_service::domain::user::models::Credential;
use flag_service::domain::user::models::EmailAddress;
use flag_service::domain::user::models::UserId;
use flag_service::domain::user::ports::AuthServicePort;
use flag_service::domain::user::ports::CredentialStore;
use flag_service::domain::user::service::AuthService;
use flag_service::flag::errors::FlagError;
use flag_service::inbound::http::router::create_router;
use flag_service::outbound::repositories::PostgresCredentialStore;
use flag_service::outbound::repositories::PostgresFlagStore;
use flag_service::user::errors::UserError;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-token-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
    pub db: Option<TestDb>,
}

/// Test database helper
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
}

impl TestApp {
    /// Spawn the application backed by in-memory stores
    pub async fn spawn() -> Self {
        let authenticator = test_authenticator();

        let auth_service = Arc::new(AuthService::new(
            Arc::new(InMemoryCredentialStore::default()),
            Arc::clone(&authenticator),
        ));
        let flag_service = Arc::new(FlagService::new(Arc::new(InMemoryFlagStore::default())));

        Self::serve(auth_service, flag_service, authenticator, None).await
    }

    /// Spawn the application backed by the Postgres stores on a fresh database.
    ///
    /// Returns `None` when `DATABASE_URL` is not set.
    pub async fn spawn_with_postgres() -> Option<Self> {
        let db = TestDb::new().await?;
        let authenticator = test_authenticator();

        let auth_service = Arc::new(AuthService::new(
            Arc::new(PostgresCredentialStore::new(db.pool.clone())),
            Arc::clone(&authenticator),
        ));
        let flag_service = Arc::new(FlagService::new(Arc::new(PostgresFlagStore::new(
            db.pool.clone(),
        ))));

        Some(Self::serve(auth_service, flag_service, authenticator, Some(db)).await)
    }

    async fn serve(
        auth_service: Arc<dyn AuthServicePort>,
        flag_service: Arc<dyn FlagServicePort>,
        authenticator: Arc<Authenticator>,
        db: Option<TestDb>,
    ) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let router = create_router(auth_service, flag_service, Arc::clone(&authenticator));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            authenticator,
            db,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(&format!("{}{}", self.address, path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(&format!("{}{}", self.address, path))
    }

    /// Register a credential and sign in with it, returning the session token
    pub async fn sign_up_and_sign_in(&self, email: &str, password: &str) -> String {
        let body = serde_json::json!({ "email": email, "password": password });

        let response = self
            .post("/signup")
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let response = self
            .post("/auth")
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["jwt"]
            .as_str()
            .expect("Missing jwt in response")
            .to_string()
    }
}

/// Minimal Argon2 cost keeps the suite fast
fn test_authenticator() -> Arc<Authenticator> {
    let password_hasher =
        PasswordHasher::with_cost(8, 1, 1).expect("Failed to build password hasher");
    Arc::new(
        Authenticator::new(TEST_SECRET)
            .expect("Failed to build authenticator")
            .with_password_hasher(password_hasher),
    )
}

impl TestDb {
    /// Create a new migrated database with a unique name.
    ///
    /// `DATABASE_URL` must point at a server the tests may create databases
    /// on; without it the Postgres-backed tests are skipped.
    pub async fn new() -> Option<Self> {
        let Ok(postgres_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping Postgres-backed test");
            return None;
        };

        let db_name = format!(
            "test_flag_service_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&postgres_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = postgres_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self { pool, db_name })
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        // Database cleanup happens asynchronously
        let db_name = self.db_name.clone();
        tokio::spawn(async move {
            let Ok(postgres_url) = std::env::var("DATABASE_URL") else {
                return;
            };

            if let Ok(mut conn) = PgConnection::connect(&postgres_url).await {
                let _ = conn
                    .execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        )
                        .as_str(),
                    )
                    .await;

                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}

#[derive(Default)]
pub struct InMemoryCredentialStore {
    credentials: Mutex<Vec<Credential>>,
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn create(
        &self,
        email: &EmailAddress,
        password_hash: &str,
    ) -> Result<Credential, UserError> {
        let mut credentials = self.credentials.lock().unwrap();

        if credentials.iter().any(|c| &c.email == email) {
            return Err(UserError::EmailAlreadyExists(email.to_string()));
        }

        let credential = Credential {
            id: UserId(credentials.len() as i64 + 1),
            email: email.clone(),
            password_hash: password_hash.to_string(),
        };
        credentials.push(credential.clone());

        Ok(credential)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Credential>, UserError> {
        let credentials = self.credentials.lock().unwrap();
        Ok(credentials.iter().find(|c| &c.email == email).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryFlagStore {
    flags: Mutex<BTreeMap<(UserId, FlagId), String>>,
}

#[async_trait]
impl FlagStore for InMemoryFlagStore {
    async fn list(&self, owner: UserId) -> Result<Vec<Flag>, FlagError> {
        let flags = self.flags.lock().unwrap();
        flags
            .iter()
            .filter(|((flag_owner, _), _)| *flag_owner == owner)
            .map(|((_, id), value)| Flag::new(id.to_string(), value.clone()))
            .collect()
    }

    async fn upsert(&self, owner: UserId, flag: &Flag) -> Result<(), FlagError> {
        let mut flags = self.flags.lock().unwrap();
        flags.insert((owner, flag.id.clone()), flag.value.clone());
        Ok(())
    }

    async fn delete(&self, owner: UserId, id: &FlagId) -> Result<(), FlagError> {
        let mut flags = self.flags.lock().unwrap();
        flags
            .remove(&(owner, id.clone()))
            .map(|_| ())
            .ok_or_else(|| FlagError::NotFound(id.to_string()))
    }
}
