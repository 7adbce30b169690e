use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::TokenCodec;
use auth_service::account::errors::AuthError;
use auth_service::account::errors::NotifierError;
use auth_service::bootstrap;
use auth_service::config::BootstrapConfig;
use auth_service::domain::account::models::Account;
use auth_service::domain::account::models::AccountId;
use auth_service::domain::account::models::EmailAddress;
use auth_service::domain::account::models::Nickname;
use auth_service::domain::account::models::Role;
use auth_service::domain::account::models::RoleName;
use auth_service::domain::account::ports::AccountRepository;
use auth_service::domain::account::ports::DirectoryNotifier;
use auth_service::domain::account::ports::RoleStore;
use auth_service::domain::account::service::AuthenticationService;
use auth_service::inbound::http::router::create_router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::DateTime;
use chrono::Utc;

pub const ADMIN_EMAIL: &str = "admin@test.dev";
pub const ADMIN_PASSWORD: &str = "admin-first-start";

/// A service instance listening on a random local port, wired to in-memory
/// adapters so tests need no database or directory to talk to.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub tokens: Arc<TokenCodec>,
    pub directory: Arc<RecordingDirectoryNotifier>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let repository = Arc::new(InMemoryAccountRepository::new());
        let role_store = Arc::new(InMemoryRoleStore::new());
        let directory = Arc::new(RecordingDirectoryNotifier::new());

        bootstrap::seed_roles(role_store.as_ref())
            .await
            .expect("Failed to seed roles");
        bootstrap::seed_admin(
            repository.as_ref(),
            role_store.as_ref(),
            &BootstrapConfig {
                admin_email: ADMIN_EMAIL.to_string(),
                admin_nickname: "Admin".to_string(),
                admin_password: ADMIN_PASSWORD.to_string(),
            },
        )
        .await
        .expect("Failed to seed the administrator account");

        let secret = STANDARD.encode(b"integration-test-signing-key-32-bytes!!");
        let tokens = Arc::new(TokenCodec::new(&secret, 60).expect("Failed to build token codec"));

        let service = Arc::new(AuthenticationService::new(
            repository,
            role_store,
            Arc::clone(&directory),
            Arc::clone(&tokens),
        ));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let address = format!(
            "http://{}",
            listener.local_addr().expect("Failed to read local address")
        );

        let router = create_router(service, Arc::clone(&tokens));
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server stopped");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            tokens,
            directory,
        }
    }

    pub async fn post(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> reqwest::Response {
        self.post(
            "/auth/signup",
            &serde_json::json!({ "name": name, "email": email, "password": password }),
        )
        .await
    }

    pub async fn signin(&self, email: &str, password: &str) -> reqwest::Response {
        self.post(
            "/auth/signin",
            &serde_json::json!({ "email": email, "password": password }),
        )
        .await
    }

    pub async fn validate(&self, token: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}/auth/validate", self.address))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<String, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AuthError> {
        let mut accounts = self.accounts.lock().unwrap();
        let email = account.email.as_str().to_string();
        if accounts.contains_key(&email) {
            return Err(AuthError::DuplicateAccount);
        }
        accounts.insert(email, account.clone());
        Ok(account)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AuthError> {
        Ok(self.accounts.lock().unwrap().get(email.as_str()).cloned())
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, AuthError> {
        Ok(self.accounts.lock().unwrap().contains_key(email.as_str()))
    }

    async fn record_login(&self, id: &AccountId, at: DateTime<Utc>) -> Result<(), AuthError> {
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(account) = accounts.values_mut().find(|a| a.id == *id) {
            account.last_login = Some(at);
            account.updated_at = at;
        }
        Ok(())
    }

    async fn update_password_hash(
        &self,
        id: &AccountId,
        password_hash: &str,
        at: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(account) = accounts.values_mut().find(|a| a.id == *id) {
            account.password_hash = password_hash.to_string();
            account.updated_at = at;
        }
        Ok(())
    }
}

pub struct InMemoryRoleStore {
    roles: Mutex<Vec<Role>>,
}

impl InMemoryRoleStore {
    pub fn new() -> Self {
        Self {
            roles: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RoleStore for InMemoryRoleStore {
    async fn find_by_name(&self, name: RoleName) -> Result<Option<Role>, AuthError> {
        Ok(self
            .roles
            .lock()
            .unwrap()
            .iter()
            .find(|role| role.name == name)
            .cloned())
    }

    async fn insert(&self, role: Role) -> Result<Role, AuthError> {
        self.roles.lock().unwrap().push(role.clone());
        Ok(role)
    }
}

/// Captures directory notifications instead of sending them, and can be
/// switched into a failing mode to model an unreachable directory.
pub struct RecordingDirectoryNotifier {
    notifications: Mutex<Vec<(String, String)>>,
    failing: AtomicBool,
}

impl RecordingDirectoryNotifier {
    pub fn new() -> Self {
        Self {
            notifications: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    pub fn fail_requests(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn notifications(&self) -> Vec<(String, String)> {
        self.notifications.lock().unwrap().clone()
    }
}

#[async_trait]
impl DirectoryNotifier for RecordingDirectoryNotifier {
    async fn account_created(
        &self,
        email: &EmailAddress,
        nickname: &Nickname,
    ) -> Result<(), NotifierError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotifierError::RequestFailed(
                "connection refused".to_string(),
            ));
        }

        self.notifications
            .lock()
            .unwrap()
            .push((email.as_str().to_string(), nickname.as_str().to_string()));
        Ok(())
    }
}
