//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, making HTTP requests
//! (with or without tenant headers), and flipping user state directly in
//! the database where no API exists for it (email verification).

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use asesoria_api::{create_app, create_app_state, AppState};
use asesoria_common::AppConfig;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Header carrying the tenant id
pub const TENANT_HEADER: &str = "X-Propietario-ID";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    state: AppState,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server on an ephemeral port
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let addr = SocketAddr::from(([127, 0, 0, 1], 0));

        // Create app state
        let state = create_app_state(config).await?;

        // Build application
        let app = create_app(state.clone());

        // Bind to an OS-assigned port
        let listener = TcpListener::bind(addr).await?;
        let actual_addr = listener.local_addr()?;

        // Spawn server task
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Create HTTP client
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr: actual_addr,
            client,
            state,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request with a tenant header
    pub async fn get_tenant(&self, path: &str, tenant: i64) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .get(&url)
            .header(TENANT_HEADER, tenant.to_string())
            .send()
            .await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await?)
    }

    /// Make a GET request with auth token and tenant header
    pub async fn get_auth_tenant(
        &self,
        path: &str,
        token: &str,
        tenant: i64,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {token}"))
            .header(TENANT_HEADER, tenant.to_string())
            .send()
            .await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a POST request with a tenant header
    pub async fn post_tenant<T: Serialize>(
        &self,
        path: &str,
        body: &T,
        tenant: i64,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header(TENANT_HEADER, tenant.to_string())
            .json(body)
            .send()
            .await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await?)
    }

    /// Make a PATCH request with auth token and tenant header
    pub async fn patch_auth_tenant<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        tenant: i64,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .patch(&url)
            .header("Authorization", format!("Bearer {token}"))
            .header(TENANT_HEADER, tenant.to_string())
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .delete(&url)
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await?)
    }

    // === Direct database helpers for state no endpoint exposes ===

    /// Mark a user's email verified, standing in for the emailed link
    pub async fn verify_user_email(&self, email: &str) -> Result<()> {
        sqlx::query(
            "UPDATE users SET email_verified = true, email_verification_token = NULL \
             WHERE email = $1",
        )
        .bind(email)
        .execute(self.state.service_context().pool())
        .await?;
        Ok(())
    }

    /// Deactivate a user account
    pub async fn deactivate_user(&self, email: &str) -> Result<()> {
        sqlx::query("UPDATE users SET is_active = false WHERE email = $1")
            .bind(email)
            .execute(self.state.service_context().pool())
            .await?;
        Ok(())
    }

    /// Grant the admin role (requires the seeded roles)
    pub async fn make_admin(&self, email: &str) -> Result<()> {
        sqlx::query(
            "UPDATE users SET role_id = (SELECT id FROM roles WHERE name = 'admin') \
             WHERE email = $1",
        )
        .bind(email)
        .execute(self.state.service_context().pool())
        .await?;
        Ok(())
    }

    /// Numeric id of a user
    pub async fn user_id(&self, email: &str) -> Result<i64> {
        let id: i64 = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
            .bind(email)
            .fetch_one(self.state.service_context().pool())
            .await?;
        Ok(id)
    }
}

/// Create a test configuration
pub fn test_config() -> Result<AppConfig> {
    // Load from environment or use defaults
    dotenvy::dotenv().ok();

    if std::env::var("API_PORT").is_err() {
        std::env::set_var("API_PORT", "0");
    }
    if std::env::var("JWT_SECRET").is_err() {
        std::env::set_var("JWT_SECRET", "integration-test-secret-key");
    }

    let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {e}"))?;

    Ok(config)
}

/// Helper to check if test environment is available
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    true
}

/// Assert response status and parse the `data` payload out of the
/// `{success, message, data}` envelope
pub async fn assert_data<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let envelope: Envelope<T> = assert_envelope(response, expected_status).await?;
    envelope
        .data
        .ok_or_else(|| anyhow::anyhow!("Response envelope carried no data"))
}

/// Assert response status and parse the full envelope
pub async fn assert_envelope<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<Envelope<T>> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}

/// The standard response envelope
#[derive(Debug, serde::Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}
