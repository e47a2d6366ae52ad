//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance with migrations applied (`sqlx migrate run`)
//! - Environment variables: DATABASE_URL (JWT_SECRET optional)
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_data, assert_envelope, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;

/// Register a user and verify its email directly in the database, standing
/// in for the emailed verification link.
async fn register_verified(server: &TestServer) -> RegisterRequest {
    let request = RegisterRequest::unique();
    let response = server.post("/api/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
    server.verify_user_email(&request.email).await.unwrap();
    request
}

/// Register, verify, and log in; returns the register request and tokens
async fn login_user(server: &TestServer) -> (RegisterRequest, AuthResponse) {
    let request = register_verified(server).await;
    let response = server
        .post("/api/auth/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    let auth: AuthResponse = assert_data(response, StatusCode::OK).await.unwrap();
    (request, auth)
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/api/auth/register", &request).await.unwrap();
    let registered: RegisteredResponse = assert_data(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(registered.email, request.email);
    assert!(registered.id > 0);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    // First registration
    server.post("/api/auth/register", &request).await.unwrap();

    // Second registration with same email but fresh rut
    let mut duplicate = RegisterRequest::unique();
    duplicate.email = request.email.clone();
    let response = server.post("/api/auth/register", &duplicate).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_register_weak_password() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = RegisterRequest::unique();
    request.password = "nodigitsoruppercase".to_string();

    let response = server.post("/api/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, auth) = login_user(&server).await;

    assert_eq!(auth.user.email, request.email);
    assert!(!auth.tokens.access_token.is_empty());
    assert!(!auth.tokens.refresh_token.is_empty());
    assert_eq!(auth.tokens.token_type, "Bearer");
    assert!(auth.tokens.expires_in > 0);
}

#[tokio::test]
async fn test_login_unverified_email_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();
    server.post("/api/auth/register", &request).await.unwrap();

    // No verification step: login must fail even with the right password
    let response = server
        .post("/api/auth/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_login_inactive_user_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = register_verified(&server).await;
    server.deactivate_user(&request.email).await.unwrap();

    // Correct password, inactive account
    let response = server
        .post("/api/auth/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let login_req = LoginRequest {
        email: "nonexistent@example.com".to_string(),
        password: "wrongpass".to_string(),
    };

    let response = server.post("/api/auth/login", &login_req).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_profile_requires_auth() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/auth/profile").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let (request, auth) = login_user(&server).await;
    let response = server
        .get_auth("/api/auth/profile", &auth.tokens.access_token)
        .await
        .unwrap();
    let envelope = assert_envelope::<serde_json::Value>(response, StatusCode::OK)
        .await
        .unwrap();
    assert!(envelope.success);
    assert_eq!(envelope.data.unwrap()["email"], request.email.as_str());
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get_auth("/api/auth/profile", "not.a.token")
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Refresh Token Tests
// ============================================================================

#[tokio::test]
async fn test_refresh_token_rotates() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = login_user(&server).await;

    let response = server
        .post(
            "/api/auth/refresh-token",
            &RefreshTokenRequest {
                refresh_token: auth.tokens.refresh_token.clone(),
            },
        )
        .await
        .unwrap();
    let rotated: TokensResponse = assert_data(response, StatusCode::OK).await.unwrap();

    assert!(!rotated.access_token.is_empty());
    assert_ne!(rotated.refresh_token, auth.tokens.refresh_token);
}

#[tokio::test]
async fn test_refresh_token_single_use() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = login_user(&server).await;

    let request = RefreshTokenRequest {
        refresh_token: auth.tokens.refresh_token.clone(),
    };

    // First redemption succeeds
    let response = server.post("/api/auth/refresh-token", &request).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Second redemption of the same token fails
    let response = server.post("/api/auth/refresh-token", &request).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_token_concurrent_redemption() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = login_user(&server).await;

    let request = RefreshTokenRequest {
        refresh_token: auth.tokens.refresh_token.clone(),
    };

    // Race two redemptions of the same token: exactly one may win
    let (first, second) = tokio::join!(
        server.post("/api/auth/refresh-token", &request),
        server.post("/api/auth/refresh-token", &request),
    );

    let statuses = [first.unwrap().status(), second.unwrap().status()];
    let successes = statuses.iter().filter(|s| **s == StatusCode::OK).count();
    let failures = statuses
        .iter()
        .filter(|s| **s == StatusCode::UNAUTHORIZED)
        .count();

    assert_eq!(successes, 1, "exactly one concurrent redemption must win");
    assert_eq!(failures, 1, "the loser must get an authentication error");
}

#[tokio::test]
async fn test_logout_revokes_refresh_tokens() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = login_user(&server).await;

    // Logout
    let response = server
        .post_auth("/api/auth/logout", &auth.tokens.access_token, &())
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Previously issued refresh token is dead
    let response = server
        .post(
            "/api/auth/refresh-token",
            &RefreshTokenRequest {
                refresh_token: auth.tokens.refresh_token.clone(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Tenant Resolution Tests
// ============================================================================

#[tokio::test]
async fn test_cotizacion_public_create() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateCotizacionRequest::unique();

    let response = server.post("/api/cotizaciones", &request).await.unwrap();
    let created: CotizacionResponse = assert_data(response, StatusCode::CREATED).await.unwrap();

    assert!(created.cotizacion_id.starts_with("COT-"));
    assert_eq!(created.estado, "pendiente");
    // Missing tenant header defaults to tenant 1
    assert_eq!(created.id_propietario, 1);
}

#[tokio::test]
async fn test_invalid_tenant_header_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateCotizacionRequest::unique();

    for bad in ["abc", "0", "-2"] {
        let url = format!("{}/api/cotizaciones", server.base_url());
        let response = server
            .client
            .post(&url)
            .header("X-Propietario-ID", bad)
            .json(&request)
            .send()
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "tenant header {bad:?} must be rejected"
        );
    }
}

#[tokio::test]
async fn test_tenant_isolation_on_estado_lookup() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Quote A under tenant 1, quote B under tenant 2
    let request_a = CreateCotizacionRequest::unique();
    let response = server
        .post_tenant("/api/cotizaciones", &request_a, 1)
        .await
        .unwrap();
    let created_a: CotizacionResponse = assert_data(response, StatusCode::CREATED).await.unwrap();

    let request_b = CreateCotizacionRequest::unique();
    let response = server
        .post_tenant("/api/cotizaciones", &request_b, 2)
        .await
        .unwrap();
    let created_b: CotizacionResponse = assert_data(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(created_a.id_propietario, 1);
    assert_eq!(created_b.id_propietario, 2);

    // Tenant 1 sees A, not B
    let response = server
        .get_tenant(
            &format!("/api/cotizaciones/estado/{}", created_a.cotizacion_id),
            1,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_tenant(
            &format!("/api/cotizaciones/estado/{}", created_b.cotizacion_id),
            1,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // And the reverse holds
    let response = server
        .get_tenant(
            &format!("/api/cotizaciones/estado/{}", created_b.cotizacion_id),
            2,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_tenant(
            &format!("/api/cotizaciones/estado/{}", created_a.cotizacion_id),
            2,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_missing_tenant_header_defaults_to_one() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Created without any tenant information
    let request = CreateCotizacionRequest::unique();
    let response = server.post("/api/cotizaciones", &request).await.unwrap();
    let created: CotizacionResponse = assert_data(response, StatusCode::CREATED).await.unwrap();

    // Visible both without a header and under explicit tenant 1
    let path = format!("/api/cotizaciones/estado/{}", created.cotizacion_id);

    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_tenant(&path, 1).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Tenant Ownership (admin routes)
// ============================================================================

#[tokio::test]
async fn test_require_tenant_match() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // An admin user administers only the tenant matching their own id
    let request = register_verified(&server).await;
    server.make_admin(&request.email).await.unwrap();
    let response = server
        .post("/api/auth/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    let auth: AuthResponse = assert_data(response, StatusCode::OK).await.unwrap();
    let user_id = server.user_id(&request.email).await.unwrap();

    // Own tenant: allowed
    let response = server
        .get_auth_tenant("/api/cotizaciones", &auth.tokens.access_token, user_id)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Someone else's tenant: forbidden
    let response = server
        .get_auth_tenant(
            "/api/cotizaciones",
            &auth.tokens.access_token,
            user_id + 1000,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_admin_listing_is_tenant_scoped() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Admin whose tenant is their own user id
    let request = register_verified(&server).await;
    server.make_admin(&request.email).await.unwrap();
    let response = server
        .post("/api/auth/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    let auth: AuthResponse = assert_data(response, StatusCode::OK).await.unwrap();
    let user_id = server.user_id(&request.email).await.unwrap();

    // One quote in this admin's tenant, one in a stranger tenant
    let mine = CreateCotizacionRequest::unique();
    server
        .post_tenant("/api/cotizaciones", &mine, user_id)
        .await
        .unwrap();
    let foreign = CreateCotizacionRequest::unique();
    server
        .post_tenant("/api/cotizaciones", &foreign, user_id + 1000)
        .await
        .unwrap();

    let response = server
        .get_auth_tenant("/api/cotizaciones", &auth.tokens.access_token, user_id)
        .await
        .unwrap();
    let listing: CotizacionListResponse = assert_data(response, StatusCode::OK).await.unwrap();

    assert_eq!(listing.pagination.total, 1);
    assert!(listing
        .cotizaciones
        .iter()
        .all(|c| c.id_propietario == user_id));
    assert!(listing.cotizaciones.iter().any(|c| c.nombre == mine.nombre));
}

#[tokio::test]
async fn test_non_admin_cannot_list() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, auth) = login_user(&server).await;
    let user_id = server.user_id(&request.email).await.unwrap();

    // No admin role: forbidden even for the matching tenant
    let response = server
        .get_auth_tenant("/api/cotizaciones", &auth.tokens.access_token, user_id)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Comentario Tests
// ============================================================================

#[tokio::test]
async fn test_comentario_created_hidden() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Submit under a dedicated tenant so the public listing is deterministic
    let tenant = 7_001 + (unique_suffix() % 1000) as i64;
    let request = CreateComentarioRequest::unique();
    let response = server
        .post_tenant("/api/comentarios", &request, tenant)
        .await
        .unwrap();
    let created: ComentarioPublicoResponse =
        assert_data(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.nombre, request.nombre);

    // Hidden until approved: not in the public listing
    let response = server
        .get_tenant("/api/comentarios/publicos", tenant)
        .await
        .unwrap();
    let listing: ComentariosPublicosResponse =
        assert_data(response, StatusCode::OK).await.unwrap();
    assert!(listing.comentarios.is_empty());
}

#[tokio::test]
async fn test_comentario_validation() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let mut request = CreateComentarioRequest::unique();
    request.estrellas = 9;
    let response = server.post("/api/comentarios", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let mut request = CreateComentarioRequest::unique();
    request.comentario = "corto".to_string();
    let response = server.post("/api/comentarios", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// User Deletion Guard
// ============================================================================

#[tokio::test]
async fn test_delete_user_with_owned_quotes_conflicts() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Admin to perform deletions
    let admin_req = register_verified(&server).await;
    server.make_admin(&admin_req.email).await.unwrap();
    let response = server
        .post("/api/auth/login", &LoginRequest::from_register(&admin_req))
        .await
        .unwrap();
    let admin: AuthResponse = assert_data(response, StatusCode::OK).await.unwrap();

    // Victim user owning one quote (tenant id == user id)
    let victim_req = register_verified(&server).await;
    let victim_id = server.user_id(&victim_req.email).await.unwrap();
    server
        .post_tenant(
            "/api/cotizaciones",
            &CreateCotizacionRequest::unique(),
            victim_id,
        )
        .await
        .unwrap();

    // Deletion refused while dependent records exist
    let response = server
        .delete_auth(
            &format!("/api/users/{victim_id}"),
            &admin.tokens.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // A user with no quotes deletes fine
    let clean_req = register_verified(&server).await;
    let clean_id = server.user_id(&clean_req.email).await.unwrap();
    let response = server
        .delete_auth(
            &format!("/api/users/{clean_id}"),
            &admin.tokens.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}
