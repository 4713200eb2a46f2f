//! JSON Web Token authentication for the REST API.
//!
//! Clients obtain a token from [log_in] and present it as a bearer token.
//! Protected handlers take a [Claims] argument, which rejects the request
//! before the handler body runs if the token is missing or invalid.

use axum::{
    body::Body,
    extract::{FromRef, FromRequestParts, Json, State},
    http::request::Parts,
    http::{Response, StatusCode},
    response::IntoResponse,
    RequestPartsExt,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    models::UserID,
    state::{AppState, AuthConfig},
    stores::{BudgetStore, CategoryStore, ReportStore, TransactionStore, UserStore},
    Error,
};

// Code in this module is adapted from https://github.com/ezesundayeze/axum--auth and https://github.com/tokio-rs/axum/blob/main/examples/jwt/src/main.rs

/// How long a token stays valid after it is issued.
const TOKEN_DURATION: Duration = Duration::hours(24);

/// The contents of a JSON Web Token.
#[derive(Serialize, Deserialize)]
pub struct Claims {
    /// The expiry time of the token.
    pub exp: usize,
    /// The time the token was issued.
    pub iat: usize,
    /// The ID of the user the token was issued to.
    pub user_id: UserID,
}

impl<S> FromRequestParts<S> for Claims
where
    AuthConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AuthError::InvalidToken)?;

        let auth_config = AuthConfig::from_ref(state);

        let token_data = decode_jwt(bearer.token(), &auth_config.decoding_key)?;

        Ok(token_data.claims)
    }
}

/// The data a client sends to sign in.
#[derive(Deserialize)]
pub struct Credentials {
    /// Email entered during sign-in.
    pub email: String,
    /// Password entered during sign-in.
    pub password: String,
}

/// The errors that can occur while issuing or checking auth tokens.
#[derive(Debug)]
pub enum AuthError {
    /// The email and password combination did not match a user.
    WrongCredentials,
    /// Signing a new token failed.
    TokenCreation,
    /// The bearer token was missing, malformed or expired.
    InvalidToken,
    /// An unexpected error occurred while verifying the password.
    InternalError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response<Body> {
        let (status, error_message) = match self {
            AuthError::WrongCredentials => (StatusCode::UNAUTHORIZED, "Wrong credentials"),
            AuthError::TokenCreation => (StatusCode::INTERNAL_SERVER_ERROR, "Token creation error"),
            AuthError::InvalidToken => (StatusCode::BAD_REQUEST, "Invalid token"),
            AuthError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Handler for sign-in requests.
///
/// # Errors
///
/// This function will return an error in a few situations.
/// - The email does not belong to a registered user.
/// - The password is not correct.
/// - An internal error occurred when verifying the password.
pub async fn log_in<B, C, R, T, U>(
    State(state): State<AppState<B, C, R, T, U>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<String>, AuthError>
where
    B: BudgetStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    R: ReportStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let user = state
        .user_store
        .get_by_email(&credentials.email)
        .map_err(|e| match e {
            Error::NotFound => AuthError::WrongCredentials,
            _ => {
                tracing::error!("Error matching user: {e:?}");
                AuthError::InternalError
            }
        })?;

    let password_is_correct =
        bcrypt::verify(&credentials.password, &user.password_hash).map_err(|e| {
            tracing::error!("Error verifying password: {e}");
            AuthError::InternalError
        })?;

    if password_is_correct {
        let token = encode_jwt(user.id, &state.auth_config.encoding_key)?;

        Ok(Json(token))
    } else {
        Err(AuthError::WrongCredentials)
    }
}

fn encode_jwt(user_id: UserID, encoding_key: &EncodingKey) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = Claims {
        exp: (now + TOKEN_DURATION).timestamp() as usize,
        iat: now.timestamp() as usize,
        user_id,
    };

    encode(&Header::default(), &claims, encoding_key).map_err(|_| AuthError::TokenCreation)
}

fn decode_jwt(jwt_token: &str, decoding_key: &DecodingKey) -> Result<TokenData<Claims>, AuthError> {
    decode(jwt_token, decoding_key, &Validation::default()).map_err(|_| AuthError::InvalidToken)
}

#[cfg(test)]
mod auth_tests {
    use std::str::FromStr;

    use axum::{
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use axum_test::TestServer;
    use email_address::EmailAddress;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        auth::{self, Claims},
        state::AuthConfig,
        stores::{sqlite::create_app_state, sqlite::SqlAppState, UserStore},
    };

    fn get_test_app_state() -> SqlAppState {
        let db_connection =
            Connection::open_in_memory().expect("Could not open database in memory.");

        create_app_state(db_connection, "foobar").expect("Could not create app state.")
    }

    fn insert_test_user(state: &mut SqlAppState, email: &str, password: &str) {
        let password_hash = bcrypt::hash(password, 4).unwrap();

        state
            .user_store
            .create(
                "Test User",
                &EmailAddress::from_str(email).unwrap(),
                &password_hash,
            )
            .expect("Could not create test user.");
    }

    #[test]
    fn decode_jwt_gives_back_user_id() {
        let auth_config = AuthConfig::new("foobar");

        let jwt = auth::encode_jwt(42, &auth_config.encoding_key).unwrap();
        let claims = auth::decode_jwt(&jwt, &auth_config.decoding_key)
            .unwrap()
            .claims;

        assert_eq!(claims.user_id, 42);
    }

    #[tokio::test]
    async fn log_in_succeeds_with_valid_credentials() {
        let mut app_state = get_test_app_state();
        insert_test_user(&mut app_state, "foo@bar.baz", "averysafeandsecurepassword");

        let app = Router::new()
            .route("/login", post(auth::log_in))
            .with_state(app_state);

        let server = TestServer::new(app);

        server
            .post("/login")
            .content_type("application/json")
            .json(&json!({
                "email": "foo@bar.baz",
                "password": "averysafeandsecurepassword",
            }))
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn log_in_fails_with_wrong_password() {
        let mut app_state = get_test_app_state();
        insert_test_user(&mut app_state, "foo@bar.baz", "averysafeandsecurepassword");

        let app = Router::new()
            .route("/login", post(auth::log_in))
            .with_state(app_state);

        let server = TestServer::new(app);

        server
            .post("/login")
            .content_type("application/json")
            .json(&json!({
                "email": "foo@bar.baz",
                "password": "definitelyNotTheCorrectPassword",
            }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn log_in_fails_with_unknown_email() {
        let app = Router::new()
            .route("/login", post(auth::log_in))
            .with_state(get_test_app_state());

        let server = TestServer::new(app);

        server
            .post("/login")
            .content_type("application/json")
            .json(&json!({
                "email": "wrongemail@gmail.com",
                "password": "definitelyNotTheCorrectPassword",
            }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    async fn handler_with_auth(claims: Claims) -> Json<i64> {
        Json(claims.user_id)
    }

    #[tokio::test]
    async fn get_protected_route_with_valid_jwt() {
        let mut app_state = get_test_app_state();
        insert_test_user(&mut app_state, "foo@bar.baz", "averysafeandsecurepassword");

        let app = Router::new()
            .route("/login", post(auth::log_in))
            .route("/protected", get(handler_with_auth))
            .with_state(app_state);

        let server = TestServer::new(app);

        let response = server
            .post("/login")
            .content_type("application/json")
            .json(&json!({
                "email": "foo@bar.baz",
                "password": "averysafeandsecurepassword",
            }))
            .await;

        response.assert_status_ok();

        let token = response.json::<String>();

        server
            .get("/protected")
            .authorization_bearer(token)
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn get_protected_route_with_missing_header() {
        let app = Router::new()
            .route("/protected", get(handler_with_auth))
            .with_state(get_test_app_state());

        let server = TestServer::new(app);

        server
            .get("/protected")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_protected_route_with_garbage_token() {
        let app = Router::new()
            .route("/protected", get(handler_with_auth))
            .with_state(get_test_app_state());

        let server = TestServer::new(app);

        server
            .get("/protected")
            .authorization_bearer("notarealtoken")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
