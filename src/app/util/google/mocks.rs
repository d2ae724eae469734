use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Form, Json, Router,
};
use openssl::{
    pkey::{PKey, Private},
    rsa::Rsa,
};
use serde_json::json;

use super::{auth::GoogleAuth, service_account::ServiceAccount};
use crate::app::util::test_server;

pub const ACCESS_TOKEN: &str = "ya29.test-token";

lazy_static! {
    static ref SIGNING_KEY: PKey<Private> =
        PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap();
}

pub fn private_key_pem() -> String {
    String::from_utf8(SIGNING_KEY.private_key_to_pem_pkcs8().unwrap()).unwrap()
}

pub fn public_key_pem() -> Vec<u8> {
    SIGNING_KEY.public_key_to_pem().unwrap()
}

/// OAuth token endpoint that records every grant it receives.
#[derive(Clone)]
pub struct TokenEndpoint {
    pub status: StatusCode,
    pub logins: Arc<AtomicUsize>,
    pub grant: Arc<Mutex<Option<HashMap<String, String>>>>,
}

impl TokenEndpoint {
    pub fn logins(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }
}

async fn token(
    State(endpoint): State<TokenEndpoint>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    endpoint.logins.fetch_add(1, Ordering::SeqCst);
    *endpoint.grant.lock().unwrap() = Some(form);

    match endpoint.status {
        StatusCode::OK => Json(json!({
            "access_token": ACCESS_TOKEN,
            "expires_in": 3599,
            "token_type": "Bearer"
        }))
        .into_response(),
        status => (status, Json(json!({ "error": "invalid_grant" }))).into_response(),
    }
}

/// Starts a token endpoint answering `status` and returns it with its url.
pub fn spawn_token_endpoint(status: StatusCode) -> (TokenEndpoint, String) {
    let endpoint = TokenEndpoint {
        status,
        logins: Arc::new(AtomicUsize::new(0)),
        grant: Arc::new(Mutex::new(None)),
    };

    let url = test_server::spawn(
        Router::new()
            .route("/token", post(token))
            .with_state(endpoint.clone()),
    );

    (endpoint, format!("{}/token", url))
}

pub fn service_account(project_id: &str, token_uri: &str) -> ServiceAccount {
    ServiceAccount {
        project_id: project_id.to_string(),
        client_email: format!("worker@{}.iam.gserviceaccount.com", project_id),
        private_key: private_key_pem(),
        token_uri: token_uri.to_string(),
    }
}

/// Auth for `project_id` backed by a fresh token endpoint that accepts grants.
pub fn google_auth(project_id: &str, scope: &str) -> (GoogleAuth, TokenEndpoint) {
    let (endpoint, token_uri) = spawn_token_endpoint(StatusCode::OK);
    let auth = GoogleAuth::new(
        service_account(project_id, &token_uri),
        scope,
        reqwest::Client::new(),
    );

    (auth, endpoint)
}
