use std::{env, net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};

#[macro_use]
extern crate lazy_static;

use axum::{
    error_handling::HandleErrorLayer,
    routing::{get, post},
    BoxError, Router,
};
use tower::{buffer::BufferLayer, limit::ConcurrencyLimitLayer, ServiceBuilder};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::{
    app::{
        envy::Envy,
        errors::DefaultApiError,
        util::{
            firestore::client::FirestoreClient,
            google::{
                auth::{GoogleAuth, SCOPE_DATASTORE, SCOPE_DEVSTORAGE_FULL_CONTROL},
                service_account::ServiceAccount,
            },
        },
    },
    media::{
        apis::{
            cog::{service::CogClient, supervisor},
            leonardo::service::LeonardoClient,
        },
        service::ArtifactProcessor,
        thumbnail::FfmpegThumbnailer,
        util::firebase_storage::service::FirebaseStorage,
    },
    videos::service::VideoPipeline,
};

mod app;
mod media;
mod videos;

const READY_CHECK_INTERVAL: Duration = Duration::from_millis(200);
const READY_SETTLE: Duration = Duration::from_secs(1);
const MAX_BODY_SIZE: usize = 8 * 1024 * 1024;

pub struct AppState {
    pub pipeline: VideoPipeline,
}

#[tokio::main]
async fn main() {
    // tracing
    tracing_subscriber::fmt::init();

    // environment
    let app_env = env::var("APP_ENV").unwrap_or("development".to_string());
    let _ = dotenvy::from_filename(format!(".env.{}", app_env));
    let envy = match envy::from_env::<Envy>() {
        Ok(config) => config,
        Err(e) => panic!("{:#?}", e),
    };

    // credentials
    let storage_account = match ServiceAccount::from_json(&envy.firebase_key) {
        Ok(account) => account,
        Err(e) => panic!("FIREBASE_KEY is not a service account: {:#?}", e),
    };
    let database_account = match ServiceAccount::from_json(&envy.sadtalker_firebase_key) {
        Ok(account) => account,
        Err(e) => panic!("SADTALKER_FIREBASE_KEY is not a service account: {:#?}", e),
    };

    let http_client = reqwest::Client::new();

    let storage = FirebaseStorage::new(
        GoogleAuth::new(
            storage_account,
            SCOPE_DEVSTORAGE_FULL_CONTROL,
            http_client.clone(),
        ),
        http_client.clone(),
        envy.storage_api_url(),
        &envy.storage_bucket,
    );
    let records = FirestoreClient::new(
        GoogleAuth::new(database_account, SCOPE_DATASTORE, http_client.clone()),
        http_client.clone(),
        envy.firestore_api_url(),
        envy.firestore_collection(),
    );

    // inference server
    let mut child = match supervisor::spawn_server(envy.cog_command()) {
        Ok(child) => child,
        Err(e) => panic!("failed to start inference server: {:#?}", e),
    };

    let cog = CogClient::new(http_client.clone(), envy.cog_url());
    if let Err(e) = cog
        .await_ready(READY_CHECK_INTERVAL, envy.cog_ready_max_wait(), READY_SETTLE)
        .await
    {
        panic!("{}", e);
    }

    tracing::info!("inference server is ready");

    let pipeline = VideoPipeline {
        leonardo: LeonardoClient::new(
            http_client,
            envy.leonardo_api_url(),
            &envy.leonard_api_key,
            envy.generation_poll_interval(),
            envy.generation_max_wait(),
        ),
        cog,
        processor: ArtifactProcessor {
            work_dir: PathBuf::from(envy.work_dir()),
            app_folder: envy.app_folder().to_string(),
            thumbnailer: Arc::new(FfmpegThumbnailer::default()),
            store: Arc::new(storage),
        },
        records: Arc::new(records),
    };

    let state = Arc::new(AppState { pipeline });

    // app
    let app = Router::new()
        .route("/", get(app::controller::get_root))
        .route("/runsync", post(app::controller::run_sync))
        .with_state(state)
        // layers
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|err: BoxError| async move {
                    tracing::warn!("request rejected: {}", err);
                    DefaultApiError::Overloaded.value()
                }))
                .layer(BufferLayer::new(1024))
                .layer(ConcurrencyLimitLayer::new(1)),
        );

    let addr = SocketAddr::from(([0, 0, 0, 0], envy.port()));
    tracing::info!("listening on {}", addr);

    let server = axum::Server::bind(&addr).serve(app.into_make_service());

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!(%e);
            }
        }
        status = child.wait() => {
            tracing::error!("inference server exited: {:?}", status);
            std::process::exit(1);
        }
    }
}
