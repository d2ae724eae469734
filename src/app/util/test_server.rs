use std::net::TcpListener;

use axum::Router;

/// Serves `app` on an ephemeral local port and returns its base url.
pub fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(app.into_make_service())
            .await
            .unwrap();
    });

    format!("http://{}", addr)
}
