use std::path::PathBuf;

use booking_app::{AppState, setup_db};
use http_api::{HttpState, generate_feed_token};

#[tokio::main]
async fn main() {
    let db_path = std::env::var_os("BOOKING_DB")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("booking.sqlite3"));
    if let Err(err) = setup_db(&db_path) {
        eprintln!("failed to initialize database: {}", err);
        std::process::exit(1);
    }

    let addr =
        std::env::var("BOOKING_ADDR").unwrap_or_else(|_| "127.0.0.1:3030".to_string());
    let feed_token = std::env::var("BOOKING_FEED_TOKEN").unwrap_or_else(|_| {
        let token = generate_feed_token();
        eprintln!("BOOKING_FEED_TOKEN not set; generated feed token: {}", token);
        token
    });

    let state = AppState::new(db_path);
    let app = http_api::router(HttpState::new(state, feed_token));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("bind server");
    println!("listening on http://{}", addr);
    axum::serve(listener, app).await.expect("serve");
}
