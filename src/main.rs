//! Smartmark — a minimal personal bookmark manager backed by a managed
//! realtime backend.
//!
//! Entry point: with `SMARTMARK_BACKEND_URL` configured, connects to the
//! managed backend; otherwise runs a console walkthrough against the
//! in-memory backend.

use std::sync::Arc;

use smartmark::app::App;
use smartmark::backend::{Backend, HttpBackend, MemoryBackend};
use smartmark::components::bookmark_synchronizer::BookmarkSynchronizer;
use smartmark::components::session_gate::SessionState;
use smartmark::config::{Config, DEFAULT_PROVIDER};

#[tokio::main]
async fn main() {
    let (backend, config): (Arc<dyn Backend>, Config) = match Config::from_env() {
        Ok(config) => (Arc::new(HttpBackend::new(config.clone())), config),
        Err(err) => {
            println!("Smartmark v{} — demo mode ({})", env!("CARGO_PKG_VERSION"), err);
            let config = Config::new("memory://backend", "demo-key", "memory://callback");
            (Arc::new(MemoryBackend::signed_in("demo-account")), config)
        }
    };

    let mut app = App::new(backend, config);
    app.startup().await;

    match app.session.state() {
        SessionState::SignedIn(account_id) => {
            println!("Signed in as {}", account_id);
        }
        _ => {
            println!("Not signed in.");
            if let Some(url) = app.session.begin_sign_in(DEFAULT_PROVIDER) {
                println!("Open to sign in: {}", url);
            }
            return;
        }
    }

    let Some(dashboard) = app.dashboard.as_mut() else {
        return;
    };
    let account_id = dashboard.list.account_id().to_string();

    // Create two bookmarks through the writer; they reach the list via the
    // live feed, not via a direct call.
    for (title, url) in [("Rust", "rust-lang.org"), ("Crates", "https://crates.io")] {
        dashboard.writer.set_title(title);
        dashboard.writer.set_url(url);
        match dashboard.writer.submit(&account_id).await {
            Ok(row) => println!("Added \"{}\" -> {}", row.title, row.url),
            Err(err) => println!("Add failed: {}", err),
        }
    }

    dashboard.list.pump_events();
    print_list(&dashboard.list);

    if let Some(first) = dashboard.list.bookmarks().first().cloned() {
        println!("Deleting \"{}\"", first.title);
        if let Err(err) = dashboard.list.delete(&first.id).await {
            println!("Delete failed: {}", err);
        }
    }

    dashboard.list.pump_events();
    print_list(&dashboard.list);

    app.shutdown();
}

fn print_list(list: &BookmarkSynchronizer) {
    if list.bookmarks().is_empty() {
        println!("No bookmarks yet.");
        return;
    }
    println!("Bookmarks (newest first):");
    for bookmark in list.bookmarks() {
        println!("  {} -> {}", bookmark.title, BookmarkSynchronizer::display_url(bookmark));
    }
}
