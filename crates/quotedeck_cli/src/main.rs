//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `quotedeck_core` wiring.
//! - Exercise the full flow once: seed load, random pick, mock sync cycle.

use quotedeck_core::db::open_db_in_memory;
use quotedeck_core::{
    MockRemoteSource, QuoteService, QuoteStore, RemoteItem, SqliteKvStore, SyncOutcome,
    SyncService, ALL_CATEGORIES,
};

fn main() {
    println!("quotedeck_core version={}", quotedeck_core::core_version());

    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open in-memory db: {err}");
            std::process::exit(1);
        }
    };

    let store = match QuoteStore::open(SqliteKvStore::new(&conn)) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("failed to load quote store: {err}");
            std::process::exit(1);
        }
    };

    let remote = MockRemoteSource::new(vec![RemoteItem::new(
        "Talk is cheap. Show me the code.",
    )]);
    let mut service = QuoteService::new(store, SyncService::new(remote));

    match service.random_quote(ALL_CATEGORIES) {
        Some(quote) => println!("random quote [{}]: {}", quote.category, quote.text),
        None => println!("no quote available"),
    }

    match service.sync_now() {
        Ok(SyncOutcome::Completed(report)) => println!(
            "sync ok: fetched={} updated={} appended={}",
            report.fetched, report.updated, report.appended
        ),
        Ok(SyncOutcome::Skipped) => println!("sync skipped: already in flight"),
        Err(err) => eprintln!("sync failed: {err}"),
    }

    println!("total quotes={}", service.quotes().len());
}
