//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskmaster_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use taskmaster_core::db::open_db_in_memory;
use taskmaster_core::{SqliteTaskStore, TaskManager};

fn main() {
    // Why: keep a tiny CLI probe to validate core crate wiring independently
    // from the host application shell.
    println!("taskmaster_core version={}", taskmaster_core::core_version());

    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("taskmaster_core db_open failed: {err}");
            std::process::exit(1);
        }
    };

    let store = match SqliteTaskStore::try_new(&conn) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("taskmaster_core store init failed: {err}");
            std::process::exit(1);
        }
    };

    let manager = TaskManager::new(store);
    println!("taskmaster_core tasks={}", manager.total_count());
}
