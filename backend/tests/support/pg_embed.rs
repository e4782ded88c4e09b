//! Embedded PostgreSQL for the opt-in Diesel adapter tests.
//!
//! Set `RUN_PG_EMBEDDED=1` to run them. `pg-embed-setup-unpriv` installs into
//! `/var/tmp` by default, so when `PG_RUNTIME_DIR` or `PG_DATA_DIR` is unset
//! both are pointed under the target directory for the bootstrap call.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use uuid::Uuid;

static BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY_MS: u64 = 500;

/// True when `RUN_PG_EMBEDDED=1`.
pub fn pg_embedded_enabled() -> bool {
    std::env::var("RUN_PG_EMBEDDED").as_deref() == Ok("1")
}

/// A running cluster plus one empty database created for a single test.
pub struct TestDatabase {
    _cluster: TestCluster,
    url: String,
}

impl TestDatabase {
    pub fn url(&self) -> &str {
        &self.url
    }
}

fn target_dir() -> PathBuf {
    std::env::var_os("CARGO_TARGET_DIR").map_or_else(
        || {
            PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("..")
                .join("target")
        },
        PathBuf::from,
    )
}

fn is_transient(err: &str) -> bool {
    let err = err.to_lowercase();
    ["connection reset", "timed out", "timeout", "dns error", "temporarily unavailable"]
        .iter()
        .any(|pattern| err.contains(pattern))
}

fn start_cluster() -> Result<TestCluster, String> {
    let _bootstrap = BOOTSTRAP_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let needs_override =
        std::env::var_os("PG_RUNTIME_DIR").is_none() || std::env::var_os("PG_DATA_DIR").is_none();
    let _env = if needs_override {
        let base = target_dir()
            .join("pg-embed")
            .join(format!("{}-{}", std::process::id(), Uuid::new_v4()));
        let runtime_dir = base.join("install");
        let data_dir = base.join("data");
        std::fs::create_dir_all(&runtime_dir).map_err(|err| err.to_string())?;
        std::fs::create_dir_all(&data_dir).map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            ("PG_RUNTIME_DIR", Some(runtime_dir.to_string_lossy().into_owned())),
            ("PG_DATA_DIR", Some(data_dir.to_string_lossy().into_owned())),
        ]))
    } else {
        None
    };

    let mut last_error = String::new();
    for attempt in 0..=MAX_RETRIES {
        match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => {
                last_error = format!("{err:?}");
                if attempt == MAX_RETRIES || !is_transient(&last_error) {
                    break;
                }
                std::thread::sleep(Duration::from_millis(RETRY_DELAY_MS * (1 << attempt)));
            }
        }
    }
    Err(last_error)
}

fn format_postgres_error(error: &postgres::Error) -> String {
    error.as_db_error().map_or_else(
        || error.to_string(),
        |db| format!("postgres error {:?}: {}", db.code(), db.message()),
    )
}

/// Start a cluster and create a uniquely named, empty database on it.
///
/// Call this outside any Tokio runtime: the `postgres` client blocks.
pub fn fresh_database() -> Result<TestDatabase, String> {
    let cluster = start_cluster()?;
    let admin_url = cluster.connection().database_url("postgres");
    let name = format!("complaints_{}", Uuid::new_v4().simple());

    let mut client =
        Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("CREATE DATABASE \"{name}\""))
        .map_err(|err| format_postgres_error(&err))?;

    let url = cluster.connection().database_url(&name);
    Ok(TestDatabase {
        _cluster: cluster,
        url,
    })
}
