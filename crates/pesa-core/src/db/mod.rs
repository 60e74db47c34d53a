//! Database access layer with connection pooling and migrations
//!
//! - `transactions` - tracked transaction inserts and queries

use chrono::{DateTime, NaiveDateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::info;

use crate::error::{Error, Result};

mod transactions;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Environment variable for database encryption key
pub const DB_KEY_ENV: &str = "PESA_DB_KEY";

/// Storage format for timestamps ("YYYY-MM-DD HH:MM:SS", as SQLite writes them)
pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Derive a SQLCipher key from a passphrase using Argon2id
///
/// The salt is fixed so a passphrase maps to the same key wherever the
/// database file is moved.
fn derive_key(passphrase: &str) -> Result<String> {
    use argon2::{password_hash::SaltString, Argon2, PasswordHasher};

    // Changing this invalidates every existing encrypted database
    const APP_SALT: &[u8; 16] = b"pesa-ledger-salt";

    let salt = SaltString::encode_b64(APP_SALT)
        .map_err(|e| Error::Encryption(format!("Failed to create salt: {}", e)))?;

    let hash = Argon2::default()
        .hash_password(passphrase.as_bytes(), &salt)
        .map_err(|e| Error::Encryption(format!("Failed to derive key: {}", e)))?;

    let output = hash
        .hash
        .ok_or_else(|| Error::Encryption("No hash output".to_string()))?;
    Ok(hex::encode(output.as_bytes()))
}

/// Parse SQLite's CURRENT_TIMESTAMP output into a DateTime<Utc>
pub(crate) fn parse_created_at(s: &str) -> DateTime<Utc> {
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
        .map(|dt| dt.and_utc())
        .unwrap_or_else(|_| Utc::now())
}

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    db_path: String,
}

impl Database {
    /// Open an encrypted database
    ///
    /// Requires the `PESA_DB_KEY` environment variable. Use `new_unencrypted()`
    /// for development and tests.
    pub fn new(path: &str) -> Result<Self> {
        match std::env::var(DB_KEY_ENV).ok().filter(|k| !k.is_empty()) {
            Some(key) => Self::new_with_key(path, Some(&key)),
            None => Err(Error::Encryption(format!(
                "Database encryption required. Set {} or pass --no-encrypt \
                (not recommended for production).",
                DB_KEY_ENV
            ))),
        }
    }

    /// Open an unencrypted database
    pub fn new_unencrypted(path: &str) -> Result<Self> {
        Self::new_with_key(path, None)
    }

    /// Open a database with an explicit passphrase (or none)
    pub fn new_with_key(path: &str, passphrase: Option<&str>) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);

        let pool = match passphrase {
            Some(pass) => {
                let key_pragma = format!("PRAGMA key = 'x\"{}\"';", derive_key(pass)?);
                let manager = manager.with_init(move |conn| conn.execute_batch(&key_pragma));
                Pool::builder().max_size(8).build(manager)?
            }
            None => Pool::builder().max_size(8).build(manager)?,
        };

        let db = Self {
            pool,
            db_path: path.to_string(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Create a throwaway database (for testing)
    ///
    /// Backed by a temp file: every pooled connection must see the same data,
    /// which `:memory:` does not give.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "pesa_test_{}_{}.db",
            std::process::id(),
            id
        ));
        let _ = std::fs::remove_file(&path);

        Self::new_unencrypted(&path.to_string_lossy())
    }

    /// Whether SQLCipher encryption is active on this database
    pub fn is_encrypted(&self) -> Result<bool> {
        let conn = self.conn()?;
        let cipher: rusqlite::Result<String> =
            conn.query_row("PRAGMA cipher_version;", [], |row| row.get(0));
        Ok(cipher.is_ok() && std::env::var(DB_KEY_ENV).is_ok())
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- WAL mode: readers don't block the writer
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;

            CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY,
                transaction_id TEXT NOT NULL UNIQUE,     -- M-PESA reference code
                amount REAL NOT NULL,
                recipient TEXT NOT NULL,
                timestamp DATETIME NOT NULL,             -- from the notification, local time
                balance_after REAL NOT NULL,
                fee REAL NOT NULL DEFAULT 0,
                category TEXT NOT NULL,                  -- lower-case
                reason TEXT NOT NULL DEFAULT '',
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category);
            CREATE INDEX IF NOT EXISTS idx_transactions_timestamp ON transactions(timestamp);
            "#,
        )?;

        info!(path = %self.db_path, "Database schema initialized");
        Ok(())
    }
}
