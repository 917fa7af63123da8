//! Scratch databases for fixture store tests

use fixtures::FixtureStore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rusqlite::Connection;
use std::path::PathBuf;
use tempfile::TempDir;

/// Application schema as deployed
pub const SCHEMA: &str = r#"
  CREATE TABLE IF NOT EXISTS members (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    member_number TEXT UNIQUE,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT,
    address_street TEXT,
    address_city TEXT,
    address_state TEXT,
    address_zip TEXT,
    membership_year INTEGER,
    membership_type TEXT NOT NULL DEFAULT 'individual' CHECK(membership_type IN ('individual','family')),
    primary_member_id INTEGER REFERENCES members(id) ON DELETE CASCADE,
    status TEXT NOT NULL DEFAULT 'pending' CHECK(status IN ('pending','active','expired','cancelled')),
    notes TEXT,
    role TEXT CHECK(role IN ('super_admin','editor')),
    otp_hash TEXT,
    otp_expires_at TEXT,
    otp_attempts INTEGER NOT NULL DEFAULT 0,
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now'))
  );

  CREATE TABLE IF NOT EXISTS payments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    member_id INTEGER NOT NULL REFERENCES members(id) ON DELETE CASCADE,
    stripe_session_id TEXT,
    stripe_payment_intent TEXT,
    amount_cents INTEGER NOT NULL,
    currency TEXT NOT NULL DEFAULT 'usd',
    status TEXT NOT NULL DEFAULT 'pending' CHECK(status IN ('pending','completed','failed','refunded')),
    description TEXT,
    payment_method TEXT NOT NULL DEFAULT 'stripe',
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now'))
  );

  CREATE TABLE IF NOT EXISTS announcements (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    body TEXT,
    image_path TEXT,
    link_url TEXT,
    link_text TEXT,
    is_published INTEGER NOT NULL DEFAULT 1,
    sort_order INTEGER NOT NULL DEFAULT 0,
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now'))
  );

  CREATE TABLE IF NOT EXISTS gallery_images (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    filename TEXT NOT NULL,
    alt_text TEXT,
    caption TEXT,
    sort_order INTEGER NOT NULL DEFAULT 0,
    is_visible INTEGER NOT NULL DEFAULT 1,
    created_at TEXT DEFAULT (datetime('now'))
  );

  CREATE TABLE IF NOT EXISTS bios (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    role TEXT,
    bio_text TEXT,
    photo_path TEXT,
    sort_order INTEGER NOT NULL DEFAULT 0,
    is_visible INTEGER NOT NULL DEFAULT 1,
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now'))
  );

  CREATE TABLE IF NOT EXISTS site_settings (
    key TEXT PRIMARY KEY,
    value TEXT,
    updated_at TEXT DEFAULT (datetime('now'))
  );

  CREATE TABLE IF NOT EXISTS emails_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    to_email TEXT NOT NULL,
    to_name TEXT,
    subject TEXT,
    body_html TEXT,
    email_type TEXT CHECK(email_type IN ('welcome','payment_confirmation','card_delivery','blast','contact','otp')),
    status TEXT NOT NULL DEFAULT 'sent',
    error TEXT,
    member_id INTEGER REFERENCES members(id) ON DELETE SET NULL,
    created_at TEXT DEFAULT (datetime('now'))
  );

  CREATE TABLE IF NOT EXISTS membership_cards (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    member_id INTEGER NOT NULL REFERENCES members(id) ON DELETE CASCADE,
    pdf_path TEXT,
    png_path TEXT,
    year INTEGER,
    created_at TEXT DEFAULT (datetime('now'))
  );
"#;

pub const TEST_RNG_SEED: u64 = 0x5eed;

/// A schema-initialised database file in its own temporary directory
pub struct TestDatabase {
    _dir: TempDir,
    path: PathBuf,
}

impl TestDatabase {
    /// Create `data/ysh-robot.db` under a fresh temporary project root
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(dir.path().join("data")).expect("create data dir");
        let path = dir.path().join("data").join("ysh-robot.db");

        let conn = Connection::open(&path).expect("create database file");
        conn.execute_batch(SCHEMA).expect("apply schema");
        drop(conn);

        Self { _dir: dir, path }
    }

    /// Connected store with a deterministic random source
    pub fn store(&self) -> FixtureStore {
        self.store_with_seed(TEST_RNG_SEED)
    }

    pub fn store_with_seed(&self, seed: u64) -> FixtureStore {
        let mut store = FixtureStore::new(&self.path).with_rng(StdRng::seed_from_u64(seed));
        store.connect().expect("connect to test database");
        store
    }

    /// Independent connection for inspecting or tampering with the file directly
    pub fn raw_connection(&self) -> Connection {
        Connection::open(&self.path).expect("open raw connection")
    }
}
