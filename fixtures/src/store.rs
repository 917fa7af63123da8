//! SQLite fixture store

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, params};

use shared::config::DEFAULT_MEMBERSHIP_YEAR;
use shared::{ComponentId, HarnessConfig, component_debug, component_info, component_warn};

use crate::defaults::{DEFAULT_SETTINGS, OTP_CODE, RESET_ORDER, member_number, placeholder_email};
use crate::error::{FixtureError, FixtureResult};
use crate::row::QueryRow;
use crate::seeds::{AdminSeed, MemberSeed, PaymentSeed};

const COMPONENT: ComponentId = ComponentId::Fixtures;

/// Owns the connection to the end-to-end database and knows how to put it
/// into known states.
pub struct FixtureStore {
    db_path: PathBuf,
    conn: Option<Connection>,
    rng: Box<dyn RngCore + Send>,
    membership_year: i32,
}

impl std::fmt::Debug for FixtureStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixtureStore")
            .field("db_path", &self.db_path)
            .field("connected", &self.conn.is_some())
            .field("membership_year", &self.membership_year)
            .finish_non_exhaustive()
    }
}

impl FixtureStore {
    /// Store for the database at `db_path`; nothing is opened until [`connect`](Self::connect)
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            conn: None,
            rng: Box::new(StdRng::from_entropy()),
            membership_year: DEFAULT_MEMBERSHIP_YEAR,
        }
    }

    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::new(&config.db_path).with_membership_year(config.membership_year)
    }

    /// Replace the randomness source used for placeholder data
    pub fn with_rng<R>(mut self, rng: R) -> Self
    where
        R: RngCore + Send + 'static,
    {
        self.rng = Box::new(rng);
        self
    }

    pub fn with_membership_year(mut self, year: i32) -> Self {
        self.membership_year = year;
        self
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn membership_year(&self) -> i32 {
        self.membership_year
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Email of the administrator every reset leaves behind
    pub fn admin_email(&self) -> &'static str {
        crate::defaults::ADMIN_EMAIL
    }

    /// One-time code accepted by the server in test mode
    pub fn otp_code(&self) -> &'static str {
        OTP_CODE
    }

    /// Open the database with WAL journaling and foreign keys enforced.
    ///
    /// The file must already exist. Does nothing when already connected.
    pub fn connect(&mut self) -> FixtureResult<()> {
        if self.conn.is_some() {
            return Ok(());
        }

        let conn = open_connection(&self.db_path).map_err(|source| FixtureError::Connection {
            path: self.db_path.clone(),
            source,
        })?;
        self.conn = Some(conn);

        component_info!(COMPONENT, "🔌 Connected to fixture database {}", self.db_path.display());
        Ok(())
    }

    /// Release the connection; does nothing when already closed
    pub fn close(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err((_, e)) = conn.close() {
                component_warn!(COMPONENT, "⚠️ Error while closing fixture database: {}", e);
            }
            component_debug!(COMPONENT, "Closed fixture database {}", self.db_path.display());
        }
    }

    /// Wipe every fixture table and restore the baseline (default settings plus one admin).
    ///
    /// Runs in a single transaction, so on error nothing has changed.
    pub fn reset(&mut self) -> FixtureResult<()> {
        let conn = self.connection_mut()?;
        let tx = conn.transaction()?;

        for table in RESET_ORDER {
            tx.execute(&format!("DELETE FROM {table}"), [])?;
        }
        insert_settings(&tx)?;
        let admin_id = insert_admin(&tx, &AdminSeed::default())?;

        tx.commit()?;

        component_info!(COMPONENT, "🧹 Fixture database reset (admin id {})", admin_id);
        Ok(())
    }

    /// Upsert the default site settings
    pub fn seed_settings(&mut self) -> FixtureResult<()> {
        let conn = self.connection_mut()?;
        let tx = conn.transaction()?;
        insert_settings(&tx)?;
        tx.commit()?;
        Ok(())
    }

    /// Insert one administrator and return its row id
    pub fn seed_admin(&mut self, seed: AdminSeed) -> FixtureResult<i64> {
        let conn = self.connection()?;
        let id = insert_admin(conn, &seed)?;

        component_debug!(COMPONENT, "Seeded admin {} ({}) id {}", seed.resolved_email(), seed.role, id);
        Ok(id)
    }

    /// Insert `count` published announcements numbered from 1
    pub fn seed_announcements(&mut self, count: u32) -> FixtureResult<Vec<i64>> {
        self.seed_numbered("announcements", count, |conn, i| {
            conn.execute(
                "INSERT INTO announcements (title, body, is_published, sort_order) VALUES (?1, ?2, 1, ?3)",
                params![format!("Test Announcement {i}"), format!("Body of test announcement {i}"), i],
            )
        })
    }

    /// Insert `count` visible board bios numbered from 1
    pub fn seed_bios(&mut self, count: u32) -> FixtureResult<Vec<i64>> {
        self.seed_numbered("bios", count, |conn, i| {
            conn.execute(
                "INSERT INTO bios (name, role, bio_text, sort_order, is_visible) VALUES (?1, ?2, ?3, ?4, 1)",
                params![format!("Test Person {i}"), format!("Role {i}"), format!("Bio text for person {i}"), i],
            )
        })
    }

    /// Insert `count` visible gallery images numbered from 1
    pub fn seed_gallery(&mut self, count: u32) -> FixtureResult<Vec<i64>> {
        self.seed_numbered("gallery_images", count, |conn, i| {
            conn.execute(
                "INSERT INTO gallery_images (filename, alt_text, sort_order, is_visible) VALUES (?1, ?2, ?3, 1)",
                params![format!("/img/test_gallery_{i}.jpg"), format!("Test gallery {i}"), i],
            )
        })
    }

    /// Insert one member and return its row id.
    ///
    /// A missing email becomes `test<NNNNN>@example.com`; a missing member
    /// number is derived from the current member count, e.g. `YSH-2026-0002`.
    pub fn seed_member(&mut self, seed: MemberSeed) -> FixtureResult<i64> {
        let email = match seed.email {
            Some(ref email) => email.clone(),
            None => placeholder_email(self.rng.gen_range(10000..=99999)),
        };
        let year = seed.membership_year.unwrap_or(self.membership_year);

        let conn = self.connection()?;
        let number = match seed.member_number {
            Some(ref number) => number.clone(),
            None => {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM members", [], |row| row.get(0))?;
                member_number(year, count + 1)
            }
        };

        conn.execute(
            "INSERT INTO members
               (member_number, first_name, last_name, email, phone,
                address_street, address_city, address_state, address_zip,
                membership_year, status, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                number,
                seed.first_name,
                seed.last_name,
                email,
                seed.phone,
                seed.address_street,
                seed.address_city,
                seed.address_state,
                seed.address_zip,
                year,
                seed.status.as_str(),
                seed.notes,
            ],
        )?;
        let id = conn.last_insert_rowid();

        component_debug!(COMPONENT, "Seeded member {} <{}> id {}", number, email, id);
        Ok(id)
    }

    /// Insert a payment for an existing member and return its row id
    pub fn seed_payment(&mut self, member_id: i64, seed: PaymentSeed) -> FixtureResult<i64> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO payments
               (member_id, amount_cents, currency, status, description, payment_method,
                stripe_session_id, stripe_payment_intent)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                member_id,
                seed.amount_cents,
                seed.currency,
                seed.status,
                seed.description,
                seed.payment_method,
                seed.stripe_session_id,
                seed.stripe_payment_intent,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Insert a membership card row for an existing member
    pub fn seed_card(&mut self, member_id: i64, year: Option<i32>) -> FixtureResult<i64> {
        let year = year.unwrap_or(self.membership_year);
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO membership_cards (member_id, year) VALUES (?1, ?2)",
            params![member_id, year],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Row count of `table`.
    ///
    /// Test-only surface: the name is trusted but must be a plain identifier.
    pub fn row_count(&self, table: &str) -> FixtureResult<i64> {
        if !is_identifier(table) {
            return Err(FixtureError::InvalidTable { name: table.to_string() });
        }

        let conn = self.connection()?;
        let count = conn.query_row(&format!("SELECT COUNT(*) FROM \"{table}\""), [], |row| row.get(0))?;
        Ok(count)
    }

    /// Run a read-only statement and return every row with columns in statement order
    ///
    /// Transaction control (`BEGIN`, `SAVEPOINT`) counts as read-only to SQLite
    /// but would leave the connection outside autocommit, so it is rolled back
    /// and rejected too.
    pub fn query(&self, sql: &str) -> FixtureResult<Vec<QueryRow>> {
        let conn = self.connection()?;
        let rows = read_rows(conn, sql)?;

        if !conn.is_autocommit() {
            conn.execute_batch("ROLLBACK")?;
            component_warn!(COMPONENT, "⚠️ Rolled back transaction opened by query: {}", sql);
            return Err(FixtureError::NotReadOnly { sql: sql.to_string() });
        }

        Ok(rows)
    }

    fn seed_numbered<F>(&mut self, table: &str, count: u32, insert: F) -> FixtureResult<Vec<i64>>
    where
        F: Fn(&Connection, u32) -> rusqlite::Result<usize>,
    {
        let conn = self.connection_mut()?;
        let tx = conn.transaction()?;

        let mut ids = Vec::with_capacity(count as usize);
        for i in 1..=count {
            insert(&*tx, i)?;
            ids.push(tx.last_insert_rowid());
        }
        tx.commit()?;

        component_debug!(COMPONENT, "Seeded {} rows into {}", count, table);
        Ok(ids)
    }

    fn connection(&self) -> FixtureResult<&Connection> {
        self.conn.as_ref().ok_or(FixtureError::NotConnected)
    }

    fn connection_mut(&mut self) -> FixtureResult<&mut Connection> {
        self.conn.as_mut().ok_or(FixtureError::NotConnected)
    }
}

fn open_connection(path: &Path) -> rusqlite::Result<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(path, flags)?;

    let _mode: String = conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;
    conn.execute("PRAGMA foreign_keys = ON", [])?;
    Ok(conn)
}

fn read_rows(conn: &Connection, sql: &str) -> FixtureResult<Vec<QueryRow>> {
    let mut stmt = conn.prepare(sql)?;
    if !stmt.readonly() {
        return Err(FixtureError::NotReadOnly { sql: sql.to_string() });
    }

    let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let rows = stmt
        .query_map([], |row| {
            let mut columns = Vec::with_capacity(names.len());
            for (idx, name) in names.iter().enumerate() {
                columns.push((name.clone(), row.get::<_, Value>(idx)?));
            }
            Ok(QueryRow::new(columns))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn insert_settings(conn: &Connection) -> FixtureResult<()> {
    let mut stmt = conn.prepare(
        "INSERT OR REPLACE INTO site_settings (key, value, updated_at) VALUES (?1, ?2, datetime('now'))",
    )?;
    for (key, value) in DEFAULT_SETTINGS {
        stmt.execute(params![key, value])?;
    }
    Ok(())
}

fn insert_admin(conn: &Connection, seed: &AdminSeed) -> FixtureResult<i64> {
    conn.execute(
        "INSERT INTO members (first_name, last_name, email, role) VALUES (?1, ?2, ?3, ?4)",
        params![
            seed.resolved_first_name(),
            seed.resolved_last_name(),
            seed.resolved_email(),
            seed.role.as_str(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_validation() {
        assert!(is_identifier("members"));
        assert!(is_identifier("gallery_images"));
        assert!(is_identifier("_private"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1members"));
        assert!(!is_identifier("members; DROP TABLE bios"));
        assert!(!is_identifier("\"members\""));
    }

    #[test]
    fn test_operations_require_connection() {
        let mut store = FixtureStore::new("/nonexistent/never-opened.db");

        assert!(!store.is_connected());
        assert!(matches!(store.reset(), Err(FixtureError::NotConnected)));
        assert!(matches!(store.row_count("members"), Err(FixtureError::NotConnected)));
        assert!(matches!(store.seed_admin(AdminSeed::new()), Err(FixtureError::NotConnected)));
    }

    #[test]
    fn test_connect_to_missing_file_is_connection_error() {
        let mut store = FixtureStore::new("/nonexistent/dir/ysh-robot.db");

        let err = store.connect().unwrap_err();
        assert!(matches!(err, FixtureError::Connection { .. }));
        assert!(!err.is_query_error());
        assert!(!store.is_connected());
    }

    #[test]
    fn test_close_without_connect_is_noop() {
        let mut store = FixtureStore::new("/nonexistent/never-opened.db");
        store.close();
        store.close();
        assert!(!store.is_connected());
    }

    #[test]
    fn test_known_login_values() {
        let store = FixtureStore::new("unused.db");
        assert_eq!(store.admin_email(), "admin@test.example.com");
        assert_eq!(store.otp_code(), "000000");
    }
}
