//! SQLite-backed store for users and health profiles
//!
//! One connection guarded by an async mutex. Timestamps are stored as
//! RFC 3339 text, list fields of a profile as JSON arrays.

use crate::store::types::{
    FitnessLevel, Gender, HealthProfile, NewUser, ProfileInput, UpsertAction, User,
    WorkoutEnvironment,
};
use crate::store::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        name TEXT NOT NULL,
        age INTEGER NOT NULL,
        gender TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS health_profiles (
        user_id TEXT PRIMARY KEY REFERENCES users(id),
        height REAL NOT NULL,
        weight REAL NOT NULL,
        body_fat_percentage REAL,
        health_conditions TEXT NOT NULL,
        medications TEXT NOT NULL,
        fitness_level TEXT NOT NULL,
        fitness_goals TEXT NOT NULL,
        preferred_exercises TEXT NOT NULL,
        avoid_exercises TEXT NOT NULL,
        available_equipment TEXT NOT NULL,
        workout_environment TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
";

const USER_COLUMNS: &str =
    "id, email, password_hash, name, age, gender, created_at, updated_at";

/// Persistent store for accounts and health profiles
pub struct Store {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

/// Raw user row before enum and timestamp decoding
struct UserRow {
    id: String,
    email: String,
    password_hash: String,
    name: String,
    age: u32,
    gender: String,
    created_at: String,
    updated_at: String,
}

impl Store {
    /// Create or open a store at the given database path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            ",
        )?;
        conn.execute_batch(SCHEMA)?;

        tracing::debug!(path = ?path, "Opened store");

        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path),
        })
    }

    /// Open a throwaway in-memory store
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Database file path, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Insert a new user. Fails with `DuplicateEmail` if the email is taken.
    pub async fn create_user(&self, new_user: NewUser) -> StoreResult<User> {
        let conn = self.conn.lock().await;

        let exists: Option<String> = conn
            .query_row(
                "SELECT id FROM users WHERE email = ?",
                params![new_user.email],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_some() {
            return Err(StoreError::DuplicateEmail(new_user.email));
        }

        let now = Utc::now();
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email: new_user.email,
            password_hash: new_user.password_hash,
            name: new_user.name,
            age: new_user.age,
            gender: new_user.gender,
            created_at: now,
            updated_at: now,
        };

        conn.execute(
            "INSERT INTO users (id, email, password_hash, name, age, gender, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                user.id,
                user.email,
                user.password_hash,
                user.name,
                user.age,
                user.gender.to_string(),
                user.created_at.to_rfc3339(),
                user.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(user)
    }

    /// Look a user up by email (exact match)
    pub async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let conn = self.conn.lock().await;
        let sql = format!("SELECT {} FROM users WHERE email = ?", USER_COLUMNS);
        let row = conn
            .query_row(&sql, params![email], read_user_row)
            .optional()?;
        row.map(UserRow::into_user).transpose()
    }

    /// Look a user up by id
    pub async fn find_user_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        let conn = self.conn.lock().await;
        let sql = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
        let row = conn.query_row(&sql, params![id], read_user_row).optional()?;
        row.map(UserRow::into_user).transpose()
    }

    /// Number of registered users
    pub async fn user_count(&self) -> StoreResult<u64> {
        let conn = self.conn.lock().await;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Create or replace the health profile of a user.
    ///
    /// On update the original `created_at` is kept.
    pub async fn upsert_profile(
        &self,
        user_id: &str,
        input: ProfileInput,
    ) -> StoreResult<(HealthProfile, UpsertAction)> {
        let conn = self.conn.lock().await;

        let existing_created: Option<String> = conn
            .query_row(
                "SELECT created_at FROM health_profiles WHERE user_id = ?",
                params![user_id],
                |row| row.get(0),
            )
            .optional()?;

        let now = Utc::now();
        let (created_at, action) = match existing_created {
            Some(ts) => (parse_timestamp(&ts)?, UpsertAction::Updated),
            None => (now, UpsertAction::Created),
        };

        conn.execute(
            "INSERT OR REPLACE INTO health_profiles (
                user_id, height, weight, body_fat_percentage, health_conditions, medications,
                fitness_level, fitness_goals, preferred_exercises, avoid_exercises,
                available_equipment, workout_environment, created_at, updated_at
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                user_id,
                input.height,
                input.weight,
                input.body_fat_percentage,
                serde_json::to_string(&input.health_conditions)?,
                serde_json::to_string(&input.medications)?,
                input.fitness_level.to_string(),
                serde_json::to_string(&input.fitness_goals)?,
                serde_json::to_string(&input.preferred_exercises)?,
                serde_json::to_string(&input.avoid_exercises)?,
                serde_json::to_string(&input.available_equipment)?,
                input.workout_environment.to_string(),
                created_at.to_rfc3339(),
                now.to_rfc3339(),
            ],
        )?;

        let profile = HealthProfile {
            user_id: user_id.to_string(),
            fields: input,
            created_at,
            updated_at: now,
        };

        Ok((profile, action))
    }

    /// Fetch the health profile of a user, if one was saved
    pub async fn get_profile(&self, user_id: &str) -> StoreResult<Option<HealthProfile>> {
        let conn = self.conn.lock().await;

        let row = conn
            .query_row(
                "SELECT height, weight, body_fat_percentage, health_conditions, medications,
                        fitness_level, fitness_goals, preferred_exercises, avoid_exercises,
                        available_equipment, workout_environment, created_at, updated_at
                 FROM health_profiles WHERE user_id = ?",
                params![user_id],
                |row| {
                    Ok((
                        row.get::<_, f64>(0)?,
                        row.get::<_, f64>(1)?,
                        row.get::<_, Option<f64>>(2)?,
                        [
                            row.get::<_, String>(3)?,
                            row.get::<_, String>(4)?,
                            row.get::<_, String>(6)?,
                            row.get::<_, String>(7)?,
                            row.get::<_, String>(8)?,
                            row.get::<_, String>(9)?,
                        ],
                        row.get::<_, String>(5)?,
                        row.get::<_, String>(10)?,
                        row.get::<_, String>(11)?,
                        row.get::<_, String>(12)?,
                    ))
                },
            )
            .optional()?;

        let Some((height, weight, body_fat, lists, level, environment, created, updated)) = row
        else {
            return Ok(None);
        };

        let [conditions, medications, goals, preferred, avoid, equipment] = lists;

        let fields = ProfileInput {
            height,
            weight,
            body_fat_percentage: body_fat,
            health_conditions: serde_json::from_str(&conditions)?,
            medications: serde_json::from_str(&medications)?,
            fitness_level: level.parse::<FitnessLevel>().map_err(StoreError::Corruption)?,
            fitness_goals: serde_json::from_str(&goals)?,
            preferred_exercises: serde_json::from_str(&preferred)?,
            avoid_exercises: serde_json::from_str(&avoid)?,
            available_equipment: serde_json::from_str(&equipment)?,
            workout_environment: environment
                .parse::<WorkoutEnvironment>()
                .map_err(StoreError::Corruption)?,
        };

        Ok(Some(HealthProfile {
            user_id: user_id.to_string(),
            fields,
            created_at: parse_timestamp(&created)?,
            updated_at: parse_timestamp(&updated)?,
        }))
    }

    /// Cheap round-trip used by readiness checks
    pub async fn ping(&self) -> bool {
        let conn = self.conn.lock().await;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .is_ok()
    }
}

fn read_user_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        name: row.get(3)?,
        age: row.get(4)?,
        gender: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

impl UserRow {
    fn into_user(self) -> StoreResult<User> {
        let gender: Gender = self.gender.parse().map_err(StoreError::Corruption)?;
        Ok(User {
            id: self.id,
            email: self.email,
            password_hash: self.password_hash,
            name: self.name,
            age: self.age,
            gender,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

fn parse_timestamp(s: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Corruption(format!("bad timestamp {:?}: {}", s, e)))
}
