//! SQLite persistence for calculation history.
//!
//! Each computed result is stored as one row attributed to an opaque
//! identity. The engine stays decoupled from storage: handlers compute
//! first, then hand the finished values to [`Store::save`].

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::sqlite::SqlitePool;
use sqlx::Row;

use crate::domain::CalculationInput;
use crate::macros::MacroBreakdown;

/// A finished computation waiting to be persisted.
pub struct NewCalculation<'a> {
    pub input: &'a CalculationInput,
    pub bmr: f64,
    pub tdee: f64,
    pub target_calories: f64,
    pub macros: &'a MacroBreakdown,
}

/// One persisted calculation, as returned by history queries.
#[derive(Debug, Clone, Serialize)]
pub struct CalculationRecord {
    pub id: i64,
    /// Assigned by SQLite at insert time (UTC).
    pub created_at: NaiveDateTime,
    pub gender: String,
    pub age: u32,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub activity: String,
    pub goal: String,
    pub bmr: f64,
    pub tdee: f64,
    pub target_calories: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
    pub protein_percent: f64,
    pub fat_percent: f64,
    pub carbs_percent: f64,
}

/// Handle to the calculations database.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Opens (creating if necessary) the database and ensures the schema.
    pub async fn connect(database_url: &str) -> sqlx::Result<Self> {
        // Ask SQLite to create the file on first run; in-memory databases
        // take no extra options
        let options = if database_url.starts_with("sqlite:") && !database_url.contains(":memory:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePool::connect(&options).await?;
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS calculations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                identity TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                gender TEXT NOT NULL,
                age INTEGER NOT NULL,
                weight_kg REAL NOT NULL,
                height_cm REAL NOT NULL,
                activity TEXT NOT NULL,
                goal TEXT NOT NULL,
                bmr REAL NOT NULL,
                tdee REAL NOT NULL,
                target_calories REAL NOT NULL,
                protein_g REAL NOT NULL,
                fat_g REAL NOT NULL,
                carbs_g REAL NOT NULL,
                protein_percent REAL NOT NULL,
                fat_percent REAL NOT NULL,
                carbs_percent REAL NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_calculations_identity ON calculations(identity)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Persists a calculation for an identity, returning the new record id.
    pub async fn save(&self, identity: &str, calc: &NewCalculation<'_>) -> sqlx::Result<i64> {
        let input = calc.input;
        let result = sqlx::query(
            r#"
            INSERT INTO calculations
                (identity, gender, age, weight_kg, height_cm, activity, goal,
                 bmr, tdee, target_calories,
                 protein_g, fat_g, carbs_g,
                 protein_percent, fat_percent, carbs_percent)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(identity)
        .bind(input.gender.as_label())
        .bind(input.age)
        .bind(input.weight_kg)
        .bind(input.height_cm)
        .bind(input.activity.as_label())
        .bind(input.goal.as_label())
        .bind(calc.bmr)
        .bind(calc.tdee)
        .bind(calc.target_calories)
        .bind(calc.macros.protein.grams)
        .bind(calc.macros.fat.grams)
        .bind(calc.macros.carbs.grams)
        .bind(calc.macros.protein.percent)
        .bind(calc.macros.fat.percent)
        .bind(calc.macros.carbs.percent)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Returns all records for an identity, newest first.
    pub async fn history(&self, identity: &str) -> sqlx::Result<Vec<CalculationRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, created_at, gender, age, weight_kg, height_cm, activity, goal,
                   bmr, tdee, target_calories,
                   protein_g, fat_g, carbs_g,
                   protein_percent, fat_percent, carbs_percent
            FROM calculations
            WHERE identity = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(identity)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(record_from_row).collect()
    }

    /// Deletes a record iff it belongs to the identity.
    ///
    /// Returns false when the row does not exist or is owned by a
    /// different identity.
    pub async fn delete(&self, identity: &str, record_id: i64) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM calculations WHERE id = ? AND identity = ?")
            .bind(record_id)
            .bind(identity)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn record_from_row(row: &sqlx::sqlite::SqliteRow) -> sqlx::Result<CalculationRecord> {
    Ok(CalculationRecord {
        id: row.try_get("id")?,
        created_at: row.try_get("created_at")?,
        gender: row.try_get("gender")?,
        age: row.try_get("age")?,
        weight_kg: row.try_get("weight_kg")?,
        height_cm: row.try_get("height_cm")?,
        activity: row.try_get("activity")?,
        goal: row.try_get("goal")?,
        bmr: row.try_get("bmr")?,
        tdee: row.try_get("tdee")?,
        target_calories: row.try_get("target_calories")?,
        protein_g: row.try_get("protein_g")?,
        fat_g: row.try_get("fat_g")?,
        carbs_g: row.try_get("carbs_g")?,
        protein_percent: row.try_get("protein_percent")?,
        fat_percent: row.try_get("fat_percent")?,
        carbs_percent: row.try_get("carbs_percent")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActivityLevel, Gender, Goal};
    use crate::macros::calculate_macros;

    async fn test_store() -> Store {
        Store::connect("sqlite::memory:").await.unwrap()
    }

    fn sample_input() -> CalculationInput {
        CalculationInput {
            gender: Gender::Male,
            age: 30,
            weight_kg: 80.0,
            height_cm: 180.0,
            activity: ActivityLevel::Moderate,
            goal: Goal::Gain,
        }
    }

    async fn save_sample(store: &Store, identity: &str) -> i64 {
        let input = sample_input();
        let macros = calculate_macros(3259.0, input.goal, input.weight_kg).unwrap();
        store
            .save(
                identity,
                &NewCalculation {
                    input: &input,
                    bmr: 1780.0,
                    tdee: 2759.0,
                    target_calories: 3259.0,
                    macros: &macros,
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_save_and_history_roundtrip() {
        let store = test_store().await;
        let id = save_sample(&store, "alice").await;

        let history = store.history("alice").await.unwrap();
        assert_eq!(history.len(), 1);

        let record = &history[0];
        assert_eq!(record.id, id);
        assert_eq!(record.gender, "male");
        assert_eq!(record.age, 30);
        assert_eq!(record.activity, "moderate");
        assert_eq!(record.goal, "gain");
        assert_eq!(record.bmr, 1780.0);
        assert_eq!(record.tdee, 2759.0);
        assert_eq!(record.target_calories, 3259.0);
        assert_eq!(record.protein_g, 176.0);
        assert_eq!(record.fat_g, 90.5);
        assert_eq!(record.carbs_g, 435.1);
    }

    #[tokio::test]
    async fn test_history_newest_first() {
        let store = test_store().await;
        let first = save_sample(&store, "alice").await;
        let second = save_sample(&store, "alice").await;

        let history = store.history("alice").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, second);
        assert_eq!(history[1].id, first);
    }

    #[tokio::test]
    async fn test_history_scoped_to_identity() {
        let store = test_store().await;
        save_sample(&store, "alice").await;

        assert!(store.history("bob").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_scoped_to_identity() {
        let store = test_store().await;
        let id = save_sample(&store, "alice").await;

        // A different identity cannot delete the record
        assert!(!store.delete("bob", id).await.unwrap());
        assert_eq!(store.history("alice").await.unwrap().len(), 1);

        // The owner can, exactly once
        assert!(store.delete("alice", id).await.unwrap());
        assert!(store.history("alice").await.unwrap().is_empty());
        assert!(!store.delete("alice", id).await.unwrap());
    }
}
