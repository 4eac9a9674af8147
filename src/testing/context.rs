use crate::testing::*;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use test_context::AsyncTestContext;
pub use test_context::test_context;

/// A private in-memory SQLite database holding a seeded `pages` table.
pub struct MemoryDatabase {
    pub pool: SqlitePool,
}

impl MemoryDatabase {
    /// Rows inserted by `setup`, the one without analytics included.
    pub const SEEDED_PAGES: usize = 4;

    const SCHEMA: &'static str = "CREATE TABLE pages (id TEXT PRIMARY KEY, analytics TEXT)";

    const SEED: [(&'static str, Option<&'static str>); 4] = [
        ("home", Some(r#"{"metadata":{"title":"Home","words":250,"author":"ada"}}"#)),
        ("about", Some(r#"{"metadata":{"title":"About","words":120}}"#)),
        ("start", Some(r#"{"metadata":{"title":"Start","words":30}}"#)),
        ("draft", None),
    ];

    /// Insert `count` pages titled `random` with random word counts.
    pub async fn insert_random_pages(&self, count: usize) -> Vec<u32> {
        use rand::Rng;
        let mut rng = rand::rng();
        let mut counts = Vec::with_capacity(count);
        for i in 0..count {
            let words = rng.random_range(0..10_000u32);
            sqlx::query("INSERT INTO pages (id, analytics) VALUES (?, ?)")
                .bind(format!("random_{i}"))
                .bind(format!(r#"{{"metadata":{{"title":"random","words":{words}}}}}"#))
                .execute(&self.pool)
                .await
                .expect("Failed to insert random page");
            counts.push(words);
        }
        counts
    }
}

impl AsyncTestContext for MemoryDatabase {
    async fn setup() -> Self {
        crate::testing::common_init();
        // A single connection that never expires keeps the in-memory database alive.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("db init connection failure");

        sqlx::query(Self::SCHEMA)
            .execute(&pool)
            .await
            .expect("Failed to create pages table");
        for (id, analytics) in Self::SEED {
            sqlx::query("INSERT INTO pages (id, analytics) VALUES (?, ?)")
                .bind(id)
                .bind(analytics)
                .execute(&pool)
                .await
                .expect("Failed to seed pages");
        }

        Self { pool }
    }

    async fn teardown(self) {
        self.pool.close().await;
    }
}
