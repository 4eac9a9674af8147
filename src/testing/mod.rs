#![cfg(test)]
crate::reexport!(context);
pub use rstest::*;

pub fn common_init() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // Only initialize once for all tests
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env()) // <- reads RUST_LOG
            .with_test_writer() // ensures it integrates with `cargo test` output
            .init();
    });
}

mod memory_database_tests {
    use super::{super::*, *};

    #[test_context(MemoryDatabase)]
    #[tokio::test]
    async fn can_connect(ctx: &mut MemoryDatabase) -> Result {
        sqlx::query("SELECT 1;").fetch_one(&ctx.pool).await?;
        Ok(())
    }

    #[test_context(MemoryDatabase)]
    #[tokio::test]
    async fn json_functions_are_available(ctx: &mut MemoryDatabase) -> Result {
        let title: String = sqlx::query_scalar(
            "SELECT json_extract(analytics, '$.metadata.title') FROM pages WHERE id = 'home'",
        )
        .fetch_one(&ctx.pool)
        .await?;
        assert_eq!(title, "Home");
        Ok(())
    }

    #[test_context(MemoryDatabase)]
    #[rstest]
    #[case(1)]
    #[case(5)]
    #[tokio::test]
    async fn can_seed_random_pages(ctx: &mut MemoryDatabase, #[case] count: usize) -> Result {
        let counts = ctx.insert_random_pages(count).await;
        assert_eq!(counts.len(), count);

        let total: i64 = sqlx::query_scalar("SELECT count(*) FROM pages")
            .fetch_one(&ctx.pool)
            .await?;
        assert_eq!(total as usize, MemoryDatabase::SEEDED_PAGES + count);
        Ok(())
    }
}
