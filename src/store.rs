use crate::*;
use moka::future::Cache;
use sqlx::{
    AssertSqlSafe, Column as _, Row as _, SqlitePool,
    sqlite::{SqlitePoolOptions, SqliteRow},
};
use std::sync::Arc;

/// One result row, columns in projection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    columns: Vec<(String, Option<String>)>,
}

impl Record {
    pub fn new(columns: impl IntoIterator<Item = (impl Into<String>, Option<String>)>) -> Self {
        Self {
            columns: columns
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }

    /// Value of the first column called `name`; `None` when absent or null.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn columns(&self) -> &[(String, Option<String>)] {
        &self.columns
    }

    /// Every value is read as text; SQLite converts numbers on the way out.
    fn from_row(row: &SqliteRow) -> Result<Self> {
        let columns = row
            .columns()
            .iter()
            .map(|column| {
                let value = row.try_get_unchecked::<Option<String>, _>(column.ordinal())?;
                Ok((column.name().to_string(), value))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { columns })
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (name, value) in &self.columns {
            if !first {
                f.write_str("\t")?;
            }
            first = false;
            write!(f, "{name}={}", value.as_deref().unwrap_or("NULL"))?;
        }
        Ok(())
    }
}

/// Runs logical statements against the pages table.
///
/// Translations are memoised per logical text; failed translations are not
/// cached so a corrected statement is never shadowed.
pub struct PageQuery {
    pool: SqlitePool,
    translator: Translator,
    cache: Cache<String, Arc<str>>,
}

impl PageQuery {
    pub fn new(pool: SqlitePool, translator: Translator, cache_capacity: u64) -> Self {
        Self {
            pool,
            translator,
            cache: Cache::new(cache_capacity),
        }
    }

    /// Connect to `config.database_url` and translate with the configured names.
    pub async fn connect(config: &Config) -> Result<Self> {
        let url = config
            .database_url
            .as_deref()
            .ok_or_else(|| Error::Config("PAGESQL_DATABASE_URL is not set".to_string()))?;
        let pool = SqlitePoolOptions::new().connect(url).await?;
        info!(url, "connected to page database");
        Ok(Self::new(
            pool,
            Translator::from_config(config),
            config.cache_capacity,
        ))
    }

    /// Physical statement of `logical`, translated and validated once.
    ///
    /// SQLite has the final say: the statement must prepare on the pool.
    /// Predicates `sqlparser` cannot read (`glob`, ...) are only logged.
    pub async fn physical(&self, logical: &str) -> Result<Arc<str>> {
        if let Some(physical) = self.cache.get(logical).await {
            debug!(logical, "translation cache hit");
            return Ok(physical);
        }

        let physical = self.translator.to_physical(logical)?;
        if let Err(err) = Validator::syntax(&physical) {
            warn!(physical, %err, "sqlparser rejected physical statement");
        }
        Validator::new(self.pool.clone())
            .sql(AssertSqlSafe(physical.clone()))
            .await?;
        let physical: Arc<str> = physical.into();
        self.cache
            .insert(logical.to_string(), physical.clone())
            .await;
        Ok(physical)
    }

    pub async fn fetch(&self, logical: &str) -> Result<Vec<Record>> {
        let physical = self.physical(logical).await?;
        let rows = sqlx::query(AssertSqlSafe(physical.to_string()))
            .fetch_all(&self.pool)
            .await?;
        debug!(logical, rows = rows.len(), "fetched");
        rows.iter().map(Record::from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(ctx: &MemoryDatabase) -> PageQuery {
        PageQuery::new(ctx.pool.clone(), Translator::default(), 16)
    }

    fn titles(records: &[Record]) -> Vec<&str> {
        records.iter().filter_map(|r| r.get("title")).collect()
    }

    #[test_context(MemoryDatabase)]
    #[tokio::test]
    async fn fetches_projected_metadata(ctx: &mut MemoryDatabase) -> Result {
        let records = query(ctx)
            .fetch("select title, words order by title")
            .await?;
        assert_eq!(titles(&records), ["About", "Home", "Start"]);
        assert_eq!(
            records[0].columns(),
            [
                ("title".to_string(), Some("About".to_string())),
                ("words".to_string(), Some("120".to_string())),
            ]
        );
        Ok(())
    }

    #[test_context(MemoryDatabase)]
    #[tokio::test]
    async fn rows_without_analytics_are_excluded(ctx: &mut MemoryDatabase) -> Result {
        let records = query(ctx).fetch("select title").await?;
        assert_eq!(records.len(), 3);
        Ok(())
    }

    #[test_context(MemoryDatabase)]
    #[rstest]
    #[case("select title where title = 'Home'", &["Home"])]
    #[case("select title where title = 'Home' or title = 'About' order by title desc", &["Home", "About"])]
    #[case("select title order by title limit 2", &["About", "Home"])]
    #[case("select title where title = 'and or select' order by title", &[])]
    #[case("select title where title glob 'H*'", &["Home"])]
    #[tokio::test]
    async fn predicates_are_passed_through(
        ctx: &mut MemoryDatabase,
        #[case] logical: &str,
        #[case] expected: &[&str],
    ) -> Result {
        let records = query(ctx).fetch(logical).await?;
        assert_eq!(titles(&records), expected);
        Ok(())
    }

    #[test_context(MemoryDatabase)]
    #[tokio::test]
    async fn missing_metadata_is_null(ctx: &mut MemoryDatabase) -> Result {
        let records = query(ctx)
            .fetch("select title, author where title = 'Start'")
            .await?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("title"), Some("Start"));
        assert_eq!(records[0].get("author"), None);
        assert_eq!(records[0].to_string(), "title=Start\tauthor=NULL");
        Ok(())
    }

    #[test_context(MemoryDatabase)]
    #[tokio::test]
    async fn largest_random_word_count_sorts_first(ctx: &mut MemoryDatabase) -> Result {
        let counts = ctx.insert_random_pages(20).await;
        let max = counts.iter().max().copied().unwrap_or_default();
        let records = query(ctx)
            .fetch("select words, title where title = 'random' order by words desc limit 1")
            .await?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("words"), Some(max.to_string().as_str()));
        Ok(())
    }

    #[test_context(MemoryDatabase)]
    #[tokio::test]
    async fn malformed_statement_is_not_executed(ctx: &mut MemoryDatabase) {
        let result = query(ctx).fetch("where title = 'Home'").await;
        assert!(
            matches!(result, Err(Error::Parse(ParseError::MissingSelect { .. }))),
            "Expected a parse error, got {result:?}"
        );
    }

    #[test_context(MemoryDatabase)]
    #[tokio::test]
    async fn translations_are_cached(ctx: &mut MemoryDatabase) -> Result {
        let query = query(ctx);
        let logical = "select title order by title";
        let first = query.physical(logical).await?;
        let again = futures::future::join_all((0..8).map(|_| query.physical(logical))).await;
        for physical in again {
            assert!(Arc::ptr_eq(&first, &physical?));
        }
        Ok(())
    }

    #[test_context(MemoryDatabase)]
    #[tokio::test]
    async fn failed_translations_are_not_cached(ctx: &mut MemoryDatabase) {
        let query = query(ctx);
        assert!(query.physical("select 'oops").await.is_err());
        query.cache.run_pending_tasks().await;
        assert_eq!(query.cache.entry_count(), 0);
    }

    #[test_context(MemoryDatabase)]
    #[tokio::test]
    async fn statements_sqlite_cannot_prepare_are_refused(ctx: &mut MemoryDatabase) {
        let query = query(ctx);
        let result = query.physical("select title where missing_column = 1").await;
        assert!(
            matches!(result, Err(Error::Database(_))),
            "Expected Err(Error::Database), got {result:?}"
        );
        query.cache.run_pending_tasks().await;
        assert_eq!(query.cache.entry_count(), 0);
    }

    #[test]
    fn record_lookup_by_name() {
        let record = Record::new([("a", Some("1".to_string())), ("b", None)]);
        assert_eq!(record.get("a"), Some("1"));
        assert_eq!(record.get("b"), None);
        assert_eq!(record.get("c"), None);
        assert_eq!(record.to_string(), "a=1\tb=NULL");
    }
}
