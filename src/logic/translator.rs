//! Rewrites logical statements into SQL executable against the pages table.
use crate::*;
use itertools::Itertools as _;

pub const DEFAULT_TABLE: &str = "pages";
pub const DEFAULT_SOURCE_COLUMN: &str = "analytics";
pub const DEFAULT_PATH_PREFIX: &str = "$.metadata";

/// Maps logical column names onto `json_extract` expressions over one JSON
/// column of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translator {
    table: String,
    source_column: String,
    path_prefix: String,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE, DEFAULT_SOURCE_COLUMN)
    }
}

impl Translator {
    pub fn new(table: impl Into<String>, source_column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            source_column: source_column.into(),
            path_prefix: DEFAULT_PATH_PREFIX.to_string(),
        }
    }

    pub fn with_path_prefix(mut self, path_prefix: impl Into<String>) -> Self {
        self.path_prefix = path_prefix.into();
        self
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.table, &config.source_column).with_path_prefix(&config.path_prefix)
    }

    /// Parse `logical` and build its physical statement.
    ///
    /// Nothing is produced for a statement that does not parse.
    pub fn to_physical(&self, logical: &str) -> Result<String> {
        let tokens = parse(logical)?;
        let physical = self.translate(&tokens);
        debug!(logical, physical, "translated");
        Ok(physical)
    }

    /// Build the physical statement of already parsed tokens.
    ///
    /// Predicates are copied as written: column names inside them are not
    /// rewritten to `json_extract`.
    pub fn translate(&self, tokens: &TokenList) -> String {
        let columns = tokens
            .column_identifiers()
            .into_iter()
            .map(|identifier| self.column_expression(identifier))
            .join(", ");

        let mut sql = format!(
            "select {columns} from {table} where {source} is not null",
            table = self.table,
            source = self.source_column,
        );

        let conditions = tokens.conditions();
        match conditions.as_slice() {
            [] => {}
            [single] => {
                sql.push_str(" and ");
                sql.push_str(single.predicate);
            }
            chained => {
                let chain = chained
                    .iter()
                    .map(|c| match c.operator {
                        Some(operator) => format!("{operator} {}", c.predicate),
                        None => c.predicate.to_string(),
                    })
                    .join(" ");
                sql.push_str(&format!(" and ({chain})"));
            }
        }

        let order_bys = tokens.order_bys();
        if !order_bys.is_empty() {
            sql.push_str(&format!(" order by {}", order_bys.join(", ")));
        }

        if let Some(limit) = tokens.limit() {
            sql.push_str(&format!(" limit {limit}"));
        }
        sql
    }

    /// `json_extract(<source>, '<prefix>.<name>') as <identifier>`
    fn column_expression(&self, identifier: &str) -> String {
        let name = unquote(identifier).replace('\'', "''");
        format!(
            "json_extract({}, '{}.{name}') as {identifier}",
            self.source_column, self.path_prefix
        )
    }
}

/// Strip one pair of matching surrounding quotes.
fn unquote(identifier: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|quote| {
            identifier
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
        })
        .unwrap_or(identifier)
}
