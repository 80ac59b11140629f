//! Generic offset/limit query execution and ad-hoc row browsing.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::model::{PageRequest, PageResult};
use crate::store::{CatalogStore, Row, SqlValue};

// Unquoted catalog identifiers: a letter, then letters, digits, _, $, #
static IDENTIFIER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_$#]*$").unwrap());

/// Gate an identifier before it is interpolated into a FROM clause.
///
/// This is a strict allow-grammar check that fails closed, not an escaping
/// mechanism: anything outside the grammar (quoted identifiers, unicode,
/// whitespace, punctuation) is rejected outright.
pub fn validate_identifier(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if IDENTIFIER_REGEX.is_match(trimmed) {
        Ok(trimmed.to_uppercase())
    } else {
        Err(CatalogError::InvalidArgument(format!(
            "identifier rejected: {name:?}"
        )))
    }
}

pub struct PagedQueryExecutor;

impl PagedQueryExecutor {
    /// Run `count_sql` for the total, then `row_sql` with LIMIT/OFFSET
    /// appended. Pages are 1-indexed; `offset = (page-1) * page_size`.
    /// `row_sql` must carry its own ORDER BY and use numbered placeholders.
    pub fn execute(
        store: &dyn CatalogStore,
        row_sql: &str,
        count_sql: &str,
        params: &[SqlValue],
        request: PageRequest,
    ) -> Result<PageResult<Row>> {
        let offset = request.offset()?;

        let total_count = match store.query_scalar(count_sql, params) {
            Ok(value) => value.as_i64().unwrap_or(0).max(0) as u64,
            Err(e) if e.is_not_found() => 0,
            Err(e) => return Err(e),
        };

        let n = params.len();
        let paged_sql = format!("{row_sql} LIMIT ?{} OFFSET ?{}", n + 1, n + 2);
        let mut paged_params = params.to_vec();
        paged_params.push(SqlValue::Integer(request.page_size as i64));
        paged_params.push(SqlValue::Integer(offset as i64));

        let rows = store.query(&paged_sql, &paged_params)?;
        Ok(PageResult::new(request, total_count, rows))
    }

    /// Browse the rows of an arbitrary caller-named table. The name goes
    /// through [`validate_identifier`] before interpolation; the statement
    /// timeout (caller-supplied or configured default) is set for the
    /// duration of the browse and cleared afterwards.
    pub fn browse_rows(
        store: &dyn CatalogStore,
        config: &Config,
        table: &str,
        request: PageRequest,
        timeout: Option<Duration>,
    ) -> Result<PageResult<Row>> {
        let table = validate_identifier(table)?;
        if request.page_size > config.max_page_size {
            return Err(CatalogError::InvalidArgument(format!(
                "page_size {} exceeds maximum {}",
                request.page_size, config.max_page_size
            )));
        }

        let row_sql = format!("SELECT * FROM {table}");
        let count_sql = format!("SELECT COUNT(*) FROM {table}");

        store.set_statement_timeout(timeout.unwrap_or(config.statement_timeout))?;
        let result = Self::execute(store, &row_sql, &count_sql, &[], request);
        if let Err(e) = store.clear_statement_timeout() {
            debug!(error = %e, "could not clear statement timeout after browse");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_grammar() {
        assert_eq!(validate_identifier("ORDERS_2024").unwrap(), "ORDERS_2024");
        assert_eq!(validate_identifier("emp$audit#1").unwrap(), "EMP$AUDIT#1");
        assert!(validate_identifier("orders; drop table x").is_err());
        assert!(validate_identifier("1orders").is_err());
        assert!(validate_identifier("\"quoted\"").is_err());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("a-b").is_err());
    }
}
