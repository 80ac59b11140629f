//! Pattern search over the object catalog and one-hop synonym resolution.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::SessionContext;
use crate::detail::object_from_row;
use crate::detail::schema_objects::fetch_binding;
use crate::error::{CatalogError, Result};
use crate::locator::ObjectLocator;
use crate::model::{
    normalize_identifier, CatalogObject, ObjectType, PageRequest, PageResult, Provenance,
    SearchHit, SynonymBinding,
};
use crate::pagination::PagedQueryExecutor;
use crate::store::{CatalogStore, SqlValue};

const OBJECT_COLUMNS: &str = "owner, object_name, object_type, status, created, \
                              last_ddl_time, temporary, generated, secondary";

/// One row of the remote-link inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbLinkEntry {
    pub owner: String,
    pub name: String,
    pub username: Option<String>,
    pub host: Option<String>,
    pub created: Option<String>,
}

pub struct ObjectSearch;

impl ObjectSearch {
    /// Case-insensitive substring search over object names, optionally
    /// narrowed to one type, ordered by (type, name).
    pub fn search_objects(
        store: &dyn CatalogStore,
        pattern: &str,
        object_type: Option<ObjectType>,
        request: PageRequest,
    ) -> Result<PageResult<CatalogObject>> {
        let escaped = escape_like(&normalize_identifier(pattern));
        let mut filter = String::from("UPPER(object_name) LIKE '%' || ?1 || '%' ESCAPE '\\'");
        let mut params = vec![SqlValue::text(escaped)];
        if let Some(object_type) = object_type {
            filter.push_str(" AND object_type = ?2");
            params.push(SqlValue::text(object_type.catalog_tag()));
        }

        let row_sql = format!(
            "SELECT {OBJECT_COLUMNS} FROM all_objects WHERE {filter} \
             ORDER BY object_type, object_name"
        );
        let count_sql = format!("SELECT COUNT(*) FROM all_objects WHERE {filter}");

        let page = PagedQueryExecutor::execute(store, &row_sql, &count_sql, &params, request)?;
        collect_objects(page)
    }

    /// Paginated per-type/per-owner inventory listing
    pub fn list_objects(
        store: &dyn CatalogStore,
        object_type: Option<ObjectType>,
        owner: Option<&str>,
        request: PageRequest,
    ) -> Result<PageResult<CatalogObject>> {
        let mut filter = String::from("1 = 1");
        let mut params = Vec::new();
        if let Some(object_type) = object_type {
            params.push(SqlValue::text(object_type.catalog_tag()));
            filter.push_str(&format!(" AND object_type = ?{}", params.len()));
        }
        if let Some(owner) = owner {
            params.push(SqlValue::text(normalize_identifier(owner)));
            filter.push_str(&format!(" AND owner = ?{}", params.len()));
        }

        let row_sql = format!(
            "SELECT {OBJECT_COLUMNS} FROM all_objects WHERE {filter} \
             ORDER BY object_type, object_name"
        );
        let count_sql = format!("SELECT COUNT(*) FROM all_objects WHERE {filter}");

        let page = PagedQueryExecutor::execute(store, &row_sql, &count_sql, &params, request)?;
        collect_objects(page)
    }

    /// Union of direct object matches and synonym matches (by synonym name
    /// or target name), each hit tagged with its provenance, de-duplicated
    /// and sorted by (type, name).
    pub fn comprehensive_search(
        store: &dyn CatalogStore,
        pattern: &str,
    ) -> Result<Vec<SearchHit>> {
        let escaped = escape_like(&normalize_identifier(pattern));

        // Synonym-typed rows enter through the synonym leg below, which
        // also matches on target name; keeping them out of the object leg
        // keeps provenance unambiguous.
        let object_rows = store.query(
            "SELECT owner, object_name, object_type FROM all_objects \
             WHERE UPPER(object_name) LIKE '%' || ?1 || '%' ESCAPE '\\' \
               AND object_type <> 'SYNONYM' \
             ORDER BY object_type, object_name",
            &[SqlValue::text(&escaped)],
        )?;

        let synonym_rows = store.query(
            "SELECT owner, synonym_name, table_owner, table_name, db_link \
             FROM all_synonyms \
             WHERE UPPER(synonym_name) LIKE '%' || ?1 || '%' ESCAPE '\\' \
                OR UPPER(table_name) LIKE '%' || ?1 || '%' ESCAPE '\\' \
             ORDER BY synonym_name",
            &[SqlValue::text(&escaped)],
        )?;

        let mut hits = Vec::new();
        for row in &object_rows {
            hits.push(SearchHit {
                owner: row.get_str("owner")?,
                name: row.get_str("object_name")?,
                object_type: ObjectType::from_catalog_tag(&row.get_str("object_type")?)?,
                provenance: Provenance::Object,
                target: None,
            });
        }
        for row in &synonym_rows {
            let target_owner = row.opt_str("table_owner");
            let target_name = row.get_str("table_name")?;
            let mut target = match target_owner {
                Some(owner) => format!("{owner}.{target_name}"),
                None => target_name,
            };
            if let Some(link) = row.opt_str("db_link") {
                target.push('@');
                target.push_str(&link);
            }
            hits.push(SearchHit {
                owner: row.get_str("owner")?,
                name: row.get_str("synonym_name")?,
                object_type: ObjectType::Synonym,
                provenance: Provenance::Synonym,
                target: Some(target),
            });
        }

        let mut seen = HashSet::new();
        hits.retain(|hit| seen.insert((hit.object_type, hit.owner.clone(), hit.name.clone())));
        // (type, name) ordering over the catalog's textual type tags, the
        // same collation the paginated listings get from their ORDER BY
        hits.sort_by(|a, b| {
            (a.object_type.catalog_tag(), &a.name, &a.owner)
                .cmp(&(b.object_type.catalog_tag(), &b.name, &b.owner))
        });
        Ok(hits)
    }

    /// Inventory of database links visible to the engine
    pub fn list_db_links(
        store: &dyn CatalogStore,
        request: PageRequest,
    ) -> Result<PageResult<DbLinkEntry>> {
        let page = PagedQueryExecutor::execute(
            store,
            "SELECT owner, db_link, username, host, created FROM all_db_links \
             ORDER BY owner, db_link",
            "SELECT COUNT(*) FROM all_db_links",
            &[],
            request,
        )?;
        let entries = page
            .rows
            .iter()
            .map(|row| {
                Ok(DbLinkEntry {
                    owner: row.get_str("owner")?,
                    name: row.get_str("db_link")?,
                    username: row.opt_str("username"),
                    host: row.opt_str("host"),
                    created: row.opt_str("created"),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(PageResult {
            page: page.page,
            page_size: page.page_size,
            total_count: page.total_count,
            total_pages: page.total_pages,
            rows: entries,
        })
    }
}

pub struct SynonymResolver;

impl SynonymResolver {
    /// Resolve a synonym to its binding. Strictly one hop: a target that is
    /// itself a synonym is returned as-is, never followed, so self- and
    /// mutually-referential synonyms cannot loop. A binding with a remote
    /// link names a target this engine cannot reach and is only classified.
    pub fn resolve_synonym(
        store: &dyn CatalogStore,
        ctx: &SessionContext,
        name: &str,
    ) -> Result<SynonymBinding> {
        let name = normalize_identifier(name);
        let location =
            ObjectLocator::resolve_location(store, ctx, &name, Some(ObjectType::Synonym))?
                .ok_or_else(|| CatalogError::NotFound(format!("synonym {name}")))?;
        let binding = fetch_binding(store, &location.owner, &name)?;
        if binding.is_remote() {
            debug!(
                synonym = %binding.synonym_name,
                link = binding.remote_link.as_deref().unwrap_or_default(),
                "synonym targets a remote link; not dereferenced"
            );
        }
        Ok(binding)
    }
}

/// Escape LIKE wildcards in a user-supplied pattern. Paired with an
/// explicit `ESCAPE '\'` clause in every query that interpolates it.
fn escape_like(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn collect_objects(page: PageResult<crate::store::Row>) -> Result<PageResult<CatalogObject>> {
    let objects = page
        .rows
        .iter()
        .map(object_from_row)
        .collect::<Result<Vec<_>>>()?;
    Ok(PageResult {
        page: page.page,
        page_size: page.page_size,
        total_count: page.total_count,
        total_pages: page.total_pages,
        rows: objects,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("EMP"), "EMP");
        assert_eq!(escape_like("EMP_%"), "EMP\\_\\%");
        assert_eq!(escape_like("A\\B"), "A\\\\B");
    }
}
