use tracing::{debug, warn};

use crate::context::SessionContext;
use crate::error::Result;
use crate::model::{normalize_identifier, MatchedVia, ObjectLocation, ObjectType};
use crate::store::{CatalogStore, SqlValue};

/// Resolves which namespace owns a named object.
///
/// The caller's own namespace always wins; otherwise the first match across
/// all visible namespaces, ordered by (type, name). When several foreign
/// owners hold an identically named and typed object the first row is taken
/// as-is and the ambiguity is logged, never silently tie-broken.
pub struct ObjectLocator;

impl ObjectLocator {
    pub fn resolve_location(
        store: &dyn CatalogStore,
        ctx: &SessionContext,
        name: &str,
        object_type: Option<ObjectType>,
    ) -> Result<Option<ObjectLocation>> {
        let name = normalize_identifier(name);

        if Self::exists(store, ctx.schema(), &name, object_type)? {
            return Ok(Some(ObjectLocation {
                owner: ctx.schema().to_string(),
                matched_via: MatchedVia::OwnNamespace,
            }));
        }

        let mut sql = String::from("SELECT owner FROM all_objects WHERE object_name = ?1");
        let mut params = vec![SqlValue::text(name.clone())];
        if let Some(object_type) = object_type {
            sql.push_str(" AND object_type = ?2");
            params.push(SqlValue::text(object_type.catalog_tag()));
        }
        sql.push_str(" ORDER BY object_type, object_name");

        let rows = store.query(&sql, &params)?;
        let Some(first) = rows.first() else {
            debug!(name = %name, "object not found in any visible namespace");
            return Ok(None);
        };
        let owner = first.get_str("owner")?;

        let distinct_owners = {
            let mut owners: Vec<String> = rows
                .iter()
                .filter_map(|r| r.opt_str("owner"))
                .collect();
            owners.sort();
            owners.dedup();
            owners.len()
        };
        if distinct_owners > 1 {
            warn!(
                name = %name,
                owners = distinct_owners,
                chosen = %owner,
                "identifier is ambiguous across namespaces; taking first row"
            );
        }

        Ok(Some(ObjectLocation {
            owner,
            matched_via: MatchedVia::CrossNamespace,
        }))
    }

    /// Does (owner, name, type?) exist in the object catalog?
    pub fn exists(
        store: &dyn CatalogStore,
        owner: &str,
        name: &str,
        object_type: Option<ObjectType>,
    ) -> Result<bool> {
        let mut sql = String::from(
            "SELECT 1 FROM all_objects WHERE owner = ?1 AND object_name = ?2",
        );
        let mut params = vec![
            SqlValue::text(normalize_identifier(owner)),
            SqlValue::text(normalize_identifier(name)),
        ];
        if let Some(object_type) = object_type {
            sql.push_str(" AND object_type = ?3");
            params.push(SqlValue::text(object_type.catalog_tag()));
        }
        sql.push_str(" LIMIT 1");
        Ok(!store.query(&sql, &params)?.is_empty())
    }
}
