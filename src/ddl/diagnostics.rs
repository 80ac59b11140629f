//! Diagnostics gathered when every cascade strategy has failed.

use serde::{Deserialize, Serialize};

use crate::context::SessionContext;
use crate::locator::ObjectLocator;
use crate::model::{ObjectLocation, ObjectStatus, ObjectType};
use crate::source::{has_source, SourceView};
use crate::store::{CatalogStore, SqlValue};

/// Everything the stub reports. Each probe is best-effort; a probe failure
/// reads as a negative flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DdlDiagnostics {
    pub exists: bool,
    pub resolved_owner: Option<String>,
    pub status: Option<ObjectStatus>,
    pub privileged_source_accessible: bool,
    pub in_own_source: bool,
    pub in_cross_source: bool,
}

pub fn collect(
    store: &dyn CatalogStore,
    ctx: &SessionContext,
    name: &str,
    object_type: ObjectType,
    resolved: Option<&ObjectLocation>,
) -> DdlDiagnostics {
    let exists = store
        .query(
            "SELECT 1 FROM all_objects WHERE object_name = ?1 AND object_type = ?2 LIMIT 1",
            &[
                SqlValue::text(name),
                SqlValue::text(object_type.catalog_tag()),
            ],
        )
        .map(|rows| !rows.is_empty())
        .unwrap_or(false);

    let status = resolved.and_then(|location| {
        store
            .query_scalar(
                "SELECT status FROM all_objects \
                 WHERE owner = ?1 AND object_name = ?2 AND object_type = ?3",
                &[
                    SqlValue::text(&location.owner),
                    SqlValue::text(name),
                    SqlValue::text(object_type.catalog_tag()),
                ],
            )
            .ok()
            .and_then(|v| v.as_str().map(ObjectStatus::from_catalog))
    });

    let privileged_source_accessible = store
        .query("SELECT 1 FROM dba_source WHERE 1 = 0", &[])
        .is_ok();

    let in_own_source = has_source(store, SourceView::All, ctx.schema(), name, object_type);
    let in_cross_source = resolved
        .map(|location| has_source(store, SourceView::All, &location.owner, name, object_type))
        .unwrap_or(false);

    // Keep the exists flag consistent with what the locator itself sees
    let exists = exists
        || resolved.is_some()
        || ObjectLocator::exists(store, ctx.schema(), name, Some(object_type)).unwrap_or(false);

    DdlDiagnostics {
        exists,
        resolved_owner: resolved.map(|l| l.owner.clone()),
        status,
        privileged_source_accessible,
        in_own_source,
        in_cross_source,
    }
}

/// Render the NOT_AVAILABLE stub as a SQL comment block
pub fn render(name: &str, object_type: ObjectType, diag: &DdlDiagnostics) -> String {
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };
    let mut text = String::new();
    text.push_str(&format!("-- DDL not available for {object_type} \"{name}\"\n"));
    text.push_str(
        "-- Likely causes: insufficient privilege, cross-namespace access,\n\
         -- unsupported object type, or catalog version incompatibility.\n",
    );
    text.push_str("-- Diagnostics:\n");
    text.push_str(&format!(
        "--   exists in object catalog:   {}\n",
        yes_no(diag.exists)
    ));
    text.push_str(&format!(
        "--   resolved owner:             {}\n",
        diag.resolved_owner.as_deref().unwrap_or("(none)")
    ));
    text.push_str(&format!(
        "--   object status:              {}\n",
        diag.status
            .map(|s| format!("{s:?}").to_uppercase())
            .unwrap_or_else(|| "(unknown)".to_string())
    ));
    text.push_str(&format!(
        "--   privileged source access:   {}\n",
        yes_no(diag.privileged_source_accessible)
    ));
    text.push_str(&format!(
        "--   in source catalog (own):    {}\n",
        yes_no(diag.in_own_source)
    ));
    text.push_str(&format!(
        "--   in source catalog (cross):  {}\n",
        yes_no(diag.in_cross_source)
    ));
    text
}
