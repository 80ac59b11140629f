use crate::error::{CatalogError, Result};
use crate::model::{normalize_identifier, ObjectType};
use crate::store::{CatalogStore, SqlValue};

/// Which line-oriented source catalog to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceView {
    /// Visible namespaces
    All,
    /// Privileged view; callers probe accessibility first
    Privileged,
}

impl SourceView {
    fn relation(&self) -> &'static str {
        match self {
            SourceView::All => "all_source",
            SourceView::Privileged => "dba_source",
        }
    }
}

/// Reconstruct an object's text by concatenating its stored source lines.
///
/// The stored body omits the DDL verb, so a `CREATE OR REPLACE ` prefix is
/// added unless the text already starts with CREATE. `NotFound` when the
/// source catalog has no lines for the object.
pub fn assemble_source(
    store: &dyn CatalogStore,
    view: SourceView,
    owner: &str,
    name: &str,
    object_type: ObjectType,
) -> Result<String> {
    let sql = format!(
        "SELECT text FROM {} WHERE owner = ?1 AND name = ?2 AND type = ?3 ORDER BY line",
        view.relation()
    );
    let rows = store.query(
        &sql,
        &[
            SqlValue::text(normalize_identifier(owner)),
            SqlValue::text(normalize_identifier(name)),
            SqlValue::text(object_type.catalog_tag()),
        ],
    )?;
    if rows.is_empty() {
        return Err(CatalogError::NotFound(format!(
            "no stored source for {owner}.{name}"
        )));
    }

    let mut text = String::new();
    for row in &rows {
        if let Some(line) = row.opt_str("text") {
            text.push_str(&line);
            if !line.ends_with('\n') {
                text.push('\n');
            }
        }
    }

    Ok(ensure_create_prefix(text))
}

fn ensure_create_prefix(text: String) -> String {
    let trimmed = text.trim_start();
    if trimmed.to_uppercase().starts_with("CREATE") {
        text
    } else {
        format!("CREATE OR REPLACE {text}")
    }
}

/// Does the source catalog hold any lines for this object? Failures count
/// as absent; this feeds diagnostics, not control flow.
pub fn has_source(
    store: &dyn CatalogStore,
    view: SourceView,
    owner: &str,
    name: &str,
    object_type: ObjectType,
) -> bool {
    let sql = format!(
        "SELECT 1 FROM {} WHERE owner = ?1 AND name = ?2 AND type = ?3 LIMIT 1",
        view.relation()
    );
    store
        .query(
            &sql,
            &[
                SqlValue::text(normalize_identifier(owner)),
                SqlValue::text(normalize_identifier(name)),
                SqlValue::text(object_type.catalog_tag()),
            ],
        )
        .map(|rows| !rows.is_empty())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteStore;

    #[test]
    fn concatenates_in_line_order_with_prefix() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.initialize().unwrap();
        store
            .execute_batch(
                "INSERT INTO all_source (owner, name, type, line, text) VALUES
                     ('SCOTT', 'GREET', 'PROCEDURE', 2, 'BEGIN NULL; END;'),
                     ('SCOTT', 'GREET', 'PROCEDURE', 1, 'PROCEDURE greet IS');",
            )
            .unwrap();

        let text =
            assemble_source(&store, SourceView::All, "scott", "greet", ObjectType::Procedure)
                .unwrap();
        assert!(text.starts_with("CREATE OR REPLACE PROCEDURE greet IS"));
        assert!(text.contains("BEGIN NULL; END;"));
    }

    #[test]
    fn existing_create_verb_is_kept() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.initialize().unwrap();
        store
            .execute_batch(
                "INSERT INTO all_source (owner, name, type, line, text) VALUES
                     ('SCOTT', 'T1', 'TRIGGER', 1, 'CREATE TRIGGER t1 BEFORE INSERT ON emp BEGIN NULL; END;');",
            )
            .unwrap();
        let text =
            assemble_source(&store, SourceView::All, "SCOTT", "T1", ObjectType::Trigger).unwrap();
        assert!(text.starts_with("CREATE TRIGGER"));
        assert!(!text.contains("CREATE OR REPLACE CREATE"));
    }

    #[test]
    fn missing_source_is_not_found() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.initialize().unwrap();
        let err =
            assemble_source(&store, SourceView::All, "SCOTT", "NOPE", ObjectType::Package)
                .unwrap_err();
        assert!(err.is_not_found());
    }
}
