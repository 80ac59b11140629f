//! Detail handlers for tables, views, materialized views and indexes.

use std::collections::HashMap;

use crate::context::SessionContext;
use crate::error::{CatalogError, Result};
use crate::model::{
    CatalogObject, ColumnDescriptor, ConstraintDescriptor, IndexDescriptor, ObjectStatus,
    PartitionDescriptor,
};
use crate::store::{CatalogStore, SqlValue};

use super::{degrade, DetailFields};

pub struct TableDetailHandler;

impl TableDetailHandler {
    pub fn fetch(
        store: &dyn CatalogStore,
        _ctx: &SessionContext,
        object: &CatalogObject,
    ) -> Result<DetailFields> {
        Ok(DetailFields::Table {
            columns: degrade(
                object,
                "columns",
                fetch_columns(store, &object.owner, &object.name),
            ),
            constraints: degrade(
                object,
                "constraints",
                fetch_constraints(store, &object.owner, &object.name),
            ),
            indexes: degrade(
                object,
                "indexes",
                fetch_indexes(store, &object.owner, &object.name),
            ),
            partitions: degrade(
                object,
                "partitions",
                fetch_partitions(store, &object.owner, &object.name),
            ),
            size_bytes: degrade(
                object,
                "size_bytes",
                fetch_segment_size(store, &object.owner, &object.name),
            ),
            comment: degrade(
                object,
                "comment",
                fetch_table_comment(store, &object.owner, &object.name),
            ),
        })
    }
}

pub struct ViewDetailHandler;

impl ViewDetailHandler {
    pub fn fetch(
        store: &dyn CatalogStore,
        _ctx: &SessionContext,
        object: &CatalogObject,
    ) -> Result<DetailFields> {
        Ok(DetailFields::View {
            columns: degrade(
                object,
                "columns",
                fetch_columns(store, &object.owner, &object.name),
            ),
            text: degrade(
                object,
                "text",
                fetch_view_text(store, &object.owner, &object.name),
            ),
        })
    }
}

pub struct MaterializedViewDetailHandler;

impl MaterializedViewDetailHandler {
    pub fn fetch(
        store: &dyn CatalogStore,
        _ctx: &SessionContext,
        object: &CatalogObject,
    ) -> Result<DetailFields> {
        let mview = store.query(
            "SELECT container_name, query, refresh_mode, refresh_method \
             FROM all_mviews WHERE owner = ?1 AND mview_name = ?2",
            &[SqlValue::text(&object.owner), SqlValue::text(&object.name)],
        );
        let (query, container, refresh_mode, refresh_method) = match mview {
            Ok(rows) => match rows.first() {
                Some(row) => (
                    row.opt_str("query"),
                    row.opt_str("container_name"),
                    row.opt_str("refresh_mode"),
                    row.opt_str("refresh_method"),
                ),
                None => (None, None, None, None),
            },
            Err(e) => {
                let _ = degrade::<()>(object, "mview", Err(e));
                (None, None, None, None)
            }
        };

        Ok(DetailFields::MaterializedView {
            columns: degrade(
                object,
                "columns",
                fetch_columns(store, &object.owner, &object.name),
            ),
            query,
            container,
            refresh_mode,
            refresh_method,
        })
    }
}

pub struct IndexDetailHandler;

impl IndexDetailHandler {
    pub fn fetch(
        store: &dyn CatalogStore,
        _ctx: &SessionContext,
        object: &CatalogObject,
    ) -> Result<DetailFields> {
        Ok(DetailFields::Index {
            index: degrade(
                object,
                "index",
                fetch_index(store, &object.owner, &object.name),
            ),
        })
    }
}

pub(crate) fn fetch_columns(
    store: &dyn CatalogStore,
    owner: &str,
    table: &str,
) -> Result<Vec<ColumnDescriptor>> {
    let rows = store.query(
        "SELECT c.column_name, c.column_id, c.data_type, c.data_length, c.data_precision, \
                c.data_scale, c.nullable, c.data_default, cc.comments \
         FROM all_tab_columns c \
         LEFT JOIN all_col_comments cc \
           ON cc.owner = c.owner AND cc.table_name = c.table_name \
          AND cc.column_name = c.column_name \
         WHERE c.owner = ?1 AND c.table_name = ?2 \
         ORDER BY c.column_id",
        &[SqlValue::text(owner), SqlValue::text(table)],
    )?;
    rows.iter()
        .map(|row| {
            Ok(ColumnDescriptor {
                name: row.get_str("column_name")?,
                position: row.get_i64("column_id")?,
                data_type: row.get_str("data_type")?,
                length: row.opt_i64("data_length"),
                precision: row.opt_i64("data_precision"),
                scale: row.opt_i64("data_scale"),
                nullable: row.get_flag("nullable"),
                default_value: row.opt_str("data_default"),
                comment: row.opt_str("comments"),
            })
        })
        .collect()
}

fn fetch_constraints(
    store: &dyn CatalogStore,
    owner: &str,
    table: &str,
) -> Result<Vec<ConstraintDescriptor>> {
    let column_rows = store.query(
        "SELECT constraint_name, column_name FROM all_cons_columns \
         WHERE owner = ?1 AND table_name = ?2 ORDER BY constraint_name, position",
        &[SqlValue::text(owner), SqlValue::text(table)],
    )?;
    let mut columns_by_constraint: HashMap<String, Vec<String>> = HashMap::new();
    for row in &column_rows {
        columns_by_constraint
            .entry(row.get_str("constraint_name")?)
            .or_default()
            .push(row.get_str("column_name")?);
    }

    let rows = store.query(
        "SELECT constraint_name, constraint_type, search_condition, status \
         FROM all_constraints WHERE owner = ?1 AND table_name = ?2 \
         ORDER BY constraint_name",
        &[SqlValue::text(owner), SqlValue::text(table)],
    )?;
    rows.iter()
        .map(|row| {
            let name = row.get_str("constraint_name")?;
            let columns = columns_by_constraint.remove(&name).unwrap_or_default();
            Ok(ConstraintDescriptor {
                constraint_type: row.get_str("constraint_type")?,
                search_condition: row.opt_str("search_condition"),
                enabled: row
                    .opt_str("status")
                    .map(|s| s.eq_ignore_ascii_case("ENABLED"))
                    .unwrap_or(true),
                columns,
                name,
            })
        })
        .collect()
}

fn fetch_indexes(
    store: &dyn CatalogStore,
    table_owner: &str,
    table: &str,
) -> Result<Vec<IndexDescriptor>> {
    let column_rows = store.query(
        "SELECT index_name, column_name FROM all_ind_columns \
         WHERE table_name = ?1 ORDER BY index_name, column_position",
        &[SqlValue::text(table)],
    )?;
    let mut columns_by_index: HashMap<String, Vec<String>> = HashMap::new();
    for row in &column_rows {
        columns_by_index
            .entry(row.get_str("index_name")?)
            .or_default()
            .push(row.get_str("column_name")?);
    }

    let rows = store.query(
        "SELECT owner, index_name, index_type, table_owner, table_name, uniqueness, status \
         FROM all_indexes WHERE table_owner = ?1 AND table_name = ?2 \
         ORDER BY index_name",
        &[SqlValue::text(table_owner), SqlValue::text(table)],
    )?;
    rows.iter()
        .map(|row| index_from_row(row, &mut columns_by_index))
        .collect()
}

fn fetch_index(store: &dyn CatalogStore, owner: &str, name: &str) -> Result<IndexDescriptor> {
    let column_rows = store.query(
        "SELECT index_name, column_name FROM all_ind_columns \
         WHERE index_owner = ?1 AND index_name = ?2 ORDER BY column_position",
        &[SqlValue::text(owner), SqlValue::text(name)],
    )?;
    let mut columns_by_index: HashMap<String, Vec<String>> = HashMap::new();
    for row in &column_rows {
        columns_by_index
            .entry(row.get_str("index_name")?)
            .or_default()
            .push(row.get_str("column_name")?);
    }

    let rows = store.query(
        "SELECT owner, index_name, index_type, table_owner, table_name, uniqueness, status \
         FROM all_indexes WHERE owner = ?1 AND index_name = ?2",
        &[SqlValue::text(owner), SqlValue::text(name)],
    )?;
    let row = rows
        .first()
        .ok_or_else(|| CatalogError::NotFound(format!("index {owner}.{name}")))?;
    index_from_row(row, &mut columns_by_index)
}

fn index_from_row(
    row: &crate::store::Row,
    columns_by_index: &mut HashMap<String, Vec<String>>,
) -> Result<IndexDescriptor> {
    let name = row.get_str("index_name")?;
    let columns = columns_by_index.remove(&name).unwrap_or_default();
    Ok(IndexDescriptor {
        owner: row.get_str("owner")?,
        table_owner: row.get_str("table_owner")?,
        table_name: row.get_str("table_name")?,
        index_type: row.get_str("index_type")?,
        unique: row
            .opt_str("uniqueness")
            .map(|u| u.eq_ignore_ascii_case("UNIQUE"))
            .unwrap_or(false),
        status: row
            .opt_str("status")
            .map(|s| ObjectStatus::from_catalog(&s))
            .unwrap_or(ObjectStatus::Unknown),
        columns,
        name,
    })
}

fn fetch_partitions(
    store: &dyn CatalogStore,
    owner: &str,
    table: &str,
) -> Result<Vec<PartitionDescriptor>> {
    let rows = store.query(
        "SELECT partition_name, partition_position, high_value, tablespace_name \
         FROM all_tab_partitions WHERE table_owner = ?1 AND table_name = ?2 \
         ORDER BY partition_position",
        &[SqlValue::text(owner), SqlValue::text(table)],
    )?;
    rows.iter()
        .map(|row| {
            Ok(PartitionDescriptor {
                name: row.get_str("partition_name")?,
                position: row.get_i64("partition_position")?,
                high_value: row.opt_str("high_value"),
                tablespace: row.opt_str("tablespace_name"),
            })
        })
        .collect()
}

/// Segment size comes from a privileged view and is the sub-fetch most
/// likely to degrade.
fn fetch_segment_size(store: &dyn CatalogStore, owner: &str, segment: &str) -> Result<i64> {
    let value = store.query_scalar(
        "SELECT SUM(bytes) FROM dba_segments WHERE owner = ?1 AND segment_name = ?2",
        &[SqlValue::text(owner), SqlValue::text(segment)],
    )?;
    value
        .as_i64()
        .ok_or_else(|| CatalogError::NotFound(format!("no segment for {owner}.{segment}")))
}

fn fetch_table_comment(store: &dyn CatalogStore, owner: &str, table: &str) -> Result<String> {
    let value = store.query_scalar(
        "SELECT comments FROM all_tab_comments WHERE owner = ?1 AND table_name = ?2",
        &[SqlValue::text(owner), SqlValue::text(table)],
    )?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| CatalogError::NotFound(format!("no comment for {owner}.{table}")))
}

fn fetch_view_text(store: &dyn CatalogStore, owner: &str, view: &str) -> Result<String> {
    let value = store.query_scalar(
        "SELECT text FROM all_views WHERE owner = ?1 AND view_name = ?2",
        &[SqlValue::text(owner), SqlValue::text(view)],
    )?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| CatalogError::NotFound(format!("no text for view {owner}.{view}")))
}
