//! Per-type structural metadata assembly.
//!
//! `get_detail` resolves the owning namespace, reads the base catalog row,
//! then dispatches to the handler registered for the object's type. Every
//! optional sub-fetch is wrapped by [`degrade`]: an isolated failure drops
//! that field, it never aborts the call.

pub mod relational;
pub mod routine;
pub mod schema_objects;

use std::collections::HashMap;

use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::context::SessionContext;
use crate::error::{CatalogError, Result};
use crate::locator::ObjectLocator;
use crate::model::{
    normalize_identifier, CatalogObject, ColumnDescriptor, ConstraintDescriptor, IndexDescriptor,
    ObjectStatus, ObjectType, ParameterDescriptor, PartitionDescriptor, SynonymBinding,
};
use crate::store::{CatalogStore, Row, SqlValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubprogramKind {
    Function,
    Procedure,
}

/// A subprogram declared inside a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubprogramDescriptor {
    pub name: String,
    pub kind: SubprogramKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceInfo {
    pub min_value: Option<i64>,
    pub max_value: Option<i64>,
    pub increment_by: i64,
    pub cycle: bool,
    pub cache_size: Option<i64>,
    pub last_number: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerInfo {
    pub trigger_type: Option<String>,
    pub triggering_event: Option<String>,
    pub table_owner: Option<String>,
    pub table_name: Option<String>,
    pub enabled: bool,
    pub description: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeInfo {
    pub typecode: Option<String>,
    pub attributes: Option<i64>,
    pub methods: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbLinkInfo {
    pub username: Option<String>,
    pub host: Option<String>,
    pub created: Option<String>,
}

/// Type-specific detail. Every field is optional: a failed sub-fetch leaves
/// its field absent (degraded), it does not fail the call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailFields {
    Table {
        columns: Option<Vec<ColumnDescriptor>>,
        constraints: Option<Vec<ConstraintDescriptor>>,
        indexes: Option<Vec<IndexDescriptor>>,
        partitions: Option<Vec<PartitionDescriptor>>,
        size_bytes: Option<i64>,
        comment: Option<String>,
    },
    View {
        columns: Option<Vec<ColumnDescriptor>>,
        text: Option<String>,
    },
    MaterializedView {
        columns: Option<Vec<ColumnDescriptor>>,
        query: Option<String>,
        container: Option<String>,
        refresh_mode: Option<String>,
        refresh_method: Option<String>,
    },
    Routine {
        parameters: Option<Vec<ParameterDescriptor>>,
        return_type: Option<String>,
    },
    Package {
        specification: Option<String>,
        body: Option<String>,
        subprograms: Option<Vec<SubprogramDescriptor>>,
    },
    PackageBody {
        body: Option<String>,
    },
    Sequence {
        sequence: Option<SequenceInfo>,
    },
    Synonym {
        binding: Option<SynonymBinding>,
    },
    Trigger {
        trigger: Option<TriggerInfo>,
    },
    Index {
        index: Option<IndexDescriptor>,
    },
    TypeSpec {
        type_info: Option<TypeInfo>,
        source: Option<String>,
    },
    TypeBody {
        source: Option<String>,
    },
    DatabaseLink {
        link: Option<DbLinkInfo>,
    },
    JavaSource {
        source: Option<String>,
    },
}

/// Full detail envelope: the base catalog row plus type-specific fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectDetail {
    pub object: CatalogObject,
    pub fields: DetailFields,
}

type DetailFn = fn(&dyn CatalogStore, &SessionContext, &CatalogObject) -> Result<DetailFields>;

lazy_static! {
    /// Type-keyed dispatch table. One handler per object-type variant,
    /// looked up here instead of branching at every call site.
    static ref DETAIL_HANDLERS: HashMap<ObjectType, DetailFn> = {
        let mut registry: HashMap<ObjectType, DetailFn> = HashMap::new();
        registry.insert(ObjectType::Table, relational::TableDetailHandler::fetch);
        registry.insert(ObjectType::View, relational::ViewDetailHandler::fetch);
        registry.insert(
            ObjectType::MaterializedView,
            relational::MaterializedViewDetailHandler::fetch,
        );
        registry.insert(ObjectType::Index, relational::IndexDetailHandler::fetch);
        registry.insert(ObjectType::Procedure, routine::RoutineDetailHandler::fetch);
        registry.insert(ObjectType::Function, routine::RoutineDetailHandler::fetch);
        registry.insert(ObjectType::Package, routine::PackageDetailHandler::fetch);
        registry.insert(
            ObjectType::PackageBody,
            routine::PackageBodyDetailHandler::fetch,
        );
        registry.insert(
            ObjectType::Sequence,
            schema_objects::SequenceDetailHandler::fetch,
        );
        registry.insert(
            ObjectType::Synonym,
            schema_objects::SynonymDetailHandler::fetch,
        );
        registry.insert(
            ObjectType::Trigger,
            schema_objects::TriggerDetailHandler::fetch,
        );
        registry.insert(ObjectType::Type, schema_objects::TypeDetailHandler::fetch);
        registry.insert(
            ObjectType::TypeBody,
            schema_objects::TypeBodyDetailHandler::fetch,
        );
        registry.insert(
            ObjectType::DatabaseLink,
            schema_objects::DatabaseLinkDetailHandler::fetch,
        );
        registry.insert(
            ObjectType::JavaSource,
            schema_objects::JavaSourceDetailHandler::fetch,
        );
        registry
    };
}

pub struct MetadataAggregator;

impl MetadataAggregator {
    /// Assemble structural detail for one object.
    ///
    /// Owner precedence: an explicit `owner` argument, else the locator's
    /// resolution, else `NotFound`.
    pub fn get_detail(
        store: &dyn CatalogStore,
        config: &Config,
        ctx: &SessionContext,
        name: &str,
        object_type: ObjectType,
        owner: Option<&str>,
    ) -> Result<ObjectDetail> {
        store.set_statement_timeout(config.statement_timeout)?;
        let result = Self::get_detail_inner(store, ctx, name, object_type, owner);
        if let Err(e) = store.clear_statement_timeout() {
            debug!(error = %e, "failed to clear statement timeout");
        }
        result
    }

    fn get_detail_inner(
        store: &dyn CatalogStore,
        ctx: &SessionContext,
        name: &str,
        object_type: ObjectType,
        owner: Option<&str>,
    ) -> Result<ObjectDetail> {
        let name = normalize_identifier(name);
        let owner = match owner {
            Some(owner) => normalize_identifier(owner),
            None => ObjectLocator::resolve_location(store, ctx, &name, Some(object_type))?
                .ok_or_else(|| CatalogError::NotFound(format!("{object_type} {name}")))?
                .owner,
        };

        let object = Self::fetch_base_object(store, &owner, &name, object_type)?;

        let handler = DETAIL_HANDLERS
            .get(&object_type)
            .ok_or(CatalogError::Unsupported(object_type))?;
        let fields = handler(store, ctx, &object)?;

        Ok(ObjectDetail { object, fields })
    }

    fn fetch_base_object(
        store: &dyn CatalogStore,
        owner: &str,
        name: &str,
        object_type: ObjectType,
    ) -> Result<CatalogObject> {
        let rows = store.query(
            "SELECT owner, object_name, object_type, status, created, last_ddl_time, \
                    temporary, generated, secondary \
             FROM all_objects \
             WHERE owner = ?1 AND object_name = ?2 AND object_type = ?3",
            &[
                SqlValue::text(owner),
                SqlValue::text(name),
                SqlValue::text(object_type.catalog_tag()),
            ],
        )?;
        let Some(first) = rows.first() else {
            return Err(CatalogError::NotFound(format!(
                "{object_type} {owner}.{name}"
            )));
        };
        if rows.len() > 1 {
            warn!(owner, name, %object_type, "duplicate catalog rows; taking first");
        }
        object_from_row(first)
    }
}

/// Map a catalog row to the shared object envelope
pub(crate) fn object_from_row(row: &Row) -> Result<CatalogObject> {
    Ok(CatalogObject {
        owner: row.get_str("owner")?,
        name: row.get_str("object_name")?,
        object_type: ObjectType::from_catalog_tag(&row.get_str("object_type")?)?,
        status: row
            .opt_str("status")
            .map(|s| ObjectStatus::from_catalog(&s))
            .unwrap_or(ObjectStatus::Unknown),
        created: parse_timestamp(row.opt_str("created")),
        last_modified: parse_timestamp(row.opt_str("last_ddl_time")),
        temporary: row.get_flag("temporary"),
        generated: row.get_flag("generated"),
        secondary: row.get_flag("secondary"),
    })
}

fn parse_timestamp(value: Option<String>) -> Option<NaiveDateTime> {
    value.and_then(|s| NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S").ok())
}

/// Convert a sub-fetch failure into an absent field. Logged at debug; the
/// caller sees the field missing, never an error.
pub(crate) fn degrade<T>(object: &CatalogObject, field: &'static str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(
                owner = %object.owner,
                name = %object.name,
                field,
                error = %e,
                "sub-fetch failed; omitting field"
            );
            None
        }
    }
}
