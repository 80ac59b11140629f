//! Detail handlers for sequences, synonyms, triggers, types, database
//! links and stored Java source.

use crate::context::SessionContext;
use crate::error::{CatalogError, Result};
use crate::model::{CatalogObject, ObjectType, SynonymBinding};
use crate::source::{assemble_source, SourceView};
use crate::store::{CatalogStore, SqlValue};

use super::{degrade, DbLinkInfo, DetailFields, SequenceInfo, TriggerInfo, TypeInfo};

pub struct SequenceDetailHandler;

impl SequenceDetailHandler {
    pub fn fetch(
        store: &dyn CatalogStore,
        _ctx: &SessionContext,
        object: &CatalogObject,
    ) -> Result<DetailFields> {
        Ok(DetailFields::Sequence {
            sequence: degrade(
                object,
                "sequence",
                fetch_sequence(store, &object.owner, &object.name),
            ),
        })
    }
}

pub struct SynonymDetailHandler;

impl SynonymDetailHandler {
    pub fn fetch(
        store: &dyn CatalogStore,
        _ctx: &SessionContext,
        object: &CatalogObject,
    ) -> Result<DetailFields> {
        Ok(DetailFields::Synonym {
            binding: degrade(
                object,
                "binding",
                fetch_binding(store, &object.owner, &object.name),
            ),
        })
    }
}

pub struct TriggerDetailHandler;

impl TriggerDetailHandler {
    pub fn fetch(
        store: &dyn CatalogStore,
        _ctx: &SessionContext,
        object: &CatalogObject,
    ) -> Result<DetailFields> {
        Ok(DetailFields::Trigger {
            trigger: degrade(
                object,
                "trigger",
                fetch_trigger(store, &object.owner, &object.name),
            ),
        })
    }
}

pub struct TypeDetailHandler;

impl TypeDetailHandler {
    pub fn fetch(
        store: &dyn CatalogStore,
        _ctx: &SessionContext,
        object: &CatalogObject,
    ) -> Result<DetailFields> {
        Ok(DetailFields::TypeSpec {
            type_info: degrade(
                object,
                "type_info",
                fetch_type(store, &object.owner, &object.name),
            ),
            source: degrade(
                object,
                "source",
                assemble_source(
                    store,
                    SourceView::All,
                    &object.owner,
                    &object.name,
                    ObjectType::Type,
                ),
            ),
        })
    }
}

pub struct TypeBodyDetailHandler;

impl TypeBodyDetailHandler {
    pub fn fetch(
        store: &dyn CatalogStore,
        _ctx: &SessionContext,
        object: &CatalogObject,
    ) -> Result<DetailFields> {
        Ok(DetailFields::TypeBody {
            source: degrade(
                object,
                "source",
                assemble_source(
                    store,
                    SourceView::All,
                    &object.owner,
                    &object.name,
                    ObjectType::TypeBody,
                ),
            ),
        })
    }
}

pub struct DatabaseLinkDetailHandler;

impl DatabaseLinkDetailHandler {
    pub fn fetch(
        store: &dyn CatalogStore,
        _ctx: &SessionContext,
        object: &CatalogObject,
    ) -> Result<DetailFields> {
        Ok(DetailFields::DatabaseLink {
            link: degrade(
                object,
                "link",
                fetch_db_link(store, &object.owner, &object.name),
            ),
        })
    }
}

pub struct JavaSourceDetailHandler;

impl JavaSourceDetailHandler {
    pub fn fetch(
        store: &dyn CatalogStore,
        _ctx: &SessionContext,
        object: &CatalogObject,
    ) -> Result<DetailFields> {
        Ok(DetailFields::JavaSource {
            source: degrade(
                object,
                "source",
                assemble_source(
                    store,
                    SourceView::All,
                    &object.owner,
                    &object.name,
                    ObjectType::JavaSource,
                ),
            ),
        })
    }
}

fn fetch_sequence(store: &dyn CatalogStore, owner: &str, name: &str) -> Result<SequenceInfo> {
    let rows = store.query(
        "SELECT min_value, max_value, increment_by, cycle_flag, cache_size, last_number \
         FROM all_sequences WHERE sequence_owner = ?1 AND sequence_name = ?2",
        &[SqlValue::text(owner), SqlValue::text(name)],
    )?;
    let row = rows
        .first()
        .ok_or_else(|| CatalogError::NotFound(format!("sequence {owner}.{name}")))?;
    Ok(SequenceInfo {
        min_value: row.opt_i64("min_value"),
        max_value: row.opt_i64("max_value"),
        increment_by: row.opt_i64("increment_by").unwrap_or(1),
        cycle: row.get_flag("cycle_flag"),
        cache_size: row.opt_i64("cache_size"),
        last_number: row.opt_i64("last_number"),
    })
}

pub(crate) fn fetch_binding(
    store: &dyn CatalogStore,
    owner: &str,
    name: &str,
) -> Result<SynonymBinding> {
    let rows = store.query(
        "SELECT owner, synonym_name, table_owner, table_name, db_link \
         FROM all_synonyms WHERE owner = ?1 AND synonym_name = ?2",
        &[SqlValue::text(owner), SqlValue::text(name)],
    )?;
    let row = rows
        .first()
        .ok_or_else(|| CatalogError::NotFound(format!("synonym {owner}.{name}")))?;
    Ok(SynonymBinding {
        owner: row.get_str("owner")?,
        synonym_name: row.get_str("synonym_name")?,
        target_owner: row.opt_str("table_owner").unwrap_or_default(),
        target_name: row.get_str("table_name")?,
        remote_link: row.opt_str("db_link"),
    })
}

fn fetch_trigger(store: &dyn CatalogStore, owner: &str, name: &str) -> Result<TriggerInfo> {
    let rows = store.query(
        "SELECT trigger_type, triggering_event, table_owner, table_name, status, \
                description, trigger_body \
         FROM all_triggers WHERE owner = ?1 AND trigger_name = ?2",
        &[SqlValue::text(owner), SqlValue::text(name)],
    )?;
    let row = rows
        .first()
        .ok_or_else(|| CatalogError::NotFound(format!("trigger {owner}.{name}")))?;
    Ok(TriggerInfo {
        trigger_type: row.opt_str("trigger_type"),
        triggering_event: row.opt_str("triggering_event"),
        table_owner: row.opt_str("table_owner"),
        table_name: row.opt_str("table_name"),
        enabled: row
            .opt_str("status")
            .map(|s| s.eq_ignore_ascii_case("ENABLED"))
            .unwrap_or(false),
        description: row.opt_str("description"),
        body: row.opt_str("trigger_body"),
    })
}

fn fetch_type(store: &dyn CatalogStore, owner: &str, name: &str) -> Result<TypeInfo> {
    let rows = store.query(
        "SELECT typecode, attributes, methods FROM all_types \
         WHERE owner = ?1 AND type_name = ?2",
        &[SqlValue::text(owner), SqlValue::text(name)],
    )?;
    let row = rows
        .first()
        .ok_or_else(|| CatalogError::NotFound(format!("type {owner}.{name}")))?;
    Ok(TypeInfo {
        typecode: row.opt_str("typecode"),
        attributes: row.opt_i64("attributes"),
        methods: row.opt_i64("methods"),
    })
}

fn fetch_db_link(store: &dyn CatalogStore, owner: &str, name: &str) -> Result<DbLinkInfo> {
    let rows = store.query(
        "SELECT username, host, created FROM all_db_links \
         WHERE owner = ?1 AND db_link = ?2",
        &[SqlValue::text(owner), SqlValue::text(name)],
    )?;
    let row = rows
        .first()
        .ok_or_else(|| CatalogError::NotFound(format!("database link {owner}.{name}")))?;
    Ok(DbLinkInfo {
        username: row.opt_str("username"),
        host: row.opt_str("host"),
        created: row.opt_str("created"),
    })
}
