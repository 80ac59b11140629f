//! Schema for the emulated catalog relations.
//!
//! The engine reads the same relation shapes a real data dictionary
//! exposes; here they are plain SQLite tables so a catalog can be loaded
//! from fixtures or snapshots. Flag columns hold 'Y'/'N', timestamps hold
//! 'YYYY-MM-DD HH:MM:SS' text.

pub const CATALOG_SCHEMA: &str = r#"
-- Object inventory across all visible namespaces
CREATE TABLE IF NOT EXISTS all_objects (
    owner TEXT NOT NULL,
    object_name TEXT NOT NULL,
    object_type TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'VALID',
    created TEXT,
    last_ddl_time TEXT,
    temporary TEXT NOT NULL DEFAULT 'N',
    generated TEXT NOT NULL DEFAULT 'N',
    secondary TEXT NOT NULL DEFAULT 'N'
);
CREATE INDEX IF NOT EXISTS idx_all_objects_name ON all_objects(object_name);

-- View query text
CREATE TABLE IF NOT EXISTS all_views (
    owner TEXT NOT NULL,
    view_name TEXT NOT NULL,
    text TEXT
);

-- Line-oriented stored source, visible namespaces
CREATE TABLE IF NOT EXISTS all_source (
    owner TEXT NOT NULL,
    name TEXT NOT NULL,
    type TEXT NOT NULL,
    line INTEGER NOT NULL,
    text TEXT
);
CREATE INDEX IF NOT EXISTS idx_all_source_name ON all_source(owner, name, type);

-- Line-oriented stored source, privileged view. May be absent entirely
-- when the connecting account lacks the privilege; the cascade probes
-- before reading it.
CREATE TABLE IF NOT EXISTS dba_source (
    owner TEXT NOT NULL,
    name TEXT NOT NULL,
    type TEXT NOT NULL,
    line INTEGER NOT NULL,
    text TEXT
);

-- Structured-extraction repository backing the direct DDL strategies
CREATE TABLE IF NOT EXISTS metadata_ddl (
    owner TEXT NOT NULL,
    object_type TEXT NOT NULL,
    object_name TEXT NOT NULL,
    ddl_text TEXT
);

CREATE TABLE IF NOT EXISTS all_synonyms (
    owner TEXT NOT NULL,
    synonym_name TEXT NOT NULL,
    table_owner TEXT,
    table_name TEXT NOT NULL,
    db_link TEXT
);

CREATE TABLE IF NOT EXISTS all_tab_columns (
    owner TEXT NOT NULL,
    table_name TEXT NOT NULL,
    column_name TEXT NOT NULL,
    column_id INTEGER NOT NULL,
    data_type TEXT NOT NULL,
    data_length INTEGER,
    data_precision INTEGER,
    data_scale INTEGER,
    nullable TEXT NOT NULL DEFAULT 'Y',
    data_default TEXT
);

CREATE TABLE IF NOT EXISTS all_tab_comments (
    owner TEXT NOT NULL,
    table_name TEXT NOT NULL,
    comments TEXT
);

CREATE TABLE IF NOT EXISTS all_col_comments (
    owner TEXT NOT NULL,
    table_name TEXT NOT NULL,
    column_name TEXT NOT NULL,
    comments TEXT
);

CREATE TABLE IF NOT EXISTS all_constraints (
    owner TEXT NOT NULL,
    table_name TEXT NOT NULL,
    constraint_name TEXT NOT NULL,
    constraint_type TEXT NOT NULL,
    search_condition TEXT,
    status TEXT NOT NULL DEFAULT 'ENABLED'
);

CREATE TABLE IF NOT EXISTS all_cons_columns (
    owner TEXT NOT NULL,
    constraint_name TEXT NOT NULL,
    table_name TEXT NOT NULL,
    column_name TEXT NOT NULL,
    position INTEGER
);

CREATE TABLE IF NOT EXISTS all_indexes (
    owner TEXT NOT NULL,
    index_name TEXT NOT NULL,
    index_type TEXT NOT NULL DEFAULT 'NORMAL',
    table_owner TEXT NOT NULL,
    table_name TEXT NOT NULL,
    uniqueness TEXT NOT NULL DEFAULT 'NONUNIQUE',
    status TEXT NOT NULL DEFAULT 'VALID'
);

CREATE TABLE IF NOT EXISTS all_ind_columns (
    index_owner TEXT NOT NULL,
    index_name TEXT NOT NULL,
    table_name TEXT NOT NULL,
    column_name TEXT NOT NULL,
    column_position INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS all_tab_partitions (
    table_owner TEXT NOT NULL,
    table_name TEXT NOT NULL,
    partition_name TEXT NOT NULL,
    partition_position INTEGER NOT NULL,
    high_value TEXT,
    tablespace_name TEXT
);

-- Segment sizes, privileged. Like dba_source this table may be missing;
-- size reporting degrades when it is.
CREATE TABLE IF NOT EXISTS dba_segments (
    owner TEXT NOT NULL,
    segment_name TEXT NOT NULL,
    segment_type TEXT NOT NULL,
    bytes INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS all_sequences (
    sequence_owner TEXT NOT NULL,
    sequence_name TEXT NOT NULL,
    min_value INTEGER,
    max_value INTEGER,
    increment_by INTEGER NOT NULL DEFAULT 1,
    cycle_flag TEXT NOT NULL DEFAULT 'N',
    cache_size INTEGER,
    last_number INTEGER
);

CREATE TABLE IF NOT EXISTS all_triggers (
    owner TEXT NOT NULL,
    trigger_name TEXT NOT NULL,
    trigger_type TEXT,
    triggering_event TEXT,
    table_owner TEXT,
    table_name TEXT,
    status TEXT NOT NULL DEFAULT 'ENABLED',
    description TEXT,
    trigger_body TEXT
);

CREATE TABLE IF NOT EXISTS all_mviews (
    owner TEXT NOT NULL,
    mview_name TEXT NOT NULL,
    container_name TEXT,
    query TEXT,
    refresh_mode TEXT,
    refresh_method TEXT,
    build_mode TEXT
);

CREATE TABLE IF NOT EXISTS all_db_links (
    owner TEXT NOT NULL,
    db_link TEXT NOT NULL,
    username TEXT,
    host TEXT,
    created TEXT
);

CREATE TABLE IF NOT EXISTS all_types (
    owner TEXT NOT NULL,
    type_name TEXT NOT NULL,
    typecode TEXT,
    attributes INTEGER,
    methods INTEGER
);

-- Routine signatures. position 0 carries the return descriptor of a
-- function; argument_name is null on that row. package_name is null for
-- standalone routines.
CREATE TABLE IF NOT EXISTS all_arguments (
    owner TEXT NOT NULL,
    object_name TEXT NOT NULL,
    package_name TEXT,
    overload TEXT,
    position INTEGER NOT NULL,
    sequence INTEGER NOT NULL,
    argument_name TEXT,
    data_type TEXT,
    in_out TEXT NOT NULL DEFAULT 'IN',
    defaulted TEXT NOT NULL DEFAULT 'N'
);
CREATE INDEX IF NOT EXISTS idx_all_arguments_obj ON all_arguments(owner, object_name);
"#;
