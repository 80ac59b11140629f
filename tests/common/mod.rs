//! Shared fixture catalog for integration tests.

use catascope::SqliteStore;

/// An initialized, empty emulated catalog
pub fn empty_store() -> SqliteStore {
    let store = SqliteStore::open_in_memory().unwrap();
    store.initialize().unwrap();
    store
}

/// A small two-schema catalog: HR owns a table with full structural
/// metadata plus routines, a package, a trigger, a sequence, a type, a
/// database link and several synonyms; SALES owns objects HR can only
/// reach cross-namespace.
pub fn hr_fixture() -> SqliteStore {
    let store = empty_store();
    store.execute_batch(FIXTURE_SQL).unwrap();
    store
}

const FIXTURE_SQL: &str = r#"
INSERT INTO all_objects (owner, object_name, object_type, status, created, last_ddl_time) VALUES
    ('HR', 'EMPLOYEES', 'TABLE', 'VALID', '2023-05-01 08:00:00', '2024-02-10 12:30:00'),
    ('HR', 'PAY_HISTORY', 'TABLE', 'VALID', '2023-06-01 08:00:00', '2023-06-01 08:00:00'),
    ('HR', 'EMP_PK', 'INDEX', 'VALID', '2023-05-01 08:00:00', '2023-05-01 08:00:00'),
    ('HR', 'NET_SALARY', 'FUNCTION', 'VALID', '2023-05-02 09:00:00', '2023-05-02 09:00:00'),
    ('HR', 'FIRE_EMPLOYEE', 'PROCEDURE', 'VALID', '2023-05-02 09:00:00', '2023-05-02 09:00:00'),
    ('HR', 'EMP_PKG', 'PACKAGE', 'VALID', '2023-05-03 10:00:00', '2023-05-03 10:00:00'),
    ('HR', 'EMP_PKG', 'PACKAGE BODY', 'VALID', '2023-05-03 10:00:00', '2023-05-03 10:00:00'),
    ('HR', 'EMP_SEQ', 'SEQUENCE', 'VALID', '2023-05-01 08:00:00', '2023-05-01 08:00:00'),
    ('HR', 'EMP_AUDIT_TRG', 'TRIGGER', 'VALID', '2023-05-04 11:00:00', '2023-05-04 11:00:00'),
    ('HR', 'ADDRESS_T', 'TYPE', 'VALID', '2023-05-05 12:00:00', '2023-05-05 12:00:00'),
    ('HR', 'SALES_LINK', 'DATABASE LINK', 'VALID', '2023-05-06 13:00:00', '2023-05-06 13:00:00'),
    ('HR', 'EMP_SYN', 'SYNONYM', 'VALID', '2023-05-07 14:00:00', '2023-05-07 14:00:00'),
    ('HR', 'REMOTE_ORDERS', 'SYNONYM', 'VALID', '2023-05-07 14:00:00', '2023-05-07 14:00:00'),
    ('HR', 'SYN_CHAIN_A', 'SYNONYM', 'VALID', '2023-05-07 14:00:00', '2023-05-07 14:00:00'),
    ('HR', 'SYN_CHAIN_B', 'SYNONYM', 'VALID', '2023-05-07 14:00:00', '2023-05-07 14:00:00'),
    ('HR', 'SYN_SELF', 'SYNONYM', 'VALID', '2023-05-07 14:00:00', '2023-05-07 14:00:00'),
    ('SALES', 'ORDERS', 'TABLE', 'VALID', '2023-07-01 08:00:00', '2023-07-01 08:00:00'),
    ('SALES', 'ORDER_RPT', 'VIEW', 'VALID', '2023-07-02 08:00:00', '2023-07-02 08:00:00'),
    ('SALES', 'SUMMARY_MV', 'MATERIALIZED VIEW', 'VALID', '2023-07-03 08:00:00', '2023-07-03 08:00:00'),
    ('SALES', 'SHIP_PROC', 'PROCEDURE', 'VALID', '2023-07-04 08:00:00', '2023-07-04 08:00:00'),
    ('SALES', 'HIDDEN_PROC', 'PROCEDURE', 'INVALID', '2023-07-05 08:00:00', '2023-07-05 08:00:00');

INSERT INTO all_tab_columns (owner, table_name, column_name, column_id, data_type, data_length, data_precision, data_scale, nullable, data_default) VALUES
    ('HR', 'EMPLOYEES', 'EMPLOYEE_ID', 1, 'NUMBER', 22, 10, 0, 'N', NULL),
    ('HR', 'EMPLOYEES', 'FIRST_NAME', 2, 'VARCHAR2', 50, NULL, NULL, 'Y', NULL),
    ('HR', 'EMPLOYEES', 'SALARY', 3, 'NUMBER', 22, 8, 2, 'Y', '0'),
    ('HR', 'PAY_HISTORY', 'EMPLOYEE_ID', 1, 'NUMBER', 22, 10, 0, 'N', NULL),
    ('HR', 'PAY_HISTORY', 'PAID_AT', 2, 'DATE', 7, NULL, NULL, 'N', NULL),
    ('HR', 'PAY_HISTORY', 'AMOUNT', 3, 'NUMBER', 22, 8, 2, 'Y', NULL),
    ('SALES', 'ORDERS', 'ORDER_ID', 1, 'NUMBER', 22, 10, 0, 'N', NULL),
    ('SALES', 'ORDERS', 'PLACED_AT', 2, 'DATE', 7, NULL, NULL, 'N', NULL),
    ('SALES', 'ORDER_RPT', 'ORDER_ID', 1, 'NUMBER', 22, 10, 0, 'Y', NULL),
    ('SALES', 'SUMMARY_MV', 'TOTAL', 1, 'NUMBER', 22, 12, 2, 'Y', NULL);

INSERT INTO all_tab_comments (owner, table_name, comments) VALUES
    ('HR', 'EMPLOYEES', 'Employee master data');

INSERT INTO all_col_comments (owner, table_name, column_name, comments) VALUES
    ('HR', 'EMPLOYEES', 'SALARY', 'Monthly salary before tax');

INSERT INTO all_constraints (owner, table_name, constraint_name, constraint_type, search_condition, status) VALUES
    ('HR', 'EMPLOYEES', 'EMP_PK_CON', 'P', NULL, 'ENABLED'),
    ('HR', 'EMPLOYEES', 'EMP_SAL_CK', 'C', 'SALARY > 0', 'ENABLED');

INSERT INTO all_cons_columns (owner, constraint_name, table_name, column_name, position) VALUES
    ('HR', 'EMP_PK_CON', 'EMPLOYEES', 'EMPLOYEE_ID', 1),
    ('HR', 'EMP_SAL_CK', 'EMPLOYEES', 'SALARY', 1);

INSERT INTO all_indexes (owner, index_name, index_type, table_owner, table_name, uniqueness, status) VALUES
    ('HR', 'EMP_PK', 'NORMAL', 'HR', 'EMPLOYEES', 'UNIQUE', 'VALID');

INSERT INTO all_ind_columns (index_owner, index_name, table_name, column_name, column_position) VALUES
    ('HR', 'EMP_PK', 'EMPLOYEES', 'EMPLOYEE_ID', 1);

INSERT INTO all_tab_partitions (table_owner, table_name, partition_name, partition_position, high_value, tablespace_name) VALUES
    ('HR', 'EMPLOYEES', 'P2023', 1, 'TO_DATE(''2024-01-01'')', 'USERS'),
    ('HR', 'EMPLOYEES', 'P2024', 2, 'TO_DATE(''2025-01-01'')', 'USERS');

INSERT INTO dba_segments (owner, segment_name, segment_type, bytes) VALUES
    ('HR', 'EMPLOYEES', 'TABLE', 4194304),
    ('HR', 'EMP_PK', 'INDEX', 1048576);

INSERT INTO all_sequences (sequence_owner, sequence_name, min_value, max_value, increment_by, cycle_flag, cache_size, last_number) VALUES
    ('HR', 'EMP_SEQ', 1, 999999999, 1, 'N', 20, 1044);

INSERT INTO all_triggers (owner, trigger_name, trigger_type, triggering_event, table_owner, table_name, status, description, trigger_body) VALUES
    ('HR', 'EMP_AUDIT_TRG', 'AFTER EACH ROW', 'INSERT OR UPDATE', 'HR', 'EMPLOYEES', 'ENABLED',
     'emp_audit_trg AFTER INSERT OR UPDATE ON employees', 'BEGIN log_change(:new.employee_id); END;');

INSERT INTO all_types (owner, type_name, typecode, attributes, methods) VALUES
    ('HR', 'ADDRESS_T', 'OBJECT', 4, 0);

INSERT INTO all_db_links (owner, db_link, username, host, created) VALUES
    ('HR', 'SALES_LINK', 'SALES_RO', 'sales.example.com:1521/SALESDB', '2023-05-06 13:00:00');

INSERT INTO all_views (owner, view_name, text) VALUES
    ('SALES', 'ORDER_RPT', 'SELECT order_id FROM orders WHERE placed_at > SYSDATE - 30');

INSERT INTO all_mviews (owner, mview_name, container_name, query, refresh_mode, refresh_method, build_mode) VALUES
    ('SALES', 'SUMMARY_MV', 'SUMMARY_MV', 'SELECT SUM(amount) AS total FROM orders', 'DEMAND', 'COMPLETE', 'IMMEDIATE');

INSERT INTO all_synonyms (owner, synonym_name, table_owner, table_name, db_link) VALUES
    ('HR', 'EMP_SYN', 'HR', 'EMPLOYEES', NULL),
    ('HR', 'REMOTE_ORDERS', 'SALES', 'ORDERS', 'SALES_LINK'),
    ('HR', 'SYN_CHAIN_A', 'HR', 'SYN_CHAIN_B', NULL),
    ('HR', 'SYN_CHAIN_B', 'HR', 'EMPLOYEES', NULL),
    ('HR', 'SYN_SELF', 'HR', 'SYN_SELF', NULL);

INSERT INTO all_arguments (owner, object_name, package_name, position, sequence, argument_name, data_type, in_out, defaulted) VALUES
    ('HR', 'NET_SALARY', NULL, 0, 1, NULL, 'NUMBER', 'OUT', 'N'),
    ('HR', 'NET_SALARY', NULL, 1, 2, 'P_EMP_ID', 'NUMBER', 'IN', 'N'),
    ('HR', 'NET_SALARY', NULL, 2, 3, 'P_YEAR', 'NUMBER', 'IN', 'Y'),
    ('HR', 'FIRE_EMPLOYEE', NULL, 1, 1, 'P_EMP_ID', 'NUMBER', 'IN', 'N'),
    ('HR', 'PAY_RAISE', 'EMP_PKG', 1, 1, 'P_PCT', 'NUMBER', 'IN', 'N'),
    ('HR', 'YEARS_SERVED', 'EMP_PKG', 0, 1, NULL, 'NUMBER', 'OUT', 'N'),
    ('HR', 'YEARS_SERVED', 'EMP_PKG', 1, 2, 'P_EMP_ID', 'NUMBER', 'IN', 'N');

INSERT INTO all_source (owner, name, type, line, text) VALUES
    ('HR', 'EMP_PKG', 'PACKAGE', 1, 'PACKAGE emp_pkg IS'),
    ('HR', 'EMP_PKG', 'PACKAGE', 2, '  PROCEDURE pay_raise(p_pct NUMBER);'),
    ('HR', 'EMP_PKG', 'PACKAGE', 3, '  FUNCTION years_served(p_emp_id NUMBER) RETURN NUMBER;'),
    ('HR', 'EMP_PKG', 'PACKAGE', 4, 'END emp_pkg;'),
    ('HR', 'EMP_PKG', 'PACKAGE BODY', 1, 'PACKAGE BODY emp_pkg IS'),
    ('HR', 'EMP_PKG', 'PACKAGE BODY', 2, '  PROCEDURE pay_raise(p_pct NUMBER) IS BEGIN NULL; END;'),
    ('HR', 'EMP_PKG', 'PACKAGE BODY', 3, '  FUNCTION years_served(p_emp_id NUMBER) RETURN NUMBER IS BEGIN RETURN 1; END;'),
    ('HR', 'EMP_PKG', 'PACKAGE BODY', 4, 'END emp_pkg;'),
    ('HR', 'EMP_AUDIT_TRG', 'TRIGGER', 1, 'TRIGGER emp_audit_trg AFTER INSERT OR UPDATE ON employees'),
    ('HR', 'EMP_AUDIT_TRG', 'TRIGGER', 2, 'BEGIN log_change(:new.employee_id); END;'),
    ('HR', 'ADDRESS_T', 'TYPE', 1, 'TYPE address_t AS OBJECT (street VARCHAR2(80), city VARCHAR2(40));'),
    ('SALES', 'SHIP_PROC', 'PROCEDURE', 1, 'PROCEDURE ship_proc(p_order_id NUMBER) IS'),
    ('SALES', 'SHIP_PROC', 'PROCEDURE', 2, 'BEGIN mark_shipped(p_order_id); END;');

INSERT INTO dba_source (owner, name, type, line, text) VALUES
    ('SALES', 'HIDDEN_PROC', 'PROCEDURE', 1, 'PROCEDURE hidden_proc IS'),
    ('SALES', 'HIDDEN_PROC', 'PROCEDURE', 2, 'BEGIN purge_archive; END;');

INSERT INTO metadata_ddl (owner, object_type, object_name, ddl_text) VALUES
    ('HR', 'TABLE', 'EMPLOYEES', 'CREATE TABLE "HR"."EMPLOYEES" ("EMPLOYEE_ID" NUMBER(10) NOT NULL, "FIRST_NAME" VARCHAR2(50), "SALARY" NUMBER(8,2))'),
    ('SALES', 'TABLE', 'ORDERS', 'CREATE TABLE "SALES"."ORDERS" ("ORDER_ID" NUMBER(10) NOT NULL, "PLACED_AT" DATE NOT NULL)');
"#;
