mod common;

use std::sync::Mutex;
use std::time::Duration;

use catascope::store::{CatalogStore, Row, SqlValue};
use catascope::{Config, DdlCascade, DdlMethod, DdlStatus, ObjectType, SessionContext};

use common::hr_fixture;

/// Wraps a store and records every SQL text that goes through it, so tests
/// can assert which strategies actually ran.
struct CountingStore<S: CatalogStore> {
    inner: S,
    log: Mutex<Vec<String>>,
}

impl<S: CatalogStore> CountingStore<S> {
    fn new(inner: S) -> Self {
        Self {
            inner,
            log: Mutex::new(Vec::new()),
        }
    }

    fn queries_touching(&self, relation: &str) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|sql| sql.contains(relation))
            .count()
    }
}

impl<S: CatalogStore> CatalogStore for CountingStore<S> {
    fn query(&self, sql: &str, params: &[SqlValue]) -> catascope::Result<Vec<Row>> {
        self.log.lock().unwrap().push(sql.to_string());
        self.inner.query(sql, params)
    }

    fn set_statement_timeout(&self, timeout: Duration) -> catascope::Result<()> {
        self.inner.set_statement_timeout(timeout)
    }

    fn clear_statement_timeout(&self) -> catascope::Result<()> {
        self.inner.clear_statement_timeout()
    }
}

fn hr_ctx() -> SessionContext {
    SessionContext::new("HR")
}

#[test]
fn direct_extract_wins_for_own_table() {
    let store = hr_fixture();
    let config = Config::default();
    let result = DdlCascade::get_ddl(&store, &config, &hr_ctx(), "employees", ObjectType::Table);

    assert_eq!(result.status, DdlStatus::Success);
    assert_eq!(result.method_used, Some(DdlMethod::DirectExtract));
    assert!(result.text.contains("CREATE TABLE \"HR\".\"EMPLOYEES\""));
}

#[test]
fn later_strategies_never_run_after_a_success() {
    let store = CountingStore::new(hr_fixture());
    let config = Config::default();
    let result = DdlCascade::get_ddl(&store, &config, &hr_ctx(), "EMPLOYEES", ObjectType::Table);

    assert_eq!(result.method_used, Some(DdlMethod::DirectExtract));
    // One extraction query; neither source catalog was ever touched
    assert_eq!(store.queries_touching("metadata_ddl"), 1);
    assert_eq!(store.queries_touching("all_source"), 0);
    assert_eq!(store.queries_touching("dba_source"), 0);
}

#[test]
fn own_source_reconstruction_for_package() {
    let store = hr_fixture();
    let config = Config::default();
    let result = DdlCascade::get_ddl(&store, &config, &hr_ctx(), "EMP_PKG", ObjectType::Package);

    assert_eq!(result.status, DdlStatus::Success);
    assert_eq!(result.method_used, Some(DdlMethod::OwnSource));
    assert!(result.text.starts_with("CREATE OR REPLACE PACKAGE emp_pkg IS"));
    assert!(result.text.contains("END emp_pkg;"));
}

#[test]
fn cross_namespace_source_reconstruction() {
    let store = hr_fixture();
    let config = Config::default();
    let result =
        DdlCascade::get_ddl(&store, &config, &hr_ctx(), "SHIP_PROC", ObjectType::Procedure);

    assert_eq!(result.status, DdlStatus::Success);
    assert_eq!(result.method_used, Some(DdlMethod::CrossSource));
    assert!(result.text.contains("mark_shipped"));
}

#[test]
fn qualified_extract_handles_foreign_owner() {
    let store = hr_fixture();
    let config = Config::default();
    let result = DdlCascade::get_ddl(&store, &config, &hr_ctx(), "ORDERS", ObjectType::Table);

    assert_eq!(result.status, DdlStatus::Success);
    assert_eq!(result.method_used, Some(DdlMethod::QualifiedExtract));
    assert!(result.text.contains("\"SALES\".\"ORDERS\""));
}

#[test]
fn privileged_source_after_capability_probe() {
    let store = hr_fixture();
    let config = Config::default();
    let result =
        DdlCascade::get_ddl(&store, &config, &hr_ctx(), "HIDDEN_PROC", ObjectType::Procedure);

    assert_eq!(result.status, DdlStatus::Success);
    assert_eq!(result.method_used, Some(DdlMethod::PrivilegedSource));
    assert!(result.text.contains("purge_archive"));
}

#[test]
fn privileged_strategy_skipped_without_access() {
    let store = hr_fixture();
    // Simulate a connecting account without the privileged view
    store.execute_batch("DROP TABLE dba_source;").unwrap();
    let config = Config::default();
    let result =
        DdlCascade::get_ddl(&store, &config, &hr_ctx(), "HIDDEN_PROC", ObjectType::Procedure);

    // Nothing else can produce this procedure's text
    assert_eq!(result.status, DdlStatus::NotAvailable);
    assert!(result.text.contains("privileged source access"));
    assert!(!result.text.contains("privileged source access:   yes"));
}

#[test]
fn synthetic_table_definition_from_columns() {
    let store = hr_fixture();
    let config = Config::default();
    let result =
        DdlCascade::get_ddl(&store, &config, &hr_ctx(), "PAY_HISTORY", ObjectType::Table);

    assert_eq!(result.status, DdlStatus::Success);
    assert_eq!(result.method_used, Some(DdlMethod::Synthetic));
    assert!(result.method_used.unwrap().is_lossy());
    assert!(result.text.contains("reconstructed from structural metadata"));
    assert!(result.text.contains("\"EMPLOYEE_ID\" NUMBER(10) NOT NULL"));
    assert!(result.text.contains("\"AMOUNT\" NUMBER(8,2)"));
}

#[test]
fn synthetic_routine_signature_with_placeholder_body() {
    let store = hr_fixture();
    let config = Config::default();
    let result = DdlCascade::get_ddl(
        &store,
        &config,
        &hr_ctx(),
        "FIRE_EMPLOYEE",
        ObjectType::Procedure,
    );

    assert_eq!(result.status, DdlStatus::Success);
    assert_eq!(result.method_used, Some(DdlMethod::Synthetic));
    assert!(result.text.contains("CREATE OR REPLACE PROCEDURE \"HR\".\"FIRE_EMPLOYEE\""));
    assert!(result.text.contains("\"P_EMP_ID\" IN NUMBER"));
    assert!(result.text.contains("original body unavailable"));
}

#[test]
fn synthetic_function_carries_return_type() {
    let store = hr_fixture();
    let config = Config::default();
    let result = DdlCascade::get_ddl(
        &store,
        &config,
        &hr_ctx(),
        "NET_SALARY",
        ObjectType::Function,
    );

    assert_eq!(result.method_used, Some(DdlMethod::Synthetic));
    assert!(result.text.contains("RETURN NUMBER"));
    // The position-0 return row never shows up as a parameter
    assert_eq!(result.text.matches("IN NUMBER").count(), 2);
}

#[test]
fn exhaustion_yields_diagnostic_stub_never_error() {
    let store = hr_fixture();
    let config = Config::default();
    let result = DdlCascade::get_ddl(&store, &config, &hr_ctx(), "GHOST", ObjectType::Table);

    assert_eq!(result.status, DdlStatus::NotAvailable);
    assert_eq!(result.method_used, None);
    assert!(result.text.contains("DDL not available for TABLE \"GHOST\""));
    assert!(result.text.contains("exists in object catalog"));
    assert!(result.text.contains("Likely causes"));
}

#[test]
fn exhaustion_diagnostics_report_cross_source_presence() {
    let store = hr_fixture();
    // Wipe the extraction repository so the foreign table cannot be rebuilt
    store
        .execute_batch("DELETE FROM metadata_ddl; DELETE FROM all_tab_columns WHERE owner = 'SALES';")
        .unwrap();
    let config = Config::default();
    let result = DdlCascade::get_ddl(&store, &config, &hr_ctx(), "ORDERS", ObjectType::Table);

    assert_eq!(result.status, DdlStatus::NotAvailable);
    assert!(result.text.contains("resolved owner"));
    assert!(result.text.contains("SALES"));
}
