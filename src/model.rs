use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Normalize a catalog identifier to its canonical (upper-case) form.
/// Input is case-insensitive everywhere in the engine.
pub fn normalize_identifier(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Object types the engine knows how to describe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectType {
    Table,
    View,
    Procedure,
    Function,
    Package,
    PackageBody,
    Sequence,
    Synonym,
    Trigger,
    Index,
    Type,
    TypeBody,
    MaterializedView,
    DatabaseLink,
    JavaSource,
}

impl ObjectType {
    pub const ALL: [ObjectType; 15] = [
        ObjectType::Table,
        ObjectType::View,
        ObjectType::Procedure,
        ObjectType::Function,
        ObjectType::Package,
        ObjectType::PackageBody,
        ObjectType::Sequence,
        ObjectType::Synonym,
        ObjectType::Trigger,
        ObjectType::Index,
        ObjectType::Type,
        ObjectType::TypeBody,
        ObjectType::MaterializedView,
        ObjectType::DatabaseLink,
        ObjectType::JavaSource,
    ];

    /// The tag stored in the catalog's OBJECT_TYPE column
    pub fn catalog_tag(&self) -> &'static str {
        match self {
            ObjectType::Table => "TABLE",
            ObjectType::View => "VIEW",
            ObjectType::Procedure => "PROCEDURE",
            ObjectType::Function => "FUNCTION",
            ObjectType::Package => "PACKAGE",
            ObjectType::PackageBody => "PACKAGE BODY",
            ObjectType::Sequence => "SEQUENCE",
            ObjectType::Synonym => "SYNONYM",
            ObjectType::Trigger => "TRIGGER",
            ObjectType::Index => "INDEX",
            ObjectType::Type => "TYPE",
            ObjectType::TypeBody => "TYPE BODY",
            ObjectType::MaterializedView => "MATERIALIZED VIEW",
            ObjectType::DatabaseLink => "DATABASE LINK",
            ObjectType::JavaSource => "JAVA SOURCE",
        }
    }

    /// Parse a catalog tag (case-insensitive, `_` accepted for space)
    pub fn from_catalog_tag(tag: &str) -> Result<Self, CatalogError> {
        let canonical = normalize_identifier(tag).replace('_', " ");
        ObjectType::ALL
            .iter()
            .copied()
            .find(|t| t.catalog_tag() == canonical)
            .ok_or_else(|| CatalogError::InvalidArgument(format!("unknown object type: {tag}")))
    }

    /// Types whose full text lives in the line-oriented source catalog
    pub fn is_source_bearing(&self) -> bool {
        matches!(
            self,
            ObjectType::Procedure
                | ObjectType::Function
                | ObjectType::Package
                | ObjectType::PackageBody
                | ObjectType::Type
                | ObjectType::TypeBody
                | ObjectType::Trigger
                | ObjectType::JavaSource
        )
    }

    /// Types with a callable signature (parameters and possibly a return type)
    pub fn is_routine(&self) -> bool {
        matches!(self, ObjectType::Procedure | ObjectType::Function)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.catalog_tag())
    }
}

/// Validity of an object as recorded by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectStatus {
    Valid,
    Invalid,
    Unknown,
}

impl ObjectStatus {
    pub fn from_catalog(status: &str) -> Self {
        match normalize_identifier(status).as_str() {
            "VALID" => ObjectStatus::Valid,
            "INVALID" => ObjectStatus::Invalid,
            _ => ObjectStatus::Unknown,
        }
    }
}

/// One row of the object catalog, as surfaced to callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogObject {
    pub owner: String,
    pub name: String,
    pub object_type: ObjectType,
    pub status: ObjectStatus,
    pub created: Option<NaiveDateTime>,
    pub last_modified: Option<NaiveDateTime>,
    pub temporary: bool,
    pub generated: bool,
    pub secondary: bool,
}

/// How the locator found the owning namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchedVia {
    OwnNamespace,
    CrossNamespace,
}

/// Outcome of owner resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectLocation {
    pub owner: String,
    pub matched_via: MatchedVia,
}

/// A column of a table, view or materialized view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub position: i64,
    pub data_type: String,
    pub length: Option<i64>,
    pub precision: Option<i64>,
    pub scale: Option<i64>,
    pub nullable: bool,
    pub default_value: Option<String>,
    pub comment: Option<String>,
}

/// Direction of a routine parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterMode {
    In,
    Out,
    InOut,
}

impl ParameterMode {
    pub fn from_catalog(mode: &str) -> Self {
        match normalize_identifier(mode).as_str() {
            "OUT" => ParameterMode::Out,
            "IN/OUT" | "INOUT" => ParameterMode::InOut,
            _ => ParameterMode::In,
        }
    }
}

/// A declared parameter of a procedure or function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    pub position: i64,
    pub data_type: String,
    pub mode: ParameterMode,
    pub has_default: bool,
}

/// A constraint declared on a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintDescriptor {
    pub name: String,
    pub constraint_type: String,
    pub columns: Vec<String>,
    pub search_condition: Option<String>,
    pub enabled: bool,
}

/// An index, either standalone or attached to a table's detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDescriptor {
    pub name: String,
    pub owner: String,
    pub table_owner: String,
    pub table_name: String,
    pub index_type: String,
    pub unique: bool,
    pub columns: Vec<String>,
    pub status: ObjectStatus,
}

/// One partition of a partitioned table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionDescriptor {
    pub name: String,
    pub position: i64,
    pub high_value: Option<String>,
    pub tablespace: Option<String>,
}

/// A synonym and its (single-hop) target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymBinding {
    pub owner: String,
    pub synonym_name: String,
    pub target_owner: String,
    pub target_name: String,
    pub remote_link: Option<String>,
}

impl SynonymBinding {
    /// True when the target sits behind a database link and is out of reach
    pub fn is_remote(&self) -> bool {
        self.remote_link.is_some()
    }
}

/// Which cascade strategy produced (or failed to produce) the DDL text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DdlMethod {
    /// Structured extraction under the caller's own namespace
    DirectExtract,
    /// Structured extraction with pretty-print and statement terminator applied
    TransformedExtract,
    /// Concatenated source lines from the caller's own namespace
    OwnSource,
    /// Concatenated source lines from the cross-namespace source view
    CrossSource,
    /// Structured extraction with an explicit owner-qualified identifier
    QualifiedExtract,
    /// Concatenated source lines from the privileged source view
    PrivilegedSource,
    /// Approximate definition synthesized from structural metadata only
    Synthetic,
}

impl DdlMethod {
    pub const CASCADE_ORDER: [DdlMethod; 7] = [
        DdlMethod::DirectExtract,
        DdlMethod::TransformedExtract,
        DdlMethod::OwnSource,
        DdlMethod::CrossSource,
        DdlMethod::QualifiedExtract,
        DdlMethod::PrivilegedSource,
        DdlMethod::Synthetic,
    ];

    /// True when the produced text is a lossy approximation, not real DDL
    pub fn is_lossy(&self) -> bool {
        matches!(self, DdlMethod::Synthetic)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DdlStatus {
    Success,
    NotAvailable,
    Error,
}

/// Result envelope of a DDL reconstruction attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DdlResult {
    pub text: String,
    pub method_used: Option<DdlMethod>,
    pub status: DdlStatus,
    pub elapsed_ms: u64,
}

/// A 1-indexed page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    pub fn new(page: u64, page_size: u64) -> Self {
        Self { page, page_size }
    }

    /// Validate and compute the row offset. Rejects page 0 and page_size 0
    /// up front so the page math below can never divide by zero.
    pub fn offset(&self) -> Result<u64, CatalogError> {
        if self.page_size == 0 {
            return Err(CatalogError::InvalidArgument(
                "page_size must be greater than zero".to_string(),
            ));
        }
        if self.page == 0 {
            return Err(CatalogError::InvalidArgument(
                "pages are 1-indexed; page must be at least 1".to_string(),
            ));
        }
        Ok((self.page - 1) * self.page_size)
    }
}

/// A page of rows plus the count arithmetic callers need for navigation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub page: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub total_pages: u64,
    pub rows: Vec<T>,
}

impl<T> PageResult<T> {
    pub fn new(request: PageRequest, total_count: u64, rows: Vec<T>) -> Self {
        // request.offset() has already validated page_size > 0
        let total_pages = total_count.div_ceil(request.page_size);
        Self {
            page: request.page,
            page_size: request.page_size,
            total_count,
            total_pages,
            rows,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            page: self.page,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
            rows: self.rows.into_iter().map(f).collect(),
        }
    }
}

/// Where a comprehensive-search hit came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    Object,
    Synonym,
}

/// One comprehensive-search hit with its provenance tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub owner: String,
    pub name: String,
    pub object_type: ObjectType,
    pub provenance: Provenance,
    /// For synonym hits, the target the synonym points at
    pub target: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_type_tag_roundtrip() {
        for t in ObjectType::ALL {
            assert_eq!(ObjectType::from_catalog_tag(t.catalog_tag()).unwrap(), t);
        }
        assert_eq!(
            ObjectType::from_catalog_tag("package_body").unwrap(),
            ObjectType::PackageBody
        );
        assert!(ObjectType::from_catalog_tag("BLOB").is_err());
    }

    #[test]
    fn source_bearing_set() {
        assert!(ObjectType::Package.is_source_bearing());
        assert!(ObjectType::Trigger.is_source_bearing());
        assert!(ObjectType::JavaSource.is_source_bearing());
        assert!(!ObjectType::Table.is_source_bearing());
        assert!(!ObjectType::Sequence.is_source_bearing());
    }

    #[test]
    fn page_offset_math() {
        assert_eq!(PageRequest::new(1, 10).offset().unwrap(), 0);
        assert_eq!(PageRequest::new(3, 10).offset().unwrap(), 20);
        assert!(PageRequest::new(0, 10).offset().is_err());
        assert!(PageRequest::new(1, 0).offset().is_err());
    }

    #[test]
    fn total_pages_rounds_up() {
        let result = PageResult::new(PageRequest::new(1, 10), 23, Vec::<()>::new());
        assert_eq!(result.total_pages, 3);
        let result = PageResult::new(PageRequest::new(1, 10), 20, Vec::<()>::new());
        assert_eq!(result.total_pages, 2);
        let result = PageResult::new(PageRequest::new(1, 10), 0, Vec::<()>::new());
        assert_eq!(result.total_pages, 0);
    }
}
