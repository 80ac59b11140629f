//! catascope: catalog introspection over a relational database.
//!
//! Given an object's name and (optionally) type, the engine locates the
//! owning namespace, assembles per-type structural metadata, and
//! reconstructs a textual definition through an ordered cascade of
//! extraction strategies. The backing catalog is consumed through the
//! [`store::CatalogStore`] trait; the shipped implementation emulates the
//! catalog relations over SQLite.
//!
//! The engine never mutates the catalog, caches nothing across calls, and
//! carries the caller's namespace identity explicitly on every call.

pub mod config;
pub mod context;
pub mod ddl;
pub mod detail;
pub mod error;
pub mod locator;
pub mod model;
pub mod pagination;
pub mod search;
pub mod source;
pub mod store;

pub use config::Config;
pub use context::SessionContext;
pub use ddl::DdlCascade;
pub use detail::{DetailFields, MetadataAggregator, ObjectDetail};
pub use error::{CatalogError, Result};
pub use locator::ObjectLocator;
pub use model::{
    CatalogObject, DdlMethod, DdlResult, DdlStatus, MatchedVia, ObjectLocation, ObjectStatus,
    ObjectType, PageRequest, PageResult, Provenance, SearchHit, SynonymBinding,
};
pub use pagination::PagedQueryExecutor;
pub use search::{ObjectSearch, SynonymResolver};
pub use store::{CatalogStore, SqliteStore};
