//! Detail handlers for standalone routines and packages.

use crate::context::SessionContext;
use crate::error::Result;
use crate::model::{CatalogObject, ObjectType, ParameterDescriptor, ParameterMode};
use crate::source::{assemble_source, SourceView};
use crate::store::{CatalogStore, SqlValue};

use super::{degrade, DetailFields, SubprogramDescriptor, SubprogramKind};

/// Parameters plus, for functions, the return descriptor carried on the
/// position-0 argument row. Shared with the synthetic DDL generator.
pub(crate) struct Signature {
    pub(crate) parameters: Vec<ParameterDescriptor>,
    pub(crate) return_type: Option<String>,
}

pub struct RoutineDetailHandler;

impl RoutineDetailHandler {
    pub fn fetch(
        store: &dyn CatalogStore,
        _ctx: &SessionContext,
        object: &CatalogObject,
    ) -> Result<DetailFields> {
        let signature = degrade(
            object,
            "parameters",
            fetch_signature(store, &object.owner, &object.name),
        );
        let (parameters, return_type) = match signature {
            Some(s) => (Some(s.parameters), s.return_type),
            None => (None, None),
        };
        Ok(DetailFields::Routine {
            parameters,
            return_type,
        })
    }
}

pub struct PackageDetailHandler;

impl PackageDetailHandler {
    pub fn fetch(
        store: &dyn CatalogStore,
        _ctx: &SessionContext,
        object: &CatalogObject,
    ) -> Result<DetailFields> {
        Ok(DetailFields::Package {
            specification: degrade(
                object,
                "specification",
                assemble_source(
                    store,
                    SourceView::All,
                    &object.owner,
                    &object.name,
                    ObjectType::Package,
                ),
            ),
            body: degrade(
                object,
                "body",
                assemble_source(
                    store,
                    SourceView::All,
                    &object.owner,
                    &object.name,
                    ObjectType::PackageBody,
                ),
            ),
            subprograms: degrade(
                object,
                "subprograms",
                fetch_subprograms(store, &object.owner, &object.name),
            ),
        })
    }
}

pub struct PackageBodyDetailHandler;

impl PackageBodyDetailHandler {
    pub fn fetch(
        store: &dyn CatalogStore,
        _ctx: &SessionContext,
        object: &CatalogObject,
    ) -> Result<DetailFields> {
        Ok(DetailFields::PackageBody {
            body: degrade(
                object,
                "body",
                assemble_source(
                    store,
                    SourceView::All,
                    &object.owner,
                    &object.name,
                    ObjectType::PackageBody,
                ),
            ),
        })
    }
}

/// Fetch a standalone routine's argument rows ordered by (position,
/// sequence). The position-0 row is the return-value descriptor: it sets
/// `return_type` and never appears in the parameter list. Procedures have
/// no such row.
pub(crate) fn fetch_signature(
    store: &dyn CatalogStore,
    owner: &str,
    name: &str,
) -> Result<Signature> {
    let rows = store.query(
        "SELECT argument_name, position, sequence, data_type, in_out, defaulted \
         FROM all_arguments \
         WHERE owner = ?1 AND object_name = ?2 AND package_name IS NULL \
         ORDER BY position, sequence",
        &[SqlValue::text(owner), SqlValue::text(name)],
    )?;

    let mut parameters = Vec::new();
    let mut return_type = None;
    for row in &rows {
        let position = row.get_i64("position")?;
        if position == 0 {
            return_type = row.opt_str("data_type");
            continue;
        }
        parameters.push(ParameterDescriptor {
            name: row.opt_str("argument_name").unwrap_or_default(),
            position,
            data_type: row.opt_str("data_type").unwrap_or_default(),
            mode: ParameterMode::from_catalog(&row.opt_str("in_out").unwrap_or_default()),
            has_default: row.get_flag("defaulted"),
        });
    }

    Ok(Signature {
        parameters,
        return_type,
    })
}

/// List a package's subprograms. A subprogram is a function when any of its
/// argument rows carries a null argument name (the return-type marker).
fn fetch_subprograms(
    store: &dyn CatalogStore,
    owner: &str,
    package: &str,
) -> Result<Vec<SubprogramDescriptor>> {
    let rows = store.query(
        "SELECT object_name, \
                MAX(CASE WHEN argument_name IS NULL THEN 1 ELSE 0 END) AS has_return \
         FROM all_arguments \
         WHERE owner = ?1 AND package_name = ?2 \
         GROUP BY object_name \
         ORDER BY object_name",
        &[SqlValue::text(owner), SqlValue::text(package)],
    )?;
    rows.iter()
        .map(|row| {
            let kind = if row.get_i64("has_return")? == 1 {
                SubprogramKind::Function
            } else {
                SubprogramKind::Procedure
            };
            Ok(SubprogramDescriptor {
                name: row.get_str("object_name")?,
                kind,
            })
        })
        .collect()
}
