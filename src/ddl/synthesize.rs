//! Last-resort DDL synthesis from structural metadata.
//!
//! The output is a lossy approximation: tables come back as bare column
//! lists, routines as a signature with a placeholder body. The cascade
//! labels it `DdlMethod::Synthetic` so callers can tell it from real DDL.

use crate::detail::relational::fetch_columns;
use crate::detail::routine::fetch_signature;
use crate::error::{CatalogError, Result};
use crate::model::{ColumnDescriptor, ObjectType, ParameterMode};
use crate::store::CatalogStore;

use super::{StrategyContext, StrategyOutcome};

const HEADER: &str = "-- Approximate definition reconstructed from structural metadata.\n";

pub fn generate(store: &dyn CatalogStore, sctx: &StrategyContext) -> StrategyOutcome {
    let owner = sctx.effective_owner();
    let result = match sctx.object_type {
        ObjectType::Table => synthesize_table(store, owner, &sctx.name),
        ObjectType::Procedure | ObjectType::Function => {
            synthesize_routine(store, owner, &sctx.name, sctx.object_type)
        }
        _ => return StrategyOutcome::Skipped("no synthesis rule for this type"),
    };
    match result {
        Ok(text) => StrategyOutcome::Produced(text),
        Err(e) => StrategyOutcome::Failed(e),
    }
}

fn synthesize_table(store: &dyn CatalogStore, owner: &str, name: &str) -> Result<String> {
    let columns = fetch_columns(store, owner, name)?;
    if columns.is_empty() {
        return Err(CatalogError::NotFound(format!(
            "no column metadata for {owner}.{name}"
        )));
    }

    let mut text = String::from(HEADER);
    text.push_str(&format!("CREATE TABLE \"{owner}\".\"{name}\" (\n"));
    let last = columns.len() - 1;
    for (i, column) in columns.iter().enumerate() {
        text.push_str(&format!(
            "    \"{}\" {}",
            column.name,
            format_data_type(column)
        ));
        if let Some(default) = &column.default_value {
            text.push_str(&format!(" DEFAULT {default}"));
        }
        if !column.nullable {
            text.push_str(" NOT NULL");
        }
        if i != last {
            text.push(',');
        }
        text.push('\n');
    }
    text.push_str(");\n");
    Ok(text)
}

fn synthesize_routine(
    store: &dyn CatalogStore,
    owner: &str,
    name: &str,
    object_type: ObjectType,
) -> Result<String> {
    let signature = fetch_signature(store, owner, name)?;
    if signature.parameters.is_empty() && signature.return_type.is_none() {
        return Err(CatalogError::NotFound(format!(
            "no argument metadata for {owner}.{name}"
        )));
    }

    let keyword = match object_type {
        ObjectType::Function => "FUNCTION",
        _ => "PROCEDURE",
    };

    let mut text = String::from(HEADER);
    text.push_str(&format!("CREATE OR REPLACE {keyword} \"{owner}\".\"{name}\""));
    if !signature.parameters.is_empty() {
        text.push_str(" (\n");
        let last = signature.parameters.len() - 1;
        for (i, parameter) in signature.parameters.iter().enumerate() {
            let mode = match parameter.mode {
                ParameterMode::In => "IN",
                ParameterMode::Out => "OUT",
                ParameterMode::InOut => "IN OUT",
            };
            text.push_str(&format!(
                "    \"{}\" {} {}",
                parameter.name, mode, parameter.data_type
            ));
            if parameter.has_default {
                text.push_str(" DEFAULT NULL");
            }
            if i != last {
                text.push(',');
            }
            text.push('\n');
        }
        text.push(')');
    }
    if let Some(return_type) = &signature.return_type {
        text.push_str(&format!(" RETURN {return_type}"));
    }
    text.push_str("\nAS\nBEGIN\n    -- original body unavailable\n    NULL;\nEND;\n");
    Ok(text)
}

fn format_data_type(column: &ColumnDescriptor) -> String {
    if let Some(precision) = column.precision {
        return match column.scale {
            Some(scale) if scale > 0 => format!("{}({},{})", column.data_type, precision, scale),
            _ => format!("{}({})", column.data_type, precision),
        };
    }
    if let Some(length) = column.length {
        let sized = matches!(
            column.data_type.to_uppercase().as_str(),
            "CHAR" | "NCHAR" | "VARCHAR" | "VARCHAR2" | "NVARCHAR2" | "RAW"
        );
        if sized {
            return format!("{}({})", column.data_type, length);
        }
    }
    column.data_type.clone()
}
