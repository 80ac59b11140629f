//! The seven cascade strategies, in priority order.

use crate::error::CatalogError;
use crate::model::DdlMethod;
use crate::source::{assemble_source, SourceView};
use crate::store::{CatalogStore, SqlValue};

use super::{synthesize, Strategy, StrategyContext, StrategyOutcome};

/// Priority-ordered strategy list. The cascade walks this front to back and
/// stops at the first non-empty result.
pub static CASCADE: [Strategy; 7] = [
    Strategy {
        method: DdlMethod::DirectExtract,
        run: direct_extract,
    },
    Strategy {
        method: DdlMethod::TransformedExtract,
        run: transformed_extract,
    },
    Strategy {
        method: DdlMethod::OwnSource,
        run: own_source,
    },
    Strategy {
        method: DdlMethod::CrossSource,
        run: cross_source,
    },
    Strategy {
        method: DdlMethod::QualifiedExtract,
        run: qualified_extract,
    },
    Strategy {
        method: DdlMethod::PrivilegedSource,
        run: privileged_source,
    },
    Strategy {
        method: DdlMethod::Synthetic,
        run: synthetic,
    },
];

/// Read the structured-extraction repository for one owner-qualified object
fn extract(store: &dyn CatalogStore, owner: &str, sctx: &StrategyContext) -> StrategyOutcome {
    let result = store.query_scalar(
        "SELECT ddl_text FROM metadata_ddl \
         WHERE owner = ?1 AND object_type = ?2 AND object_name = ?3",
        &[
            SqlValue::text(owner),
            SqlValue::text(sctx.object_type.catalog_tag()),
            SqlValue::text(&sctx.name),
        ],
    );
    match result {
        Ok(value) => match value.as_str() {
            Some(text) if !text.trim().is_empty() => StrategyOutcome::Produced(text.to_string()),
            _ => StrategyOutcome::Failed(CatalogError::NotFound(
                "extraction returned empty text".to_string(),
            )),
        },
        Err(e) => StrategyOutcome::Failed(e),
    }
}

/// 1. Structured extraction under the caller's own namespace
fn direct_extract(store: &dyn CatalogStore, sctx: &StrategyContext) -> StrategyOutcome {
    extract(store, sctx.ctx.schema(), sctx)
}

/// 2. The same extraction with the pretty-print and statement-terminator
/// transform applied to the result
fn transformed_extract(store: &dyn CatalogStore, sctx: &StrategyContext) -> StrategyOutcome {
    match extract(store, sctx.ctx.schema(), sctx) {
        StrategyOutcome::Produced(text) => {
            StrategyOutcome::Produced(apply_terminator(pretty_print(&text)))
        }
        other => other,
    }
}

/// 3. Concatenated stored source lines, caller's own namespace
fn own_source(store: &dyn CatalogStore, sctx: &StrategyContext) -> StrategyOutcome {
    if !sctx.object_type.is_source_bearing() {
        return StrategyOutcome::Skipped("type has no stored source");
    }
    match assemble_source(
        store,
        SourceView::All,
        sctx.ctx.schema(),
        &sctx.name,
        sctx.object_type,
    ) {
        Ok(text) => StrategyOutcome::Produced(text),
        Err(e) => StrategyOutcome::Failed(e),
    }
}

/// 4. Same reconstruction against the cross-namespace source view, using
/// the owner the locator resolved
fn cross_source(store: &dyn CatalogStore, sctx: &StrategyContext) -> StrategyOutcome {
    if !sctx.object_type.is_source_bearing() {
        return StrategyOutcome::Skipped("type has no stored source");
    }
    let Some(resolved) = &sctx.resolved else {
        return StrategyOutcome::Skipped("owner not resolved");
    };
    match assemble_source(
        store,
        SourceView::All,
        &resolved.owner,
        &sctx.name,
        sctx.object_type,
    ) {
        Ok(text) => StrategyOutcome::Produced(text),
        Err(e) => StrategyOutcome::Failed(e),
    }
}

/// 5. Structured extraction with an explicit owner-qualified identifier,
/// for the ownership mismatches strategies 1-2 could not resolve
fn qualified_extract(store: &dyn CatalogStore, sctx: &StrategyContext) -> StrategyOutcome {
    let Some(resolved) = &sctx.resolved else {
        return StrategyOutcome::Skipped("owner not resolved");
    };
    extract(store, &resolved.owner, sctx)
}

/// 6. Reconstruction from the privileged source view, attempted only after
/// a capability probe confirms the view is readable
fn privileged_source(store: &dyn CatalogStore, sctx: &StrategyContext) -> StrategyOutcome {
    if !sctx.object_type.is_source_bearing() {
        return StrategyOutcome::Skipped("type has no stored source");
    }
    if store
        .query("SELECT 1 FROM dba_source WHERE 1 = 0", &[])
        .is_err()
    {
        return StrategyOutcome::Skipped("privileged source view not accessible");
    }
    match assemble_source(
        store,
        SourceView::Privileged,
        sctx.effective_owner(),
        &sctx.name,
        sctx.object_type,
    ) {
        Ok(text) => StrategyOutcome::Produced(text),
        Err(e) => StrategyOutcome::Failed(e),
    }
}

/// 7. Approximate definition synthesized from structural metadata alone
fn synthetic(store: &dyn CatalogStore, sctx: &StrategyContext) -> StrategyOutcome {
    synthesize::generate(store, sctx)
}

/// Trim trailing whitespace per line and drop trailing blank lines
fn pretty_print(text: &str) -> String {
    let mut out: Vec<&str> = text.lines().map(str::trim_end).collect();
    while matches!(out.last(), Some(line) if line.is_empty()) {
        out.pop();
    }
    out.join("\n")
}

/// Ensure the statement ends with a terminator and a trailing newline
fn apply_terminator(mut text: String) -> String {
    let trimmed = text.trim_end();
    if !trimmed.ends_with(';') && !trimmed.ends_with('/') {
        text.truncate(trimmed.len());
        text.push(';');
    }
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
