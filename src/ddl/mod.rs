//! DDL reconstruction.
//!
//! `get_ddl` never raises: seven strategies are tried strictly in order and
//! the first non-empty result wins. Exhausting the list yields a
//! NOT_AVAILABLE result whose text is a diagnostic stub explaining what was
//! probed and what came back.

pub mod diagnostics;
pub mod strategies;
pub mod synthesize;

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::context::SessionContext;
use crate::error::CatalogError;
use crate::locator::ObjectLocator;
use crate::model::{
    normalize_identifier, DdlMethod, DdlResult, DdlStatus, ObjectLocation, ObjectType,
};
use crate::store::CatalogStore;

/// Everything a strategy needs to run. Built once per cascade invocation.
pub struct StrategyContext<'a> {
    pub ctx: &'a SessionContext,
    pub name: String,
    pub object_type: ObjectType,
    pub resolved: Option<ObjectLocation>,
}

impl StrategyContext<'_> {
    /// The resolved owner, falling back to the caller's own namespace
    pub fn effective_owner(&self) -> &str {
        self.resolved
            .as_ref()
            .map(|l| l.owner.as_str())
            .unwrap_or_else(|| self.ctx.schema())
    }
}

pub enum StrategyOutcome {
    Produced(String),
    Skipped(&'static str),
    Failed(CatalogError),
}

type StrategyFn = fn(&dyn CatalogStore, &StrategyContext) -> StrategyOutcome;

/// One rung of the cascade: the method label plus the function that runs it
pub struct Strategy {
    pub method: DdlMethod,
    pub run: StrategyFn,
}

pub struct DdlCascade;

impl DdlCascade {
    /// Reconstruct DDL for (name, type). Never returns an error; the worst
    /// case is a NOT_AVAILABLE result carrying a diagnostic stub.
    pub fn get_ddl(
        store: &dyn CatalogStore,
        config: &Config,
        ctx: &SessionContext,
        name: &str,
        object_type: ObjectType,
    ) -> DdlResult {
        if let Err(e) = store.set_statement_timeout(config.statement_timeout) {
            debug!(error = %e, "could not set statement timeout");
        }
        let result = Self::run(store, ctx, name, object_type, &strategies::CASCADE);
        if let Err(e) = store.clear_statement_timeout() {
            debug!(error = %e, "could not clear statement timeout");
        }
        result
    }

    /// Run an explicit strategy list in order with early exit. Split out so
    /// the cascade can be exercised with a custom list.
    pub fn run(
        store: &dyn CatalogStore,
        ctx: &SessionContext,
        name: &str,
        object_type: ObjectType,
        cascade: &[Strategy],
    ) -> DdlResult {
        let started = Instant::now();
        let name = normalize_identifier(name);

        let resolved = match ObjectLocator::resolve_location(store, ctx, &name, Some(object_type))
        {
            Ok(location) => location,
            Err(e) => {
                warn!(name = %name, error = %e, "owner resolution failed; catalog unreachable");
                return DdlResult {
                    text: format!("-- DDL extraction aborted: {e}\n"),
                    method_used: None,
                    status: DdlStatus::Error,
                    elapsed_ms: started.elapsed().as_millis() as u64,
                };
            }
        };

        let sctx = StrategyContext {
            ctx,
            name,
            object_type,
            resolved,
        };

        for strategy in cascade {
            match (strategy.run)(store, &sctx) {
                StrategyOutcome::Produced(text) if !text.trim().is_empty() => {
                    info!(
                        name = %sctx.name,
                        %object_type,
                        method = ?strategy.method,
                        "DDL reconstructed"
                    );
                    return DdlResult {
                        text,
                        method_used: Some(strategy.method),
                        status: DdlStatus::Success,
                        elapsed_ms: started.elapsed().as_millis() as u64,
                    };
                }
                StrategyOutcome::Produced(_) => {
                    debug!(method = ?strategy.method, "strategy produced empty text");
                }
                StrategyOutcome::Skipped(reason) => {
                    debug!(method = ?strategy.method, reason, "strategy skipped");
                }
                StrategyOutcome::Failed(e) => {
                    debug!(method = ?strategy.method, error = %e, "strategy failed");
                }
            }
        }

        let diag = diagnostics::collect(
            store,
            ctx,
            &sctx.name,
            object_type,
            sctx.resolved.as_ref(),
        );
        info!(name = %sctx.name, %object_type, "all DDL strategies exhausted");
        DdlResult {
            text: diagnostics::render(&sctx.name, object_type, &diag),
            method_used: None,
            status: DdlStatus::NotAvailable,
            elapsed_ms: started.elapsed().as_millis() as u64,
        }
    }
}
