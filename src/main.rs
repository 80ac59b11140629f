use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use catascope::{
    Config, DdlCascade, MetadataAggregator, ObjectSearch, ObjectType, PageRequest,
    PagedQueryExecutor, SessionContext, SqliteStore, SynonymResolver,
};

#[derive(Parser)]
#[command(name = "catascope", about = "Catalog introspection over a SQLite-emulated relational catalog", version)]
struct Cli {
    /// Path to the catalog database file
    #[arg(long, env = "CATASCOPE_DB", default_value = "catalog.db")]
    db: String,

    /// Caller namespace (schema) for name resolution
    #[arg(long, env = "CATASCOPE_SCHEMA", default_value = "PUBLIC")]
    schema: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the emulated catalog relations in the database file
    Init,
    /// Structural detail for one object
    Detail {
        name: String,
        #[arg(long, value_parser = parse_type)]
        r#type: ObjectType,
        #[arg(long)]
        owner: Option<String>,
    },
    /// Reconstruct DDL text for one object
    Ddl {
        name: String,
        #[arg(long, value_parser = parse_type)]
        r#type: ObjectType,
    },
    /// Substring search over object names
    Search {
        pattern: String,
        #[arg(long, value_parser = parse_type)]
        r#type: Option<ObjectType>,
        #[arg(long, default_value_t = 1)]
        page: u64,
        #[arg(long)]
        page_size: Option<u64>,
        /// Union object and synonym matches with provenance tags
        #[arg(long)]
        comprehensive: bool,
    },
    /// Resolve a synonym one hop
    Synonym { name: String },
    /// Browse rows of a table by name
    Browse {
        table: String,
        #[arg(long, default_value_t = 1)]
        page: u64,
        #[arg(long)]
        page_size: Option<u64>,
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
    /// List objects, optionally narrowed by type and owner
    List {
        #[arg(long, value_parser = parse_type)]
        r#type: Option<ObjectType>,
        #[arg(long)]
        owner: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u64,
        #[arg(long)]
        page_size: Option<u64>,
    },
    /// Inventory of database links
    Links {
        #[arg(long, default_value_t = 1)]
        page: u64,
        #[arg(long)]
        page_size: Option<u64>,
    },
}

fn parse_type(value: &str) -> std::result::Result<ObjectType, String> {
    ObjectType::from_catalog_tag(value).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let ctx = SessionContext::new(cli.schema);

    let store = SqliteStore::open(&cli.db)
        .with_context(|| format!("opening catalog database {}", cli.db))?;

    let page_request = |page: u64, page_size: Option<u64>| {
        PageRequest::new(page, page_size.unwrap_or(config.default_page_size))
    };

    match cli.command {
        Command::Init => {
            store.initialize().context("creating catalog relations")?;
            eprintln!("catalog relations ready in {}", cli.db);
        }
        Command::Detail {
            name,
            r#type,
            owner,
        } => {
            let detail = MetadataAggregator::get_detail(
                &store,
                &config,
                &ctx,
                &name,
                r#type,
                owner.as_deref(),
            )?;
            print_json(&detail)?;
        }
        Command::Ddl { name, r#type } => {
            let result = DdlCascade::get_ddl(&store, &config, &ctx, &name, r#type);
            print_json(&result)?;
        }
        Command::Search {
            pattern,
            r#type,
            page,
            page_size,
            comprehensive,
        } => {
            if comprehensive {
                let hits = ObjectSearch::comprehensive_search(&store, &pattern)?;
                print_json(&hits)?;
            } else {
                let result = ObjectSearch::search_objects(
                    &store,
                    &pattern,
                    r#type,
                    page_request(page, page_size),
                )?;
                print_json(&result)?;
            }
        }
        Command::Synonym { name } => {
            let binding = SynonymResolver::resolve_synonym(&store, &ctx, &name)?;
            print_json(&binding)?;
        }
        Command::Browse {
            table,
            page,
            page_size,
            timeout_secs,
        } => {
            let result = PagedQueryExecutor::browse_rows(
                &store,
                &config,
                &table,
                page_request(page, page_size),
                timeout_secs.map(Duration::from_secs),
            )?;
            let rows: Vec<serde_json::Value> = result.rows.iter().map(|r| r.to_json()).collect();
            let envelope = serde_json::json!({
                "page": result.page,
                "page_size": result.page_size,
                "total_count": result.total_count,
                "total_pages": result.total_pages,
                "rows": rows,
            });
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        Command::List {
            r#type,
            owner,
            page,
            page_size,
        } => {
            let result = ObjectSearch::list_objects(
                &store,
                r#type,
                owner.as_deref(),
                page_request(page, page_size),
            )?;
            print_json(&result)?;
        }
        Command::Links { page, page_size } => {
            let result = ObjectSearch::list_db_links(&store, page_request(page, page_size))?;
            print_json(&result)?;
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
