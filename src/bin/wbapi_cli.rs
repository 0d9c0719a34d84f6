//! wbapi-cli: query a Wikibase repository from the command line
//!
//! Usage:
//!   wbapi-cli get <id>... [--props <p,..>] [--languages <l,..>]   Fetch entities
//!   wbapi-cli search <text> <language> [type] [--limit <n>]       Search entities
//!   wbapi-cli claims <entity-id> [property-id]                    List claims
//!   wbapi-cli version                                              Show version

use anyhow::{bail, Context};
use tracing_subscriber::EnvFilter;
use wikibase_repo_api::transport::{HttpExecutor, HttpExecutorConfig};
use wikibase_repo_api::{Error, MultiValue, RepoApi};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let result = match args[1].as_str() {
        "get" => cmd_get(&args[2..]).await,
        "search" => cmd_search(&args[2..]).await,
        "claims" => cmd_claims(&args[2..]).await,
        "version" | "--version" | "-V" => {
            cmd_version();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        report(&e);
        std::process::exit(2);
    }
}

fn print_usage() {
    println!("{}", USAGE);
}

const USAGE: &str = r#"wbapi-cli — Wikibase repository API client

USAGE:
    wbapi-cli <COMMAND> [OPTIONS]

COMMANDS:
    get <id>... [--props <list>] [--languages <list>]   Fetch entities by id
    search <text> <language> [type] [--limit <n>]       Search entities (type defaults to item)
    claims <entity-id> [property-id]                    List the claims of an entity
    version                                              Show version information
    help                                                 Show this help message

OPTIONS:
    --endpoint <url>            api.php URL (overrides WBAPI_ENDPOINT)

ENVIRONMENT:
    WBAPI_ENDPOINT              api.php URL
    WBAPI_LOCAL_SERVER          Server the caller runs on; adds origin for cross-domain calls
    WBAPI_HTTP_TIMEOUT_SECS     Request timeout in seconds (default 30)
    WBAPI_USER_AGENT            User-Agent header
    WBAPI_PROXY_URL             Proxy for all requests
    RUST_LOG                    Log filter (e.g. wikibase_repo_api=debug)"#;

fn cmd_version() {
    println!("wbapi-cli {}", env!("CARGO_PKG_VERSION"));
}

/// Value following `--name`, if present.
fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

/// Arguments that are neither flags nor flag values.
fn positional(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut skip = false;
    for arg in args {
        if skip {
            skip = false;
            continue;
        }
        if arg.starts_with("--") {
            skip = true;
            continue;
        }
        out.push(arg.as_str());
    }
    out
}

fn list(raw: &str) -> MultiValue {
    MultiValue::from(raw.split(',').map(str::trim).collect::<Vec<_>>())
}

fn api(args: &[String]) -> anyhow::Result<RepoApi<HttpExecutor>> {
    let config = match flag(args, "--endpoint") {
        Some(endpoint) => HttpExecutorConfig::new(endpoint),
        None => HttpExecutorConfig::from_env().context("set WBAPI_ENDPOINT or pass --endpoint")?,
    };
    Ok(RepoApi::new(HttpExecutor::new(config)?))
}

async fn cmd_get(args: &[String]) -> anyhow::Result<()> {
    let ids = positional(args);
    if ids.is_empty() {
        bail!("get: at least one entity id is required");
    }
    let api = api(args)?;
    let result = api
        .get_entities(
            ids,
            flag(args, "--props").map(list),
            flag(args, "--languages").map(list),
            None,
            None,
        )
        .await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn cmd_search(args: &[String]) -> anyhow::Result<()> {
    let pos = positional(args);
    let (text, language) = match (pos.first(), pos.get(1)) {
        (Some(t), Some(l)) => (*t, *l),
        _ => bail!("search: <text> and <language> are required"),
    };
    let entity_type = pos.get(2).copied().unwrap_or("item");
    let limit = flag(args, "--limit")
        .map(|s| s.parse::<u32>())
        .transpose()
        .context("--limit must be a number")?;

    let api = api(args)?;
    let result = api
        .search_entities(text, language, entity_type, limit, None)
        .await?;
    if let Some(hits) = result.get("search").and_then(|s| s.as_array()) {
        for hit in hits {
            println!(
                "{}\t{}\t{}",
                hit["id"].as_str().unwrap_or_default(),
                hit["label"].as_str().unwrap_or_default(),
                hit["description"].as_str().unwrap_or_default()
            );
        }
    }
    Ok(())
}

async fn cmd_claims(args: &[String]) -> anyhow::Result<()> {
    let pos = positional(args);
    let Some(entity) = pos.first().copied() else {
        bail!("claims: <entity-id> is required");
    };
    let api = api(args)?;
    let result = api
        .get_claims(Some(entity), pos.get(1).copied(), None, None, None)
        .await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn report(e: &anyhow::Error) {
    match e.downcast_ref::<Error>() {
        Some(Error::Remote(remote)) => {
            eprintln!("error: {}", remote.display_message());
            if !remote.code().is_empty() {
                eprintln!("  code:   {}", remote.code());
            }
            if !remote.detailed_message().is_empty() {
                eprintln!("  detail: {}", remote.detailed_message());
            }
        }
        _ => eprintln!("error: {:#}", e),
    }
}
