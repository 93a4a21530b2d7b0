// crates/sfs-client/src/main.rs

//! Build a `FindUsers` request from the command line and print what
//! would go on the wire.
//!
//! ```bash
//! sfs-find-users -w "age > 29" -w "country == Italy" --room 42 --limit 50 --format hex
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sfs_client::{ChannelTransport, Client, ClientConfig};
use sfs_core::{Clause, FindUsersRequest, MatchExpression, SearchScope};
use sfs_protocol::decode_object;
use sfs_protocol::text_dump::{dump_object, hex_dump};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(name = "sfs-find-users")]
#[clap(about = "Encode a FindUsers request and print the payload")]
struct Cli {
    /// Clause such as "age > 29" or "name startsWith Ma" (repeatable)
    #[clap(short = 'w', long = "where", value_name = "CLAUSE")]
    clauses: Vec<Clause>,

    /// Join clauses with OR instead of AND
    #[clap(long)]
    any: bool,

    /// Search a single room
    #[clap(long, conflicts_with = "group")]
    room: Option<i32>,

    /// Search a room group
    #[clap(long)]
    group: Option<String>,

    /// Maximum number of users (0 = no limit)
    #[clap(short, long, default_value_t = 0)]
    limit: u32,

    /// Output format
    #[clap(short, long, value_enum, default_value_t = Format::Dump)]
    format: Format,

    /// TOML config file (otherwise SFS_* environment variables)
    #[clap(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Hex,
    Dump,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ClientConfig::from_env()?,
    };

    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let expression = build_expression(cli.clauses, cli.any);
    let scope = match (cli.room, cli.group) {
        (Some(room_id), _) => SearchScope::Room(room_id),
        (None, Some(group)) => SearchScope::Group(group),
        (None, None) => SearchScope::Zone,
    };
    let limit = config.cap_limit(cli.limit);

    if let Some(expr) = &expression {
        info!(zone = %config.zone, "FindUsers {} ({:?}, limit {})", expr, scope, limit);
    }

    let request = FindUsersRequest::new(expression, scope, limit);

    let (transport, mut frames) = ChannelTransport::pair();
    let (client, _events) = Client::new(transport, config);
    client.send(&request)?;

    let frame = frames.try_recv().context("no payload was produced")?;

    match cli.format {
        Format::Hex => print!("{}", hex_dump(&frame)),
        Format::Dump => print!("{}", dump_object(&decode_object(&frame)?)),
        Format::Json => {
            let envelope = decode_object(&frame)?;
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
    }

    Ok(())
}

fn build_expression(clauses: Vec<Clause>, any: bool) -> Option<MatchExpression> {
    let mut iter = clauses.into_iter();
    let first = iter.next()?;

    Some(iter.fold(MatchExpression::new(first), |expr, clause| {
        if any {
            expr.or(clause)
        } else {
            expr.and(clause)
        }
    }))
}
