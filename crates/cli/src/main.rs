use clap::{Parser, Subcommand};
use ferrous_acme_dns_domain::{CliOverrides, DnsQuery, RecordType, TransportProtocol};
use ferrous_acme_dns_infrastructure::Resolver;
use tracing::{debug, error};

mod bootstrap;
mod output;

#[derive(Parser)]
#[command(name = "ferrous-acme-dns")]
#[command(version = "0.1.0")]
#[command(about = "Ferrous ACME DNS - validation resolver diagnostics")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Upstream server (host:port), repeatable; replaces configured servers
    #[arg(short = 's', long = "server", value_name = "ADDR")]
    servers: Vec<String>,

    /// Per-exchange timeout in milliseconds
    #[arg(short = 't', long)]
    timeout_ms: Option<u64>,

    /// Query over TCP instead of UDP
    #[arg(long)]
    tcp: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// TXT strings, as checked for dns-01 challenges
    Txt { name: String },

    /// Canonical name target
    Cname { name: String },

    /// CAA policy records
    Caa {
        name: String,

        #[arg(long)]
        strict: bool,
    },

    /// IPv4 addresses
    Host { name: String },

    /// Raw SOA exchange against one random server
    Soa { name: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        servers: cli.servers.clone(),
        query_timeout_ms: cli.timeout_ms,
        protocol: cli.tcp.then_some(TransportProtocol::Tcp),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    debug!(
        servers = ?config.dns.servers,
        protocol = %config.dns.protocol,
        "Loaded configuration"
    );

    let resolver = Resolver::from_config(&config.dns)?;

    if let Err(e) = run(&resolver, &cli.command, cli.json).await {
        error!(error = %e, "Lookup failed");
        return Err(e);
    }

    Ok(())
}

async fn run(resolver: &Resolver, command: &Command, json: bool) -> anyhow::Result<()> {
    let rendered = match command {
        Command::Txt { name } => {
            let txt = resolver.lookup_txt(name).await?;
            output::txt(name, &txt, json)
        }
        Command::Cname { name } => {
            let target = resolver.lookup_cname(name).await?;
            output::cname(name, &target, json)
        }
        Command::Caa { name, strict } => {
            let records = resolver.lookup_caa(name, *strict).await?;
            output::caa(name, &records, json)
        }
        Command::Host { name } => {
            let host = resolver.lookup_host(name).await?;
            output::host(name, &host, json)
        }
        Command::Soa { name } => {
            let exchange = resolver
                .exchange_one(&DnsQuery::new(name, RecordType::SOA))
                .await?;
            output::exchange(name, &exchange, json)
        }
    };

    println!("{}", rendered);
    Ok(())
}
