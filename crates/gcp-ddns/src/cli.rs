//! Command-line surface
//!
//! Every flag is required. Values are checked for presence only.

use clap::Parser;
use gcp_ddns_core::Invocation;

/// Point a Cloud DNS address record at a Compute Engine instance
#[derive(Debug, Parser)]
#[command(name = "gcp-ddns", version, about, long_about = None)]
pub struct Cli {
    /// Compute Engine / Cloud DNS project
    #[arg(short = 'p', long, value_name = "PROJECT")]
    pub project: String,

    /// TTL for the DNS record, in seconds
    #[arg(short = 't', long, value_name = "SECONDS")]
    pub ttl: u32,

    /// DNS record name, without the zone domain
    #[arg(short = 'r', long, value_name = "NAME")]
    pub record: String,

    /// Domain of the managed zone holding the record
    #[arg(short = 'z', long, value_name = "DOMAIN")]
    pub zone: String,

    /// Compute Engine instance name
    #[arg(short = 'i', long, alias = "instace", value_name = "INSTANCE")]
    pub instance: String,

    /// Compute Engine zone of the instance (e.g. us-central1-a)
    #[arg(short = 'd', long, value_name = "DATACENTER")]
    pub datacenter: String,
}

impl From<Cli> for Invocation {
    fn from(cli: Cli) -> Self {
        Invocation {
            project: cli.project,
            ttl: cli.ttl,
            record: cli.record,
            zone: cli.zone,
            instance: cli.instance,
            datacenter: cli.datacenter,
        }
    }
}
