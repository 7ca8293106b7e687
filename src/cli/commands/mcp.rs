use std::net::IpAddr;

use clap::Args;

use crate::auth::Authenticator;
use crate::client::SearchConsoleClient;
use crate::error::GscResult;
use crate::mcp;

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct McpArgs {
    /// Serve Streamable HTTP at /mcp instead of stdio
    #[arg(long)]
    pub http: bool,

    /// Host address to bind to (with --http)
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on (with --http)
    #[arg(short, long, default_value_t = 3737)]
    pub port: u16,
}

pub async fn execute<A: Authenticator>(
    client: SearchConsoleClient<A>,
    site_url: Option<String>,
    args: McpArgs,
) -> GscResult<()> {
    if args.http {
        mcp::serve_http(client, site_url, args.host, args.port).await
    } else {
        mcp::serve_stdio(client, site_url).await
    }
}
