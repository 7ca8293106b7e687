//! MCP transports: stdio for local clients, Streamable HTTP behind axum.

use std::net::IpAddr;
use std::sync::Arc;

use rmcp::{
    ServiceExt,
    transport::{
        stdio,
        streamable_http_server::{
            StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
        },
    },
};
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::auth::Authenticator;
use crate::client::SearchConsoleClient;
use crate::error::{GscError, GscResult};

use super::server::GscMcpServer;

/// Create MCP Streamable HTTP service
///
/// Every session gets its own [`GscMcpServer`] sharing one API client.
/// The result can be nested into an axum router.
pub fn create_mcp_service<A: Authenticator>(
    client: impl Into<Arc<SearchConsoleClient<A>>>,
    default_site: Option<String>,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<GscMcpServer<A>, LocalSessionManager> {
    let client = client.into();

    // Returns io::Error to match rmcp's expected signature
    let service_factory = move || -> Result<GscMcpServer<A>, std::io::Error> {
        Ok(GscMcpServer::new(Arc::clone(&client), default_site.clone()))
    };

    let config = StreamableHttpServerConfig::default().with_cancellation_token(cancellation_token);

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        config,
    )
}

/// Serve MCP over stdin/stdout until the client disconnects.
pub async fn serve_stdio<A: Authenticator>(
    client: SearchConsoleClient<A>,
    default_site: Option<String>,
) -> GscResult<()> {
    info!("serving MCP over stdio");
    let service = GscMcpServer::new(client, default_site)
        .serve(stdio())
        .await
        .map_err(transport_error)?;
    service.waiting().await.map_err(transport_error)?;
    Ok(())
}

/// Serve MCP over Streamable HTTP at `/mcp` until Ctrl-C.
pub async fn serve_http<A: Authenticator>(
    client: SearchConsoleClient<A>,
    default_site: Option<String>,
    host: IpAddr,
    port: u16,
) -> GscResult<()> {
    let ct = CancellationToken::new();
    let service = create_mcp_service(client, default_site, ct.child_token());

    let app = axum::Router::new()
        .nest_service("/mcp", service)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .map_err(|e| GscError::Transport {
            message: format!("failed to bind {}:{}: {}", host, port, e),
        })?;
    info!("MCP server listening on http://{}:{}/mcp", host, port);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::signal::ctrl_c().await.ok();
            ct.cancel();
        })
        .await
        .map_err(transport_error)?;
    Ok(())
}

fn transport_error(e: impl std::fmt::Display) -> GscError {
    GscError::Transport {
        message: e.to_string(),
    }
}
