//! `shopify-admin-mcp`: exposes Shopify Admin operations as MCP tools over
//! stdio.
//!
//! Configuration comes from the environment, optionally through a `.env`
//! file: `SHOPIFY_SHOP_URL` and `SHOPIFY_ACCESS_TOKEN` are required,
//! `SHOPIFY_API_VERSION` and `SHOPIFY_API_BASE_URL` are optional. Logging is
//! controlled by `RUST_LOG` and `LOG_FORMAT`.

use anyhow::Context;
use shopify_admin_tools::mcp;
use shopify_admin_tools::observability::{init_logging, LogFormat};
use shopify_admin_tools::{AdminClient, ShopifyConfig, ShopifyTools};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    init_logging(LogFormat::from_env()).context("failed to initialize logging")?;
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => tracing::debug!("no .env file found"),
        Err(e) => tracing::warn!(error = %e, "failed to load .env"),
    }

    let config = ShopifyConfig::from_env().context("invalid Shopify configuration")?;
    tracing::info!(
        shop = %config.shop(),
        api_version = %config.api_version(),
        "starting Shopify Admin MCP server"
    );

    let client = AdminClient::new(&config).context("failed to create Admin API client")?;
    mcp::run_stdio(ShopifyTools::new(client))
        .await
        .context("MCP server I/O failed")?;

    Ok(())
}
