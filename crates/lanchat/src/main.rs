//! `lanchat` binary: reads configuration from the environment and serves.
//!
//! ```text
//! PORT=4000 RUST_LOG=lanchat=debug lanchat
//! ```

use lanchat::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), LanChatError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ChatConfig::from_env()?;
    tracing::info!(
        addr = %config.bind_addr(),
        max_line_len = config.max_line_len,
        "starting lanchat"
    );

    let server = LanChatServerBuilder::from_config(&config).build().await?;
    server.run_until_ctrl_c().await
}
