use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};

use crate::config::{Args, Config};
use crate::format::engine::CommandEngine;
use crate::lsp::backend::Backend;
use crate::style::FsStyleResolver;

/// Start the LSP server
pub async fn serve() -> Result<()> {
    let args = Args::parse();

    // Logging must be live before config assembly so warnings about an
    // unparsable user settings file are not dropped
    env_logger::Builder::from_default_env()
        .parse_filters(&args.log_level)
        .init();

    let config = Config::from_args(args)?;

    // If running under the integration test, exit after a short delay so the test can read stdout to EOF.
    if std::env::var("TAILWIND_SORT_LS_TEST_EXIT").as_deref() == Ok("1") {
        thread::spawn(|| {
            thread::sleep(Duration::from_secs(1));
            std::process::exit(0);
        });
    }

    let engine = Arc::new(CommandEngine::new(config.engine_cmd.clone()));
    let style_resolver = Arc::new(FsStyleResolver);

    let (service, socket) = LspService::build(move |client| {
        Backend::new(client, config.clone(), engine.clone(), style_resolver.clone())
    })
    .finish();

    Server::new(stdin(), stdout(), socket).serve(service).await;

    Ok(())
}
