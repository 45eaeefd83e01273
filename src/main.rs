use anyhow::Result;
use desk_kit::config::Config;
use desk_kit::menu::{App, INTERRUPTED_MESSAGE};
use std::io::{self, IsTerminal};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("desk_kit=error")),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::load(&std::env::current_dir()?);
    tracing::debug!("Using data dir {}", config.data_dir.display());

    // Ctrl+C outside the board (which reads it as a key in raw mode)
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("\n\n{INTERRUPTED_MESSAGE}");
            std::process::exit(0);
        }
    });

    let interactive = io::stdin().is_terminal() && io::stdout().is_terminal();
    tokio::task::spawn_blocking(move || {
        let stdin = io::stdin();
        let mut app = App::new(config, stdin.lock(), io::stdout()).interactive(interactive);
        app.run()
    })
    .await?
}
