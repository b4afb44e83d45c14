use clap::Parser;
use tracing_subscriber::EnvFilter;
use url::Url;

use clearpass::ClearanceClient;

#[derive(Parser)]
#[command(name = "clearpass")]
#[command(about = "Desktop client for the government travel-clearance service")]
struct Cli {
    /// Base URL of the clearance backend
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    server: Url,

    /// Log filter, e.g. "clearpass=debug"
    #[arg(long, default_value = "clearpass=info")]
    log: String,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&args.log)?)
        .init();

    let client = ClearanceClient::new(args.server)?;

    #[cfg(feature = "gui")]
    {
        clearpass::gui::run(client).map_err(|e| anyhow::anyhow!("GUI failed to start: {e}"))?;
        Ok(())
    }

    #[cfg(not(feature = "gui"))]
    {
        let _ = client;
        anyhow::bail!("clearpass was built without the gui feature");
    }
}
