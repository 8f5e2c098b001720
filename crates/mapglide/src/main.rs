use clap::Parser;
use mapglide::config::AppConfig;
use mapglide::App;
use mapglide_core::AccessToken;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RON config file (default: optional mapglide.ron in the working directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Map access token, overrides config and environment
    #[arg(long)]
    access_token: Option<String>,

    /// Fixed viewport width in logical pixels
    #[arg(long)]
    width: Option<u32>,

    /// Fixed viewport height in logical pixels
    #[arg(long)]
    height: Option<u32>,

    /// Print the destination list and exit
    #[arg(long)]
    list_destinations: bool,

    /// Print the effective configuration as RON and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;

    // CLI flags win over every config layer
    if let Some(token) = args.access_token {
        config.map.access_token = Some(token);
    }
    if let Some(width) = args.width {
        config.window.override_width = Some(width);
    }
    if let Some(height) = args.height {
        config.window.override_height = Some(height);
    }

    if args.list_destinations {
        for (index, destination) in config.catalog().iter().enumerate() {
            println!(
                "{:>2}  {:<16} {:>10.4} {:>10.4}",
                index + 1,
                destination.name,
                destination.latitude,
                destination.longitude
            );
        }
        return Ok(());
    }

    if args.print_config {
        println!("{}", config.to_ron()?);
        return Ok(());
    }

    let token = match config.access_token() {
        Ok(token) => token,
        Err(e) => {
            log::error!("{}", e);
            return Err(e.into());
        }
    };

    pollster::block_on(run(config, token))
}

async fn run(config: AppConfig, token: AccessToken) -> anyhow::Result<()> {
    let (app, event_loop) = App::new(config, token).await?;
    App::run(event_loop, app)
}
