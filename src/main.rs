use clap::Parser;
use quake_feed::utils::{logger, validation::Validate};
use quake_feed::{render, CliConfig, ConfigProvider, EarthquakeLoader, Result, TomlConfig};

fn load_provider(cli: CliConfig) -> Result<Box<dyn ConfigProvider>> {
    match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let config = TomlConfig::from_file(path)?;
            config.validate()?;
            Ok(Box::new(config))
        }
        None => {
            cli.validate()?;
            Ok(Box::new(cli))
        }
    }
}

async fn run(cli: CliConfig) -> Result<String> {
    let provider = load_provider(cli)?;

    let url = provider.feed_query().to_url()?;
    let loader = EarthquakeLoader::new().with_timeout(provider.timeout());

    let records = loader.load(url.as_str()).await?;
    render(&records, provider.output_format())
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting quake-feed");
    tracing::debug!("CLI config: {:?}", cli);

    match run(cli).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::error!("❌ quake-feed failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    }
}
