//! Tweetshot - Main Entry Point
//!
//! Loads settings, wires the reqwest transport into the item processor and
//! runs one subcommand. Records go to stdout as JSON lines; logs go to stderr.

mod args;
mod io;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use tweetshot_application::{ItemProcessor, TemplateParameterResolver};
use tweetshot_domain::CredentialRef;
use tweetshot_infrastructure::{
    ReqwestTransport, Settings, StaticCredentialStore, verify_credential,
};

use args::{BatchArgs, Cli, Commands, GetArgs};
use io::CliResult;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "tweetshot failed");
        return Err(e);
    }
    Ok(())
}

async fn run(cli: Cli) -> CliResult<()> {
    let settings = load_settings(&cli)?;
    let credentials = StaticCredentialStore::from_settings(&settings).await?;
    let transport = Arc::new(ReqwestTransport::new(&settings, Arc::new(credentials))?);
    tracing::debug!(base_url = %transport.base_url(), "transport ready");

    match cli.command {
        Commands::Get(args) => get(transport, &args).await,
        Commands::Batch(args) => {
            let continue_on_error = args.continue_on_error || settings.continue_on_error;
            batch(transport, &args, continue_on_error).await
        }
        Commands::Verify => {
            verify_credential(transport.as_ref(), &CredentialRef::default()).await?;
            println!("credential OK");
            Ok(())
        }
    }
}

/// Merges configuration sources with command-line overrides on top.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(base_url) = &cli.base_url {
        settings.base_url.clone_from(base_url);
    }
    if let Some(key_file) = &cli.key_file {
        settings.api_key_file = Some(key_file.clone());
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        settings.timeout_secs = timeout_secs;
    }
    settings.validate()?;
    Ok(settings)
}

async fn get(transport: Arc<ReqwestTransport>, args: &GetArgs) -> CliResult<()> {
    let resolver =
        TemplateParameterResolver::new(args.to_parameters(), vec![serde_json::json!({})]);
    let processor = ItemProcessor::new(transport, CredentialRef::default());

    let item = processor.process_item(0, &resolver).await?;
    let record = io::emit(Ok(item), |_, attachment| {
        args.out
            .clone()
            .unwrap_or_else(|| PathBuf::from(&attachment.file_name))
    })
    .await?;

    println!("{record}");
    Ok(())
}

async fn batch(
    transport: Arc<ReqwestTransport>,
    args: &BatchArgs,
    continue_on_error: bool,
) -> CliResult<()> {
    let items = io::read_items(&args.items).await?;
    let parameters = io::read_parameters(&args.params).await?;
    let resolver = TemplateParameterResolver::new(parameters, items);

    let processor = ItemProcessor::new(transport, CredentialRef::default())
        .continue_on_error(continue_on_error);
    let outcomes = processor.process_batch(resolver.item_count(), &resolver).await?;

    if !outcomes.is_empty() {
        tokio::fs::create_dir_all(&args.out_dir).await?;
    }
    let records = io::emit_all(outcomes, |index, attachment| {
        args.out_dir.join(format!("{index}-{}", attachment.file_name))
    })
    .await?;

    for record in records {
        println!("{record}");
    }
    Ok(())
}
