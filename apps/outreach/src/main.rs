mod cli;

use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use outreach::models::{ApiResponse, EmailLogQuery, ResumeFile};
use outreach::{config::Config, ApiClient, Dashboard, RequestCoordinator, ReqwestTransport};

use crate::cli::{Cli, Command, ContactsCommand};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(base_url) = cli.base_url.clone() {
        config.api_base_url = base_url;
    }

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Outreach client v{}", env!("CARGO_PKG_VERSION"));

    let transport = ReqwestTransport::new(config.api_base_url.clone(), config.request_timeout)?;
    info!("Backend: {}", transport.base_url());

    let coordinator = RequestCoordinator::new(config.cache_window);
    let api = ApiClient::new(Arc::new(transport), coordinator);
    let mut dashboard = Dashboard::new(api);

    run(cli.command, &mut dashboard).await
}

async fn run(command: Command, dashboard: &mut Dashboard) -> Result<()> {
    match command {
        Command::Contacts { action } => match action {
            ContactsCommand::List => {
                let response = dashboard.load_contacts().await?;
                print_response(&response)
            }
            ContactsCommand::Add(args) => {
                let response = dashboard.save_contact(&args.into()).await?;
                print_response(&response)
            }
            ContactsCommand::Update { id, contact } => {
                let response = dashboard.edit_contact(&id, &contact.into()).await?;
                print_response(&response)
            }
            ContactsCommand::Delete { id } => {
                let response = dashboard.remove_contact(&id).await?;
                print_response(&response)
            }
        },
        Command::Send { resume, to } => {
            dashboard.attach_resume(ResumeFile::from_path(&resume)?);
            dashboard.load_profile().await;
            let loaded = dashboard.load_contacts().await?;
            if !loaded.success {
                bail!("Could not load contacts: {}", loaded.failure_message());
            }

            let response = match to {
                Some(id) => dashboard.send_to_individual(&id).await?,
                None => dashboard.bulk_send().await?,
            };
            print_response(&response)?;
            info!("Emails sent this run: {}", dashboard.sent_count());
            Ok(())
        }
        Command::Logs { limit, page } => {
            let query = EmailLogQuery { limit, page };
            print_response(&dashboard.api().get_email_logs(&query).await?)
        }
        Command::Stats => print_response(&dashboard.api().get_email_stats().await?),
        Command::Analytics { report } => {
            print_response(&dashboard.api().get_analytics(&report).await?)
        }
        Command::Profile => print_response(&dashboard.api().get_profile().await?),
        Command::Settings => print_response(&dashboard.api().get_settings().await?),
    }
}

fn print_response<T: Serialize>(response: &ApiResponse<T>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    if !response.success {
        bail!(response.failure_message().to_string());
    }
    Ok(())
}
