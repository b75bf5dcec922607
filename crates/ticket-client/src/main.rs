//! # Ticket Kiosk
//!
//! Terminal front end for the checkout flow.
//!
//! ## Usage
//!
//! ```bash
//! # Against a running gateway (GATEWAY_URL, default http://localhost:8080)
//! ticket-kiosk
//!
//! # Send the email in-process (needs RESEND_API_KEY)
//! ticket-kiosk --local
//! ```

use clap::Parser;
use std::sync::Arc;
use ticket_client::{confirmation_notice, screen, Command, GatewayClient, KioskArgs, Reaction};
use ticket_core::{
    BoxedNotifier, Catalog, CheckoutFlow, FlowSettings, GatewaySettings, NotificationGateway,
};
use ticket_resend::ResendEmailSender;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = KioskArgs::parse();

    // Logs go to stderr so they don't interleave with the screen
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    dotenvy::dotenv().ok();

    let notifier = build_notifier(args.local)?;
    info!("Confirmation emails via {}", notifier.name());

    let catalog = Arc::new(Catalog::load()?);
    let mut flow = CheckoutFlow::new(catalog, notifier, FlowSettings::from_env());

    println!("{}", screen::render(&flow));
    println!("{}", screen::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("⚠️  {}", e);
                continue;
            }
        };

        if command == Command::Pay {
            println!("⏳ Processing payment...");
        }

        match command.execute(&mut flow).await {
            Ok(Reaction::Redraw(notice)) => {
                println!("{}", screen::render(&flow));
                if let Some(notice) = notice {
                    println!("ℹ️  {}", notice);
                }
            }
            Ok(Reaction::Paid(pending)) => {
                println!("{}", screen::render(&flow));
                let session = flow.subscribe_email_status();
                tokio::spawn(async move {
                    if let Some(notice) = confirmation_notice(pending, session).await {
                        println!("{}", notice);
                    }
                });
            }
            Ok(Reaction::Help) => println!("{}", screen::HELP),
            Ok(Reaction::Quit) => break,
            Err(e) => println!("⚠️  {}", e),
        }
    }

    Ok(())
}

fn build_notifier(local: bool) -> anyhow::Result<BoxedNotifier> {
    if local {
        let sender = ResendEmailSender::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Resend: {}", e))?;
        let gateway = NotificationGateway::new(Arc::new(sender), GatewaySettings::from_env());
        Ok(Arc::new(gateway))
    } else {
        let client = GatewayClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize gateway client: {}", e))?;
        Ok(Arc::new(client))
    }
}
