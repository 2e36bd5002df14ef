#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;

use anyhow::Error;
use anyhow::Result;
use tokio::signal;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use yansi::Paint;

use crate::application::cli;
use crate::domain::models::MessengerBox;
use crate::domain::services::BotService;
use crate::domain::services::Conversations;
use crate::domain::services::Sessions;
use crate::infrastructure::messengers::telegram::Telegram;
use crate::infrastructure::vacancies::headhunter::HeadHunter;

fn handle_error(err: Error) {
    eprintln!(
        "{}",
        Paint::red(format!(
            "vacancybot has failed with the following app version and error.\n\nVersion: {}\nError: {:#}",
            env!("CARGO_PKG_VERSION"),
            err
        ))
    );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        eprintln!("\nRunning with RUST_BACKTRACE=1 can help explain further what the issue is.");
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

/// Logs to stdout unless `VACANCYBOT_LOG_DIR` is set, in which case JSON lines
/// are written to `debug.log` inside it. `RUST_LOG` overrides the level.
fn init_logging() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| return EnvFilter::new("vacancybot=info"));

    if let Ok(log_dir) = env::var("VACANCYBOT_LOG_DIR") {
        let file_appender = tracing_appender::rolling::never(log_dir, "debug.log");
        let (writer, guard) = tracing_appender::non_blocking(file_appender);
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(writer)
            .init();

        return Some(guard);
    }

    tracing_subscriber::fmt().with_env_filter(filter).init();
    return None;
}

async fn serve() -> Result<()> {
    let messenger: MessengerBox = Box::<Telegram>::default();
    messenger.health_check().await?;

    let conversations =
        Conversations::new(Box::<Sessions>::default(), Box::<HeadHunter>::default());

    tokio::select!(
        res = BotService::start(messenger, conversations) => res?,
        res = signal::ctrl_c() => {
            res?;
            tracing::info!("Shutting down");
        },
    );

    return Ok(());
}

#[tokio::main]
async fn main() {
    better_panic::Settings::auto().install();

    let _guard = init_logging();

    match cli::parse().await {
        Err(ready_err) => {
            handle_error(ready_err);
            return;
        }
        Ok(false) => return,
        Ok(true) => {}
    }

    if let Err(err) = serve().await {
        handle_error(err);
    }
}
