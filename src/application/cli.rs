#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ExperienceBand;
use crate::domain::models::VacancyQuery;
use crate::domain::models::VacancySearch;
use crate::domain::services::dialogue::render_vacancies;
use crate::infrastructure::vacancies::headhunter::HeadHunter;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

/// Runs a single search outside of Telegram, printing what the bot would
/// reply with.
async fn search(matches: &ArgMatches) -> Result<()> {
    let title = matches
        .get_one::<String>("title")
        .map(|e| return e.to_string())
        .unwrap_or_default();
    let salary = matches.get_one::<u64>("salary").copied().unwrap_or(1);
    let experience = matches
        .get_one::<String>("experience")
        .and_then(|e| return ExperienceBand::from_api_id(e))
        .unwrap_or(ExperienceBand::NoExperience);

    let query = VacancyQuery::new(&title, salary, experience);
    let vacancies = HeadHunter::default().search(&query).await?;

    println!("{}", render_vacancies(&vacancies).text);

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_search() -> Command {
    return Command::new("search")
        .about("Runs a single vacancy search against hh.ru and prints the results.")
        .arg(
            Arg::new("title")
                .short('t')
                .long("title")
                .help("Vacancy title to search for.")
                .num_args(1)
                .required(true),
        )
        .arg(
            Arg::new("salary")
                .short('s')
                .long("salary")
                .help("Desired salary.")
                .num_args(1)
                .value_parser(value_parser!(u64).range(1..))
                .required(true),
        )
        .arg(
            Arg::new("experience")
                .short('e')
                .long("experience")
                .help("Work experience range.")
                .num_args(1)
                .value_parser(PossibleValuesParser::new(ExperienceBand::api_ids()))
                .required(true),
        );
}

pub fn build() -> Command {
    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("vacancybot")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(false)
        .subcommand(Command::new("run").about("Start answering Telegram chats. This is the default."))
        .subcommand(subcommand_search())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("VACANCYBOT_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::TelegramToken.to_string())
                .long(ConfigKey::TelegramToken.to_string())
                .env("TELEGRAM_BOT_TOKEN")
                .hide_env_values(true)
                .num_args(1)
                .help("Telegram bot access token issued by BotFather.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::TelegramURL.to_string())
                .long(ConfigKey::TelegramURL.to_string())
                .env("VACANCYBOT_TELEGRAM_URL")
                .num_args(1)
                .help(format!("Telegram Bot API URL. [default: {}]", Config::default(ConfigKey::TelegramURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::VacanciesURL.to_string())
                .long(ConfigKey::VacanciesURL.to_string())
                .env("VACANCYBOT_VACANCIES_URL")
                .num_args(1)
                .help(format!("hh.ru API URL used for vacancy searches. [default: {}]", Config::default(ConfigKey::VacanciesURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::UserAgent.to_string())
                .long(ConfigKey::UserAgent.to_string())
                .env("VACANCYBOT_USER_AGENT")
                .num_args(1)
                .help(format!("User-Agent sent to hh.ru, which rejects anonymous clients. [default: {}]", Config::default(ConfigKey::UserAgent)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::PollTimeout.to_string())
                .long(ConfigKey::PollTimeout.to_string())
                .env("VACANCYBOT_POLL_TIMEOUT")
                .num_args(1)
                .help(format!("Seconds Telegram may hold a long poll open before answering. [default: {}]", Config::default(ConfigKey::PollTimeout)))
                .global(true),
        );
}

/// Returns true when the bot should start serving.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("search", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            search(subcmd_matches).await?;
            return Ok(false);
        }
        Some(("run", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
        }
        _ => {
            Config::load(vec![&matches]).await?;
        }
    }

    Config::ensure_token()?;

    return Ok(true);
}
