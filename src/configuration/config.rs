#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::IntoEnumIterator;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ConfigFile,
    PollTimeout,
    TelegramToken,
    TelegramURL,
    UserAgent,
    VacanciesURL,
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        let config_path = dirs::config_dir()
            .map(|dir| return dir.join("vacancybot/config.toml"))
            .unwrap_or_else(|| return path::PathBuf::from("config.toml"));
        let user_agent = format!("vacancybot/{}", env!("CARGO_PKG_VERSION"));

        let res: &str = match key {
            ConfigKey::PollTimeout => "30",
            ConfigKey::TelegramToken => "",
            ConfigKey::TelegramURL => "https://api.telegram.org",
            ConfigKey::UserAgent => &user_agent,
            ConfigKey::VacanciesURL => "https://api.hh.ru",

            // Special
            ConfigKey::ConfigFile => return config_path.to_string_lossy().to_string(),
        };

        return res.to_string();
    }

    /// Keys that must be integers, whichever source they come from.
    fn is_integer(key: ConfigKey) -> bool {
        return key == ConfigKey::PollTimeout;
    }

    fn validate(key: ConfigKey, val: &str) -> Result<()> {
        if Config::is_integer(key) && val.parse::<u64>().is_err() {
            bail!(format!(
                "Invalid value for '{key}': {val}\nExpected a positive whole number"
            ));
        }

        return Ok(());
    }

    /// Resolves every key from defaults, then the config file, then flags and
    /// environment variables, the latter winning.
    pub async fn load(clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }
        Config::set(ConfigKey::ConfigFile, &config_file);

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if key == ConfigKey::ConfigFile {
                    continue;
                }

                if let Some(val) = doc.get(&key.to_string()) {
                    if let Some(val_int) = val.as_integer() {
                        Config::validate(key, &val_int.to_string())?;
                        Config::set(key, &val_int.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        Config::validate(key, val_str)?;
                        Config::set(key, val_str);
                    } else {
                        bail!(format!("config.toml has an invalid value for key '{key}'"));
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::validate(key, val)?;
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            config_file = Config::get(ConfigKey::ConfigFile),
            telegram_url = Config::get(ConfigKey::TelegramURL),
            vacancies_url = Config::get(ConfigKey::VacanciesURL),
            user_agent = Config::get(ConfigKey::UserAgent),
            poll_timeout = Config::get(ConfigKey::PollTimeout),
            "config"
        );

        return Ok(());
    }

    /// Required before the bot may start serving.
    pub fn ensure_token() -> Result<()> {
        if Config::get(ConfigKey::TelegramToken).trim().is_empty() {
            bail!("A Telegram bot token is required. Set TELEGRAM_BOT_TOKEN, pass --telegram-token, or add telegram-token to the config file.");
        }

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_id().as_str() == key.to_string())?;

                let description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default()
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if Config::is_integer(key) {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
