use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const USAGE: &str =
    "usage: chip8 <cycle-delay-ms> <rom> [--cycles N] [--seed N] [--halt-on-error]";

const DEFAULT_CYCLES: u64 = 600;

/// How the host should drive the interpreter
#[derive(Debug, PartialEq)]
pub struct Config {
    pub rom: PathBuf,
    /// Minimum time between two steps
    pub cycle_delay: Duration,
    /// Steps to run before exiting
    pub cycles: u64,
    /// Fixed entropy seed; the clock is used when absent
    pub seed: Option<u64>,
    pub halt_on_error: bool,
}

#[derive(Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("missing {0}")]
    MissingArgument(&'static str),

    #[error("unexpected argument {0:?}")]
    UnexpectedArgument(String),

    #[error("{name} must be a non-negative integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

fn number(name: &'static str, value: Option<String>) -> Result<u64, ConfigError> {
    let value = value.ok_or(ConfigError::MissingArgument(name))?;
    value
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { name, value })
}

impl Config {
    /// Parses the arguments that follow the program name
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self, ConfigError> {
        let mut positional = Vec::new();
        let mut cycles = DEFAULT_CYCLES;
        let mut seed = None;
        let mut halt_on_error = false;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--cycles" => cycles = number("--cycles", args.next())?,
                "--seed" => seed = Some(number("--seed", args.next())?),
                "--halt-on-error" => halt_on_error = true,
                flag if flag.starts_with("--") => {
                    return Err(ConfigError::UnexpectedArgument(arg));
                }
                _ if positional.len() < 2 => positional.push(arg),
                _ => return Err(ConfigError::UnexpectedArgument(arg)),
            }
        }

        let mut positional = positional.into_iter();
        let cycle_delay = number("cycle delay", positional.next())?;
        let rom = positional
            .next()
            .map(PathBuf::from)
            .ok_or(ConfigError::MissingArgument("ROM path"))?;

        Ok(Config {
            rom,
            cycle_delay: Duration::from_millis(cycle_delay),
            cycles,
            seed,
            halt_on_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, ConfigError> {
        Config::from_args(args.iter().map(|a| a.to_string()))
    }

    #[test]
    fn test_positional_only() {
        let config = parse(&["4", "pong.ch8"]).unwrap();
        assert_eq!(
            config,
            Config {
                rom: PathBuf::from("pong.ch8"),
                cycle_delay: Duration::from_millis(4),
                cycles: 600,
                seed: None,
                halt_on_error: false,
            }
        );
    }

    #[test]
    fn test_flags_anywhere() {
        let config =
            parse(&["--seed", "7", "0", "--halt-on-error", "a.ch8", "--cycles", "10"]).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.cycles, 10);
        assert!(config.halt_on_error);
        assert_eq!(config.cycle_delay, Duration::ZERO);
    }

    #[test]
    fn test_missing_rom() {
        assert_eq!(parse(&["4"]), Err(ConfigError::MissingArgument("ROM path")));
    }

    #[test]
    fn test_bad_numbers() {
        assert_eq!(
            parse(&["fast", "a.ch8"]),
            Err(ConfigError::InvalidNumber {
                name: "cycle delay",
                value: "fast".to_string()
            })
        );
        assert_eq!(
            parse(&["1", "a.ch8", "--cycles"]),
            Err(ConfigError::MissingArgument("--cycles"))
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ConfigError::MissingArgument("ROM path").to_string(), "missing ROM path");
        let err = ConfigError::InvalidNumber {
            name: "--seed",
            value: "x".to_string(),
        };
        assert_eq!(err.to_string(), "--seed must be a non-negative integer, got \"x\"");
    }

    #[test]
    fn test_unexpected_arguments() {
        assert_eq!(
            parse(&["1", "a.ch8", "b.ch8"]),
            Err(ConfigError::UnexpectedArgument("b.ch8".to_string()))
        );
        assert_eq!(
            parse(&["1", "a.ch8", "--scale"]),
            Err(ConfigError::UnexpectedArgument("--scale".to_string()))
        );
    }
}
