//! Player input and command-line flags.

use thiserror::Error;

/// A parsed turn command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Judge the criminal at this docket index (0-based).
    Target(usize),
    /// Lie low this turn.
    Skip,
    /// Put the notebook away.
    Quit,
}

/// Why a line of input was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Nothing was typed.
    #[error("no choice entered")]
    Empty,

    /// Not a number, 's', or 'q'.
    #[error("'{0}' is not a valid choice")]
    Unrecognized(String),

    /// A number outside 1..=docket length.
    #[error("choose a number between 1 and {available}")]
    OutOfRange {
        /// The number typed (1-based).
        choice: usize,
        /// Docket length.
        available: usize,
    },

    /// A flag this program doesn't know.
    #[error("unknown argument '{0}'")]
    UnknownFlag(String),

    /// A flag that needs a value got none.
    #[error("{0} requires a value")]
    MissingValue(&'static str),

    /// A flag value that doesn't parse.
    #[error("invalid value '{value}' for {flag}")]
    InvalidValue {
        /// Flag name.
        flag: &'static str,
        /// What was given.
        value: String,
    },
}

/// Parse one line of turn input.
///
/// Numbers are 1-based as displayed; the returned index is 0-based.
///
/// ```
/// use the_judge::cli::{parse_command, Command};
///
/// assert_eq!(parse_command(" 2 ", 3), Ok(Command::Target(1)));
/// assert_eq!(parse_command("S", 3), Ok(Command::Skip));
/// assert_eq!(parse_command("q", 3), Ok(Command::Quit));
/// assert!(parse_command("4", 3).is_err());
/// ```
pub fn parse_command(line: &str, available: usize) -> Result<Command, InputError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "q" => return Ok(Command::Quit),
        "s" => return Ok(Command::Skip),
        _ => {}
    }

    let choice: usize = trimmed
        .parse()
        .map_err(|_| InputError::Unrecognized(trimmed.to_string()))?;
    if choice == 0 || choice > available {
        return Err(InputError::OutOfRange { choice, available });
    }
    Ok(Command::Target(choice - 1))
}

/// Parse a y/n answer. Anything but "y" is no.
#[must_use]
pub fn parse_confirmation(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("y")
}

/// Command-line options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliOptions {
    /// Seed for a reproducible session.
    pub seed: Option<u64>,
    /// Print text instantly instead of typing it out.
    pub fast: bool,
    /// Show usage and exit.
    pub help: bool,
}

impl CliOptions {
    /// Usage text for `--help`.
    pub const USAGE: &'static str = "\
Usage: the-judge [OPTIONS]

Options:
  --seed <N>   Play a reproducible session
  --fast       Disable the typewriter effect
  -h, --help   Show this message";

    /// Parse arguments (without the program name).
    ///
    /// ```
    /// use the_judge::cli::CliOptions;
    ///
    /// let opts = CliOptions::parse(["--seed", "42", "--fast"]).unwrap();
    /// assert_eq!(opts.seed, Some(42));
    /// assert!(opts.fast);
    /// ```
    pub fn parse<I, S>(args: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "--seed" => {
                    let value = args.next().ok_or(InputError::MissingValue("--seed"))?;
                    let value = value.as_ref();
                    options.seed = Some(value.parse().map_err(|_| InputError::InvalidValue {
                        flag: "--seed",
                        value: value.to_string(),
                    })?);
                }
                "--fast" => options.fast = true,
                "-h" | "--help" => options.help = true,
                other => return Err(InputError::UnknownFlag(other.to_string())),
            }
        }

        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_are_one_based() {
        assert_eq!(parse_command("1", 1), Ok(Command::Target(0)));
        assert_eq!(parse_command("3", 3), Ok(Command::Target(2)));
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            parse_command("0", 2),
            Err(InputError::OutOfRange {
                choice: 0,
                available: 2
            })
        );
        assert_eq!(
            parse_command("3", 2),
            Err(InputError::OutOfRange {
                choice: 3,
                available: 2
            })
        );
    }

    #[test]
    fn test_letters_are_case_insensitive() {
        assert_eq!(parse_command("Q", 2), Ok(Command::Quit));
        assert_eq!(parse_command(" s\n", 2), Ok(Command::Skip));
    }

    #[test]
    fn test_garbage() {
        assert_eq!(parse_command("", 2), Err(InputError::Empty));
        assert_eq!(parse_command("   \n", 2), Err(InputError::Empty));
        assert_eq!(
            parse_command("kill them all", 2),
            Err(InputError::Unrecognized("kill them all".into()))
        );
        assert_eq!(
            parse_command("-1", 2),
            Err(InputError::Unrecognized("-1".into()))
        );
    }

    #[test]
    fn test_confirmation() {
        assert!(parse_confirmation("y"));
        assert!(parse_confirmation(" Y \n"));
        assert!(!parse_confirmation("yes"));
        assert!(!parse_confirmation("n"));
        assert!(!parse_confirmation(""));
    }

    #[test]
    fn test_cli_defaults() {
        let empty: [&str; 0] = [];
        assert_eq!(CliOptions::parse(empty), Ok(CliOptions::default()));
    }

    #[test]
    fn test_cli_flags() {
        let opts = CliOptions::parse(["--help"]).unwrap();
        assert!(opts.help);

        assert_eq!(
            CliOptions::parse(["--seed"]),
            Err(InputError::MissingValue("--seed"))
        );
        assert_eq!(
            CliOptions::parse(["--seed", "abc"]),
            Err(InputError::InvalidValue {
                flag: "--seed",
                value: "abc".into()
            })
        );
        assert_eq!(
            CliOptions::parse(["--turbo"]),
            Err(InputError::UnknownFlag("--turbo".into()))
        );
    }
}
