//! Command-line arguments

use clap::Parser;
use foreman_client::EntityId;

/// Produce an Ansible Inventory file based on Foreman
#[derive(Parser, Debug)]
#[command(name = "foreman-inventory", version, about, long_about = None)]
pub struct Cli {
    /// List instances (default: True)
    #[arg(long, default_value_t = true)]
    pub list: bool,

    /// Get all the variables about a specific instance
    #[arg(long, value_name = "ID")]
    pub host: Option<String>,

    /// Get all the variables for all the instances
    #[arg(long)]
    pub all: bool,
}

/// What the invocation asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Groups plus every host's variables
    All,
    /// Variables of one host
    Host(EntityId),
    /// Groups only
    List,
    /// Nothing requested
    Empty,
}

impl Cli {
    /// `--all` wins over `--host`, which wins over `--list`
    ///
    /// An empty `--host` value counts as not given.
    #[must_use]
    pub fn mode(&self) -> Mode {
        if self.all {
            Mode::All
        } else if let Some(host) = self.host.as_deref().filter(|host| !host.is_empty()) {
            Mode::Host(EntityId::new(host))
        } else if self.list {
            Mode::List
        } else {
            Mode::Empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn mode(args: &[&str]) -> Mode {
        let argv = std::iter::once("foreman-inventory").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap().mode()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_list_is_default() {
        assert_eq!(mode(&[]), Mode::List);
        assert_eq!(mode(&["--list"]), Mode::List);
    }

    #[test]
    fn test_host() {
        assert_eq!(
            mode(&["--host", "web01.example.com"]),
            Mode::Host(EntityId::from("web01.example.com"))
        );
        assert_eq!(mode(&["--list", "--host=12"]), Mode::Host(EntityId::from(12_u64)));
    }

    #[test]
    fn test_empty_host_falls_back_to_list() {
        assert_eq!(mode(&["--host", ""]), Mode::List);
        assert_eq!(mode(&["--host="]), Mode::List);
    }

    #[test]
    fn test_all_takes_precedence() {
        assert_eq!(mode(&["--all"]), Mode::All);
        assert_eq!(mode(&["--host", "web01", "--all"]), Mode::All);
    }

    #[test]
    fn test_empty_when_list_disabled() {
        let cli = Cli {
            list: false,
            host: None,
            all: false,
        };
        assert_eq!(cli.mode(), Mode::Empty);
    }

    #[test]
    fn test_rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["foreman-inventory", "extra"]).is_err());
    }
}
