use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "globetrotter")]
#[command(about = "Terminal trip planner for the GlobeTrotter API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against a real GlobeTrotter API server
    Run,
    /// Run in dev mode with local in-memory data
    Dev,
    /// Log in with email and password and save the session
    Login,
    /// Remove the local session
    Logout,
    /// Open a shared itinerary by trip id or share link
    Shared { target: String },
    /// Print config path and create default file if missing
    ConfigPath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_is_implied_without_subcommand() {
        let cli = Cli::try_parse_from(["globetrotter"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn shared_takes_a_target() {
        let cli = Cli::try_parse_from(["globetrotter", "shared", "http://x/shared/4"]).unwrap();
        match cli.command {
            Some(Commands::Shared { target }) => assert_eq!(target, "http://x/shared/4"),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
