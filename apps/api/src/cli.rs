use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "jobtrack-api", version)]
#[command(about = "Job application tracker API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP API (default)
    Serve,

    /// Replace a user's data with sample companies, interviews and prep notes
    Seed {
        /// Token subject of the user to seed; created if unknown
        #[arg(long, value_name = "SUBJECT")]
        user: String,
    },

    /// Print a signed bearer token for local testing
    Token {
        /// Token subject
        #[arg(long, value_name = "SUBJECT")]
        user: String,

        #[arg(long)]
        email: Option<String>,

        /// Validity in hours
        #[arg(long, default_value_t = 24)]
        hours: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_is_default() {
        let cli = Cli::try_parse_from(["jobtrack-api"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn test_seed_requires_user() {
        assert!(Cli::try_parse_from(["jobtrack-api", "seed"]).is_err());
        let cli = Cli::try_parse_from(["jobtrack-api", "seed", "--user", "demo"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Seed {
                user: "demo".into()
            })
        );
    }

    #[test]
    fn test_token_defaults() {
        let cli = Cli::try_parse_from(["jobtrack-api", "token", "--user", "demo"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Token {
                user: "demo".into(),
                email: None,
                hours: 24
            })
        );
    }
}
