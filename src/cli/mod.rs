//! CLI module for the movies session service
//!
//! - `serve`: run the HTTP server
//! - `issue`: mint a token pair for an identity
//! - `hash-password`: produce a password hash for the directory seed

pub mod issue;
pub mod serve;

use clap::{Parser, Subcommand};

/// Movies session service - token issuance, verification and rotation
#[derive(Parser)]
#[command(name = "movies-session")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Print a freshly signed token pair as JSON
    Issue(issue::IssueArgs),

    /// Print an Argon2 hash for `directory.users[].password_hash`
    HashPassword(issue::HashPasswordArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_issue() {
        let cli = Cli::try_parse_from([
            "movies-session",
            "issue",
            "--id",
            "7",
            "--first-name",
            "Jane",
            "--last-name",
            "Doe",
        ])
        .unwrap();

        match cli.command {
            Command::Issue(args) => {
                assert_eq!(args.id, 7);
                assert_eq!(args.first_name, "Jane");
            }
            _ => panic!("expected issue command"),
        }
    }

    #[test]
    fn test_parse_hash_password() {
        let cli = Cli::try_parse_from(["movies-session", "hash-password", "hunter2"]).unwrap();

        assert!(matches!(cli.command, Command::HashPassword(args) if args.password == "hunter2"));
    }

    #[test]
    fn test_issue_requires_id() {
        assert!(Cli::try_parse_from(["movies-session", "issue"]).is_err());
    }
}
