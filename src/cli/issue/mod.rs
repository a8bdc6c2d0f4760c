//! Operator commands that run without a server

use clap::Args;

use crate::config::AppConfig;
use crate::domain::Identity;
use crate::infrastructure::identity::{Argon2Hasher, PasswordHasher};

#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Identity id, becomes the token subject
    #[arg(long)]
    pub id: u64,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,
}

#[derive(Args, Debug)]
pub struct HashPasswordArgs {
    pub password: String,
}

/// Sign a pair with the configured key and print the token-pair body
pub fn run(args: IssueArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    let sessions = crate::create_session_service(&config)?;

    let identity = Identity::new(args.id, args.first_name, args.last_name);
    let pair = sessions.issuer().issue(&identity)?;

    println!("{}", serde_json::to_string_pretty(&pair)?);

    Ok(())
}

pub fn hash_password(args: HashPasswordArgs) -> anyhow::Result<()> {
    let hash = Argon2Hasher::new().hash(&args.password)?;
    println!("{}", hash);

    Ok(())
}
