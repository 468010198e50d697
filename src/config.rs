use std::env;

use clap::Parser;

/// HTTP API server for recording and querying financial transactions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// File path to the SQLite database. An in-memory database is used when
    /// omitted.
    #[arg(long)]
    pub db_path: Option<String>,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 5001)]
    pub port: u16,
}

/// The credential pair the basic-auth gate accepts. Read once at startup and
/// handed to the router, never a hardcoded literal.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Credentials {
        Credentials {
            username: String::from(username),
            password: String::from(password),
        }
    }

    pub fn from_env() -> Credentials {
        let username = env::var("API_USERNAME")
            .expect("The environment variable 'API_USERNAME' must be set");
        let password = env::var("API_PASSWORD")
            .expect("The environment variable 'API_PASSWORD' must be set");

        Credentials { username, password }
    }
}
