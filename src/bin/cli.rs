//! Glossa CLI Client
//!
//! Command-line interface for querying a DICT server.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use glossa::{Config, Database, MatchingStrategy, Session};

/// Glossa CLI
#[derive(Parser, Debug)]
#[command(name = "glossa-cli")]
#[command(about = "CLI for querying DICT (RFC 2229) dictionary servers")]
struct Args {
    /// Server hostname
    #[arg(short = 'H', long, default_value = "dict.org")]
    host: String,

    /// Server port
    #[arg(short, long, default_value_t = glossa::config::DEFAULT_PORT)]
    port: u16,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up definitions for a word
    Define {
        /// The word or phrase to define
        word: String,

        /// Database to search ('*' = all, '!' = first with a hit)
        #[arg(short, long, default_value = "*")]
        database: String,
    },

    /// List headwords matching a pattern
    Match {
        /// The word or phrase to match
        word: String,

        /// Matching strategy (e.g. exact, prefix)
        #[arg(short, long, default_value = "prefix")]
        strategy: String,

        /// Database to search ('*' = all, '!' = first with a hit)
        #[arg(short, long, default_value = "*")]
        database: String,
    },

    /// List the databases the server offers
    Databases,

    /// List the matching strategies the server offers
    Strategies,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = Config::builder().host(args.host).port(args.port).build();
    let session = match Session::connect(&config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let result = run(&session, args.command);
    session.close();

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(session: &Session, command: Commands) -> glossa::Result<()> {
    match command {
        Commands::Define { word, database } => {
            let database = Database::new(database, "");
            let definitions = session.define(&word, &database)?;
            if definitions.is_empty() {
                println!("no definitions found for {:?}", word);
            }
            for definition in definitions {
                println!("{}", definition);
            }
        }

        Commands::Match {
            word,
            strategy,
            database,
        } => {
            let database = Database::new(database, "");
            let strategy = MatchingStrategy::new(strategy, "");
            let matches = session.match_words(&word, &strategy, &database)?;
            if matches.is_empty() {
                println!("no matches found for {:?}", word);
            }
            for headword in matches {
                println!("{}", headword);
            }
        }

        Commands::Databases => {
            for database in session.databases()? {
                println!("{}", database);
            }
        }

        Commands::Strategies => {
            for strategy in session.strategies()? {
                println!("{}", strategy);
            }
        }
    }

    Ok(())
}
