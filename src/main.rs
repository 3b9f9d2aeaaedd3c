// src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use parcel_tracker::db::models::Parcel;
use parcel_tracker::{ParcelStore, db};
use tracing::info;

#[derive(Parser)]
#[command(name = "parcel-tracker")]
#[command(author, version, about = "Track parcels in a SQLite database", long_about = None)]
struct Cli {
    /// Database path
    #[arg(short, long, global = true, default_value = "tracker.db")]
    db_path: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the parcel database
    Init,
    /// Register a new parcel
    Add {
        /// Client id
        #[arg(short, long)]
        client: i64,
        /// Delivery address
        #[arg(short, long)]
        address: String,
        /// Initial status
        #[arg(short, long, default_value = "registered")]
        status: String,
    },
    /// Show a parcel
    Get {
        /// Parcel number
        number: i64,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the parcels of a client
    List {
        /// Client id
        #[arg(short, long)]
        client: i64,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change the status of a parcel
    SetStatus {
        /// Parcel number
        number: i64,
        /// New status
        status: String,
    },
    /// Change the address of a registered parcel
    SetAddress {
        /// Parcel number
        number: i64,
        /// New address
        address: String,
    },
    /// Delete a registered parcel
    Delete {
        /// Parcel number
        number: i64,
    },
}

/// One-line human readable rendering of a parcel
fn format_parcel(parcel: &Parcel) -> String {
    format!(
        "#{} client={} status={} address={:?} created_at={}",
        parcel.number, parcel.client, parcel.status, parcel.address, parcel.created_at
    )
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let db_path = cli.db_path;

    let Some(command) = cli.command else {
        println!("Parcel Tracker v{}", env!("CARGO_PKG_VERSION"));
        println!("Run 'parcel-tracker --help' for usage information");
        return Ok(());
    };

    match command {
        Commands::Init => {
            info!("Initializing parcel database at: {}", db_path);
            db::init(&db_path)?;
            println!("Database initialized successfully at: {}", db_path);
        }
        Commands::Add {
            client,
            address,
            status,
        } => {
            let conn = db::open(&db_path)?;
            let store = ParcelStore::new(&conn);

            let mut parcel = Parcel::registered_now(client, address);
            parcel.status = status;

            let number = store.add(&parcel)?;
            info!("Registered parcel {} for client {}", number, client);
            println!("Added parcel #{}", number);
        }
        Commands::Get { number, json } => {
            let conn = db::open(&db_path)?;
            let store = ParcelStore::new(&conn);

            match store.get(number) {
                Ok(parcel) if json => println!("{}", serde_json::to_string_pretty(&parcel)?),
                Ok(parcel) => println!("{}", format_parcel(&parcel)),
                Err(e) if e.is_not_found() => {
                    return Err(anyhow::anyhow!("Parcel #{} does not exist", number));
                }
                Err(e) => return Err(e.into()),
            }
        }
        Commands::List { client, json } => {
            let conn = db::open(&db_path)?;
            let parcels = ParcelStore::new(&conn).get_by_client(client)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&parcels)?);
            } else if parcels.is_empty() {
                println!("No parcels found for client {}.", client);
            } else {
                println!("Parcels of client {}:", client);
                for parcel in &parcels {
                    println!("  {}", format_parcel(parcel));
                }
                println!("\nTotal: {} parcel(s)", parcels.len());
            }
        }
        Commands::SetStatus { number, status } => {
            let conn = db::open(&db_path)?;
            ParcelStore::new(&conn).set_status(number, &status)?;
            println!("Parcel #{} status set to {}", number, status);
        }
        Commands::SetAddress { number, address } => {
            let conn = db::open(&db_path)?;
            ParcelStore::new(&conn).set_address(number, &address)?;
            println!("Parcel #{} address updated (only while registered)", number);
        }
        Commands::Delete { number } => {
            let conn = db::open(&db_path)?;
            ParcelStore::new(&conn).delete(number)?;
            println!("Parcel #{} deleted (only while registered)", number);
        }
    }

    Ok(())
}
