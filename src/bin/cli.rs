use std::path::PathBuf;

use campusgate::modules::hostel::HostelService;
use campusgate::state::init_app_state;
use campusgate_cli::import::import_file;
use campusgate_cli::seeder::{SeedConfig, seed_all};
use campusgate_store::Collection;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "campusgate-cli")]
#[command(about = "Campusgate CLI - Data tools for the campus document store", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the store with fake hostels, students, assignments and fee ledgers
    Seed {
        /// Number of students to create
        #[arg(short = 's', long, default_value = "50")]
        students: usize,

        /// Number of hostels to create
        #[arg(long, default_value = "3")]
        hostels: usize,
    },
    /// Import a JSON array of documents into one collection
    Import {
        /// Collection (table) name, e.g. HostelFee
        collection: String,

        /// Path to the JSON file
        file: PathBuf,
    },
    /// Allocate the next free room number in a hostel
    NextRoom {
        /// Hostel identifier
        hostel_id: String,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    campusgate_observability::init_basic_console_logging();

    let cli = Cli::parse();

    let state = match init_app_state().await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to initialise the store: {e:#}");
            std::process::exit(1);
        }
    };
    let store = state.store.as_ref();

    match cli.command {
        Commands::Seed { students, hostels } => {
            println!("🌱 Seeding {students} students across {hostels} hostels...");
            match seed_all(store, &SeedConfig::new(students, hostels)).await {
                Ok(report) => {
                    println!("✅ Seeding completed");
                    println!("   Hostels: {}", report.hostels);
                    println!("   Students: {}", report.students);
                    println!("   Assignments: {}", report.assignments);
                    println!("   Fee ledgers: {}", report.fee_ledgers);
                    if report.unprocessed > 0 {
                        println!("   ⚠️ Unprocessed: {}", report.unprocessed);
                    }
                }
                Err(e) => {
                    eprintln!("❌ Seeding failed: {e}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Import { collection, file } => {
            let collection: Collection = match collection.parse() {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("❌ {e}");
                    std::process::exit(1);
                }
            };
            match import_file(store, collection, &file).await {
                Ok(report) => {
                    println!(
                        "✅ Imported {} documents into {}",
                        report.written, report.collection
                    );
                    if report.unprocessed > 0 {
                        println!("   ⚠️ Unprocessed: {}", report.unprocessed);
                    }
                }
                Err(e) => {
                    eprintln!("❌ Import failed: {e:#}");
                    std::process::exit(1);
                }
            }
        }
        Commands::NextRoom { hostel_id } => {
            match HostelService::allocate_next_room(store, &hostel_id, state.cas_max_attempts)
                .await
            {
                Ok(room) => println!("🛏️ {hostel_id}: allocated room {room}"),
                Err(e) => {
                    eprintln!("❌ Allocation failed ({}): {:#}", e.status, e.error);
                    std::process::exit(1);
                }
            }
        }
    }
}
