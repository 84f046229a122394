use std::path::PathBuf;
use std::process;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use motoralert::alerts::AlertEngine;
use motoralert::models::{AlertSeverity, NewMaintenance, NewVehicle, Vehicle};
use motoralert::storage::GarageStore;
use motoralert::utils::GarageError;
use motoralert::validation::VinValidator;
use motoralert::VehicleChecker;

#[derive(Parser)]
#[command(name = "motoralert")]
#[command(version)]
#[command(about = "Track vehicles, maintenance and inspection due dates", long_about = None)]
struct Cli {
    /// Directory holding the garage data files
    #[arg(long, value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage vehicles
    Vehicle {
        #[command(subcommand)]
        command: VehicleCommands,
    },
    /// Manage maintenance records
    Maintenance {
        #[command(subcommand)]
        command: MaintenanceCommands,
    },
    /// Show inspection alerts for the whole garage
    Alerts,
    /// Show garage totals
    Stats,
    /// Validate a VIN
    Vin {
        /// Raw VIN string, in any spelling
        vin: String,
    },
    /// Clear stored data
    Reset {
        /// Clear the history trail
        #[arg(long)]
        history: bool,
        /// Clear all maintenance records
        #[arg(long)]
        maintenance: bool,
        /// Clear everything, vehicles included
        #[arg(long)]
        all: bool,
    },
}

#[derive(Subcommand)]
enum VehicleCommands {
    /// Register a new vehicle
    Add {
        #[arg(long)]
        plate: String,
        #[arg(long)]
        make: String,
        #[arg(long)]
        model: String,
        /// Registration year
        #[arg(long)]
        year: Option<i32>,
        /// Odometer reading in kilometers
        #[arg(long)]
        mileage: Option<u32>,
        #[arg(long)]
        vin: Option<String>,
    },
    /// List all vehicles with their inspection status
    List,
    /// Show one vehicle in detail (by id or plate)
    Show { vehicle: String },
    /// Remove a vehicle and everything recorded for it
    Rm { vehicle: String },
}

#[derive(Subcommand)]
enum MaintenanceCommands {
    /// Record a maintenance job for a vehicle
    Add {
        /// Vehicle id or plate
        vehicle: String,
        #[arg(long)]
        title: String,
        /// Odometer reading at the time of service
        #[arg(long)]
        mileage: u32,
        #[arg(long)]
        cost: u64,
        /// Service date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List a vehicle's maintenance records
    List {
        /// Vehicle id or plate
        vehicle: String,
    },
    /// Delete a maintenance record by id
    Rm { id: String },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), GarageError> {
    let dir = cli.data_dir.unwrap_or_else(GarageStore::default_dir);
    let today = Local::now().naive_local().date();

    match cli.command {
        Commands::Vehicle { command } => run_vehicle(command, &dir, today),
        Commands::Maintenance { command } => run_maintenance(command, &dir, today),
        Commands::Alerts => {
            let store = GarageStore::open(&dir)?;
            let alerts = AlertEngine::new().scan(store.vehicles(), today);
            if alerts.is_empty() {
                println!("No pending inspections. Safe travels!");
                return Ok(());
            }
            for alert in alerts {
                let tag = match alert.severity {
                    AlertSeverity::Critical => "CRITICAL",
                    AlertSeverity::Warning => "WARNING",
                };
                println!("[{}] {} — {} ({})", tag, alert.title, alert.message, alert.plate);
            }
            Ok(())
        }
        Commands::Stats => {
            let store = GarageStore::open(&dir)?;
            let stats = store.stats(today);
            println!("Vehicles:       {}", stats.total_vehicles);
            println!("Total invested: ${}", stats.total_invested);
            println!("Active alerts:  {}", stats.active_alerts);
            Ok(())
        }
        Commands::Vin { vin } => {
            let result = VinValidator::validate(&vin);
            if result.is_valid {
                if result.normalized.is_empty() {
                    println!("No VIN supplied, nothing to validate");
                } else {
                    println!("{} is a valid VIN", result.normalized);
                }
            } else {
                println!("{} is NOT a valid VIN", result.normalized);
                for issue in &result.issues {
                    println!("  - {}", issue.message);
                }
                process::exit(1);
            }
            Ok(())
        }
        Commands::Reset {
            history,
            maintenance,
            all,
        } => {
            let mut store = GarageStore::open(&dir)?;
            if all {
                store.clear_all()?;
                println!("Cleared vehicles, maintenance and history");
            } else if maintenance {
                store.clear_maintenance()?;
                println!("Cleared maintenance records");
            } else if history {
                store.clear_history()?;
                println!("Cleared history");
            } else {
                println!("Nothing to do: pass --history, --maintenance or --all");
            }
            Ok(())
        }
    }
}

fn run_vehicle(
    command: VehicleCommands,
    dir: &PathBuf,
    today: NaiveDate,
) -> Result<(), GarageError> {
    match command {
        VehicleCommands::Add {
            plate,
            make,
            model,
            year,
            mileage,
            vin,
        } => {
            let mut store = GarageStore::open(dir)?;
            let vehicle = store.add_vehicle(NewVehicle {
                plate,
                make,
                model,
                year,
                mileage,
                vin,
            })?;
            println!("Registered {} ({} {})", vehicle.plate, vehicle.make, vehicle.model);
            Ok(())
        }
        VehicleCommands::List => {
            let store = GarageStore::open(dir)?;
            if store.vehicles().is_empty() {
                println!("No vehicles registered yet");
                return Ok(());
            }
            let checker = VehicleChecker::new();
            for vehicle in store.vehicles() {
                let result = checker.check(vehicle, today);
                println!(
                    "{}  {} {}  [{}]",
                    vehicle.plate,
                    vehicle.make,
                    vehicle.model,
                    result.inspection_status.label()
                );
            }
            Ok(())
        }
        VehicleCommands::Show { vehicle } => {
            let mut store = GarageStore::open(dir)?;
            let found = match store.find_vehicle(&vehicle) {
                Some(v) => v.clone(),
                None => return Err(GarageError::VehicleNotFound(vehicle)),
            };
            store.record_view(&found.id)?;
            print_vehicle_report(&store, &found, today);
            Ok(())
        }
        VehicleCommands::Rm { vehicle } => {
            let mut store = GarageStore::open(dir)?;
            let removed = store.remove_vehicle(&vehicle)?;
            println!("Removed {} and its records", removed.plate);
            Ok(())
        }
    }
}

fn run_maintenance(
    command: MaintenanceCommands,
    dir: &PathBuf,
    today: NaiveDate,
) -> Result<(), GarageError> {
    match command {
        MaintenanceCommands::Add {
            vehicle,
            title,
            mileage,
            cost,
            date,
            notes,
        } => {
            let mut store = GarageStore::open(dir)?;
            let record = store.add_maintenance(
                &vehicle,
                NewMaintenance {
                    title,
                    date: date.unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
                    mileage,
                    cost,
                    notes,
                },
            )?;
            println!("Recorded \"{}\" ({})", record.title, record.id);
            Ok(())
        }
        MaintenanceCommands::List { vehicle } => {
            let store = GarageStore::open(dir)?;
            let found = match store.find_vehicle(&vehicle) {
                Some(v) => v.clone(),
                None => return Err(GarageError::VehicleNotFound(vehicle)),
            };
            let records = store.maintenance_for(&found.id);
            if records.is_empty() {
                println!("No maintenance recorded for {}", found.plate);
                return Ok(());
            }
            for record in records {
                println!(
                    "{}  {}  {} km  ${}  ({})",
                    record.date, record.title, record.mileage, record.cost, record.id
                );
            }
            Ok(())
        }
        MaintenanceCommands::Rm { id } => {
            let mut store = GarageStore::open(dir)?;
            let removed = store.remove_maintenance(&id)?;
            println!("Deleted \"{}\"", removed.title);
            Ok(())
        }
    }
}

// Detailed report for one vehicle, in the style of an inspection sheet
fn print_vehicle_report(store: &GarageStore, vehicle: &Vehicle, today: NaiveDate) {
    let checker = VehicleChecker::new();
    let result = checker.check(vehicle, today);

    println!("\n===============================================");
    println!("            VEHICLE DETAIL REPORT");
    println!("===============================================\n");

    println!("VEHICLE INFORMATION:");
    println!("  Plate: {}", vehicle.plate);
    println!("  Make: {}", vehicle.make);
    println!("  Model: {}", vehicle.model);
    match vehicle.year {
        Some(year) => println!("  Registration Year: {}", year),
        None => println!("  Registration Year: —"),
    }
    match vehicle.mileage {
        Some(km) => println!("  Mileage: {} km", km),
        None => println!("  Mileage: —"),
    }
    match &vehicle.vin {
        Some(vin) => println!("  VIN: {}", vin),
        None => println!("  VIN: —"),
    }

    println!("\nCHECKS:");
    println!(
        "  1. Plate Format: {}",
        if result.plate_validation.is_valid {
            "PASSED"
        } else {
            "FAILED"
        }
    );
    println!(
        "  2. VIN: {}",
        if result.vin_validation.is_valid {
            "PASSED"
        } else {
            "FAILED"
        }
    );
    println!(
        "  3. Inspection Status: {}",
        result.inspection_status.label().to_uppercase()
    );

    if !result.issues.is_empty() {
        println!("\nISSUES FOUND:");
        for issue in &result.issues {
            println!("  - {}", issue.message);
        }
    }

    let records = store.maintenance_for(&vehicle.id);
    if !records.is_empty() {
        println!("\nMAINTENANCE:");
        for record in records {
            println!(
                "  {}  {}  {} km  ${}",
                record.date, record.title, record.mileage, record.cost
            );
        }
    }

    println!(
        "\nVehicle record: {}",
        if result.is_valid { "VALID" } else { "INVALID" }
    );
}
