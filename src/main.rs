use clap::Parser;
use fuelwatch::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(()) => {
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Fuelwatch - Spanish Fuel Price Dashboard");
    println!("========================================");
    println!();
    println!("Fetch service-station fuel prices for a province, find the stations");
    println!("nearest to you, and follow how mean prices evolve over time.");
    println!();
    println!("USAGE:");
    println!("    fuelwatch <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    nearby      Find nearby stations and record today's mean price");
    println!("    trend       Show one fuel's price evolution over the last 14 days");
    println!("    compare     Compare price evolution across all fuels");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Stations within 25 km, located by IP, recording Gasolina 95 E5:");
    println!("    fuelwatch nearby");
    println!();
    println!("    # Diesel stations within 10 km of an explicit point in Madrid:");
    println!("    fuelwatch nearby --province 28 --lat 40.4168 --lon -3.7038 \\");
    println!("                     --fuel gasoleo-a --max-distance 10");
    println!();
    println!("    # Two-week diesel trend:");
    println!("    fuelwatch trend --fuel gasoleo-a");
    println!();
    println!("    # One-month comparison across fuels, as JSON:");
    println!("    fuelwatch compare --days 30 --format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    fuelwatch <COMMAND> --help");
}
