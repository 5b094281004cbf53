//! Forward simulation and minimum-energy targeting from the command line.
//!
//! ```text
//! cargo run --release --example solve -- simulate <lat> <lon> <speed> <east angle> <elevation>
//! cargo run --release --example solve -- target <lat> <lon> <target lat> <target lon> [mass]
//! ```
//!
//! Angles are in degrees, speeds in m/s and masses in kg. Set `RUST_LOG=info`
//! to follow the solvers.

use ballistic_sim::{Coordinates, LaunchVector, SolverConfig, TrajectorySolver};
use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "solve")]
#[command(about = "Ballistic trajectories around the Earth", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a launch and report where it lands
    #[command(allow_negative_numbers = true)]
    Simulate {
        /// Launch latitude (degrees)
        lat: f64,
        /// Launch longitude (degrees)
        lon: f64,
        /// Launch speed relative to the ground (m/s)
        speed: f64,
        /// Direction of the launch, counterclockwise from east (degrees)
        east_angle: f64,
        /// Angle above the horizon (degrees)
        elevation: f64,
    },

    /// Find the cheapest launch that hits a target
    #[command(allow_negative_numbers = true)]
    Target {
        /// Launch latitude (degrees)
        lat: f64,
        /// Launch longitude (degrees)
        lon: f64,
        /// Target latitude (degrees)
        target_lat: f64,
        /// Target longitude (degrees)
        target_lon: f64,
        /// Projectile mass (kg)
        #[arg(default_value_t = 1.0)]
        mass: f64,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let config = SolverConfig::default();
    let solver = TrajectorySolver::new(&config).unwrap();

    match cli.command {
        Commands::Simulate {
            lat,
            lon,
            speed,
            east_angle,
            elevation,
        } => {
            let site = Coordinates::from_degrees(lat, lon);
            let launch = LaunchVector::from_degrees(speed, east_angle, elevation);
            let trajectory = solver.simulate(site, launch);

            if !trajectory.landed {
                eprintln!("The projectile never came back down.");
            }
            println!();
            println!("Final latitude: {}°", trajectory.landing_site.latitude_degrees());
            println!("Final longitude: {}°", trajectory.landing_site.longitude_degrees());
            println!("Flight time: {} s", trajectory.flight_time());
        }
        Commands::Target {
            lat,
            lon,
            target_lat,
            target_lon,
            mass,
        } => {
            let site = Coordinates::from_degrees(lat, lon);
            let target = Coordinates::from_degrees(target_lat, target_lon);

            let solution = match solver.minimize_energy(site, target, mass) {
                Ok(solution) => solution,
                Err(e) => {
                    eprintln!("{e}");
                    return ExitCode::FAILURE;
                }
            };
            let launch = solution.launch();

            if !solution.best.solution.is_converged() {
                eprintln!("The target could not be hit; showing the closest attempt.");
            }
            println!();
            println!("Minimum velocity (local coordinates):");
            println!("Speed: {} m/s", launch.speed);
            println!(
                "Local direction angle: {}° (0° facing east, increases counterclockwise)",
                launch.east_angle_degrees()
            );
            println!("Local elevation angle: {}°", launch.elevation_degrees());
            println!("Energy: {} J", solution.energy());
        }
    }

    ExitCode::SUCCESS
}
