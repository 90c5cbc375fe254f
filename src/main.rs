use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{health, run};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "bastion-weekly")]
#[command(version = VERSION)]
#[command(about = "Weekly Bastion Codex content run: pipeline, health checks, publish")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute the full weekly run
    Run(run::RunArgs),
    /// Run artifact health checks only, without publishing
    Health(health::HealthArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Run(args) => {
            let (result, exit_code) = output::map_cmd_result(run::run_json(args));
            output::print_json_result(result);
            exit_code
        }
        Commands::Health(args) => {
            let (result, exit_code) = output::map_cmd_result(health::run_json(args));
            output::print_json_result(result);
            exit_code
        }
    };

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
