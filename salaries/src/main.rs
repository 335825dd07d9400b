//! Salaries CLI - interactive reports over an employee salary CSV
//!
//! ```bash
//! salaries                              # start the menu, load a file with "1"
//! salaries --load ds_salaries.csv       # preload a dataset
//! salaries --output-dir reports/        # where commands 2 and 3 save their exports
//! RUST_LOG=salaries=debug salaries      # verbose logs on stderr
//! ```

use clap::Parser;
use salaries::{Config, Menu, ReferenceData, Session};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "salaries")]
#[command(about = "Validate and query employee salary datasets", long_about = None)]
struct Cli {
    /// Dataset to load before the menu starts
    #[arg(short, long)]
    load: Option<PathBuf>,

    /// Directory for the US and sorted exports
    #[arg(short, long, env = "SALARIES_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let reference = ReferenceData::bundled()?;
    let mut session = Session::new(reference);

    if let Some(path) = cli.load {
        match session.load(&path) {
            Ok(count) => println!("✓ Loaded {} records from {}", count, path.display()),
            Err(e) => println!("❌ {}", e),
        }
    }

    let config = Config {
        output_dir: cli.output_dir,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = Menu::new(stdin.lock(), stdout.lock(), config);
    menu.run(&mut session)?;

    Ok(())
}
