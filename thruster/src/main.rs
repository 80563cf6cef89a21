use argh::FromArgs;
use intcode::{maximize, parse, Configuration};
use tracing_subscriber::EnvFilter;

/// Search amplifier phase permutations for the strongest thruster signal.
#[derive(FromArgs)]
struct Args {
    /// path to a comma-separated intcode program
    #[argh(positional)]
    program: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Args = argh::from_env();
    let mem = parse(&args.program)?;

    let max = maximize(&mem, Configuration::Simple)?;
    println!("Max thruster signal: {}", max);

    let max = maximize(&mem, Configuration::Looped)?;
    println!("Max thruster signal with feedback loop: {}", max);

    Ok(())
}
