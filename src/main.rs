use std::env;
use std::error::Error;
use tuning_samples::config::Config;

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_args(env::args().skip(1))?;

    println!("[+] Parsing games");
    let stats = tuning_samples::run(&config)?;
    println!("[+] Added {} positions", stats.positions);

    Ok(())
}
