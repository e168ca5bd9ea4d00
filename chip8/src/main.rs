use std::process;

use log::{error, info};

mod config;
mod run;

use config::{Config, USAGE};

fn main() {
    env_logger::init();

    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            process::exit(2);
        }
    };
    info!("{:?}", config);

    match run::run(&config) {
        Ok(frame) => print!("{}", run::frame_to_text(&frame)),
        Err(e) => {
            error!("{}", e);
            eprintln!("chip8: {}", e);
            process::exit(1);
        }
    }
}
