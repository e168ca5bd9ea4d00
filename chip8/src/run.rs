use std::fs::File;
use std::io::BufReader;
use std::thread;
use std::time::Instant;

use log::{debug, info, warn};

use chip8_core::constants::PIXEL_ON;
use chip8_core::{Chip8, Chip8Error, FrameBuffer};

use crate::config::Config;

/// Loads the ROM and steps the machine `config.cycles` times, no faster than `config.cycle_delay`.
///
/// Returns the last frame. Step errors are logged and skipped unless `halt_on_error` is set.
pub fn run(config: &Config) -> Result<FrameBuffer, Chip8Error> {
    let mut chip8 = match config.seed {
        Some(seed) => Chip8::with_seed(seed),
        None => Chip8::new(),
    };

    // Load ROM
    let file = File::open(&config.rom)?;
    let mut reader = BufReader::new(file);
    chip8.load_rom_from(&mut reader)?;
    info!("successfully loaded ROM {}", config.rom.display());

    let mut last_cycle = Instant::now();
    let mut was_sounding = false;

    for cycle in 0..config.cycles {
        if let Err(e) = chip8.step() {
            if config.halt_on_error {
                return Err(e);
            }
            if !e.is_diagnostic() {
                warn!("continuing past error on cycle {}: {}", cycle, e);
            }
        }

        if chip8.get_frame().is_some() {
            debug!("frame ready on cycle {}", cycle);
        }
        if chip8.sound_active() != was_sounding {
            was_sounding = chip8.sound_active();
            debug!("buzzer {}", if was_sounding { "on" } else { "off" });
        }

        // Handle timing
        let elapsed_cycle_time = last_cycle.elapsed();
        if config.cycle_delay > elapsed_cycle_time {
            thread::sleep(config.cycle_delay - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    Ok(*chip8.frame_buffer())
}

/// Renders a frame as text, one line per row: `#` for lit pixels and `.` for dark ones
pub fn frame_to_text(frame: &FrameBuffer) -> String {
    frame
        .iter()
        .map(|row| {
            row.iter()
                .map(|&pixel| if pixel == PIXEL_ON { '#' } else { '.' })
                .chain(std::iter::once('\n'))
                .collect::<String>()
        })
        .collect()
}
