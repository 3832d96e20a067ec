// This code is licensed under MIT license (see LICENSE for details)

//! Headless cycle driver for ocho: runs a Chip-8 image at a fixed frame
//! rate, then dumps the registers and the rendered screen.

use gumdrop::Options;
use ocho::prelude::*;
use owo_colors::OwoColorize;
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

#[derive(Clone, Debug, Options)]
struct Arguments {
    #[options(help = "Load a ROM image to run.", required, free)]
    file: PathBuf,
    #[options(help = "Print this help message.")]
    help: bool,
    #[options(help = "Log the disassembly of each executed instruction.")]
    trace: bool,
    #[options(help = "Stop on unknown instructions instead of skipping them.")]
    strict: bool,
    #[options(help = "Set vF when Fx1E overflows the index register.")]
    index_carry: bool,
    #[options(help = "Instructions per 60Hz frame.", default = "10", meta = "N")]
    speed: usize,
    #[options(help = "Stop after this many frames.", default = "600", meta = "N")]
    frames: usize,
}

fn main() {
    env_logger::init();
    let args = Arguments::parse_args_default_or_exit();

    let mut ch8 = match Chip8::new(&args.file) {
        Ok(ch8) => ch8,
        Err(e) => {
            eprintln!("{}: {}", args.file.display(), e.to_string().red());
            std::process::exit(1);
        }
    };
    ch8.cpu.flags.debug = args.trace;
    ch8.cpu.flags.quirks.index_carry = args.index_carry;

    let frame_time = Duration::from_secs(1) / 60;
    'frames: for _ in 0..args.frames {
        let frame = Instant::now();
        for _ in 0..args.speed {
            match ch8.step() {
                Ok(_) => {}
                Err(Error::UnknownInstruction { word }) if !args.strict => {
                    log::warn!("skipping unknown instruction {word:04x}");
                }
                Err(e) => {
                    eprintln!("{}", e.to_string().red());
                    break 'frames;
                }
            }
            if ch8.cpu.is_waiting() {
                // No input source is attached, so a key wait never resolves.
                eprintln!("machine is waiting for a key press; stopping");
                break 'frames;
            }
        }
        ch8.tick_timers();
        std::thread::sleep(frame_time.saturating_sub(frame.elapsed()));
    }

    ch8.cpu.dump();
    print!("{}", ch8.screen());
}
