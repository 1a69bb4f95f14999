use clap::Parser;
use sim86_decoder::decode;
use sim86_emulator::{execute, MachineState};
use std::io::Read;

#[derive(Parser)]
struct Args {
    /// The binary file to simulate
    binary: String,

    /// Size of the simulated memory arena in bytes
    #[arg(long, default_value_t = sim86_emulator::MEMORY_SIZE)]
    memory: usize,
}

fn load_data(binary: &str) -> Result<Vec<u8>, std::io::Error> {
    let mut file = std::fs::File::open(binary)?;
    let mut buffer: Vec<u8> = Vec::new();
    let _ = file.read_to_end(&mut buffer)?;

    Ok(buffer)
}

fn simulate(data: &[u8], memory: usize) -> Result<MachineState, sim86_decoder::DecodeError> {
    let mut state = MachineState::with_memory_size(memory);

    // The program counter is the simulated ip register, so taken jumps move
    // the decode cursor.
    while usize::from(state.ip) < data.len() {
        let start = usize::from(state.ip);
        let end = usize::min(start + 6, data.len());
        let (instruction, _) = decode(&data[start..end])?;

        let result = execute(&instruction, &mut state);
        println!("{} {}", instruction, result);
    }

    Ok(state)
}

fn main() {
    tracing_subscriber::fmt().init();

    let args = Args::parse();

    let data = match load_data(args.binary.as_str()) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "simulating {} ({} bytes, {} bytes of memory)",
        args.binary,
        data.len(),
        args.memory
    );

    match simulate(&data, args.memory) {
        Ok(state) => {
            println!();
            println!("Final registers:");
            print!("{}", state);
        }
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
}
