use sim86_decoder::decode;
use std::io::Read;
use structopt::StructOpt;

#[derive(StructOpt)]
struct Opt {
    /// The binary file to disassemble
    binary: String,
}

fn load_data(binary: &str) -> Result<Vec<u8>, std::io::Error> {
    let mut file = std::fs::File::open(binary)?;
    let mut buffer: Vec<u8> = Vec::new();
    let _ = file.read_to_end(&mut buffer)?;

    Ok(buffer)
}

fn disassemble(binary: &str, data: &[u8]) -> Result<(), sim86_decoder::DecodeError> {
    println!("; {} disassembly:", binary);
    println!("bits 16");
    println!();

    let mut offset = 0_usize;
    while offset < data.len() {
        // The longest encoding in the supported subset is 6 bytes.
        let end = usize::min(offset + 6, data.len());
        let (instruction, consumed) = decode(&data[offset..end])?;
        println!("{}", instruction);
        offset += usize::from(consumed);
    }

    Ok(())
}

fn main() {
    let opts = Opt::from_args();

    let data = match load_data(opts.binary.as_str()) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = disassemble(opts.binary.as_str(), &data) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
