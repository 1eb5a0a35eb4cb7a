//! chatmark CLI - parse a chat message and print its document tree as JSON

use std::io::{self, Read, Write};

fn main() -> io::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    // Read from a file, or from stdin when no path or `-` is given
    let input = if args.len() > 1 && args[1] != "-" {
        std::fs::read_to_string(&args[1])?
    } else {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    };

    let blocks = chatmark::parse(&input);
    let json = serde_json::to_string_pretty(&blocks).map_err(io::Error::other)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(json.as_bytes())?;
    stdout.write_all(b"\n")?;

    Ok(())
}
