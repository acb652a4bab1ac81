use std::env;
use xlclog_core::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        println!("Usage: read_capture <capture_file>");
        return Ok(());
    }

    let path = &args[1];
    println!("Reading: {}", path);

    let file = tokio::fs::File::open(path).await?;
    let mut reader = FrameReader::new(file, Parser::default());

    while let Some(parsed) = reader.next_frame().await? {
        match parsed.result {
            Ok(record) => println!("{}", record),
            Err(e) => println!("  ! {:?}: {}", parsed.line, e),
        }
    }

    println!("\n{}", reader.stats());
    Ok(())
}
