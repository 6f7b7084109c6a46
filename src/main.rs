use bytekit::{Arena, Arg, ByteSeq, Encoding, Needle, NumericKind, Result};
use std::env;

const USAGE: &str = "\
Usage:
  bytekit transcode <hex-bytes> <from> <to>
  bytekit read <hex-bytes> <Kind> <offset> [byteLength]
  bytekit find <haystack-text> <needle-text>";

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("{}", USAGE);
        std::process::exit(1);
    }

    let arena = Arena::default();
    let outcome = match args[1].as_str() {
        "transcode" if args.len() == 5 => transcode(&arena, &args[2], &args[3], &args[4]),
        "read" if args.len() == 5 || args.len() == 6 => {
            read(&arena, &args[2], &args[3], &args[4], args.get(5).map(String::as_str))
        }
        "find" if args.len() == 4 => find(&arena, &args[2], &args[3]),
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };

    if let Err(e) = outcome {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}

fn parse_bytes(arena: &Arena, hex_bytes: &str) -> Result<ByteSeq> {
    arena.from_str(hex_bytes, Encoding::Hex)
}

fn transcode(arena: &Arena, hex_bytes: &str, from: &str, to: &str) -> Result<()> {
    let source = parse_bytes(arena, hex_bytes)?;
    let result = arena.transcode(&source, from.parse()?, to.parse()?)?;
    println!("{}", result.to_string(Encoding::Hex));
    Ok(())
}

fn read(arena: &Arena, hex_bytes: &str, kind: &str, offset: &str, byte_length: Option<&str>) -> Result<()> {
    let seq = parse_bytes(arena, hex_bytes)?;
    let kind: NumericKind = kind.parse()?;
    let byte_length = byte_length.map_or(Arg::Undefined, Arg::parse);
    let value = seq.read_number(kind, &Arg::parse(offset), &byte_length)?;
    println!("{}", value);
    Ok(())
}

fn find(arena: &Arena, haystack: &str, needle: &str) -> Result<()> {
    let seq = arena.from_str(haystack, Encoding::Utf8)?;
    let needle = Needle::text(needle, Encoding::Utf8)?;
    let render = |position: Option<usize>| position.map_or("-1".to_string(), |p| p.to_string());
    println!("first: {}", render(seq.index_of(needle.clone(), 0)));
    println!("last: {}", render(seq.last_index_of(needle, None)));
    Ok(())
}
