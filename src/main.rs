#![warn(unused_extern_crates)]

mod cli;

use asn1ber::io::ber::{BasicRead, Identifier, Length};
use asn1ber::io::cursor::OctetCursor;
use asn1ber::io::Error;
use asn1ber::model::Tag;
use asn1ber::value::{decode_content, ValueType};
use clap::Parser;

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{:<5} {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

pub fn main() {
    let params = cli::Parameters::parse();

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(params.log_level());
    }

    let mut failed = false;
    for source in &params.source_files {
        let bytes = match load(source, params.hex) {
            Ok(bytes) => bytes,
            Err(e) => {
                println!("Failed to load {}, reason: {}", source, e);
                failed = true;
                continue;
            }
        };

        println!("{} ({} bytes)", source, bytes.len());
        let mut cursor = OctetCursor::new(&bytes[..]);
        if let Err(e) = dump(&mut cursor, 0, params.strict) {
            println!(
                "Failed to decode {} at offset {}, reason: {}",
                source,
                cursor.absolute_position(),
                e.kind()
            );
            failed = true;
        }
    }

    if failed {
        std::process::exit(1);
    }
}

fn load(source: &str, hex: bool) -> Result<Vec<u8>, String> {
    if hex {
        let text = std::fs::read_to_string(source).map_err(|e| e.to_string())?;
        cli::parse_hex(&text)
    } else {
        std::fs::read(source).map_err(|e| e.to_string())
    }
}

/// Prints one line per element. Constructed elements are walked recursively, primitive
/// elements with a supported universal tag are decoded and all others are printed as hex.
fn dump(cursor: &mut OctetCursor<'_>, depth: usize, strict: bool) -> Result<(), Error> {
    while !cursor.is_empty() {
        let offset = cursor.absolute_position();
        let identifier = cursor.read_identifier()?;
        let length = cursor.read_length()?;
        let header = format!(
            "{:>8}: {}{} {}",
            offset,
            "  ".repeat(depth),
            describe_identifier(identifier),
            describe_length(length)
        );

        if identifier.is_constructed() {
            println!("{}", header);
            let mut content = cursor.sub_view_for(length)?;
            dump(&mut content, depth + 1, strict)?;
            continue;
        }

        match universal_type(identifier.tag) {
            Some(value_type) => {
                let mut attempt = *cursor;
                match decode_content(&mut attempt, identifier, length, value_type) {
                    Ok(value) => {
                        *cursor = attempt;
                        println!("{} {}", header, value);
                    }
                    Err(e) if !strict => {
                        cursor.sub_view_for(length)?;
                        println!("{} <{}>", header, e.kind());
                    }
                    Err(e) => return Err(e),
                }
            }
            None => {
                let content = cursor.sub_view_for(length)?;
                let hex = content
                    .as_slice()
                    .iter()
                    .map(|b| format!("{:02X}", b))
                    .collect::<Vec<_>>()
                    .join(" ");
                println!("{} {}", header, hex);
            }
        }
    }
    Ok(())
}

fn universal_type(tag: Tag) -> Option<ValueType> {
    match tag {
        Tag::Universal(_) => ValueType::from_universal(tag),
        _ => None,
    }
}

fn describe_identifier(identifier: Identifier) -> String {
    let name = match identifier.tag {
        Tag::DEFAULT_SEQUENCE => Some("SEQUENCE"),
        Tag::DEFAULT_SET => Some("SET"),
        tag => universal_type(tag).map(ValueType::name),
    };
    let form = if identifier.is_constructed() {
        " constructed"
    } else {
        ""
    };
    match name {
        Some(name) => format!("{}{}", name, form),
        None => format!("{:?}{}", identifier.tag, form),
    }
}

fn describe_length(length: Length) -> String {
    match length {
        Length::Definite(len) => format!("len={}", len),
        Length::Indefinite => "len=indefinite".to_string(),
    }
}
