#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
pub struct Parameters {
    #[arg(
        short = 'x',
        long = "hex",
        env = "BERDUMP_HEX",
        help = "Whether the input files contain hex text instead of raw bytes"
    )]
    pub hex: bool,
    #[arg(
        short = 's',
        long = "strict",
        env = "BERDUMP_STRICT",
        help = "Whether to stop at the first element that cannot be decoded"
    )]
    pub strict: bool,
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Log to stderr, repeat for more details"
    )]
    pub verbose: u8,
    #[arg(env = "SOURCE_FILES", required = true)]
    pub source_files: Vec<String>,
}

impl Parameters {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

/// Parses pairs of hex digits, whitespace between the pairs is ignored
pub fn parse_hex(text: &str) -> Result<Vec<u8>, String> {
    let digits = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<Vec<_>>();
    if digits.len() % 2 != 0 {
        return Err(format!("odd number of hex digits: {}", digits.len()));
    }
    digits
        .chunks(2)
        .map(|pair| {
            let pair = pair.iter().collect::<String>();
            u8::from_str_radix(&pair, 16).map_err(|e| format!("invalid hex '{}': {}", pair, e))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Ok(vec![0x02, 0x02, 0x01, 0x2C]), parse_hex("02 02\n01 2c"));
        assert!(parse_hex("020").is_err());
        assert!(parse_hex("0g").is_err());
    }

    #[test]
    fn test_verbosity() {
        let params = Parameters::parse_from(["berdump", "-vv", "--hex", "message.hex"]);
        assert!(params.hex);
        assert!(!params.strict);
        assert_eq!(log::LevelFilter::Debug, params.log_level());
        assert_eq!(vec!["message.hex".to_string()], params.source_files);
    }
}
