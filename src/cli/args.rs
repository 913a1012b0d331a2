use clap::Parser;
use std::path::PathBuf;

/// Interactive file-backed banking simulator
#[derive(Parser, Debug)]
#[command(name = "teller")]
#[command(about = "Interactive file-backed banking simulator", long_about = None)]
pub struct CliArgs {
    /// Path to the flat text file that persists account state
    #[arg(
        long = "data-file",
        value_name = "PATH",
        default_value = "accounts.txt",
        help = "Path to the backing account file"
    )]
    pub data_file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::Path;

    #[rstest]
    #[case::default(&["teller"], "accounts.txt")]
    #[case::custom(&["teller", "--data-file", "/tmp/state.txt"], "/tmp/state.txt")]
    fn test_data_file_parsing(#[case] args: &[&str], #[case] expected: &str) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.data_file, Path::new(expected));
    }

    #[rstest]
    #[case::missing_value(&["teller", "--data-file"])]
    #[case::unknown_flag(&["teller", "--unknown"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
