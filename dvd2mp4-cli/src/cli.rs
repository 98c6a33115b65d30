// dvd2mp4-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use dvd2mp4_core::config::{
    DEFAULT_AUDIO_BITRATE_KBPS, DEFAULT_CRF, DEFAULT_PRESET, MIN_VOB_SIZE_BYTES, X264_PRESETS,
};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "dvd2mp4: Convert DVD videos to MP4",
    long_about = "Converts the VOB files of a ripped DVD folder to H.264/AAC MP4 files using ffmpeg.\n\
                  Converted files are written to a Converted_MP4 folder next to the DVD folder."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show debug output, including ffmpeg's own log lines
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Converts every title VOB in a DVD folder to MP4
    Convert(ConvertArgs),
    /// Lists the VOB files that would be converted
    Scan(ScanArgs),
    /// Checks that ffmpeg can be found and runs
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Folder containing the DVD files (.VOB), usually VIDEO_TS
    #[arg(required = true, value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Optional: Output folder (defaults to a Converted_MP4 folder next to INPUT_DIR)
    #[arg(short = 'o', long = "output", value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Optional: Directory for log files (defaults to OUTPUT_DIR/logs)
    #[arg(short, long, value_name = "LOG_DIR", env = "DVD2MP4_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    // --- Encoder Settings ---
    /// H.264 quality (0-51, lower is better quality and larger files)
    #[arg(long, value_name = "CRF", default_value_t = DEFAULT_CRF,
          value_parser = clap::value_parser!(u8).range(0..=51))]
    pub crf: u8,

    /// x264 speed/compression preset
    #[arg(long, value_name = "PRESET", default_value = DEFAULT_PRESET,
          value_parser = PossibleValuesParser::new(X264_PRESETS))]
    pub preset: String,

    /// AAC audio bitrate in kbit/s
    #[arg(long = "audio-bitrate", value_name = "KBPS", default_value_t = DEFAULT_AUDIO_BITRATE_KBPS,
          value_parser = clap::value_parser!(u32).range(32..=512))]
    pub audio_bitrate: u32,

    // --- Discovery ---
    /// VOB files at or below this size (bytes) are treated as menus and ignored
    #[arg(long, value_name = "BYTES", default_value_t = MIN_VOB_SIZE_BYTES)]
    pub min_size: u64,

    /// Keep MP4 files that already exist instead of overwriting them
    #[arg(long, default_value_t = false)]
    pub skip_existing: bool,

    /// Optional: Path to the ffmpeg binary.
    /// Can also be set via the DVD2MP4_FFMPEG environment variable.
    #[arg(long, value_name = "PATH", env = "DVD2MP4_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// Open the output folder when at least one file converted
    #[arg(long, default_value_t = false)]
    pub open: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Folder containing the DVD files (.VOB)
    #[arg(required = true, value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// VOB files at or below this size (bytes) are treated as menus and ignored
    #[arg(long, value_name = "BYTES", default_value_t = MIN_VOB_SIZE_BYTES)]
    pub min_size: u64,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Optional: Path to the ffmpeg binary.
    /// Can also be set via the DVD2MP4_FFMPEG environment variable.
    #[arg(long, value_name = "PATH", env = "DVD2MP4_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_convert_defaults() {
        let cli = Cli::try_parse_from(["dvd2mp4", "convert", "/media/dvd/VIDEO_TS"]).unwrap();
        assert!(!cli.verbose);
        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.input_dir, PathBuf::from("/media/dvd/VIDEO_TS"));
                assert!(args.output_dir.is_none());
                assert_eq!(args.crf, 20);
                assert_eq!(args.preset, "medium");
                assert_eq!(args.audio_bitrate, 192);
                assert_eq!(args.min_size, 1_000_000);
                assert!(!args.skip_existing);
                assert!(!args.open);
                assert!(!args.json);
            }
            other => panic!("Expected convert command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_convert_overrides() {
        let cli = Cli::try_parse_from([
            "dvd2mp4",
            "-v",
            "convert",
            "VIDEO_TS",
            "--output",
            "out",
            "--log-dir",
            "custom_logs",
            "--crf",
            "18",
            "--preset",
            "slow",
            "--audio-bitrate",
            "256",
            "--min-size",
            "0",
            "--skip-existing",
            "--ffmpeg",
            "/opt/ffmpeg/ffmpeg",
            "--open",
            "--json",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.output_dir, Some(PathBuf::from("out")));
                assert_eq!(args.log_dir, Some(PathBuf::from("custom_logs")));
                assert_eq!(args.crf, 18);
                assert_eq!(args.preset, "slow");
                assert_eq!(args.audio_bitrate, 256);
                assert_eq!(args.min_size, 0);
                assert!(args.skip_existing);
                assert_eq!(args.ffmpeg, Some(PathBuf::from("/opt/ffmpeg/ffmpeg")));
                assert!(args.open);
                assert!(args.json);
            }
            other => panic!("Expected convert command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range_values() {
        assert!(Cli::try_parse_from(["dvd2mp4", "convert", "x", "--crf", "52"]).is_err());
        assert!(Cli::try_parse_from(["dvd2mp4", "convert", "x", "--preset", "turbo"]).is_err());
        assert!(Cli::try_parse_from(["dvd2mp4", "convert", "x", "--audio-bitrate", "8"]).is_err());
    }

    #[test]
    fn test_parse_requires_input_dir() {
        assert!(Cli::try_parse_from(["dvd2mp4", "convert"]).is_err());
        assert!(Cli::try_parse_from(["dvd2mp4", "scan"]).is_err());
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from(["dvd2mp4", "check", "--ffmpeg", "./ffmpeg"]).unwrap();
        match cli.command {
            Commands::Check(args) => assert_eq!(args.ffmpeg, Some(PathBuf::from("./ffmpeg"))),
            other => panic!("Expected check command, got {:?}", other),
        }
    }
}
