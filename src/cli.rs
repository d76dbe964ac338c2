use clap::Parser;
use std::path::PathBuf;

// Build version with target info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "Export: GIF (image 0.25)\n",
    "Target: ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// Texture animation editor
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Animation document to open (YAML)
    #[arg(value_name = "FILE")]
    pub file_path: Option<PathBuf>,

    /// Playback rate in frames per second (1-120)
    #[arg(long = "fps", value_name = "N", value_parser = clap::value_parser!(u32).range(1..=120))]
    pub fps: Option<u32>,

    /// Loop playback (0 = off, 1 = on); defaults to the saved setting
    #[arg(short = 'o', long = "loop", value_name = "0|1", value_parser = clap::value_parser!(u8).range(0..=1))]
    pub loop_playback: Option<u8>,

    /// Start playing once the document is loaded
    #[arg(short = 'a', long = "autoplay")]
    pub autoplay: bool,

    /// Enable debug logging to file (default: texanim.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

impl Args {
    /// `--loop` as a flag, if given
    pub fn loop_enabled(&self) -> Option<bool> {
        self.loop_playback.map(|v| v != 0)
    }

    /// Log filter for the `-v` count
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let args = Args::try_parse_from([
            "texanim", "anim.yaml", "--fps", "12", "--loop", "1", "-a", "-vv", "-c", "/tmp/cfg",
        ])
        .unwrap();
        assert_eq!(args.file_path, Some(PathBuf::from("anim.yaml")));
        assert_eq!(args.fps, Some(12));
        assert_eq!(args.loop_enabled(), Some(true));
        assert!(args.autoplay);
        assert_eq!(args.log_level(), log::LevelFilter::Debug);
        assert_eq!(args.config_dir, Some(PathBuf::from("/tmp/cfg")));
        assert!(args.log_file.is_none());
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["texanim"]).unwrap();
        assert!(args.file_path.is_none());
        assert_eq!(args.fps, None);
        assert_eq!(args.loop_enabled(), None);
        assert_eq!(args.log_level(), log::LevelFilter::Warn);
    }

    #[test]
    fn test_log_flag_without_path() {
        let args = Args::try_parse_from(["texanim", "-l"]).unwrap();
        assert_eq!(args.log_file, Some(None));
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(Args::try_parse_from(["texanim", "--fps", "0"]).is_err());
        assert!(Args::try_parse_from(["texanim", "--fps", "121"]).is_err());
        assert!(Args::try_parse_from(["texanim", "--loop", "2"]).is_err());
    }
}
