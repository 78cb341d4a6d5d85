use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "geoclock", version, about = "Geometric clock for the terminal")]
pub struct CliArgs {
    /// Simulate frames without a terminal and print the final frame
    #[arg(long)]
    pub headless: bool,

    /// Print the headless frame as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Number of frames to simulate in headless mode
    #[arg(long, default_value_t = 1)]
    pub frames: u32,

    /// Headless viewport width in logical pixels
    #[arg(long, default_value_t = 1000.0)]
    pub width: f64,

    /// Headless viewport height in logical pixels
    #[arg(long, default_value_t = 800.0)]
    pub height: f64,

    /// Start in manual mode at H:M[:S]
    #[arg(long, value_name = "H:M[:S]")]
    pub time: Option<String>,

    /// Start with the phase pinned (auto, geo, tri)
    #[arg(long, value_name = "MODE")]
    pub phase: Option<String>,

    /// Seed for the random time generator
    #[arg(long)]
    pub seed: Option<u64>,

    /// Frame period in milliseconds
    #[arg(long = "tick-ms", value_name = "MS")]
    pub tick_ms: Option<u64>,

    /// Write log output to a file instead of stderr
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,
}

impl CliArgs {
    /// Pushes CLI flags into the environment so config loading sees one source.
    pub fn apply_env_overrides(&self) {
        if let Some(time) = &self.time {
            std::env::set_var("GEOCLOCK_TIME", time);
        }
        if let Some(phase) = &self.phase {
            std::env::set_var("GEOCLOCK_PHASE", phase);
        }
        if let Some(seed) = self.seed {
            std::env::set_var("GEOCLOCK_SEED", seed.to_string());
        }
        if let Some(tick_ms) = self.tick_ms {
            std::env::set_var("GEOCLOCK_TICK_MS", tick_ms.to_string());
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("GEOCLOCK_LOG_FILE", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headless_flags() {
        let args = CliArgs::parse_from([
            "geoclock",
            "--headless",
            "--json",
            "--frames",
            "120",
            "--width",
            "640",
            "--time",
            "9:05",
            "--phase",
            "geo",
        ]);
        assert!(args.headless);
        assert!(args.json);
        assert_eq!(args.frames, 120);
        assert!((args.width - 640.0).abs() < f64::EPSILON);
        assert!((args.height - 800.0).abs() < f64::EPSILON);
        assert_eq!(args.time.as_deref(), Some("9:05"));
        assert_eq!(args.phase.as_deref(), Some("geo"));
    }

    #[test]
    fn rejects_non_numeric_frame_count() {
        assert!(CliArgs::try_parse_from(["geoclock", "--frames", "many"]).is_err());
    }
}
