use std::path::PathBuf;

/// Usage line printed when the command line cannot be read.
pub const USAGE: &str =
    "Usage: blockgrid [--config <file>] [--saves <dir>] [--logs <dir>] [--outbox <file>]";

/// Filesystem locations the session reads from and writes to.
#[derive(Debug, Clone)]
pub struct CliPaths {
    pub config_path: PathBuf,
    pub saves_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub outbox_path: PathBuf,
}

impl CliPaths {
    pub fn from_env() -> Result<Self, String> {
        Self::from_args(std::env::args().skip(1))
    }

    /// Every flag takes exactly one value; later flags override earlier ones.
    pub fn from_args<I>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut paths = Self::defaults();
        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            let slot = paths
                .slot_for(&flag)
                .ok_or_else(|| format!("Unknown argument: {flag}"))?;
            *slot = args
                .next()
                .map(PathBuf::from)
                .ok_or_else(|| format!("Missing value for {flag}"))?;
        }
        Ok(paths)
    }

    fn slot_for(&mut self, flag: &str) -> Option<&mut PathBuf> {
        match flag {
            "--config" => Some(&mut self.config_path),
            "--saves" => Some(&mut self.saves_dir),
            "--logs" => Some(&mut self.logs_dir),
            "--outbox" => Some(&mut self.outbox_path),
            _ => None,
        }
    }

    pub fn defaults() -> Self {
        Self {
            config_path: PathBuf::from("config.json"),
            saves_dir: PathBuf::from("saves"),
            logs_dir: PathBuf::from("logs"),
            outbox_path: ["outbox", "calendar.jsonl"].iter().collect(),
        }
    }
}
