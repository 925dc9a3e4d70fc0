use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};

use blockgrid::arg::arg_parse_strategy::CommandArgParser;
use blockgrid::command::command_parser::CommandParser;
use blockgrid::core::cli::CliPaths;
use blockgrid::core::context::AppContext;

pub fn binary_path() -> String {
    let raw = PathBuf::from(env!("CARGO_BIN_EXE_blockgrid"));
    if raw.is_absolute() {
        return raw.to_string_lossy().to_string();
    }
    let from_manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(&raw);
    if from_manifest.exists() {
        return from_manifest.to_string_lossy().to_string();
    }
    raw.to_string_lossy().to_string()
}

static COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn make_temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "blockgrid-{prefix}-{}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let _ = fs::create_dir_all(&dir);
    dir
}

/// Config with `DROP_DATE_POLICY = column` so drops land on the given date.
pub fn write_valid_config(dir: &Path) {
    write_config(dir, "column");
}

pub fn write_config(dir: &Path, drop_date_policy: &str) {
    let cfg = format!(
        r#"{{
      "pixels_per_hour": {{ "value": 80, "description": "row height" }},
      "week_start": {{ "value": "monday", "description": "week start" }},
      "default_view": {{ "value": "day", "description": "view" }},
      "default_duration": {{ "value": 60, "description": "minutes" }},
      "drop_date_policy": {{ "value": "{drop_date_policy}", "description": "drop date" }},
      "log_level": {{ "value": "info", "description": "level" }},
      "file_logging_enabled": {{ "value": "True", "description": "file logging" }}
    }}"#
    );
    fs::write(dir.join("config.json"), cfg).unwrap();
}

pub fn run_with_input(dir: &Path, input: &str) -> Output {
    let mut child = Command::new(binary_path())
        .current_dir(dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn binary");

    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();

    child.wait_with_output().unwrap()
}

pub fn run_without_input(dir: &Path) -> Output {
    Command::new(binary_path())
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .expect("failed to run binary")
}

fn strip_ansi_and_control(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\u{1b}' && matches!(chars.peek(), Some('[')) {
            let _ = chars.next();
            for nc in chars.by_ref() {
                if nc.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        if c.is_control() {
            continue;
        }
        out.push(c);
    }

    out
}

pub fn normalized_lines(buf: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(buf)
        .lines()
        .map(|l| {
            let stripped = strip_ansi_and_control(l);
            let trimmed = stripped.trim();
            if let Some(rest) = trimmed.strip_prefix('>') {
                rest.trim().to_string()
            } else {
                trimmed.to_string()
            }
        })
        .filter(|l| !l.is_empty())
        .collect()
}

pub fn build_context(dir: &Path) -> AppContext {
    let paths = CliPaths {
        config_path: dir.join("config.json"),
        saves_dir: dir.join("saves"),
        logs_dir: dir.join("logs"),
        outbox_path: dir.join("outbox").join("calendar.jsonl"),
    };
    AppContext::new_with_paths(&paths).expect("context should build")
}

/// Run one command line the way the shell does; panics on any failure.
pub fn execute_command(line: &str, ctx: &mut AppContext) {
    try_command(line, ctx).unwrap_or_else(|e| panic!("command failed for '{line}': {e}"));
}

pub fn try_command(line: &str, ctx: &mut AppContext) -> blockgrid::errors::Result<()> {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or("");
    let raw_args: Vec<String> = parts.map(|s| s.to_string()).collect();

    let args = CommandArgParser::new().parse(command, &raw_args)?;
    let cmd = CommandParser::new().parse(command, &args)?;
    cmd.execute(ctx)
}

pub fn read_log_contents(dir: &Path) -> Option<String> {
    let logs_dir = dir.join("logs");
    let entries = fs::read_dir(&logs_dir).ok()?;
    let mut contents = String::new();
    for entry in entries.flatten() {
        contents.push_str(&fs::read_to_string(entry.path()).ok()?);
    }
    Some(contents)
}
