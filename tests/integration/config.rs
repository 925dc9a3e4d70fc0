use std::fs;

use crate::common::*;
use blockgrid::config::Config;
use blockgrid::core::types::{DropDatePolicy, WeekStart};

#[test]
fn missing_config_stops_startup() {
    let dir = make_temp_dir("noconfig");
    let output = run_without_input(&dir);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Config error"), "stderr was {stderr}");
}

#[test]
fn unknown_cli_flag_exits_with_usage() {
    let dir = make_temp_dir("badflag");
    write_valid_config(&dir);
    let output = std::process::Command::new(binary_path())
        .current_dir(&dir)
        .arg("--bogus")
        .stdin(std::process::Stdio::null())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn startup_lists_the_paths_in_use() {
    let dir = make_temp_dir("paths");
    write_valid_config(&dir);
    let output = run_with_input(&dir, "exit\n");
    let stdout = normalized_lines(&output.stdout);
    assert!(stdout.iter().any(|l| l.starts_with("Config path:")));
    assert!(stdout.iter().any(|l| l.starts_with("Saves path:")));
    assert!(stdout.iter().any(|l| l.starts_with("Logs path:")));
}

#[test]
fn config_edits_are_written_back() {
    let dir = make_temp_dir("cfgedit");
    write_valid_config(&dir);
    let mut ctx = build_context(&dir);

    execute_command("config WEEK_START sunday", &mut ctx);
    execute_command("config DROP_DATE_POLICY today", &mut ctx);
    assert_eq!(ctx.config.week_start(), WeekStart::Sunday);
    assert_eq!(ctx.pointer.drop_policy(), DropDatePolicy::Today);

    let reloaded = Config::load_from(dir.join("config.json")).unwrap();
    assert_eq!(reloaded.week_start(), WeekStart::Sunday);
    assert_eq!(reloaded.drop_date_policy(), DropDatePolicy::Today);
}

#[test]
fn invalid_config_values_are_refused() {
    let dir = make_temp_dir("cfgbad");
    write_valid_config(&dir);
    let mut ctx = build_context(&dir);
    let before = fs::read_to_string(dir.join("config.json")).unwrap();

    assert!(try_command("config DEFAULT_DURATION 5", &mut ctx).is_err());
    assert!(try_command("config PIXELS_PER_HOUR zero", &mut ctx).is_err());
    assert_eq!(ctx.config.default_duration(), 60);
    assert_eq!(fs::read_to_string(dir.join("config.json")).unwrap(), before);
}
