//! Non-destructive merge of monitor directives into the layout config file
//!
//! The config file is an ordinary line-oriented Hyprland config: comments,
//! blank lines and unrelated directives may appear anywhere. The merge is a
//! pure transform over the old contents - it rewrites only the lines that
//! belong to the monitors being updated and appends the rest, never
//! regenerating the file wholesale.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::constants::config::{DIRECTIVE_KEYWORD, HYPR_DIR, MONITORS_FILE};

/// `~/.config/hypr/monitors.conf`
pub fn default_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(HYPR_DIR);
    path.push(MONITORS_FILE);
    path
}

/// Value part of a monitor directive line, if the line is one.
fn directive_value(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix(DIRECTIVE_KEYWORD)?;
    let rest = rest.trim_start().strip_prefix('=')?;
    Some(rest.trim_start())
}

/// Whether a directive value names `name` (exactly, or followed by a comma).
fn references(value: &str, name: &str) -> bool {
    match value.strip_prefix(name) {
        Some(rest) => rest.is_empty() || rest.trim_end().is_empty() || rest.starts_with(','),
        None => false,
    }
}

/// Merge `updates` (connector name, directive body) into `contents`.
///
/// Every line that is not a directive for an updated monitor is preserved
/// byte-for-byte in its original order. A directive line referencing a
/// pending name is replaced in place; each name matches at most once, first
/// line wins. Names with no matching line are appended at end of file.
pub fn merge_directives(contents: &str, updates: &[(String, String)]) -> String {
    let mut pending: Vec<&(String, String)> = updates.iter().collect();
    let mut out = String::with_capacity(contents.len() + 64 * updates.len());

    for line in contents.split_inclusive('\n') {
        let matched = directive_value(line)
            .and_then(|value| pending.iter().position(|(name, _)| references(value, name)));
        match matched {
            Some(idx) => {
                let (name, body) = pending.remove(idx);
                out.push_str(&format!("{DIRECTIVE_KEYWORD} = {name}, {body}\n"));
            }
            None => out.push_str(line),
        }
    }

    for (name, body) in pending {
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&format!("{DIRECTIVE_KEYWORD} = {name}, {body}\n"));
    }

    out
}

/// Read the config file (missing counts as empty), merge, and write back.
///
/// The new contents land in a sibling temp file first and are renamed over
/// the target, so readers never observe a partially-written file.
pub fn save_merged(path: &Path, updates: &[(String, String)]) -> Result<()> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(err) => {
            return Err(err).context(format!("Failed to read config file {}", path.display()))
        }
    };

    let merged = merge_directives(&contents, updates);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .context(format!("Failed to create config directory: {}", parent.display()))?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, &merged)
        .context(format!("Failed to write config file to {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .context(format!("Failed to replace config file {}", path.display()))?;

    info!(path = %path.display(), monitors = updates.len(), "Saved monitor layout");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn updates(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(name, body)| (name.to_string(), body.to_string()))
            .collect()
    }

    const SAMPLE: &str = "# comment\nmonitor = eDP-1, 2560x1600@180, 0x0, 2\nenv = FOO,bar\n";

    #[test]
    fn test_merge_appends_new_monitor_preserving_rest() {
        let merged = merge_directives(
            SAMPLE,
            &updates(&[("HDMI-A-1", "3840x2160@120, 2560x0, 2")]),
        );
        assert_eq!(
            merged,
            "# comment\n\
             monitor = eDP-1, 2560x1600@180, 0x0, 2\n\
             env = FOO,bar\n\
             monitor = HDMI-A-1, 3840x2160@120, 2560x0, 2\n"
        );
    }

    #[test]
    fn test_merge_replaces_in_place() {
        let merged = merge_directives(SAMPLE, &updates(&[("eDP-1", "2560x1600@180, 100x0, 2")]));
        assert_eq!(
            merged,
            "# comment\n\
             monitor = eDP-1, 2560x1600@180, 100x0, 2\n\
             env = FOO,bar\n"
        );
    }

    #[test]
    fn test_merge_replaces_and_appends_together() {
        let merged = merge_directives(
            SAMPLE,
            &updates(&[
                ("eDP-1", "2560x1600@180, 0x0, 2"),
                ("HDMI-A-1", "3840x2160@120, 1280x0, 2.4"),
            ]),
        );
        assert_eq!(
            merged,
            "# comment\n\
             monitor = eDP-1, 2560x1600@180, 0x0, 2\n\
             env = FOO,bar\n\
             monitor = HDMI-A-1, 3840x2160@120, 1280x0, 2.4\n"
        );
    }

    #[test]
    fn test_merge_matches_name_at_most_once() {
        let contents = "monitor = eDP-1, old1\nmonitor = eDP-1, old2\n";
        let merged = merge_directives(contents, &updates(&[("eDP-1", "new")]));
        // First line wins; the duplicate is left alone
        assert_eq!(merged, "monitor = eDP-1, new\nmonitor = eDP-1, old2\n");
    }

    #[test]
    fn test_merge_does_not_match_name_prefixes() {
        let contents = "monitor = eDP-11, keep\n";
        let merged = merge_directives(contents, &updates(&[("eDP-1", "new")]));
        assert_eq!(
            merged,
            "monitor = eDP-11, keep\nmonitor = eDP-1, new\n"
        );
    }

    #[test]
    fn test_merge_tolerates_tight_spacing() {
        let contents = "  monitor=eDP-1,2560x1600@180,0x0,2\n";
        let merged = merge_directives(contents, &updates(&[("eDP-1", "2560x1600@180, 50x0, 2")]));
        assert_eq!(merged, "monitor = eDP-1, 2560x1600@180, 50x0, 2\n");
    }

    #[test]
    fn test_merge_ignores_non_directive_lines_mentioning_name() {
        let contents = "# monitor = eDP-1 disabled on purpose\nworkspace = 1, monitor:eDP-1\n";
        let merged = merge_directives(contents, &updates(&[("eDP-1", "new")]));
        assert_eq!(
            merged,
            "# monitor = eDP-1 disabled on purpose\n\
             workspace = 1, monitor:eDP-1\n\
             monitor = eDP-1, new\n"
        );
    }

    #[test]
    fn test_merge_into_empty_contents() {
        let merged = merge_directives("", &updates(&[("eDP-1", "body")]));
        assert_eq!(merged, "monitor = eDP-1, body\n");
    }

    #[test]
    fn test_merge_appends_after_unterminated_last_line() {
        let contents = "# no trailing newline";
        let merged = merge_directives(contents, &updates(&[("eDP-1", "body")]));
        assert_eq!(merged, "# no trailing newline\nmonitor = eDP-1, body\n");
    }

    #[test]
    fn test_merge_with_no_updates_is_identity() {
        assert_eq!(merge_directives(SAMPLE, &[]), SAMPLE);
    }

    #[test]
    fn test_merge_matches_bare_name_directive() {
        // A disable line like "monitor = HDMI-A-1" still belongs to that monitor
        let contents = "monitor = HDMI-A-1\n";
        let merged = merge_directives(contents, &updates(&[("HDMI-A-1", "body")]));
        assert_eq!(merged, "monitor = HDMI-A-1, body\n");
    }

    #[test]
    fn test_save_merged_creates_and_rewrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hypr").join("monitors.conf");

        save_merged(&path, &updates(&[("eDP-1", "2560x1600@180, 0x0, 2")])).unwrap();
        let first = fs::read_to_string(&path).unwrap();
        assert_eq!(first, "monitor = eDP-1, 2560x1600@180, 0x0, 2\n");

        save_merged(&path, &updates(&[("eDP-1", "2560x1600@180, 10x0, 2")])).unwrap();
        let second = fs::read_to_string(&path).unwrap();
        assert_eq!(second, "monitor = eDP-1, 2560x1600@180, 10x0, 2\n");

        // No temp file left behind
        assert!(!dir.path().join("hypr").join("monitors.conf.tmp").exists());
    }

    #[test]
    fn test_save_merged_preserves_unrelated_lines_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("monitors.conf");
        fs::write(&path, SAMPLE).unwrap();

        save_merged(&path, &updates(&[("HDMI-A-1", "3840x2160@120, 1280x0, 2.4")])).unwrap();
        let merged = fs::read_to_string(&path).unwrap();
        assert!(merged.starts_with("# comment\n"));
        assert!(merged.contains("env = FOO,bar\n"));
        assert!(merged.ends_with("monitor = HDMI-A-1, 3840x2160@120, 1280x0, 2.4\n"));
    }
}
