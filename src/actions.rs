//! Side effects for an activated result: clipboard copy and browser open.

use std::process::{Command, Stdio};
use tracing::{debug, warn};

use crate::model::types::SearchResult;

/// What happened when a result was activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// URL empty or not absolute; no side effects were attempted.
    InvalidSelection,
    /// Browser launch was dispatched; `copied` is false when no clipboard
    /// tool accepted the URL.
    Opened { title: String, copied: bool },
}

/// An actionable URL carries an explicit scheme, e.g. `https://docs.rs`.
pub fn is_actionable(url: &str) -> bool {
    let Some((scheme, rest)) = url.split_once("://") else {
        return false;
    };
    !rest.is_empty()
        && scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Copies the URL and opens it in the default handler. The two effects are
/// independent: a missing clipboard tool never blocks the browser launch.
pub fn activate(result: &SearchResult) -> Activation {
    if !is_actionable(&result.url) {
        return Activation::InvalidSelection;
    }
    let copied = copy_to_clipboard(&result.url);
    if !copied {
        warn!(url = %result.url, "clipboard copy failed (missing tool?)");
    }
    open_in_browser(&result.url);
    Activation::Opened {
        title: result.display_title().to_string(),
        copied,
    }
}

/// Pipes `text` into the first clipboard tool present. Best effort.
#[cfg(any(target_os = "linux", target_os = "macos"))]
pub fn copy_to_clipboard(text: &str) -> bool {
    let child = Command::new("sh")
        .arg("-c")
        .arg("if command -v wl-copy >/dev/null; then wl-copy; elif command -v pbcopy >/dev/null; then pbcopy; elif command -v xclip >/dev/null; then xclip -selection clipboard; else exit 1; fi")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    if let Ok(mut child) = child
        && let Some(mut stdin) = child.stdin.take()
    {
        use std::io::Write;
        let _ = stdin.write_all(text.as_bytes());
        drop(stdin); // Ensure EOF
        return child.wait().map(|s| s.success()).unwrap_or(false);
    }
    false
}

#[cfg(target_os = "windows")]
pub fn copy_to_clipboard(text: &str) -> bool {
    let child = Command::new("powershell")
        .arg("-command")
        .arg("$Input | Set-Clipboard")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    if let Ok(mut child) = child
        && let Some(mut stdin) = child.stdin.take()
    {
        use std::io::Write;
        let _ = stdin.write_all(text.as_bytes());
        drop(stdin);
        return child.wait().map(|s| s.success()).unwrap_or(false);
    }
    false
}

/// Fire-and-forget launch of the platform URL opener, with its stdio
/// discarded so launcher noise never reaches the terminal.
pub fn open_in_browser(url: &str) -> bool {
    debug!(%url, "opening in browser");
    opener_command(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .is_ok()
}

#[cfg(target_os = "linux")]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}

#[cfg(target_os = "macos")]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(target_os = "windows")]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", "", url]);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_urls_are_actionable() {
        assert!(is_actionable("http://a"));
        assert!(is_actionable("https://docs.rs/ratatui"));
        assert!(is_actionable("ftp://mirror.example.com/file"));
    }

    #[test]
    fn empty_or_schemeless_urls_are_not() {
        assert!(!is_actionable(""));
        assert!(!is_actionable("docs.rs/ratatui"));
        assert!(!is_actionable("/relative/path"));
        assert!(!is_actionable("://no-scheme"));
        assert!(!is_actionable("1http://bad-scheme-start"));
        assert!(!is_actionable("http://"));
    }

    #[test]
    fn activating_a_non_actionable_result_attempts_no_side_effects() {
        let result = SearchResult {
            index: 1,
            title: "broken".into(),
            url: String::new(),
            snippet: String::new(),
        };
        assert_eq!(activate(&result), Activation::InvalidSelection);
    }
}
