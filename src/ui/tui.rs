//! Ratatui interface wired to the HTTP search client.
//!
//! Single control thread: the event loop owns every piece of UI state and
//! the result store. Each submission bumps the store generation and hands
//! the fetch to a detached worker thread; the worker reports back over a
//! channel and the loop applies the generation check on delivery, so a slow
//! reply from a superseded query never reaches the screen.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{ExecutableCommand, execute};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crate::actions::{self, Activation};
use crate::search::client::{SearchClient, SearchError, SearchOutcome};
use crate::search::store::ResultStore;
use crate::ui::components::theme::ThemePalette;
use crate::ui::shortcuts;

/// Confirmation notices auto-dismiss quickly so they do not obstruct the list.
const CONFIRM_TTL: Duration = Duration::from_millis(1500);
/// Errors linger a little longer.
const ERROR_TTL: Duration = Duration::from_millis(3000);

const SNIPPET_DISPLAY_CHARS: usize = 100;
const HISTORY_CAP: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FocusRegion {
    Query,
    Results,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NoticeKind {
    Info,
    Success,
    Error,
}

/// Transient footer notification with an expiry deadline.
struct Notice {
    text: String,
    kind: NoticeKind,
    until: Instant,
}

impl Notice {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Info,
            until: Instant::now() + CONFIRM_TTL,
        }
    }

    fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Success,
            until: Instant::now() + CONFIRM_TTL,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Error,
            until: Instant::now() + ERROR_TTL,
        }
    }

    fn expired(&self) -> bool {
        Instant::now() >= self.until
    }
}

#[derive(Serialize, Deserialize, Default)]
struct TuiStatePersisted {
    history: Vec<String>,
}

fn state_path_for(data_dir: &std::path::Path) -> std::path::PathBuf {
    // Persists lightweight, non-secret session state (query history).
    data_dir.join("tui_state.json")
}

fn load_state(path: &std::path::Path) -> TuiStatePersisted {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default()
}

fn save_state(path: &std::path::Path, state: &TuiStatePersisted) {
    if let Ok(body) = serde_json::to_string_pretty(state) {
        let _ = std::fs::write(path, body);
    }
}

/// Turns the raw draft into a submittable query. Whitespace-only drafts
/// yield nothing: no fetch, no generation bump, no visible effect.
fn finalize_draft(draft: &str) -> Option<String> {
    let trimmed = draft.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Clamped highlight move; no wraparound, no-op on an empty set.
fn step_selection(selected: Option<usize>, len: usize, down: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let cur = selected.unwrap_or(0);
    let next = if down {
        (cur + 1).min(len - 1)
    } else {
        cur.saturating_sub(1)
    };
    Some(next)
}

/// Digit hotkeys are 1-based; digits past the end of the set are ignored.
fn digit_selection(c: char, len: usize) -> Option<usize> {
    let d = c.to_digit(10)? as usize;
    if (1..=len).contains(&d) { Some(d - 1) } else { None }
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{cut}…")
}

pub fn footer_legend() -> &'static str {
    "/ search | Enter submit | j/k move | 1-9 pick | l open | F1 help | q/Esc quit"
}

fn help_lines(palette: ThemePalette) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    let add_section = |title: &str, items: &[String]| -> Vec<Line<'static>> {
        let mut v = Vec::new();
        v.push(Line::from(Span::styled(title.to_string(), palette.title())));
        for item in items {
            v.push(Line::from(format!("  {item}")));
        }
        v.push(Line::from(""));
        v
    };

    lines.extend(add_section(
        "Search",
        &[
            format!("{} focuses the query field and clears the draft", shortcuts::FOCUS_QUERY),
            format!("{} submits; empty drafts are ignored", shortcuts::SUBMIT),
            format!("{} cycles recent queries into the draft", shortcuts::HISTORY_CYCLE),
        ],
    ));
    lines.extend(add_section(
        "Results",
        &[
            format!("{} / {} move the highlight (clamped)", shortcuts::NAV_DOWN, shortcuts::NAV_UP),
            format!("{} jump straight to a numbered result", shortcuts::DIRECT_SELECT),
            format!("{} copies the URL and opens it in your browser", shortcuts::OPEN),
        ],
    ));
    lines.extend(add_section(
        "General",
        &[
            format!("{} toggles this help", shortcuts::HELP),
            format!("{} quits", shortcuts::QUIT),
        ],
    ));

    lines
}

fn render_help_overlay(frame: &mut Frame, palette: ThemePalette) {
    let area = frame.area();
    let popup_area = centered_rect(60, 60, area);
    let block = Block::default()
        .title(Span::styled("Help / Shortcuts", palette.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent));

    frame.render_widget(Clear, popup_area);
    frame.render_widget(
        Paragraph::new(help_lines(palette))
            .block(block)
            .wrap(Wrap { trim: true }),
        popup_area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1]);

    horizontal[1]
}

pub fn run_tui(endpoint: &str, data_dir: &std::path::Path, once: bool) -> Result<()> {
    if once
        && std::env::var("TUI_HEADLESS")
            .map(|v| v == "1")
            .unwrap_or(false)
    {
        return run_tui_headless(endpoint);
    }

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let state_path = state_path_for(data_dir);
    let persisted = load_state(&state_path);

    let mut store = ResultStore::new();
    let mut selected: Option<usize> = None;
    let mut focus = FocusRegion::Query;
    let mut query = String::new();
    let mut last_query = String::new();
    let mut awaiting: Option<u64> = None;
    let mut notice: Option<Notice> = None;
    let mut status = format!("Endpoint {endpoint} - type a query, Enter to search (F1 help)");
    let mut show_help = false;
    let mut needs_draw = true;
    let mut query_history: VecDeque<String> =
        persisted.history.into_iter().take(HISTORY_CAP).collect();
    let mut history_cursor: Option<usize> = None;
    let tick_rate = Duration::from_millis(50);
    let palette = ThemePalette::dark();

    // Fetch replies are marshalled back onto this thread; UI state is only
    // ever touched here.
    let (reply_tx, reply_rx) = mpsc::channel::<(u64, Result<SearchOutcome, SearchError>)>();

    loop {
        if notice.as_ref().map(|n| n.expired()).unwrap_or(false) {
            notice = None;
            needs_draw = true;
        }

        while let Ok((generation, outcome)) = reply_rx.try_recv() {
            needs_draw = true;
            match outcome {
                Ok(SearchOutcome::Results(results)) => {
                    let count = results.len();
                    if store.commit(results, generation) {
                        awaiting = None;
                        selected = Some(0);
                        focus = FocusRegion::Results;
                        status = format!(
                            "{count} result{} for \"{last_query}\"",
                            if count == 1 { "" } else { "s" }
                        );
                    } else {
                        tracing::debug!(generation, "dropping stale result set");
                    }
                }
                Ok(SearchOutcome::Empty) => {
                    if store.commit(Vec::new(), generation) {
                        awaiting = None;
                        selected = None;
                        status = format!("No results for \"{last_query}\"");
                        notice = Some(Notice::info("No results found."));
                    }
                }
                Err(err) => {
                    if store.commit(Vec::new(), generation) {
                        awaiting = None;
                        selected = None;
                        status = "Search failed - edit the query and retry".to_string();
                        notice = Some(Notice::error(err.to_string()));
                        tracing::warn!("search error: {err}");
                    } else {
                        tracing::debug!(generation, "dropping stale error");
                    }
                }
            }
        }

        if needs_draw {
            terminal.draw(|f| {
                f.render_widget(
                    Block::default().style(Style::default().bg(palette.bg)),
                    f.area(),
                );

                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .margin(1)
                    .constraints(
                        [
                            Constraint::Length(3), // query bar
                            Constraint::Min(0),    // results
                            Constraint::Length(1), // footer
                        ]
                        .as_ref(),
                    )
                    .split(f.area());

                let query_focused = focus == FocusRegion::Query;
                let bar_text = if query_focused {
                    format!("{query}▏")
                } else {
                    query.clone()
                };
                let bar = Paragraph::new(bar_text).block(
                    Block::default()
                        .title(Span::styled("Search", palette.title()))
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(if query_focused {
                            palette.accent
                        } else {
                            palette.hint
                        })),
                );
                f.render_widget(bar, chunks[0]);

                let results_focused = focus == FocusRegion::Results;
                let results_block = Block::default()
                    .title(Span::styled("Results", palette.title()))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(if results_focused {
                        palette.accent
                    } else {
                        palette.hint
                    }));

                if store.is_empty() {
                    let placeholder = if awaiting.is_some() {
                        format!("Searching \"{last_query}\"…")
                    } else if last_query.is_empty() {
                        "Type a query above and press Enter.".to_string()
                    } else {
                        "No results to show.".to_string()
                    };
                    f.render_widget(
                        Paragraph::new(placeholder)
                            .style(palette.hint_style())
                            .block(results_block),
                        chunks[1],
                    );
                } else {
                    let items: Vec<ListItem> = store
                        .current()
                        .iter()
                        .map(|result| {
                            let header = Line::from(vec![
                                Span::styled(
                                    format!("{}.", result.index),
                                    Style::default().fg(palette.accent_alt),
                                ),
                                Span::raw(" "),
                                Span::styled(
                                    result.display_title().to_string(),
                                    Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
                                ),
                            ]);
                            let url_line = Line::from(Span::styled(
                                format!("   {}", result.url),
                                Style::default()
                                    .fg(palette.accent)
                                    .add_modifier(Modifier::ITALIC),
                            ));
                            let snippet_line = Line::from(Span::styled(
                                format!(
                                    "   {}",
                                    truncate_chars(&result.snippet, SNIPPET_DISPLAY_CHARS)
                                ),
                                palette.hint_style(),
                            ));
                            ListItem::new(vec![header, url_line, snippet_line])
                        })
                        .collect();

                    let mut list_state = ListState::default();
                    list_state.select(selected);
                    let list = List::new(items).block(results_block).highlight_style(
                        Style::default()
                            .bg(palette.surface)
                            .add_modifier(Modifier::BOLD),
                    );
                    f.render_stateful_widget(list, chunks[1], &mut list_state);
                }

                let footer = match &notice {
                    Some(n) => {
                        let color = match n.kind {
                            NoticeKind::Info => palette.warning,
                            NoticeKind::Success => palette.success,
                            NoticeKind::Error => palette.error,
                        };
                        Paragraph::new(n.text.clone())
                            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                    }
                    None => Paragraph::new(format!("{status} | {}", footer_legend()))
                        .style(palette.hint_style()),
                };
                f.render_widget(footer, chunks[2]);

                if show_help {
                    render_help_overlay(f, palette);
                }
            })?;
            needs_draw = false;
        }

        let poll_timeout = if notice.is_some() || awaiting.is_some() {
            tick_rate
        } else {
            Duration::from_millis(250)
        };

        if crossterm::event::poll(poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            needs_draw = true;

            // Global quit override
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                break;
            }

            if show_help {
                match key.code {
                    KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                        show_help = false;
                    }
                    _ => {}
                }
                continue;
            }

            if key.code == KeyCode::F(1) {
                show_help = true;
                continue;
            }

            match focus {
                FocusRegion::Query => match key.code {
                    KeyCode::Esc => break,
                    KeyCode::Enter => {
                        let Some(trimmed) = finalize_draft(&query) else {
                            continue;
                        };
                        let generation = store.begin_query();
                        store.clear();
                        selected = None;
                        awaiting = Some(generation);
                        last_query = trimmed.clone();
                        status = format!("Searching \"{trimmed}\"…");
                        if query_history.front() != Some(&trimmed) {
                            query_history.push_front(trimmed.clone());
                            if query_history.len() > HISTORY_CAP {
                                query_history.pop_back();
                            }
                        }
                        history_cursor = None;
                        // The blocking client lives entirely on the worker
                        // thread; only the reply crosses back over the channel.
                        let worker_endpoint = endpoint.to_string();
                        let tx = reply_tx.clone();
                        std::thread::spawn(move || {
                            let reply = match SearchClient::new(&worker_endpoint) {
                                Ok(client) => client.fetch(&trimmed),
                                Err(err) => {
                                    tracing::error!("building search client: {err}");
                                    Err(SearchError::Connect {
                                        endpoint: worker_endpoint,
                                    })
                                }
                            };
                            let _ = tx.send((generation, reply));
                        });
                        focus = FocusRegion::Results;
                    }
                    KeyCode::Backspace => {
                        query.pop();
                    }
                    KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        if query_history.is_empty() {
                            notice = Some(Notice::info("No query history yet"));
                        } else {
                            let next = history_cursor
                                .map(|idx| (idx + 1) % query_history.len())
                                .unwrap_or(0);
                            if let Some(saved) = query_history.get(next) {
                                history_cursor = Some(next);
                                query = saved.clone();
                            }
                        }
                    }
                    KeyCode::Down | KeyCode::Up | KeyCode::Tab => {
                        if !store.is_empty() {
                            focus = FocusRegion::Results;
                        }
                    }
                    KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                        query.push(c);
                        history_cursor = None;
                    }
                    _ => {}
                },
                FocusRegion::Results => match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => break,
                    KeyCode::Char('j') | KeyCode::Down => {
                        selected = step_selection(selected, store.len(), true);
                    }
                    KeyCode::Char('k') | KeyCode::Up => {
                        selected = step_selection(selected, store.len(), false);
                    }
                    KeyCode::Char('/') => {
                        query.clear();
                        history_cursor = None;
                        focus = FocusRegion::Query;
                    }
                    KeyCode::Char('?') => {
                        show_help = true;
                    }
                    KeyCode::Tab => {
                        focus = FocusRegion::Query;
                    }
                    KeyCode::Char('l') | KeyCode::Enter => {
                        if let Some(result) = selected.and_then(|idx| store.get(idx)) {
                            match actions::activate(result) {
                                Activation::Opened { title, copied } => {
                                    notice = Some(if copied {
                                        Notice::success(format!("Opened & copied: {title}"))
                                    } else {
                                        Notice::success(format!(
                                            "Opened: {title} (clipboard unavailable)"
                                        ))
                                    });
                                }
                                Activation::InvalidSelection => {
                                    notice = Some(Notice::error(
                                        "Invalid selection: result has no usable URL",
                                    ));
                                }
                            }
                        }
                    }
                    KeyCode::Char(c @ '1'..='9') => {
                        if let Some(idx) = digit_selection(c, store.len()) {
                            selected = Some(idx);
                        }
                    }
                    _ => {}
                },
            }
        }
    }

    let persisted_out = TuiStatePersisted {
        history: query_history.into_iter().collect(),
    };
    save_state(&state_path, &persisted_out);

    teardown_terminal()
}

/// Fixed query for the headless reachability check; submissions proper never
/// fetch with an empty query.
const HEADLESS_QUERY: &str = "healthcheck";

fn run_tui_headless(endpoint: &str) -> Result<()> {
    // Blocking HTTP stays off the runtime thread, same as the interactive path.
    let endpoint = endpoint.to_string();
    std::thread::spawn(move || -> Result<()> {
        let client = SearchClient::new(&endpoint)?;
        client.fetch(HEADLESS_QUERY)?;
        Ok(())
    })
    .join()
    .map_err(|_| anyhow::anyhow!("headless fetch thread panicked"))?
}

fn teardown_terminal() -> Result<()> {
    let mut stdout = io::stdout();
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn state_roundtrip_persists_history() {
        let dir = TempDir::new().unwrap();
        let path = state_path_for(dir.path());

        let state = TuiStatePersisted {
            history: vec!["rust".into(), "searx".into()],
        };
        save_state(&path, &state);

        let loaded = load_state(&path);
        assert_eq!(loaded.history, vec!["rust".to_string(), "searx".to_string()]);
    }

    #[test]
    fn missing_state_file_loads_default() {
        let dir = TempDir::new().unwrap();
        let loaded = load_state(&state_path_for(dir.path()));
        assert!(loaded.history.is_empty());
    }

    #[test]
    fn whitespace_only_drafts_do_not_submit() {
        assert_eq!(finalize_draft(""), None);
        assert_eq!(finalize_draft("   "), None);
        assert_eq!(finalize_draft("\t \n"), None);
    }

    #[test]
    fn drafts_are_trimmed_on_submit() {
        assert_eq!(finalize_draft("  rust tui  "), Some("rust tui".to_string()));
    }

    #[test]
    fn selection_clamps_at_both_ends() {
        assert_eq!(step_selection(Some(2), 3, true), Some(2));
        assert_eq!(step_selection(Some(0), 3, false), Some(0));
        assert_eq!(step_selection(Some(1), 3, true), Some(2));
        assert_eq!(step_selection(Some(1), 3, false), Some(0));
    }

    #[test]
    fn selection_is_a_noop_on_an_empty_set() {
        assert_eq!(step_selection(None, 0, true), None);
        assert_eq!(step_selection(None, 0, false), None);
    }

    #[test]
    fn digits_within_bounds_select_one_based_positions() {
        assert_eq!(digit_selection('1', 2), Some(0));
        assert_eq!(digit_selection('2', 2), Some(1));
    }

    #[test]
    fn digits_out_of_range_are_ignored() {
        assert_eq!(digit_selection('3', 2), None);
        assert_eq!(digit_selection('9', 2), None);
        assert_eq!(digit_selection('0', 5), None);
    }

    #[test]
    fn footer_mentions_core_keys() {
        let legend = footer_legend();
        assert!(legend.contains("Enter submit"));
        assert!(legend.contains("1-9 pick"));
        assert!(legend.contains("q/Esc quit"));
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate_chars("short", 100), "short");
        let long = "é".repeat(120);
        let cut = truncate_chars(&long, 100);
        assert_eq!(cut.chars().count(), 101); // 100 chars + ellipsis
    }
}
