//! Interactive chat TUI. Plays the host-UI role: it owns the app snapshot
//! (inventory, demo cart/compare/login state) and calls the assistant once
//! per submitted line.

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io::{self, Stdout};
use std::path::PathBuf;

use showroom_core::{AppSnapshot, Assistant, CartItem, UserProfile, Vehicle};

#[derive(Clone, Debug)]
struct Msg {
    role: Role,
    content: String,
}

#[derive(Clone, Debug)]
enum Role {
    User,
    Assistant,
}

struct ChatLog {
    path: PathBuf,
}

impl ChatLog {
    fn open_today() -> Result<Self> {
        let home = crate::state::ensure_showroom_home()?;
        let dir = home.join("chat");
        std::fs::create_dir_all(&dir)?;
        let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
        let path = dir.join(format!("{today}.md"));
        Ok(Self { path })
    }

    fn append_system(&mut self, msg: &str) -> Result<()> {
        self.append("system", msg)
    }

    fn append_user(&mut self, msg: &str) -> Result<()> {
        self.append("user", msg)
    }

    fn append_assistant(&mut self, msg: &str) -> Result<()> {
        self.append("assistant", msg)
    }

    fn append(&mut self, role: &str, msg: &str) -> Result<()> {
        use std::io::Write;
        let mut f = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(
            f,
            "- {} [{}] {}",
            chrono::Utc::now().to_rfc3339(),
            role,
            msg.replace('\n', " ")
        )?;
        Ok(())
    }
}

pub fn run_chat(vehicles: Vec<Vehicle>, login: Option<String>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = chat_loop(&mut terminal, vehicles, login);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

fn chat_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    vehicles: Vec<Vehicle>,
    login: Option<String>,
) -> Result<()> {
    let mut assistant = Assistant::new();
    let mut snapshot = AppSnapshot {
        user: login.map(UserProfile::new),
        vehicles,
        ..Default::default()
    };
    assistant.update_app_context(&snapshot);

    let mut messages: Vec<Msg> = vec![Msg {
        role: Role::Assistant,
        content: "Hi, I'm your showroom assistant. Ask me about vehicles, pricing, or financing."
            .to_string(),
    }];

    let mut input = String::new();
    let mut show_help = true;

    // daily log file
    let mut log = ChatLog::open_today()?;
    log.append_system("session_start")?;

    loop {
        let actions: Vec<&str> = assistant.quick_actions().iter().map(|a| a.label).collect();
        let actions_line = actions.join("  |  ");

        terminal.draw(|f| {
            let size = f.area();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(5),
                    Constraint::Min(5),
                    Constraint::Length(3),
                    Constraint::Length(3),
                ])
                .split(size);

            let splash = Paragraph::new(Text::from(vec![
                Line::from(Span::styled(
                    "Showroom",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::raw("")),
                Line::from(Span::styled(
                    ">_ showroom chat",
                    Style::default().fg(Color::Cyan),
                )),
                Line::from(Span::styled(
                    "type /help or ? for shortcuts",
                    Style::default().fg(Color::Gray),
                )),
            ]))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(splash, chunks[0]);

            let header = Block::default().borders(Borders::ALL).title("conversation");

            let mut lines: Vec<Line> = Vec::new();
            if show_help {
                lines.push(Line::from(Span::styled(
                    "Shortcuts: Enter=send, q=quit, ?=help",
                    Style::default().fg(Color::Gray),
                )));
                lines.push(Line::raw(
                    "Commands: /help /cart <n> /compare <n> /login <email> /logout /summary /prefs",
                ));
                lines.push(Line::raw(""));
            }

            for m in &messages {
                let (tag, color) = match m.role {
                    Role::User => ("you", Color::Cyan),
                    Role::Assistant => ("showroom", Color::Magenta),
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("{}: ", tag), Style::default().fg(color)),
                    Span::raw(m.content.clone()),
                ]));
                lines.push(Line::raw(""));
            }

            let history = Paragraph::new(Text::from(lines))
                .block(header)
                .wrap(Wrap { trim: false });
            f.render_widget(history, chunks[1]);

            let actions_widget = Paragraph::new(actions_line.as_str())
                .block(Block::default().borders(Borders::ALL).title("quick actions"))
                .style(Style::default().fg(Color::Green));
            f.render_widget(actions_widget, chunks[2]);

            let input_block = Block::default().borders(Borders::ALL).title("message");
            let input_widget = Paragraph::new(input.as_str())
                .block(input_block)
                .style(Style::default().fg(Color::White));
            f.render_widget(input_widget, chunks[3]);
        })?;

        if event::poll(std::time::Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') if input.is_empty() => break,
                    KeyCode::Char('?') if input.is_empty() => {
                        show_help = !show_help;
                    }
                    KeyCode::Enter => {
                        let trimmed = input.trim().to_string();
                        if !trimmed.is_empty() {
                            log.append_user(&trimmed)?;

                            let reply = if trimmed.starts_with('/') {
                                handle_slash(&trimmed, &mut snapshot, &assistant)
                            } else {
                                messages.push(Msg {
                                    role: Role::User,
                                    content: trimmed.clone(),
                                });
                                assistant.generate_response(&trimmed, &snapshot)
                            };

                            messages.push(Msg {
                                role: Role::Assistant,
                                content: reply.clone(),
                            });
                            log.append_assistant(&reply)?;
                            assistant.update_app_context(&snapshot);
                        }
                        input.clear();
                    }
                    KeyCode::Backspace => {
                        input.pop();
                    }
                    KeyCode::Char(c) => {
                        input.push(c);
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

/// Host-side commands that mutate the demo snapshot or print session state.
fn handle_slash(input: &str, snapshot: &mut AppSnapshot, assistant: &Assistant) -> String {
    let mut parts = input.split_whitespace();
    let command = parts.next().unwrap_or("");
    let arg = parts.next();

    match command {
        "/help" => "Commands:\n\
            - /cart <n>: add the n-th inventory vehicle to the demo cart\n\
            - /compare <n>: add the n-th inventory vehicle to the compare list (max 4)\n\
            - /login <email>, /logout\n\
            - /summary: recent conversation\n\
            - /prefs: what the assistant has learned\n\
            \nShortcuts: Enter=send, q=quit, ?=toggle help"
            .to_string(),
        "/cart" => match indexed_vehicle(snapshot, arg) {
            Some(v) => {
                let item = CartItem::new(v.brand.clone(), v.model.clone(), v.price, 1, v.shape);
                snapshot.cart_items.push(item);
                format!("Added {} to the cart.", v.full_name())
            }
            None => "Usage: /cart <n> with n from 1 to the inventory size.".to_string(),
        },
        "/compare" => match indexed_vehicle(snapshot, arg) {
            Some(v) => {
                // The host enforces the 4-slot compare limit, not the core.
                if snapshot.compare_items.len() >= 4 {
                    "The comparison list is full (4 vehicles).".to_string()
                } else {
                    snapshot.compare_items.push(v.clone());
                    format!("Added {} to the comparison list.", v.full_name())
                }
            }
            None => "Usage: /compare <n> with n from 1 to the inventory size.".to_string(),
        },
        "/login" => match arg {
            Some(email) => {
                snapshot.user = Some(UserProfile::new(email));
                format!("Logged in as {email}.")
            }
            None => "Usage: /login <email>".to_string(),
        },
        "/logout" => {
            snapshot.user = None;
            "Logged out.".to_string()
        }
        "/summary" => {
            let summary = assistant.conversation_summary();
            if summary.is_empty() {
                "No conversation yet.".to_string()
            } else {
                summary
            }
        }
        "/prefs" => {
            let prefs = assistant.preferences_summary();
            if prefs.is_empty() {
                "Nothing learned yet. Ask about some vehicles!".to_string()
            } else {
                prefs
            }
        }
        _ => "Unknown command. Try /help".to_string(),
    }
}

fn indexed_vehicle(snapshot: &AppSnapshot, arg: Option<&str>) -> Option<Vehicle> {
    let index: usize = arg?.parse().ok()?;
    if index == 0 {
        return None;
    }
    snapshot.vehicles.get(index - 1).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use showroom_core::BodyShape;

    fn snapshot() -> AppSnapshot {
        AppSnapshot {
            vehicles: vec![
                Vehicle::new("Toyota", "RAV4", BodyShape::Suv, 32500),
                Vehicle::new("Honda", "Civic", BodyShape::Sedan, 24900),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_slash_cart_adds_item() {
        let mut snap = snapshot();
        let assistant = Assistant::new();
        let reply = handle_slash("/cart 2", &mut snap, &assistant);
        assert_eq!(reply, "Added Honda Civic to the cart.");
        assert_eq!(snap.cart_items.len(), 1);
        assert_eq!(snap.cart_items[0].model, "Civic");
    }

    #[test]
    fn test_slash_compare_enforces_host_limit() {
        let mut snap = snapshot();
        let assistant = Assistant::new();
        for _ in 0..4 {
            handle_slash("/compare 1", &mut snap, &assistant);
        }
        assert_eq!(snap.compare_items.len(), 4);
        let reply = handle_slash("/compare 2", &mut snap, &assistant);
        assert!(reply.contains("full"));
        assert_eq!(snap.compare_items.len(), 4);
    }

    #[test]
    fn test_slash_bad_index() {
        let mut snap = snapshot();
        let assistant = Assistant::new();
        assert!(handle_slash("/cart 0", &mut snap, &assistant).starts_with("Usage"));
        assert!(handle_slash("/cart 99", &mut snap, &assistant).starts_with("Usage"));
        assert!(handle_slash("/cart", &mut snap, &assistant).starts_with("Usage"));
    }

    #[test]
    fn test_slash_login_logout() {
        let mut snap = snapshot();
        let assistant = Assistant::new();
        handle_slash("/login kim@example.com", &mut snap, &assistant);
        assert!(snap.is_logged_in());
        handle_slash("/logout", &mut snap, &assistant);
        assert!(!snap.is_logged_in());
    }

    #[test]
    fn test_unknown_command() {
        let mut snap = snapshot();
        let assistant = Assistant::new();
        assert!(handle_slash("/warp", &mut snap, &assistant).contains("/help"));
    }
}
