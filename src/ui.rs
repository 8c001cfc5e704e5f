use ratatui::{prelude::*, widgets::*};
use serde_json::Value;

use crate::models::{FetchRecord, FetchStatus};

/// Badge shown in a card title
pub fn status_badge(status: &FetchStatus<'_>) -> Span<'static> {
    let style = match status {
        FetchStatus::Loading => Style::default().fg(Color::Black).bg(Color::Gray),
        FetchStatus::Failed(_) => Style::default().fg(Color::White).bg(Color::Red).bold(),
        FetchStatus::Success(_) => Style::default().fg(Color::Black).bg(Color::Green).bold(),
    };
    Span::styled(format!(" {} ", status.label()), style)
}

/// Card border colour
pub fn status_color(status: &FetchStatus<'_>) -> Color {
    match status {
        FetchStatus::Loading => Color::Gray,
        FetchStatus::Failed(_) => Color::Red,
        FetchStatus::Success(_) => Color::Green,
    }
}

/// Placeholder bars drawn while a card is loading
pub fn skeleton_lines(width: u16) -> Vec<Line<'static>> {
    let width = width as usize;
    [width, width * 3 / 4, width / 2]
        .into_iter()
        .map(|w| Line::from(Span::styled("░".repeat(w), Style::default().fg(Color::DarkGray))))
        .collect()
}

/// Body of a failed card
pub fn error_paragraph(message: &str) -> Paragraph<'static> {
    let line = Line::from(vec![
        Span::styled("Error: ", Style::default().fg(Color::Red).bold()),
        Span::styled(message.to_string(), Style::default().fg(Color::Red)),
    ]);
    Paragraph::new(line).wrap(Wrap { trim: false })
}

/// Card footer: local settle time and how long the fetch took
pub fn settle_footer(record: &FetchRecord) -> String {
    let mut parts = Vec::new();
    if let Some(t) = record.settled_at {
        parts.push(t.with_timezone(&chrono::Local).format("%H:%M:%S").to_string());
    }
    if let Some(ms) = record.elapsed_ms {
        parts.push(format!("{}ms", ms));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" {} ", parts.join(" · "))
    }
}

/// Pretty-print a payload for display
pub fn format_payload(payload: Option<&Value>) -> String {
    match payload {
        Some(value) => serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
        None => String::from("null"),
    }
}

/// Simple JSON syntax highlighting, one line at a time
pub fn highlight_json(text: &str) -> Vec<Line<'static>> {
    text.lines().map(highlight_json_line).collect()
}

fn highlight_json_line(line: &str) -> Line<'static> {
    let chars: Vec<char> = line.chars().collect();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut plain = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '"' => {
                flush_plain(&mut spans, &mut plain);
                let start = i;
                i += 1;
                while i < chars.len() && chars[i] != '"' {
                    if chars[i] == '\\' {
                        i += 1;
                    }
                    i += 1;
                }
                let end = (i + 1).min(chars.len());
                let token: String = chars[start..end].iter().collect();
                // A string followed by ':' is an object key
                let is_key = chars[end..].iter().find(|c| !c.is_whitespace()) == Some(&':');
                let color = if is_key { Color::Cyan } else { Color::Green };
                spans.push(Span::styled(token, Style::default().fg(color)));
                i = end;
                continue;
            }
            '{' | '}' | '[' | ']' => {
                flush_plain(&mut spans, &mut plain);
                spans.push(Span::styled(c.to_string(), Style::default().fg(Color::Yellow)));
            }
            ':' => {
                flush_plain(&mut spans, &mut plain);
                spans.push(Span::styled(":", Style::default().fg(Color::White)));
            }
            '-' | '0'..='9' => {
                flush_plain(&mut spans, &mut plain);
                let start = i;
                while i < chars.len() && matches!(chars[i], '0'..='9' | '-' | '+' | '.' | 'e' | 'E') {
                    i += 1;
                }
                let number: String = chars[start..i].iter().collect();
                spans.push(Span::styled(number, Style::default().fg(Color::LightBlue)));
                continue;
            }
            c if c.is_ascii_alphabetic() => {
                flush_plain(&mut spans, &mut plain);
                let start = i;
                while i < chars.len() && chars[i].is_ascii_alphabetic() {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                if matches!(word.as_str(), "true" | "false" | "null") {
                    spans.push(Span::styled(word, Style::default().fg(Color::Magenta)));
                } else {
                    spans.push(Span::raw(word));
                }
                continue;
            }
            _ => plain.push(c),
        }
        i += 1;
    }

    flush_plain(&mut spans, &mut plain);
    Line::from(spans)
}

fn flush_plain(spans: &mut Vec<Span<'static>>, plain: &mut String) {
    if !plain.is_empty() {
        spans.push(Span::raw(std::mem::take(plain)));
    }
}

/// Rect centered in `r`, sized as a percentage of it
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn styled(line: &Line<'_>) -> Vec<(String, Option<Color>)> {
        line.spans
            .iter()
            .map(|s| (s.content.to_string(), s.style.fg))
            .collect()
    }

    #[test]
    fn test_key_and_string_value() {
        let lines = highlight_json(r#"  "message": "hello","#);
        let spans = styled(&lines[0]);
        assert!(spans.contains(&("\"message\"".to_string(), Some(Color::Cyan))));
        assert!(spans.contains(&("\"hello\"".to_string(), Some(Color::Green))));
    }

    #[test]
    fn test_literals_and_numbers() {
        let lines = highlight_json(r#"  "ok": true, "n": -1.5e3, "x": null"#);
        let spans = styled(&lines[0]);
        assert!(spans.contains(&("true".to_string(), Some(Color::Magenta))));
        assert!(spans.contains(&("null".to_string(), Some(Color::Magenta))));
        assert!(spans.contains(&("-1.5e3".to_string(), Some(Color::LightBlue))));
    }

    #[test]
    fn test_escaped_quote_stays_in_string() {
        let lines = highlight_json(r#""say \"hi\"""#);
        let spans = styled(&lines[0]);
        assert_eq!(spans, vec![(r#""say \"hi\"""#.to_string(), Some(Color::Green))]);
    }

    #[test]
    fn test_highlight_preserves_text() {
        let text = format_payload(Some(&json!({"user": {"id": 7, "tags": ["a", "b"]}})));
        let rebuilt: Vec<String> = highlight_json(&text)
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(rebuilt.join("\n"), text);
    }

    #[test]
    fn test_settle_footer_shows_elapsed_time() {
        let mut record = FetchRecord::loading();
        assert_eq!(settle_footer(&record), "");

        record.is_loading = false;
        record.settled_at = Some(chrono::Utc::now());
        record.elapsed_ms = Some(128);
        let footer = settle_footer(&record);
        assert!(footer.ends_with(" · 128ms "), "footer was {:?}", footer);
    }

    #[test]
    fn test_skeleton_widths() {
        let lines = skeleton_lines(8);
        let widths: Vec<usize> = lines.iter().map(|l| l.width()).collect();
        assert_eq!(widths, vec![8, 6, 4]);
    }
}
