use std::error::Error;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::{BusinessRecord, Field};

use super::forms::LABEL_WIDTH;

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Describe an error by its outermost message plus the innermost cause, e.g.
/// "could not save business data to 'x': Permission denied".
pub(crate) fn surface_error(err: &(dyn Error + 'static)) -> String {
    let mut root = err;
    let mut depth = 0;
    while let Some(source) = root.source() {
        root = source;
        depth += 1;
    }
    if depth == 0 {
        err.to_string()
    } else {
        format!("{err}: {root}")
    }
}

/// Detail lines for the selected business. The core contact fields always
/// show (with "N/A" when blank); the rest only when filled in.
pub(crate) fn record_detail_lines(record: &BusinessRecord) -> Vec<Line<'static>> {
    let label_style = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();

    for field in Field::EDITABLE {
        let value = record.get(field).trim();
        let always = matches!(
            field,
            Field::Name | Field::Category | Field::Address | Field::Phone
        );
        if value.is_empty() && !always {
            continue;
        }
        let shown = if value.is_empty() { "N/A" } else { value };
        let label = format!("{}:", field.name());
        lines.push(Line::from(vec![
            Span::styled(format!("{label:<width$}", width = LABEL_WIDTH), label_style),
            Span::raw(shown.to_string()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("ID: {}", record.id()),
        Style::default().fg(Color::DarkGray),
    )));
    lines
}
