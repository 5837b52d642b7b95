//! Inline selector line, used for the department scope above people tables.

use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use crate::theme;

/// `labels` joined on one line, the active one bracketed and highlighted.
/// An out-of-range `active` highlights nothing.
pub fn render_sub_tabs<S: AsRef<str>>(labels: &[S], active: usize) -> Line<'static> {
    let mut spans = Vec::with_capacity(labels.len() * 2);

    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", theme::key_hint()));
        }
        let label = label.as_ref();
        if i == active {
            spans.push(Span::styled(
                format!("[{label}]"),
                theme::tab_active().add_modifier(Modifier::UNDERLINED),
            ));
        } else {
            spans.push(Span::styled(label.to_owned(), theme::tab_inactive()));
        }
    }

    Line::from(spans)
}
