use ratatui::{
    prelude::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::util::api::Source;
use crate::util::string::StringUtils;

use super::UiComponent;

/// Snippets longer than this are cut with an ellipsis.
const MAX_SNIPPET_CHARS: usize = 280;

impl UiComponent {
    /// Lines for one cited source, indented to sit under an answer.
    pub fn source_card(index: usize, source: &Source) -> Vec<Line<'static>> {
        let header = Line::from(vec![
            Span::raw("    "),
            Span::styled(
                format!("Source {}", index + 1),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  Score: {}", StringUtils::percent(source.score)),
                Style::default().fg(Color::DarkGray),
            ),
        ]);

        let snippet = Line::from(vec![
            Span::raw("      "),
            Span::styled(snippet(&source.content), Style::default().fg(Color::Gray)),
        ]);

        let chunk = match source.chunk_index {
            Some(chunk) => format!("Chunk {}", chunk),
            None => "Chunk n/a".to_string(),
        };
        let mut footer = vec![
            Span::raw("      "),
            Span::styled(chunk, Style::default().fg(Color::DarkGray)),
        ];
        if let Some(document_id) = &source.document_id {
            footer.push(Span::styled(
                format!(" · {}", document_id),
                Style::default().fg(Color::DarkGray),
            ));
        }

        vec![header, snippet, Line::from(footer)]
    }
}

fn snippet(content: &str) -> String {
    let flat = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= MAX_SNIPPET_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(MAX_SNIPPET_CHARS).collect();
    format!("{}…", cut.trim_end())
}
