use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, HighlightSpacing, List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};

use crate::modules::upload::{result_error, UploadView};
use crate::ui::components::UiComponent;
use crate::ui::style::dim_when_busy;
use crate::util::string::StringUtils;

pub fn render_upload(view: &UploadView, area: Rect, buf: &mut Buffer) {
    let notices_height = if view.notices.is_empty() { 0 } else { view.notices.len().min(4) as u16 + 2 };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),               // Intro
            Constraint::Length(3),               // Path input / status
            Constraint::Length(notices_height),  // Rejections
            Constraint::Min(3),                  // Staged files
            Constraint::Min(3),                  // Results
        ])
        .split(area);

    Paragraph::new(vec![
        Line::from("Upload Word documents to add them to your knowledge base.").bold(),
        Line::from("You can then ask questions about them (.docx, .doc, max 10MB each).").fg(Color::Gray),
    ])
    .block(
        Block::bordered()
            .title("Upload Documents")
            .border_type(BorderType::Rounded)
    )
    .wrap(Wrap { trim: true })
    .render(layout[0], buf);

    if view.is_uploading() {
        let message = format!(
            "Uploading {}...",
            StringUtils::maybe_pluralize_count(view.staged().len(), ("file", "files"))
        );
        UiComponent::status(&message, Color::Blue).render(layout[1], buf);
    } else {
        Paragraph::new(format!("> {}", view.get_input()))
            .block(
                Block::bordered()
                    .title("File path(s)")
                    .border_type(BorderType::Rounded)
            )
            .fg(Color::Yellow)
            .render(layout[1], buf);
    }

    if !view.notices.is_empty() {
        let items: Vec<ListItem> = view.notices.iter()
            .take(4)
            .map(|notice| ListItem::new(format!("✗ {}", notice)).fg(Color::Red))
            .collect();
        Widget::render(
            List::new(items)
                .block(Block::bordered().title("Not added").border_type(BorderType::Rounded)),
            layout[2],
            buf,
        );
    }

    render_staged(view, layout[3], buf);
    render_results(view, layout[4], buf);
}

fn render_staged(view: &UploadView, area: Rect, buf: &mut Buffer) {
    let count = view.staged().len();
    if count == 0 {
        UiComponent::empty_message("No files selected yet", "Selected Files", Some(Color::DarkGray))
            .render(area, buf);
        return;
    }

    let title = if view.is_uploading() {
        format!("Selected Files ({})", count)
    } else {
        format!(
            "Selected Files ({}) • Enter: Upload {}",
            count,
            StringUtils::maybe_pluralize_count(count, ("File", "Files"))
        )
    };

    let items: Vec<ListItem> = view.staged().iter()
        .map(|file| {
            ListItem::new(Line::from(vec![
                Span::raw(file.name.clone()),
                Span::styled(format!("  {}", StringUtils::kilobytes(file.size)), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    // The list scrolls to keep the selected file on screen
    let mut state = ListState::default()
        .with_selected(view.selected.filter(|_| !view.is_uploading()));

    let list = List::new(items)
        .block(Block::bordered().title(title).border_type(BorderType::Rounded))
        .style(dim_when_busy(view.is_uploading(), Style::default().fg(Color::White)))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ")
        .highlight_spacing(HighlightSpacing::Always);
    StatefulWidget::render(list, area, buf, &mut state);
}

fn render_results(view: &UploadView, area: Rect, buf: &mut Buffer) {
    if view.results().is_empty() {
        Block::bordered()
            .title("Upload Results")
            .border_type(BorderType::Rounded)
            .fg(Color::DarkGray)
            .render(area, buf);
        return;
    }

    let mut title = format!(
        "Upload Results • {} successful, {} failed",
        view.success_count(),
        view.failure_count()
    );
    if view.can_upload_more() {
        title.push_str(" • Ctrl+R: Upload more • Esc: Go to chat");
    }

    let items: Vec<ListItem> = view.ordered_results().into_iter()
        .map(|result| {
            if result.success {
                ListItem::new(vec![
                    Line::from(format!("✓ {}", result.filename)).fg(Color::Green).bold(),
                    Line::from(format!("    Processed successfully ({} chunks)", result.chunks_count)).fg(Color::Green),
                ])
            } else {
                ListItem::new(vec![
                    Line::from(format!("✗ {}", result.filename)).fg(Color::Red).bold(),
                    Line::from(format!("    {}", result_error(result))).fg(Color::Red),
                ])
            }
        })
        .collect();

    let mut state = ListState::default().with_offset(view.results_scroll);
    StatefulWidget::render(
        List::new(items).block(Block::bordered().title(title).border_type(BorderType::Rounded)),
        area,
        buf,
        &mut state,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::view_handler::ViewHandler;
    use crate::util::api::{BatchUploadResponse, FileUploadResult};
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_results_partitioned() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.docx");
        std::fs::write(&path, b"PK").unwrap();

        let mut view = UploadView::new();
        view.add_paths(&path.display().to_string());
        view.begin_upload();
        view.finish_upload(Ok(BatchUploadResponse {
            success: true,
            message: String::new(),
            total_files: 2,
            successful_uploads: 1,
            failed_uploads: 1,
            total_chunks: 5,
            results: vec![
                FileUploadResult {
                    filename: "a.docx".to_string(),
                    success: true,
                    error: None,
                    document_id: Some("d1".to_string()),
                    chunks_count: 5,
                },
                FileUploadResult::failed("b.docx", "Unsupported content"),
            ],
        }));

        let area = Rect::new(0, 0, 120, 30);
        let mut buf = Buffer::empty(area);
        render_upload(&view, area, &mut buf);
        let screen = buffer_text(&buf);

        assert!(screen.contains("1 successful, 1 failed"));
        assert!(screen.contains("Processed successfully (5 chunks)"));
        assert!(screen.contains("Unsupported content"));
    }

    fn staged_view(dir: &std::path::Path, count: usize) -> UploadView {
        let mut view = UploadView::new();
        for i in 0..count {
            let path = dir.join(format!("file{:02}.docx", i));
            std::fs::write(&path, b"PK").unwrap();
            view.add_paths(&path.display().to_string());
        }
        view
    }

    #[test]
    fn test_failure_visible_among_many_successes() {
        let dir = tempfile::tempdir().unwrap();
        let mut view = staged_view(dir.path(), 1);
        view.begin_upload();

        let mut results: Vec<FileUploadResult> = (0..8)
            .map(|i| FileUploadResult {
                filename: format!("ok{}.docx", i),
                success: true,
                error: None,
                document_id: None,
                chunks_count: 2,
            })
            .collect();
        results.push(FileUploadResult::failed("bad.docx", "LASTFAILURE"));
        view.finish_upload(Ok(BatchUploadResponse {
            success: true,
            message: String::new(),
            total_files: 9,
            successful_uploads: 8,
            failed_uploads: 1,
            total_chunks: 16,
            results,
        }));

        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        render_upload(&view, area, &mut buf);
        let screen = buffer_text(&buf);

        assert!(screen.contains("8 successful, 1 failed"));
        assert!(screen.contains("LASTFAILURE"));

        // Scrolling to the end leaves only the last success
        for _ in 0..2 {
            view.handle_key(KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE));
        }
        assert_eq!(view.results_scroll, 8);
        let mut buf = Buffer::empty(area);
        render_upload(&view, area, &mut buf);
        let screen = buffer_text(&buf);
        assert!(screen.contains("ok7.docx"));
        assert!(!screen.contains("LASTFAILURE"));
    }

    #[test]
    fn test_selected_file_scrolled_into_view() {
        let dir = tempfile::tempdir().unwrap();
        let mut view = staged_view(dir.path(), 30);

        // Up from no selection picks the last file
        view.handle_key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE));
        assert_eq!(view.selected, Some(29));

        let area = Rect::new(0, 0, 100, 24);
        let mut buf = Buffer::empty(area);
        render_upload(&view, area, &mut buf);
        let screen = buffer_text(&buf);

        assert!(screen.contains("▶ file29.docx"));
        assert!(!screen.contains("file00.docx"));
    }

    #[test]
    fn test_uploading_banner() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.docx");
        std::fs::write(&path, b"PK").unwrap();

        let mut view = UploadView::new();
        view.add_paths(&path.display().to_string());
        view.begin_upload();

        let area = Rect::new(0, 0, 100, 24);
        let mut buf = Buffer::empty(area);
        render_upload(&view, area, &mut buf);

        assert!(buffer_text(&buf).contains("Uploading 1 file..."));
    }
}
