use ratatui::style::{Style, Stylize};

/// Controls of a view that is waiting on the network are drawn dimmed.
pub fn dim_when_busy(is_busy: bool, style: Style) -> Style {
    if is_busy { style.dim().italic() } else { style }
}
