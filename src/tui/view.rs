//! Pure rendering: map TimerState to a styled text block.
//!
//! `compose()` builds the whole display as a ratatui `Text` (state in,
//! text out). `render()` only places that block in the middle of the
//! frame; the only effect is Frame::render_widget().

use std::time::Duration;

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::state::TimerState;
use super::theme::{Theme, FRAME_TOKEN};

/// The bar is never narrower than this, however small the terminal.
pub const MIN_BAR_WIDTH: usize = 10;

/// Columns taken off half the terminal width when sizing the bar.
const BAR_MARGIN: usize = 10;

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the timer into the terminal frame, centred.
pub fn render(state: &TimerState, theme: &Theme, frame: &mut Frame) {
    let text = compose(state, theme);
    let area = center_vertically(frame.area(), text.height());
    frame.render_widget(Paragraph::new(text).centered(), area);
}

fn center_vertically(area: Rect, height: usize) -> Rect {
    let height = u16::try_from(height).unwrap_or(u16::MAX);
    let [middle] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    middle
}

/// Compose the full display for the current state.
///
/// Before the first size report this is the theme's placeholder alone.
pub fn compose(state: &TimerState, theme: &Theme) -> Text<'static> {
    if !state.ready {
        return Text::from(Line::from(theme.placeholder));
    }

    let palette = &theme.palette;
    let percent = state.progress_percent();

    let mut lines = art_lines(theme, state.frame);
    lines.push(Line::default());
    lines.push(Line::styled(state.label().to_string(), palette.title));
    lines.push(Line::default());

    lines.push(Line::styled(format!("{}%", percent), palette.percent));
    lines.extend(bar_lines(theme, bar_width(state.width), percent));
    lines.push(Line::default());

    if let Some(status) = theme.status_for(percent) {
        lines.push(Line::styled(status, palette.status));
    }
    lines.push(Line::styled(
        format!(
            "{}: {} / {}",
            theme.time_prefix,
            format_clock(state.elapsed),
            format_clock(state.total())
        ),
        palette.time,
    ));
    lines.push(Line::default());

    lines.push(Line::styled(theme.quit_hint, palette.hint));

    Text::from(lines)
}

// ============================================================================
// ART
// ============================================================================

/// Art lines with the animation glyph substituted, right-padded to a
/// common width so centring keeps the picture's shape.
fn art_lines(theme: &Theme, frame: usize) -> Vec<Line<'static>> {
    let glyph = theme.frame(frame);

    let mut lines: Vec<Line<'static>> = theme
        .art
        .iter()
        .map(|&template| {
            let mut spans = Vec::new();
            for (i, piece) in template.split(FRAME_TOKEN).enumerate() {
                if i > 0 {
                    spans.push(Span::styled(glyph, theme.palette.animation));
                }
                if !piece.is_empty() {
                    spans.push(Span::styled(piece, theme.palette.title));
                }
            }
            Line::from(spans)
        })
        .collect();

    let widest = lines.iter().map(Line::width).max().unwrap_or(0);
    for line in &mut lines {
        let pad = widest - line.width();
        if pad > 0 {
            line.push_span(Span::raw(" ".repeat(pad)));
        }
    }

    lines
}

// ============================================================================
// PROGRESS BAR
// ============================================================================

/// Bar width for a terminal width: half the screen minus a margin,
/// floored at [`MIN_BAR_WIDTH`].
pub fn bar_width(terminal_width: u16) -> usize {
    (usize::from(terminal_width) / 2)
        .saturating_sub(BAR_MARGIN)
        .max(MIN_BAR_WIDTH)
}

/// `round(width * percent / 100)`, never more than `width`.
pub fn filled_cells(width: usize, percent: u64) -> usize {
    let width_u64 = u64::try_from(width).unwrap_or(u64::MAX);
    let cells = width_u64.saturating_mul(percent).saturating_add(50) / 100;
    usize::try_from(cells).unwrap_or(usize::MAX).min(width)
}

/// Framed bar: top rule, cells, bottom rule.
fn bar_lines(theme: &Theme, width: usize, percent: u64) -> [Line<'static>; 3] {
    let palette = &theme.palette;
    let rule = "━".repeat(width + 2);

    let filled = filled_cells(width, percent);
    let mut empty = width - filled;

    let mut cells = vec![Span::styled("│ ", palette.border)];
    if filled > 0 {
        cells.push(Span::styled(theme.bar.filled.repeat(filled), palette.filled));
    }
    if empty > 0 {
        if let Some(marker) = theme.bar.marker {
            cells.push(Span::styled(marker, palette.marker));
            empty -= 1;
        }
    }
    if empty > 0 {
        cells.push(Span::styled(theme.bar.empty.repeat(empty), palette.empty));
    }
    cells.push(Span::styled(" │", palette.border));

    [
        Line::styled(format!("╭{}╮", rule), palette.border),
        Line::from(cells),
        Line::styled(format!("╰{}╯", rule), palette.border),
    ]
}

// ============================================================================
// TIME
// ============================================================================

/// Whole seconds, e.g. `0s`, `45s`, `1m 30s`.
pub fn format_clock(duration: Duration) -> String {
    humantime::format_duration(Duration::from_secs(duration.as_secs())).to_string()
}

// ============================================================================
// TESTS
// ============================================================================
