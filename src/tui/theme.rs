//! Theme values: every cosmetic choice that distinguishes the variants.
//!
//! Pure data. A `Theme` is selected once at startup and passed by
//! reference into the update and render layers; nothing here is mutable.
//!
//! Style semantics, shared by all themes:
//! - Title: ASCII art and label
//! - Animation: the cycling glyph inside the art
//! - Filled / Empty / Marker: progress bar cells
//! - Status, Time, Hint: text under the bar

use ratatui::style::{Color, Modifier, Style};

/// Progress below this shows the first status message.
pub const STATUS_EARLY_BELOW: u64 = 33;

/// Progress below this (and not early) shows the second status message.
pub const STATUS_MIDDLE_BELOW: u64 = 66;

/// Token in art lines replaced by the current animation glyph.
pub const FRAME_TOKEN: &str = "{frame}";

// ============================================================================
// TYPES
// ============================================================================

/// Glyphs used to draw progress bar cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarGlyphs {
    /// Cells below the progress boundary.
    pub filled: &'static str,
    /// Cells above the progress boundary.
    pub empty: &'static str,
    /// The boundary cell itself, if the theme marks it.
    pub marker: Option<&'static str>,
}

/// Styles applied by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub title: Style,
    pub animation: Style,
    pub percent: Style,
    pub border: Style,
    pub filled: Style,
    pub empty: Style,
    pub marker: Style,
    pub status: Style,
    pub time: Style,
    pub hint: Style,
}

/// A complete cosmetic variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Short name used on the command line and in summaries.
    pub name: &'static str,
    /// Shown alone until the first terminal size report.
    pub placeholder: &'static str,
    /// Label used when none is given on the command line.
    pub default_label: &'static str,
    /// ASCII art lines; `{frame}` is replaced by the animation glyph.
    pub art: &'static [&'static str],
    /// Animation sequence, advanced one step per tick. Never empty.
    pub frames: &'static [&'static str],
    pub bar: BarGlyphs,
    /// Messages for early, middle and late progress.
    pub status: Option<[&'static str; 3]>,
    /// Prefix for the elapsed/total line.
    pub time_prefix: &'static str,
    /// Cancellation hint at the bottom.
    pub quit_hint: &'static str,
    pub palette: Palette,
}

impl Theme {
    /// Status message for a progress value, if the theme has any.
    pub fn status_for(&self, percent: u64) -> Option<&'static str> {
        let [early, middle, late] = self.status?;
        Some(if percent < STATUS_EARLY_BELOW {
            early
        } else if percent < STATUS_MIDDLE_BELOW {
            middle
        } else {
            late
        })
    }

    /// Animation glyph for a frame index, wrapping out-of-range indices.
    pub fn frame(&self, index: usize) -> &'static str {
        self.frames[index % self.frames.len()]
    }
}

/// Selector for the built-in themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    Plain,
    Tea,
    #[default]
    Coffee,
}

impl ThemeKind {
    /// The theme value for this variant.
    pub fn theme(self) -> &'static Theme {
        match self {
            ThemeKind::Plain => &PLAIN,
            ThemeKind::Tea => &TEA,
            ThemeKind::Coffee => &COFFEE,
        }
    }
}

// ============================================================================
// PLAIN
// ============================================================================

pub static PLAIN: Theme = Theme {
    name: "plain",
    placeholder: "Initializing...",
    default_label: "Timer",
    art: &["{frame}"],
    frames: &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
    bar: BarGlyphs {
        filled: "█",
        empty: "░",
        marker: None,
    },
    status: None,
    time_prefix: "Time",
    quit_hint: "Press 'q' to quit",
    palette: Palette {
        title: Style::new().add_modifier(Modifier::BOLD),
        animation: Style::new().fg(Color::Cyan),
        percent: Style::new().add_modifier(Modifier::BOLD),
        border: Style::new().fg(Color::DarkGray),
        filled: Style::new().fg(Color::Cyan),
        empty: Style::new().fg(Color::DarkGray),
        marker: Style::new().fg(Color::Cyan),
        status: Style::new(),
        time: Style::new(),
        hint: Style::new().fg(Color::DarkGray),
    },
};

// ============================================================================
// TEA
// ============================================================================

const LEAF: Color = Color::Rgb(0x5B, 0x8C, 0x5A);
const MATCHA: Color = Color::Rgb(0xA8, 0xC6, 0x86);
const STEEPED: Color = Color::Rgb(0xB5, 0x65, 0x1D);
const PORCELAIN: Color = Color::Rgb(0xEE, 0xE8, 0xD5);
const VAPOR: Color = Color::Rgb(0xB0, 0xB0, 0xB0);

pub static TEA: Theme = Theme {
    name: "tea",
    placeholder: "Warming the pot...",
    default_label: "Tea Time",
    art: &[
        "  {frame} {frame} {frame}",
        "   (  (  (",
        " _________",
        "|         |__",
        "|  Steep  |  |",
        "|         |__|",
        " \\_______/",
    ],
    frames: &["~", "≈", "≋", "≈"],
    bar: BarGlyphs {
        filled: "■",
        empty: "□",
        marker: Some("●"),
    },
    status: Some(["Boiling water...", "Steeping...", "Nearly steeped!"]),
    time_prefix: "Steep time",
    quit_hint: "Press 'q' to abandon your tea",
    palette: Palette {
        title: Style::new().fg(MATCHA).add_modifier(Modifier::BOLD),
        animation: Style::new().fg(VAPOR),
        percent: Style::new().fg(PORCELAIN),
        border: Style::new().fg(LEAF),
        filled: Style::new().fg(STEEPED),
        empty: Style::new().fg(PORCELAIN),
        marker: Style::new().fg(LEAF),
        status: Style::new().fg(PORCELAIN),
        time: Style::new().fg(PORCELAIN),
        hint: Style::new().fg(PORCELAIN),
    },
};

// ============================================================================
// COFFEE
// ============================================================================

const DARK_ROAST: Color = Color::Rgb(0x8B, 0x45, 0x13);
const CREAM: Color = Color::Rgb(0xC4, 0xA6, 0x9D);
const BEAN: Color = Color::Rgb(0x6F, 0x4E, 0x37);
const STEAM: Color = Color::Rgb(0x9B, 0x9B, 0x9B);
const LIGHT_ROAST: Color = Color::Rgb(0xD2, 0x69, 0x1E);
const FOAM: Color = Color::Rgb(0xE6, 0xBE, 0x8A);

pub static COFFEE: Theme = Theme {
    name: "coffee",
    placeholder: "Brewing your coffee...",
    default_label: "Coffee Brewing",
    art: &[
        " {frame} {frame} {frame}",
        "  )  )  )",
        " (  (  (",
        ".-========-.",
        "| ________ |",
        "| Break!!  |",
        "| -------- |",
        "'=========='",
    ],
    frames: &["░", "▒", "▓", "▒", "░"],
    bar: BarGlyphs {
        filled: "♨",
        empty: "○",
        marker: Some("☕"),
    },
    status: Some(["Grinding beans...", "Brewing...", "Almost ready!"]),
    time_prefix: "Brew time",
    quit_hint: "Press 'q' to cancel your coffee break",
    palette: Palette {
        title: Style::new().fg(FOAM).add_modifier(Modifier::BOLD),
        animation: Style::new().fg(STEAM),
        percent: Style::new(),
        border: Style::new().fg(DARK_ROAST),
        filled: Style::new().fg(BEAN),
        empty: Style::new().fg(CREAM),
        marker: Style::new().fg(LIGHT_ROAST),
        status: Style::new().fg(CREAM),
        time: Style::new().fg(CREAM),
        hint: Style::new().fg(CREAM),
    },
};

// ============================================================================
// TESTS
// ============================================================================
