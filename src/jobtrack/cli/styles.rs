use console::Style;
use jobtrack::model::{Status, ThemePreference};
use once_cell::sync::Lazy;

/// Terminal styles for one theme.
pub struct Palette {
    pub applied: Style,
    pub interviewing: Style,
    pub offer: Style,
    pub rejected: Style,
    pub header: Style,
    pub id: Style,
    pub muted: Style,
    pub heading: Style,
    pub emphasis: Style,
    pub code: Style,
}

impl Palette {
    pub fn status(&self, status: Status) -> &Style {
        match status {
            Status::Applied => &self.applied,
            Status::Interviewing => &self.interviewing,
            Status::Offer => &self.offer,
            Status::Rejected => &self.rejected,
        }
    }
}

pub static LIGHT: Lazy<Palette> = Lazy::new(|| Palette {
    applied: Style::new().blue(),
    interviewing: Style::new().yellow(),
    offer: Style::new().green(),
    rejected: Style::new().red(),
    header: Style::new().bold(),
    id: Style::new().color256(61),
    muted: Style::new().color256(244).italic(),
    heading: Style::new().bold().underlined(),
    emphasis: Style::new().bold(),
    code: Style::new().color256(130),
});

pub static DARK: Lazy<Palette> = Lazy::new(|| Palette {
    applied: Style::new().blue().bright(),
    interviewing: Style::new().yellow().bright(),
    offer: Style::new().green().bright(),
    rejected: Style::new().red().bright(),
    header: Style::new().white().bright().bold(),
    id: Style::new().color256(147),
    muted: Style::new().color256(248).italic(),
    heading: Style::new().cyan().bright().bold(),
    emphasis: Style::new().white().bright().bold(),
    code: Style::new().color256(215),
});

pub fn palette(theme: ThemePreference) -> &'static Palette {
    match theme {
        ThemePreference::Light => &*LIGHT,
        ThemePreference::Dark => &*DARK,
    }
}
