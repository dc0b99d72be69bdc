use super::helpers::attach_write_warning;
use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ThemePreference;
use crate::store::{KvBackend, RecordStore};

#[derive(Debug, Clone, Copy)]
pub enum ThemeAction {
    Show,
    Set(ThemePreference),
    Toggle,
}

pub fn run<B: KvBackend>(store: &mut RecordStore<B>, action: ThemeAction) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let theme = match action {
        ThemeAction::Show => {
            let theme = store.theme();
            result.add_message(CmdMessage::info(format!("Theme: {}", theme)));
            theme
        }
        ThemeAction::Set(theme) => {
            let theme = store.set_theme(theme);
            result.add_message(CmdMessage::success(format!("Theme set to {}", theme)));
            theme
        }
        ThemeAction::Toggle => {
            let theme = store.toggle_theme();
            result.add_message(CmdMessage::success(format!("Theme set to {}", theme)));
            theme
        }
    };

    attach_write_warning(store, &mut result);
    Ok(result.with_theme(theme))
}
