use crate::domain::settings::{Language, SettingsPatch, Theme, UserSettings};
use tokio::sync::watch;
use tracing::{debug, info};

/// Panel visibility plus the user's preferences. Theme and language live
/// only inside `settings`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub settings: UserSettings,
    pub is_settings_open: bool,
    pub is_mobile_menu_open: bool,
}

impl UiState {
    pub fn theme(&self) -> Theme {
        self.settings.theme
    }

    pub fn language(&self) -> Language {
        self.settings.language
    }

    pub fn reduce(mut self, action: UiAction) -> Self {
        match action {
            UiAction::ToggleSettings => self.is_settings_open = !self.is_settings_open,
            UiAction::ToggleMobileMenu => self.is_mobile_menu_open = !self.is_mobile_menu_open,
            UiAction::SetTheme(theme) => self.settings.theme = theme,
            UiAction::SetLanguage(language) => self.settings.language = language,
            UiAction::UpdateSettings(patch) => self.settings = self.settings.merged(patch),
        }
        self
    }
}

#[derive(Debug, Clone)]
pub enum UiAction {
    ToggleSettings,
    ToggleMobileMenu,
    SetTheme(Theme),
    SetLanguage(Language),
    UpdateSettings(SettingsPatch),
}

pub struct UiStore {
    state: watch::Sender<UiState>,
}

impl UiStore {
    pub fn new(settings: UserSettings) -> Self {
        let (state, _) = watch::channel(UiState {
            settings,
            ..Default::default()
        });
        Self { state }
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> UiState {
        self.state.borrow().clone()
    }

    fn dispatch(&self, action: UiAction) {
        debug!("UiStore: {:?}", action);
        self.state.send_modify(|state| {
            let current = std::mem::take(state);
            *state = current.reduce(action);
        });
    }

    pub fn toggle_settings(&self) {
        self.dispatch(UiAction::ToggleSettings);
    }

    pub fn toggle_mobile_menu(&self) {
        self.dispatch(UiAction::ToggleMobileMenu);
    }

    pub fn set_theme(&self, theme: Theme) {
        info!("UiStore: theme set to {}", theme);
        self.dispatch(UiAction::SetTheme(theme));
    }

    pub fn set_language(&self, language: Language) {
        info!("UiStore: language set to {}", language);
        self.dispatch(UiAction::SetLanguage(language));
    }

    pub fn update_settings(&self, patch: SettingsPatch) {
        self.dispatch(UiAction::UpdateSettings(patch));
    }
}

impl Default for UiStore {
    fn default() -> Self {
        Self::new(UserSettings::default())
    }
}
