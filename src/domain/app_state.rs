//! Shared presentation state with explicit change notification.
//!
//! Holds the colour theme and whether an analysed upload is available.
//! Components receive the state by reference and register listeners instead
//! of polling.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}' (expected light or dark)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    Theme(Theme),
    UploadPresence(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StateChange)>;

#[derive(Default)]
pub struct AppState {
    theme: Theme,
    has_upload: bool,
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("theme", &self.theme)
            .field("has_upload", &self.has_upload)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl AppState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn has_upload(&self) -> bool {
        self.has_upload
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&StateChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if self.theme != theme {
            self.theme = theme;
            self.notify(StateChange::Theme(theme));
        }
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.set_theme(self.theme.toggled());
        self.theme
    }

    pub fn set_has_upload(&mut self, present: bool) {
        if self.has_upload != present {
            self.has_upload = present;
            self.notify(StateChange::UploadPresence(present));
        }
    }

    fn notify(&mut self, change: StateChange) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&change);
        }
    }
}
