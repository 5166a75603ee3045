//! Top-level page selection.

use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Screens reachable from the navigation bar.
pub enum Page {
    /// Summary.
    #[default]
    Dashboard,
    /// Body weight.
    Weight,
    /// Workout sets.
    Workouts,
    /// Daily habits.
    Habits,
    /// Progress photos.
    Photos,
}

impl Page {
    /// Navigation order.
    pub const ALL: [Page; 5] = [
        Page::Dashboard,
        Page::Weight,
        Page::Workouts,
        Page::Habits,
        Page::Photos,
    ];

    /// Resolves a page id; unknown ids land on the dashboard.
    pub fn from_id(id: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|page| page.id() == id.trim())
            .unwrap_or_default()
    }

    /// Stable id.
    pub fn id(self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Weight => "weight",
            Page::Workouts => "workouts",
            Page::Habits => "habits",
            Page::Photos => "photos",
        }
    }

    /// Navigation label.
    pub fn label(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Weight => "Peso",
            Page::Workouts => "Entrenamientos",
            Page::Habits => "Hábitos",
            Page::Photos => "Fotos",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
