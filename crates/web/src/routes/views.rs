//! View models shared by several pages.

use malice_core::{DailySummary, SessionState};

/// Identity strip of the page header.
#[derive(Debug, Clone)]
pub struct HeaderView {
    pub name: String,
    pub is_guest: bool,
    pub is_admin: bool,
    pub admin_view: bool,
}

impl HeaderView {
    /// Header for the logged-in identity, `None` when nobody is logged in.
    #[must_use]
    pub fn from_state(state: &SessionState) -> Option<Self> {
        let user = state.current()?;
        Some(Self {
            name: user.name.clone(),
            is_guest: user.is_guest(),
            is_admin: user.role.is_admin(),
            admin_view: state.shows_admin_view(),
        })
    }
}

/// One row of the daily summary table.
#[derive(Debug, Clone)]
pub struct TallyView {
    pub meal: String,
    pub count: usize,
    pub percent: String,
    pub users: String,
}

/// Today's orders grouped by meal.
#[derive(Debug, Clone, Default)]
pub struct SummaryView {
    pub tallies: Vec<TallyView>,
    pub total: usize,
}

impl From<&DailySummary> for SummaryView {
    fn from(summary: &DailySummary) -> Self {
        Self {
            tallies: summary
                .tallies
                .iter()
                .map(|t| TallyView {
                    meal: t.meal.clone(),
                    count: t.count,
                    percent: format!("{:.0}", summary.percentage(t)),
                    users: t.users.join(", "),
                })
                .collect(),
            total: summary.total,
        }
    }
}
