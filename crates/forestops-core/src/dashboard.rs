use crate::role::Route;

pub const WORK_ORDER_OVERVIEW: &[(&str, u64)] =
    &[("Pending", 20), ("In Progress", 45), ("Completed", 35)];

pub const TEAM_STATUS: &[(&str, u64)] = &[("Available", 40), ("On Task", 60)];

pub const NOTIFICATIONS: &[&str] = &[
    "New work order assigned",
    "Team meeting at 2 PM",
    "Weather alert: Heavy rain expected",
];

pub const AI_INSIGHT: &str = "Based on current data, we predict a 20% increase in work orders \
next month. Consider allocating additional resources.";

pub const WEATHER_FORECAST: &str =
    "Today: Partly cloudy, High: 75°F, Low: 60°F\nTomorrow: Sunny, High: 80°F, Low: 62°F";

/// Shortcuts offered on the dashboard, in display order.
pub const QUICK_LINKS: &[Route] = &[
    Route::WorkOrders,
    Route::InspectionOverview,
    Route::TeamAssignment,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    unread: usize,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            unread: NOTIFICATIONS.len(),
        }
    }
}

impl Dashboard {
    pub fn unread(&self) -> usize {
        self.unread
    }

    /// Notification text; reading it clears the badge.
    pub fn read_notifications(&mut self) -> String {
        self.unread = 0;
        let lines: Vec<String> = NOTIFICATIONS
            .iter()
            .enumerate()
            .map(|(i, n)| format!("{}. {n}", i + 1))
            .collect();
        format!(
            "You have {} new notifications:\n\n{}",
            NOTIFICATIONS.len(),
            lines.join("\n")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_clears_badge() {
        let mut d = Dashboard::default();
        assert_eq!(d.unread(), 3);
        let text = d.read_notifications();
        assert!(text.starts_with("You have 3 new notifications"));
        assert!(text.contains("2. Team meeting at 2 PM"));
        assert_eq!(d.unread(), 0);
    }
}
