use serde::{Deserialize, Serialize};

/// Hours per day on the activity matrix.
pub const HOURS_PER_DAY: u8 = 24;
/// Weekdays per week on the activity matrix.
pub const DAYS_PER_WEEK: u8 = 7;
/// Number of (hour, weekday) cells.
pub const ACTIVITY_CELL_COUNT: usize = HOURS_PER_DAY as usize * DAYS_PER_WEEK as usize;

/// Intensity of user activity for one hour of one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityCell {
    pub hour: u8,
    pub weekday: u8,
    pub intensity: u64,
}

/// Hour-by-weekday intensity matrix, stored hour-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityMatrix {
    pub cells: Vec<ActivityCell>,
}

impl ActivityMatrix {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, hour: u8, weekday: u8) -> Option<&ActivityCell> {
        self.cells
            .iter()
            .find(|c| c.hour == hour && c.weekday == weekday)
    }

    /// Every (hour, weekday) pair present exactly once and nothing else.
    pub fn is_complete(&self) -> bool {
        if self.cells.len() != ACTIVITY_CELL_COUNT {
            return false;
        }
        let mut seen = [false; ACTIVITY_CELL_COUNT];
        for cell in &self.cells {
            if cell.hour >= HOURS_PER_DAY || cell.weekday >= DAYS_PER_WEEK {
                return false;
            }
            let idx = cell.hour as usize * DAYS_PER_WEEK as usize + cell.weekday as usize;
            if seen[idx] {
                return false;
            }
            seen[idx] = true;
        }
        true
    }

    /// Hour with the highest total intensity across the week.
    pub fn peak_hour(&self) -> Option<u8> {
        (0..HOURS_PER_DAY).max_by_key(|h| {
            self.cells
                .iter()
                .filter(|c| c.hour == *h)
                .map(|c| c.intensity)
                .sum::<u64>()
        })
    }
}
