/// Rescue progress for the current level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HostageTracker {
    total: u32,
    rescued: u32,
}

impl HostageTracker {
    pub fn new(total: u32) -> Self {
        Self { total, rescued: 0 }
    }

    pub fn restore(total: u32, rescued: u32) -> Self {
        Self { total, rescued }
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn rescued(&self) -> u32 {
        self.rescued
    }

    /// Records a rescue and returns whether everyone is now safe.
    pub fn rescue(&mut self) -> bool {
        self.rescued += 1;
        self.all_rescued()
    }

    /// A level without hostages is never "all rescued".
    pub fn all_rescued(&self) -> bool {
        self.total > 0 && self.rescued >= self.total
    }
}
