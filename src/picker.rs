/// Bounded number wheel used to dial in hours, minutes and seconds.
/// Stepping past either end wraps around to the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrappingPicker {
    value: u32,
    min: u32,
    max: u32,
}

impl WrappingPicker {
    pub fn new(min: u32, max: u32) -> Self {
        Self {
            value: min,
            min,
            max: max.max(min),
        }
    }

    pub fn hours() -> Self {
        Self::new(0, 99)
    }

    pub fn minutes() -> Self {
        Self::new(0, 59)
    }

    pub fn seconds() -> Self {
        Self::new(0, 59)
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Out-of-range values are clamped.
    pub fn set(&mut self, value: u32) {
        self.value = value.clamp(self.min, self.max);
    }

    pub fn increment(&mut self) {
        self.value = self.next_value();
    }

    pub fn decrement(&mut self) {
        self.value = self.prev_value();
    }

    pub fn prev_value(&self) -> u32 {
        if self.value > self.min {
            self.value - 1
        } else {
            self.max
        }
    }

    pub fn next_value(&self) -> u32 {
        if self.value < self.max {
            self.value + 1
        } else {
            self.min
        }
    }

    pub fn formatted(&self) -> String {
        format!("{:02}", self.value)
    }
}
