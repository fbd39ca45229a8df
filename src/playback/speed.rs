use std::time::Duration;

use crate::foundation::error::{MazeError, MazeResult};

/// Playback speed in `[1, 100]`.
///
/// High speeds consume several steps per frame; speeds up to 50 apply one step per tick and
/// wait between ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(into = "u8")]
pub struct Speed(u8);

impl Speed {
    /// Slowest setting.
    pub const MIN: Self = Self(1);
    /// Fastest setting.
    pub const MAX: Self = Self(100);

    /// Validate and wrap a slider value.
    pub fn new(value: u8) -> MazeResult<Self> {
        if !(1..=100).contains(&value) {
            return Err(MazeError::validation(format!(
                "speed must be in [1, 100], got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Raw slider value.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Steps applied per tick.
    pub const fn batch(self) -> usize {
        match self.0 {
            91.. => 50,
            71..=90 => 10,
            51..=70 => 2,
            _ => 1,
        }
    }

    /// Wait before the next tick, if any.
    pub fn delay(self) -> Option<Duration> {
        if self.0 > 50 {
            return None;
        }
        let ms = u64::from(50 - self.0) * 5;
        (ms > 0).then(|| Duration::from_millis(ms))
    }

    /// Human-readable bucket for the slider.
    pub const fn label(self) -> &'static str {
        match self.0 {
            0..33 => "Slow",
            33..66 => "Normal",
            _ => "Fast",
        }
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(50)
    }
}

impl TryFrom<u8> for Speed {
    type Error = MazeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Speed> for u8 {
    fn from(s: Speed) -> Self {
        s.0
    }
}

impl<'de> serde::Deserialize<'de> for Speed {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = u8::deserialize(deserializer)?;
        Self::new(v).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/speed.rs"]
mod tests;
