use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// A grid frequency (node spacing) value constrained to [0.1, 10.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct GridFrequency(f32);

impl GridFrequency {
    const MIN: f32 = 0.1;
    const MAX: f32 = 10.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for GridFrequency {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// A connection slack multiplier constrained to [0.5, 2.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct ConnectionSlack(f32);

impl ConnectionSlack {
    const MIN: f32 = 0.5;
    const MAX: f32 = 2.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for ConnectionSlack {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// A node obstruction probe radius constrained to [0.05, 5.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct ProbeRadius(f32);

impl ProbeRadius {
    const MIN: f32 = 0.05;
    const MAX: f32 = 5.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for ProbeRadius {
    fn default() -> Self {
        Self::new(0.5)
    }
}

/// An obstruction refresh interval in seconds constrained to [0.1, 60.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct RefreshInterval(f32);

impl RefreshInterval {
    const MIN: f32 = 0.1;
    const MAX: f32 = 60.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for RefreshInterval {
    fn default() -> Self {
        Self::new(2.0)
    }
}

/// A nearest-node cache capacity constrained to [1, 4096]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct CacheCapacity(usize);

impl CacheCapacity {
    const MIN: usize = 1;
    const MAX: usize = 4096;

    pub fn new(value: usize) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for CacheCapacity {
    fn default() -> Self {
        Self::new(64)
    }
}

/// A local nearest-node search radius constrained to [0.5, 50.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct LocalSearchRadius(f32);

impl LocalSearchRadius {
    const MIN: f32 = 0.5;
    const MAX: f32 = 50.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for LocalSearchRadius {
    fn default() -> Self {
        Self::new(3.0)
    }
}

/// An obstacle detection range constrained to [1.0, 50.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct DetectionRange(f32);

impl DetectionRange {
    const MIN: f32 = 1.0;
    const MAX: f32 = 50.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for DetectionRange {
    fn default() -> Self {
        Self::new(5.0)
    }
}

/// A danger range constrained to [0.1, 10.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct DangerRange(f32);

impl DangerRange {
    const MIN: f32 = 0.1;
    const MAX: f32 = 10.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for DangerRange {
    fn default() -> Self {
        Self::new(1.5)
    }
}

/// An agent radius constrained to [0.05, 2.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct AgentRadius(f32);

impl AgentRadius {
    const MIN: f32 = 0.05;
    const MAX: f32 = 2.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for AgentRadius {
    fn default() -> Self {
        Self::new(0.5)
    }
}

/// An interest strength correction step constrained to [0.01, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct StrengthCorrection(f32);

impl StrengthCorrection {
    const MIN: f32 = 0.01;
    const MAX: f32 = 1.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for StrengthCorrection {
    fn default() -> Self {
        Self::new(0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_frequency_clamping() {
        assert_eq!(GridFrequency::new(-1.0).get(), 0.1);
        assert_eq!(GridFrequency::new(0.01).get(), 0.1);
        assert_eq!(GridFrequency::new(1.0).get(), 1.0);
        assert_eq!(GridFrequency::new(100.0).get(), 10.0);
    }

    #[test]
    fn test_cache_capacity_clamping() {
        assert_eq!(CacheCapacity::new(0).get(), 1);
        assert_eq!(CacheCapacity::new(64).get(), 64);
        assert_eq!(CacheCapacity::new(100_000).get(), 4096);
    }

    #[test]
    fn test_detection_range_clamping() {
        assert_eq!(DetectionRange::new(0.0).get(), 1.0);
        assert_eq!(DetectionRange::new(5.0).get(), 5.0);
        assert_eq!(DetectionRange::new(500.0).get(), 50.0);
    }

    #[test]
    fn test_display() {
        let range = DetectionRange::new(5.5);
        assert_eq!(format!("{range}"), "5.5");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(GridFrequency::default().get(), 1.0);
        assert_eq!(DangerRange::default().get(), 1.5);
        assert_eq!(AgentRadius::default().get(), 0.5);
        assert_eq!(StrengthCorrection::default().get(), 0.1);
    }
}
