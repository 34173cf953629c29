//! Tunables for the aquarium layers. Every field has a default, so a config
//! JSON only needs the keys it overrides.

use serde::{Deserialize, Serialize};

use crate::error::{AquariumError, AquariumResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AquariumConfig {
    /// Sprites kept alive at once.
    pub target_fish_count: usize,
    /// Refill only once the seed buffer has this many seeds or fewer.
    pub buffer_refill_threshold: usize,
    /// A page shorter than this ends the feed and wraps back to page 1.
    pub page_size: usize,
    pub retry_delay_ms: u32,
    /// Wall-clock pacing for admitting new sprites.
    pub add_fish_interval_ms: u32,
    /// Screen pixels per bitmap cell at scale 1.0.
    pub base_pixel_size: f64,
    /// Sprites start this far (at most) past the left edge.
    pub max_spawn_offset: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    /// Per-frame probability of a new bubble.
    pub bubble_spawn_chance: f64,
    /// Thumbnail pixels per bitmap cell at scale 1.0.
    pub thumbnail_pixel_factor: f64,
    pub fishes_endpoint: String,
}

impl Default for AquariumConfig {
    fn default() -> Self {
        Self {
            target_fish_count: 50,
            buffer_refill_threshold: 10,
            page_size: 100,
            retry_delay_ms: 5000,
            add_fish_interval_ms: 1000,
            base_pixel_size: 4.0,
            max_spawn_offset: 500.0,
            min_speed: 0.1,
            max_speed: 0.6,
            bubble_spawn_chance: 0.1,
            thumbnail_pixel_factor: 2.0,
            fishes_endpoint: "/fishes".to_string(),
        }
    }
}

impl AquariumConfig {
    pub fn from_json(raw: &str) -> AquariumResult<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AquariumResult<()> {
        if self.page_size == 0 {
            return Err(AquariumError::Config("page_size must be positive".into()));
        }
        if !(self.min_speed < self.max_speed) {
            return Err(AquariumError::Config(format!(
                "min_speed {} must be below max_speed {}",
                self.min_speed, self.max_speed
            )));
        }
        if self.base_pixel_size <= 0.0 || self.thumbnail_pixel_factor <= 0.0 {
            return Err(AquariumError::Config("pixel sizes must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.bubble_spawn_chance) {
            return Err(AquariumError::Config(
                "bubble_spawn_chance must be within 0..=1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_live_site() {
        let c = AquariumConfig::default();
        assert_eq!(c.target_fish_count, 50);
        assert_eq!(c.buffer_refill_threshold, 10);
        assert_eq!(c.page_size, 100);
        assert_eq!(c.retry_delay_ms, 5000);
        assert_eq!(c.add_fish_interval_ms, 1000);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_overrides() {
        let c = AquariumConfig::from_json(r#"{"target_fish_count": 5, "retry_delay_ms": 10}"#)
            .expect("valid config");
        assert_eq!(c.target_fish_count, 5);
        assert_eq!(c.retry_delay_ms, 10);
        assert_eq!(c.page_size, 100);
    }

    #[test]
    fn invalid_values_rejected() {
        assert!(matches!(
            AquariumConfig::from_json(r#"{"page_size": 0}"#),
            Err(AquariumError::Config(_))
        ));
        assert!(matches!(
            AquariumConfig::from_json(r#"{"min_speed": 1.0, "max_speed": 0.5}"#),
            Err(AquariumError::Config(_))
        ));
        assert!(matches!(
            AquariumConfig::from_json("not json"),
            Err(AquariumError::Decode(_))
        ));
    }
}
