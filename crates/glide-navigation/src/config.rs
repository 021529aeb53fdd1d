use glide_core::Color;
use glide_core::animation::{AnimationSpec, Easing};
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::host::ShadowStyle;

/// When a released edge swipe pops the screen instead of springing back.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommitRule {
    /// Fraction of the dragged view's width past which the pop commits.
    pub distance_fraction: f32,
    /// Rightward velocity (points per second) above which the pop commits.
    pub velocity: f32,
}

impl Default for CommitRule {
    fn default() -> Self {
        Self {
            distance_fraction: 0.5,
            velocity: 1000.0,
        }
    }
}

impl CommitRule {
    pub fn should_commit(&self, width: f32, translation_x: f32, velocity_x: f32) -> bool {
        translation_x > width * self.distance_fraction || velocity_x > self.velocity
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub animation_ms: u64,
    pub easing: Easing,
    /// How far the revealed screen sits to the left, as a fraction of width.
    pub slide_fraction: f32,
    pub skin_color: Color,
    pub shadow: ShadowStyle,
    pub commit: CommitRule,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            animation_ms: 300,
            easing: Easing::EaseOut,
            slide_fraction: 0.25,
            skin_color: Color::BLACK.with_opacity(0.2),
            shadow: ShadowStyle::default(),
            commit: CommitRule::default(),
        }
    }
}

impl NavConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn animation(&self) -> AnimationSpec {
        AnimationSpec::tween(Duration::from_millis(self.animation_ms), self.easing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_rule_distance_threshold() {
        let rule = CommitRule::default();
        let w = 320.0;
        assert!(!rule.should_commit(w, w / 2.0 - 1.0, 0.0));
        assert!(!rule.should_commit(w, w / 2.0, 0.0));
        assert!(rule.should_commit(w, w / 2.0 + 1.0, 0.0));
    }

    #[test]
    fn commit_rule_velocity_threshold() {
        let rule = CommitRule::default();
        assert!(rule.should_commit(320.0, 10.0, 1000.5));
        assert!(!rule.should_commit(320.0, 10.0, 1000.0));
        // leftward flick never commits on velocity
        assert!(!rule.should_commit(320.0, 10.0, -5000.0));
    }

    #[test]
    fn custom_commit_rule() {
        let rule = CommitRule {
            distance_fraction: 0.3,
            velocity: 500.0,
        };
        assert!(rule.should_commit(100.0, 31.0, 0.0));
        assert!(rule.should_commit(100.0, 0.0, 600.0));
    }

    #[test]
    fn defaults() {
        let c = NavConfig::default();
        assert_eq!(c.animation().duration, Duration::from_millis(300));
        assert_eq!(c.skin_color, Color(0, 0, 0, 51));
        assert_eq!(c.shadow.radius, 10.0);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let c = NavConfig::from_json(r#"{ "animation_ms": 450, "commit": { "distance_fraction": 0.4, "velocity": 800.0 } }"#)
            .unwrap();
        assert_eq!(c.animation_ms, 450);
        assert_eq!(c.commit.velocity, 800.0);
        assert_eq!(c.slide_fraction, 0.25);
        assert_eq!(c.easing, Easing::EaseOut);
    }

    #[test]
    fn json_roundtrip_keeps_easing() {
        let c = NavConfig {
            easing: Easing::Linear,
            ..NavConfig::default()
        };
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(NavConfig::from_json(&json).unwrap(), c);
    }
}
