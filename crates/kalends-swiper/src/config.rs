#![forbid(unsafe_code)]

//! Widget configuration.
//!
//! # Environment Variables
//!
//! | Variable | Values | Effect |
//! |----------|--------|--------|
//! | `KALENDS_VIEW_TYPE` | `month`, `week` | Initial granularity |
//! | `KALENDS_SWIPE_VELOCITY_MS` | ms, `off` | Swipe time window (unlimited when unset) |
//! | `KALENDS_SWIPE_THRESHOLD_PX` | px | Swipe distance threshold |
//! | `KALENDS_DOUBLETAP_VELOCITY_MS` | ms | Double-tap window |

use std::collections::BTreeMap;

use kalends_core::GestureConfig;
use kalends_core::gesture::ENV_SWIPE_VELOCITY;

use crate::cursor::ViewType;

/// Environment variable selecting the initial view type.
pub const ENV_VIEW_TYPE: &str = "KALENDS_VIEW_TYPE";

/// Gesture configuration the widget installs: any swipe duration counts.
#[must_use]
pub fn widget_gesture_config() -> GestureConfig {
    GestureConfig::default().without_swipe_window()
}

/// Configuration of one calendar widget.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CalendarConfig {
    /// Initial selection, `"Y-M-D"` or `"Y-M"`. Today when absent.
    pub value: Option<String>,
    pub view_type: ViewType,
    /// Per-date badge counts keyed by `"Y-M-D"`. Passed through untouched.
    pub indicators: BTreeMap<String, u32>,
    #[cfg_attr(feature = "serde", serde(skip, default = "widget_gesture_config"))]
    pub gesture: GestureConfig,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            value: None,
            view_type: ViewType::Month,
            indicators: BTreeMap::new(),
            gesture: widget_gesture_config(),
        }
    }
}

impl CalendarConfig {
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_view_type(mut self, view_type: ViewType) -> Self {
        self.view_type = view_type;
        self
    }

    #[must_use]
    pub fn with_indicators(mut self, indicators: BTreeMap<String, u32>) -> Self {
        self.indicators = indicators;
        self
    }

    #[must_use]
    pub fn with_gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    /// Defaults overridden from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Defaults overridden through a custom environment lookup (for tests).
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = get_env(ENV_VIEW_TYPE) {
            match value.parse() {
                Ok(view_type) => config.view_type = view_type,
                Err(err) => {
                    kalends_core::warn!(%err, "ignoring {ENV_VIEW_TYPE}");
                }
            }
        }
        let gesture = GestureConfig::from_env_with(&get_env);
        config.gesture = if get_env(ENV_SWIPE_VELOCITY).is_some() {
            gesture
        } else {
            gesture.without_swipe_window()
        };
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[test]
    fn default_has_no_swipe_window() {
        let config = CalendarConfig::default();
        assert_eq!(config.gesture.swipe_velocity, None);
        assert_eq!(config.view_type, ViewType::Month);
        assert!(config.value.is_none());
    }

    #[test]
    fn env_selects_view_type() {
        let config = CalendarConfig::from_env_with(env(&[("KALENDS_VIEW_TYPE", "week")]));
        assert_eq!(config.view_type, ViewType::Week);
        assert_eq!(config.gesture.swipe_velocity, None);
    }

    #[test]
    fn bad_view_type_keeps_default() {
        let config = CalendarConfig::from_env_with(env(&[("KALENDS_VIEW_TYPE", "year")]));
        assert_eq!(config.view_type, ViewType::Month);
    }

    #[test]
    fn explicit_swipe_window_is_honoured() {
        let config = CalendarConfig::from_env_with(env(&[
            ("KALENDS_SWIPE_VELOCITY_MS", "300"),
            ("KALENDS_SWIPE_THRESHOLD_PX", "24"),
        ]));
        assert_eq!(config.gesture.swipe_velocity, Some(Duration::from_millis(300)));
        assert_eq!(config.gesture.swipe_threshold, 24.0);
    }

    #[test]
    fn builders() {
        let config = CalendarConfig::default()
            .with_value("2023-9")
            .with_view_type(ViewType::Week)
            .with_indicators(BTreeMap::from([("2023-9-8".to_string(), 2)]));
        assert_eq!(config.value.as_deref(), Some("2023-9"));
        assert_eq!(config.indicators.get("2023-9-8"), Some(&2));
    }
}
