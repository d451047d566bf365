//! Page and simulation settings.
//!
//! The browser driver reads these from the canvas element's `data-*`
//! attributes, so `from_lookup` takes dataset keys in camelCase
//! (`data-max-speed` arrives as `maxSpeed`). A bad value is reported and the
//! default for that key is kept.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("`{key}`: `{value}` is not a number")]
    NotANumber { key: &'static str, value: String },
    #[error("`{key}`: {value} is out of range (expected {expected})")]
    OutOfRange {
        key: &'static str,
        value: f64,
        expected: &'static str,
    },
    #[error("`labels` has no non-empty entries")]
    NoLabels,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    /// Horizontal padding excluded from initial placement.
    pub margin_x: f64,
    /// Vertical padding excluded from initial placement.
    pub margin_y: f64,
    /// Minimum distance from any text rect at placement.
    pub min_text_clearance: f64,
    /// Initial velocity components are drawn from `[-max_speed, max_speed]`.
    pub max_speed: f64,
    /// Per-axis position nudge when a center ends up inside a text rect.
    pub jitter: f64,
    pub max_placement_attempts: u32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            margin_x: 100.0,
            margin_y: 50.0,
            min_text_clearance: 80.0,
            max_speed: 2.0,
            jitter: 10.0,
            max_placement_attempts: 1000,
        }
    }
}

impl FieldConfig {
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<ConfigError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let mut errors = Vec::new();
        let mut number = |key: &'static str, slot: &mut f64| {
            if let Some(raw) = lookup(key) {
                match parse_non_negative(key, &raw) {
                    Ok(v) => *slot = v,
                    Err(e) => errors.push(e),
                }
            }
        };
        number("marginX", &mut cfg.margin_x);
        number("marginY", &mut cfg.margin_y);
        number("clearance", &mut cfg.min_text_clearance);
        number("maxSpeed", &mut cfg.max_speed);
        number("jitter", &mut cfg.jitter);

        if let Some(raw) = lookup("placementAttempts") {
            match raw.trim().parse::<u32>() {
                Ok(0) => errors.push(ConfigError::OutOfRange {
                    key: "placementAttempts",
                    value: 0.0,
                    expected: ">= 1",
                }),
                Ok(n) => cfg.max_placement_attempts = n,
                Err(_) => errors.push(ConfigError::NotANumber {
                    key: "placementAttempts",
                    value: raw,
                }),
            }
        }
        (cfg, errors)
    }
}

fn parse_non_negative(key: &'static str, raw: &str) -> Result<f64, ConfigError> {
    let value: f64 = raw.trim().parse().map_err(|_| ConfigError::NotANumber {
        key,
        value: raw.to_string(),
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::OutOfRange {
            key,
            value,
            expected: "a finite value >= 0",
        });
    }
    Ok(value)
}

pub const DEFAULT_LABELS: &[&str] = &["About", "Projects", "Resume", "GitHub", "Contact"];

/// Element ids and labels for the hero section.
#[derive(Clone, Debug, PartialEq)]
pub struct PageConfig {
    /// Text rects are measured relative to this element.
    pub hero_id: String,
    pub title_id: String,
    pub portrait_id: String,
    pub labels: Vec<String>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            hero_id: "hero".into(),
            title_id: "hero-title".into(),
            portrait_id: "portrait-container".into(),
            labels: DEFAULT_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl PageConfig {
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<ConfigError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let mut errors = Vec::new();
        if let Some(id) = lookup("hero").filter(|s| !s.trim().is_empty()) {
            cfg.hero_id = id.trim().to_string();
        }
        if let Some(id) = lookup("heroTitle").filter(|s| !s.trim().is_empty()) {
            cfg.title_id = id.trim().to_string();
        }
        if let Some(id) = lookup("portrait").filter(|s| !s.trim().is_empty()) {
            cfg.portrait_id = id.trim().to_string();
        }
        if let Some(raw) = lookup("labels") {
            match parse_labels(&raw) {
                Ok(labels) => cfg.labels = labels,
                Err(e) => errors.push(e),
            }
        }
        (cfg, errors)
    }
}

/// Comma separated, blanks dropped.
pub fn parse_labels(raw: &str) -> Result<Vec<String>, ConfigError> {
    let labels: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    if labels.is_empty() {
        return Err(ConfigError::NoLabels);
    }
    Ok(labels)
}

/// Settings for the portrait reveal, read from the reveal canvas dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealConfig {
    /// Element whose pointer moves paint the mask.
    pub container_id: String,
    pub image_src: String,
    /// Side of the square mask and canvas, in pixels.
    pub size: u32,
    pub brush_radius: f64,
    /// Fraction of mask alpha removed per frame.
    pub fade_rate: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            container_id: "portrait-container".into(),
            image_src: "assets/portrait.png".into(),
            size: 240,
            brush_radius: 20.0,
            fade_rate: 0.02,
        }
    }
}

impl RevealConfig {
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<ConfigError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let mut errors = Vec::new();
        if let Some(id) = lookup("container").filter(|s| !s.trim().is_empty()) {
            cfg.container_id = id.trim().to_string();
        }
        if let Some(src) = lookup("src").filter(|s| !s.trim().is_empty()) {
            cfg.image_src = src.trim().to_string();
        }
        if let Some(raw) = lookup("size") {
            match raw.trim().parse::<u32>() {
                Ok(0) => errors.push(ConfigError::OutOfRange {
                    key: "size",
                    value: 0.0,
                    expected: ">= 1",
                }),
                Ok(n) => cfg.size = n,
                Err(_) => errors.push(ConfigError::NotANumber { key: "size", value: raw }),
            }
        }
        if let Some(raw) = lookup("brushRadius") {
            match parse_non_negative("brushRadius", &raw) {
                Ok(v) => cfg.brush_radius = v,
                Err(e) => errors.push(e),
            }
        }
        if let Some(raw) = lookup("fadeRate") {
            match parse_non_negative("fadeRate", &raw) {
                Ok(v) if v > 1.0 => errors.push(ConfigError::OutOfRange {
                    key: "fadeRate",
                    value: v,
                    expected: "0 to 1",
                }),
                Ok(v) => cfg.fade_rate = v,
                Err(e) => errors.push(e),
            }
        }
        (cfg, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn empty_dataset_gives_defaults() {
        let (cfg, errors) = FieldConfig::from_lookup(|_| None);
        assert_eq!(cfg, FieldConfig::default());
        assert!(errors.is_empty());
        let (page, errors) = PageConfig::from_lookup(|_| None);
        assert_eq!(page, PageConfig::default());
        assert!(errors.is_empty());
    }

    #[test]
    fn overrides_apply() {
        let (cfg, errors) = FieldConfig::from_lookup(lookup(&[
            ("marginX", "20"),
            ("maxSpeed", " 3.5 "),
            ("placementAttempts", "50"),
        ]));
        assert!(errors.is_empty());
        assert_eq!(cfg.margin_x, 20.0);
        assert_eq!(cfg.max_speed, 3.5);
        assert_eq!(cfg.max_placement_attempts, 50);
        assert_eq!(cfg.margin_y, 50.0);
    }

    #[test]
    fn bad_values_keep_defaults() {
        let (cfg, errors) = FieldConfig::from_lookup(lookup(&[
            ("clearance", "far"),
            ("jitter", "-1"),
            ("placementAttempts", "0"),
        ]));
        assert_eq!(cfg, FieldConfig::default());
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], ConfigError::NotANumber { key: "clearance", .. }));
        assert!(matches!(errors[1], ConfigError::OutOfRange { key: "jitter", .. }));
    }

    #[test]
    fn labels_are_split_and_trimmed() {
        let (page, errors) = PageConfig::from_lookup(lookup(&[
            ("labels", " Blog, ,Talks ,"),
            ("heroTitle", "title"),
        ]));
        assert!(errors.is_empty());
        assert_eq!(page.labels, vec!["Blog".to_string(), "Talks".to_string()]);
        assert_eq!(page.title_id, "title");
        assert_eq!(parse_labels(" , "), Err(ConfigError::NoLabels));
    }

    #[test]
    fn reveal_overrides_and_rejects() {
        let (cfg, errors) = RevealConfig::from_lookup(lookup(&[
            ("src", "img/me.jpg"),
            ("size", "120"),
            ("brushRadius", "12.5"),
            ("fadeRate", "1.5"),
        ]));
        assert_eq!(cfg.image_src, "img/me.jpg");
        assert_eq!(cfg.size, 120);
        assert_eq!(cfg.brush_radius, 12.5);
        assert_eq!(cfg.fade_rate, 0.02);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ConfigError::OutOfRange { key: "fadeRate", .. }));

        let (cfg, errors) = RevealConfig::from_lookup(lookup(&[("size", "0")]));
        assert_eq!(cfg, RevealConfig::default());
        assert_eq!(errors.len(), 1);
    }
}
