//! Timer configuration value object
//!
//! The editor may send half-typed values at any moment, so everything that
//! enters through serde is normalized instead of rejected.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Font families offered by the editor before any system scan
pub const STANDARD_FONTS: &[&str] = &[
    "Arial",
    "Arial Black",
    "Verdana",
    "Tahoma",
    "Trebuchet MS",
    "Impact",
    "Times New Roman",
    "Didot",
    "Georgia",
    "American Typewriter",
    "Andale Mono",
    "Courier",
    "Lucida Console",
    "Monaco",
    "Bradley Hand",
    "Brush Script MT",
    "Luminari",
    "Comic Sans MS",
    "Segoe UI",
    "Roboto",
    "Helvetica",
    "Open Sans",
];

/// An RGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    pub const GREEN: Rgb = Rgb::new(0x00, 0xff, 0x00);
    pub const BLUE: Rgb = Rgb::new(0x00, 0x00, 0xff);
    pub const YELLOW: Rgb = Rgb::new(0xff, 0xff, 0x00);
    pub const RED: Rgb = Rgb::new(0xff, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb` (the leading `#` is optional).
    pub fn parse_hex(input: &str) -> Option<Self> {
        let hex = input.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }

        match hex.len() {
            6 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
            }
            3 => {
                let channel = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .ok()
                        .map(|v| v * 17)
                };
                Some(Self::new(channel(0)?, channel(1)?, channel(2)?))
            }
            _ => None,
        }
    }

    /// Channels scaled to 0.0..=1.0 for GL-style consumers.
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Overlay configuration, owned by the editor and read by the core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ConfigUpdate")]
pub struct TimerConfig {
    pub limit_enabled: bool,
    pub limit_seconds: u64,
    pub font_family: String,
    pub font_size: u32,
    pub final_message: String,
    pub final_message_blink: bool,
    pub color_default: Rgb,
    #[serde(rename = "color30s")]
    pub color_30s: Rgb,
    #[serde(rename = "color15s")]
    pub color_15s: Rgb,
    #[serde(rename = "color10s")]
    pub color_10s: Rgb,
    #[serde(rename = "color5s")]
    pub color_5s: Rgb,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            limit_enabled: true,
            limit_seconds: 300,
            font_family: "Arial".to_string(),
            font_size: 120,
            final_message: "TIME UP".to_string(),
            final_message_blink: true,
            color_default: Rgb::WHITE,
            color_30s: Rgb::GREEN,
            color_15s: Rgb::BLUE,
            color_10s: Rgb::YELLOW,
            color_5s: Rgb::RED,
        }
    }
}

impl TimerConfig {
    /// Merge an editor update into this config, normalizing every field it carries.
    pub fn apply(&mut self, update: ConfigUpdate) {
        let defaults = TimerConfig::default();

        if let Some(v) = update.limit_enabled {
            self.limit_enabled = v;
        }
        if let Some(v) = update.limit_seconds {
            self.limit_seconds = clamp_seconds(v);
        }
        if let Some(v) = update.font_family {
            self.font_family = font_or(v, &defaults.font_family);
        }
        if let Some(v) = update.font_size {
            self.font_size = clamp_font_size(v);
        }
        if let Some(v) = update.final_message {
            self.final_message = v;
        }
        if let Some(v) = update.final_message_blink {
            self.final_message_blink = v;
        }

        let color = |value: Option<String>, current: Rgb, fallback: Rgb| match value {
            Some(text) => Rgb::parse_hex(&text).unwrap_or(fallback),
            None => current,
        };
        self.color_default = color(
            update.color_default,
            self.color_default,
            defaults.color_default,
        );
        self.color_30s = color(update.color_30s, self.color_30s, defaults.color_30s);
        self.color_15s = color(update.color_15s, self.color_15s, defaults.color_15s);
        self.color_10s = color(update.color_10s, self.color_10s, defaults.color_10s);
        self.color_5s = color(update.color_5s, self.color_5s, defaults.color_5s);
    }
}

/// Partial config sent by the editor; absent fields are left untouched.
///
/// Numbers are read as floats so fractional or out-of-range input is clamped
/// instead of rejecting the whole update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigUpdate {
    pub limit_enabled: Option<bool>,
    pub limit_seconds: Option<f64>,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub final_message: Option<String>,
    pub final_message_blink: Option<bool>,
    pub color_default: Option<String>,
    #[serde(rename = "color30s")]
    pub color_30s: Option<String>,
    #[serde(rename = "color15s")]
    pub color_15s: Option<String>,
    #[serde(rename = "color10s")]
    pub color_10s: Option<String>,
    #[serde(rename = "color5s")]
    pub color_5s: Option<String>,
}

/// A full config on the wire is an update applied over the factory preset.
impl From<ConfigUpdate> for TimerConfig {
    fn from(update: ConfigUpdate) -> Self {
        let mut config = TimerConfig::default();
        config.apply(update);
        config
    }
}

// Float to int `as` casts saturate, so only non-finite input needs a fallback.
fn clamp_seconds(value: f64) -> u64 {
    if value.is_finite() {
        value.trunc().max(0.0) as u64
    } else {
        0
    }
}

fn clamp_font_size(value: f64) -> u32 {
    if value.is_finite() {
        (value.trunc() as u32).max(1)
    } else {
        1
    }
}

fn font_or(value: String, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Rgb::parse_hex("#00ff00"), Some(Rgb::GREEN));
        assert_eq!(Rgb::parse_hex("ff0000"), Some(Rgb::RED));
        assert_eq!(Rgb::parse_hex("#fff"), Some(Rgb::WHITE));
        assert_eq!(Rgb::parse_hex(""), None);
        assert_eq!(Rgb::parse_hex("#12345"), None);
        assert_eq!(Rgb::parse_hex("#zzzzzz"), None);
        assert_eq!(Rgb::parse_hex("#ééé"), None);
    }

    #[test]
    fn displays_as_lowercase_hex() {
        assert_eq!(Rgb::new(0xab, 0x01, 0xff).to_string(), "#ab01ff");
    }

    #[test]
    fn deserialize_clamps_malformed_fields() {
        let json = r##"{
            "limitEnabled": true,
            "limitSeconds": -12,
            "fontSize": 0,
            "fontFamily": "  ",
            "color30s": "",
            "color5s": "#abc"
        }"##;
        let config: TimerConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.limit_seconds, 0);
        assert_eq!(config.font_size, 1);
        assert_eq!(config.font_family, "Arial");
        assert_eq!(config.color_30s, Rgb::GREEN);
        assert_eq!(config.color_5s, Rgb::new(0xaa, 0xbb, 0xcc));
        assert_eq!(config.final_message, "TIME UP");
    }

    #[test]
    fn deserialize_truncates_fractional_and_saturates_huge_numbers() {
        let config: TimerConfig =
            serde_json::from_str(r#"{"limitSeconds": 12.5, "fontSize": 1e3}"#).unwrap();
        assert_eq!(config.limit_seconds, 12);
        assert_eq!(config.font_size, 1000);

        let config: TimerConfig =
            serde_json::from_str(r#"{"limitSeconds": 1e300, "fontSize": 99999999999}"#).unwrap();
        assert_eq!(config.limit_seconds, u64::MAX);
        assert_eq!(config.font_size, u32::MAX);

        let config: TimerConfig =
            serde_json::from_str(r#"{"limitSeconds": -0.5, "fontSize": 0.4}"#).unwrap();
        assert_eq!(config.limit_seconds, 0);
        assert_eq!(config.font_size, 1);
    }

    #[test]
    fn non_finite_numbers_fall_back() {
        assert_eq!(clamp_seconds(f64::NAN), 0);
        assert_eq!(clamp_seconds(f64::INFINITY), 0);
        assert_eq!(clamp_font_size(f64::NEG_INFINITY), 1);
    }

    #[test]
    fn serializes_with_editor_field_names() {
        let value = serde_json::to_value(TimerConfig::default()).unwrap();
        assert_eq!(value["limitSeconds"], 300);
        assert_eq!(value["color30s"], "#00ff00");
        assert_eq!(value["colorDefault"], "#ffffff");
        assert_eq!(value["finalMessageBlink"], true);
    }

    #[test]
    fn apply_keeps_absent_fields() {
        let mut config = TimerConfig {
            final_message: "DONE".to_string(),
            ..TimerConfig::default()
        };
        config.apply(ConfigUpdate {
            limit_seconds: Some(90.0),
            color_10s: Some("#000000".to_string()),
            ..ConfigUpdate::default()
        });

        assert_eq!(config.limit_seconds, 90);
        assert_eq!(config.final_message, "DONE");
        assert_eq!(config.color_10s, Rgb::new(0, 0, 0));
        assert_eq!(config.color_15s, Rgb::BLUE);
    }

    #[test]
    fn loads_from_toml() {
        let config: TimerConfig = toml::from_str(
            r##"
            limitSeconds = 45
            finalMessage = "ENCORE"
            finalMessageBlink = false
            colorDefault = "#101010"
            "##,
        )
        .unwrap();

        assert_eq!(config.limit_seconds, 45);
        assert_eq!(config.final_message, "ENCORE");
        assert!(!config.final_message_blink);
        assert_eq!(config.color_default, Rgb::new(0x10, 0x10, 0x10));
    }
}
