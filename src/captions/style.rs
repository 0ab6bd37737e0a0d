/*!
 * Caption appearance and the CSS override built from it.
 *
 * The system accessibility service describes how captions should look (colours,
 * opacity, font, edge style). The renderer consumes that as a style sheet that
 * targets the cue and cue-box pseudo elements.
 */

use log::warn;
use serde::{Deserialize, Serialize};

/// Pseudo element of a rendered cue
pub const CUE_PSEUDO_ID: &str = "cue";
/// Pseudo element of the box holding the rendered cues
pub const CUE_BOX_PSEUDO_ID: &str = "-webkit-media-text-track-display";
/// Font size of caption text as a fraction of the video height
pub const DEFAULT_FONT_SIZE_SCALE: f32 = 0.05;
/// Background opacity used when the user has not chosen one
pub const DEFAULT_BACKGROUND_OPACITY: f32 = 0.8;

/// An sRGB colour
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { red: 0, green: 0, blue: 0 };
    pub const WHITE: Rgb = Rgb { red: 255, green: 255, blue: 255 };

    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// CSS serialization: `#rrggbb` when opaque, `rgba(r, g, b, a)` otherwise
    pub fn css(&self, opacity: f32) -> String {
        let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        if alpha == 255 {
            format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
        } else {
            format!(
                "rgba({}, {}, {}, {})",
                self.red,
                self.green,
                self.blue,
                format_alpha(alpha)
            )
        }
    }
}

fn format_alpha(alpha: u8) -> String {
    let formatted = format!("{:.2}", alpha as f32 / 255.0);
    formatted.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// A user-chosen value and whether it overrides author styles
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppearanceSetting<T> {
    pub value: T,
    #[serde(default)]
    pub important: bool,
}

impl<T> AppearanceSetting<T> {
    pub fn new(value: T) -> Self {
        Self { value, important: false }
    }

    pub fn important(value: T) -> Self {
        Self { value, important: true }
    }
}

/// Outline drawn around caption glyphs
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TextEdgeStyle {
    #[default]
    Undefined,
    None,
    Raised,
    Depressed,
    Uniform,
    DropShadow,
}

impl TextEdgeStyle {
    /// Map an edge style code reported by the system accessibility service.
    /// Unknown codes assert in debug builds and yield `None` otherwise.
    pub fn from_system_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Undefined),
            1 => Some(Self::None),
            2 => Some(Self::Raised),
            3 => Some(Self::Depressed),
            4 => Some(Self::Uniform),
            5 => Some(Self::DropShadow),
            other => {
                debug_assert!(false, "unexpected caption text edge style {}", other);
                warn!("Unexpected caption text edge style {}, ignoring", other);
                None
            }
        }
    }

    pub fn system_code(&self) -> i32 {
        match self {
            Self::Undefined => 0,
            Self::None => 1,
            Self::Raised => 2,
            Self::Depressed => 3,
            Self::Uniform => 4,
            Self::DropShadow => 5,
        }
    }

    /// The CSS declaration for this edge style, empty when no edge is drawn
    pub fn css(&self) -> String {
        match self {
            Self::Undefined | Self::None => String::new(),
            Self::Raised => "text-shadow: -.05em -.05em 0 black;".to_string(),
            Self::Depressed => "text-shadow: .05em .05em 0 black;".to_string(),
            Self::DropShadow => "text-shadow: .075em .075em 0 black;".to_string(),
            Self::Uniform => "-webkit-text-stroke: .03em black;".to_string(),
        }
    }
}

/// Caption appearance as chosen in the system accessibility settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct CaptionAppearance {
    #[serde(default)]
    pub text_color: Option<AppearanceSetting<Rgb>>,

    #[serde(default)]
    pub text_opacity: Option<AppearanceSetting<f32>>,

    #[serde(default)]
    pub background_color: Option<AppearanceSetting<Rgb>>,

    #[serde(default)]
    pub background_opacity: Option<AppearanceSetting<f32>>,

    #[serde(default)]
    pub window_color: Option<AppearanceSetting<Rgb>>,

    #[serde(default)]
    pub window_opacity: Option<AppearanceSetting<f32>>,

    /// Corner radius of the cue box in CSS pixels
    #[serde(default)]
    pub window_corner_radius: Option<f32>,

    #[serde(default)]
    pub font_family: Option<AppearanceSetting<String>>,

    #[serde(default)]
    pub text_edge_style: TextEdgeStyle,

    /// Multiplier applied to the default caption font size
    #[serde(default)]
    pub relative_character_size: Option<AppearanceSetting<f32>>,
}

fn property(name: &str, value: &str, important: bool) -> String {
    if important {
        format!("{}:{} !important;", name, value)
    } else {
        format!("{}:{};", name, value)
    }
}

fn is_important<T>(setting: &Option<AppearanceSetting<T>>) -> bool {
    setting.as_ref().is_some_and(|s| s.important)
}

impl CaptionAppearance {
    pub fn background_css(&self) -> String {
        let color = self
            .background_color
            .as_ref()
            .map_or(Rgb::BLACK, |setting| setting.value);
        let opacity = self
            .background_opacity
            .as_ref()
            .map_or(DEFAULT_BACKGROUND_OPACITY, |setting| setting.value);
        let important = is_important(&self.background_color) || is_important(&self.background_opacity);
        property("background-color", &color.css(opacity), important)
    }

    pub fn text_color_css(&self) -> String {
        let Some(color) = &self.text_color else {
            return String::new();
        };
        let opacity = self.text_opacity.as_ref().map_or(1.0, |setting| setting.value);
        let important = color.important || is_important(&self.text_opacity);
        property("color", &color.value.css(opacity), important)
    }

    pub fn window_css(&self) -> String {
        if self.window_color.is_none() && self.window_opacity.is_none() {
            return String::new();
        }
        let color = self
            .window_color
            .as_ref()
            .map_or(Rgb::BLACK, |setting| setting.value);
        let opacity = self.window_opacity.as_ref().map_or(1.0, |setting| setting.value);
        let important = is_important(&self.window_color) || is_important(&self.window_opacity);
        if opacity <= 0.0 && !important {
            return String::new();
        }
        property("background-color", &color.css(opacity), important)
    }

    pub fn window_corner_radius_css(&self) -> String {
        match self.window_corner_radius {
            Some(radius) if radius > 0.0 => format!("border-radius:{}px;", radius),
            _ => String::new(),
        }
    }

    pub fn font_css(&self) -> String {
        match &self.font_family {
            Some(font) if !font.value.is_empty() => {
                property("font-family", &format!("\"{}\"", font.value), font.important)
            }
            _ => String::new(),
        }
    }

    /// Caption font size scale and whether it overrides author styles
    pub fn font_size_scale(&self) -> (f32, bool) {
        match &self.relative_character_size {
            Some(size) if size.value > 0.0 => (DEFAULT_FONT_SIZE_SCALE * size.value, size.important),
            _ => (DEFAULT_FONT_SIZE_SCALE, false),
        }
    }
}

/// Build the caption style sheet from an appearance and a raw edge style code
pub fn captions_style_sheet(appearance: &CaptionAppearance, text_edge_style_code: i32) -> String {
    let mut style_sheet = String::new();

    let background = appearance.background_css();
    let text_color = appearance.text_color_css();
    let edge = TextEdgeStyle::from_system_code(text_edge_style_code)
        .map(|style| style.css())
        .unwrap_or_default();
    let font = appearance.font_css();

    if !background.is_empty() || !text_color.is_empty() || !edge.is_empty() || !font.is_empty() {
        style_sheet.push_str(" video::");
        style_sheet.push_str(CUE_PSEUDO_ID);
        style_sheet.push('{');
        for declaration in [&background, &text_color, &edge, &font] {
            style_sheet.push_str(declaration);
        }
        style_sheet.push('}');
    }

    let window = appearance.window_css();
    let corner_radius = appearance.window_corner_radius_css();
    if !window.is_empty() || !corner_radius.is_empty() {
        style_sheet.push_str(" video::");
        style_sheet.push_str(CUE_BOX_PSEUDO_ID);
        style_sheet.push('{');
        style_sheet.push_str(&window);
        style_sheet.push_str(&corner_radius);
        style_sheet.push('}');
    }

    style_sheet
}
