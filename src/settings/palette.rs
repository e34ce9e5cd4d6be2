// Color palette settings and the static palette table

use serde::{Deserialize, Deserializer, Serialize};

/// Palette identifier stored in `color_palette`
///
/// Deserializes leniently: any string is accepted and unknown ids become the default palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteId {
    #[default]
    Monochrome,
    Red,
    Blue,
    Green,
    Brand,
}

impl PaletteId {
    pub const ALL: [PaletteId; 5] = [
        PaletteId::Monochrome,
        PaletteId::Red,
        PaletteId::Blue,
        PaletteId::Green,
        PaletteId::Brand,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PaletteId::Monochrome => "monochrome",
            PaletteId::Red => "red",
            PaletteId::Blue => "blue",
            PaletteId::Green => "green",
            PaletteId::Brand => "brand",
        }
    }

    /// Parse a palette id, ignoring case and surrounding whitespace
    pub fn parse(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL
            .into_iter()
            .find(|palette| palette.as_str().eq_ignore_ascii_case(id))
    }

    /// Parse a palette id; unknown ids fall back to the default palette
    pub fn parse_lossy(id: &str) -> Self {
        Self::parse(id).unwrap_or_default()
    }

    /// Body class toggled by the DOM applier
    pub fn body_class(self) -> String {
        format!("palette-{}", self.as_str())
    }

    /// Concrete color set for this palette
    pub fn colors(self) -> &'static ConcreteColors {
        match self {
            PaletteId::Monochrome => &MONOCHROME,
            PaletteId::Red => &RED,
            PaletteId::Blue => &BLUE,
            PaletteId::Green => &GREEN,
            PaletteId::Brand => &BRAND,
        }
    }
}

/// A fully resolved palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConcreteColors {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub text: &'static str,
    pub light: &'static str,
    pub dark: &'static str,
    pub light_text: &'static str,
    pub dark_text: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
    pub info: &'static str,
    pub section_alt_1: &'static str,
    pub section_alt_2: &'static str,
}

impl<'de> Deserialize<'de> for PaletteId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_lossy(&raw))
    }
}

/// An unknown secondary palette id means no secondary palette
fn known_palette<'de, D>(deserializer: D) -> Result<Option<PaletteId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(PaletteId::parse))
}

const MONOCHROME: ConcreteColors = ConcreteColors {
    primary: "#111111",
    secondary: "#4B5563",
    accent: "#9CA3AF",
    background: "#FFFFFF",
    text: "#111111",
    light: "#F5F5F5",
    dark: "#111111",
    light_text: "#FFFFFF",
    dark_text: "#111111",
    success: "#16A34A",
    warning: "#D97706",
    error: "#DC2626",
    info: "#2563EB",
    section_alt_1: "#FFFFFF",
    section_alt_2: "#F5F5F5",
};

const RED: ConcreteColors = ConcreteColors {
    primary: "#B91C1C",
    secondary: "#7F1D1D",
    accent: "#F87171",
    background: "#FFFFFF",
    text: "#1F1F1F",
    light: "#FEF2F2",
    dark: "#450A0A",
    light_text: "#FFFFFF",
    dark_text: "#1F1F1F",
    success: "#16A34A",
    warning: "#D97706",
    error: "#DC2626",
    info: "#2563EB",
    section_alt_1: "#FFFFFF",
    section_alt_2: "#FEF2F2",
};

const BLUE: ConcreteColors = ConcreteColors {
    primary: "#1D4ED8",
    secondary: "#1E3A8A",
    accent: "#60A5FA",
    background: "#FFFFFF",
    text: "#0F172A",
    light: "#EFF6FF",
    dark: "#172554",
    light_text: "#FFFFFF",
    dark_text: "#0F172A",
    success: "#16A34A",
    warning: "#D97706",
    error: "#DC2626",
    info: "#0EA5E9",
    section_alt_1: "#FFFFFF",
    section_alt_2: "#EFF6FF",
};

const GREEN: ConcreteColors = ConcreteColors {
    primary: "#15803D",
    secondary: "#14532D",
    accent: "#4ADE80",
    background: "#FFFFFF",
    text: "#052E16",
    light: "#F0FDF4",
    dark: "#052E16",
    light_text: "#FFFFFF",
    dark_text: "#052E16",
    success: "#16A34A",
    warning: "#D97706",
    error: "#DC2626",
    info: "#2563EB",
    section_alt_1: "#FFFFFF",
    section_alt_2: "#F0FDF4",
};

const BRAND: ConcreteColors = ConcreteColors {
    primary: "#C2410C",
    secondary: "#7C2D12",
    accent: "#FDBA74",
    background: "#FFFBF5",
    text: "#292524",
    light: "#FFF7ED",
    dark: "#431407",
    light_text: "#FFFBF5",
    dark_text: "#292524",
    success: "#15803D",
    warning: "#B45309",
    error: "#B91C1C",
    info: "#1D4ED8",
    section_alt_1: "#FFFBF5",
    section_alt_2: "#FFF7ED",
};

/// Global palette selection, persisted under `color_palette`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorPaletteSettings {
    pub palette: PaletteId,
    /// Sections alternate between the two section colors
    pub use_alternating_sections: bool,
    /// Every section uses the background color
    pub use_uniform_color: bool,
    /// Optional second palette used by the home page only
    #[serde(deserialize_with = "known_palette")]
    pub home_secondary_palette: Option<PaletteId>,
}

impl Default for ColorPaletteSettings {
    fn default() -> Self {
        Self {
            palette: PaletteId::Monochrome,
            use_alternating_sections: true,
            use_uniform_color: false,
            home_secondary_palette: None,
        }
    }
}

impl ColorPaletteSettings {
    pub fn colors(&self) -> &'static ConcreteColors {
        self.palette.colors()
    }

    /// Value of the `data-section-style` body attribute
    ///
    /// Uniform coloring wins when both flags are set.
    pub fn section_style(&self) -> &'static str {
        if self.use_uniform_color || !self.use_alternating_sections {
            "uniform"
        } else {
            "alternating"
        }
    }
}
