//! Typed property sets for card elements.
//!
//! The properties carried by an element depend on its type. Each type gets
//! its own strict struct, and `ElementProperties` ties them together as a
//! closed union so that invalid combinations are unrepresentable. All fields
//! default at deserialization, so a property bag with missing entries fills
//! in the documented defaults instead of failing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of element types a card can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementType {
    /// Participant name label
    NameLabel,
    /// Single-line text input
    TextField,
    /// Multi-line text input
    TextArea,
    /// Grid of cells with a header row
    Table,
    /// Decorative icon from a fixed set
    Icon,
    /// QR code linking the printed card back to its session
    QrCode,
}

impl ElementType {
    /// All element types, in palette order.
    pub const ALL: [Self; 6] = [
        Self::NameLabel,
        Self::TextField,
        Self::TextArea,
        Self::Table,
        Self::Icon,
        Self::QrCode,
    ];

    /// Returns the kebab-case identifier used on the wire (e.g. `"name-label"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NameLabel => "name-label",
            Self::TextField => "text-field",
            Self::TextArea => "text-area",
            Self::Table => "table",
            Self::Icon => "icon",
            Self::QrCode => "qr-code",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Font weight for text-bearing elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight
    #[default]
    Normal,
    /// Between normal and bold
    Semibold,
    /// Bold weight
    Bold,
}

/// QR error correction level (higher levels survive more print damage).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ErrorCorrectionLevel {
    /// ~7% recovery
    L,
    /// ~15% recovery
    #[default]
    M,
    /// ~25% recovery
    Q,
    /// ~30% recovery
    H,
}

/// The fixed icon set. Unknown names resolve to [`IconName::Star`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IconName {
    /// Default icon
    #[default]
    Star,
    Heart,
    Circle,
    Square,
    Triangle,
    Zap,
    Sun,
    Moon,
}

impl IconName {
    /// Resolves an icon name, falling back to the default for unknown names.
    #[must_use]
    pub fn resolve(name: &str) -> Self {
        match name {
            "heart" => Self::Heart,
            "circle" => Self::Circle,
            "square" => Self::Square,
            "triangle" => Self::Triangle,
            "zap" => Self::Zap,
            "sun" => Self::Sun,
            "moon" => Self::Moon,
            _ => Self::Star,
        }
    }

    /// Returns the lowercase identifier (e.g. `"star"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Star => "star",
            Self::Heart => "heart",
            Self::Circle => "circle",
            Self::Square => "square",
            Self::Triangle => "triangle",
            Self::Zap => "zap",
            Self::Sun => "sun",
            Self::Moon => "moon",
        }
    }
}

/// Properties for a name label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NameLabelProperties {
    /// Label text
    pub text: String,
    /// Font size in card units
    pub font_size: f64,
    /// Font weight
    pub font_weight: FontWeight,
    /// Text color (CSS color string)
    pub color: String,
    /// Fill color behind the text
    pub background_color: String,
    /// Corner radius in card units
    pub border_radius: f64,
    /// Inner padding in card units
    pub padding: f64,
}

impl Default for NameLabelProperties {
    fn default() -> Self {
        Self {
            text: "Name".to_string(),
            font_size: 16.0,
            font_weight: FontWeight::Semibold,
            color: "#000000".to_string(),
            background_color: "#f3f4f6".to_string(),
            border_radius: 4.0,
            padding: 8.0,
        }
    }
}

/// Properties for a single-line text field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextFieldProperties {
    /// Hint text shown when the field is empty
    pub placeholder: String,
    /// Optional caption above the field
    pub label: Option<String>,
    /// Font size in card units
    pub font_size: f64,
    /// Border color (CSS color string)
    pub border_color: String,
    /// Border width in card units
    pub border_width: f64,
    /// Corner radius in card units
    pub border_radius: f64,
    /// Inner padding in card units
    pub padding: f64,
    /// Fill color
    pub background_color: String,
}

impl Default for TextFieldProperties {
    fn default() -> Self {
        Self {
            placeholder: "Enter text...".to_string(),
            label: Some("Text Field".to_string()),
            font_size: 14.0,
            border_color: "#d1d5db".to_string(),
            border_width: 1.0,
            border_radius: 4.0,
            padding: 8.0,
            background_color: "#ffffff".to_string(),
        }
    }
}

/// Properties for a multi-line text area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextAreaProperties {
    /// Hint text shown when the area is empty
    pub placeholder: String,
    /// Optional caption above the area
    pub label: Option<String>,
    /// Visible line count
    pub rows: u32,
    /// Font size in card units
    pub font_size: f64,
    /// Border color (CSS color string)
    pub border_color: String,
    /// Border width in card units
    pub border_width: f64,
    /// Corner radius in card units
    pub border_radius: f64,
    /// Inner padding in card units
    pub padding: f64,
    /// Fill color
    pub background_color: String,
}

impl Default for TextAreaProperties {
    fn default() -> Self {
        Self {
            placeholder: "Enter text...".to_string(),
            label: Some("Text Area".to_string()),
            rows: 3,
            font_size: 14.0,
            border_color: "#d1d5db".to_string(),
            border_width: 1.0,
            border_radius: 4.0,
            padding: 8.0,
            background_color: "#ffffff".to_string(),
        }
    }
}

/// Properties for a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableProperties {
    /// Row count including the header row (minimum 1)
    pub rows: u32,
    /// Column count (minimum 1)
    pub columns: u32,
    /// Header labels; entries beyond `columns` are dropped, missing ones
    /// fill as "Column N"
    pub headers: Vec<String>,
    /// Border color (CSS color string)
    pub border_color: String,
    /// Border width in card units
    pub border_width: f64,
    /// Cell padding in card units
    pub cell_padding: f64,
    /// Header row fill color
    pub header_background_color: String,
    /// Optional zebra-stripe color for even rows
    pub alternate_row_color: Option<String>,
}

impl Default for TableProperties {
    fn default() -> Self {
        Self {
            rows: 3,
            columns: 2,
            headers: vec!["Column 1".to_string(), "Column 2".to_string()],
            border_color: "#d1d5db".to_string(),
            border_width: 1.0,
            cell_padding: 8.0,
            header_background_color: "#f9fafb".to_string(),
            alternate_row_color: Some("#f9fafb".to_string()),
        }
    }
}

/// Properties for an icon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IconProperties {
    /// Icon name from the fixed set; unknown names render as the default icon
    pub icon_name: String,
    /// Glyph size in card units
    pub size: f64,
    /// Glyph color (CSS color string)
    pub color: String,
    /// Fill color behind the glyph
    pub background_color: String,
    /// Corner radius in card units
    pub border_radius: f64,
    /// Inner padding in card units
    pub padding: f64,
}

impl Default for IconProperties {
    fn default() -> Self {
        Self {
            icon_name: "star".to_string(),
            size: 24.0,
            color: "#6b7280".to_string(),
            background_color: "transparent".to_string(),
            border_radius: 0.0,
            padding: 8.0,
        }
    }
}

/// Properties for a QR code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QrCodeProperties {
    /// Encoded payload
    pub data: String,
    /// Quiet-zone fill color
    pub background_color: String,
    /// Module color
    pub foreground_color: String,
    /// Error correction level
    pub error_correction_level: ErrorCorrectionLevel,
    /// Whether to render the quiet-zone margin
    pub include_margin: bool,
}

impl Default for QrCodeProperties {
    fn default() -> Self {
        Self {
            data: "https://example.com".to_string(),
            background_color: "#ffffff".to_string(),
            foreground_color: "#000000".to_string(),
            error_correction_level: ErrorCorrectionLevel::M,
            include_margin: true,
        }
    }
}

/// Type-tagged property set for one card element.
///
/// Serializes adjacently tagged so the JSON matches the card format:
/// `{"type": "name-label", "properties": { ... }}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "properties", rename_all = "kebab-case")]
pub enum ElementProperties {
    /// Name label properties
    NameLabel(NameLabelProperties),
    /// Text field properties
    TextField(TextFieldProperties),
    /// Text area properties
    TextArea(TextAreaProperties),
    /// Table properties
    Table(TableProperties),
    /// Icon properties
    Icon(IconProperties),
    /// QR code properties
    QrCode(QrCodeProperties),
}

impl ElementProperties {
    /// Returns the default property set for the given element type.
    #[must_use]
    pub fn default_for(element_type: ElementType) -> Self {
        match element_type {
            ElementType::NameLabel => Self::NameLabel(NameLabelProperties::default()),
            ElementType::TextField => Self::TextField(TextFieldProperties::default()),
            ElementType::TextArea => Self::TextArea(TextAreaProperties::default()),
            ElementType::Table => Self::Table(TableProperties::default()),
            ElementType::Icon => Self::Icon(IconProperties::default()),
            ElementType::QrCode => Self::QrCode(QrCodeProperties::default()),
        }
    }

    /// Returns the element type this property set belongs to.
    #[must_use]
    pub const fn element_type(&self) -> ElementType {
        match self {
            Self::NameLabel(_) => ElementType::NameLabel,
            Self::TextField(_) => ElementType::TextField,
            Self::TextArea(_) => ElementType::TextArea,
            Self::Table(_) => ElementType::Table,
            Self::Icon(_) => ElementType::Icon,
            Self::QrCode(_) => ElementType::QrCode,
        }
    }

    /// Normalizes out-of-range values in place.
    ///
    /// Missing fields are already filled by deserialization defaults; this
    /// handles values that parsed but violate the documented shape:
    ///
    /// - table `rows`/`columns` are clamped to at least 1
    /// - table `headers` are truncated to `columns` and padded with
    ///   `"Column N"` entries
    /// - unknown icon names fall back to `"star"`
    pub fn normalize(&mut self) {
        match self {
            Self::Table(table) => {
                table.rows = table.rows.max(1);
                table.columns = table.columns.max(1);
                table.headers.truncate(table.columns as usize);
                for n in table.headers.len()..table.columns as usize {
                    table.headers.push(format!("Column {}", n + 1));
                }
            }
            Self::Icon(icon) => {
                icon.icon_name = IconName::resolve(&icon.icon_name).as_str().to_string();
            }
            _ => {}
        }
    }

    /// Returns a normalized copy (see [`Self::normalize`]).
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut copy = self.clone();
        copy.normalize();
        copy
    }

    /// Returns a copy with every pixel-valued property multiplied by
    /// `scale`. Counts, colors, and text are left untouched.
    #[must_use]
    pub fn scaled(&self, scale: f64) -> Self {
        let mut copy = self.clone();
        match &mut copy {
            Self::NameLabel(p) => {
                p.font_size *= scale;
                p.border_radius *= scale;
                p.padding *= scale;
            }
            Self::TextField(p) => {
                p.font_size *= scale;
                p.border_width *= scale;
                p.border_radius *= scale;
                p.padding *= scale;
            }
            Self::TextArea(p) => {
                p.font_size *= scale;
                p.border_width *= scale;
                p.border_radius *= scale;
                p.padding *= scale;
            }
            Self::Table(p) => {
                p.border_width *= scale;
                p.cell_padding *= scale;
            }
            Self::Icon(p) => {
                p.size *= scale;
                p.border_radius *= scale;
                p.padding *= scale;
            }
            Self::QrCode(_) => {}
        }
        copy
    }
}
