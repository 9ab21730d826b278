//! Print configuration and page-layout computation.
//!
//! [`PrintConfig`] describes how copies of a card should be tiled onto
//! physical paper; [`layout::compose`] turns a card plus a config into a
//! declarative [`layout::PageComposition`] for a rendering collaborator.

pub mod layout;

pub use layout::{compose, Page, PageComposition, RenderedCard, RenderedElement, Slot};

use serde::{Deserialize, Serialize};

/// Conversion factor from millimeters to pixel-equivalent card units
/// (96 px per inch).
pub const MM_TO_PX: f64 = 96.0 / 25.4;

/// Bleed inset applied to each page edge when enabled, in millimeters.
pub const BLEED_MM: f64 = 3.0;

/// Supported paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PaperSize {
    /// 210 x 297 mm
    A4,
    /// 216 x 279 mm
    Letter,
    /// 148 x 210 mm
    A5,
    /// Caller-specified dimensions in millimeters
    Custom {
        /// Width in mm
        width: f64,
        /// Height in mm
        height: f64,
    },
}

impl PaperSize {
    /// Returns the portrait (width, height) in millimeters.
    #[must_use]
    pub const fn dimensions_mm(self) -> (f64, f64) {
        match self {
            Self::A4 => (210.0, 297.0),
            Self::Letter => (216.0, 279.0),
            Self::A5 => (148.0, 210.0),
            Self::Custom { width, height } => (width, height),
        }
    }
}

/// Page orientation. Landscape swaps the paper's width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Long edge vertical
    #[default]
    Portrait,
    /// Long edge horizontal
    Landscape,
}

/// Print quality hint for the driver. Advisory only; does not affect
/// geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PrintQuality {
    /// Fast, low ink
    Draft,
    /// Default quality
    #[default]
    Normal,
    /// Best quality
    High,
}

/// Page margins in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    /// Top margin
    pub top: f64,
    /// Right margin
    pub right: f64,
    /// Bottom margin
    pub bottom: f64,
    /// Left margin
    pub left: f64,
}

impl Margins {
    /// Uniform margins on all four edges.
    #[must_use]
    pub const fn uniform(mm: f64) -> Self {
        Self {
            top: mm,
            right: mm,
            bottom: mm,
            left: mm,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(20.0)
    }
}

/// How many copies of a card to print, and onto what.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintConfig {
    /// Number of card copies to print (at least 1)
    pub copies: u32,
    /// Target paper size
    pub paper_size: PaperSize,
    /// Page orientation
    pub orientation: Orientation,
    /// Card slots per page (at least 1)
    pub cards_per_page: u32,
    /// Page margins in millimeters
    pub margins: Margins,
    /// Reserve a 3mm bleed inset on every edge
    pub include_bleed_area: bool,
    /// Driver quality hint
    pub print_quality: PrintQuality,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            copies: 1,
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            cards_per_page: 4,
            margins: Margins::default(),
            include_bleed_area: false,
            print_quality: PrintQuality::Normal,
        }
    }
}
