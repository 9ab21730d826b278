//! Page composition: tiling card copies onto printable pages.
//!
//! Takes one card and one [`PrintConfig`](super::PrintConfig) and produces
//! declarative geometry only: page count, per-page slot rectangles, and
//! per-element scaled rectangles and style values. Turning that into markup
//! or driver commands is a rendering collaborator's job.

use anyhow::{bail, Result};
use serde::Serialize;

use crate::models::{Card, ElementProperties, ElementType};
use crate::print::{Orientation, PrintConfig, BLEED_MM, MM_TO_PX};

/// Axis-aligned rectangle in pixel-equivalent units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

/// One element of a rendered card, scaled to its print slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedElement {
    /// Source element id
    pub element_id: String,
    /// Element type
    pub element_type: ElementType,
    /// Position and extent relative to the card's top-left corner
    pub rect: Rect,
    /// Paint order
    pub z_index: i32,
    /// Property set with pixel-valued fields scaled by the card's scale
    pub properties: ElementProperties,
}

/// One card instance scaled into a slot, elements in paint order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedCard {
    /// Card rectangle relative to the page's top-left corner
    /// (centered within its slot)
    pub rect: Rect,
    /// Canvas fill color
    pub background_color: String,
    /// Elements in paint order
    pub elements: Vec<RenderedElement>,
}

/// One card-sized cell within a page's grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    /// Grid row (0-based)
    pub row: u32,
    /// Grid column (0-based)
    pub col: u32,
    /// Slot rectangle relative to the page's top-left corner
    pub rect: Rect,
    /// The card instance occupying this slot
    pub card: RenderedCard,
}

/// One printable page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// 0-based page number
    pub index: usize,
    /// Filled slots; the last page may carry fewer than `cards_per_page`
    pub slots: Vec<Slot>,
}

/// Complete print geometry for a card and configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageComposition {
    /// Pages in print order
    pub pages: Vec<Page>,
    /// Uniform shrink factor applied to the card, in `(0, 1]`
    pub scale: f64,
    /// Grid columns per page
    pub cols: u32,
    /// Grid rows per page
    pub rows: u32,
    /// Slot width in pixel-equivalent units
    pub slot_width_px: f64,
    /// Slot height in pixel-equivalent units
    pub slot_height_px: f64,
    /// Oriented paper width in millimeters
    pub paper_width_mm: f64,
    /// Oriented paper height in millimeters
    pub paper_height_mm: f64,
}

/// Computes the page composition for `copies` of `card` under `config`.
///
/// The card is only ever shrunk to fit its slot, never magnified; the
/// resulting scale is in `(0, 1]`. Each copy fills one page of
/// `cards_per_page` slots.
///
/// # Errors
///
/// Fails on a configuration that yields no printable area: zero
/// `copies`/`cards_per_page`, or margins (plus bleed) consuming the whole
/// page. Degenerate zero-size slots are never emitted.
pub fn compose(card: &Card, config: &PrintConfig) -> Result<PageComposition> {
    if config.copies == 0 {
        bail!("Print configuration requires at least 1 copy");
    }
    if config.cards_per_page == 0 {
        bail!("Print configuration requires at least 1 card per page");
    }
    if card.size.width <= 0.0 || card.size.height <= 0.0 {
        bail!(
            "Card '{}' has a degenerate canvas ({} x {})",
            card.name,
            card.size.width,
            card.size.height
        );
    }

    // Resolve oriented paper dimensions.
    let (mut paper_width, mut paper_height) = config.paper_size.dimensions_mm();
    if config.orientation == Orientation::Landscape {
        std::mem::swap(&mut paper_width, &mut paper_height);
    }

    // Bleed shrinks the printable area on every edge before grid sizing.
    let bleed = if config.include_bleed_area { BLEED_MM } else { 0.0 };
    let available_width =
        paper_width - config.margins.left - config.margins.right - 2.0 * bleed;
    let available_height =
        paper_height - config.margins.top - config.margins.bottom - 2.0 * bleed;
    if available_width <= 0.0 || available_height <= 0.0 {
        bail!(
            "Margins leave no printable area on {paper_width} x {paper_height} mm paper \
             ({available_width} x {available_height} mm available)"
        );
    }

    // Near-square grid: cols = ceil(sqrt(n)), rows = ceil(n / cols).
    let cols = (f64::from(config.cards_per_page)).sqrt().ceil() as u32;
    let rows = config.cards_per_page.div_ceil(cols);

    let slot_width_px = available_width / f64::from(cols) * MM_TO_PX;
    let slot_height_px = available_height / f64::from(rows) * MM_TO_PX;

    // Shrink to fit; never magnify.
    let scale_x = slot_width_px / card.size.width;
    let scale_y = slot_height_px / card.size.height;
    let scale = scale_x.min(scale_y).min(1.0);

    let origin_x = (config.margins.left + bleed) * MM_TO_PX;
    let origin_y = (config.margins.top + bleed) * MM_TO_PX;

    let card_width = card.size.width * scale;
    let card_height = card.size.height * scale;
    let rendered_elements = render_elements(card, scale);

    let total_slots = config.copies as usize * config.cards_per_page as usize;
    let per_page = config.cards_per_page as usize;
    let page_count = total_slots.div_ceil(per_page);

    let mut pages = Vec::with_capacity(page_count);
    let mut remaining = total_slots;
    for index in 0..page_count {
        let fill = remaining.min(per_page);
        remaining -= fill;

        let mut slots = Vec::with_capacity(fill);
        for slot_index in 0..fill {
            let row = (slot_index / cols as usize) as u32;
            let col = (slot_index % cols as usize) as u32;
            let slot_rect = Rect {
                x: origin_x + f64::from(col) * slot_width_px,
                y: origin_y + f64::from(row) * slot_height_px,
                width: slot_width_px,
                height: slot_height_px,
            };
            // Center the card within its slot.
            let card_rect = Rect {
                x: slot_rect.x + (slot_width_px - card_width) / 2.0,
                y: slot_rect.y + (slot_height_px - card_height) / 2.0,
                width: card_width,
                height: card_height,
            };
            slots.push(Slot {
                row,
                col,
                rect: slot_rect,
                card: RenderedCard {
                    rect: card_rect,
                    background_color: card.background_color.clone(),
                    elements: rendered_elements.clone(),
                },
            });
        }
        pages.push(Page { index, slots });
    }

    Ok(PageComposition {
        pages,
        scale,
        cols,
        rows,
        slot_width_px,
        slot_height_px,
        paper_width_mm: paper_width,
        paper_height_mm: paper_height,
    })
}

/// Scales every element of the card uniformly, in paint order.
fn render_elements(card: &Card, scale: f64) -> Vec<RenderedElement> {
    card.elements_in_paint_order()
        .into_iter()
        .map(|element| RenderedElement {
            element_id: element.id.clone(),
            element_type: element.element_type(),
            rect: Rect {
                x: element.position.x * scale,
                y: element.position.y * scale,
                width: element.size.width * scale,
                height: element.size.height * scale,
            },
            z_index: element.z_index,
            properties: element.properties.scaled(scale),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::{CardElement, Position, Size};
    use crate::print::{Margins, PaperSize, PrintQuality};

    const EPSILON: f64 = 1e-6;

    fn card_400x600() -> Card {
        Card::new("Test card", &FixedClock::at("2024-03-01T12:00:00Z"))
    }

    #[test]
    fn test_worked_example_a4_portrait_four_per_page() {
        // card 400x600, A4 portrait, 20mm margins, 4 per page
        let card = card_400x600();
        let config = PrintConfig::default();
        let composition = compose(&card, &config).unwrap();

        assert_eq!(composition.cols, 2);
        assert_eq!(composition.rows, 2);

        // available 170 x 257 mm, so slots are 85 x 128.5 mm
        let expected_slot_width = 170.0 / 2.0 * MM_TO_PX;
        let expected_slot_height = 257.0 / 2.0 * MM_TO_PX;
        assert!((composition.slot_width_px - expected_slot_width).abs() < EPSILON);
        assert!((composition.slot_height_px - expected_slot_height).abs() < EPSILON);

        // scale = min(slot_w / 400, slot_h / 600, 1) = slot_w / 400
        let expected_scale = expected_slot_width / 400.0;
        assert!((composition.scale - expected_scale).abs() < EPSILON);
        assert!((composition.scale - 0.805).abs() < 0.01);
        assert!(composition.scale > 0.0 && composition.scale <= 1.0);
    }

    #[test]
    fn test_two_copies_four_per_page_fill_two_pages() {
        let card = card_400x600();
        let config = PrintConfig {
            copies: 2,
            ..PrintConfig::default()
        };
        let composition = compose(&card, &config).unwrap();

        assert_eq!(composition.pages.len(), 2);
        assert_eq!(composition.pages[0].slots.len(), 4);
        assert_eq!(composition.pages[1].slots.len(), 4);
    }

    #[test]
    fn test_three_per_page_underfills_the_grid() {
        // 3 per page on a 2x2 grid leaves one grid cell empty, never padded
        let card = card_400x600();
        let config = PrintConfig {
            copies: 1,
            cards_per_page: 3,
            ..PrintConfig::default()
        };
        let composition = compose(&card, &config).unwrap();
        assert_eq!(composition.pages.len(), 1);
        assert_eq!(composition.pages[0].slots.len(), 3);

        // Non-square count still produces a valid grid (2 cols, 2 rows)
        assert_eq!(composition.cols, 2);
        assert_eq!(composition.rows, 2);
        for page in &composition.pages {
            assert!(page.slots.len() <= config.cards_per_page as usize);
        }
    }

    #[test]
    fn test_landscape_swaps_paper_dimensions() {
        let card = card_400x600();
        let config = PrintConfig {
            orientation: Orientation::Landscape,
            ..PrintConfig::default()
        };
        let composition = compose(&card, &config).unwrap();
        assert!((composition.paper_width_mm - 297.0).abs() < EPSILON);
        assert!((composition.paper_height_mm - 210.0).abs() < EPSILON);
    }

    #[test]
    fn test_small_card_is_never_magnified() {
        let mut card = card_400x600();
        card.size = Size::new(50.0, 50.0);
        let composition = compose(&card, &PrintConfig::default()).unwrap();
        assert!((composition.scale - 1.0).abs() < EPSILON);

        let slot = &composition.pages[0].slots[0];
        assert!((slot.card.rect.width - 50.0).abs() < EPSILON);
    }

    #[test]
    fn test_oversized_card_is_shrunk_to_fit() {
        let mut card = card_400x600();
        card.size = Size::new(4000.0, 6000.0);
        let composition = compose(&card, &PrintConfig::default()).unwrap();
        assert!(composition.scale < 1.0);
        assert!(composition.scale > 0.0);

        let slot = &composition.pages[0].slots[0];
        assert!(slot.card.rect.width <= composition.slot_width_px + EPSILON);
        assert!(slot.card.rect.height <= composition.slot_height_px + EPSILON);
    }

    #[test]
    fn test_bleed_reduces_available_area() {
        let card = card_400x600();
        let without = compose(&card, &PrintConfig::default()).unwrap();
        let with = compose(
            &card,
            &PrintConfig {
                include_bleed_area: true,
                ..PrintConfig::default()
            },
        )
        .unwrap();

        assert!(with.slot_width_px < without.slot_width_px);
        assert!(with.slot_height_px < without.slot_height_px);
        // 3mm inset on each edge: 164mm usable width over 2 columns
        assert!((with.slot_width_px - 164.0 / 2.0 * MM_TO_PX).abs() < EPSILON);
    }

    #[test]
    fn test_degenerate_configurations_fail_fast() {
        let card = card_400x600();

        let no_area = PrintConfig {
            margins: Margins::uniform(120.0),
            ..PrintConfig::default()
        };
        assert!(compose(&card, &no_area).is_err());

        let zero_copies = PrintConfig {
            copies: 0,
            ..PrintConfig::default()
        };
        assert!(compose(&card, &zero_copies).is_err());

        let zero_per_page = PrintConfig {
            cards_per_page: 0,
            ..PrintConfig::default()
        };
        assert!(compose(&card, &zero_per_page).is_err());

        // Margins that exactly consume the page are degenerate too
        let exact = PrintConfig {
            paper_size: PaperSize::Custom {
                width: 40.0,
                height: 40.0,
            },
            margins: Margins::uniform(20.0),
            ..PrintConfig::default()
        };
        assert!(compose(&card, &exact).is_err());
    }

    #[test]
    fn test_quality_does_not_affect_geometry() {
        let card = card_400x600();
        let normal = compose(&card, &PrintConfig::default()).unwrap();
        let draft = compose(
            &card,
            &PrintConfig {
                print_quality: PrintQuality::Draft,
                ..PrintConfig::default()
            },
        )
        .unwrap();
        assert_eq!(normal, draft);
    }

    #[test]
    fn test_elements_scale_uniformly_and_keep_paint_order() {
        let clock = FixedClock::at("2024-03-01T12:00:00Z");
        let mut card = card_400x600();

        let mut back = CardElement::with_defaults(ElementType::QrCode, Position::new(100.0, 200.0));
        back.z_index = 0;
        let mut front =
            CardElement::with_defaults(ElementType::NameLabel, Position::new(10.0, 10.0));
        front.z_index = 5;
        let (front_id, back_id) = (front.id.clone(), back.id.clone());
        // Insert front-most first; paint order must still put it last
        card.add_element(front, &clock);
        card.add_element(back, &clock);

        let composition = compose(&card, &PrintConfig::default()).unwrap();
        let scale = composition.scale;
        let elements = &composition.pages[0].slots[0].card.elements;

        assert_eq!(elements[0].element_id, back_id);
        assert_eq!(elements[1].element_id, front_id);

        let qr = &elements[0];
        assert!((qr.rect.x - 100.0 * scale).abs() < EPSILON);
        assert!((qr.rect.y - 200.0 * scale).abs() < EPSILON);
        assert!((qr.rect.width - 100.0 * scale).abs() < EPSILON);

        // Pixel-valued style properties scale by the same factor
        let label = &elements[1];
        let ElementProperties::NameLabel(props) = &label.properties else {
            panic!("wrong variant");
        };
        assert!((props.font_size - 16.0 * scale).abs() < EPSILON);
        assert!((props.padding - 8.0 * scale).abs() < EPSILON);
    }

    #[test]
    fn test_cards_are_centered_in_their_slots() {
        let mut card = card_400x600();
        card.size = Size::new(100.0, 100.0);
        let composition = compose(&card, &PrintConfig::default()).unwrap();

        let slot = &composition.pages[0].slots[0];
        let expected_x = slot.rect.x + (slot.rect.width - 100.0) / 2.0;
        let expected_y = slot.rect.y + (slot.rect.height - 100.0) / 2.0;
        assert!((slot.card.rect.x - expected_x).abs() < EPSILON);
        assert!((slot.card.rect.y - expected_y).abs() < EPSILON);
    }
}
