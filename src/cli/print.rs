//! Print-layout preview command.

use anyhow::{bail, Result};
use clap::Args;

use crate::cli::CliStore;
use crate::config::Config;
use crate::print::{self, Margins, Orientation, PaperSize, PrintConfig};

/// Compute the print-page layout for a template's card
#[derive(Debug, Clone, Args)]
pub struct PrintArgs {
    /// Template id to lay out
    #[arg(value_name = "TEMPLATE_ID")]
    pub template_id: String,

    /// Number of card copies
    #[arg(long, value_name = "N")]
    pub copies: Option<u32>,

    /// Paper size
    #[arg(long, value_enum, value_name = "SIZE")]
    pub paper: Option<PaperValue>,

    /// Use landscape orientation
    #[arg(long)]
    pub landscape: bool,

    /// Card slots per page
    #[arg(long, value_name = "N")]
    pub cards_per_page: Option<u32>,

    /// Uniform page margin in millimeters
    #[arg(long, value_name = "MM")]
    pub margin: Option<f64>,

    /// Reserve a 3mm bleed inset
    #[arg(long)]
    pub bleed: bool,

    /// Output the full composition as JSON
    #[arg(long)]
    pub json: bool,
}

/// CLI-facing paper sizes
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PaperValue {
    /// 210 x 297 mm
    A4,
    /// 216 x 279 mm
    Letter,
    /// 148 x 210 mm
    A5,
}

impl From<PaperValue> for PaperSize {
    fn from(value: PaperValue) -> Self {
        match value {
            PaperValue::A4 => Self::A4,
            PaperValue::Letter => Self::Letter,
            PaperValue::A5 => Self::A5,
        }
    }
}

impl PrintArgs {
    /// Execute the print command
    pub fn execute(&self, store: &CliStore, config: &Config) -> Result<()> {
        let Some(template) = store.template(&self.template_id)? else {
            bail!("Template not found: {}", self.template_id);
        };

        // Config file defaults, overridden per flag
        let mut print_config = config.print.clone();
        if let Some(copies) = self.copies {
            print_config.copies = copies;
        }
        if let Some(paper) = self.paper {
            print_config.paper_size = paper.into();
        }
        if self.landscape {
            print_config.orientation = Orientation::Landscape;
        }
        if let Some(cards_per_page) = self.cards_per_page {
            print_config.cards_per_page = cards_per_page;
        }
        if let Some(margin) = self.margin {
            print_config.margins = Margins::uniform(margin);
        }
        if self.bleed {
            print_config.include_bleed_area = true;
        }

        let composition = print::compose(&template.card, &print_config)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&composition)?);
            return Ok(());
        }

        print_summary(&template.name, &print_config, &composition);
        Ok(())
    }
}

fn print_summary(name: &str, config: &PrintConfig, composition: &print::PageComposition) {
    println!("Print layout for '{name}'");
    println!(
        "  Paper: {:.0} x {:.0} mm, grid {} x {}",
        composition.paper_width_mm, composition.paper_height_mm, composition.cols, composition.rows
    );
    println!(
        "  Slot: {:.1} x {:.1} px, scale {:.3}",
        composition.slot_width_px, composition.slot_height_px, composition.scale
    );
    println!(
        "  {} copies x {} per page = {} pages",
        config.copies,
        config.cards_per_page,
        composition.pages.len()
    );
    for page in &composition.pages {
        println!("    Page {}: {} card(s)", page.index + 1, page.slots.len());
    }
}
