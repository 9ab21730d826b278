//! Template management commands.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use crate::cli::CliStore;
use crate::clock::SystemClock;
use crate::models::{Card, NewTemplate};

/// Manage card templates
#[derive(Debug, Clone, Args)]
pub struct TemplateArgs {
    /// Template subcommand
    #[command(subcommand)]
    pub command: TemplateCommand,
}

/// Template subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum TemplateCommand {
    /// List stored templates
    List(ListArgs),
    /// Create a template with a fresh default card
    New(NewArgs),
    /// Print one template as JSON
    Show(ShowArgs),
    /// Delete a template
    Delete(DeleteArgs),
}

/// List stored templates
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Create a template with a fresh default card
#[derive(Debug, Clone, Args)]
pub struct NewArgs {
    /// Template name
    #[arg(short, long, value_name = "NAME")]
    pub name: String,

    /// Long description
    #[arg(short, long, value_name = "TEXT", default_value = "")]
    pub description: String,

    /// Organizational category
    #[arg(short, long, value_name = "CATEGORY", default_value = "general")]
    pub category: String,

    /// Comma-separated tags (e.g., "feedback,retro")
    #[arg(short, long, value_name = "TAGS")]
    pub tags: Option<String>,

    /// Mark the template as public
    #[arg(long)]
    pub public: bool,
}

/// Print one template as JSON
#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    /// Template id
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Delete a template
#[derive(Debug, Clone, Args)]
pub struct DeleteArgs {
    /// Template id
    #[arg(value_name = "ID")]
    pub id: String,
}

impl TemplateArgs {
    /// Execute the template command
    pub fn execute(&self, store: &mut CliStore) -> Result<()> {
        match &self.command {
            TemplateCommand::List(args) => args.execute(store),
            TemplateCommand::New(args) => args.execute(store),
            TemplateCommand::Show(args) => args.execute(store),
            TemplateCommand::Delete(args) => args.execute(store),
        }
    }
}

impl ListArgs {
    fn execute(&self, store: &CliStore) -> Result<()> {
        let templates = store.templates()?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&templates)?);
            return Ok(());
        }

        if templates.is_empty() {
            println!("No templates found.");
            return Ok(());
        }
        println!("Stored templates ({}):\n", templates.len());
        for template in &templates {
            println!("  {} [{}]", template.name, template.id);
            println!("    Category: {}", template.category);
            if !template.tags.is_empty() {
                println!("    Tags: {}", template.tags.join(", "));
            }
            println!("    Updated: {}", template.updated_at.to_rfc3339());
            println!();
        }
        Ok(())
    }
}

impl NewArgs {
    fn execute(&self, store: &mut CliStore) -> Result<()> {
        let tags = self
            .tags
            .as_deref()
            .map(|t| t.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_default();

        let template = store.save_template(NewTemplate {
            name: self.name.clone(),
            description: self.description.clone(),
            card: Card::new(self.name.clone(), &SystemClock),
            category: self.category.clone(),
            tags,
            is_public: self.public,
        })?;

        println!("Created template '{}' with id {}", template.name, template.id);
        Ok(())
    }
}

impl ShowArgs {
    fn execute(&self, store: &CliStore) -> Result<()> {
        let Some(template) = store.template(&self.id)? else {
            bail!("Template not found: {}", self.id);
        };
        println!("{}", serde_json::to_string_pretty(&template)?);
        Ok(())
    }
}

impl DeleteArgs {
    fn execute(&self, store: &mut CliStore) -> Result<()> {
        if store.delete_template(&self.id)? {
            println!("Deleted template {}", self.id);
            Ok(())
        } else {
            bail!("Template not found: {}", self.id);
        }
    }
}
