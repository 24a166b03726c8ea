//! CLI Tooling
//!
//! Command-line surface over the catalog service. Commands return their output as
//! a string (JSON unless a table was requested) so they can be driven from tests.

use crate::catalog::{Catalog, NewCategory, NewProduct, NewSubCategory};
use crate::config::{CatalogConfig, ConfigLoader};
use crate::error::CatalogError;
use crate::seed;
use crate::tree::mutate::ProductPatch;
use crate::tree::{Category, ContainerFlags};
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

/// Catalog CLI - category tree management
#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Manage categories, subcategories, and products")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Load configuration and apply logging overrides from the command line.
    pub fn resolve_config(&self) -> Result<CatalogConfig, CatalogError> {
        let mut config = ConfigLoader::load(self.config.as_deref())?;
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Category operations
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Subcategory operations
    #[command(name = "subcategory")]
    SubCategory {
        #[command(subcommand)]
        command: SubCategoryCommands,
    },
    /// Product operations
    Product {
        #[command(subcommand)]
        command: ProductCommands,
    },
    /// Insert the demo catalog if the store is empty
    Seed,
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List {
        /// Output format (json or table)
        #[arg(long, default_value = "json")]
        format: String,
    },
    /// Show one category with its whole tree
    Get { category_id: String },
    /// Create a category
    Create {
        name: String,
        /// Category id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
    },
    /// Rename a category
    Rename { category_id: String, name: String },
    /// Delete a category and everything under it
    Delete { category_id: String },
}

#[derive(Subcommand)]
pub enum SubCategoryCommands {
    /// Add a subcategory (at the root unless --parent is given)
    Add {
        category_id: String,
        name: String,
        /// Subcategory id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
        /// Parent subcategory id
        #[arg(long)]
        parent: Option<String>,
        /// Give the subcategory a product list
        #[arg(long)]
        has_products: bool,
        /// Give the subcategory a child subcategory list
        #[arg(long)]
        has_sub_categories: bool,
    },
    /// Show one subcategory
    Get {
        category_id: String,
        sub_category_id: String,
    },
    /// Rename a subcategory
    Rename {
        category_id: String,
        sub_category_id: String,
        name: String,
    },
    /// Delete a subcategory and its descendants
    Delete {
        category_id: String,
        sub_category_id: String,
    },
}

#[derive(Subcommand)]
pub enum ProductCommands {
    /// Show a product found anywhere in a category
    Get {
        category_id: String,
        product_id: String,
    },
    /// Add a product to a subcategory
    Add {
        category_id: String,
        sub_category_id: String,
        name: String,
        num_material: String,
        #[arg(long, default_value = "0")]
        stock: u32,
    },
    /// Update a product's name and/or stock
    Update {
        category_id: String,
        sub_category_id: String,
        product_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        stock: Option<u32>,
    },
    /// Remove a product from a subcategory
    Delete {
        category_id: String,
        sub_category_id: String,
        product_id: String,
    },
}

/// CLI context holding the configured catalog
pub struct CliContext {
    catalog: Catalog,
    config: CatalogConfig,
}

impl CliContext {
    /// Open the configured store and seed it when enabled.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let store = config.storage.open_store()?;
        if config.seed {
            seed::seed_if_empty(store.as_ref())?;
        }
        let catalog = Catalog::with_policy(store, config.policy);
        Ok(Self { catalog, config })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, CatalogError> {
        match command {
            Commands::Category { command } => self.execute_category(command),
            Commands::SubCategory { command } => self.execute_sub_category(command),
            Commands::Product { command } => self.execute_product(command),
            Commands::Seed => {
                let inserted = seed::seed_if_empty(self.catalog.store().as_ref())?;
                Ok(json!({ "inserted": inserted }).to_string())
            }
            Commands::Config => toml::to_string_pretty(&self.config)
                .map_err(|e| CatalogError::Output(format!("Failed to render config: {}", e))),
        }
    }

    fn execute_category(&self, command: &CategoryCommands) -> Result<String, CatalogError> {
        match command {
            CategoryCommands::List { format } => {
                let categories = self.catalog.list_categories()?;
                match format.as_str() {
                    "table" => Ok(format_category_table(&categories)),
                    "json" => render(&categories),
                    other => Err(CatalogError::ConfigError(format!(
                        "Invalid format: {} (must be 'json' or 'table')",
                        other
                    ))),
                }
            }
            CategoryCommands::Get { category_id } => render(&self.catalog.get_category(category_id)?),
            CategoryCommands::Create { name, id } => {
                let id = self.catalog.create_category(NewCategory {
                    id: id.clone(),
                    name: name.clone(),
                    sub_categories: Vec::new(),
                })?;
                Ok(json!({ "id": id }).to_string())
            }
            CategoryCommands::Rename { category_id, name } => {
                self.catalog.rename_category(category_id, name)?;
                Ok(json!({ "renamed": category_id }).to_string())
            }
            CategoryCommands::Delete { category_id } => {
                self.catalog.delete_category(category_id)?;
                Ok(json!({ "deleted": category_id }).to_string())
            }
        }
    }

    fn execute_sub_category(&self, command: &SubCategoryCommands) -> Result<String, CatalogError> {
        match command {
            SubCategoryCommands::Add {
                category_id,
                name,
                id,
                parent,
                has_products,
                has_sub_categories,
            } => {
                let id = self.catalog.add_sub_category(
                    category_id,
                    NewSubCategory {
                        id: id.clone(),
                        name: name.clone(),
                        parent_sub_category_id: parent.clone(),
                    },
                    ContainerFlags {
                        has_products: *has_products,
                        has_sub_categories: *has_sub_categories,
                    },
                )?;
                Ok(json!({ "id": id }).to_string())
            }
            SubCategoryCommands::Get {
                category_id,
                sub_category_id,
            } => render(&self.catalog.get_sub_category(category_id, sub_category_id)?),
            SubCategoryCommands::Rename {
                category_id,
                sub_category_id,
                name,
            } => render(
                &self
                    .catalog
                    .rename_sub_category(category_id, sub_category_id, name)?,
            ),
            SubCategoryCommands::Delete {
                category_id,
                sub_category_id,
            } => {
                self.catalog
                    .delete_sub_category(category_id, sub_category_id)?;
                Ok(json!({ "deleted": sub_category_id }).to_string())
            }
        }
    }

    fn execute_product(&self, command: &ProductCommands) -> Result<String, CatalogError> {
        match command {
            ProductCommands::Get {
                category_id,
                product_id,
            } => render(&self.catalog.get_product(category_id, product_id)?),
            ProductCommands::Add {
                category_id,
                sub_category_id,
                name,
                num_material,
                stock,
            } => {
                let id = self.catalog.add_product(
                    category_id,
                    sub_category_id,
                    NewProduct {
                        name: name.clone(),
                        num_material: num_material.clone(),
                        stock: *stock,
                    },
                )?;
                Ok(json!({ "id": id }).to_string())
            }
            ProductCommands::Update {
                category_id,
                sub_category_id,
                product_id,
                name,
                stock,
            } => {
                let patch = ProductPatch {
                    name: name.clone(),
                    stock: *stock,
                };
                if patch.is_empty() {
                    info!(product_id = %product_id, "update with no fields; rewriting unchanged");
                }
                render(
                    &self
                        .catalog
                        .update_product(category_id, sub_category_id, product_id, patch)?,
                )
            }
            ProductCommands::Delete {
                category_id,
                sub_category_id,
                product_id,
            } => {
                self.catalog
                    .remove_product(category_id, sub_category_id, product_id)?;
                Ok(json!({ "deleted": product_id }).to_string())
            }
        }
    }
}

fn render<T: Serialize>(value: &T) -> Result<String, CatalogError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CatalogError::Output(format!("Failed to render JSON: {}", e)))
}

fn count_nodes(category: &Category) -> (usize, usize) {
    crate::tree::navigator::walk(category).fold((0, 0), |(nodes, products), node| {
        (nodes + 1, products + node.product_list().len())
    })
}

/// Render categories as a table with subtree counts.
pub fn format_category_table(categories: &[Category]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Name", "Subcategories", "Products"]);
    for category in categories {
        let (nodes, products) = count_nodes(category);
        table.add_row(vec![
            category.id.clone(),
            category.name.clone(),
            nodes.to_string(),
            products.to_string(),
        ]);
    }
    table.to_string()
}
