use std::path::Path;

use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use tracing::{error, info};

use crate::{
    cli::args::{Args, CatalogCommands, Commands},
    services::{CartService, CartServiceError, CatalogService},
    utils::{
        config::Config,
        formatting::{
            format_cart_table, format_date, format_money, format_product_detail,
            format_product_table,
        },
        validation::parse_price,
    },
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
static CART: Emoji<'_, '_> = Emoji("🛒 ", "");

pub struct CliApp {
    catalog_service: CatalogService,
}

impl CliApp {
    pub fn new(config: &Config, catalog_override: Option<&str>) -> Result<Self> {
        // CLI flag wins over the environment
        let catalog_path = catalog_override.or(config.catalog_path.as_deref());

        let catalog_service = match catalog_path {
            Some(path) => CatalogService::from_file(Path::new(path))
                .context("Failed to load catalog file")?,
            None => CatalogService::with_defaults()
                .context("Failed to build the default catalog")?,
        };

        Ok(Self { catalog_service })
    }

    pub fn run(&self, args: Args) -> Result<()> {
        match args.command.unwrap_or(Commands::Shop) {
            Commands::Shop => self.handle_shop(),
            Commands::Catalog { command } => self.handle_catalog_command(command),
        }
    }

    fn handle_shop(&self) -> Result<()> {
        let mut cart_service = CartService::new();
        let mut session = ShopSession::new(&self.catalog_service, &mut cart_service);
        session.run()
    }

    fn handle_catalog_command(&self, command: CatalogCommands) -> Result<()> {
        match command {
            CatalogCommands::List => {
                println!(
                    "{} {}",
                    INFO,
                    style(format!("{} products", self.catalog_service.len())).bold()
                );
                println!("{}", format_product_table(self.catalog_service.products()));
            }
            CatalogCommands::Show { title } => match self.catalog_service.find(&title) {
                Some(product) => {
                    println!("{} {}", INFO, style("Product Details").bold().cyan());
                    println!("{}", format_product_detail(product));
                }
                None => {
                    println!(
                        "{} No product titled '{}' in the catalog",
                        CROSS,
                        style(&title).red()
                    );
                }
            },
            CatalogCommands::Search { query } => {
                let results = self.catalog_service.search(&query);
                if results.is_empty() {
                    println!("{} No products matching '{}'", INFO, query);
                } else {
                    let products: Vec<_> = results.into_iter().cloned().collect();
                    println!("{}", format_product_table(&products));
                }
            }
        }

        Ok(())
    }
}

/// The view layer of a shopping session.
///
/// Translates menu selections into cart service calls and re-renders cart
/// state after every mutation. All cart state lives in the store itself; menu
/// markers like "(in cart)" are derived from it on every draw, never stored.
pub struct ShopSession<'a> {
    catalog: &'a CatalogService,
    cart: &'a mut CartService,
    theme: ColorfulTheme,
}

impl<'a> ShopSession<'a> {
    pub fn new(catalog: &'a CatalogService, cart: &'a mut CartService) -> Self {
        Self {
            catalog,
            cart,
            theme: ColorfulTheme::default(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        println!("{}{}", CART, style("Welcome to the shop!").bold().cyan());
        println!(
            "{}",
            style(format!(
                "Session started at {}",
                format_date(&self.cart.cart().started_at())
            ))
            .dim()
        );
        info!("Shopping session started");

        loop {
            // The badge on the cart icon: total item count, recomputed on
            // every draw.
            let badge = self.cart.cart().total_count();
            let options = vec![
                "Browse products".to_string(),
                format!("View cart ({})", badge),
                "Exit".to_string(),
            ];

            let selection = Select::with_theme(&self.theme)
                .with_prompt("What would you like to do?")
                .items(&options)
                .default(0)
                .interact()?;

            match selection {
                0 => self.browse_products()?,
                1 => self.view_cart()?,
                _ => break,
            }
        }

        self.print_session_summary();
        info!("Shopping session ended");
        Ok(())
    }

    fn browse_products(&mut self) -> Result<()> {
        loop {
            // "(in cart)" is derived from cart contents on every draw, so a
            // marker reverts as soon as its item leaves the cart.
            let mut labels: Vec<String> = self
                .catalog
                .products()
                .iter()
                .map(|product| {
                    if self.cart.cart().contains(&product.title) {
                        format!(
                            "{} - {} {}",
                            product.title,
                            format_money(product.price),
                            style("(in cart)").green()
                        )
                    } else {
                        format!("{} - {}", product.title, format_money(product.price))
                    }
                })
                .collect();
            labels.push("Add custom item".to_string());
            labels.push("Back".to_string());

            let selection = Select::with_theme(&self.theme)
                .with_prompt("Pick a product to add")
                .items(&labels)
                .default(0)
                .interact()?;

            if selection == labels.len() - 1 {
                return Ok(());
            }
            if selection == labels.len() - 2 {
                self.add_custom_item()?;
                continue;
            }

            let product = self.catalog.products()[selection].clone();
            self.cart.add_product(&product);
            println!(
                "{} Added {} to your cart",
                CHECKMARK,
                style(&product.title).green()
            );
        }
    }

    fn add_custom_item(&mut self) -> Result<()> {
        let title: String = Input::with_theme(&self.theme)
            .with_prompt("Item title")
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.trim().is_empty() {
                    Err("Title must not be empty")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;

        let price: String = Input::with_theme(&self.theme)
            .with_prompt("Unit price")
            .validate_with(|input: &String| -> Result<(), &str> {
                if parse_price(input.trim()).is_ok() {
                    Ok(())
                } else {
                    Err("Enter a non-negative decimal like 10 or 10.99")
                }
            })
            .interact_text()?;

        match self.cart.add_item(title.trim(), price.trim()) {
            Ok(()) => {
                println!(
                    "{} Added {} to your cart",
                    CHECKMARK,
                    style(title.trim()).green()
                );
            }
            Err(e) => self.print_error(&e),
        }

        Ok(())
    }

    fn view_cart(&mut self) -> Result<()> {
        loop {
            println!("\n{}\n", format_cart_table(self.cart.cart()));

            if self.cart.cart().is_empty() {
                return Ok(());
            }

            let actions = [
                "+ Increase quantity",
                "- Decrease quantity",
                "Remove item",
                "Close cart",
            ];
            let action = Select::with_theme(&self.theme)
                .with_prompt("Cart actions")
                .items(&actions)
                .default(3)
                .interact()?;

            if action == 3 {
                return Ok(());
            }

            // Bind the chosen line's title here, at the call site.
            let title = match self.pick_line_item()? {
                Some(title) => title,
                None => continue,
            };

            match action {
                0 => {
                    if let Err(e) = self.cart.increment_quantity(&title) {
                        self.print_error(&e);
                    }
                }
                1 => {
                    let at_floor = self
                        .cart
                        .cart()
                        .get(&title)
                        .map(|item| item.quantity == 1)
                        .unwrap_or(false);
                    if at_floor {
                        println!(
                            "{} Quantity stays at 1; use 'Remove item' to drop {}",
                            WARNING,
                            style(&title).yellow()
                        );
                    } else if let Err(e) = self.cart.decrement_quantity(&title) {
                        self.print_error(&e);
                    }
                }
                2 => {
                    let confirm = Confirm::with_theme(&self.theme)
                        .with_prompt(format!("Remove '{}' from the cart?", title))
                        .default(false)
                        .interact()?;

                    if confirm {
                        match self.cart.remove_item(&title) {
                            Ok(()) => {
                                println!(
                                    "{} Removed {} from your cart",
                                    CHECKMARK,
                                    style(&title).green()
                                );
                            }
                            Err(e) => self.print_error(&e),
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn pick_line_item(&self) -> Result<Option<String>> {
        let mut labels: Vec<String> = self
            .cart
            .cart()
            .items()
            .iter()
            .map(|item| format!("{} (x{})", item.title, item.quantity))
            .collect();
        labels.push("Cancel".to_string());

        let selection = Select::with_theme(&self.theme)
            .with_prompt("Which item?")
            .items(&labels)
            .default(0)
            .interact()?;

        if selection == labels.len() - 1 {
            return Ok(None);
        }

        Ok(Some(self.cart.cart().items()[selection].title.clone()))
    }

    fn print_session_summary(&self) {
        let stats = self.cart.statistics();

        if stats.total_quantity == 0 {
            println!("{} You leave empty-handed. See you next time!", INFO);
            return;
        }

        println!("{} {}", INFO, style("Session summary").bold().cyan());
        for line in self.cart.lines() {
            println!(
                "  {} x{} = {}",
                line.title,
                line.quantity,
                format_money(line.line_total)
            );
        }
        println!(
            "{}: {} across {} items",
            style("Grand total").bold(),
            style(format_money(stats.grand_total)).green(),
            stats.total_quantity
        );
    }

    fn print_error(&self, err: &CartServiceError) {
        println!("{} {}", CROSS, style(err).red());
        error!("Cart action failed: {}", err);
    }
}
