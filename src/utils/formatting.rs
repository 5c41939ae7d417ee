use chrono::{DateTime, Local, Utc};
use console::style;
use tabled::{Table, Tabled, settings::{Style, Alignment}};

use crate::models::cart::Cart;
use crate::models::product::Product;

#[derive(Tabled)]
struct CartTableRow {
    #[tabled(rename = "Item")]
    title: String,
    #[tabled(rename = "Unit Price")]
    unit_price: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Line Total")]
    line_total: String,
    #[tabled(rename = "Added")]
    added: String,
}

#[derive(Tabled)]
struct ProductTableRow {
    #[tabled(rename = "Product")]
    title: String,
    #[tabled(rename = "Price")]
    price: String,
}

pub fn format_money(amount: f64) -> String {
    format!("${:.2}", amount)
}

pub fn format_cart_table(cart: &Cart) -> String {
    if cart.is_empty() {
        return style("Your cart is empty").dim().to_string();
    }

    let rows: Vec<CartTableRow> = cart
        .items()
        .iter()
        .map(|item| CartTableRow {
            title: truncate_title(&item.title),
            unit_price: format_money(item.unit_price),
            quantity: item.quantity,
            line_total: format_money(item.line_total()),
            added: format_date_short(&item.added_at),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left());

    format!(
        "{}\n{}: {}",
        table,
        style("Grand total").bold(),
        style(format_money(cart.total_price())).green()
    )
}

pub fn format_product_table(products: &[Product]) -> String {
    if products.is_empty() {
        return style("No products in the catalog").dim().to_string();
    }

    let rows: Vec<ProductTableRow> = products
        .iter()
        .map(|product| ProductTableRow {
            title: truncate_title(&product.title),
            price: format_money(product.price),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left());

    table.to_string()
}

pub fn format_product_detail(product: &Product) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{}: {}\n",
        style("Title").bold(),
        style(&product.title).green()
    ));
    output.push_str(&format!(
        "{}: {}\n",
        style("Price").bold(),
        style(format_money(product.price)).yellow()
    ));

    output
}

pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn format_date_short(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%H:%M").to_string()
}

fn truncate_title(title: &str) -> String {
    if title.len() > 30 {
        format!("{}...", &title[..27])
    } else {
        title.to_string()
    }
}
