//! Plain-text views.

use std::io::{self, Write};

use shophub_core::{CartLine, Product};
use shophub_storefront::cart::CartStore;
use shophub_storefront::search::FilterSummary;
use shophub_storefront::session::SessionStore;
use shophub_storefront::state::ShopEvent;

/// One catalog row.
pub fn product(out: &mut impl Write, product: &Product) -> io::Result<()> {
    write!(out, "{:>4}  {}  {}", product.id, product.name, product.price)?;
    if let Some(original) = product.original_price.filter(|_| product.is_on_sale()) {
        write!(out, " (was {original}, -{}%)", product.discount_percent())?;
    }
    let stock = if product.in_stock {
        "In stock"
    } else {
        "Out of Stock"
    };
    writeln!(
        out,
        "  [{}] {:.1} ({} reviews)  {}  {stock}",
        product.category,
        product.rating,
        product.review_count,
        stars(product),
    )
}

fn stars(product: &Product) -> String {
    let full = usize::from(product.full_stars());
    format!("{}{}", "*".repeat(full), ".".repeat(5 - full.min(5)))
}

/// The product listing with its active-filter strip and result count.
pub fn product_list(
    out: &mut impl Write,
    labels: &[String],
    summary: FilterSummary,
    products: &[&Product],
) -> io::Result<()> {
    if !labels.is_empty() {
        writeln!(out, "Filters: {}", labels.join(" | "))?;
    }
    writeln!(out, "{summary}")?;

    if products.is_empty() {
        writeln!(out)?;
        writeln!(out, "No products found")?;
        writeln!(out, "Try adjusting your search or filters")?;
        return Ok(());
    }

    for p in products {
        product(out, p)?;
    }
    Ok(())
}

fn cart_line(out: &mut impl Write, line: &CartLine) -> io::Result<()> {
    writeln!(
        out,
        "{:>4}  {}  {} x {} = {}",
        line.product.id,
        line.product.name,
        line.product.price,
        line.quantity,
        line.line_total()
    )
}

/// The cart drawer.
pub fn cart(out: &mut impl Write, cart: &CartStore) -> io::Result<()> {
    if cart.is_empty() {
        writeln!(out, "Your cart is empty")?;
        return Ok(());
    }

    writeln!(out, "Shopping Cart ({} items)", cart.item_count())?;
    for line in cart.lines() {
        cart_line(out, line)?;
    }
    writeln!(out, "Total: {}", cart.total())
}

/// Account button and cart badge, as shown in the page header.
pub fn header(out: &mut impl Write, session: &SessionStore, cart: &CartStore) -> io::Result<()> {
    writeln!(
        out,
        "{}  |  Cart ({})",
        session.header_label(),
        cart.item_count()
    )
}

/// Toast notifications for the events a command produced.
pub fn toasts(out: &mut impl Write, events: &[ShopEvent]) -> io::Result<()> {
    for (title, description) in events.iter().filter_map(ShopEvent::toast) {
        writeln!(out, "{title}: {description}")?;
    }
    Ok(())
}
