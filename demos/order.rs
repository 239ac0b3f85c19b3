//! Ordering Demo
//!
//! Loads a menu fixture, prints the filtered menu, runs a short scripted
//! order against the cart, then checks out and prints the receipt.
//!
//! Use `-f` to load a menu fixture by name
//! Use `-c` to filter by category ("all" shows everything)
//! Use `-s` to search names and descriptions

use std::io;

use anyhow::Result;
use clap::Parser;
use mezze::{
    cart::{Cart, CartEvent},
    catalog::Catalog,
    fixtures::MenuSource,
    pricing::format_price,
    utils::DemoOrderArgs,
};

/// Ordering Demo
#[expect(clippy::print_stdout, reason = "Demo code")]
fn main() -> Result<()> {
    let args = DemoOrderArgs::parse();

    let catalog = MenuSource::new().load(&args.fixture)?;

    println!("Menu (category: {}, search: {:?})", args.category, args.search);

    for entry in catalog.filter(args.category, &args.search) {
        println!(
            "  [{:>2}] {:<20} {:>16}  {}",
            entry.id,
            entry.name,
            format_price(entry.price),
            entry.description
        );
    }

    let ids: Vec<u32> = catalog
        .filter(args.category, &args.search)
        .map(|entry| entry.id)
        .take(2)
        .collect();

    let Some(&first) = ids.first() else {
        println!("\nNothing matched; nothing to order.");
        return Ok(());
    };

    let mut cart = Cart::new(catalog.currency());

    notify(&catalog, cart.add(&catalog, first)?);
    show_cart(&cart, &catalog)?;

    notify(&catalog, cart.add(&catalog, first)?);
    show_cart(&cart, &catalog)?;

    if let Some(&second) = ids.get(1) {
        notify(&catalog, cart.add(&catalog, second)?);
        show_cart(&cart, &catalog)?;
    }

    if let Some(event) = cart.change_quantity(&catalog, first, -1) {
        notify(&catalog, event);
        show_cart(&cart, &catalog)?;
    }

    let receipt = cart.checkout(&catalog)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    receipt.write_to(&mut handle)?;

    println!("\nOrder placed. The cart is empty again: {} items.", cart.item_count());

    Ok(())
}

/// Prints the notification a toast would show for a cart event.
#[expect(clippy::print_stdout, reason = "Demo code")]
fn notify(catalog: &Catalog, event: CartEvent) {
    let name = |key| {
        catalog
            .get(key)
            .map_or("<unknown>", |entry| entry.name.as_str())
            .to_string()
    };

    match event {
        CartEvent::Added { entry, quantity } => {
            println!("\n+ {} added to the cart (x{quantity})", name(entry));
        }
        CartEvent::Removed { entry } => {
            println!("\n- {} removed from the cart", name(entry));
        }
        CartEvent::QuantityChanged { entry, quantity } => {
            println!("\n* {} quantity is now {quantity}", name(entry));
        }
    }
}

/// Prints the three cart surfaces: count badge, line list, grand total.
#[expect(clippy::print_stdout, reason = "Demo code")]
fn show_cart(cart: &Cart, catalog: &Catalog) -> Result<()> {
    let view = cart.view(catalog)?;

    println!("  cart [{}]", view.item_count);

    for line in &view.lines {
        println!(
            "    {:<20} x{:<2} {:>16}",
            line.name, line.quantity, line.line_total_display
        );
    }

    println!("  total: {}", view.total_display);

    Ok(())
}
