//! Subcommands

use std::{io, path::Path};

use assetra::{
    pricing::default_security_deposit,
    prelude::*,
};
use clap::{Args, Subcommand};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;
use tracing::info;

use crate::args::{ItemArg, RentalArg};

/// Errors surfaced to the command line.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Storefront(#[from] StorefrontError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// List the products available to rent
    Catalog,

    /// Price a cart without placing an order
    Quote(CartArgs),

    /// Price a cart and place the order
    Order(CartArgs),
}

/// Cart contents and rental dates.
#[derive(Debug, Args)]
pub(crate) struct CartArgs {
    /// Product to rent, as ID or ID:QUANTITY (repeatable)
    #[arg(long = "item", value_name = "ID[:QUANTITY]", required = true)]
    pub items: Vec<ItemArg>,

    /// Rental dates, as ID=START+DAYS or ID=START..END (repeatable)
    #[arg(long = "rental", value_name = "ID=PERIOD")]
    pub rentals: Vec<RentalArg>,
}

/// Run a subcommand against the catalog at `catalog_path`.
pub(crate) fn run(
    command: &Commands,
    catalog_path: &Path,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let catalog = Catalog::load(catalog_path)?;

    info!(path = %catalog_path.display(), products = catalog.len(), "loaded catalog");

    match command {
        Commands::Catalog => write_catalog(out, &catalog),
        Commands::Quote(cart) => {
            let store = build_storefront(&catalog, cart)?;

            write_quote(out, &store)
        }
        Commands::Order(cart) => {
            let mut store = build_storefront(&catalog, cart)?;

            write_quote(out, &store)?;

            let confirmation = store.place_order(&SimulatedOrderPlacement)?;

            writeln!(out, "{}", confirmation.message())?;

            Ok(())
        }
    }
}

fn build_storefront(catalog: &Catalog, cart: &CartArgs) -> Result<Storefront, CliError> {
    let mut store = Storefront::new(catalog.currency()?);

    for item in &cart.items {
        store.add_product(catalog.product(&item.id)?, item.quantity)?;
    }

    for rental in &cart.rentals {
        rental.apply(&mut store)?;
    }

    Ok(store)
}

fn write_catalog(out: &mut impl io::Write, catalog: &Catalog) -> Result<(), CliError> {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Title", "Per day", "Deposit", "Owner", "Location"]);

    for product in catalog.iter() {
        let deposit = match product.security_deposit {
            Some(deposit) => deposit.to_string(),
            None => format!(
                "{} (default)",
                default_security_deposit(product.unit_price.currency())?
            ),
        };

        builder.push_record([
            product.id.to_string(),
            product.title.clone(),
            product.unit_price.to_string(),
            deposit,
            product.owner.name.clone(),
            product.owner.location.clone().unwrap_or_default(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..4), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

fn write_quote(out: &mut impl io::Write, store: &Storefront) -> Result<(), CliError> {
    let mut builder = Builder::default();

    builder.push_record([
        "#", "Item", "Qty", "Start", "End", "Days", "Rent", "Deposit", "Total",
    ]);

    for (idx, item) in store.cart().iter().enumerate() {
        let mut row = vec![
            format!("#{:<3}", idx + 1),
            item.name().to_string(),
            item.quantity().to_string(),
        ];

        match (store.rentals().get(item.id()), store.quote(item.id())?) {
            (Some(rental), Some(quote)) => row.extend([
                rental.start().to_string(),
                rental.end().to_string(),
                rental.days().to_string(),
                quote.rent_total().to_string(),
                quote.security_deposit().to_string(),
                quote.total().to_string(),
            ]),
            _ => row.extend([
                "-".to_string(),
                "-".to_string(),
                "-".to_string(),
                format!("{} / day", item.unit_price()),
                "-".to_string(),
                "needs dates".to_string(),
            ]),
        }

        builder.push_record(row);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(6..9), Alignment::right());

    writeln!(out, "{table}")?;

    match store.proceed_to_checkout() {
        Ok(checkout) => {
            writeln!(out, " Rent:     {}", checkout.rent_total())?;
            writeln!(out, " Deposits: {}", checkout.deposit_total())?;
            writeln!(out, " Total:    {}", checkout.grand_total())?;
        }
        Err(StorefrontError::Checkout(
            blocked @ (CheckoutError::EmptyCart | CheckoutError::IncompleteCart { .. }),
        )) => {
            writeln!(out, " {blocked}")?;
        }
        Err(error) => return Err(error.into()),
    }

    Ok(())
}
