//! Renter journeys through the storefront, using the bundled catalog.

use std::path::PathBuf;

use assetra::prelude::*;
use jiff::civil::date;
use rusty_money::{Money, iso::INR};
use testresult::TestResult;

fn catalog() -> Result<Catalog, CatalogError> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/catalog/default.yml");

    Catalog::load(path)
}

fn add(store: &mut Storefront, catalog: &Catalog, id: &str, quantity: u32) -> TestResult {
    store.add_product(catalog.product(&ProductId::new(id))?, quantity)?;

    Ok(())
}

#[test]
fn bundled_catalog_loads() -> TestResult {
    let catalog = catalog()?;

    assert_eq!(catalog.len(), 5);
    assert_eq!(catalog.currency()?, INR);

    let projector = catalog.product(&ProductId::new("projector"))?;

    assert_eq!(projector.unit_price, Money::from_minor(899_50, INR));

    Ok(())
}

#[test]
fn three_day_camera_rental_totals_6500() -> TestResult {
    let catalog = catalog()?;
    let mut store = Storefront::new(catalog.currency()?);
    let camera = ProductId::new("camera");

    add(&mut store, &catalog, "camera", 1)?;

    let mut draft = store.edit_rental(&camera)?;
    draft.set_start(date(2024, 7, 1))?;
    draft.choose_preset(RentalPreset::ThreeDays);

    let preview = draft
        .preview(store.cart().get(&camera).ok_or("camera missing from cart")?)?
        .ok_or("expected a preview once dates are chosen")?;

    assert_eq!(preview.total(), Money::from_minor(6_500_00, INR));

    let detail = store.save_rental(&draft)?;

    assert_eq!(detail.end(), date(2024, 7, 3));

    let checkout = store.proceed_to_checkout()?;

    assert_eq!(checkout.rent_total(), Money::from_minor(1_500_00, INR));
    assert_eq!(checkout.deposit_total(), Money::from_minor(5_000_00, INR));
    assert_eq!(checkout.grand_total(), Money::from_minor(6_500_00, INR));

    Ok(())
}

#[test]
fn picking_end_date_first_then_start() -> TestResult {
    let catalog = catalog()?;
    let mut store = Storefront::new(catalog.currency()?);
    let tent = ProductId::new("tent");

    add(&mut store, &catalog, "tent", 1)?;

    let mut draft = store.edit_rental(&tent)?;
    draft.set_end(date(2024, 7, 7))?;

    assert_eq!(draft.days(), None);
    assert!(draft.preview(store.cart().get(&tent).ok_or("tent missing")?)?.is_none());

    draft.set_start(date(2024, 7, 1))?;

    let detail = store.save_rental(&draft)?;

    assert_eq!(detail.days(), RentalPreset::OneWeek.days());

    // default deposit applies: 300 x 7 + 5000
    let quote = store.quote(&tent)?.ok_or("expected a quote")?;

    assert_eq!(quote.total(), Money::from_minor(7_100_00, INR));

    Ok(())
}

#[test]
fn mixed_cart_gates_then_places_order() -> TestResult {
    let catalog = catalog()?;
    let mut store = Storefront::new(catalog.currency()?);

    add(&mut store, &catalog, "camera", 1)?;
    add(&mut store, &catalog, "drill", 2)?;
    add(&mut store, &catalog, "kayak", 1)?;

    let blocked = store.place_order(&SimulatedOrderPlacement);

    assert!(matches!(
        blocked,
        Err(StorefrontError::Checkout(ref error)) if error.to_string() == "3 items need rental dates"
    ));

    for (id, preset) in [
        ("camera", RentalPreset::ThreeDays),
        ("drill", RentalPreset::OneDay),
    ] {
        let mut draft = store.edit_rental(&ProductId::new(id))?;
        draft.set_start(date(2024, 8, 15))?;
        draft.choose_preset(preset);
        store.save_rental(&draft)?;
    }

    assert_eq!(store.incomplete_items().as_slice(), &[ProductId::new("kayak")]);

    let mut draft = store.edit_rental(&ProductId::new("kayak"))?;
    draft.set_start(date(2024, 8, 15))?;
    draft.choose_preset(RentalPreset::FifteenDays);
    store.save_rental(&draft)?;

    let checkout = store.proceed_to_checkout()?;

    // camera 1500 + 5000, drill 150 + 1000, kayak 18000 + 0
    assert_eq!(checkout.grand_total(), Money::from_minor(25_650_00, INR));

    let confirmation = store.place_order(&SimulatedOrderPlacement)?;

    assert_eq!(confirmation.item_count, 3);
    assert_eq!(confirmation.grand_total, checkout.grand_total());
    assert!(store.cart().is_empty());
    assert!(store.rentals().is_empty());

    Ok(())
}

#[test]
fn removing_item_unblocks_checkout() -> TestResult {
    let catalog = catalog()?;
    let mut store = Storefront::new(catalog.currency()?);
    let camera = ProductId::new("camera");

    add(&mut store, &catalog, "camera", 1)?;
    add(&mut store, &catalog, "tent", 1)?;

    let mut draft = store.edit_rental(&camera)?;
    draft.set_start(date(2024, 7, 1))?;
    draft.choose_preset(RentalPreset::OneDay);
    store.save_rental(&draft)?;

    assert!(store.proceed_to_checkout().is_err());

    let request = store
        .request_removal(&ProductId::new("tent"))
        .ok_or("expected a removal request")?;
    let _removed = store.confirm_removal(request);

    let checkout = store.proceed_to_checkout()?;

    assert_eq!(checkout.len(), 1);
    assert_eq!(checkout.grand_total(), Money::from_minor(5_500_00, INR));

    Ok(())
}

#[test]
fn rental_dates_survive_editing_and_cancelling() -> TestResult {
    let catalog = catalog()?;
    let mut store = Storefront::new(catalog.currency()?);
    let camera = ProductId::new("camera");

    add(&mut store, &catalog, "camera", 1)?;

    let mut draft = store.edit_rental(&camera)?;
    draft.set_start(date(2024, 7, 1))?;
    draft.choose_preset(RentalPreset::OneMonth);
    store.save_rental(&draft)?;

    let mut reopened = store.edit_rental(&camera)?;

    assert_eq!(reopened.days(), Some(RentalPreset::OneMonth.days()));

    reopened.choose_preset(RentalPreset::OneDay);
    drop(reopened);

    let saved = store.rentals().get(&camera).ok_or("rental should be kept")?;

    assert_eq!(saved.days(), RentalPreset::OneMonth.days());
    assert_eq!(saved.end(), date(2024, 7, 30));

    Ok(())
}

#[test]
fn wishlist_keeps_copy_of_cart_item() -> TestResult {
    let catalog = catalog()?;
    let mut store = Storefront::new(catalog.currency()?);
    let mut wishlist = InMemoryWishlist::new();

    add(&mut store, &catalog, "projector", 1)?;
    store.save_for_later(&ProductId::new("projector"), &mut wishlist)?;

    assert_eq!(wishlist.len(), 1);
    assert_eq!(store.cart().len(), 1);

    Ok(())
}
