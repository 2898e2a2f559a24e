//! Assetra
//!
//! Assetra is the renter-side cart and checkout engine for a peer-to-peer rental marketplace.
//! It tracks what a renter wants to borrow, the dates they want it for, and what the whole
//! order costs once every item has been dated.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod items;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod rental;
pub mod storefront;
pub mod wishlist;
