//! Storewise
//!
//! Storewise compares grocery prices across stores. Given a shopping list where
//! each product is sold by some subset of stores, it ranks the stores by how
//! much of the list they cover and what that costs, recommends one store to
//! shop at, and lists what has to be bought elsewhere.

pub mod allocation;
pub mod fixtures;
pub mod items;
pub mod list;
pub mod meals;
pub mod offers;
pub mod prelude;
pub mod products;
pub mod report;
pub mod stores;
pub mod utils;
