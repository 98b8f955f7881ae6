//! Sea-ORM entities for the catalog tables

pub mod brand;
pub mod product;
pub mod seller;
