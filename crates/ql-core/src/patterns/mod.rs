//! Design patterns shared by the term structures.

pub mod visitor;
