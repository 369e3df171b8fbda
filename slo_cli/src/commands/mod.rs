pub mod evaluate;
pub mod list;
pub mod validate;
