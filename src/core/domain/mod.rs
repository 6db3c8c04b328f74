pub mod error;
pub mod inventory;
pub mod model;
pub mod value_object;
