pub mod category;
pub mod commands;
pub mod model;
