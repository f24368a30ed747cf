pub mod axis;
pub mod history;
pub mod scaling;
