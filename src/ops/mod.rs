pub mod compose;
pub mod emit;
pub mod line_edit;
pub mod reduce;
pub mod time_ops;
