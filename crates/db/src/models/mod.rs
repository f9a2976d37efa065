pub mod illegal_construction;
pub mod survey;
