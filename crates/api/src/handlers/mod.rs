pub mod illegal_constructions;
pub mod surveys;
