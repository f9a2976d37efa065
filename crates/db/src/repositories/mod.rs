pub mod illegal_construction_repo;
pub mod survey_repo;

pub use illegal_construction_repo::IllegalConstructionRepo;
pub use survey_repo::SurveyRepo;
