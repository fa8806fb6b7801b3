pub mod assessment;
pub mod care_plan;
pub mod extraction;
pub mod face_sheet;
pub mod record;
pub mod usage;
