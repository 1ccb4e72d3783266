pub mod recipe_detail;
pub mod scope;
pub mod weekly_plan;
