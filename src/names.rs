pub const CURRENT_VIEW_URL: &str = "/";
pub const DASHBOARD_URL: &str = "/dashboard";
pub const ADVANCE_URL: &str = "/walkthrough/advance";
pub const SELECT_ANSWER_URL: &str = "/quiz/answer";
pub const SUBMIT_QUIZ_URL: &str = "/quiz/submit";
pub const RETURN_TO_DASHBOARD_URL: &str = "/quiz/return";
pub const SIMULATION_URL: &str = "/simulation";
pub const GENERATE_SCENARIO_URL: &str = "/simulation/scenario";
pub const SELECT_OPTION_URL: &str = "/simulation/select";

pub fn module_url(module_id: &str) -> String {
    format!("/modules/{module_id}")
}

// Configuration defaults
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:1414";
pub const DEFAULT_API_KEY_VAR: &str = "API_KEY";
pub const DEFAULT_LOCALE: &str = "en";
