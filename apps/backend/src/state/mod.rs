pub mod app_state;
pub mod stats;

pub use app_state::AppState;
