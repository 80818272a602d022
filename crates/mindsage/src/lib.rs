mod analysis;
mod auth;
mod busy;
mod client;
mod draft;
pub mod error;
mod mood;
mod store;
pub mod view;

pub use analysis::AnalysisController;
pub use analysis::AnalysisOutcome;
pub use analysis::AnalysisState;
pub use auth::AuthToken;
pub use client::base::ApiUrl;
pub use client::base::BaseClient;
pub use client::base::Config;
pub use client::base::JournalApi;
pub use client::simple::SimpleClient;
pub use draft::Draft;
pub use mood::MoodTracker;
pub use store::EntryStore;
pub use store::LoadState;

pub use mindsage_model as model;
