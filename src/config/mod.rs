pub mod traits;
pub mod mutation;
pub mod feedback;
pub mod workspace;
pub mod manager;

pub use manager::AppConfig;
pub use mutation::MutationConfig;
pub use feedback::FeedbackConfig;
pub use workspace::WorkspaceConfig;
