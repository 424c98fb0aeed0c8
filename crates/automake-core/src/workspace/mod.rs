pub mod model;
pub mod services;

pub use model::Workspace;
pub use services::{
    CompilationStatusListener, Notifier, ProblemTracker, ProblemsView, UiExecutor, UiTask,
    WorkspaceServices,
};
