pub mod debouncer;
pub mod dispatcher;
pub mod edge_classifier;
pub mod edge_watcher;
pub mod geometry;
pub mod pointer_source;

pub use dispatcher::{create_command_launcher, CommandDispatcher, CommandTable};
pub use edge_watcher::EdgeWatcher;
pub use pointer_source::create_pointer_source;
