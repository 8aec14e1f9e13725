use crate::error::Result;
use crate::utils::wordsplit::ArgumentVector;

/// Trait for launchers that start the command bound to a region
#[async_trait::async_trait]
pub trait CommandLauncherTrait {
    /// Start `args[0]` with `args` as its argument list.
    ///
    /// With `blocking` the call returns only after the child has exited.
    /// Returns the child pid when a real process was started.
    async fn launch(&self, args: &ArgumentVector, blocking: bool) -> Result<Option<u32>>;
}

/// Factory function to create an appropriate launcher based on the dry_run flag
pub fn create_command_launcher(dry_run: bool) -> Box<dyn CommandLauncherTrait + Send + Sync> {
    if dry_run {
        Box::new(super::dry_run::DryRunLauncher::new())
    } else {
        Box::new(super::process_launcher::ProcessLauncher::new())
    }
}
