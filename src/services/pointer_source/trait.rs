use crate::error::Result;
use crate::events::PointerSample;
use crate::services::geometry::Rectangle;

/// Trait for pointer sources that can run in different modes
#[async_trait::async_trait(?Send)]
pub trait PointerSourceTrait {
    /// Wait for the next pointer motion and return the pointer position.
    /// `None` means the source has no more events.
    async fn next_sample(&mut self) -> Result<Option<PointerSample>>;

    /// Current pointer position, queried synchronously
    fn query_pointer(&self) -> Result<PointerSample>;

    /// Screen size as (width, height)
    fn display_size(&self) -> (i32, i32);

    /// Monitor rectangles, enumerated once at startup
    fn monitors(&self) -> &[Rectangle];
}

/// Factory function to create an appropriate pointer source based on the dry_run flag
pub fn create_pointer_source(dry_run: bool) -> Result<Box<dyn PointerSourceTrait>> {
    if dry_run {
        Ok(Box::new(super::dry_run::DryRunPointerSource::new()))
    } else {
        Ok(Box::new(super::x11_source::X11PointerSource::new()?))
    }
}
