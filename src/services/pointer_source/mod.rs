//! PointerSource service: responsibility and boundaries
//!
//! This module and its submodules are responsible ONLY for talking to the
//! display server: delivering pointer motion, querying the pointer position
//! and reporting screen and monitor geometry. Region classification and
//! command dispatch live elsewhere.

mod dry_run;
mod r#trait;
mod x11_source;

pub use self::r#trait::{create_pointer_source, PointerSourceTrait};
