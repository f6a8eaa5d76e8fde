pub mod record_writer;
pub mod sync_service;
pub mod task_resolver;

pub use record_writer::RecordWriter;
pub use sync_service::{SyncOptions, SyncService};
pub use task_resolver::TaskResolver;
