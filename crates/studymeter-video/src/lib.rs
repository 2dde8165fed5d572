//! Video duration providers and reference-list input

mod references;
mod watch_page;
mod ytdlp;

pub use references::{parse_reference_list, read_reference_list, ReferenceListError, URL_COLUMN};
pub use watch_page::WatchPage;
pub use ytdlp::YtDlp;
