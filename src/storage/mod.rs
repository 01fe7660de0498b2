pub mod traits;
pub mod clock;
pub mod memory;
pub mod file;

pub use traits::FeedCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use memory::MemoryFeedCache;
pub use file::FileFeedCache;
