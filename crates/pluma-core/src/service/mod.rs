//! The content API: account and feed operations composing the ports.
//!
//! Every operation applies its checks in a fixed order so failures are
//! deterministic: authentication, then input validation, then existence
//! lookups, then ownership, then the mutation itself.

mod accounts;
mod feed;

pub use accounts::{AccountService, Registration, Session};
pub use feed::{AuthoredPost, FeedPage, FeedService, PAGE_SIZE, PostDraft, PostPatch};
