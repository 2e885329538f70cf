pub mod slug;
pub mod time;
