//! Implementations of the remote port: live HTTP, recording and replaying.

pub mod live;
pub mod recording;
pub mod replaying;
