//! Caption timing and voice-over insertion for video editor timelines.
//!
//! * [`workflow::Resizer`]: resize each selected caption to the time it
//!   takes to read aloud.
//! * [`workflow::VoiceInserter`]: find the recording whose transcript
//!   equals a caption's text and insert it at the caption's start.

pub mod assets;
pub mod caption;
pub mod config;
pub mod duration;
pub mod timeline;
pub mod workflow;
