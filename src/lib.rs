//! Terminal radar scope: a rotating sweep over a fixed set of aircraft
//! blips, with a periodic beep played off the UI thread.

pub mod radar;
pub mod sound;
pub mod timing;
pub mod tui;
