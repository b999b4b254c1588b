#![allow(missing_docs)]

mod ape;
mod dispatch;
mod flac;
mod mpeg;
mod normalize;
mod util;
mod wav;
