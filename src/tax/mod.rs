//! GST (Goods and Services Tax) support

pub mod gst;

pub use gst::*;
