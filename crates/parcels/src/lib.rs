//! Parcel domain module.
//!
//! Binds a set of scanned product barcodes and an uploaded packing video to a
//! transport barcode. Pure domain logic; asset IO and persistence live in the
//! API layer.

pub mod parcel;

pub use parcel::{PackOutcome, Parcel, ParcelBook, ScannedItem, pack_items, video_filename};
