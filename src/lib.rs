// SPDX-License-Identifier: MPL-2.0
//! `iced_cull` reviews a folder of images eight at a time and sorts each set
//! into accepted or rejected destination folders.
//!
//! The review logic lives in [`review`] and performs no I/O of its own;
//! [`destination`] provides the folders batches are written to, [`media`]
//! sniffs image files and reads their aperture, and [`app`] wires everything
//! into an Iced window. [`relay`] is the HTTP upload endpoint served by the
//! `upload-relay` binary.

pub mod app;
pub mod destination;
pub mod error;
pub mod i18n;
pub mod media;
pub mod relay;
pub mod review;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
