// SPDX-License-Identifier: GPL-3.0-only

//! Platform capability backends
//!
//! Every platform service the workflow touches is a trait seam: camera,
//! permissions, media library, haptics. The concrete impls here cover the
//! host environment; tests supply their own.

pub mod camera;
pub mod haptics;
pub mod media_library;
pub mod permissions;
