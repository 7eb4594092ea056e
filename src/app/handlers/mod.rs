// SPDX-License-Identifier: GPL-3.0-only

//! Message handlers grouped by functional domain

mod camera;
mod capture;
mod review;
