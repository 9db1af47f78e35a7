// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Canned AIPS workflows. Each function here only generates commands; hand
//! them to a [`crate::Session`] to run them.

mod noise_map;

pub use noise_map::{rmsd, ImageSize, RMSD_SCRIPT_LEN};
