// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The RMSD noise-map workflow: load a FITS image, make a map of its local
//! RMS with the AIPS task RMSD, write that map out as FITS and tidy up.

use log::{debug, trace};

use crate::constants::{DEFAULT_GETN, IMSIZE_SENTINEL};

/// The number of commands [`rmsd`] always returns.
pub const RMSD_SCRIPT_LEN: usize = 19;

/// The region RMSD computes each pixel's RMS over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// A circle of this radius [pixels].
    Radius(i32),

    /// Both values of `IMSIZE`, as given.
    Explicit(i32, i32),
}

impl ImageSize {
    /// The two values written to `IMSIZE`. A radius is paired with -1.
    pub fn pair(self) -> (i32, i32) {
        match self {
            ImageSize::Radius(r) => (r, IMSIZE_SENTINEL),
            ImageSize::Explicit(a, b) => (a, b),
        }
    }
}

impl From<i32> for ImageSize {
    fn from(r: i32) -> Self {
        ImageSize::Radius(r)
    }
}

impl From<(i32, i32)> for ImageSize {
    fn from((a, b): (i32, i32)) -> Self {
        ImageSize::Explicit(a, b)
    }
}

impl From<[i32; 2]> for ImageSize {
    fn from([a, b]: [i32; 2]) -> Self {
        ImageSize::Explicit(a, b)
    }
}

/// Generate the AIPS commands for an RMSD noise map of `<basename>.fits`,
/// written to `<basename>.rmsd.fits`.
///
/// `yinc` defaults to `xinc`, and `getn` (the catalogue number the image is
/// loaded into) defaults to 1. The image is loaded into `getn` and the noise
/// map lands in `getn + 1`; both are deleted at the end. Nothing checks that
/// these catalogue entries are free.
pub fn rmsd<I: Into<ImageSize>>(
    basename: &str,
    imsize: I,
    xinc: i32,
    yinc: Option<i32>,
    getn: Option<u32>,
) -> Vec<String> {
    let yinc = yinc.unwrap_or(xinc);
    let getn = getn.unwrap_or(DEFAULT_GETN);
    let (imsize_a, imsize_b) = imsize.into().pair();
    // Widen so that the output catalogue number can't overflow.
    let getn_out = u64::from(getn) + 1;
    debug!("RMSD of {basename}.fits: IMSIZE=({imsize_a}, {imsize_b}) XINC={xinc} YINC={yinc} GETN={getn}");

    let script = vec![
        // Load the image.
        "TASK 'IMLOD'".to_string(),
        "DEFAULT".to_string(),
        format!("DATAIN='{basename}.fits"),
        "GO; WAIT".to_string(),
        // Make the noise map.
        "TASK 'RMSD'".to_string(),
        "DEFAULT".to_string(),
        format!("GETN {getn}"),
        format!("IMSIZE={imsize_a}, {imsize_b}"),
        format!("XINC={xinc}"),
        format!("YINC={yinc}"),
        "GO; WAIT".to_string(),
        // Export it.
        "TASK 'FITTP'".to_string(),
        "DEFAULT".to_string(),
        format!("GETN {getn_out}"),
        format!("DATAOUT='{basename}.rmsd.fits"),
        "GO; WAIT".to_string(),
        // Clean up.
        format!("FOR i={getn} TO {getn_out}; GETN i; ZAP; END;"),
        "CLRMSG".to_string(),
        "CLRTEMP".to_string(),
    ];
    trace!("{script:?}");
    script
}
