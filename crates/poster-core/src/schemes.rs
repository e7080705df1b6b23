//! Built-in color scheme catalogue.
//!
//! Listed schemes are the qualitative ColorBrewer / Tableau sets. Sequential and
//! diverging ColorBrewer ramps are stored as evenly spaced control points, and
//! the classic channel-segmented maps keep their published control points.
//! Several of the latter (bone, copper, hot) have a different number of points
//! per channel, so deriving a palette from them fails with a data error.

use crate::palette::{ColorScheme, ControlPoint, SegmentData};

fn unit(rgb: u32) -> [f64; 3] {
    [
        f64::from((rgb >> 16) & 0xff) / 255.0,
        f64::from((rgb >> 8) & 0xff) / 255.0,
        f64::from(rgb & 0xff) / 255.0,
    ]
}

fn listed(colors: &[u32]) -> ColorScheme {
    ColorScheme::Listed(colors.iter().map(|&c| unit(c)).collect())
}

fn ramp(colors: &[u32]) -> ColorScheme {
    let colors: Vec<[f64; 3]> = colors.iter().map(|&c| unit(c)).collect();
    ColorScheme::Segmented(SegmentData::from_colors(&colors))
}

fn segmented(red: &[ControlPoint], green: &[ControlPoint], blue: &[ControlPoint]) -> ColorScheme {
    ColorScheme::Segmented(SegmentData {
        red: red.to_vec(),
        green: green.to_vec(),
        blue: blue.to_vec(),
    })
}

/// Every built-in scheme with its name.
pub fn builtin_schemes() -> Vec<(&'static str, ColorScheme)> {
    let grey_ramp: &[ControlPoint] = &[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)];

    vec![
        // Qualitative
        (
            "Set1",
            listed(&[
                0xe41a1c, 0x377eb8, 0x4daf4a, 0x984ea3, 0xff7f00, 0xffff33, 0xa65628, 0xf781bf,
                0x999999,
            ]),
        ),
        (
            "Set2",
            listed(&[
                0x66c2a5, 0xfc8d62, 0x8da0cb, 0xe78ac3, 0xa6d854, 0xffd92f, 0xe5c494, 0xb3b3b3,
            ]),
        ),
        (
            "Set3",
            listed(&[
                0x8dd3c7, 0xffffb3, 0xbebada, 0xfb8072, 0x80b1d3, 0xfdb462, 0xb3de69, 0xfccde5,
                0xd9d9d9, 0xbc80bd, 0xccebc5, 0xffed6f,
            ]),
        ),
        (
            "Pastel1",
            listed(&[
                0xfbb4ae, 0xb3cde3, 0xccebc5, 0xdecbe4, 0xfed9a6, 0xffffcc, 0xe5d8bd, 0xfddaec,
                0xf2f2f2,
            ]),
        ),
        (
            "Pastel2",
            listed(&[
                0xb3e2cd, 0xfdcdac, 0xcbd5e8, 0xf4cae4, 0xe6f5c9, 0xfff2ae, 0xf1e2cc, 0xcccccc,
            ]),
        ),
        (
            "Paired",
            listed(&[
                0xa6cee3, 0x1f78b4, 0xb2df8a, 0x33a02c, 0xfb9a99, 0xe31a1c, 0xfdbf6f, 0xff7f00,
                0xcab2d6, 0x6a3d9a, 0xffff99, 0xb15928,
            ]),
        ),
        (
            "Accent",
            listed(&[
                0x7fc97f, 0xbeaed4, 0xfdc086, 0xffff99, 0x386cb0, 0xf0027f, 0xbf5b17, 0x666666,
            ]),
        ),
        (
            "Dark2",
            listed(&[
                0x1b9e77, 0xd95f02, 0x7570b3, 0xe7298a, 0x66a61e, 0xe6ab02, 0xa6761d, 0x666666,
            ]),
        ),
        (
            "tab10",
            listed(&[
                0x1f77b4, 0xff7f0e, 0x2ca02c, 0xd62728, 0x9467bd, 0x8c564b, 0xe377c2, 0x7f7f7f,
                0xbcbd22, 0x17becf,
            ]),
        ),
        // Sequential / diverging ramps
        (
            "Blues",
            ramp(&[
                0xf7fbff, 0xdeebf7, 0xc6dbef, 0x9ecae1, 0x6baed6, 0x4292c6, 0x2171b5, 0x08519c,
                0x08306b,
            ]),
        ),
        (
            "Greens",
            ramp(&[
                0xf7fcf5, 0xe5f5e0, 0xc7e9c0, 0xa1d99b, 0x74c476, 0x41ab5d, 0x238b45, 0x006d2c,
                0x00441b,
            ]),
        ),
        (
            "Greys",
            ramp(&[
                0xffffff, 0xf0f0f0, 0xd9d9d9, 0xbdbdbd, 0x969696, 0x737373, 0x525252, 0x252525,
                0x000000,
            ]),
        ),
        (
            "Oranges",
            ramp(&[
                0xfff5eb, 0xfee6ce, 0xfdd0a2, 0xfdae6b, 0xfd8d3c, 0xf16913, 0xd94801, 0xa63603,
                0x7f2704,
            ]),
        ),
        (
            "Purples",
            ramp(&[
                0xfcfbfd, 0xefedf5, 0xdadaeb, 0xbcbddc, 0x9e9ac8, 0x807dba, 0x6a51a3, 0x54278f,
                0x3f007d,
            ]),
        ),
        (
            "Reds",
            ramp(&[
                0xfff5f0, 0xfee0d2, 0xfcbba1, 0xfc9272, 0xfb6a4a, 0xef3b2c, 0xcb181d, 0xa50f15,
                0x67000d,
            ]),
        ),
        (
            "RdBu",
            ramp(&[
                0x67001f, 0xb2182b, 0xd6604d, 0xf4a582, 0xfddbc7, 0xf7f7f7, 0xd1e5f0, 0x92c5de,
                0x4393c3, 0x2166ac, 0x053061,
            ]),
        ),
        (
            "Spectral",
            ramp(&[
                0x9e0142, 0xd53e4f, 0xf46d43, 0xfdae61, 0xfee08b, 0xffffbf, 0xe6f598, 0xabdda4,
                0x66c2a5, 0x3288bd, 0x5e4fa2,
            ]),
        ),
        (
            "Wistia",
            ramp(&[0xe4ff7a, 0xffe81a, 0xffbd00, 0xffa000, 0xfc7f00]),
        ),
        // Channel-segmented maps
        (
            "binary",
            segmented(
                &[(0.0, 1.0, 1.0), (1.0, 0.0, 0.0)],
                &[(0.0, 1.0, 1.0), (1.0, 0.0, 0.0)],
                &[(0.0, 1.0, 1.0), (1.0, 0.0, 0.0)],
            ),
        ),
        ("gray", segmented(grey_ramp, grey_ramp, grey_ramp)),
        (
            "autumn",
            segmented(
                &[(0.0, 1.0, 1.0), (1.0, 1.0, 1.0)],
                &[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
                &[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)],
            ),
        ),
        (
            "cool",
            segmented(
                &[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
                &[(0.0, 1.0, 1.0), (1.0, 0.0, 0.0)],
                &[(0.0, 1.0, 1.0), (1.0, 1.0, 1.0)],
            ),
        ),
        (
            "spring",
            segmented(
                &[(0.0, 1.0, 1.0), (1.0, 1.0, 1.0)],
                &[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
                &[(0.0, 1.0, 1.0), (1.0, 0.0, 0.0)],
            ),
        ),
        (
            "summer",
            segmented(
                &[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
                &[(0.0, 0.5, 0.5), (1.0, 1.0, 1.0)],
                &[(0.0, 0.4, 0.4), (1.0, 0.4, 0.4)],
            ),
        ),
        (
            "winter",
            segmented(
                &[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)],
                &[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
                &[(0.0, 1.0, 1.0), (1.0, 0.5, 0.5)],
            ),
        ),
        (
            "bone",
            segmented(
                &[(0.0, 0.0, 0.0), (0.746032, 0.652778, 0.652778), (1.0, 1.0, 1.0)],
                &[
                    (0.0, 0.0, 0.0),
                    (0.365079, 0.319444, 0.319444),
                    (0.746032, 0.777778, 0.777778),
                    (1.0, 1.0, 1.0),
                ],
                &[(0.0, 0.0, 0.0), (0.365079, 0.444444, 0.444444), (1.0, 1.0, 1.0)],
            ),
        ),
        (
            "copper",
            segmented(
                &[(0.0, 0.0, 0.0), (0.809524, 1.0, 1.0), (1.0, 1.0, 1.0)],
                &[(0.0, 0.0, 0.0), (1.0, 0.7812, 0.7812)],
                &[(0.0, 0.0, 0.0), (1.0, 0.4975, 0.4975)],
            ),
        ),
        (
            "hot",
            segmented(
                &[(0.0, 0.0416, 0.0416), (0.365079, 1.0, 1.0), (1.0, 1.0, 1.0)],
                &[
                    (0.0, 0.0, 0.0),
                    (0.365079, 0.0, 0.0),
                    (0.746032, 1.0, 1.0),
                    (1.0, 1.0, 1.0),
                ],
                &[(0.0, 0.0, 0.0), (0.746032, 0.0, 0.0), (1.0, 1.0, 1.0)],
            ),
        ),
    ]
}
