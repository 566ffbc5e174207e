//! Types and helpers for working with Yale Bright Star Catalog stars.
//!
//! This module contains the `YaleStar` representation and helpers to load
//! the fixed-width catalog file (YBSC, 5th revised edition).
//!
//! The catalog (V/50) can be downloaded from
//! <http://cdsarc.u-strasbg.fr/ftp/V/50/catalog.gz>.

/// A star from the Yale Bright Star Catalog.
///
/// Equatorial J2000 coordinates are converted to radians at parse time;
/// proper motions are kept in the catalog's native arcsec/year.
#[derive(Debug, Clone, PartialEq)]
pub struct YaleStar {
    /// Harvard Revised (HR) number.
    pub number: u32,
    pub name: Option<String>,
    pub ra_rad: f64,
    pub dec_rad: f64,
    /// Visual magnitude.
    pub mag: f32,
    pub spectral: Option<String>,
    pub pm_ra: f64,
    pub pm_dec: f64,
}

/// Parse a single catalog record into a `YaleStar`.
///
/// Returns `None` for short records and for records with unparseable fields
/// (e.g. novae and non-stellar objects that have no magnitude).
fn parse_yale_star(record: &str) -> Option<YaleStar> {
    if record.len() < 170 || !record.is_ascii() {
        return None;
    }

    let number: u32 = record[0..4].trim().parse().ok()?;

    let name = match record[4..14].trim() {
        "" => None,
        n => Some(n.to_string()),
    };

    // J2000 right ascension: hours, minutes, seconds
    let ra_h: f64 = record[75..77].trim().parse().ok()?;
    let ra_m: f64 = record[77..79].trim().parse().ok()?;
    let ra_s: f64 = record[79..83].trim().parse().ok()?;
    let ra_rad = (ra_h + ra_m / 60.0 + ra_s / 3600.0) * std::f64::consts::PI / 12.0;

    // J2000 declination: sign, degrees, arcminutes, arcseconds
    let sign = match &record[83..84] {
        "+" => 1.0,
        "-" => -1.0,
        _ => return None,
    };
    let dec_d: f64 = record[84..86].trim().parse().ok()?;
    let dec_m: f64 = record[86..88].trim().parse().ok()?;
    let dec_s: f64 = record[88..90].trim().parse().ok()?;
    let dec_rad = sign * (dec_d + dec_m / 60.0 + dec_s / 3600.0).to_radians();

    let mag: f32 = record[102..107].trim().parse().ok()?;

    let spectral = match record[127..147].trim() {
        "" => None,
        s => Some(s.to_string()),
    };

    Some(YaleStar {
        number,
        name,
        ra_rad,
        dec_rad,
        mag,
        spectral,
        pm_ra: record[148..154].trim().parse().ok()?,
        pm_dec: record[154..160].trim().parse().ok()?,
    })
}

/// Load the catalog from an in-memory string, skipping unparseable rows.
pub fn load_yale_catalog(data: &str) -> Vec<YaleStar> {
    data.lines().filter_map(parse_yale_star).collect()
}

pub fn load_yale_catalog_from_file<P: AsRef<std::path::Path>>(
    path: P,
) -> anyhow::Result<Vec<YaleStar>> {
    let data = std::fs::read_to_string(path)?;
    Ok(load_yale_catalog(&data))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a fixed-width catalog row with the given fields, padding every
    /// unparsed column range with spaces.
    pub(crate) fn yale_row(
        number: u32,
        name: &str,
        ra_hms: (u32, u32, f64),
        dec_sign: char,
        dec_dms: (u32, u32, u32),
        mag: f32,
        spectral: &str,
    ) -> String {
        let mut row = vec![b' '; 180];
        let mut put = |range: std::ops::Range<usize>, text: String| {
            let bytes = text.as_bytes();
            assert!(bytes.len() <= range.len(), "field too wide: {text:?}");
            row[range][..bytes.len()].copy_from_slice(bytes);
        };
        put(0..4, format!("{number:>4}"));
        put(4..14, format!("{name:<10}"));
        put(75..77, format!("{:>2}", ra_hms.0));
        put(77..79, format!("{:>2}", ra_hms.1));
        put(79..83, format!("{:>4.1}", ra_hms.2));
        put(83..84, dec_sign.to_string());
        put(84..86, format!("{:>2}", dec_dms.0));
        put(86..88, format!("{:>2}", dec_dms.1));
        put(88..90, format!("{:>2}", dec_dms.2));
        put(102..107, format!("{mag:>5.2}"));
        put(127..147, format!("{spectral:<20}"));
        put(148..154, format!("{:>+6.3}", 0.012));
        put(154..160, format!("{:>+6.3}", -0.034));
        String::from_utf8(row).unwrap()
    }

    #[test]
    fn parses_well_formed_record() {
        // Sirius: HR 2491, RA 06h45m08.9s, Dec -16°42'58", V = -1.46
        let row = yale_row(
            2491,
            "9Alp CMa",
            (6, 45, 8.9),
            '-',
            (16, 42, 58),
            -1.46,
            "A1Vm",
        );
        let star = parse_yale_star(&row).expect("record should parse");

        assert_eq!(star.number, 2491);
        assert_eq!(star.name.as_deref(), Some("9Alp CMa"));
        assert_eq!(star.spectral.as_deref(), Some("A1Vm"));
        assert!((star.mag - -1.46).abs() < 1e-3);

        let ra_deg = star.ra_rad.to_degrees();
        let dec_deg = star.dec_rad.to_degrees();
        assert!((ra_deg - 101.287).abs() < 0.01);
        assert!((dec_deg - -16.716).abs() < 0.01);
    }

    #[test]
    fn skips_short_and_magnitude_less_records() {
        assert!(parse_yale_star("  92BD too short").is_none());

        // Blank magnitude field (e.g. a nova placeholder row)
        let mut row = yale_row(92, "", (0, 28, 1.0), '+', (29, 17, 28), 0.0, "");
        row.replace_range(102..107, "     ");
        assert!(parse_yale_star(&row).is_none());
    }

    #[test]
    fn loader_filters_bad_rows() {
        let good = yale_row(15, "21Alp And", (0, 8, 23.3), '+', (29, 5, 26), 2.06, "B8IVpMnHg");
        let data = format!("{good}\nnot a catalog row\n");
        let stars = load_yale_catalog(&data);
        assert_eq!(stars.len(), 1);
        assert_eq!(stars[0].number, 15);
    }
}
