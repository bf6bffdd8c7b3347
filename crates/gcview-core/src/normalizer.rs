//! Normalizer — converts captured heap sizes to megabytes.
//!
//! GC logs print sizes with a single-letter binary unit suffix (`K`, `M`, `G`).
//! Every size in a [`GcEvent`](crate::GcEvent) is expressed in megabytes.

const KIB_PER_MIB: f64 = 1024.0;

/// Express `magnitude` (measured in `unit`) in megabytes.
///
/// `K` divides by 1024 and `G` multiplies by 1024. `M` and any other tag are
/// passed through unchanged.
pub fn to_megabytes(magnitude: f64, unit: &str) -> f64 {
    match unit {
        "K" => magnitude / KIB_PER_MIB,
        "G" => magnitude * KIB_PER_MIB,
        _ => magnitude,
    }
}
