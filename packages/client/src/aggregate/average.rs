//! Mean electric range for one manufacturer's battery-electric vehicles

use crate::classify::ClassifiedRow;
use crate::error::{Error, Result};

/// Running sum/count scoped to one target manufacturer and the BEV
/// vehicle-type filter. Both are updated together per qualifying row and
/// never decremented.
#[derive(Debug)]
pub struct AverageAccumulator {
    target_maker: String,
    bev_marker: String,
    sum: i64,
    count: u64,
}

impl AverageAccumulator {
    pub fn new(target_maker: impl Into<String>, bev_marker: impl Into<String>) -> Self {
        Self {
            target_maker: target_maker.into(),
            bev_marker: bev_marker.into(),
            sum: 0,
            count: 0,
        }
    }

    pub fn fold(&mut self, row: ClassifiedRow) -> Result<()> {
        if row.manufacturer != self.target_maker {
            return Ok(());
        }
        if row.vehicle_type.as_deref() != Some(self.bev_marker.as_str()) {
            return Ok(());
        }
        let raw = row.electric_range_raw.ok_or_else(|| {
            Error::unexpected_cell_type(format!(
                "electric range cell is null or absent for a {} BEV row",
                self.target_maker
            ))
        })?;
        self.sum += parse_leading_int(&raw)?;
        self.count += 1;
        Ok(())
    }

    /// Zero qualifying rows yields `0`, never NaN or an error.
    pub fn finish(self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum as f64 / self.count as f64
        }
    }
}

/// Parse the leading integer of a cell value, ignoring any trailing
/// non-digit suffix (range cells may carry units).
fn parse_leading_int(raw: &str) -> Result<i64> {
    let s = raw.trim_start();
    let (sign, digits_start) = match s.as_bytes().first() {
        Some(b'-') => (-1, 1),
        Some(b'+') => (1, 1),
        _ => (1, 0),
    };
    let digits: &str = {
        let rest = &s[digits_start..];
        let end = rest
            .as_bytes()
            .iter()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return Err(Error::NumericParse(raw.to_string()));
    }
    let value: i64 = digits
        .parse()
        .map_err(|_| Error::NumericParse(raw.to_string()))?;
    Ok(sign * value)
}
