//! Numeric helpers shared across the crate.

use crate::imports::*;

/// Formats expression and its value for debug printing and error messages.
#[macro_export]
macro_rules! format_dbg {
    ($dbg_expr:expr) => {
        format!(
            "[{}:{}] {}: {:?}",
            file!(),
            line!(),
            stringify!($dbg_expr),
            $dbg_expr
        )
    };
    () => {
        format!("[{}:{}]", file!(), line!())
    };
}

/// Returns true if `val1` and `val2` are within a relative/absolute `epsilon` of each other,
/// defaulting to 1e-8.
pub fn almost_eq(val1: f64, val2: f64, epsilon: Option<f64>) -> bool {
    let epsilon = epsilon.unwrap_or(1e-8);
    ((val2 - val1) / (val1 + val2)).abs() < epsilon || (val2 - val1).abs() < epsilon
}

/// [almost_eq] for uom quantities of matching dimension.
pub fn almost_eq_uom<D, U>(
    val1: &uom::si::Quantity<D, U, f64>,
    val2: &uom::si::Quantity<D, U, f64>,
    epsilon: Option<f64>,
) -> bool
where
    D: uom::si::Dimension + ?Sized,
    U: uom::si::Units<f64> + ?Sized,
{
    almost_eq(val1.value, val2.value, epsilon)
}

pub fn is_sorted<T: PartialOrd>(data: &[T]) -> bool {
    data.windows(2).all(|w| w[0] <= w[1])
}

/// Behavior of [interp1d] outside the range of `x_data`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extrapolate {
    /// extend the line through the two outermost points
    Yes,
    /// clamp to the first/last value of `y_data`
    No,
    /// return an error
    Error,
}

/// Piecewise-linear interpolation of `y_data` over ascending `x_data` at `x`.
///
/// # Arguments
/// - `x`: value at which to interpolate
/// - `x_data`: sorted x values
/// - `y_data`: y values, same length as `x_data`
/// - `extrapolate`: behavior outside the range of `x_data`
pub fn interp1d(
    x: &f64,
    x_data: &[f64],
    y_data: &[f64],
    extrapolate: Extrapolate,
) -> anyhow::Result<f64> {
    ensure!(
        x_data.len() == y_data.len(),
        "x_data and y_data must be the same length"
    );
    ensure!(x_data.len() >= 2, "interpolation requires at least 2 points");
    ensure!(is_sorted(x_data), "x_data must be sorted in ascending order");

    let n = x_data.len();
    let i = if *x <= x_data[0] {
        match extrapolate {
            Extrapolate::Yes => 0,
            Extrapolate::No => return Ok(y_data[0]),
            Extrapolate::Error => {
                ensure!(
                    *x >= x_data[0],
                    "{}\nx below lower bound of x_data",
                    format_dbg!(*x >= x_data[0])
                );
                0
            }
        }
    } else if *x >= x_data[n - 1] {
        match extrapolate {
            Extrapolate::Yes => n - 2,
            Extrapolate::No => return Ok(y_data[n - 1]),
            Extrapolate::Error => {
                ensure!(
                    *x <= x_data[n - 1],
                    "{}\nx above upper bound of x_data",
                    format_dbg!(*x <= x_data[n - 1])
                );
                n - 2
            }
        }
    } else {
        x_data
            .windows(2)
            .position(|w| w[0] <= *x && *x <= w[1])
            .with_context(|| format_dbg!())?
    };

    let dx = x_data[i + 1] - x_data[i];
    if dx == 0.0 {
        return Ok(y_data[i]);
    }
    Ok(y_data[i] + (y_data[i + 1] - y_data[i]) / dx * (x - x_data[i]))
}
