use std::iter;

use crate::number::{Number, Value};

/// Magnitude bands, each covering a half-open `[low, high)` range of
/// absolute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Zero,
    Tiny,
    Plain,
    Thousands,
    Millions,
    Billions,
    Huge,
}

/// Lower bound of every band above `Tiny`, sorted ascending.
const BOUNDARIES: [(f64, Band); 5] = [
    (1e-3, Band::Plain),
    (1e3, Band::Thousands),
    (1e5, Band::Millions),
    (1e9, Band::Billions),
    (1e12, Band::Huge),
];

impl Band {
    pub fn of(magnitude: f64) -> Band {
        if magnitude == 0.0 {
            return Band::Zero;
        }
        if magnitude.is_nan() {
            return Band::Huge;
        }
        BOUNDARIES
            .iter()
            .rev()
            .find(|(low, _)| magnitude >= *low)
            .map_or(Band::Tiny, |(_, band)| *band)
    }

    pub fn render(self, n: Number) -> String {
        match self {
            Band::Zero => "0".to_string(),
            Band::Tiny => scientific(n.as_f64(), 2),
            Band::Plain => match n {
                Number::Int(i) => i.to_string(),
                Number::Float(f) => format!("{f:.2}"),
            },
            Band::Thousands => magnitude(n, ""),
            Band::Millions => magnitude(Number::Float(n.as_f64() / 1e6), "mi"),
            Band::Billions => magnitude(Number::Float(n.as_f64() / 1e9), "bi"),
            Band::Huge => scientific(n.as_f64(), 6),
        }
    }
}

/// Scientific notation with a signed, at least two digit exponent
/// (`1.23e-04`, `1.000000e+12`).
fn scientific(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let rendered = format!("{value:.precision$e}");
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exponent) => format!(
                "{mantissa}e{}{:02}",
                if exponent < 0 { '-' } else { '+' },
                exponent.unsigned_abs()
            ),
            Err(_) => rendered,
        },
        None => rendered,
    }
}

/// Splits `seq` into groups of up to `n` items counted from the end, so only
/// the first group may be short.
///
/// # Panics
///
/// Panics if `n` is zero.
pub fn rpartition<T: Clone>(seq: &[T], n: usize) -> Vec<Vec<T>> {
    let mut groups = seq.rchunks(n).map(<[T]>::to_vec).collect::<Vec<_>>();
    groups.reverse();
    groups
}

/// Joins the groups from [`rpartition`] with commas.
///
/// # Panics
///
/// Panics if `n` is zero.
pub fn group_digits(digits: &str, n: usize) -> String {
    let chars = digits.chars().collect::<Vec<_>>();
    rpartition(&chars, n)
        .iter()
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(",")
}

/// Renders an already scaled value as `sign + grouped integer + decimals +
/// suffix`. Floats always carry two decimals, truncated rather than rounded.
pub fn magnitude(value: Number, suffix: &str) -> String {
    let (negative, integer, decimal) = match value {
        Number::Int(n) => (n < 0, n.unsigned_abs().to_string(), String::new()),
        Number::Float(f) => {
            let rendered = f.abs().to_string();
            let (integer, fraction) = rendered
                .split_once('.')
                .unwrap_or((rendered.as_str(), ""));
            let fraction = fraction
                .chars()
                .chain(iter::repeat('0'))
                .take(2)
                .collect::<String>();
            (f < 0.0, integer.to_string(), format!(".{fraction}"))
        }
    };

    format!(
        "{}{}{}{}",
        if negative { "-" } else { "" },
        group_digits(&integer, 3),
        decimal,
        suffix
    )
}

/// Picks the best fitting representation for a number, or formats every
/// element of a sequence and joins them with `", "`.
pub fn fmt(value: impl Into<Value>) -> String {
    render(&value.into())
}

fn render(value: &Value) -> String {
    match value {
        Value::Sequence(items) => items.iter().map(render).collect::<Vec<_>>().join(", "),
        Value::Scalar(n) => Band::of(n.abs()).render(*n),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ratio {
    Percent,
    PerMille,
    PerTenThousand,
}

impl Ratio {
    pub fn scale(self) -> i128 {
        match self {
            Ratio::Percent => 100,
            Ratio::PerMille => 1_000,
            Ratio::PerTenThousand => 10_000,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Ratio::Percent => "%",
            Ratio::PerMille => "‰",
            Ratio::PerTenThousand => "‱",
        }
    }

    pub fn zero_literal(self) -> &'static str {
        match self {
            Ratio::Percent => "0.0%",
            Ratio::PerMille => "0.0‰",
            Ratio::PerTenThousand => "0.0‱",
        }
    }

    pub fn format(self, value: impl Into<Number>) -> String {
        let value = value.into();
        if value.is_zero() {
            return self.zero_literal().to_string();
        }
        format!("{}{}", fmt(value.scale(self.scale())), self.symbol())
    }
}

pub fn pc(value: impl Into<Number>) -> String {
    Ratio::Percent.format(value)
}

pub fn pm(value: impl Into<Number>) -> String {
    Ratio::PerMille.format(value)
}

pub fn p10k(value: impl Into<Number>) -> String {
    Ratio::PerTenThousand.format(value)
}

pub trait NumericFormatter {
    fn humanize(self) -> String;
    fn humanize_pc(self) -> String;
    fn humanize_pm(self) -> String;
    fn humanize_p10k(self) -> String;
}

impl<T: Into<Number>> NumericFormatter for T {
    fn humanize(self) -> String {
        let n: Number = self.into();
        fmt(n)
    }

    fn humanize_pc(self) -> String {
        pc(self)
    }

    fn humanize_pm(self) -> String {
        pm(self)
    }

    fn humanize_p10k(self) -> String {
        p10k(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(Band::of(0.0), Band::Zero);
        assert_eq!(Band::of(0.000999), Band::Tiny);
        assert_eq!(Band::of(0.001), Band::Plain);
        assert_eq!(Band::of(999.999), Band::Plain);
        assert_eq!(Band::of(1000.0), Band::Thousands);
        assert_eq!(Band::of(99_999.99), Band::Thousands);
        assert_eq!(Band::of(100_000.0), Band::Millions);
        assert_eq!(Band::of(999_999_999.0), Band::Millions);
        assert_eq!(Band::of(1e9), Band::Billions);
        assert_eq!(Band::of(1e12), Band::Huge);
        assert_eq!(Band::of(f64::INFINITY), Band::Huge);
        assert_eq!(Band::of(f64::NAN), Band::Huge);
    }

    #[test]
    fn test_rpartition() {
        let digits = "1234567".chars().collect::<Vec<_>>();
        assert_eq!(
            rpartition(&digits, 3),
            vec![vec!['1'], vec!['2', '3', '4'], vec!['5', '6', '7']]
        );
        assert_eq!(
            rpartition(&[1, 2, 3, 4, 5], 2),
            vec![vec![1], vec![2, 3], vec![4, 5]]
        );
        assert_eq!(rpartition(&[1, 2, 3], 3), vec![vec![1, 2, 3]]);
        assert!(rpartition::<char>(&[], 3).is_empty());
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("", 3), "");
        assert_eq!(group_digits("7", 3), "7");
        assert_eq!(group_digits("123", 3), "123");
        assert_eq!(group_digits("1234", 3), "1,234");
        assert_eq!(group_digits("1234567", 3), "1,234,567");
        assert_eq!(group_digits("123456", 2), "12,34,56");
    }

    #[test]
    #[should_panic]
    fn test_group_digits_zero_width() {
        group_digits("123", 0);
    }

    #[test]
    fn test_magnitude() {
        assert_eq!(magnitude(Number::Int(1000), ""), "1,000");
        assert_eq!(magnitude(Number::Int(-1234567), ""), "-1,234,567");
        assert_eq!(magnitude(Number::Float(1234.5678), "x"), "1,234.56x");
        assert_eq!(magnitude(Number::Float(1000.0), ""), "1,000.00");
        assert_eq!(magnitude(Number::Float(-2.5), "mi"), "-2.50mi");
        assert_eq!(magnitude(Number::Float(0.29), "mi"), "0.29mi");
    }

    #[test]
    fn test_fmt_zero() {
        assert_eq!(fmt(0), "0");
        assert_eq!(fmt(0.0), "0");
        assert_eq!(fmt(-0.0), "0");
    }

    #[test]
    fn test_fmt_tiny() {
        assert_eq!(fmt(0.0001), "1.00e-04");
        assert_eq!(fmt(0.000123), "1.23e-04");
        assert_eq!(fmt(-0.0005), "-5.00e-04");
        assert_eq!(fmt(1.5e-100), "1.50e-100");
    }

    #[test]
    fn test_fmt_plain() {
        assert_eq!(fmt(1), "1");
        assert_eq!(fmt(999), "999");
        assert_eq!(fmt(-42), "-42");
        assert_eq!(fmt(1.0), "1.00");
        assert_eq!(fmt(3.14159), "3.14");
        assert_eq!(fmt(0.001), "0.00");
        assert_eq!(fmt(-0.5), "-0.50");
    }

    #[test]
    fn test_fmt_thousands() {
        assert_eq!(fmt(1000), "1,000");
        assert_eq!(fmt(99_999), "99,999");
        assert_eq!(fmt(-1234), "-1,234");
        assert_eq!(fmt(12_345.678), "12,345.67");
        assert_eq!(fmt(-1234.5), "-1,234.50");
    }

    #[test]
    fn test_fmt_millions_and_billions() {
        assert_eq!(fmt(100_000), "0.10mi");
        assert_eq!(fmt(2_000_000), "2.00mi");
        assert_eq!(fmt(123_456_789), "123.45mi");
        assert_eq!(fmt(-2_500_000), "-2.50mi");
        assert_eq!(fmt(1_000_000_000), "1.00bi");
        assert_eq!(fmt(7_250_000_000.0), "7.25bi");
        assert_eq!(fmt(-3_000_000_000i64), "-3.00bi");
    }

    #[test]
    fn test_fmt_huge() {
        assert_eq!(fmt(1e12), "1.000000e+12");
        assert_eq!(fmt(1_234_567_890_123i64), "1.234568e+12");
        assert_eq!(fmt(-2e15), "-2.000000e+15");
        assert_eq!(fmt(f64::INFINITY), "inf");
        assert_eq!(fmt(f64::NEG_INFINITY), "-inf");
        assert_eq!(fmt(f64::NAN), "nan");
    }

    #[test]
    fn test_fmt_band_edges_differ() {
        assert_eq!(fmt(99_999), "99,999");
        assert_eq!(fmt(100_000), "0.10mi");
        assert_ne!(Band::of(99_999.0), Band::of(100_000.0));
    }

    #[test]
    fn test_fmt_sequence() {
        assert_eq!(fmt([1000, 2_000_000, 0]), "1,000, 2.00mi, 0");
        assert_eq!(fmt(vec![0.5, 1500.0]), "0.50, 1,500.00");
        assert_eq!(fmt(vec![vec![1, 2], vec![3]]), "1, 2, 3");
        assert_eq!(fmt(Vec::<i32>::new()), "");
        assert_eq!(
            fmt(vec![Value::from(1), Value::from(0.25)]),
            format!("{}, {}", fmt(1), fmt(0.25))
        );
    }

    #[test]
    fn test_fmt_sign_preserved() {
        for n in [0.0002, 0.5, 7.0, 1234.5, 250_000.0, 3e9, 5e13] {
            assert_eq!(fmt(-n), format!("-{}", fmt(n)), "value {n}");
        }
        for n in [5i64, 1234, 250_000, 3_000_000_000, 5_000_000_000_000] {
            assert_eq!(fmt(-n), format!("-{}", fmt(n)), "value {n}");
        }
    }

    #[test]
    fn test_fmt_grouping_round_trip() {
        for n in [1000i64, 1001, 12_345, 54_321, 99_999] {
            let formatted = fmt(n);
            let groups = formatted.split(',').collect::<Vec<_>>();
            assert!((1..=3).contains(&groups[0].len()));
            assert!(groups[1..].iter().all(|g| g.len() == 3));
            assert_eq!(formatted.replace(',', ""), n.to_string());
        }
    }

    #[test]
    fn test_fmt_plain_float_has_two_decimals() {
        for n in [0.001, 0.0123, 1.5, 42.424242, 999.0] {
            let formatted = fmt(n);
            let (_, decimals) = formatted.split_once('.').unwrap();
            assert_eq!(decimals.len(), 2, "value {n}");
        }
    }

    #[test]
    fn test_ratios() {
        assert_eq!(pc(0), "0.0%");
        assert_eq!(pc(0.0), "0.0%");
        assert_eq!(pc(-0.0), "0.0%");
        assert_eq!(pm(0), "0.0‰");
        assert_eq!(p10k(0), "0.0‱");
        assert_eq!(pc(0.5), "50.00%");
        assert_eq!(pc(1), "100%");
        assert_eq!(pc(-0.5), "-50.00%");
        assert_eq!(pm(0.5), "500.00‰");
        assert_eq!(p10k(0.5), "5,000.00‱");
        assert_eq!(pc(1e-7), "1.00e-05%");
        assert_eq!(pc(25), "2,500%");
    }

    #[test]
    fn test_ratio_table() {
        assert_eq!(Ratio::Percent.scale(), 100);
        assert_eq!(Ratio::PerMille.symbol(), "‰");
        assert_eq!(Ratio::PerTenThousand.zero_literal(), "0.0‱");
        assert_eq!(Ratio::PerMille.format(2), "2,000‰");
    }

    #[test]
    fn test_numeric_formatter() {
        assert_eq!(1234i32.humanize(), "1,234");
        assert_eq!(2_000_000u64.humanize(), "2.00mi");
        assert_eq!(0.5f64.humanize_pc(), "50.00%");
        assert_eq!(0.5f32.humanize_pm(), "500.00‰");
        assert_eq!(0u8.humanize_p10k(), "0.0‱");
    }
}
