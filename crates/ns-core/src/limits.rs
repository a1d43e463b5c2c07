//! Declared parameter domains and the shared bounds check.
//!
//! Every distribution declares a static [`Limits`] table mapping a parameter
//! symbol to the [`Interval`] its argument must lie in, and calls
//! [`check_limits`] before evaluating any formula:
//!
//! ```
//! use ns_core::{Interval, Limits, check_limits};
//!
//! const LIMITS: Limits = Limits::new(&[("x", Interval::REAL), ("s", Interval::POSITIVE)]);
//!
//! assert!(check_limits(&LIMITS, &[("x", 1.0), ("s", 2.0)]).is_ok());
//! assert!(check_limits(&LIMITS, &[("x", 1.0), ("s", 0.0)]).is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One end of an [`Interval`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// Endpoint excluded.
    Open(f64),
    /// Endpoint included.
    Closed(f64),
}

impl Bound {
    /// Endpoint value.
    pub fn value(self) -> f64 {
        match self {
            Bound::Open(v) | Bound::Closed(v) => v,
        }
    }

    /// `true` for [`Bound::Closed`].
    pub fn is_closed(self) -> bool {
        matches!(self, Bound::Closed(_))
    }

    // ±∞ is never attained, so an infinite endpoint is always open.
    fn normalized(self) -> Self {
        match self {
            Bound::Closed(v) if v.is_infinite() => Bound::Open(v),
            b => b,
        }
    }
}

/// A real interval with open or closed endpoints, possibly unbounded.
///
/// Only finite values can be contained: `(-∞,∞)` is the real line, so it
/// rejects `±∞` and NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    lower: Bound,
    upper: Bound,
}

impl Interval {
    /// `(-∞,∞)`
    pub const REAL: Interval = Interval::open(f64::NEG_INFINITY, f64::INFINITY);

    /// `(0,∞)`
    pub const POSITIVE: Interval = Interval::open(0.0, f64::INFINITY);

    /// `[0,1]`
    pub const UNIT: Interval = Interval { lower: Bound::Closed(0.0), upper: Bound::Closed(1.0) };

    /// Build an interval from two bounds. Infinite endpoints become open.
    pub fn new(lower: Bound, upper: Bound) -> Self {
        Self { lower: lower.normalized(), upper: upper.normalized() }
    }

    /// `(a,b)`
    pub const fn open(a: f64, b: f64) -> Self {
        Self { lower: Bound::Open(a), upper: Bound::Open(b) }
    }

    /// `[a,b]`
    pub fn closed(a: f64, b: f64) -> Self {
        Self::new(Bound::Closed(a), Bound::Closed(b))
    }

    /// Lower bound.
    pub fn lower(&self) -> Bound {
        self.lower
    }

    /// Upper bound.
    pub fn upper(&self) -> Bound {
        self.upper
    }

    /// Whether `v` lies inside the interval.
    pub fn contains(&self, v: f64) -> bool {
        if !v.is_finite() {
            return false;
        }
        let above = match self.lower {
            Bound::Open(a) => v > a,
            Bound::Closed(a) => v >= a,
        };
        let below = match self.upper {
            Bound::Open(b) => v < b,
            Bound::Closed(b) => v <= b,
        };
        above && below
    }
}

fn fmt_endpoint(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v == f64::INFINITY {
        f.write_str("∞")
    } else if v == f64::NEG_INFINITY {
        f.write_str("-∞")
    } else {
        write!(f, "{}", v)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.lower.is_closed() { "[" } else { "(" })?;
        fmt_endpoint(f, self.lower.value())?;
        f.write_str(",")?;
        fmt_endpoint(f, self.upper.value())?;
        f.write_str(if self.upper.is_closed() { "]" } else { ")" })
    }
}

fn parse_endpoint(s: &str) -> Option<f64> {
    match s.trim() {
        "∞" | "+∞" => Some(f64::INFINITY),
        "-∞" => Some(f64::NEG_INFINITY),
        t => t.parse::<f64>().ok().filter(|v| !v.is_nan()),
    }
}

impl FromStr for Interval {
    type Err = Error;

    /// Parse interval notation such as `(-∞,∞)`, `(0,∞)` or `[0, 1]`.
    fn from_str(s: &str) -> Result<Self> {
        let bad = || Error::Validation(format!("malformed interval notation: {:?}", s));
        let t = s.trim();
        let mut chars = t.chars();
        let open = chars.next().ok_or_else(bad)?;
        let close = chars.next_back().ok_or_else(bad)?;
        let (lo, hi) = chars.as_str().split_once(',').ok_or_else(bad)?;
        let lo = parse_endpoint(lo).ok_or_else(bad)?;
        let hi = parse_endpoint(hi).ok_or_else(bad)?;
        let lower = match open {
            '(' => Bound::Open(lo),
            '[' => Bound::Closed(lo),
            _ => return Err(bad()),
        };
        let upper = match close {
            ')' => Bound::Open(hi),
            ']' => Bound::Closed(hi),
            _ => return Err(bad()),
        };
        if lo > hi {
            return Err(Error::Validation(format!("interval {:?} has lower > upper", s)));
        }
        Ok(Interval::new(lower, upper))
    }
}

impl Serialize for Interval {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Interval {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Static table of parameter symbol → declared interval, in declaration order.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    entries: &'static [(&'static str, Interval)],
}

impl Limits {
    /// Wrap a static table.
    pub const fn new(entries: &'static [(&'static str, Interval)]) -> Self {
        Self { entries }
    }

    /// Interval declared for `name`.
    pub fn get(&self, name: &str) -> Option<Interval> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, i)| *i)
    }

    /// `(name, interval)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Interval)> + '_ {
        self.entries.iter().copied()
    }

    /// Declared parameter names.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(n, _)| *n)
    }

    /// Number of declared parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if no parameters are declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Limits {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, interval) in self.entries {
            map.serialize_entry(name, interval)?;
        }
        map.end()
    }
}

/// Check every `(name, value)` argument against its declared interval.
///
/// Arguments are checked in the order given and the first violation is
/// returned as [`Error::Domain`]. Declared parameters missing from `args`
/// are skipped. A name absent from `limits` is an [`Error::Validation`].
pub fn check_limits(limits: &Limits, args: &[(&str, f64)]) -> Result<()> {
    for &(name, value) in args {
        let interval = limits.get(name).ok_or_else(|| {
            Error::Validation(format!("unknown parameter {:?} in limits check", name))
        })?;
        if !interval.contains(value) {
            log::debug!("domain check failed: {} = {} outside {}", name, value, interval);
            return Err(Error::Domain { parameter: name.to_string(), interval, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LIMITS: Limits = Limits::new(&[
        ("x", Interval::REAL),
        ("μ", Interval::REAL),
        ("s", Interval::POSITIVE),
    ]);

    #[test]
    fn test_open_interval_excludes_endpoints() {
        assert!(!Interval::POSITIVE.contains(0.0));
        assert!(Interval::POSITIVE.contains(f64::MIN_POSITIVE));
        assert!(Interval::POSITIVE.contains(f64::MAX));
        assert!(!Interval::POSITIVE.contains(-1.0));
    }

    #[test]
    fn test_closed_interval_includes_endpoints() {
        let i = Interval::closed(0.0, 1.0);
        assert!(i.contains(0.0));
        assert!(i.contains(1.0));
        assert!(!i.contains(1.0 + f64::EPSILON));
        assert_eq!(i, Interval::UNIT);
    }

    #[test]
    fn test_non_finite_never_contained() {
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(!Interval::REAL.contains(v), "{} in (-∞,∞)", v);
            assert!(!Interval::POSITIVE.contains(v));
        }
    }

    #[test]
    fn test_infinite_endpoint_is_open() {
        let i = Interval::closed(0.0, f64::INFINITY);
        assert_eq!(i.upper(), Bound::Open(f64::INFINITY));
        assert_eq!(i.to_string(), "[0,∞)");
    }

    #[test]
    fn test_display() {
        assert_eq!(Interval::REAL.to_string(), "(-∞,∞)");
        assert_eq!(Interval::POSITIVE.to_string(), "(0,∞)");
        assert_eq!(Interval::UNIT.to_string(), "[0,1]");
        assert_eq!(Interval::open(-0.5, 2.5).to_string(), "(-0.5,2.5)");
    }

    #[test]
    fn test_parse_notation() {
        assert_eq!("(-∞,∞)".parse::<Interval>().unwrap(), Interval::REAL);
        assert_eq!("(0,∞)".parse::<Interval>().unwrap(), Interval::POSITIVE);
        assert_eq!("(0, inf)".parse::<Interval>().unwrap(), Interval::POSITIVE);
        assert_eq!(" [0, 1] ".parse::<Interval>().unwrap(), Interval::UNIT);
        assert_eq!("[-inf,+∞]".parse::<Interval>().unwrap(), Interval::REAL);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for s in ["", "(", "0,1", "(0;1)", "{0,1}", "(a,1)", "(1,0)", "(NaN,1)"] {
            assert!(s.parse::<Interval>().is_err(), "accepted {:?}", s);
        }
    }

    #[test]
    fn test_limits_lookup_and_order() {
        assert_eq!(LIMITS.len(), 3);
        assert!(!LIMITS.is_empty());
        assert_eq!(LIMITS.names().collect::<Vec<_>>(), vec!["x", "μ", "s"]);
        assert_eq!(LIMITS.get("s"), Some(Interval::POSITIVE));
        assert_eq!(LIMITS.get("σ"), None);
    }

    #[test]
    fn test_check_limits_ok_and_partial_args() {
        assert!(check_limits(&LIMITS, &[("x", -3.0), ("μ", 1.0), ("s", 0.1)]).is_ok());
        // `x` declared but not passed.
        assert!(check_limits(&LIMITS, &[("μ", 1.0), ("s", 0.1)]).is_ok());
    }

    #[test]
    fn test_check_limits_reports_first_violation() {
        let err = check_limits(&LIMITS, &[("x", f64::NAN), ("s", 0.0)]).unwrap_err();
        assert_eq!(err.parameter(), Some("x"));

        let err = check_limits(&LIMITS, &[("x", 0.0), ("μ", 0.0), ("s", -1.0)]).unwrap_err();
        match &err {
            Error::Domain { parameter, interval, value } => {
                assert_eq!(parameter, "s");
                assert_eq!(*interval, Interval::POSITIVE);
                assert_eq!(*value, -1.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.to_string(), "Domain error: s = -1 outside (0,∞)");
    }

    #[test]
    fn test_check_limits_unknown_parameter() {
        let err = check_limits(&LIMITS, &[("σ", 1.0)]).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(err.parameter(), None);
    }

    #[test]
    fn test_serde_roundtrip_interval_and_table() {
        let json = serde_json::to_string(&LIMITS).unwrap();
        assert_eq!(json, r#"{"x":"(-∞,∞)","μ":"(-∞,∞)","s":"(0,∞)"}"#);

        let i: Interval = serde_json::from_str(r#""[0,1]""#).unwrap();
        assert_eq!(i, Interval::UNIT);
        assert!(serde_json::from_str::<Interval>(r#""0..1""#).is_err());
    }

    proptest! {
        #[test]
        fn prop_display_parse_agree(a in -1e6f64..1e6, w in 1e-3f64..1e6, lc in any::<bool>(), uc in any::<bool>()) {
            let lower = if lc { Bound::Closed(a) } else { Bound::Open(a) };
            let upper = if uc { Bound::Closed(a + w) } else { Bound::Open(a + w) };
            let i = Interval::new(lower, upper);
            let back: Interval = i.to_string().parse().unwrap();
            prop_assert_eq!(back, i);
        }

        #[test]
        fn prop_positive_matches_sign(v in -1e300f64..1e300) {
            prop_assert_eq!(Interval::POSITIVE.contains(v), v > 0.0);
        }
    }
}
