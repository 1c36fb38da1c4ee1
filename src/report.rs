//! Formatting of measured times and memory sizes

use std::fmt;
use std::time::Duration;

/// Wall-clock time of a whole run, as `[d] hh:mm:ss`
pub struct PrettyDuration(pub Duration);

impl fmt::Display for PrettyDuration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut t = self.0.as_secs();
        let s = t % 60;
        t /= 60;
        let min = t % 60;
        t /= 60;
        let hr = t % 24;
        let d = t / 24;
        if d > 0 {
            write!(f, "{}d {:02}:{:02}:{:02}", d, hr, min, s)
        } else {
            write!(f, "{:02}:{:02}:{:02}", hr, min, s)
        }
    }
}

/// A short time, printed with the nearest SI prefix at fixed width
pub struct Seconds(pub f64);

impl From<Duration> for Seconds {
    fn from(d: Duration) -> Self {
        Seconds(d.as_secs_f64())
    }
}

impl fmt::Display for Seconds {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0 == 0.0 {
            return write!(f, "{: >8.2}  s", 0.0);
        }
        // find nearest SI prefix, no smaller than nano and no larger than unity
        let power = 3.0 * (self.0.abs().log10() / 3.0).floor();
        let power = power.min(0.0f64).max(-9.0f64) as i32;
        let (unit, scale) = match power {
            -9  => ("ns", 1.0e9),
            -6  => ("\u{03bc}s", 1.0e6),
            -3  => ("ms", 1.0e3),
            _   => (" s", 1.0)
        };
        write!(f, "{: >8.2} {}", scale * self.0, unit)
    }
}

/// A number of bytes, printed with a binary prefix
pub struct Bytes(pub usize);

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let units = ["B", "KiB", "MiB", "GiB"];
        let mut value = self.0 as f64;
        let mut i = 0;
        while value >= 1024.0 && i < units.len() - 1 {
            value /= 1024.0;
            i += 1;
        }
        if i == 0 {
            write!(f, "{} {}", self.0, units[0])
        } else {
            write!(f, "{:.2} {}", value, units[i])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_format() {
        let t = 2.6e-4_f64;
        let output = Seconds(t).to_string();
        println!("\"{}\" => \"{}\"", t, output);
        assert_eq!(output, "  260.00 \u{03bc}s");
        assert_eq!(Seconds(12.5).to_string(), "   12.50  s");
        assert_eq!(Seconds::from(Duration::from_nanos(75)).to_string(), "   75.00 ns");
        assert_eq!(Seconds(0.0).to_string(), "    0.00  s");
    }

    #[test]
    fn duration_format() {
        assert_eq!(PrettyDuration(Duration::from_secs(3725)).to_string(), "01:02:05");
        assert_eq!(PrettyDuration(Duration::from_secs(90_061)).to_string(), "1d 01:01:01");
    }

    #[test]
    fn byte_format() {
        assert_eq!(Bytes(512).to_string(), "512 B");
        assert_eq!(Bytes(1536).to_string(), "1.50 KiB");
        assert_eq!(Bytes(3 * 1024 * 1024).to_string(), "3.00 MiB");
    }
}
