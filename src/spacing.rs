//! Evenly and logarithmically spaced sample points

use crate::error::SetupError;

/// `num` values evenly spaced over `[start, stop]`.
/// The last value is exactly `stop`.
pub fn linspace(start: f64, stop: f64, num: usize) -> Result<Vec<f64>, SetupError> {
    match num {
        0 => Err(SetupError::too_few_samples(1, 0)),
        1 => Ok(vec![start]),
        _ => {
            let step = (stop - start) / ((num - 1) as f64);
            let mut v: Vec<f64> = (0..num).map(|i| start + (i as f64) * step).collect();
            v[num - 1] = stop;
            Ok(v)
        }
    }
}

/// Like `linspace`, but truncates each value towards zero.
pub fn linspace_int(start: i64, stop: i64, num: usize) -> Result<Vec<i64>, SetupError> {
    let v = linspace(start as f64, stop as f64, num)?
        .into_iter()
        .map(|x| x.trunc() as i64)
        .collect();
    Ok(v)
}

/// `num` values `base^x`, where the exponents x are evenly spaced over
/// `[start, stop]`. At least two samples are required.
pub fn logspace(start: f64, stop: f64, num: usize, base: f64) -> Result<Vec<f64>, SetupError> {
    if num < 2 {
        return Err(SetupError::too_few_samples(2, num));
    }

    let v = linspace(start, stop, num)?
        .into_iter()
        .map(|x| base.powf(x))
        .collect();
    Ok(v)
}

/// Like `logspace`, truncated to unsigned integers, as used for positions
/// in a sequence.
pub fn logspace_int(start: f64, stop: f64, num: usize, base: f64) -> Result<Vec<u64>, SetupError> {
    let v = logspace(start, stop, num, base)?
        .into_iter()
        .map(|x| x.trunc() as u64)
        .collect();
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_logspace() {
        let v = logspace_int(0.0, 3.0, 5, 10.0).unwrap();
        println!("{:?}", v);
        assert_eq!(v, vec![1, 5, 31, 177, 1000]);

        let v = logspace_int(0.0, 4.0, 2, 2.0).unwrap();
        assert_eq!(v, vec![1, 16]);
    }

    #[test]
    fn logspace_endpoints() {
        let v = logspace(1.0, 2.0, 11, 10.0).unwrap();
        assert_eq!(v.len(), 11);
        assert_eq!(v[0], 10.0);
        assert_eq!(v[10], 100.0);
        assert!(v.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn too_few_samples() {
        assert_eq!(logspace(0.0, 3.0, 1, 10.0), Err(SetupError::too_few_samples(2, 1)));
        assert_eq!(logspace_int(0.0, 3.0, 0, 10.0), Err(SetupError::too_few_samples(2, 0)));
        assert_eq!(linspace(0.0, 1.0, 0), Err(SetupError::too_few_samples(1, 0)));
    }

    #[test]
    fn integer_linspace() {
        assert_eq!(linspace_int(1, 10, 4).unwrap(), vec![1, 4, 7, 10]);
        assert_eq!(linspace_int(1, 50, 3).unwrap(), vec![1, 25, 50]);
        assert_eq!(linspace_int(7, 100, 1).unwrap(), vec![7]);
        assert_eq!(linspace_int(5, 5, 3).unwrap(), vec![5, 5, 5]);
    }
}
