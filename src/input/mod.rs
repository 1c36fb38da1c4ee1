//! Parse the optional configuration file

use std::path::Path;
use std::ops::Add;
use yaml_rust::{YamlLoader, yaml::Yaml};
use evalexpr::*;

mod error;
mod types;

pub use error::*;
pub use types::*;

/// Represents the input configuration, which supplies default values
/// for the options of each command.
///
/// Values may be given as mathematical expressions, which are evaluated
/// using the constants defined in a dedicated section:
/// ```text
/// constants:
///   digits: 200
/// runtime:
///   digits: digits
///   samples: digits / 10
/// ```
pub struct Config {
    input: Yaml,
    ctx: HashMapContext,
}

impl Config {
    /// Loads a configuration file.
    /// Fails if the file cannot be opened or if it is not
    /// YAML-formatted.
    pub fn from_file(path: &Path) -> Result<Self, InputError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|_| InputError::file())?;
        Self::from_string(&contents)
    }

    /// Loads a YAML configuration from a string.
    /// Fails if the string is not formatted correctly.
    pub fn from_string(s: &str) -> Result<Self, InputError> {
        let input = YamlLoader::load_from_str(s)
            .map_err(|_| InputError::file())?;
        let input = input.first()
            .ok_or(InputError::file())?;

        Ok(Config {
            input: input.clone(),
            ctx: HashMapContext::new(),
        })
    }

    /// Loads mathematical constants and functions,
    /// then evaluates the named values given in `section`.
    pub fn with_context(&mut self, section: &str) -> Result<&mut Self, InputError> {
        use helper::context_function;

        let mut ctx = context_map! {
            "pi" => std::f64::consts::PI,
            "tau" => std::f64::consts::TAU,
            "e" => std::f64::consts::E,
        }.map_err(|_| InputError::conversion(section, "pi"))?;

        context_function!(ctx, section, "sqrt",  f64::sqrt);
        context_function!(ctx, section, "cbrt",  f64::cbrt);
        context_function!(ctx, section, "abs",   f64::abs);
        context_function!(ctx, section, "exp",   f64::exp);
        context_function!(ctx, section, "ln",    f64::ln);
        context_function!(ctx, section, "log2",  f64::log2);
        context_function!(ctx, section, "log10", f64::log10);
        context_function!(ctx, section, "floor", f64::floor);
        context_function!(ctx, section, "ceil",  f64::ceil);
        context_function!(ctx, section, "round", f64::round);

        self.ctx = ctx;

        let entries = match self.input[section].as_hash() {
            Some(hash) => hash,
            None => return Ok(self),
        };

        for (a, b) in entries {
            // grab the value, if possible
            let (key, value) = match (a, b) {
                (Yaml::String(k), Yaml::Integer(i)) => (Some(k), Some(*i as f64)),
                (Yaml::String(k), Yaml::Real(s)) => (Some(k), s.parse::<f64>().ok()),
                (Yaml::String(k), Yaml::String(s)) => (Some(k), eval_number_with_context(s, &self.ctx).ok()),
                _ => (None, None),
            };

            // insert it into the context so it's available for the next read
            match (key, value) {
                (Some(k), Some(v)) => {
                    self.ctx.set_value(k.clone(), Value::from(v))
                        .map_err(|_| InputError::conversion(section, k))?;
                },
                (Some(k), None) => return Err(InputError::conversion(section, k)),
                _ => {},
            }
        }

        Ok(self)
    }

    /// Locates a key-value pair in the configuration file and attempts
    /// to parse the value as the specified type.
    /// The path to the key-value pair is specified by a string of colon-separated
    /// sections, e.g. `'runtime:digits'`.
    pub fn read<T, S>(&self, path: S) -> Result<T, InputError>
    where
        T: FromYaml,
        S: AsRef<str>,
    {
        let address: Vec<&str> = path.as_ref().split(':').collect();
        let value = address.iter()
            .try_fold(&self.input, |y, s| {
                if y[*s].is_badvalue() {
                    Err(InputError::location(path.as_ref(), s))
                } else {
                    Ok(&y[*s])
                }
            })?;

        let key = address.last().copied().unwrap_or_default();
        T::from_yaml(value.clone(), &self.ctx)
            .map_err(|_| InputError::conversion(path.as_ref(), key))
    }

    /// Like `Config::read`, but returns `None` rather than an error
    /// if the key is absent.
    pub fn read_optional<T, S>(&self, path: S) -> Result<Option<T>, InputError>
    where
        T: FromYaml,
        S: AsRef<str>,
    {
        match self.read(path) {
            Ok(v) => Ok(Some(v)),
            Err(e) if e.kind() == InputErrorKind::Location => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Locates a key-value pair in the configuration file and attempts
    /// to parse it as a looped variable, returning a Vec of the values.
    /// The loop is defined by a `start`, `stop` and `step`:
    ///
    /// ```text
    /// sequences:
    ///     position:
    ///         start: 10
    ///         stop: 50
    ///         step: 20
    /// ```
    /// yields `[10, 30, 50]`. A plain value yields a Vec of length 1.
    pub fn read_loop<T, S>(&self, path: S) -> Result<Vec<T>, InputError>
    where
        T: FromYaml + PartialOrd + Add<Output=T> + Copy,
        S: AsRef<str> {
        let key = path.as_ref();

        if self.read::<T, _>(format!("{}{}", key, ":start").as_str()).is_err() {
            let value = self.read(path)?;
            Ok(vec![value])
        }
        else { // 'start' value found
            let start = self.read(format!("{}{}", key, ":start").as_str())?;
            let stop = self.read(format!("{}{}", key, ":stop").as_str())?;
            let step: T = self.read(format!("{}{}", key, ":step").as_str())?;

            // a step that does not advance would never reach 'stop'
            if start + step <= start {
                return Err(InputError::conversion(key, "step"));
            }

            let mut v: Vec<T> = Vec::new();
            let mut x = start;
            while x <= stop {
                v.push(x);
                x = x + step;
            }
            Ok(v)
        }
    }
}

mod helper {
    macro_rules! context_function {
        ($ctx:expr, $section:expr, $name:literal, $func:expr) => {
            $ctx.set_function(
                $name.to_string(),
                Function::new(|arg| {
                    let x = arg.as_number()?;
                    Ok(Value::Float($func(x)))
                })
            ).map_err(|_| InputError::conversion($section, $name))?
        };
    }

    pub(super) use context_function;
}
