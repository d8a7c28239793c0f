use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config_error::ConfigError;
use crate::config_log::Diagnostics;
use crate::config_value::{ConfigValue, Lookup};

/// Characters stripped around keys and values.
const WHITESPACE: &[char] = &[' ', '\t', '\x0B', '\x0C', '\r', '\n'];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    pub delimiter: char,
    pub comment: char,
    pub verbose: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: '=',
            comment: '#',
            verbose: false,
        }
    }
}

impl ParseOptions {
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_comment(mut self, comment: char) -> Self {
        self.comment = comment;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Flat `key=value` configuration loaded eagerly from a file.
///
/// Loading never fails. Problems are recorded in a monotonic error flag
/// (see [`ConfigStore::has_errors`]) and, when `verbose` is set, logged
/// through `tracing`. Later required lookups that miss or fail to coerce
/// also set the flag. The flag is atomic so a loaded store can be shared
/// between threads as-is.
#[derive(Debug)]
pub struct ConfigStore {
    source: String,
    options: ParseOptions,
    diagnostics: Diagnostics,
    values: HashMap<String, String>,
    issues: Vec<ConfigError>,
    error_flag: AtomicBool,
}

impl ConfigStore {
    /// Loads `path` with `=` as delimiter, `#` for comments and no diagnostics.
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self::open_with(path, ParseOptions::default())
    }

    pub fn open_with(path: impl AsRef<Path>, options: ParseOptions) -> Self {
        let path = path.as_ref();
        let source = path.display().to_string();
        match File::open(path) {
            Ok(file) => Self::load(source, BufReader::new(file), options),
            Err(err) => {
                let mut store = Self::empty(source.clone(), options);
                store.record(ConfigError::Open { path: source, source: err });
                store
            }
        }
    }

    /// Parses already-open input, e.g. an in-memory buffer.
    pub fn from_reader<R: BufRead>(reader: R, options: ParseOptions) -> Self {
        Self::load("<reader>".to_string(), reader, options)
    }

    fn empty(source: String, options: ParseOptions) -> Self {
        Self {
            source,
            options,
            diagnostics: Diagnostics::new(options.verbose),
            values: HashMap::new(),
            issues: Vec::new(),
            error_flag: AtomicBool::new(false),
        }
    }

    fn load<R: BufRead>(source: String, mut reader: R, options: ParseOptions) -> Self {
        let mut store = Self::empty(source, options);
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break, // EOF
                Ok(_) => {
                    line_no += 1;
                    let line = String::from_utf8_lossy(&buf);
                    if let Some((key, value)) = parse_line(&line, &options) {
                        store.insert(key, value, line_no);
                    }
                }
                Err(err) => {
                    // Keep what was parsed so far, stop at the first I/O error.
                    let path = store.source.clone();
                    store.record(ConfigError::Read {
                        path,
                        line: line_no + 1,
                        source: err,
                    });
                    break;
                }
            }
        }

        tracing::debug!(
            source = %store.source,
            entries = store.values.len(),
            "config loaded"
        );
        store
    }

    fn insert(&mut self, key: &str, value: &str, line: usize) {
        match self.values.entry(key.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(value.to_string());
            }
            Entry::Occupied(_) => {
                let path = self.source.clone();
                self.record(ConfigError::DuplicateKey {
                    path,
                    key: key.to_string(),
                    line,
                });
            }
        }
    }

    /// Load-time problems: reported, flagged unless a warning, and kept.
    fn record(&mut self, err: ConfigError) {
        self.diagnostics.report(&err);
        if !err.is_warning() {
            self.error_flag.store(true, Ordering::Relaxed);
        }
        self.issues.push(err);
    }

    /// Access-time problems are reported and flagged but not kept.
    fn flag(&self, err: ConfigError) {
        self.diagnostics.report(&err);
        self.error_flag.store(true, Ordering::Relaxed);
    }

    /// Looks up `key` and coerces it to `T`.
    ///
    /// Returns `(true, value)` on success. Otherwise returns `false` with the
    /// fallback for [`Lookup::Fallback`] or `T::not_found()`. Only
    /// [`Lookup::Required`] sets the error flag, once per failed call.
    pub fn get<T: ConfigValue>(&self, key: &str, lookup: Lookup<T>) -> (bool, T) {
        let required = lookup.is_required();
        let raw = match self.values.get(key) {
            Some(raw) => raw,
            None => {
                if required {
                    self.flag(ConfigError::MissingKey {
                        key: key.to_string(),
                    });
                }
                return (false, lookup.into_default());
            }
        };

        match T::coerce(raw) {
            Some(value) => (true, value),
            None => {
                if required {
                    self.flag(ConfigError::Coercion {
                        key: key.to_string(),
                        kind: T::KIND,
                        value: raw.clone(),
                    });
                }
                (false, lookup.into_default())
            }
        }
    }

    pub fn get_string(&self, key: &str) -> (bool, String) {
        self.get(key, Lookup::Required)
    }

    pub fn get_string_optional(&self, key: &str) -> (bool, String) {
        self.get(key, Lookup::Optional)
    }

    /// The boolean still reports presence; `fallback` is only substituted.
    pub fn get_string_or(&self, key: &str, fallback: impl Into<String>) -> (bool, String) {
        self.get(key, Lookup::Fallback(fallback.into()))
    }

    pub fn get_map(&self) -> &HashMap<String, String> {
        &self.values
    }

    /// True once any load step or required lookup has failed. Never resets.
    pub fn has_errors(&self) -> bool {
        self.error_flag.load(Ordering::Relaxed)
    }

    /// Problems found while loading, including duplicate-key warnings.
    pub fn issues(&self) -> &[ConfigError] {
        &self.issues
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Path the store was loaded from, or `<reader>`.
    pub fn source(&self) -> &str {
        &self.source
    }
}

macro_rules! typed_getters {
    ($ty:ty, $required:ident, $optional:ident, $fallback:ident) => {
        impl ConfigStore {
            pub fn $required(&self, key: &str) -> (bool, $ty) {
                self.get(key, Lookup::Required)
            }

            pub fn $optional(&self, key: &str) -> (bool, $ty) {
                self.get(key, Lookup::Optional)
            }

            pub fn $fallback(&self, key: &str, fallback: $ty) -> (bool, $ty) {
                self.get(key, Lookup::Fallback(fallback))
            }
        }
    };
}

typed_getters!(i32, get_int, get_int_optional, get_int_or);
typed_getters!(u32, get_uint, get_uint_optional, get_uint_or);
typed_getters!(i64, get_long, get_long_optional, get_long_or);
typed_getters!(f32, get_float, get_float_optional, get_float_or);
typed_getters!(f64, get_double, get_double_optional, get_double_or);
typed_getters!(bool, get_bool, get_bool_optional, get_bool_or);

/// Splits one raw line into a trimmed `(key, value)` pair.
///
/// Returns `None` for blank lines, comment lines, lines without the
/// delimiter, empty keys, keys containing the comment character and values
/// that are empty once the inline comment is cut off.
fn parse_line<'a>(line: &'a str, options: &ParseOptions) -> Option<(&'a str, &'a str)> {
    let line = line.trim_start_matches(WHITESPACE);
    if line.is_empty() || line.starts_with(options.comment) {
        return None;
    }

    let (key, rest) = line.split_once(options.delimiter)?;
    let key = key.trim_end_matches(WHITESPACE);
    if key.is_empty() || key.contains(options.comment) {
        return None;
    }

    let value = match rest.split_once(options.comment) {
        Some((value, _)) => value,
        None => rest,
    };
    let value = value.trim_matches(WHITESPACE);
    if value.is_empty() {
        return None;
    }

    Some((key, value))
}
