use std::fmt::Display;

use crate::config::ConfigStore;
use crate::config_value::{ConfigValue, Lookup};

/// Evaluates one line typed into `kvcfg-query` and returns the reply,
/// newline terminated.
///
/// ```text
/// GET <key> [fallback]            string lookup (STR is an alias)
/// INT|UINT|LONG|FLOAT|DOUBLE|BOOL <key> [fallback]
/// OPT <type> <key>                optional lookup, never flags an error
/// LIST                            every entry, sorted by key
/// ERRORS                          error flag and load-time issues
/// ```
pub fn process_command(line: &str, store: &ConfigStore) -> String {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.is_empty() {
        return "ERROR unknown command\n".to_string();
    }

    let cmd = parts[0].to_uppercase();
    match cmd.as_str() {
        "LIST" => {
            if parts.len() != 1 {
                return "ERROR invalid arguments\n".to_string();
            }
            list(store)
        }
        "ERRORS" => {
            if parts.len() != 1 {
                return "ERROR invalid arguments\n".to_string();
            }
            let mut out = format!(
                "errors={} issues={}\n",
                store.has_errors(),
                store.issues().len()
            );
            for issue in store.issues() {
                out.push_str(&format!("{} {}\n", issue.code(), issue));
            }
            out
        }
        "OPT" => {
            if parts.len() != 3 {
                return "ERROR invalid arguments\n".to_string();
            }
            typed(&parts[1].to_uppercase(), store, parts[2], None, true)
        }
        _ => {
            if parts.len() < 2 {
                return "ERROR invalid arguments\n".to_string();
            }
            let fallback = if parts.len() > 2 {
                Some(parts[2..].join(" "))
            } else {
                None
            };
            typed(&cmd, store, parts[1], fallback.as_deref(), false)
        }
    }
}

fn typed(
    kind: &str,
    store: &ConfigStore,
    key: &str,
    fallback: Option<&str>,
    optional: bool,
) -> String {
    match kind {
        "GET" | "STR" => lookup::<String>(store, key, fallback, optional),
        "INT" => lookup::<i32>(store, key, fallback, optional),
        "UINT" => lookup::<u32>(store, key, fallback, optional),
        "LONG" => lookup::<i64>(store, key, fallback, optional),
        "FLOAT" => lookup::<f32>(store, key, fallback, optional),
        "DOUBLE" => lookup::<f64>(store, key, fallback, optional),
        "BOOL" => lookup::<bool>(store, key, fallback, optional),
        _ => "ERROR unknown command\n".to_string(),
    }
}

fn lookup<T: ConfigValue + Display>(
    store: &ConfigStore,
    key: &str,
    fallback: Option<&str>,
    optional: bool,
) -> String {
    let mode = match fallback {
        Some(raw) => match T::coerce(raw) {
            Some(value) => Lookup::Fallback(value),
            None => return format!("ERROR fallback is not a valid {}\n", T::KIND),
        },
        None if optional => Lookup::Optional,
        None => Lookup::Required,
    };

    let (found, value) = store.get::<T>(key, mode);
    if found {
        format!("{}\n", value)
    } else if fallback.is_some() {
        format!("{} (fallback)\n", value)
    } else if store.contains_key(key) {
        format!("ERROR can not parse {}\n", T::KIND)
    } else {
        "ERROR key not found\n".to_string()
    }
}

fn list(store: &ConfigStore) -> String {
    let mut entries: Vec<_> = store.get_map().iter().collect();
    if entries.is_empty() {
        return "(no keys)\n".to_string();
    }
    entries.sort();
    entries
        .into_iter()
        .map(|(key, value)| format!("{} = {}\n", key, value))
        .collect()
}
