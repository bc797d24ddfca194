//! Canonical JSON utilities (dash_io)
//! - Objects: keys sorted lexicographically (UTF-8 codepoint order)
//! - Arrays: order preserved (view records already carry display order)
//! - Output: compact, no trailing newline; `pretty` variant for humans
//! - Atomic write: temp file in same dir + fsync(temp) + rename; fsync(dir) on Unix

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

/// Convert a `Value` to canonical JSON bytes.
pub fn to_canonical_bytes(v: &Value) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::with_capacity(1024);
    write_canonical_value(v, &mut out)?;
    Ok(out)
}

/// Sorted keys, two-space indentation, trailing newline.
pub fn to_pretty_sorted_bytes(v: &Value) -> Result<Vec<u8>, serde_json::Error> {
    let sorted = sort_keys(v);
    let mut out = serde_json::to_vec_pretty(&sorted)?;
    out.push(b'\n');
    Ok(out)
}

/// Write `bytes` to `path` atomically, creating parent directories.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;

    let tmp = make_unique_tmp_path(path);
    let res: io::Result<()> = (|| {
        let mut tf = OpenOptions::new().write(true).create_new(true).open(&tmp)?;
        tf.write_all(bytes)?;
        tf.sync_all()?;
        drop(tf);
        fs::rename(&tmp, path)
    })();

    if let Err(err) = res {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }
    let _ = fsync_dir(&parent);
    Ok(())
}

/// Canonical (compact) JSON of `v`, written atomically.
pub fn write_canonical_file(path: &Path, v: &Value) -> io::Result<()> {
    let bytes = to_canonical_bytes(v).map_err(io::Error::from)?;
    write_atomic(path, &bytes)
}

fn write_canonical_value(v: &Value, out: &mut Vec<u8>) -> Result<(), serde_json::Error> {
    match v {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            serde_json::to_writer(&mut *out, v)?;
        }
        Value::Array(arr) => {
            out.push(b'[');
            for (i, elem) in arr.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_canonical_value(elem, out)?;
            }
            out.push(b']');
        }
        Value::Object(map) => {
            out.push(b'{');
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_unstable();
            for (i, k) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                serde_json::to_writer(&mut *out, k)?;
                out.push(b':');
                write_canonical_value(&map[k.as_str()], out)?;
            }
            out.push(b'}');
        }
    }
    Ok(())
}

fn sort_keys(v: &Value) -> Value {
    match v {
        Value::Array(arr) => Value::Array(arr.iter().map(sort_keys).collect()),
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_unstable();
            let mut out = serde_json::Map::new();
            for k in keys {
                out.insert(k.clone(), sort_keys(&map[k.as_str()]));
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}

/// "<filename>.<pid>.<counter>.tmp" next to `target`.
fn make_unique_tmp_path(target: &Path) -> PathBuf {
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let pid = std::process::id();
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let fname = target.file_name().and_then(|s| s.to_str()).unwrap_or("file");
    let tmp_name = format!("{fname}.{pid}.{n}.tmp");

    match target.parent() {
        Some(dir) => dir.join(tmp_name),
        None => PathBuf::from(tmp_name),
    }
}

#[cfg(unix)]
fn fsync_dir(dir: &Path) -> io::Result<()> {
    let df = OpenOptions::new().read(true).open(dir)?;
    df.sync_all()
}

#[cfg(not(unix))]
#[inline]
fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn view_keys_sorted_model_order_kept() {
        let v = json!({
            "tab": "comparison",
            "chart": [ {"name":"LogisticReg","precision":85.7}, {"name":"AdaBoost","precision":83.3} ],
            "best": { "roc_auc": "0.9424", "precision": "85.71%" }
        });
        let s = String::from_utf8(to_canonical_bytes(&v).unwrap()).unwrap();
        assert_eq!(
            s,
            r#"{"best":{"precision":"85.71%","roc_auc":"0.9424"},"chart":[{"name":"LogisticReg","precision":85.7},{"name":"AdaBoost","precision":83.3}],"tab":"comparison"}"#
        );
    }

    #[test]
    fn strings_are_escaped() {
        let v = json!({"q": "a\"b≥"});
        let s = String::from_utf8(to_canonical_bytes(&v).unwrap()).unwrap();
        assert_eq!(s, "{\"q\":\"a\\\"b≥\"}");
    }

    #[test]
    fn atomic_write_replaces_target() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("nested").join("view.json");
        write_canonical_file(&p, &json!({"b": 2, "a": 1})).unwrap();
        write_canonical_file(&p, &json!({"a": 3})).unwrap();
        assert_eq!(fs::read_to_string(&p).unwrap(), r#"{"a":3}"#);
        let leftovers: Vec<_> = fs::read_dir(p.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn pretty_output_ends_with_newline() {
        let bytes = to_pretty_sorted_bytes(&json!({"b": 1, "a": 2})).unwrap();
        let s = String::from_utf8(bytes).unwrap();
        assert!(s.ends_with("}\n"));
        assert!(s.find("\"a\"").unwrap() < s.find("\"b\"").unwrap());
    }
}
