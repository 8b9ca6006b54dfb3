//! Replaying adapters that serve recorded interactions.

pub mod repository;

pub use repository::ReplayingRepository;

use std::sync::Mutex;

use serde_json::Value;

use crate::cassette::replayer::CassetteReplayer;

/// Pop the next recorded output for `port::method`.
///
/// Mirror of `recording::record_interaction`.
pub(crate) fn next_output(replayer: &Mutex<CassetteReplayer>, port: &str, method: &str) -> Value {
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    guard.next_interaction(port, method).output
}

/// Split a `{"ok": v}` / `{"err": msg}` output into a `Result`.
///
/// Mirror of `recording::record_result`. Outputs without either key are
/// treated as `Ok` of the whole value.
pub(crate) fn replay_result(output: Value) -> Result<Value, String> {
    match output {
        Value::Object(mut map) => {
            if let Some(err) = map.remove("err") {
                return Err(err.as_str().map_or_else(|| err.to_string(), str::to_string));
            }
            match map.remove("ok") {
                Some(ok) => Ok(ok),
                None => Ok(Value::Object(map)),
            }
        }
        other => Ok(other),
    }
}
