use crate::setup::SetupError;
use crate::sink::SinkKind;
use std::collections::BTreeMap;

/// Flat `key -> value` configuration map supplied once by the caller.
/// A `BTreeMap` keeps iteration deterministic, so the first validation
/// failure is stable across runs.
pub type OptionMap = BTreeMap<String, String>;

/// Returns the entries of `options` namespaced under `prefix`, i.e. every key
/// that literally starts with `"<prefix>."`. Keys keep their namespaced form.
///
/// This is a literal-prefix check, never a pattern or substring match: with
/// prefix `"remote"`, a key `"remoteextra.level"` is not captured.
pub fn scoped_options(prefix: &str, options: &OptionMap) -> OptionMap {
    options
        .iter()
        .filter(|(key, _)| {
            key.strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('.'))
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Rejects `options` if it contains any key absent from `allowed`. Runs
/// before any installer reads values; nothing is partially configured on
/// failure. The first offending key in map order wins.
pub fn validate_options(
    sink: SinkKind,
    options: &OptionMap,
    allowed: &[&str],
) -> Result<(), SetupError> {
    for key in options.keys() {
        if !allowed.contains(&key.as_str()) {
            return Err(SetupError::UnsupportedOption {
                sink,
                key: key.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(entries: &[(&str, &str)]) -> OptionMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_scoped_options_keeps_namespaced_keys() {
        let options = opts(&[
            ("fluentd.level", "debug"),
            ("fluentd.address", "localhost:24224"),
            ("syslog.level", "info"),
        ]);

        let scoped = scoped_options("fluentd", &options);
        assert_eq!(scoped.len(), 2);
        assert_eq!(scoped.get("fluentd.level").map(String::as_str), Some("debug"));
        assert!(!scoped.contains_key("syslog.level"));
    }

    #[test]
    fn test_scoped_options_requires_literal_prefix() {
        let options = opts(&[
            ("remote.level", "info"),
            ("remoteextra.level", "debug"),
            ("xremote.level", "debug"),
            ("remote", "bare key without separator"),
        ]);

        let scoped = scoped_options("remote", &options);
        assert_eq!(scoped.len(), 1);
        assert!(scoped.contains_key("remote.level"));
    }

    #[test]
    fn test_scoped_options_on_empty_map() {
        assert!(scoped_options("fluentd", &OptionMap::new()).is_empty());
    }

    #[test]
    fn test_validate_accepts_allowed_keys() {
        let options = opts(&[("syslog.level", "debug")]);
        assert!(validate_options(SinkKind::Syslog, &options, &["syslog.level"]).is_ok());
    }

    #[test]
    fn test_validate_accepts_empty_map() {
        assert!(validate_options(SinkKind::Syslog, &OptionMap::new(), &["syslog.level"]).is_ok());
    }

    #[test]
    fn test_validate_rejects_unsupported_key() {
        let options = opts(&[("syslog.level", "info"), ("syslog.output", "stderr")]);
        let err = validate_options(SinkKind::Syslog, &options, &["syslog.level"]).unwrap_err();

        match err {
            SetupError::UnsupportedOption { sink, key } => {
                assert_eq!(sink, SinkKind::Syslog);
                assert_eq!(key, "syslog.output");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_reports_first_key_in_map_order() {
        let options = opts(&[("fluentd.aaa", "1"), ("fluentd.zzz", "2")]);
        let err = validate_options(SinkKind::Fluentd, &options, &[]).unwrap_err();

        match err {
            SetupError::UnsupportedOption { key, .. } => assert_eq!(key, "fluentd.aaa"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
