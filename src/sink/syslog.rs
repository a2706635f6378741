use super::{SinkDriver, SinkKind};
use crate::emitter::{Emitter, Hook, SeverityFilter};
use crate::options::OptionMap;
use crate::setup::SetupError;
use crate::severity::Severity;
use tracing::debug;

/// syslog(3) priority values for the severities this subsystem emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Priority {
    Alert = 1,
    Crit = 2,
    Err = 3,
    Warning = 4,
    Info = 6,
    Debug = 7,
}

impl From<Severity> for Priority {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Panic => Priority::Alert,
            Severity::Fatal => Priority::Crit,
            Severity::Error => Priority::Err,
            Severity::Warn => Priority::Warning,
            Severity::Info => Priority::Info,
            Severity::Debug => Priority::Debug,
        }
    }
}

const ALLOWED_KEYS: &[&str] = &["syslog.level"];

/// Severity used when `syslog.level` is absent.
pub const DEFAULT_LEVEL: Severity = Severity::Info;

/// The always-on local sink. Installing it also pins the emitter's global
/// severity threshold and silences the default console destination so records
/// are not emitted twice.
pub struct SyslogDriver;

impl SinkDriver for SyslogDriver {
    fn kind(&self) -> SinkKind {
        SinkKind::Syslog
    }

    fn allowed_keys(&self) -> &'static [&'static str] {
        ALLOWED_KEYS
    }

    fn install(
        &self,
        options: &OptionMap,
        tag: &str,
        emitter: &mut Emitter,
    ) -> Result<(), SetupError> {
        let level = match options.get("syslog.level") {
            Some(raw) => raw
                .parse::<Severity>()
                .map_err(|source| SetupError::InvalidLevel {
                    sink: SinkKind::Syslog,
                    source,
                })?,
            None => DEFAULT_LEVEL,
        };

        emitter.set_threshold(level);
        emitter.silence_console();

        debug!(level = %level, tag, "installing syslog hook");
        emitter.add_hook(Hook::syslog(
            SeverityFilter::AtOrAbove(level),
            Priority::from(level),
            tag,
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::{HookBinding, TimestampStyle};

    fn opts(entries: &[(&str, &str)]) -> OptionMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_priority_mapping() {
        assert_eq!(Priority::from(Severity::Panic), Priority::Alert);
        assert_eq!(Priority::from(Severity::Fatal), Priority::Crit);
        assert_eq!(Priority::from(Severity::Error), Priority::Err);
        assert_eq!(Priority::from(Severity::Warn), Priority::Warning);
        assert_eq!(Priority::from(Severity::Info), Priority::Info);
        assert_eq!(Priority::from(Severity::Debug), Priority::Debug);
    }

    #[test]
    fn test_install_defaults_to_info() {
        let mut emitter = Emitter::new(TimestampStyle::Rfc3339);
        SyslogDriver
            .install(&OptionMap::new(), "app", &mut emitter)
            .unwrap();

        assert_eq!(emitter.threshold(), Severity::Info);
        assert!(!emitter.console_enabled());
        assert_eq!(emitter.hooks().len(), 1);

        let hook = &emitter.hooks()[0];
        assert_eq!(hook.kind(), SinkKind::Syslog);
        assert_eq!(hook.filter(), SeverityFilter::AtOrAbove(Severity::Info));
        match hook.binding() {
            HookBinding::Syslog { priority, tag } => {
                assert_eq!(*priority, Priority::Info);
                assert_eq!(tag, "app");
            }
            other => panic!("unexpected binding: {other:?}"),
        }
    }

    #[test]
    fn test_install_honors_configured_level() {
        let mut emitter = Emitter::new(TimestampStyle::Rfc3339);
        SyslogDriver
            .install(&opts(&[("syslog.level", "debug")]), "app", &mut emitter)
            .unwrap();

        assert_eq!(emitter.threshold(), Severity::Debug);
    }

    #[test]
    fn test_install_fails_on_unparseable_level() {
        let mut emitter = Emitter::new(TimestampStyle::Rfc3339);
        let err = SyslogDriver
            .install(&opts(&[("syslog.level", "bogus")]), "app", &mut emitter)
            .unwrap_err();

        assert!(matches!(
            err,
            SetupError::InvalidLevel {
                sink: SinkKind::Syslog,
                ..
            }
        ));
        assert!(err.is_fatal());
        assert!(emitter.hooks().is_empty());
    }
}
