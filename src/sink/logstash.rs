use super::{SinkDriver, SinkKind};
use crate::emitter::Emitter;
use crate::options::OptionMap;
use crate::setup::SetupError;

const ALLOWED_KEYS: &[&str] = &["logstash.address", "logstash.protocol"];

/// Second remote collector. It takes part in option validation so its keys
/// are reserved and misspellings are caught, but installation is disabled
/// until the delivery side has a tested integration.
// TODO(logstash): wire up the installer once an integration environment
// exists to verify the connection defaults against.
pub struct LogstashDriver;

impl SinkDriver for LogstashDriver {
    fn kind(&self) -> SinkKind {
        SinkKind::Logstash
    }

    fn allowed_keys(&self) -> &'static [&'static str] {
        ALLOWED_KEYS
    }

    fn install(
        &self,
        _options: &OptionMap,
        _tag: &str,
        _emitter: &mut Emitter,
    ) -> Result<(), SetupError> {
        Err(SetupError::SinkDisabled {
            sink: SinkKind::Logstash,
        })
    }
}
