use super::{SinkDriver, SinkKind, SinkTarget};
use crate::emitter::{Emitter, Hook, SeverityFilter};
use crate::options::OptionMap;
use crate::setup::SetupError;
use crate::severity::Severity;
use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::debug;

const ALLOWED_KEYS: &[&str] = &["fluentd.address", "fluentd.tag", "fluentd.level"];

/// Address used when `fluentd.address` is absent.
pub const DEFAULT_ADDRESS: &str = "localhost:24224";

/// Severity used when `fluentd.level` is absent.
pub const DEFAULT_LEVEL: Severity = Severity::Info;

/// Bound on the one-shot connection handshake; setup never retries.
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

/// Remote structured-log collector. The delivery protocol only supports
/// per-level opt-in firing, so the installed hook carries the at-or-above
/// enumeration instead of a threshold.
pub struct FluentdDriver;

impl SinkDriver for FluentdDriver {
    fn kind(&self) -> SinkKind {
        SinkKind::Fluentd
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
        let level = match options.get("fluentd.level") {
            Some(raw) => raw
                .parse::<Severity>()
                .map_err(|source| SetupError::InvalidLevel {
                    sink: SinkKind::Fluentd,
                    source,
                })?,
            None => DEFAULT_LEVEL,
        };

        let address = options
            .get("fluentd.address")
            .map_or(DEFAULT_ADDRESS, String::as_str);
        let target = split_host_port(address).ok_or_else(|| SetupError::UnreachableTarget {
            sink: SinkKind::Fluentd,
            address: address.to_string(),
            reason: "expected <host>:<port> with a numeric port".to_string(),
        })?;

        let tag = options.get("fluentd.tag").map_or(tag, String::as_str);

        let connection = handshake(&target).map_err(|err| SetupError::UnreachableTarget {
            sink: SinkKind::Fluentd,
            address: address.to_string(),
            reason: err.to_string(),
        })?;

        debug!(level = %level, target = %target, tag, "installing fluentd hook");
        emitter.add_hook(Hook::fluentd(
            SeverityFilter::Exact(level.fire_levels()),
            target,
            tag,
            connection,
        ));
        Ok(())
    }
}

/// Splits a combined `host:port` value, accepting bracketed IPv6 hosts
/// (`[::1]:24224`). Returns `None` when the port is missing or non-numeric.
fn split_host_port(address: &str) -> Option<SinkTarget> {
    let (host, port) = address.rsplit_once(':')?;
    let port = port.parse::<u16>().ok()?;
    let host = if let Some(inner) = host.strip_prefix('[') {
        inner.strip_suffix(']')?
    } else if host.contains(':') {
        // Unbracketed IPv6 is ambiguous; reject it like net.SplitHostPort.
        return None;
    } else {
        host
    };
    if host.is_empty() {
        return None;
    }
    Some(SinkTarget {
        host: host.to_string(),
        port,
    })
}

/// One bounded synchronous dial. The established connection is handed to the
/// hook for the delivery layer to use; there is no retry here.
fn handshake(target: &SinkTarget) -> io::Result<TcpStream> {
    let mut last_err = None;
    for addr in (target.host.as_str(), target.port).to_socket_addrs()? {
        match TcpStream::connect_timeout(&addr, HANDSHAKE_TIMEOUT) {
            Ok(stream) => return Ok(stream),
            Err(err) => last_err = Some(err),
        }
    }
    Err(last_err.unwrap_or_else(|| io::Error::other("address resolved to no candidates")))
}
