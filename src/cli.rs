//! Argument handling for the `create-android-world` binary.
//!
//! Arguments are read pairwise as `--flag value`:
//!
//! ```text
//! create-android-world --port 5001 --uuid abc123 --status stopped
//! ```
//!
//! Unrecognized flags are skipped together with the value that follows them,
//! so wrappers can pass extra options through without breaking the call. A
//! recognized flag left without a value at the end is ignored as well.

use crate::environment::domain::{EnvironmentDomainError, Port};
use crate::environment::services::{ReconcileRequest, ReconcileResult};
use thiserror::Error;

/// Parsed command-line arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// Reconciliation request built from the flags.
    pub request: ReconcileRequest,
    /// Container image to render a `docker run` command for, if requested.
    pub image: Option<String>,
}

/// Errors returned while parsing arguments.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CliError {
    /// A flag value failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] EnvironmentDomainError),
}

/// Parses arguments, excluding the program name.
///
/// # Errors
///
/// Returns [`CliError::InvalidInput`] when `--port` is not an integer in
/// `1..=65535` or `--adb-port` is not an integer in `0..=65535`. An adb port
/// of `0` leaves the adb port derived from the control port.
pub fn parse_args<I, T>(args: I) -> Result<CliArgs, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let mut parsed = CliArgs::default();
    let mut iter = args.into_iter().map(Into::into);

    while let Some(flag) = iter.next() {
        let Some(raw) = iter.next() else {
            break;
        };
        if is_known_flag(&flag) {
            parsed = apply_flag(parsed, &flag, raw)?;
        }
    }

    Ok(parsed)
}

fn is_known_flag(flag: &str) -> bool {
    matches!(
        flag,
        "--host"
            | "--port"
            | "--adb-port"
            | "--container-name"
            | "--name"
            | "--description"
            | "--uuid"
            | "--for-annotation"
            | "--status"
            | "--image"
    )
}

fn apply_flag(mut parsed: CliArgs, flag: &str, raw: String) -> Result<CliArgs, CliError> {
    let request = std::mem::take(&mut parsed.request);
    parsed.request = match flag {
        "--host" => request.with_host(raw),
        "--port" => request.with_control_port(Port::parse(&raw)?.get()),
        "--adb-port" => request.with_adb_port(parse_adb_port(&raw)?),
        "--container-name" => request.with_container_name(raw),
        "--name" => request.with_display_name(raw),
        "--description" => request.with_description(raw),
        "--uuid" => request.with_id(raw),
        "--for-annotation" => request.with_for_annotation(raw == "true"),
        "--status" => request.with_status(raw),
        "--image" => {
            parsed.image = Some(raw);
            request
        }
        _ => request,
    };
    Ok(parsed)
}

/// Parses an adb port, where `0` means "derive from the control port".
fn parse_adb_port(raw: &str) -> Result<u16, EnvironmentDomainError> {
    match raw.trim().parse::<u16>() {
        Ok(0) => Ok(0),
        _ => Port::parse(raw).map(Port::get),
    }
}

/// Renders the human-readable summary printed after a successful run.
///
/// The first line is the world id alone, so callers can read it with
/// `head -n1`.
#[must_use]
pub fn render_summary(result: &ReconcileResult, image: Option<&str>) -> String {
    let record = &result.record;
    let provisioning = record.provisioning();
    let ports = record.ports();

    let mut lines = vec![
        result.id.to_string(),
        format!("outcome: {}", result.outcome),
        format!("name: {}", record.display_name()),
        format!("host: {}", record.host()),
        format!(
            "control port: {} (container {})",
            ports.control(),
            container_port_for(result, ports.control())
        ),
        format!(
            "adb port: {} (container {})",
            ports.adb(),
            container_port_for(result, ports.adb())
        ),
        format!("container: {}", provisioning.container_name()),
    ];
    if let Some(image_ref) = image {
        lines.push(provisioning.render_run_command(image_ref));
    }
    lines.join("\n")
}

fn container_port_for(result: &ReconcileResult, host_port: Port) -> &str {
    result
        .record
        .provisioning()
        .runtime()
        .port_mapping()
        .iter()
        .find(|(_, mapped)| **mapped == host_port)
        .map_or("unmapped", |(container_port, _)| container_port.as_str())
}
