//! Provisioning data handed to the external container runtime.
//!
//! Nothing here is executed. The structures are persisted alongside the world
//! record and read by out-of-band tooling that starts the container, so the
//! serialized shape must stay stable.

use super::{Port, PortAssignment};
use crate::shell::shell_escape;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Container-side ports that host ports are published to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerPorts {
    /// Port the device control service listens on inside the container.
    pub control: Port,
    /// Port adb listens on inside the container.
    pub adb: Port,
}

impl Default for ContainerPorts {
    fn default() -> Self {
        Self {
            control: Port::from_static(5000),
            adb: Port::from_static(5556),
        }
    }
}

/// Host-independent part of the container runtime configuration.
///
/// Every world registered by one registrar shares this template; only the
/// published ports and the container name vary per world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningTemplate {
    /// Whether the container runs privileged (required by the emulator).
    pub privileged: bool,
    /// Volume mounts in `host:container` form.
    pub volumes: Vec<String>,
    /// Environment variables passed to the container.
    pub environment: BTreeMap<String, String>,
    /// Extra `/etc/hosts` entries in `name:address` form.
    pub extra_hosts: Vec<String>,
    /// Container-side ports.
    pub container_ports: ContainerPorts,
}

impl ProvisioningTemplate {
    /// Default outbound proxy reachable from inside the container.
    pub const DEFAULT_PROXY: &'static str = "http://host.docker.internal:7897";

    /// Default volume mount for the shared android world directory.
    pub const DEFAULT_VOLUME: &'static str = "/var/lib/android_world:/aw";

    /// Returns the proxy environment for the given proxy URL.
    #[must_use]
    pub fn proxy_environment(proxy: &str) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("HTTP_PROXY".to_owned(), proxy.to_owned()),
            ("HTTPS_PROXY".to_owned(), proxy.to_owned()),
            ("NO_PROXY".to_owned(), "localhost,127.0.0.1".to_owned()),
        ])
    }

    /// Builds the provisioning config for one world.
    #[must_use]
    pub fn instantiate(
        &self,
        container_name: impl Into<String>,
        ports: PortAssignment,
    ) -> ProvisioningConfig {
        let port_mapping = BTreeMap::from([
            (self.container_ports.control.to_string(), ports.control()),
            (self.container_ports.adb.to_string(), ports.adb()),
        ]);

        ProvisioningConfig {
            control_port: ports.control(),
            adb_port: ports.adb(),
            container_name: container_name.into(),
            runtime: ContainerRuntimeConfig {
                privileged: self.privileged,
                volumes: self.volumes.clone(),
                environment: self.environment.clone(),
                extra_hosts: self.extra_hosts.clone(),
                port_mapping,
            },
        }
    }
}

impl Default for ProvisioningTemplate {
    fn default() -> Self {
        Self {
            privileged: true,
            volumes: vec![Self::DEFAULT_VOLUME.to_owned()],
            environment: Self::proxy_environment(Self::DEFAULT_PROXY),
            extra_hosts: vec!["host.docker.internal:host-gateway".to_owned()],
            container_ports: ContainerPorts::default(),
        }
    }
}

/// Provisioning config persisted as the record's `config` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisioningConfig {
    #[serde(rename = "android_port")]
    control_port: Port,
    adb_port: Port,
    container_name: String,
    #[serde(rename = "docker_config")]
    runtime: ContainerRuntimeConfig,
}

impl ProvisioningConfig {
    /// Returns the host control port.
    #[must_use]
    pub const fn control_port(&self) -> Port {
        self.control_port
    }

    /// Returns the host adb port.
    #[must_use]
    pub const fn adb_port(&self) -> Port {
        self.adb_port
    }

    /// Returns the container name.
    #[must_use]
    pub fn container_name(&self) -> &str {
        &self.container_name
    }

    /// Returns the container runtime parameters.
    #[must_use]
    pub const fn runtime(&self) -> &ContainerRuntimeConfig {
        &self.runtime
    }

    /// Renders the container runtime `run` arguments for `image`.
    ///
    /// The arguments exclude the runtime binary itself.
    #[must_use]
    pub fn run_args(&self, image: &str) -> Vec<String> {
        let runtime = &self.runtime;
        let mut args = vec![
            "run".to_owned(),
            "-d".to_owned(),
            "--name".to_owned(),
            self.container_name.clone(),
        ];
        if runtime.privileged {
            args.push("--privileged".to_owned());
        }
        for (container_port, host_port) in &runtime.port_mapping {
            args.push("-p".to_owned());
            args.push(format!("{host_port}:{container_port}"));
        }
        for volume in &runtime.volumes {
            args.push("-v".to_owned());
            args.push(volume.clone());
        }
        for (key, value) in &runtime.environment {
            args.push("-e".to_owned());
            args.push(format!("{key}={value}"));
        }
        for host in &runtime.extra_hosts {
            args.push("--add-host".to_owned());
            args.push(host.clone());
        }
        args.push(image.to_owned());
        args
    }

    /// Renders a `docker run` command line for `image`, one shell word per
    /// argument.
    #[must_use]
    pub fn render_run_command(&self, image: &str) -> String {
        let mut command = String::from("docker");
        for arg in self.run_args(image) {
            command.push(' ');
            command.push_str(&shell_escape(&arg));
        }
        command
    }
}

/// Container runtime parameters persisted as `config.docker_config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRuntimeConfig {
    privileged: bool,
    volumes: Vec<String>,
    environment: BTreeMap<String, String>,
    extra_hosts: Vec<String>,
    port_mapping: BTreeMap<String, Port>,
}

impl ContainerRuntimeConfig {
    /// Returns whether the container runs privileged.
    #[must_use]
    pub const fn privileged(&self) -> bool {
        self.privileged
    }

    /// Returns the volume mounts.
    #[must_use]
    pub fn volumes(&self) -> &[String] {
        &self.volumes
    }

    /// Returns the container environment.
    #[must_use]
    pub const fn environment(&self) -> &BTreeMap<String, String> {
        &self.environment
    }

    /// Returns the extra host entries.
    #[must_use]
    pub fn extra_hosts(&self) -> &[String] {
        &self.extra_hosts
    }

    /// Returns the container-port to host-port table.
    #[must_use]
    pub const fn port_mapping(&self) -> &BTreeMap<String, Port> {
        &self.port_mapping
    }
}
