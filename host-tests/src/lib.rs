//! Host-based tests for the update client
//! These tests run on the development machine, not on the ESP32. The
//! transport, installer and restart are scripted fakes so whole cycles can
//! be driven and observed.

use update_core::{
    ConfigError, DeviceIdentity, HardwareInfo, HttpResponse, ImageKind, InstallError, Installer,
    ManifestRequest, Restart, Transport, TransportError, UpdateClient,
};

/// Answers every manifest request with the same canned result.
pub struct ScriptedServer {
    pub response: Result<HttpResponse, TransportError>,
    pub config_error: Option<ConfigError>,
    pub requests: Vec<ManifestRequest>,
}

impl ScriptedServer {
    pub fn body(body: &str) -> Self {
        Self::respond(Ok(HttpResponse::ok(body)))
    }

    pub fn respond(response: Result<HttpResponse, TransportError>) -> Self {
        Self {
            response,
            config_error: None,
            requests: Vec::new(),
        }
    }
}

impl Transport for ScriptedServer {
    fn prepare(&mut self) -> Result<(), ConfigError> {
        match &self.config_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    fn get(&mut self, request: &ManifestRequest) -> Result<HttpResponse, TransportError> {
        self.requests.push(request.clone());
        self.response.clone()
    }
}

/// Records install calls; fails the configured image kind.
#[derive(Default)]
pub struct RecordingInstaller {
    pub calls: Vec<(ImageKind, String)>,
    pub fail: Option<(ImageKind, InstallError)>,
}

impl RecordingInstaller {
    pub fn failing(kind: ImageKind, error: InstallError) -> Self {
        Self {
            calls: Vec::new(),
            fail: Some((kind, error)),
        }
    }

    pub fn count(&self, kind: ImageKind) -> usize {
        self.calls.iter().filter(|(k, _)| *k == kind).count()
    }
}

impl Installer for RecordingInstaller {
    fn install(&mut self, kind: ImageKind, url: &str) -> Result<(), InstallError> {
        self.calls.push((kind, url.to_string()));
        match &self.fail {
            Some((failing, error)) if *failing == kind => Err(error.clone()),
            _ => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct CountingRestart {
    pub restarts: u32,
}

impl Restart for CountingRestart {
    fn restart(&mut self) {
        self.restarts += 1;
    }
}

pub type TestClient = UpdateClient<ScriptedServer, RecordingInstaller, CountingRestart>;

pub fn identity(is_core: bool) -> DeviceIdentity {
    DeviceIdentity {
        server: "http://u.example/ota".to_string(),
        device: "SENSOR".to_string(),
        version: "1.0.0".to_string(),
        build: "b1".to_string(),
        is_core,
    }
}

pub fn hardware() -> HardwareInfo {
    HardwareInfo::new([0x24, 0x0a, 0xc4, 0x12, 0x34, 0x56], 0x00c0ffee, 4 << 20, 0x18_0000)
}

pub fn client(server: ScriptedServer, installer: RecordingInstaller, is_core: bool) -> TestClient {
    UpdateClient::new(
        identity(is_core),
        hardware(),
        server,
        installer,
        CountingRestart::default(),
    )
}
