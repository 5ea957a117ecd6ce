use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// The workflow endpoints the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    LookupMachine,
    CreateMachine,
    CreateContact,
    CreateJob,
    UpdateJob,
    JobsList,
}

impl Endpoint {
    pub const ALL: [Endpoint; 6] = [
        Endpoint::LookupMachine,
        Endpoint::CreateMachine,
        Endpoint::CreateContact,
        Endpoint::CreateJob,
        Endpoint::UpdateJob,
        Endpoint::JobsList,
    ];

    /// Environment variable that overrides this endpoint's URL.
    pub fn env_var(&self) -> &'static str {
        match self {
            Endpoint::LookupMachine => "JOBCARD_FLOW_LOOKUP_MACHINE_URL",
            Endpoint::CreateMachine => "JOBCARD_FLOW_CREATE_MACHINE_URL",
            Endpoint::CreateContact => "JOBCARD_FLOW_CREATE_CONTACT_URL",
            Endpoint::CreateJob => "JOBCARD_FLOW_CREATE_JOB_URL",
            Endpoint::UpdateJob => "JOBCARD_FLOW_UPDATE_JOB_URL",
            Endpoint::JobsList => "JOBCARD_JOBS_API_URL",
        }
    }

    /// Operation name used in error messages and spans.
    pub fn operation(&self) -> &'static str {
        match self {
            Endpoint::LookupMachine => "Lookup",
            Endpoint::CreateMachine => "CreateMachine",
            Endpoint::CreateContact => "CreateContact",
            Endpoint::CreateJob => "CreateJob",
            Endpoint::UpdateJob => "UpdateJob",
            Endpoint::JobsList => "LoadJobs",
        }
    }
}

/// On-disk configuration file (`config.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub endpoints: EndpointsFile,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointsFile {
    #[serde(default)]
    pub lookup_machine_url: Option<String>,
    #[serde(default)]
    pub create_machine_url: Option<String>,
    #[serde(default)]
    pub create_contact_url: Option<String>,
    #[serde(default)]
    pub create_job_url: Option<String>,
    #[serde(default)]
    pub update_job_url: Option<String>,
    #[serde(default)]
    pub jobs_list_url: Option<String>,
}

impl EndpointsFile {
    pub fn get(&self, endpoint: Endpoint) -> Option<&str> {
        let value = match endpoint {
            Endpoint::LookupMachine => &self.lookup_machine_url,
            Endpoint::CreateMachine => &self.create_machine_url,
            Endpoint::CreateContact => &self.create_contact_url,
            Endpoint::CreateJob => &self.create_job_url,
            Endpoint::UpdateJob => &self.update_job_url,
            Endpoint::JobsList => &self.jobs_list_url,
        };
        value.as_deref().filter(|v| !v.trim().is_empty())
    }

    pub fn set(&mut self, endpoint: Endpoint, url: String) {
        let slot = match endpoint {
            Endpoint::LookupMachine => &mut self.lookup_machine_url,
            Endpoint::CreateMachine => &mut self.create_machine_url,
            Endpoint::CreateContact => &mut self.create_contact_url,
            Endpoint::CreateJob => &mut self.create_job_url,
            Endpoint::UpdateJob => &mut self.update_job_url,
            Endpoint::JobsList => &mut self.jobs_list_url,
        };
        *slot = Some(url);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Endpoint URLs as used at runtime.
///
/// Workflow trigger URLs carry a signature in their query string, so they are
/// held as secrets and only exposed when a request is built.
#[derive(Debug, Default)]
pub struct EndpointConfig {
    pub lookup_machine: Option<SecretString>,
    pub create_machine: Option<SecretString>,
    pub create_contact: Option<SecretString>,
    pub create_job: Option<SecretString>,
    pub update_job: Option<SecretString>,
    pub jobs_list: Option<SecretString>,
}

impl EndpointConfig {
    pub fn get(&self, endpoint: Endpoint) -> Option<&SecretString> {
        match endpoint {
            Endpoint::LookupMachine => self.lookup_machine.as_ref(),
            Endpoint::CreateMachine => self.create_machine.as_ref(),
            Endpoint::CreateContact => self.create_contact.as_ref(),
            Endpoint::CreateJob => self.create_job.as_ref(),
            Endpoint::UpdateJob => self.update_job.as_ref(),
            Endpoint::JobsList => self.jobs_list.as_ref(),
        }
    }

    pub fn is_configured(&self, endpoint: Endpoint) -> bool {
        self.get(endpoint).is_some()
    }
}

impl From<&EndpointsFile> for EndpointConfig {
    fn from(file: &EndpointsFile) -> Self {
        let secret = |endpoint| file.get(endpoint).map(|url| SecretString::from(url.trim()));
        Self {
            lookup_machine: secret(Endpoint::LookupMachine),
            create_machine: secret(Endpoint::CreateMachine),
            create_contact: secret(Endpoint::CreateContact),
            create_job: secret(Endpoint::CreateJob),
            update_job: secret(Endpoint::UpdateJob),
            jobs_list: secret(Endpoint::JobsList),
        }
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Default)]
pub struct Config {
    pub endpoints: EndpointConfig,
    pub http: HttpConfig,
}

impl From<ConfigFile> for Config {
    fn from(file: ConfigFile) -> Self {
        Self {
            endpoints: EndpointConfig::from(&file.endpoints),
            http: file.http,
        }
    }
}
