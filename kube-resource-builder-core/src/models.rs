use derive_builder::Builder;
use k8s_openapi::api::core::v1::{EnvVar, VolumeMount};
use serde::{Deserialize, Serialize};

pub const RESOURCE_REQUESTS: &str = "Requests";
pub const RESOURCE_LIMIT: &str = "Limit";

pub const ENV_FROM_CONFIG_MAP: &str = "CM";
pub const ENV_FROM_SECRET: &str = "Secret";

/// Simplified description of a single container.
///
/// Every field is optional in practice: an empty string, a zero or an empty list
/// means "leave the corresponding container field unset".
#[derive(Debug, Clone, Default, PartialEq, Builder, Serialize, Deserialize)]
#[builder(default, setter(into))]
#[serde(default, rename_all = "camelCase")]
pub struct ContainerSpec {
    pub image: String,
    pub port: i32,
    pub name: String,
    pub resources: Vec<Resource>,
    pub secrets: Vec<VolumeMount>,
    pub config_maps: Vec<VolumeMount>,
    pub env_variables: Vec<EnvVar>,
    pub user: i64,
    pub env_from_secret_or_cm: Vec<EnvFrom>,
    pub cmd: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PodSpec {
    pub containers: Vec<ContainerSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobSpec {
    pub spec: PodSpec,
    pub name: String,
}

/// CPU (milli-units) and memory (mega-units) constraint of the given kind,
/// either [`RESOURCE_REQUESTS`] or [`RESOURCE_LIMIT`]. Other kinds are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Resource {
    #[serde(rename = "type")]
    pub kind: String,
    pub cpu: i64,
    pub mem: i64,
}

impl Resource {
    pub fn new(kind: &str, cpu: i64, mem: i64) -> Self {
        Self {
            kind: kind.to_owned(),
            cpu,
            mem,
        }
    }
}

/// Reference to a ConfigMap or a Secret whose keys are injected as environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnvFrom {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl EnvFrom {
    pub fn new(name: &str, kind: &str) -> Self {
        Self {
            name: name.to_owned(),
            kind: kind.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KV {
    pub key: String,
    pub value: String,
}

impl KV {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_owned(),
            value: value.to_owned(),
        }
    }
}
