use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use k8s_openapi::{
    api::core::v1::{
        ConfigMap, ConfigMapEnvSource, EnvFromSource, EnvVar, Secret, SecretEnvSource,
        VolumeMount,
    },
    ByteString,
};
use kube::{core::ObjectMeta, error::ErrorResponse};

use crate::kubernetes::{
    query::ClusterQuery,
    validation::{SERVICE_ACCOUNT_NAME_ANNOTATION, SERVICE_ACCOUNT_TOKEN_KEY},
};

pub const SERVICE_ACCOUNT_TOKEN_TYPE: &str = "kubernetes.io/service-account-token";
pub const TEST_TOKEN: &str = "1asdadasd1";

pub fn construct_mounts(names: &[&str], paths: &[&str]) -> Vec<VolumeMount> {
    names
        .iter()
        .zip(paths)
        .map(|(name, path)| VolumeMount {
            name: name.to_string(),
            mount_path: path.to_string(),
            ..Default::default()
        })
        .collect()
}

pub fn construct_env(names: &[&str], values: &[&str]) -> Vec<EnvVar> {
    names
        .iter()
        .zip(values)
        .map(|(name, value)| EnvVar {
            name: name.to_string(),
            value: Some(value.to_string()),
            ..Default::default()
        })
        .collect()
}

pub fn construct_env_from(names: &[&str], kinds: &[&str]) -> Vec<EnvFromSource> {
    names
        .iter()
        .zip(kinds)
        .map(|(name, kind)| match *kind {
            "Secret" => EnvFromSource {
                secret_ref: Some(SecretEnvSource {
                    name: Some(name.to_string()),
                    optional: None,
                }),
                ..Default::default()
            },
            _ => EnvFromSource {
                config_map_ref: Some(ConfigMapEnvSource {
                    name: Some(name.to_string()),
                    optional: None,
                }),
                ..Default::default()
            },
        })
        .collect()
}

fn construct_metadata(namespace: &str, name: &str) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.to_owned()),
        namespace: Some(namespace.to_owned()),
        ..Default::default()
    }
}

pub fn construct_config_map(namespace: &str, name: &str) -> ConfigMap {
    ConfigMap {
        metadata: construct_metadata(namespace, name),
        ..Default::default()
    }
}

pub fn construct_secret(namespace: &str, name: &str) -> Secret {
    Secret {
        metadata: construct_metadata(namespace, name),
        data: Some(BTreeMap::from([(
            SERVICE_ACCOUNT_TOKEN_KEY.to_owned(),
            ByteString(TEST_TOKEN.as_bytes().to_vec()),
        )])),
        ..Default::default()
    }
}

/// A token secret named after and annotated with `service_account`.
pub fn construct_service_account_secret(namespace: &str, service_account: &str) -> Secret {
    let mut secret = construct_secret(namespace, service_account);
    secret.type_ = Some(SERVICE_ACCOUNT_TOKEN_TYPE.to_owned());
    secret.metadata.annotations = Some(BTreeMap::from([(
        SERVICE_ACCOUNT_NAME_ANNOTATION.to_owned(),
        service_account.to_owned(),
    )]));

    secret
}

/// In-memory stand-in for the cluster, keyed by namespace and name.
#[derive(Default)]
pub struct FakeCluster {
    config_maps: BTreeMap<(String, String), ConfigMap>,
    secrets: BTreeMap<(String, String), Secret>,
    failure: Option<ErrorResponse>,
    lookups: AtomicUsize,
}

impl FakeCluster {
    pub fn with_config_map(mut self, config_map: ConfigMap) -> Self {
        self.config_maps.insert(key_of(&config_map.metadata), config_map);
        self
    }

    pub fn with_secret(mut self, secret: Secret) -> Self {
        self.secrets.insert(key_of(&secret.metadata), secret);
        self
    }

    /// Every call fails with the given API error.
    pub fn failing_with(mut self, response: ErrorResponse) -> Self {
        self.failure = Some(response);
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn record_call(&self) -> Result<(), kube::Error> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        match &self.failure {
            Some(response) => Err(kube::Error::Api(response.clone())),
            None => Ok(()),
        }
    }
}

fn key_of(metadata: &ObjectMeta) -> (String, String) {
    (
        metadata.namespace.clone().unwrap_or_default(),
        metadata.name.clone().unwrap_or_default(),
    )
}

fn key(namespace: &str, name: &str) -> (String, String) {
    (namespace.to_owned(), name.to_owned())
}

/// Supports `type=<secret type>` selectors only; an empty selector matches everything.
fn matches_selector(secret: &Secret, field_selector: &str) -> bool {
    match field_selector.strip_prefix("type=") {
        Some(expected) => secret.type_.as_deref() == Some(expected),
        None => field_selector.is_empty(),
    }
}

#[async_trait]
impl ClusterQuery for FakeCluster {
    async fn get_config_map(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<ConfigMap>, kube::Error> {
        self.record_call()?;

        Ok(self.config_maps.get(&key(namespace, name)).cloned())
    }

    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Option<Secret>, kube::Error> {
        self.record_call()?;

        Ok(self.secrets.get(&key(namespace, name)).cloned())
    }

    async fn list_secrets(
        &self,
        namespace: &str,
        field_selector: &str,
    ) -> Result<Vec<Secret>, kube::Error> {
        self.record_call()?;

        Ok(self
            .secrets
            .iter()
            .filter(|((ns, _), secret)| ns == namespace && matches_selector(secret, field_selector))
            .map(|(_, secret)| secret.clone())
            .collect())
    }
}
