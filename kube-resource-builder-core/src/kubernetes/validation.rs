use k8s_openapi::api::core::v1::{Secret, VolumeMount};
use log::debug;
use thiserror::Error;

use crate::models::{ContainerSpec, EnvFrom, ENV_FROM_CONFIG_MAP, ENV_FROM_SECRET};

use super::query::ClusterQuery;

pub const SERVICE_ACCOUNT_TOKEN_SELECTOR: &str = "type=kubernetes.io/service-account-token";
pub const SERVICE_ACCOUNT_NAME_ANNOTATION: &str = "kubernetes.io/service-account.name";
pub const SERVICE_ACCOUNT_TOKEN_KEY: &str = "token";

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("cm {name} is not found in the namespace {namespace}, create cm before referring in the function")]
    ConfigMapMissing { name: String, namespace: String },
    #[error("secret {name} is not found in the namespace {namespace}, create secret before referring in the function")]
    SecretMissing { name: String, namespace: String },
    #[error("Provide a valid EnvFrom type. Should be 'CM' or 'Secret'")]
    InvalidEnvFromType,
    #[error("No secret for sa {}", .0)]
    NoServiceAccountSecret(String),
    #[error("Couldn't query the cluster! Reason: {}", .0)]
    KubeApi(kube::Error),
}

impl ReferenceError {
    fn config_map_missing(name: &str, namespace: &str) -> Self {
        Self::ConfigMapMissing {
            name: name.to_owned(),
            namespace: namespace.to_owned(),
        }
    }

    fn secret_missing(name: &str, namespace: &str) -> Self {
        Self::SecretMissing {
            name: name.to_owned(),
            namespace: namespace.to_owned(),
        }
    }
}

pub async fn config_map_exists(
    namespace: &str,
    name: &str,
    query: &impl ClusterQuery,
) -> Result<bool, ReferenceError> {
    let config_map = query
        .get_config_map(namespace, name)
        .await
        .map_err(ReferenceError::KubeApi)?;

    Ok(config_map.is_some())
}

pub async fn secret_exists(
    namespace: &str,
    name: &str,
    query: &impl ClusterQuery,
) -> Result<bool, ReferenceError> {
    let secret = query
        .get_secret(namespace, name)
        .await
        .map_err(ReferenceError::KubeApi)?;

    Ok(secret.is_some())
}

/// Fails on the first named mount whose ConfigMap doesn't exist.
pub async fn check_config_map_mounts(
    namespace: &str,
    query: &impl ClusterQuery,
    config_maps: &[VolumeMount],
) -> Result<(), ReferenceError> {
    for mount in config_maps.iter().filter(|m| !m.name.is_empty()) {
        require_config_map(namespace, &mount.name, query).await?;
    }

    Ok(())
}

/// Fails on the first named mount whose Secret doesn't exist.
pub async fn check_secret_mounts(
    namespace: &str,
    query: &impl ClusterQuery,
    secrets: &[VolumeMount],
) -> Result<(), ReferenceError> {
    for mount in secrets.iter().filter(|m| !m.name.is_empty()) {
        require_secret(namespace, &mount.name, query).await?;
    }

    Ok(())
}

/// Checks env-from references in order, stopping at the first missing
/// resource or the first entry tagged neither `CM` nor `Secret`.
pub async fn check_env_from_resources(
    namespace: &str,
    query: &impl ClusterQuery,
    env_from: &[EnvFrom],
) -> Result<(), ReferenceError> {
    for env in env_from.iter().filter(|e| !e.name.is_empty()) {
        match env.kind.as_str() {
            ENV_FROM_CONFIG_MAP => require_config_map(namespace, &env.name, query).await?,
            ENV_FROM_SECRET => require_secret(namespace, &env.name, query).await?,
            _ => return Err(ReferenceError::InvalidEnvFromType),
        }
    }

    Ok(())
}

/// Runs the ConfigMap mount, Secret mount and env-from checks for each
/// container in turn, stopping at the first failure.
pub async fn check_container_references(
    namespace: &str,
    query: &impl ClusterQuery,
    containers: &[ContainerSpec],
) -> Result<(), ReferenceError> {
    for container in containers {
        debug!("Checking references of '{}' container...", container.name);

        check_config_map_mounts(namespace, query, &container.config_maps).await?;
        check_secret_mounts(namespace, query, &container.secrets).await?;
        check_env_from_resources(namespace, query, &container.env_from_secret_or_cm).await?;
    }

    Ok(())
}

pub async fn get_secret(
    namespace: &str,
    name: &str,
    query: &impl ClusterQuery,
) -> Result<Secret, ReferenceError> {
    query
        .get_secret(namespace, name)
        .await
        .map_err(ReferenceError::KubeApi)?
        .ok_or_else(|| ReferenceError::secret_missing(name, namespace))
}

/// Returns the token stored in the first service-account token secret
/// annotated with `service_account`.
pub async fn get_service_account_token(
    namespace: &str,
    service_account: &str,
    query: &impl ClusterQuery,
) -> Result<String, ReferenceError> {
    let secrets = query
        .list_secrets(namespace, SERVICE_ACCOUNT_TOKEN_SELECTOR)
        .await
        .map_err(ReferenceError::KubeApi)?;

    let secret = secrets
        .iter()
        .find(|secret| is_token_for(secret, service_account))
        .ok_or_else(|| ReferenceError::NoServiceAccountSecret(service_account.to_owned()))?;

    debug!(
        "Found token secret {:?} for '{service_account}' service account",
        secret.metadata.name
    );

    let token = secret
        .data
        .as_ref()
        .and_then(|data| data.get(SERVICE_ACCOUNT_TOKEN_KEY))
        .map(|token| String::from_utf8_lossy(&token.0).into_owned())
        .unwrap_or_default();

    Ok(token)
}

async fn require_config_map(
    namespace: &str,
    name: &str,
    query: &impl ClusterQuery,
) -> Result<(), ReferenceError> {
    match config_map_exists(namespace, name, query).await? {
        true => Ok(()),
        false => Err(ReferenceError::config_map_missing(name, namespace)),
    }
}

async fn require_secret(
    namespace: &str,
    name: &str,
    query: &impl ClusterQuery,
) -> Result<(), ReferenceError> {
    match secret_exists(namespace, name, query).await? {
        true => Ok(()),
        false => Err(ReferenceError::secret_missing(name, namespace)),
    }
}

fn is_token_for(secret: &Secret, service_account: &str) -> bool {
    secret
        .metadata
        .annotations
        .as_ref()
        .and_then(|annotations| annotations.get(SERVICE_ACCOUNT_NAME_ANNOTATION))
        .is_some_and(|name| name == service_account)
}
