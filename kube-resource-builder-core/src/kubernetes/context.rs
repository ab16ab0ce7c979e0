use std::{fs, path::Path};

use kube::{
    config::{InClusterError, KubeConfigOptions, Kubeconfig, KubeconfigError},
    Client, Config,
};
use log::{debug, warn};
use thiserror::Error;

pub const SERVICE_ACCOUNT_NAMESPACE_PATH: &str =
    "/var/run/secrets/kubernetes.io/serviceaccount/namespace";

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("In-cluster configuration is unavailable! Reason: {}", .0)]
    InCluster(InClusterError),
    #[error("Kubeconfig couldn't be loaded! Reason: {}", .0)]
    Kubeconfig(KubeconfigError),
    #[error("Couldn't create a client! Reason: {}", .0)]
    Client(kube::Error),
}

/// Builds a client from the service account mounted into the running pod.
pub fn create_in_cluster_client() -> Result<Client, ContextError> {
    let config = Config::incluster().map_err(ContextError::InCluster)?;

    Client::try_from(config).map_err(ContextError::Client)
}

pub async fn create_local_client(
    config_path: Option<&Path>,
    context_name: Option<&str>,
) -> Result<Client, ContextError> {
    let config_options = KubeConfigOptions {
        context: context_name.map(str::to_owned),
        ..Default::default()
    };

    let config = match config_path {
        Some(path) => {
            debug!("Using kubeconfig at {path:?}");
            let kubeconfig = Kubeconfig::read_from(path).map_err(ContextError::Kubeconfig)?;
            Config::from_custom_kubeconfig(kubeconfig, &config_options)
                .await
                .map_err(ContextError::Kubeconfig)?
        }
        None => Config::from_kubeconfig(&config_options)
            .await
            .map_err(ContextError::Kubeconfig)?,
    };

    Client::try_from(config).map_err(ContextError::Client)
}

/// Namespace the current pod runs in, or an empty string when it can't be read.
pub fn current_namespace() -> String {
    read_namespace(Path::new(SERVICE_ACCOUNT_NAMESPACE_PATH))
}

pub fn read_namespace(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(namespace) => namespace,
        Err(error) => {
            warn!("Couldn't read the namespace from {path:?}! {error}");
            String::new()
        }
    }
}
