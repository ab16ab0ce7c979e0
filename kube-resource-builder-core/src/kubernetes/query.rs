use std::fmt::Debug;

use async_trait::async_trait;
use k8s_openapi::{
    api::core::v1::{ConfigMap, Secret},
    serde::de::DeserializeOwned,
    NamespaceResourceScope,
};
use kube::{api::ListParams, Api, Client, Resource};
use log::debug;

use crate::helpers::pretty_type_name;

/// Read-only cluster lookups the reference checks rely on.
///
/// Lookups by name report a missing object as `Ok(None)`, keeping it apart
/// from any other API failure.
#[async_trait]
pub trait ClusterQuery: Send + Sync {
    async fn get_config_map(&self, namespace: &str, name: &str)
        -> Result<Option<ConfigMap>, kube::Error>;

    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Option<Secret>, kube::Error>;

    async fn list_secrets(
        &self,
        namespace: &str,
        field_selector: &str,
    ) -> Result<Vec<Secret>, kube::Error>;
}

#[async_trait]
impl ClusterQuery for Client {
    async fn get_config_map(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<ConfigMap>, kube::Error> {
        get_namespaced(self, namespace, name).await
    }

    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Option<Secret>, kube::Error> {
        get_namespaced(self, namespace, name).await
    }

    async fn list_secrets(
        &self,
        namespace: &str,
        field_selector: &str,
    ) -> Result<Vec<Secret>, kube::Error> {
        debug!("Listing Secrets in '{namespace}' matching '{field_selector}'...");

        let api: Api<Secret> = Api::namespaced(self.clone(), namespace);
        let secrets = api
            .list(&ListParams::default().fields(field_selector))
            .await?;

        Ok(secrets.items)
    }
}

async fn get_namespaced<T>(client: &Client, namespace: &str, name: &str) -> Result<Option<T>, kube::Error>
where
    T: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
        + Clone
        + DeserializeOwned
        + Debug,
{
    debug!(
        "Looking up '{name}' {} in '{namespace}'...",
        pretty_type_name::<T>()
    );

    let api: Api<T> = Api::namespaced(client.clone(), namespace);

    api.get_opt(name).await
}
