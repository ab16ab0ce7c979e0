use anyhow::Context;
use kube::Client;
use kube_resource_builder_core::kubernetes::context::{
    create_in_cluster_client, create_local_client, ContextError,
};
use log::debug;

use crate::cli::GlobalArgs;

pub mod render;
pub mod sa_token;
pub mod validate;

async fn create_client(global_args: &GlobalArgs) -> anyhow::Result<Client> {
    let explicit_config = global_args.kube_config.is_some() || global_args.kube_context.is_some();
    let client = match create_local_client(
        global_args.kube_config.as_deref(),
        global_args.kube_context.as_deref(),
    )
    .await
    {
        Err(ContextError::Kubeconfig(error)) if !explicit_config => {
            debug!("No usable kubeconfig ({error}), trying in-cluster configuration...");
            create_in_cluster_client()
        }
        result => result,
    };

    client.context("Couldn't initialize k8s API client!")
}

fn get_namespace(global_args: &GlobalArgs, client: &Client) -> String {
    global_args
        .namespace
        .to_owned()
        .unwrap_or_else(|| client.default_namespace().to_owned())
}
