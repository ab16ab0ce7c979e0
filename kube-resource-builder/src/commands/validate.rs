use anyhow::Context;
use kube_resource_builder_core::kubernetes::validation::check_container_references;
use log::info;

use crate::{
    cli::{GlobalArgs, ValidateArgs},
    manifest::JobManifest,
};

use super::{create_client, get_namespace};

pub async fn validate(global_args: GlobalArgs, args: ValidateArgs) -> anyhow::Result<()> {
    let manifest = JobManifest::load(&args.manifest)
        .with_context(|| format!("Couldn't load the manifest from {:?}!", args.manifest))?;
    let client = create_client(&global_args).await?;
    let namespace = get_namespace(&global_args, &client);

    info!("Validating references of '{}' in '{namespace}' namespace...", manifest.name);

    check_container_references(&namespace, &client, &manifest.containers).await?;

    info!("All referenced ConfigMaps and Secrets exist!");

    Ok(())
}
