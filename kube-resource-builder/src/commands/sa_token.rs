use kube_resource_builder_core::kubernetes::validation::get_service_account_token;
use log::info;

use crate::cli::{GlobalArgs, SaTokenArgs};

use super::{create_client, get_namespace};

pub async fn sa_token(global_args: GlobalArgs, args: SaTokenArgs) -> anyhow::Result<()> {
    let client = create_client(&global_args).await?;
    let namespace = get_namespace(&global_args, &client);

    info!(
        "Looking up the token of '{}' service account in '{namespace}' namespace...",
        args.service_account
    );

    let token = get_service_account_token(&namespace, &args.service_account, &client).await?;

    println!("{token}");

    Ok(())
}
