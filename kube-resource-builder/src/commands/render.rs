use std::{fs::File, io::Write};

use anyhow::Context;
use k8s_openapi::api::batch::v1::Job;
use log::{debug, info};

use crate::{
    cli::{OutputFormat, RenderArgs},
    manifest::JobManifest,
};

pub fn render(args: RenderArgs) -> anyhow::Result<()> {
    let manifest = JobManifest::load(&args.manifest)
        .with_context(|| format!("Couldn't load the manifest from {:?}!", args.manifest))?;

    debug!("{manifest:#?}");

    let rendered = format_job(&manifest.to_job(), args.format)?;

    match args.output {
        Some(path) => {
            let mut file = File::create(&path)
                .with_context(|| format!("Couldn't create the output file {path:?}!"))?;
            file.write_all(rendered.as_bytes())?;

            info!("Job written to {path:?}");
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

/// Serializes the job, always terminated by a single newline.
fn format_job(job: &Job, format: OutputFormat) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Yaml => serde_yaml::to_string(job)?,
        OutputFormat::Json => serde_json::to_string_pretty(job)? + "\n",
    };

    Ok(rendered)
}
