use std::{fs::File, io::Read, path::Path};

use k8s_openapi::api::batch::v1::Job;
use kube_resource_builder_core::{
    models::{ContainerSpec, JobSpec, PodSpec, KV},
    resources::job::assemble_job,
};
use log::debug;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Io error: {}", .0)]
    IoError(std::io::Error),
    #[error("Deserialization error: {}", .0)]
    DeserializationError(serde_yaml::Error),
}

/// Job description read from a YAML file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobManifest {
    pub name: String,
    pub ttl: i32,
    pub backoff_limit: i32,
    pub labels: Vec<KV>,
    pub annotations: Vec<KV>,
    pub service_account: String,
    pub restart_policy: String,
    pub image_pull_policy: String,
    pub containers: Vec<ContainerSpec>,
}

impl JobManifest {
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        debug!("Used manifest path: {path:?}");

        let file = File::open(path).map_err(ManifestError::IoError)?;

        Self::from_reader(file)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, ManifestError> {
        serde_yaml::from_reader(reader).map_err(ManifestError::DeserializationError)
    }

    pub fn job_spec(&self) -> JobSpec {
        JobSpec {
            name: self.name.to_owned(),
            spec: PodSpec {
                containers: self.containers.to_owned(),
            },
        }
    }

    pub fn to_job(&self) -> Job {
        let spec = self.job_spec();

        assemble_job(&spec, |job| {
            job.pod_spec(|pod| {
                spec.spec
                    .containers
                    .iter()
                    .fold(pod, |pod, container| {
                        pod.container(container, |c| {
                            c.with_model(container)
                                .image_pull_policy(&self.image_pull_policy)
                        })
                    })
                    .volumes(&spec.spec.containers)
                    .service_account(&self.service_account)
                    .restart_policy(&self.restart_policy)
            })
            .ttl(self.ttl)
            .backoff_limit(self.backoff_limit)
            .labels(&self.labels)
            .annotations(&self.annotations)
        })
    }
}
