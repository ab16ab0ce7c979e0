use std::collections::BTreeMap;

use k8s_openapi::api::batch::v1::{Job, JobSpec};
use kube::core::ObjectMeta;

use crate::{
    helpers::{non_empty, AndIf, With},
    models::{self, KV},
};

use super::pod::PodSpecBuilder;

#[derive(Debug, Clone, Default)]
pub struct JobBuilder {
    job: Job,
}

impl JobBuilder {
    pub fn new(spec: &models::JobSpec) -> Self {
        Self {
            job: Job {
                metadata: ObjectMeta {
                    name: non_empty(&spec.name),
                    ..Default::default()
                },
                ..Default::default()
            },
        }
    }

    /// Assembles the pod and installs it as the job's template, replacing any previous one.
    pub fn pod_spec(mut self, configure: impl FnOnce(PodSpecBuilder) -> PodSpecBuilder) -> Self {
        let pod_spec = configure(PodSpecBuilder::new()).build();
        self.job_spec_mut().template.spec = Some(pod_spec);

        self
    }

    pub fn ttl(self, ttl: i32) -> Self {
        self.and_if(ttl > 0, |b| {
            b.with(|b| b.job_spec_mut().ttl_seconds_after_finished = Some(ttl))
        })
    }

    pub fn backoff_limit(self, backoff_limit: i32) -> Self {
        self.and_if(backoff_limit > 0, |b| {
            b.with(|b| b.job_spec_mut().backoff_limit = Some(backoff_limit))
        })
    }

    /// Sets the pod template annotations. Duplicate keys keep the last value.
    pub fn annotations(self, annotations: &[KV]) -> Self {
        self.and_if(has_leading_key(annotations), |b| {
            b.with(|b| b.template_metadata_mut().annotations = Some(to_map(annotations)))
        })
    }

    /// Sets the pod template labels. Duplicate keys keep the last value.
    pub fn labels(self, labels: &[KV]) -> Self {
        self.and_if(has_leading_key(labels), |b| {
            b.with(|b| b.template_metadata_mut().labels = Some(to_map(labels)))
        })
    }

    pub fn build(self) -> Job {
        self.job
    }

    fn job_spec_mut(&mut self) -> &mut JobSpec {
        self.job.spec.get_or_insert_with(JobSpec::default)
    }

    fn template_metadata_mut(&mut self) -> &mut ObjectMeta {
        self.job_spec_mut()
            .template
            .metadata
            .get_or_insert_with(ObjectMeta::default)
    }
}

pub fn assemble_job(
    spec: &models::JobSpec,
    configure: impl FnOnce(JobBuilder) -> JobBuilder,
) -> Job {
    configure(JobBuilder::new(spec)).build()
}

fn has_leading_key(entries: &[KV]) -> bool {
    entries.first().is_some_and(|kv| !kv.key.is_empty())
}

fn to_map(entries: &[KV]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|kv| (kv.key.to_owned(), kv.value.to_owned()))
        .collect()
}
