use k8s_openapi::api::core::v1::{
    Container, ContainerPort, EnvVar, SecurityContext, VolumeMount,
};

use crate::{
    helpers::{non_empty, AndIf, With},
    models::{ContainerSpec, EnvFrom, Resource},
};

use super::{env::env_from_secret_or_config_map, quantity::resource_requirements, volumes::volume_mounts};

/// Assembles a [`Container`] one option at a time.
///
/// Env and ports accumulate across calls, every other option replaces
/// what the previous call of the same option set. Options given an
/// empty or non-positive value leave the container untouched.
#[derive(Debug, Clone, Default)]
pub struct ContainerBuilder {
    container: Container,
}

impl ContainerBuilder {
    pub fn new(spec: &ContainerSpec) -> Self {
        Self {
            container: Container {
                image: non_empty(&spec.image),
                ..Default::default()
            },
        }
    }

    /// Applies every populated field of the model through the regular options.
    pub fn with_model(self, spec: &ContainerSpec) -> Self {
        self.name(&spec.name)
            .port(spec.port)
            .security_context(spec.user)
            .env(&spec.env_variables)
            .env_from_secret_or_config_map(&spec.env_from_secret_or_cm)
            .volume_mounts(&spec.config_maps, &spec.secrets)
            .command(&spec.cmd)
            .resources(&spec.resources)
    }

    pub fn env(self, envs: &[EnvVar]) -> Self {
        let has_named_env = envs.first().is_some_and(|env| !env.name.is_empty());

        self.and_if(has_named_env, |b| {
            b.with(|b| {
                b.container
                    .env
                    .get_or_insert_with(Vec::new)
                    .extend_from_slice(envs)
            })
        })
    }

    pub fn env_from_secret_or_config_map(mut self, env_from: &[EnvFrom]) -> Self {
        let sources = env_from_secret_or_config_map(env_from);
        self.container.env_from = (!sources.is_empty()).then_some(sources);

        self
    }

    pub fn volume_mounts(mut self, config_maps: &[VolumeMount], secrets: &[VolumeMount]) -> Self {
        let mounts = volume_mounts(config_maps, secrets);
        self.container.volume_mounts = (!mounts.is_empty()).then_some(mounts);

        self
    }

    pub fn port(self, port: i32) -> Self {
        self.and_if(port > 0, |b| {
            b.with(|b| {
                b.container
                    .ports
                    .get_or_insert_with(Vec::new)
                    .push(ContainerPort {
                        container_port: port,
                        ..Default::default()
                    })
            })
        })
    }

    pub fn security_context(self, user: i64) -> Self {
        self.and_if(user > 0, |b| {
            b.with(|b| {
                b.container.security_context = Some(SecurityContext {
                    run_as_user: Some(user),
                    ..Default::default()
                })
            })
        })
    }

    pub fn name(self, name: &str) -> Self {
        self.and_if(!name.is_empty(), |b| {
            b.with(|b| b.container.name = name.to_owned())
        })
    }

    /// Overrides the image seeded from the model.
    pub fn image(self, image: &str) -> Self {
        self.and_if(!image.is_empty(), |b| {
            b.with(|b| b.container.image = Some(image.to_owned()))
        })
    }

    pub fn command(self, cmd: &[String]) -> Self {
        let has_command = cmd.first().is_some_and(|arg| !arg.is_empty());

        self.and_if(has_command, |b| {
            b.with(|b| b.container.command = Some(cmd.to_vec()))
        })
    }

    pub fn image_pull_policy(self, policy: &str) -> Self {
        self.and_if(!policy.is_empty(), |b| {
            b.with(|b| b.container.image_pull_policy = Some(policy.to_owned()))
        })
    }

    pub fn resources(self, resources: &[Resource]) -> Self {
        self.and_if(!resources.is_empty(), |b| {
            b.with(|b| b.container.resources = resource_requirements(resources))
        })
    }

    pub fn build(self) -> Container {
        self.container
    }
}

pub fn assemble_container(
    spec: &ContainerSpec,
    configure: impl FnOnce(ContainerBuilder) -> ContainerBuilder,
) -> Container {
    configure(ContainerBuilder::new(spec)).build()
}
