use k8s_openapi::api::core::v1::PodSpec;

use crate::{
    helpers::{non_empty, AndIf, With},
    models::{self, ContainerSpec},
};

use super::{container::ContainerBuilder, volumes::volume_sources};

#[derive(Debug, Clone, Default)]
pub struct PodSpecBuilder {
    spec: PodSpec,
}

impl PodSpecBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one container per model entry along with the volumes its mounts need.
    pub fn with_model(self, spec: &models::PodSpec) -> Self {
        spec.containers
            .iter()
            .fold(self, |pod, container| {
                pod.container(container, |c| c.with_model(container))
            })
            .volumes(&spec.containers)
    }

    /// Assembles a container from `spec` and appends it to the pod.
    pub fn container(
        mut self,
        spec: &ContainerSpec,
        configure: impl FnOnce(ContainerBuilder) -> ContainerBuilder,
    ) -> Self {
        let container = configure(ContainerBuilder::new(spec)).build();
        self.spec.containers.push(container);

        self
    }

    /// Appends the ConfigMap and Secret volumes backing each container's mounts,
    /// in container order.
    pub fn volumes(self, containers: &[ContainerSpec]) -> Self {
        let volumes = containers
            .iter()
            .flat_map(|c| volume_sources(&c.config_maps, &c.secrets))
            .collect::<Vec<_>>();

        self.and_if(!volumes.is_empty(), |b| {
            b.with(|b| b.spec.volumes.get_or_insert_with(Vec::new).extend(volumes))
        })
    }

    pub fn service_account(self, service_account: &str) -> Self {
        self.and_if(!service_account.is_empty(), |b| {
            b.with(|b| b.spec.service_account_name = non_empty(service_account))
        })
    }

    pub fn restart_policy(self, policy: &str) -> Self {
        self.and_if(!policy.is_empty(), |b| {
            b.with(|b| b.spec.restart_policy = non_empty(policy))
        })
    }

    pub fn build(self) -> PodSpec {
        self.spec
    }
}

pub fn assemble_pod(configure: impl FnOnce(PodSpecBuilder) -> PodSpecBuilder) -> PodSpec {
    configure(PodSpecBuilder::new()).build()
}

#[cfg(test)]
mod tests {
    use k8s_openapi::api::core::v1::{Container, ContainerPort, PodSpec};

    use super::{assemble_pod, PodSpecBuilder};
    use crate::{
        models::{self, ContainerSpec, EnvFrom, Resource},
        resources::{
            container::assemble_container,
            volumes::{config_map_volume, secret_volume},
        },
        testing::{construct_env, construct_mounts},
    };

    fn mounts_only(config_map: &str, secret: &str) -> ContainerSpec {
        ContainerSpec {
            config_maps: construct_mounts(&[config_map], &["/p1"]),
            secrets: construct_mounts(&[secret], &["/p2"]),
            ..Default::default()
        }
    }

    fn image(image: &str) -> ContainerSpec {
        ContainerSpec {
            image: image.to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn pod_with_all_options() {
        let pod = assemble_pod(|p| {
            p.volumes(&[mounts_only("c1", "s1")])
                .service_account("admin-sa")
                .restart_policy("Never")
                .container(&image("docker.com/bar"), |c| {
                    c.env(&construct_env(&["e1", "e2"], &["v1", "v2"]))
                        .env_from_secret_or_config_map(&[
                            EnvFrom::new("c1", "CM"),
                            EnvFrom::new("s1", "Secret"),
                        ])
                        .volume_mounts(
                            &construct_mounts(&["c1"], &["/p1"]),
                            &construct_mounts(&["s1"], &["/p2"]),
                        )
                        .port(8080)
                        .port(9090)
                        .security_context(1001)
                        .name("foo")
                        .command(&["python".to_owned(), "some.py".to_owned()])
                        .resources(&[
                            Resource::new("Requests", 10, 128),
                            Resource::new("Limit", 50, 256),
                        ])
                })
        });

        assert_eq!(pod.containers.len(), 1);
        assert_eq!(pod.containers[0].name, "foo");
        assert_eq!(
            pod.containers[0].volume_mounts,
            Some(construct_mounts(&["c1", "s1"], &["/p1", "/p2"]))
        );
        assert_eq!(
            pod.volumes,
            Some(vec![config_map_volume("c1"), secret_volume("s1")])
        );
        assert_eq!(pod.service_account_name.as_deref(), Some("admin-sa"));
        assert_eq!(pod.restart_policy.as_deref(), Some("Never"));
    }

    #[test]
    fn pod_with_min_options() {
        let pod = assemble_pod(|p| {
            p.container(&image("docker.com/bar"), |c| {
                c.env(&construct_env(&[""], &[""]))
                    .env_from_secret_or_config_map(&[EnvFrom::new("", "")])
                    .volume_mounts(&construct_mounts(&[""], &[""]), &construct_mounts(&[""], &[""]))
                    .port(0)
                    .security_context(0)
                    .name("foo")
                    .command(&["".to_owned()])
                    .resources(&[Resource::new("Requests", 0, 0), Resource::new("Limit", 0, 0)])
            })
            .service_account("")
            .restart_policy("")
        });

        assert_eq!(
            pod,
            PodSpec {
                containers: vec![Container {
                    name: "foo".to_owned(),
                    image: Some("docker.com/bar".to_owned()),
                    ..Default::default()
                }],
                ..Default::default()
            }
        );
    }

    #[test]
    fn pod_with_two_containers() {
        let pod = assemble_pod(|p| {
            p.volumes(&[mounts_only("c1", "s1"), mounts_only("c2", "s2")])
                .container(&image("docker.com/foo"), |c| {
                    c.volume_mounts(
                        &construct_mounts(&["c1"], &["/p1"]),
                        &construct_mounts(&["s1"], &["/p2"]),
                    )
                    .name("foo")
                    .port(8080)
                })
                .container(&image("docker.com/bar"), |c| {
                    c.volume_mounts(
                        &construct_mounts(&["c2"], &["/p1"]),
                        &construct_mounts(&["s2"], &["/p2"]),
                    )
                    .name("bar")
                    .port(9090)
                })
        });

        let names = pod.containers.iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["foo", "bar"]);
        assert_eq!(
            pod.containers[1].ports,
            Some(vec![ContainerPort {
                container_port: 9090,
                ..Default::default()
            }])
        );
        assert_eq!(
            pod.volumes,
            Some(vec![
                config_map_volume("c1"),
                secret_volume("s1"),
                config_map_volume("c2"),
                secret_volume("s2"),
            ])
        );
    }

    #[test]
    fn volumes_without_mounts_stay_unset() {
        let pod = assemble_pod(|p| p.volumes(&[image("docker.com/foo")]));

        assert_eq!(pod, PodSpec::default());
    }

    #[test]
    fn model_expands_into_containers_and_volumes() {
        let first = ContainerSpec {
            name: "foo".to_owned(),
            port: 8080,
            ..mounts_only("c1", "s1")
        };
        let second = ContainerSpec {
            name: "bar".to_owned(),
            ..image("docker.com/bar")
        };
        let model = models::PodSpec {
            containers: vec![first.clone(), second.clone()],
        };

        let pod = PodSpecBuilder::new().with_model(&model).build();

        assert_eq!(
            pod.containers,
            vec![
                assemble_container(&first, |c| c.with_model(&first)),
                assemble_container(&second, |c| c.with_model(&second)),
            ]
        );
        assert_eq!(
            pod.volumes,
            Some(vec![config_map_volume("c1"), secret_volume("s1")])
        );
    }
}
