use k8s_openapi::api::core::v1::{ConfigMapVolumeSource, SecretVolumeSource, Volume, VolumeMount};

/// Combines ConfigMap and Secret mounts, ConfigMaps first. Nameless mounts are skipped.
pub fn volume_mounts(config_maps: &[VolumeMount], secrets: &[VolumeMount]) -> Vec<VolumeMount> {
    config_maps
        .iter()
        .chain(secrets)
        .filter(|mount| !mount.name.is_empty())
        .cloned()
        .collect()
}

/// Emits one volume per named mount, sourced from the ConfigMap or Secret of the same name.
pub fn volume_sources(config_maps: &[VolumeMount], secrets: &[VolumeMount]) -> Vec<Volume> {
    let config_map_volumes = named(config_maps).map(config_map_volume);
    let secret_volumes = named(secrets).map(secret_volume);

    config_map_volumes.chain(secret_volumes).collect()
}

pub fn config_map_volume(name: &str) -> Volume {
    Volume {
        name: name.to_owned(),
        config_map: Some(ConfigMapVolumeSource {
            name: Some(name.to_owned()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn secret_volume(name: &str) -> Volume {
    Volume {
        name: name.to_owned(),
        secret: Some(SecretVolumeSource {
            secret_name: Some(name.to_owned()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn named(mounts: &[VolumeMount]) -> impl Iterator<Item = &str> {
    mounts
        .iter()
        .map(|mount| mount.name.as_str())
        .filter(|name| !name.is_empty())
}
