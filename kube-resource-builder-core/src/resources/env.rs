use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{ConfigMapEnvSource, EnvFromSource, EnvVar, SecretEnvSource};

use crate::models::{EnvFrom, ENV_FROM_SECRET};

pub const QUERY_PARAM_SEPARATOR: &str = ";";

/// Maps env-from references onto sources, preserving order and skipping nameless ones.
///
/// Anything not tagged as a Secret is treated as a ConfigMap.
pub fn env_from_secret_or_config_map(env_from: &[EnvFrom]) -> Vec<EnvFromSource> {
    env_from
        .iter()
        .filter(|env| !env.name.is_empty())
        .map(|env| match env.kind.as_str() {
            ENV_FROM_SECRET => secret_env_source(&env.name),
            _ => config_map_env_source(&env.name),
        })
        .collect()
}

pub fn secret_env_source(name: &str) -> EnvFromSource {
    EnvFromSource {
        secret_ref: Some(SecretEnvSource {
            name: Some(name.to_owned()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn config_map_env_source(name: &str) -> EnvFromSource {
    EnvFromSource {
        config_map_ref: Some(ConfigMapEnvSource {
            name: Some(name.to_owned()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Turns HTTP query parameters into env variables, joining repeated values with `;`.
pub fn env_from_query_params(params: &BTreeMap<String, Vec<String>>) -> Vec<EnvVar> {
    params
        .iter()
        .map(|(name, values)| EnvVar {
            name: name.to_owned(),
            value: Some(values.join(QUERY_PARAM_SEPARATOR)),
            ..Default::default()
        })
        .collect()
}
