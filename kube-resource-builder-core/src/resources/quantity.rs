use std::collections::BTreeMap;

use k8s_openapi::{api::core::v1::ResourceRequirements, apimachinery::pkg::api::resource::Quantity};

use crate::models::{Resource, RESOURCE_LIMIT, RESOURCE_REQUESTS};

pub const RESOURCE_CPU: &str = "cpu";
pub const RESOURCE_MEMORY: &str = "memory";

const MILLI: i32 = -3;
const MEGA: i32 = 6;

const DECIMAL_SUFFIXES: [(i32, &str); 8] = [
    (-3, "m"),
    (0, ""),
    (3, "k"),
    (6, "M"),
    (9, "G"),
    (12, "T"),
    (15, "P"),
    (18, "E"),
];

pub type ResourceMap = BTreeMap<String, Quantity>;

/// Maps simplified resource entries onto requests and limits.
///
/// A map is only produced when an entry of its kind carries a non-zero value.
/// A later entry of the same kind replaces the map built by the earlier one.
pub fn map_resources(resources: &[Resource]) -> (Option<ResourceMap>, Option<ResourceMap>) {
    let mut requests = None;
    let mut limits = None;

    for resource in resources {
        let target = match resource.kind.as_str() {
            RESOURCE_REQUESTS => &mut requests,
            RESOURCE_LIMIT => &mut limits,
            _ => continue,
        };

        if let Some(map) = map_resource(resource) {
            *target = Some(map);
        }
    }

    (requests, limits)
}

pub fn resource_requirements(resources: &[Resource]) -> Option<ResourceRequirements> {
    match map_resources(resources) {
        (None, None) => None,
        (requests, limits) => Some(ResourceRequirements {
            requests,
            limits,
            ..Default::default()
        }),
    }
}

fn map_resource(resource: &Resource) -> Option<ResourceMap> {
    if resource.cpu == 0 && resource.mem == 0 {
        return None;
    }

    let mut map = ResourceMap::new();

    if resource.cpu != 0 {
        map.insert(RESOURCE_CPU.to_owned(), milli_quantity(resource.cpu));
    }

    if resource.mem != 0 {
        map.insert(RESOURCE_MEMORY.to_owned(), mega_quantity(resource.mem));
    }

    Some(map)
}

pub fn milli_quantity(value: i64) -> Quantity {
    decimal_quantity(value, MILLI)
}

pub fn mega_quantity(value: i64) -> Quantity {
    decimal_quantity(value, MEGA)
}

/// Renders `value * 10^exponent` in its canonical decimal SI form,
/// e.g. `1500m`, `2`, `128M`, `1G`.
fn decimal_quantity(mut value: i64, mut exponent: i32) -> Quantity {
    let max_exponent = DECIMAL_SUFFIXES[DECIMAL_SUFFIXES.len() - 1].0;

    while value != 0 && value % 1000 == 0 && exponent < max_exponent {
        value /= 1000;
        exponent += 3;
    }

    let suffix = DECIMAL_SUFFIXES
        .iter()
        .find(|(e, _)| *e == exponent)
        .map(|(_, suffix)| *suffix)
        .unwrap_or_default();

    Quantity(format!("{value}{suffix}"))
}
