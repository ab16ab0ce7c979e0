use std::any::type_name;

pub fn pretty_type_name<'a, T>() -> &'a str {
    let name = type_name::<T>();

    name.rsplit("::").next().unwrap_or(name)
}

/// Returns an owned copy of `value` unless it's empty.
pub fn non_empty(value: &str) -> Option<String> {
    match value.is_empty() {
        true => None,
        false => Some(value.to_owned()),
    }
}

pub trait With<F> {
    fn with(self, op: F) -> Self;
}

impl<T, F> With<F> for T
where
    F: FnOnce(&mut Self),
{
    fn with(mut self, op: F) -> Self {
        op(&mut self);

        self
    }
}

pub trait AndIf<F> {
    fn and_if(self, condition: bool, then: F) -> Self;
}

impl<T, F> AndIf<F> for T
where
    F: FnOnce(Self) -> Self,
{
    fn and_if(self, condition: bool, then: F) -> Self {
        let mut obj = self;
        if condition {
            obj = then(obj);
        }

        obj
    }
}
