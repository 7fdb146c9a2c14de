//! Values from environment variables.

use std::collections::BTreeMap;

use figment::providers::Env;

use super::{LoadRequest, Loader, LoaderId, LoaderValues};

/// Reads environment variables whose names match a property name or alias.
///
/// The process environment is read at load time, so a rebuilt engine sees
/// variables changed since the previous resolution. Variables that name no
/// property are ignored unless [`EnvironmentLoader::report_unknown_keys`] is
/// set; a typical environment holds far more than configuration.
#[derive(Clone, Debug)]
pub struct EnvironmentLoader {
    id: LoaderId,
    vars: Option<BTreeMap<String, String>>,
    unknown_is_problem: bool,
}

impl EnvironmentLoader {
    /// Identity used unless [`EnvironmentLoader::with_id`] overrides it.
    pub const DEFAULT_ID: &'static str = "env";

    /// Reads the environment of the running process.
    ///
    /// Names and values that are not valid UTF-8 are converted lossily.
    #[must_use]
    pub fn from_process() -> Self {
        Self {
            id: LoaderId::new(Self::DEFAULT_ID),
            vars: None,
            unknown_is_problem: false,
        }
    }

    /// Reads a fixed set of variables instead of the process environment.
    #[must_use]
    pub fn from_map<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            id: LoaderId::new(Self::DEFAULT_ID),
            vars: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
            unknown_is_problem: false,
        }
    }

    /// Replaces the loader identity.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<LoaderId>) -> Self {
        self.id = id.into();
        self
    }

    /// Controls whether unknown names are reported as problems.
    #[must_use]
    pub const fn report_unknown_keys(mut self, report: bool) -> Self {
        self.unknown_is_problem = report;
        self
    }

    fn snapshot(&self) -> BTreeMap<String, String> {
        self.vars.clone().unwrap_or_else(|| {
            Env::raw()
                .lowercase(false)
                .iter()
                .map(|(key, value)| (key.as_str().to_owned(), value))
                .collect()
        })
    }
}

impl Loader for EnvironmentLoader {
    fn id(&self) -> LoaderId {
        self.id.clone()
    }

    fn unknown_key_is_problem(&self) -> bool {
        self.unknown_is_problem
    }

    fn load(&self, request: &LoadRequest<'_>) -> LoaderValues {
        let mut collector = request.collector(self);
        for (key, raw) in &self.snapshot() {
            collector.offer(key, Some(raw));
        }
        collector.finish()
    }
}
