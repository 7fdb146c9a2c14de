//! Values from application-provided system properties.

use std::collections::BTreeMap;

use super::{LoadRequest, Loader, LoaderId, LoaderValues};

/// Reads a process-wide `name → value` table supplied by the application.
///
/// Such tables usually carry settings for several libraries at once, so names
/// that match no property are ignored unless
/// [`SystemPropertiesLoader::report_unknown_keys`] is set.
#[derive(Clone, Debug)]
pub struct SystemPropertiesLoader {
    id: LoaderId,
    properties: BTreeMap<String, String>,
    unknown_is_problem: bool,
}

impl SystemPropertiesLoader {
    /// Identity used unless [`SystemPropertiesLoader::with_id`] overrides it.
    pub const DEFAULT_ID: &'static str = "system-properties";

    /// Reads `properties`.
    #[must_use]
    pub fn new<I, K, V>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            id: LoaderId::new(Self::DEFAULT_ID),
            properties: properties
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
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
}

impl Loader for SystemPropertiesLoader {
    fn id(&self) -> LoaderId {
        self.id.clone()
    }

    fn unknown_key_is_problem(&self) -> bool {
        self.unknown_is_problem
    }

    fn load(&self, request: &LoadRequest<'_>) -> LoaderValues {
        let mut collector = request.collector(self);
        for (key, raw) in &self.properties {
            collector.offer(key, Some(raw));
        }
        collector.finish()
    }
}
