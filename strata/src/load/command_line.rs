//! Values from command-line arguments.

use super::{LoadRequest, Loader, LoaderId, LoaderValues};

/// Reads `name=value` arguments.
///
/// Leading dashes are ignored, so `--app.Server.PORT=80` and
/// `app.Server.PORT=80` are equivalent. An argument without `=` supplies no
/// text, which sets a flag and nulls any other property. Unknown names are
/// ignored unless [`CommandLineLoader::report_unknown_keys`] is set.
///
/// # Examples
///
/// ```
/// use strata::load::{CommandLineLoader, Loader};
///
/// let loader = CommandLineLoader::new(["--app.Server.PORT=80", "--verbose"]);
/// assert_eq!(loader.id().as_str(), "cmd-line");
/// ```
#[derive(Clone, Debug)]
pub struct CommandLineLoader {
    id: LoaderId,
    args: Vec<String>,
    unknown_is_problem: bool,
}

impl CommandLineLoader {
    /// Identity used unless [`CommandLineLoader::with_id`] overrides it.
    pub const DEFAULT_ID: &'static str = "cmd-line";

    /// Reads `args`, which should not include the program name.
    #[must_use]
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: LoaderId::new(Self::DEFAULT_ID),
            args: args.into_iter().map(Into::into).collect(),
            unknown_is_problem: false,
        }
    }

    /// Reads the arguments of the running process, skipping the program name.
    ///
    /// Arguments that are not valid UTF-8 are skipped.
    #[must_use]
    pub fn from_process() -> Self {
        Self::new(
            std::env::args_os()
                .skip(1)
                .filter_map(|arg| arg.into_string().ok()),
        )
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

/// Splits one argument into its key and optional raw value.
fn split(arg: &str) -> Option<(&str, Option<&str>)> {
    let body = arg.trim_start_matches('-');
    let (key, raw) = match body.split_once('=') {
        Some((key, raw)) => (key.trim(), Some(raw)),
        None => (body.trim(), None),
    };
    (!key.is_empty()).then_some((key, raw))
}

impl Loader for CommandLineLoader {
    fn id(&self) -> LoaderId {
        self.id.clone()
    }

    fn unknown_key_is_problem(&self) -> bool {
        self.unknown_is_problem
    }

    fn load(&self, request: &LoadRequest<'_>) -> LoaderValues {
        let mut collector = request.collector(self);
        for (key, raw) in self.args.iter().filter_map(|arg| split(arg)) {
            collector.offer(key, raw);
        }
        collector.finish()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for argument splitting.

    use rstest::rstest;

    use super::split;

    #[rstest]
    #[case("--a.b.C=1", Some(("a.b.C", Some("1"))))]
    #[case("a.b.C=", Some(("a.b.C", Some(""))))]
    #[case("-flag", Some(("flag", None)))]
    #[case("--url=http://x?y=z", Some(("url", Some("http://x?y=z"))))]
    #[case("--", None)]
    #[case("--=value", None)]
    fn splits_arguments(#[case] arg: &str, #[case] expected: Option<(&str, Option<&str>)>) {
        assert_eq!(split(arg), expected);
    }
}
