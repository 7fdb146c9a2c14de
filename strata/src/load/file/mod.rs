//! Values from configuration files.

mod error;
mod properties;
mod structured;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use self::error::FileError;
use super::{LoadRequest, Loader, LoaderId, LoaderValues, PairCollector};
use crate::PropertyId;

/// Where a [`FileLoader`] finds its content.
#[derive(Clone, Debug)]
pub enum FileSource {
    /// A fixed path on disk.
    Path(Utf8PathBuf),
    /// A path taken from the effective value of a string property set by an
    /// earlier loader or by its default.
    FromProperty(PropertyId),
    /// Content embedded in the application.
    Bytes {
        /// Name reported in problems; its extension selects the format.
        name: String,
        /// Raw content.
        bytes: Vec<u8>,
    },
}

/// Reads a configuration file.
///
/// The format follows the file extension: `.toml` and `.json` documents are
/// flattened so that nested tables become dotted names, anything else is read
/// as `name = value` properties text. Unknown names are problems.
///
/// A missing file is skipped silently unless
/// [`FileLoader::missing_file_is_problem`] is set; a file that exists but
/// cannot be read or parsed is always a problem.
///
/// # Examples
///
/// ```
/// use strata::load::{FileLoader, Loader};
///
/// let loader = FileLoader::from_path("/etc/app/app.properties");
/// assert_eq!(loader.id().as_str(), "file:/etc/app/app.properties");
/// ```
#[derive(Clone, Debug)]
pub struct FileLoader {
    id: LoaderId,
    source: FileSource,
    missing_is_problem: bool,
    unknown_is_problem: bool,
}

impl FileLoader {
    /// Reads the file at `path`.
    #[must_use]
    pub fn from_path(path: impl Into<Utf8PathBuf>) -> Self {
        let file: Utf8PathBuf = path.into();
        Self::with_source(format!("file:{file}"), FileSource::Path(file))
    }

    /// Reads the file named by the string property `property`.
    ///
    /// When the property has no value the loader supplies nothing.
    #[must_use]
    pub fn from_property(property: PropertyId) -> Self {
        Self::with_source(
            format!("file:{}", property.canonical_name()),
            FileSource::FromProperty(property),
        )
    }

    /// Reads embedded content.
    #[must_use]
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let label: String = name.into();
        Self::with_source(
            format!("file:{label}"),
            FileSource::Bytes {
                name: label,
                bytes: bytes.into(),
            },
        )
    }

    fn with_source(id: String, source: FileSource) -> Self {
        Self {
            id: LoaderId::new(id),
            source,
            missing_is_problem: false,
            unknown_is_problem: true,
        }
    }

    /// Replaces the loader identity.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<LoaderId>) -> Self {
        self.id = id.into();
        self
    }

    /// Controls whether a missing file is reported as a problem.
    #[must_use]
    pub const fn missing_file_is_problem(mut self, report: bool) -> Self {
        self.missing_is_problem = report;
        self
    }

    /// Controls whether unknown names are reported as problems.
    #[must_use]
    pub const fn report_unknown_keys(mut self, report: bool) -> Self {
        self.unknown_is_problem = report;
        self
    }

    /// Where the loader reads from.
    #[must_use]
    pub const fn source(&self) -> &FileSource {
        &self.source
    }

    /// Reads the content, returning its name and text.
    ///
    /// `Ok(None)` means there is nothing to read.
    fn read(&self, request: &LoadRequest<'_>) -> Result<Option<(String, String)>, FileError> {
        match &self.source {
            FileSource::Path(path) => self.read_path(path),
            FileSource::FromProperty(property) => {
                let Some(path) = request.so_far().get_str(property) else {
                    debug!(
                        loader = %self.id,
                        property = %property,
                        "file path property has no value"
                    );
                    return Ok(None);
                };
                self.read_path(Utf8Path::new(path))
            }
            FileSource::Bytes { name, bytes } => match std::str::from_utf8(bytes) {
                Ok(text) => Ok(Some((name.clone(), text.to_owned()))),
                Err(source) => Err(FileError::Utf8 {
                    name: name.clone(),
                    source,
                }),
            },
        }
    }

    fn read_path(&self, path: &Utf8Path) -> Result<Option<(String, String)>, FileError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Some((path.to_string(), text))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !self.missing_is_problem => {
                debug!(loader = %self.id, path = %path, "configuration file not found; skipping");
                Ok(None)
            }
            Err(source) => Err(FileError::Io {
                path: path.to_owned(),
                source,
            }),
        }
    }
}

/// Feeds `text` to the collector according to the format `name` implies.
fn feed(collector: &mut PairCollector<'_>, name: &str, text: &str) -> Result<(), FileError> {
    let ext = Utf8Path::new(name).extension().map(str::to_ascii_lowercase);
    let format = match ext.as_deref() {
        Some("toml") => structured::Format::Toml,
        Some("json") => structured::Format::Json,
        _ => {
            for (key, raw) in properties::parse(text) {
                collector.offer(&key, Some(&raw));
            }
            return Ok(());
        }
    };
    let entries = structured::flatten(format, text).map_err(|source| FileError::Parse {
        name: name.to_owned(),
        source,
    })?;
    for entry in entries {
        match entry {
            structured::Entry::Value(key, raw) => collector.offer(&key, raw.as_deref()),
            structured::Entry::Unsupported(key, message) => collector.unsupported(&key, message),
        }
    }
    Ok(())
}

impl Loader for FileLoader {
    fn id(&self) -> LoaderId {
        self.id.clone()
    }

    fn unknown_key_is_problem(&self) -> bool {
        self.unknown_is_problem
    }

    fn load(&self, request: &LoadRequest<'_>) -> LoaderValues {
        let mut collector = request.collector(self);
        let fed = self.read(request).and_then(|content| match content {
            Some((name, text)) => feed(&mut collector, &name, &text),
            None => Ok(()),
        });
        if let Err(error) = fed {
            collector.source_problem(error.source_name(), &error);
        }
        collector.finish()
    }
}
