use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::constant::*;
use crate::document::{parse_phrase, read_file, SpecError, ToolSpec};
use crate::model::{CommandRef, Phrase};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ListDocument {
    #[serde(default)]
    default: Option<String>,
    phrases: Vec<ListEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListEntry {
    Words(Vec<String>),
    Keyed { phrase: Words, class: String },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Words {
    Text(String),
    Sequence(Vec<String>),
}

impl Words {
    fn text(&self) -> String {
        match self {
            Words::Text(text) => text.clone(),
            Words::Sequence(words) => words.join(" "),
        }
    }
}

/// Read either document form; `origin` is the file the text came from, if any.
pub(super) fn read(text: &str, origin: Option<&Path>) -> Result<ToolSpec, SpecError> {
    let document: Value = serde_yaml::from_str(text)?;

    if matches!(&document, Value::Mapping(mapping) if is_list_form(mapping)) {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Reading list form tool specification.");
        }

        return read_list(serde_yaml::from_value(document)?);
    }

    match &document {
        Value::Mapping(mapping) => {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Reading nested form tool specification.");
            }

            let includes = match origin {
                Some(path) => vec![canonical(path)?],
                None => Vec::default(),
            };
            let mut spec = ToolSpec::new();
            read_nested(mapping, None, "", &includes, &mut spec)?;
            Ok(spec)
        }
        Value::Null => Ok(ToolSpec::new()),
        _ => Err(SpecError::InvalidDocument(
            "expected a mapping at the top level".to_string(),
        )),
    }
}

fn is_list_form(mapping: &Mapping) -> bool {
    matches!(mapping.get(PHRASES_KEY), Some(Value::Sequence(_)))
}

fn read_list(document: ListDocument) -> Result<ToolSpec, SpecError> {
    let ListDocument { default, phrases } = document;
    let mut spec = ToolSpec::new();

    for entry in phrases {
        let (text, class) = match entry {
            ListEntry::Words(mut words) => {
                if words.len() < 2 {
                    return Err(SpecError::InvalidEntry {
                        entry: format!("{words:?}"),
                        reason: "expected the phrase words followed by a command".to_string(),
                    });
                }

                let class = words.pop().unwrap_or_default();
                (words.join(" "), class)
            }
            ListEntry::Keyed { phrase, class } => (phrase.text(), class),
        };

        let phrase = parse_phrase(&text)?;
        let command = match &default {
            Some(namespace) => CommandRef::new(class).qualify(namespace),
            None => CommandRef::new(class),
        };
        spec.merge(phrase, command)?;
    }

    Ok(spec)
}

/// Read a nested mapping under `prefix`.
/// `includes` is the chain of files being read, outermost first.
fn read_nested(
    mapping: &Mapping,
    prefix: Option<&Phrase>,
    namespace: &str,
    includes: &[PathBuf],
    spec: &mut ToolSpec,
) -> Result<(), SpecError> {
    let namespace = match mapping.get(PACKAGE_KEY) {
        Some(Value::String(package)) => CommandRef::new(package).within(namespace).to_string(),
        Some(other) => {
            return Err(SpecError::InvalidEntry {
                entry: PACKAGE_KEY.to_string(),
                reason: format!("expected a namespace, found {}", describe(other)),
            });
        }
        None => namespace.to_string(),
    };

    for (key, value) in mapping {
        let key = match key {
            Value::String(key) => key,
            other => {
                return Err(SpecError::InvalidEntry {
                    entry: describe(other),
                    reason: "phrase words must be text".to_string(),
                });
            }
        };

        if key.starts_with(DIRECTIVE_PREFIX) {
            continue;
        }

        let phrase = match prefix {
            Some(prefix) => prefix.join(&parse_phrase(key)?),
            None => parse_phrase(key)?,
        };

        match value {
            Value::String(class) => {
                spec.merge(phrase, CommandRef::new(class).within(&namespace))?;
            }
            Value::Mapping(nested) => {
                read_nested(nested, Some(&phrase), &namespace, includes, spec)?;
            }
            Value::Tagged(tagged) if tagged.tag == INCLUDE_TAG => {
                let file = match &tagged.value {
                    Value::String(file) => file,
                    other => {
                        return Err(SpecError::InvalidEntry {
                            entry: key.clone(),
                            reason: format!("expected a file to include, found {}", describe(other)),
                        });
                    }
                };
                let base = includes.last().and_then(|current| current.parent());
                let path = canonical(&include_path(base, file)?)?;

                if includes.contains(&path) {
                    return Err(SpecError::IncludeCycle { path });
                }

                let included: Value = serde_yaml::from_str(&read_file(&path)?)?;

                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Including '{}' under '{phrase}'.", path.display());
                }

                match &included {
                    Value::Mapping(nested) => {
                        let mut chain = includes.to_vec();
                        chain.push(path.clone());
                        read_nested(nested, Some(&phrase), &namespace, &chain, spec)?;
                    }
                    other => {
                        return Err(SpecError::InvalidDocument(format!(
                            "'{}' must contain a mapping, found {}",
                            path.display(),
                            describe(other)
                        )));
                    }
                }
            }
            other => {
                return Err(SpecError::InvalidEntry {
                    entry: key.clone(),
                    reason: format!(
                        "expected a command or a nested mapping, found {}",
                        describe(other)
                    ),
                });
            }
        }
    }

    Ok(())
}

fn include_path(base: Option<&Path>, file: &str) -> Result<PathBuf, SpecError> {
    let file = Path::new(file);

    if file.is_absolute() {
        return Ok(file.to_path_buf());
    }

    match base {
        Some(base) => Ok(base.join(file)),
        None => Err(SpecError::IncludeUnavailable(file.display().to_string())),
    }
}

fn canonical(path: &Path) -> Result<PathBuf, SpecError> {
    path.canonicalize().map_err(|source| SpecError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "nothing".to_string(),
        Value::Bool(b) => format!("'{b}'"),
        Value::Number(n) => format!("'{n}'"),
        Value::String(s) => format!("'{s}'"),
        Value::Sequence(_) => "a sequence".to_string(),
        Value::Mapping(_) => "a mapping".to_string(),
        Value::Tagged(tagged) => format!("a value tagged '{}'", tagged.tag),
    }
}
