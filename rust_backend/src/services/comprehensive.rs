//! Comprehensive-view aggregation across a batch of entries.
//!
//! For every entry of a batch, each tagged attribute is dispatched to the
//! transformer of its widget and the resulting view is appended to that
//! widget's list, in entry order. Failures of a single attribute are
//! collected against the entry and processing continues; a broken widget
//! definition fails the whole batch since every entry depends on it.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::PipelineConfig;
use crate::core::{ComprehensiveView, Entry, EntryId, WidgetDefinition};
use crate::error::{WidgetError, WidgetResult};
use crate::transformations::{transformer_for, ComprehensiveViewState, Transformer};

/// View of one widget on one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    pub entry_id: EntryId,
    pub view: ComprehensiveView,
}

/// A problem with one attribute of one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryIssue {
    pub entry_id: EntryId,
    pub widget_key: String,
    pub message: String,
    pub error: WidgetError,
}

impl EntryIssue {
    fn new(entry_id: EntryId, widget_key: &str, error: WidgetError) -> Self {
        Self {
            entry_id,
            widget_key: widget_key.to_string(),
            message: error.to_string(),
            error,
        }
    }
}

/// Result of a batch aggregation run.
///
/// # Fields
///
/// * `views` - Views per widget key, one per successfully processed entry, in entry order
/// * `errors` - Attributes whose value could not be processed
/// * `warnings` - Non-fatal problems (unknown selections, repeated or unknown widget attributes)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub views: BTreeMap<String, Vec<EntryView>>,
    pub errors: Vec<EntryIssue>,
    pub warnings: Vec<EntryIssue>,
}

impl BatchOutcome {
    pub fn views_for(&self, widget_key: &str) -> &[EntryView] {
        self.views.get(widget_key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn view_count(&self) -> usize {
        self.views.values().map(Vec::len).sum()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Incremental batch builder.
///
/// Owns the [`ComprehensiveViewState`] of one batch. Entries are processed
/// as they are added, so a caller can stop between entries and still
/// [`finish`](Self::finish) with the views built so far.
///
/// # Examples
///
/// ```
/// use deep_widgets::config::PipelineConfig;
/// use deep_widgets::core::{AttributeValue, Entry, EntryId, WidgetDefinition, WidgetKind};
/// use deep_widgets::services::comprehensive::ComprehensiveViewBuilder;
/// use serde_json::json;
///
/// let widgets = vec![WidgetDefinition::new("count", WidgetKind::Number, "Count", json!(null))];
/// let config = PipelineConfig::default();
/// let mut builder = ComprehensiveViewBuilder::new(&config, &widgets).unwrap();
/// builder.add_entry(&Entry {
///     id: EntryId(1),
///     attributes: vec![AttributeValue::new("count", json!(5))],
/// });
/// let outcome = builder.finish();
/// assert_eq!(outcome.views_for("count").len(), 1);
/// ```
pub struct ComprehensiveViewBuilder<'a> {
    config: &'a PipelineConfig,
    widgets: HashMap<&'a str, (&'a WidgetDefinition, &'static dyn Transformer)>,
    unsupported: HashSet<&'a str>,
    state: ComprehensiveViewState,
    outcome: BatchOutcome,
    entries_seen: usize,
}

impl<'a> ComprehensiveViewBuilder<'a> {
    /// Validate the widget definitions and start a batch.
    ///
    /// # Errors
    ///
    /// Returns the first definition error: duplicate widget keys, or
    /// options a transformer cannot work with.
    pub fn new(config: &'a PipelineConfig, widgets: &'a [WidgetDefinition]) -> WidgetResult<Self> {
        let mut supported = HashMap::with_capacity(widgets.len());
        let mut unsupported = HashSet::new();
        let mut views = BTreeMap::new();

        for widget in widgets {
            let key = widget.key.as_str();
            if supported.contains_key(key) || unsupported.contains(key) {
                return Err(WidgetError::DuplicateWidgetKey(widget.key.clone()));
            }
            match transformer_for(widget.kind) {
                Some(transformer) => {
                    transformer.validate_definition(widget)?;
                    supported.insert(key, (widget, transformer));
                    views.insert(widget.key.clone(), Vec::new());
                }
                None => {
                    log::debug!("Skipping widget '{}' with no transformer", key);
                    unsupported.insert(key);
                }
            }
        }

        log::debug!(
            "Starting comprehensive views for {} widgets ({} skipped)",
            supported.len(),
            unsupported.len()
        );

        Ok(Self {
            config,
            widgets: supported,
            unsupported,
            state: ComprehensiveViewState::new(),
            outcome: BatchOutcome {
                views,
                ..BatchOutcome::default()
            },
            entries_seen: 0,
        })
    }

    /// Process every attribute of `entry`.
    ///
    /// Only the first attribute of a widget counts; later ones are reported
    /// as warnings so each widget gets at most one view per entry.
    pub fn add_entry(&mut self, entry: &Entry) {
        self.entries_seen += 1;
        let mut seen: HashSet<&str> = HashSet::with_capacity(entry.attributes.len());

        for attribute in &entry.attributes {
            let key = attribute.widget_key.as_str();
            let Some(&(widget, transformer)) = self.widgets.get(key) else {
                if !self.unsupported.contains(key) {
                    self.outcome.warnings.push(EntryIssue::new(
                        entry.id,
                        key,
                        WidgetError::UnknownWidget(key.to_string()),
                    ));
                }
                continue;
            };
            if !seen.insert(key) {
                log::warn!("Entry {} tags widget '{}' more than once, ignoring repeat", entry.id.0, key);
                self.outcome.warnings.push(EntryIssue::new(
                    entry.id,
                    key,
                    WidgetError::DuplicateAttribute(key.to_string()),
                ));
                continue;
            }

            let result = transformer.comprehensive(self.config, &mut self.state, widget, attribute);
            for notice in self.state.take_notices() {
                log::warn!("Entry {}: {}", entry.id.0, notice);
                self.outcome.warnings.push(EntryIssue::new(entry.id, key, notice));
            }

            match result {
                Ok(view) => {
                    if let Some(views) = self.outcome.views.get_mut(key) {
                        views.push(EntryView {
                            entry_id: entry.id,
                            view,
                        });
                    }
                }
                Err(error) => {
                    log::warn!("Entry {} widget '{}' failed: {}", entry.id.0, key, error);
                    self.outcome.errors.push(EntryIssue::new(entry.id, key, error));
                }
            }
        }
    }

    pub fn entries_seen(&self) -> usize {
        self.entries_seen
    }

    /// End the batch; the memoized state is dropped here.
    pub fn finish(self) -> BatchOutcome {
        log::info!(
            "Built {} comprehensive views from {} entries ({} errors, {} warnings)",
            self.outcome.view_count(),
            self.entries_seen,
            self.outcome.errors.len(),
            self.outcome.warnings.len()
        );
        self.outcome
    }
}

/// Build comprehensive views for a batch with the default configuration.
pub fn build_comprehensive_views(
    widgets: &[WidgetDefinition],
    entries: &[Entry],
) -> WidgetResult<BatchOutcome> {
    build_comprehensive_views_with(PipelineConfig::default_ref(), widgets, entries)
}

/// Build comprehensive views for a batch.
///
/// # Arguments
///
/// * `config` - Pipeline configuration
/// * `widgets` - Widget definitions of the analysis framework
/// * `entries` - Entries in report order
///
/// # Returns
///
/// * `Ok(BatchOutcome)` with views, per-entry errors and warnings
/// * `Err(WidgetError)` if a widget definition is unusable
pub fn build_comprehensive_views_with(
    config: &PipelineConfig,
    widgets: &[WidgetDefinition],
    entries: &[Entry],
) -> WidgetResult<BatchOutcome> {
    let mut builder = ComprehensiveViewBuilder::new(config, widgets)?;
    for entry in entries {
        builder.add_entry(entry);
    }
    Ok(builder.finish())
}
