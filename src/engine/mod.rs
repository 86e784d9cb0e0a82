mod plan;

#[cfg(test)]
mod tests;

pub use plan::{OutputKind, Plan, PlannedOutput};

use crate::boundary::BoundaryRegistry;
use crate::collect::collect_documents;
use crate::config::{PartitionConfig, SortOrder};
use crate::document::Document;
use crate::error::{PartitionError, Result};
use crate::feasibility::{assess, FeasibilityReport};
use crate::packer::pack;
use crate::splitter::split_document;
use crate::store::{normalize, DiskStore, DocumentStore};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Splits oversized documents and packs small ones under the configured limits
pub struct Partitioner {
    config: PartitionConfig,
    registry: BoundaryRegistry,
}

impl Partitioner {
    /// Create a partitioner splitting every document on `config.split_pattern`
    pub fn new(config: PartitionConfig) -> Result<Self> {
        let registry = BoundaryRegistry::with_pattern(&config.split_pattern)?;
        Self::with_registry(config, registry)
    }

    /// Create a partitioner with custom boundary detectors
    pub fn with_registry(config: PartitionConfig, registry: BoundaryRegistry) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, registry })
    }

    pub fn config(&self) -> &PartitionConfig {
        &self.config
    }

    pub fn registry_mut(&mut self) -> &mut BoundaryRegistry {
        &mut self.registry
    }

    /// Disk store using the configured encoding
    pub fn disk_store(&self) -> Result<DiskStore> {
        DiskStore::with_label(&self.config.encoding)
    }

    /// Read documents in the configured order
    pub fn load<S>(&self, store: &S, paths: &[PathBuf]) -> Result<Vec<Document>>
    where
        S: DocumentStore + ?Sized,
    {
        let mut docs = Vec::with_capacity(paths.len());
        for path in paths {
            let doc = Document::new(path.clone(), store.read_to_string(path)?);
            log::info!("Processing {} ({} characters)", path.display(), doc.size);
            docs.push(doc);
        }

        if self.config.order == SortOrder::SizeDescending {
            docs.sort_by(|a, b| b.size.cmp(&a.size));
        }
        Ok(docs)
    }

    /// Pre-flight estimate, no side effects
    pub fn check(&self, docs: &[Document]) -> FeasibilityReport {
        assess(
            docs,
            self.config.max_size,
            self.config.max_files,
            &self.registry,
            &self.config.join_separator,
        )
    }

    /// Work out every output in memory
    ///
    /// Fails with [`PartitionError::ConstraintInfeasible`] when even the
    /// optimistic estimate needs more than `max_files` files, and with
    /// [`PartitionError::OutputCollision`] when a new file would replace
    /// anything in `store` that the run does not consume.
    pub fn plan<S>(&self, store: &S, docs: Vec<Document>, out_dir: &Path) -> Result<Plan>
    where
        S: DocumentStore + ?Sized,
    {
        let config = &self.config;
        let feasibility = self.check(&docs);
        log::debug!(
            "Feasibility: {} parts + {} bins against {} files",
            feasibility.oversized_parts,
            feasibility.small_bins,
            config.max_files
        );
        feasibility.ensure()?;

        let input_count = docs.len();
        let mut outputs = Vec::new();
        let mut consumed = Vec::new();
        let mut small = Vec::new();
        let mut split_documents = 0;

        for doc in docs {
            if !doc.is_oversized(config.max_size) {
                small.push(doc);
                continue;
            }

            let detector = self.registry.select(&doc.path);
            let parts = split_document(
                &doc,
                out_dir,
                config.max_size,
                detector,
                &config.join_separator,
            );
            log::info!(
                "Split {} into {} parts ({} boundaries)",
                doc.path.display(),
                parts.len(),
                detector.name()
            );

            split_documents += 1;
            consumed.push(doc.path);
            outputs.extend(parts.into_iter().map(|part| PlannedOutput {
                path: part.path,
                kind: OutputKind::Part {
                    source: part.source,
                    number: part.number,
                },
                content: part.content,
                size: part.size,
            }));
        }

        let part_count = outputs.len();
        let packing = pack(
            &small,
            part_count,
            config.max_size,
            config.max_files,
            &config.join_separator,
            out_dir,
            &config.bin_prefix,
        )?;

        let mut by_path: HashMap<PathBuf, Document> =
            small.into_iter().map(|d| (d.path.clone(), d)).collect();

        for path in &packing.standalone {
            if let Some(doc) = by_path.remove(path) {
                outputs.push(PlannedOutput {
                    path: doc.path,
                    kind: OutputKind::Untouched,
                    size: doc.size,
                    content: doc.content,
                });
            }
        }

        for bin in packing.bins {
            consumed.extend(bin.members.iter().cloned());
            outputs.push(PlannedOutput {
                path: bin.path,
                kind: OutputKind::Bin {
                    members: bin.members,
                },
                content: bin.content,
                size: bin.size,
            });
        }

        check_collisions(store, &outputs, &consumed)?;

        Ok(Plan {
            feasibility,
            outputs,
            consumed,
            input_count,
            split_documents,
            merges: packing.merges,
        })
    }

    /// Write every new output, then delete the consumed inputs
    pub fn commit<S>(&self, store: &mut S, plan: &Plan, out_dir: &Path) -> Result<()>
    where
        S: DocumentStore + ?Sized,
    {
        store.ensure_dir(out_dir)?;

        for output in plan.outputs.iter().filter(|o| o.needs_write()) {
            store.write(&output.path, &output.content)?;
            log::info!(
                "Wrote {} ({} characters)",
                output.path.display(),
                output.size
            );
        }

        for source in plan.removals() {
            store.remove(source)?;
            log::debug!("Removed {}", source.display());
        }
        Ok(())
    }

    /// Load, plan and commit the given documents
    pub fn run<S>(&self, store: &mut S, paths: &[PathBuf], out_dir: &Path) -> Result<Plan>
    where
        S: DocumentStore + ?Sized,
    {
        let docs = self.load(&*store, paths)?;
        let plan = self.plan(&*store, docs, out_dir)?;
        self.commit(store, &plan, out_dir)?;
        log::info!(
            "Produced {} files from {} documents",
            plan.outputs.len(),
            plan.input_count
        );
        Ok(plan)
    }

    /// Collect the documents in `input_dir` that `filter` accepts and run on them
    ///
    /// With `dry_run` the plan is returned without touching the store.
    pub fn run_dir<S, F>(
        &self,
        store: &mut S,
        input_dir: &Path,
        filter: F,
        dry_run: bool,
    ) -> Result<Plan>
    where
        S: DocumentStore + ?Sized,
        F: Fn(&Path) -> bool,
    {
        let paths = collect_documents(&*store, input_dir, &self.config.collect, filter)?;
        let out_dir = self.config.resolve_output_dir(input_dir);

        if dry_run {
            let docs = self.load(&*store, &paths)?;
            return self.plan(&*store, docs, &out_dir);
        }
        self.run(store, &paths, &out_dir)
    }
}

/// Reject plans where two outputs share a path, or where a new file would
/// replace an existing one that is not a consumed input
fn check_collisions<S>(store: &S, outputs: &[PlannedOutput], consumed: &[PathBuf]) -> Result<()>
where
    S: DocumentStore + ?Sized,
{
    let key = |path: &Path| normalize(path).unwrap_or_else(|_| path.to_path_buf());
    let consumed: HashSet<PathBuf> = consumed.iter().map(|p| key(p)).collect();
    let mut seen = HashSet::new();

    for output in outputs {
        let path = key(&output.path);
        if output.needs_write() && store.exists(&output.path) && !consumed.contains(&path) {
            return Err(PartitionError::OutputCollision(output.path.clone()));
        }
        if !seen.insert(path) {
            return Err(PartitionError::OutputCollision(output.path.clone()));
        }
    }
    Ok(())
}
