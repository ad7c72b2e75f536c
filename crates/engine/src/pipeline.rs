// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline orchestrator: drives one job per upload through every stage.
//!
//! `start` validates the request, records the job and returns a handle at
//! once; the stages run on their own task. After each stage the job is
//! persisted and then announced on the progress hub, in that order. Any
//! stage error ends the job as FAILED with its message recorded; branch push
//! failures do not, they are itemized in the outcome instead.

use crate::config::PipelineConfig;
use crate::progress::{ProgressHub, Retention, Subscription};
use crate::publisher::BranchPublisher;
use fl_adapters::{Extractor, RemoteVcs, SafetyGate};
use fl_classify::{Classifier, FileTree};
use fl_core::{
    derive_repo_name, retry_tag, BranchPlan, Clock, Job, JobId, JobRequest, OwnerId, PipelineError, ProgressSession,
    PublishOutcome, Stage,
};
use fl_storage::JobStore;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;

/// Percent reported once analysis results are in, before organizing starts
const ANALYZED_PERCENT: u8 = 65;

/// External collaborators the pipeline runs against
pub struct PipelineDeps<V: RemoteVcs> {
    pub vcs: V,
    pub store: Arc<dyn JobStore>,
    pub extractor: Arc<dyn Extractor>,
    pub gate: Arc<dyn SafetyGate>,
}

pub struct Pipeline<V: RemoteVcs, C: Clock> {
    store: Arc<dyn JobStore>,
    extractor: Arc<dyn Extractor>,
    gate: Arc<dyn SafetyGate>,
    classifier: Classifier,
    publisher: BranchPublisher<V, C>,
    hub: ProgressHub<C>,
    config: PipelineConfig,
    clock: C,
}

/// Running job
pub struct JobHandle {
    job_id: JobId,
    owner_id: OwnerId,
    cancel: CancellationToken,
    join: JoinHandle<Job>,
}

impl JobHandle {
    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    pub fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    /// Ask the job to stop at the next stage boundary or before the next push.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Token that cancels this job; stays usable after `wait` consumes the handle.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Wait for the job to reach a terminal stage.
    pub async fn wait(self) -> Result<Job, JoinError> {
        self.join.await
    }
}

impl<V: RemoteVcs, C: Clock> Pipeline<V, C> {
    pub fn new(deps: PipelineDeps<V>, config: PipelineConfig, clock: C) -> Result<Arc<Self>, PipelineError> {
        let classifier = Classifier::new().map_err(|e| PipelineError::Classification(e.to_string()))?;
        let retention = Retention { completed: config.completed_retention, failed: config.failed_retention };
        Ok(Arc::new(Self {
            store: deps.store,
            extractor: deps.extractor,
            gate: deps.gate,
            classifier,
            publisher: BranchPublisher::new(deps.vcs, clock.clone(), &config),
            hub: ProgressHub::new(retention, clock.clone()),
            config,
            clock,
        }))
    }

    pub fn hub(&self) -> &ProgressHub<C> {
        &self.hub
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn snapshot(&self, job_id: &JobId) -> Option<ProgressSession> {
        self.hub.snapshot(job_id)
    }

    pub fn subscribe(&self, owner_id: &OwnerId) -> Subscription {
        self.hub.subscribe(owner_id)
    }

    /// Validate and record a new job, then run it in the background.
    ///
    /// Nothing is recorded for an invalid upload.
    pub async fn start(self: &Arc<Self>, request: JobRequest) -> Result<JobHandle, PipelineError> {
        request.upload.validate()?;

        let job = Job::new(JobId::generate(), request.owner_id.clone(), &request.upload, &self.clock);
        self.persist(&job).await?;
        self.hub.start_session(&job.id, &job.owner_id);
        tracing::info!(job_id = %job.id, owner = %job.owner_id, source = %request.upload.file_name, "job accepted");

        let cancel = CancellationToken::new();
        let handle = JobHandle {
            job_id: job.id.clone(),
            owner_id: job.owner_id.clone(),
            cancel: cancel.clone(),
            join: tokio::spawn(Arc::clone(self).run(job, request, cancel)),
        };
        Ok(handle)
    }

    /// Stored record for a job
    pub async fn job(&self, owner_id: &OwnerId, job_id: &JobId) -> Result<Option<Job>, PipelineError> {
        self.store.get(owner_id, job_id).await.map_err(|e| PipelineError::Persistence(e.to_string()))
    }

    /// Remove a job's record and its scratch directory.
    ///
    /// Returns whether a record existed.
    pub async fn delete_job(&self, owner_id: &OwnerId, job_id: &JobId) -> Result<bool, PipelineError> {
        let existed =
            self.store.delete(owner_id, job_id).await.map_err(|e| PipelineError::Persistence(e.to_string()))?;
        let scratch = self.job_dir(job_id);
        if tokio::fs::try_exists(&scratch).await.unwrap_or(false) {
            if let Err(e) = tokio::fs::remove_dir_all(&scratch).await {
                tracing::warn!(job_id = %job_id, path = %scratch.display(), error = %e, "failed to remove job directory");
            }
        }
        Ok(existed)
    }

    fn job_dir(&self, job_id: &JobId) -> PathBuf {
        self.config.work_root.join(job_id.as_str())
    }

    async fn run(self: Arc<Self>, mut job: Job, request: JobRequest, cancel: CancellationToken) -> Job {
        let started = Instant::now();
        match self.drive(&mut job, &request, &cancel).await {
            Ok(()) => {
                let outcome = job.result.as_ref();
                tracing::info!(
                    job_id = %job.id,
                    repository = outcome.map(|o| o.attempted_name.as_str()).unwrap_or_default(),
                    pushed = outcome.map(PublishOutcome::pushed_count).unwrap_or_default(),
                    failed = outcome.map(|o| o.failures().count()).unwrap_or_default(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "job completed"
                );
            }
            Err(error) => self.record_failure(&mut job, error).await,
        }
        job
    }

    async fn drive(&self, job: &mut Job, request: &JobRequest, cancel: &CancellationToken) -> Result<(), PipelineError> {
        let upload = &request.upload;

        self.enter(job, Stage::Extracting, Value::Null, cancel).await?;
        let dest = self.job_dir(&job.id).join("extracted");
        tokio::fs::create_dir_all(&dest)
            .await
            .map_err(|e| PipelineError::Extraction(format!("{}: {e}", dest.display())))?;
        let root = self.extractor.extract(upload, &dest).await.map_err(|e| PipelineError::Extraction(e.to_string()))?;
        job.extracted_root = Some(root.clone());

        self.enter(job, Stage::Scanning, Value::Null, cancel).await?;
        if !self.gate.quick_scan(upload).await {
            return Err(PipelineError::UnsafeUpload);
        }

        self.enter(job, Stage::Analyzing, Value::Null, cancel).await?;
        let scan_root = root.clone();
        let tree = tokio::task::spawn_blocking(move || FileTree::scan(&scan_root))
            .await
            .map_err(|e| PipelineError::Classification(e.to_string()))?
            .map_err(|e| PipelineError::Classification(e.to_string()))?;
        let plan = self.classifier.classify(&tree);
        tracing::info!(
            job_id = %job.id,
            files = plan.total_files(),
            branches = ?plan.branch_names(),
            conflicts = plan.conflicts.has_conflicts(),
            "project analyzed"
        );
        job.analysis = Some(plan.clone());
        self.report(job, Stage::Analyzing, ANALYZED_PERCENT, "Project analysis complete", analysis_payload(&plan))
            .await?;

        let project = match request.repo_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => derive_repo_name(name),
            _ => derive_repo_name(&upload.file_name),
        };
        let description = request
            .description
            .clone()
            .unwrap_or_else(|| format!("Organized from {} by forklift", upload.file_name));

        self.enter(job, Stage::Organizing, Value::Null, cancel).await?;
        let workspace = self.publisher.materialize(&plan, &root, &project).await?;

        self.enter(job, Stage::CreatingRepo, json!({ "name": project }), cancel).await?;
        let tag = retry_tag(job.id.suffix());
        let created = self.publisher.create_repository(&project, &tag, &description, cancel).await?;

        // The repository exists now; cancelling only skips the remaining pushes
        let stage = Stage::Publishing;
        let payload = json!({ "repositoryUrl": created.repository.url });
        self.report(job, stage, stage.entry_percent(), stage.status_message(), payload).await?;
        let branch_results = self.publisher.push_all(&workspace, &created.repository, cancel).await;
        drop(workspace);

        let outcome = PublishOutcome {
            repository_url: created.repository.url,
            clone_url: created.repository.clone_ref,
            attempted_name: created.repository.name,
            name_retry_count: created.retries,
            branch_results,
        };
        let payload = completion_payload(&outcome, plan.total_files());

        let mut done = job.clone();
        done.complete(outcome, self.clock.epoch_ms())?;
        self.persist(&done).await?;
        *job = done;
        if let Err(e) = self.hub.complete(&job.id, payload) {
            tracing::warn!(job_id = %job.id, error = %e, "progress not recorded");
        }
        Ok(())
    }

    /// Enter `stage` at its entry percent, unless the job was cancelled.
    async fn enter(
        &self,
        job: &mut Job,
        stage: Stage,
        payload: Value,
        cancel: &CancellationToken,
    ) -> Result<(), PipelineError> {
        if cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }
        self.report(job, stage, stage.entry_percent(), stage.status_message(), payload).await
    }

    /// Persist the job at `stage`/`percent`, then publish the matching event.
    async fn report(
        &self,
        job: &mut Job,
        stage: Stage,
        percent: u8,
        message: &str,
        payload: Value,
    ) -> Result<(), PipelineError> {
        job.advance(stage, percent)?;
        self.persist(job).await?;
        tracing::debug!(job_id = %job.id, stage = %stage, percent = job.percent, "stage reported");
        if let Err(e) = self.hub.update(&job.id, stage, job.percent, message, payload) {
            tracing::warn!(job_id = %job.id, error = %e, "progress not recorded");
        }
        Ok(())
    }

    async fn persist(&self, job: &Job) -> Result<(), PipelineError> {
        self.store.put(job).await.map_err(|e| PipelineError::Persistence(e.to_string()))
    }

    async fn record_failure(&self, job: &mut Job, error: PipelineError) {
        let stage = job.stage;
        let kind = error.kind();
        tracing::error!(job_id = %job.id, stage = %stage, kind = %kind, error = %error, "job failed");

        if let Err(e) = job.fail(&error, self.clock.epoch_ms()) {
            tracing::error!(job_id = %job.id, error = %e, "could not mark job failed");
            return;
        }
        if let Err(e) = self.store.put(job).await {
            tracing::error!(job_id = %job.id, error = %e, "failed to persist failed job");
        }
        let payload = json!({ "errorKind": kind, "failedStage": stage });
        if let Err(e) = self.hub.fail(&job.id, error.to_string(), payload) {
            tracing::warn!(job_id = %job.id, error = %e, "progress not recorded");
        }
    }
}

fn analysis_payload(plan: &BranchPlan) -> Value {
    json!({
        "languages": plan.detected_languages,
        "frameworks": plan.detected_frameworks,
        "suggestedBranches": plan.branch_names(),
        "hasConflicts": plan.conflicts.has_conflicts(),
        "conflicts": plan.conflicts,
        "totalFiles": plan.total_files(),
    })
}

/// Terminal event payload: the outcome's fields plus `totalFiles`.
///
/// An outcome that fails to serialize still yields its repository URL.
fn completion_payload(outcome: &PublishOutcome, total_files: usize) -> Value {
    let mut payload = match serde_json::to_value(outcome) {
        Ok(value @ Value::Object(_)) => value,
        Ok(other) => {
            tracing::warn!(payload = %other, "publish outcome is not an object");
            json!({ "repositoryUrl": outcome.repository_url })
        }
        Err(e) => {
            tracing::warn!(error = %e, "publish outcome not serialized");
            json!({ "repositoryUrl": outcome.repository_url })
        }
    };
    payload["totalFiles"] = json!(total_files);
    payload
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
