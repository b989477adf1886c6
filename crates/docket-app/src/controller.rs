// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::debug;

use crate::{
    FieldMap, InsertPosition, KeyAllocator, Operation, Record, RecordError, RecordKey, ScreenSpec,
    StatusFilter, Value, ViewState, status_options, visible_set,
};

/// Where a single record sits in its edit lifecycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditPhase {
    #[default]
    Idle,
    Selected(RecordKey),
    /// `target` is `None` for a create form.
    Editing {
        target: Option<RecordKey>,
        draft: FieldMap,
    },
}

/// A validated draft handed to the backend while the form is disabled.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub target: Option<RecordKey>,
    pub fields: FieldMap,
}

/// What the backend sent back for an accepted create or update.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Echo {
    pub key: Option<RecordKey>,
    pub fields: FieldMap,
}

/// Owns one screen's record store and mediates every mutation of it.
#[derive(Debug, Clone)]
pub struct RecordController {
    spec: ScreenSpec,
    records: Vec<Record>,
    phase: EditPhase,
    keys: KeyAllocator,
    submitting: bool,
}

impl RecordController {
    pub fn new(spec: ScreenSpec) -> Self {
        Self::with_records(spec, Vec::new())
    }

    pub fn with_records(spec: ScreenSpec, records: Vec<Record>) -> Self {
        Self {
            spec,
            records,
            phase: EditPhase::Idle,
            keys: KeyAllocator::default(),
            submitting: false,
        }
    }

    pub fn with_keys(mut self, keys: KeyAllocator) -> Self {
        self.keys = keys;
        self
    }

    pub fn spec(&self) -> &ScreenSpec {
        &self.spec
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn phase(&self) -> &EditPhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn get(&self, key: &RecordKey) -> Option<&Record> {
        self.records.iter().find(|record| record.key() == key)
    }

    pub fn visible(&self, state: &ViewState) -> Vec<&Record> {
        visible_set(&self.records, &self.spec.view, state)
    }

    pub fn status_options(&self) -> Vec<StatusFilter> {
        status_options(&self.records, &self.spec.view)
    }

    /// The record behind the open row or modal, if it still exists.
    pub fn selected(&self) -> Option<&Record> {
        match &self.phase {
            EditPhase::Selected(key)
            | EditPhase::Editing {
                target: Some(key), ..
            } => self.get(key),
            EditPhase::Idle | EditPhase::Editing { target: None, .. } => None,
        }
    }

    pub fn draft(&self) -> Option<&FieldMap> {
        match &self.phase {
            EditPhase::Editing { draft, .. } => Some(draft),
            EditPhase::Idle | EditPhase::Selected(_) => None,
        }
    }

    /// Fetch completed: the store is swapped wholesale and any open
    /// selection or edit is dropped.
    pub fn replace_all(&mut self, records: Vec<Record>) {
        debug!(
            screen = self.spec.kind.as_str(),
            count = records.len(),
            "record store replaced"
        );
        self.records = records;
        self.phase = EditPhase::Idle;
    }

    pub fn select(&mut self, key: Option<RecordKey>) {
        self.phase = match key {
            Some(key) => EditPhase::Selected(key),
            None => EditPhase::Idle,
        };
    }

    pub fn create(&mut self, fields: FieldMap) -> Result<RecordKey, RecordError> {
        self.require(Operation::Create, self.spec.operations.create)?;
        self.spec.form.validate(&fields)?;
        let key = self.keys.allocate(self.records.iter().map(Record::key));
        self.insert(Record::from_fields(key.clone(), fields));
        debug!(screen = self.spec.kind.as_str(), key = %key, "record created");
        Ok(key)
    }

    pub fn update(&mut self, key: &RecordKey, fields: &FieldMap) -> Result<(), RecordError> {
        self.require(Operation::Update, self.spec.operations.update)?;
        let record = self
            .records
            .iter_mut()
            .find(|record| record.key() == key)
            .ok_or_else(|| RecordError::NotFound(key.clone()))?;
        record.merge(fields);
        self.phase = EditPhase::Idle;
        debug!(screen = self.spec.kind.as_str(), key = %key, "record updated");
        Ok(())
    }

    /// Returns whether a record was removed; an absent key is a no-op.
    pub fn remove(&mut self, key: &RecordKey) -> Result<bool, RecordError> {
        self.require(Operation::Remove, self.spec.operations.remove)?;
        let before = self.records.len();
        self.records.retain(|record| record.key() != key);
        let removed = self.records.len() != before;
        if removed && self.phase_targets(key) {
            self.phase = EditPhase::Idle;
        }
        debug!(screen = self.spec.kind.as_str(), key = %key, removed, "record remove");
        Ok(removed)
    }

    pub fn begin_create(&mut self) -> Result<(), RecordError> {
        self.require(Operation::Create, self.spec.operations.create)?;
        self.phase = EditPhase::Editing {
            target: None,
            draft: self.spec.form.blank_draft(),
        };
        Ok(())
    }

    pub fn begin_edit(&mut self) -> Result<(), RecordError> {
        self.require(Operation::Update, self.spec.operations.update)?;
        let EditPhase::Selected(key) = &self.phase else {
            return Err(RecordError::NothingSelected);
        };
        let record = self
            .get(key)
            .ok_or_else(|| RecordError::NotFound(key.clone()))?;
        self.phase = EditPhase::Editing {
            target: Some(record.key().clone()),
            draft: record.fields().clone(),
        };
        Ok(())
    }

    pub fn set_field(&mut self, field: &str, value: impl Into<Value>) -> Result<(), RecordError> {
        let EditPhase::Editing { draft, .. } = &mut self.phase else {
            return Err(RecordError::NotEditing);
        };
        draft.insert(field.to_owned(), value.into());
        Ok(())
    }

    /// Commits the open form locally. A failed save keeps the form open with
    /// the draft untouched.
    pub fn save(&mut self) -> Result<RecordKey, RecordError> {
        if self.submitting {
            return Err(RecordError::SubmitPending);
        }
        let (target, draft) = match &self.phase {
            EditPhase::Editing { target, draft } => (target.clone(), draft.clone()),
            EditPhase::Idle | EditPhase::Selected(_) => return Err(RecordError::NotEditing),
        };
        match target {
            None => {
                let key = self.create(draft)?;
                self.phase = EditPhase::Idle;
                Ok(key)
            }
            Some(key) => {
                self.spec.form.validate(&draft)?;
                self.update(&key, &draft)?;
                Ok(key)
            }
        }
    }

    pub fn cancel(&mut self) {
        self.phase = EditPhase::Idle;
    }

    /// Validates the open form and marks it as submitting. Until
    /// [`finish_submit`](Self::finish_submit) or
    /// [`abort_submit`](Self::abort_submit) runs, further submits fail.
    pub fn begin_submit(&mut self) -> Result<Submission, RecordError> {
        if self.submitting {
            return Err(RecordError::SubmitPending);
        }
        let EditPhase::Editing { target, draft } = &self.phase else {
            return Err(RecordError::NotEditing);
        };
        let operation = match target {
            None => Operation::Create,
            Some(_) => Operation::Update,
        };
        let allowed = match operation {
            Operation::Create => self.spec.operations.create,
            Operation::Update | Operation::Remove => self.spec.operations.update,
        };
        self.require(operation, allowed)?;
        self.spec.form.validate(draft)?;

        let submission = Submission {
            target: target.clone(),
            fields: draft.clone(),
        };
        self.submitting = true;
        Ok(submission)
    }

    /// The backend call failed; the form stays open for a retry.
    pub fn abort_submit(&mut self) {
        self.submitting = false;
    }

    /// Applies an accepted submission. Echoed fields win over the submitted
    /// ones. If the form was dismissed meanwhile the store is still updated.
    pub fn finish_submit(
        &mut self,
        submission: Submission,
        echo: Option<Echo>,
    ) -> Result<RecordKey, RecordError> {
        self.submitting = false;
        let echo = echo.unwrap_or_default();
        let mut fields = submission.fields;
        fields.extend(echo.fields);

        let still_open = matches!(
            &self.phase,
            EditPhase::Editing { target, .. } if *target == submission.target
        );

        let key = match submission.target {
            None => {
                let key = echo.key.unwrap_or_else(|| self.next_key());
                self.apply_remote_create(Record::from_fields(key, fields))
            }
            Some(key) => {
                let record = self
                    .records
                    .iter_mut()
                    .find(|record| record.key() == &key)
                    .ok_or_else(|| RecordError::NotFound(key.clone()))?;
                record.merge(&fields);
                debug!(screen = self.spec.kind.as_str(), key = %key, "remote update applied");
                key
            }
        };

        if still_open {
            self.phase = EditPhase::Idle;
        }
        Ok(key)
    }

    /// Inserts a record produced elsewhere, whatever the edit phase. A key
    /// that is already taken is replaced with a fresh one.
    pub fn apply_remote_create(&mut self, record: Record) -> RecordKey {
        let record = if self.get(record.key()).is_some() {
            Record::from_fields(self.next_key(), record.fields().clone())
        } else {
            record
        };
        let key = record.key().clone();
        self.insert(record);
        debug!(screen = self.spec.kind.as_str(), key = %key, "remote create applied");
        key
    }

    fn next_key(&mut self) -> RecordKey {
        self.keys.allocate(self.records.iter().map(Record::key))
    }

    fn insert(&mut self, record: Record) {
        match self.spec.insert {
            InsertPosition::Prepend => self.records.insert(0, record),
            InsertPosition::Append => self.records.push(record),
        }
    }

    fn phase_targets(&self, key: &RecordKey) -> bool {
        match &self.phase {
            EditPhase::Selected(selected) => selected == key,
            EditPhase::Editing { target, .. } => target.as_ref() == Some(key),
            EditPhase::Idle => false,
        }
    }

    fn require(&self, operation: Operation, allowed: bool) -> Result<(), RecordError> {
        if allowed {
            Ok(())
        } else {
            Err(RecordError::Unsupported {
                screen: self.spec.kind,
                operation,
            })
        }
    }
}
